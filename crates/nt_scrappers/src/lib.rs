pub mod scrapers;
pub mod logging;

pub use logging::Logger;
pub use scrapers::GoogleNewsProvider;

use nt_core::{Result, SearchProvider};
use std::sync::Arc;

/// Builds the search provider named on the command line.
pub fn create_provider(name: &str) -> Result<Arc<dyn SearchProvider>> {
    match name.to_lowercase().as_str() {
        "google" | "google-news" => Ok(Arc::new(GoogleNewsProvider::new()?)),
        other => Err(nt_core::Error::Validation(format!("Unknown search provider: {}", other))),
    }
}

pub mod prelude {
    pub use super::scrapers::GoogleNewsProvider;
    pub use nt_core::{RawArticle, Result, Error, SearchProvider};
}
