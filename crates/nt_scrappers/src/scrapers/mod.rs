pub mod google_news;

pub use google_news::GoogleNewsProvider;

/// Common utilities for scrapers
pub(crate) mod utils {
    use scraper::{ElementRef, Selector};

    /// Text of the first element under `root` matching `selector`, with
    /// whitespace collapsed. Blank text counts as missing.
    pub fn first_text(root: ElementRef<'_>, selector: &Selector) -> Option<String> {
        root.select(selector)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .filter(|text| !text.is_empty())
    }

    pub fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
