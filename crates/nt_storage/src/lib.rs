pub mod export;
pub mod sessions;

pub use export::{export, export_filename, ExportFormat};
pub use sessions::{SessionId, SessionStore};

pub mod prelude {
    pub use super::export::{export, export_filename, ExportFormat};
    pub use super::sessions::{SessionId, SessionStore};
}
