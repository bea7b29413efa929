use async_trait::async_trait;
use std::path::Path;

use crate::errors::CollaboratorError;

pub mod gemini;

pub use gemini::GeminiDescriber;

/// Turns a screenshot of an error into a text description.
#[async_trait]
pub trait ImageDescriber: Send + Sync {
    async fn describe(&self, image: &[u8], mime_type: &str) -> Result<String, CollaboratorError>;
}

/// MIME type for the image formats the debug flow accepts.
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}
