use colored::Colorize;
use fs_err as fs;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::errors::CompositionError;
use crate::provider::{self, ImageDescriber};

pub const IMAGE_ANALYSIS_HEADER: &str = "Análisis de Imagen del Error:";

/// Everything the user told us about a bug, flattened into one string before
/// it enters the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    pub description: String,
    pub logs: Option<String>,
    pub stack_trace: Option<String>,
    pub image_analysis: Option<String>,
}

impl ErrorReport {
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), ..Self::default() }
    }

    pub fn bundle(&self) -> String {
        let mut parts: Vec<&str> = vec!["Error Description:", self.description.as_str()];
        let extras = [
            ("Logs:", &self.logs),
            ("Stack Trace:", &self.stack_trace),
            (IMAGE_ANALYSIS_HEADER, &self.image_analysis),
        ];
        for (header, body) in extras {
            if let Some(body) = body.as_deref().filter(|b| !b.trim().is_empty()) {
                parts.extend(["", header, body]);
            }
        }
        parts.join("\n")
    }
}

/// Ask the collaborator for a description. Any failure is logged and
/// swallowed: the prompt is still generated, just without the image section.
pub async fn describe_image(describer: &dyn ImageDescriber, image: &[u8], mime_type: &str) -> Option<String> {
    match describer.describe(image, mime_type).await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(error = %e, "image analysis skipped");
            None
        }
    }
}

/// Describe the screenshot at `path`. An unsupported extension or an
/// unreadable file is logged and yields `None`, same as a failed request.
pub async fn analyze_image_file(describer: &dyn ImageDescriber, path: &Path) -> Option<String> {
    let Some(mime) = provider::mime_from_path(path) else {
        warn!(path = %path.display(), "image analysis skipped: expected png, jpg or jpeg");
        return None;
    };
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            warn!(error = %e, "image analysis skipped");
            return None;
        }
    };
    describe_image(describer, &bytes, mime).await
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

pub fn show_prompt(prompt: &str) {
    eprintln!("\n{}", "=== Prompt Generado ===".green().bold());
    println!("{prompt}");
}

pub fn show_failure(err: &CompositionError) {
    eprintln!("{} {}", "error:".red().bold(), err);
}
