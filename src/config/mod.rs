use anyhow::{Context, Result};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `plan_<ts>.json` and `debug_plan_<ts>.md`.
    pub plans_dir: PathBuf,
    pub gemini: GeminiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plans_dir: PathBuf::from("project_plans"),
            gemini: GeminiConfig::default(),
        }
    }
}

/// Settings for the image description collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Never read from or written to the config file.
    #[serde(skip)]
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-exp-1121".into(),
            endpoint: "https://generativelanguage.googleapis.com".into(),
            timeout_secs: 120,
            temperature: 1.0,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 8192,
        }
    }
}

impl Config {
    /// Load a TOML config file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
