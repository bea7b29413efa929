use clap::Parser;
use std::path::PathBuf;

use crate::wire::Mode;

#[derive(Parser, Debug)]
#[command(name = "promptgen", version, about = "Expand a requirement or bug report into a structured LLM prompt")]
pub struct Args {
    /// Requirement (development) or error description (debug). Read from stdin when omitted.
    pub input: Option<String>,

    #[arg(long, value_enum, default_value_t = Mode::Development)]
    pub mode: Mode,

    /// Error logs to attach (debug mode).
    #[arg(long)]
    pub logs: Option<String>,

    /// Stack trace to attach (debug mode).
    #[arg(long)]
    pub stack_trace: Option<String>,

    /// Screenshot of the error (png/jpg), described through Gemini (debug mode).
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Gemini API key. Falls back to GEMINI_API_KEY.
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(long)]
    pub plans_dir: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the prompt to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Debug-only flags that were given outside debug mode.
    pub fn debug_only_flags(&self) -> Vec<&'static str> {
        if self.mode == Mode::Debug {
            return Vec::new();
        }
        [
            ("--logs", self.logs.is_some()),
            ("--stack-trace", self.stack_trace.is_some()),
            ("--image", self.image.is_some()),
        ]
        .into_iter()
        .filter_map(|(flag, set)| set.then_some(flag))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["promptgen", "Build a photo-sharing web app"]).unwrap();
        assert_eq!(args.mode, Mode::Development);
        assert_eq!(args.input.as_deref(), Some("Build a photo-sharing web app"));
        assert!(args.image.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_debug_flags() {
        let args = Args::try_parse_from([
            "promptgen",
            "--mode",
            "debug",
            "--logs",
            "E0001",
            "--stack-trace",
            "at main()",
            "--image",
            "shot.png",
            "boom",
        ])
        .unwrap();
        assert_eq!(args.mode, Mode::Debug);
        assert_eq!(args.logs.as_deref(), Some("E0001"));
        assert_eq!(args.stack_trace.as_deref(), Some("at main()"));
        assert_eq!(args.image, Some(PathBuf::from("shot.png")));
    }

    #[test]
    fn test_mode_alias() {
        let args = Args::try_parse_from(["promptgen", "--mode", "dev", "x"]).unwrap();
        assert_eq!(args.mode, Mode::Development);
        assert!(Args::try_parse_from(["promptgen", "--mode", "review", "x"]).is_err());
    }

    #[test]
    fn test_debug_only_flags_outside_debug_mode() {
        let args = Args::try_parse_from(["promptgen", "--logs", "E0001", "--image", "shot.png", "x"]).unwrap();
        assert_eq!(args.debug_only_flags(), vec!["--logs", "--image"]);

        let args = Args::try_parse_from(["promptgen", "--mode", "debug", "--logs", "E0001", "x"]).unwrap();
        assert!(args.debug_only_flags().is_empty());

        let args = Args::try_parse_from(["promptgen", "x"]).unwrap();
        assert!(args.debug_only_flags().is_empty());
    }
}
