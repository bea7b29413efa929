use anyhow::Result;
use clap::Parser;
use fs_err as fs;
use std::io::Read;
use tracing::{info, warn};

use promptgen::cli::Args;
use promptgen::config::Config;
use promptgen::provider::GeminiDescriber;
use promptgen::store::PlanStore;
use promptgen::ux::{self, ErrorReport};
use promptgen::{Composer, Mode};

/// Our own crate's level, unless `RUST_LOG` already says what to log.
/// `--verbose` always wins.
fn default_directive(verbose: bool, rust_log_set: bool) -> Option<String> {
    let level = match (verbose, rust_log_set) {
        (true, _) => "debug",
        (false, false) => "info",
        (false, true) => return None,
    };
    Some(format!("{}={level}", env!("CARGO_CRATE_NAME")))
}

fn initialize_logging(verbose: bool) {
    use tracing_subscriber::{filter::Directive, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let mut filter = EnvFilter::from_default_env();
    let directive = default_directive(verbose, std::env::var_os("RUST_LOG").is_some());
    if let Some(Ok(directive)) = directive.map(|d| d.parse::<Directive>()) {
        filter = filter.add_directive(directive);
    }

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn read_input(args: &Args) -> Result<String> {
    match &args.input {
        Some(s) => Ok(s.clone()),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut cfg = Config::load_or_default(args.config.as_deref())?;
    if let Some(dir) = &args.plans_dir {
        cfg.plans_dir = dir.clone();
    }
    if let Some(model) = &args.model {
        cfg.gemini.model = model.clone();
    }
    if let Some(secs) = args.timeout_secs {
        cfg.gemini.timeout_secs = secs;
    }
    cfg.gemini.api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("GEMINI_API_KEY").ok());
    Ok(cfg)
}

/// Never fails the run: without a usable image the prompt is built without
/// the image section.
async fn analyze_image(args: &Args, cfg: &Config) -> Option<String> {
    let path = args.image.as_deref()?;
    let describer = match GeminiDescriber::new(cfg.gemini.clone()) {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "image analysis unavailable");
            return None;
        }
    };

    let pb = ux::spinner("Analizando imagen del error...");
    let analysis = ux::analyze_image_file(&describer, path).await;
    pb.finish_and_clear();
    analysis
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    initialize_logging(args.verbose);

    for flag in args.debug_only_flags() {
        warn!(flag, "ignored outside debug mode");
    }

    let cfg = load_config(&args)?;
    let raw = read_input(&args)?;

    let input = match args.mode {
        Mode::Development => raw,
        Mode::Debug => {
            if raw.trim().is_empty() {
                // Let the composer report the empty input uniformly.
                raw
            } else {
                let report = ErrorReport {
                    description: raw.trim().to_string(),
                    logs: args.logs.clone(),
                    stack_trace: args.stack_trace.clone(),
                    image_analysis: analyze_image(&args, &cfg).await,
                };
                report.bundle()
            }
        }
    };

    let composer = Composer::new(PlanStore::new(&cfg.plans_dir));
    let prompt = match composer.compose(&input, args.mode) {
        Ok(p) => p,
        Err(e) => {
            ux::show_failure(&e);
            std::process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &prompt)?;
            info!(path = %path.display(), bytes = prompt.len(), "prompt written");
        }
        None => ux::show_prompt(&prompt),
    }
    Ok(())
}
