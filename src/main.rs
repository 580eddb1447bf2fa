//! BIDSTRAT — Tax-deed auction bid strategy optimization engine
//!
//! Entry point. Loads configuration, initialises structured logging,
//! evaluates one bid request from a JSON file and prints the result.
//!
//! Usage: `bidstrat <request.json> [--config path] [--out path]`

use anyhow::{bail, Context, Result};
use std::process::ExitCode;
use tracing::{error, info};

use bidstrat::config::{self, AppConfig};
use bidstrat::report;
use bidstrat::strategy::{BidStrategyEngine, EngineConfig};
use bidstrat::types::EvaluateBidRequest;

const DEFAULT_CONFIG: &str = "config.toml";

struct Args {
    request: String,
    config: String,
    out: Option<String>,
}

fn main() -> ExitCode {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    match run() {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "bidstrat failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = parse_args(std::env::args().skip(1))?;
    let cfg = AppConfig::load_or_default(&args.config)?;
    init_logging(&cfg.logging);

    let raw = std::fs::read_to_string(&args.request)
        .with_context(|| format!("Failed to read request file: {}", args.request))?;
    let request: EvaluateBidRequest = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse request file: {}", args.request))?;

    let engine = BidStrategyEngine::new(EngineConfig::from_settings(&cfg.engine));
    let result = match engine.evaluate(&request) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{e}");
            for issue in &e.issues {
                eprintln!("  - {issue}");
            }
            return Ok(ExitCode::from(2));
        }
    };

    info!(request = %args.request, summary = %result, "Evaluation complete");

    let json = if cfg.output.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .context("Failed to serialise result")?;
    println!("{json}");

    if let Some(path) = args.out.as_ref().or(cfg.output.report_path.as_ref()) {
        report::save_result(&result, path)?;
        info!(path = %path, "Report written");
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut request = None;
    let mut config = DEFAULT_CONFIG.to_string();
    let mut out = None;

    while let Some(arg) = it.next() {
        if arg == "--config" {
            config = it.next().context("--config needs a path")?;
        } else if arg == "--out" {
            out = Some(it.next().context("--out needs a path")?);
        } else if arg.starts_with("--") {
            bail!("unknown flag: {arg}");
        } else if request.is_none() {
            request = Some(arg);
        } else {
            bail!("unexpected argument: {arg}");
        }
    }

    Ok(Args {
        request: request.context("usage: bidstrat <request.json> [--config path] [--out path]")?,
        config,
        out,
    })
}

/// Logs go to stderr so stdout carries only the result JSON.
fn init_logging(cfg: &config::LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.filter));

    let json_logging = cfg.json || std::env::var("BIDSTRAT_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
