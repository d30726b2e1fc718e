//! scorecard-cli: Evaluate saved analysis payloads and print the dashboard report as JSON.
//!
//! Usage:
//!   cargo run -p scorecard-cli -- --file payload.json
//!   cargo run -p scorecard-cli -- --dir ./payloads --symbol AAPL --market US
//!   cargo run -p scorecard-cli -- --dir ./payloads --symbol TCS --market Indian --compact

use analysis_core::Market;
use analysis_orchestrator::{EngineConfig, SignalEngine};
use anyhow::{bail, Context};

mod source;
use source::FilePayloadSource;

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scorecard_cli=info,analysis_orchestrator=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let compact = args.iter().any(|a| a == "--compact");
    let symbol = arg_value(&args, "--symbol");
    let market: Market = arg_value(&args, "--market")
        .unwrap_or("US")
        .parse()
        .context("invalid --market")?;

    let root = match (arg_value(&args, "--file"), arg_value(&args, "--dir")) {
        (Some(file), _) => file,
        (None, Some(dir)) => dir,
        (None, None) => bail!("usage: scorecard-cli (--file PATH | --dir DIR --symbol SYM) [--market US|Indian] [--compact]"),
    };

    let config = EngineConfig::from_env();
    tracing::info!(
        "Config: highlight_limit={}, preview_chars={}",
        config.highlight_limit,
        config.preview_chars
    );
    let engine = SignalEngine::new(config);
    let source = FilePayloadSource::new(root);

    let report = match symbol {
        Some(symbol) => engine
            .evaluate_from(&source, symbol, market)
            .await
            .with_context(|| format!("failed to evaluate {} ({})", symbol, market))?,
        None => {
            let payload = source
                .load_root()
                .await
                .with_context(|| format!("failed to load payload from {}", root))?;
            engine.evaluate(&payload)
        }
    };

    let json = if compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", json);

    tracing::info!(
        "{}: health {} ({}), technical {:?}",
        report.symbol,
        report.fundamental.scorecard.composite_score,
        report.fundamental.scorecard.rating.label(),
        report.technical.sentiment.overall
    );
    Ok(())
}
