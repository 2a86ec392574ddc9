use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openai_config::Args;

fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignored silently if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openai_config=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = args.client_config().context("Invalid configuration")?;

    tracing::info!(
        api_type = %config.api_type(),
        endpoint = %config.endpoint_url("/chat/completions"),
        proxied  = config.proxy_url().is_some(),
        "Resolved client configuration"
    );

    let summary = serde_json::to_string_pretty(&config.summary())
        .context("Failed to serialize configuration summary")?;
    println!("{summary}");

    Ok(())
}
