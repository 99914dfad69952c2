//! linebot CLI entry point.

use clap::Parser;
use linebot_cli::{log_directive, run, Cli};
use linebot_core::config::{Config, LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The config file may be missing or broken here; commands report that.
    let logging = Config::load_from(cli.config.as_deref())
        .map(|c| c.logging)
        .unwrap_or_else(|_| LoggingConfig::default());
    let format = cli.log_format.map(LogFormat::from).unwrap_or(logging.format);

    let filter = EnvFilter::try_from_env("LINEBOT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(log_directive(cli.verbose, logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    run(cli).await
}
