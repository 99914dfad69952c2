//! linebot command-line interface.

pub mod commands;
pub mod render;

use clap::{Parser, Subcommand, ValueEnum};
use linebot_core::config::{LogFormat, LogLevel};
use std::path::PathBuf;

/// linebot - LINE Messaging API client
#[derive(Parser)]
#[command(name = "linebot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "LINEBOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage rich menus
    Richmenu(commands::richmenu::RichMenuArgs),

    /// Statistics from the insight API
    Insight(commands::insight::InsightArgs),

    /// Number of messages sent through a send endpoint
    Delivery(commands::insight::DeliveryArgs),

    /// Issue, revoke and verify channel access tokens
    Token(commands::token::TokenArgs),

    /// Show a user's profile
    Profile {
        /// User ID
        user_id: String,
    },

    /// List follower IDs
    Followers(commands::profile::FollowersArgs),

    /// Push a text message
    Push {
        /// User, group or room ID
        to: String,

        /// Message text
        text: String,
    },

    /// Broadcast a text message to every friend
    Broadcast {
        /// Message text
        text: String,
    },

    /// Run an echo bot on the webhook server
    Serve(commands::serve::ServeArgs),

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// `EnvFilter` directive for the crates of this workspace.
///
/// `-v` raises the level to debug and `-vv` to trace; otherwise the
/// configured level applies. Dependencies stay at warn.
pub fn log_directive(verbose: u8, configured: LogLevel) -> String {
    let level = match verbose {
        0 => configured.as_directive(),
        1 => "debug",
        _ => "trace",
    };
    format!(
        "warn,linebot_cli={level},linebot_core={level},linebot_messaging={level},linebot_webhook={level},tower_http={level}",
        level = level
    )
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Richmenu(args) => commands::richmenu::run(args, config_path).await,
        Commands::Insight(args) => commands::insight::run(args, config_path).await,
        Commands::Delivery(args) => commands::insight::run_delivery(args, config_path).await,
        Commands::Token(args) => commands::token::run(args, config_path).await,
        Commands::Profile { user_id } => commands::profile::profile(&user_id, config_path).await,
        Commands::Followers(args) => commands::profile::followers(args, config_path).await,
        Commands::Push { to, text } => commands::message::push(&to, &text, config_path).await,
        Commands::Broadcast { text } => commands::message::broadcast(&text, config_path).await,
        Commands::Serve(args) => commands::serve::run(args, config_path).await,
        Commands::Config(args) => commands::config::run(args, config_path).await,
        Commands::Version => {
            println!("linebot {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
