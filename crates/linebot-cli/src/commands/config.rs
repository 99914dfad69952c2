//! Configuration management commands.

use clap::Args;
use linebot_core::config::Config;
use linebot_core::paths;
use std::path::{Path, PathBuf};

/// Config command arguments.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand)]
pub enum ConfigCommand {
    /// Show configuration with credentials masked
    Show,

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration
    Validate,
}

fn config_path(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(paths::config_file()?),
    }
}

/// JSON view of the config with credentials masked.
pub fn masked_json(config: &Config) -> anyhow::Result<serde_json::Value> {
    let mut json = serde_json::to_value(config)?;
    json["channel"]["channel_secret"] = config.channel.channel_secret.masked().into();
    json["channel"]["channel_access_token"] = config.channel.channel_access_token.masked().into();
    Ok(json)
}

/// Run the config command.
pub async fn run(args: ConfigArgs, explicit: Option<&Path>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load_from(explicit)?;
            println!("{}", serde_json::to_string_pretty(&masked_json(&config)?)?);
        }

        ConfigCommand::Init { force } => {
            let path = config_path(explicit)?;

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {:?}. Use --force to overwrite.",
                    path
                );
            }

            if explicit.is_none() {
                paths::ensure_dirs()?;
            }

            // Credentials from the environment are written into the new file.
            let mut config = Config::default();
            config.apply_env();
            config.save(&path)?;

            println!("Created config file: {:?}", path);
            if config.channel.is_unset() {
                println!("  Tip: set channel.channel_secret and channel.channel_access_token in it.");
            }
        }

        ConfigCommand::Path => {
            println!("{}", config_path(explicit)?.display());
        }

        ConfigCommand::Validate => {
            let config = match explicit {
                Some(path) => Config::load(path),
                None => Config::load_default(),
            }
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

            match config.validate() {
                Ok(_) => println!("Configuration is valid"),
                Err(e) => anyhow::bail!("Configuration error: {}", e),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linebot_core::config::ConfigBuilder;

    #[test]
    fn test_masked_json_hides_credentials() {
        let config = ConfigBuilder::new()
            .credentials("0123456789abcdef", "access-token-value-1234")
            .build();
        let json = masked_json(&config).unwrap();

        assert_eq!(json["channel"]["channel_secret"], "************cdef");
        let token = json["channel"]["channel_access_token"].as_str().unwrap();
        assert!(token.ends_with("1234"));
        assert!(!token.contains("access"));
        assert_eq!(json["webhook"]["path"], "/callback");
    }

    #[tokio::test]
    async fn test_init_then_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linebot.json5");

        let init = ConfigArgs {
            command: ConfigCommand::Init { force: false },
        };
        run(init, Some(&path)).await.unwrap();
        assert!(path.exists());

        let again = ConfigArgs {
            command: ConfigCommand::Init { force: false },
        };
        let err = run(again, Some(&path)).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));

        let validate = ConfigArgs {
            command: ConfigCommand::Validate,
        };
        run(validate, Some(&path)).await.unwrap();
    }

    #[tokio::test]
    async fn test_validate_reports_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linebot.json5");
        std::fs::write(&path, r#"{ webhook: { path: "callback" } }"#).unwrap();

        let validate = ConfigArgs {
            command: ConfigCommand::Validate,
        };
        let err = run(validate, Some(&path)).await.unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }
}
