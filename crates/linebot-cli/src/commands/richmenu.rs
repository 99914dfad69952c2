//! Rich menu commands.

use super::client;
use crate::render::{print_basic, print_json};
use anyhow::Context;
use clap::{Args, Subcommand};
use linebot_messaging::models::{RichMenu, RichMenuAlias};
use std::path::{Path, PathBuf};
use tracing::info;

/// Rich menu command arguments.
#[derive(Args)]
pub struct RichMenuArgs {
    #[command(subcommand)]
    pub command: RichMenuCommand,
}

#[derive(Subcommand)]
pub enum RichMenuCommand {
    /// List rich menus
    List,

    /// Show a rich menu
    Get {
        rich_menu_id: String,
    },

    /// Create a rich menu from a JSON file
    Create {
        /// Rich menu definition
        file: PathBuf,

        /// Only validate the definition
        #[arg(long)]
        validate_only: bool,
    },

    /// Delete a rich menu
    Delete {
        rich_menu_id: String,
    },

    /// Link a rich menu to a user
    Link {
        user_id: String,
        rich_menu_id: String,
    },

    /// Unlink the rich menu from a user
    Unlink {
        user_id: String,
    },

    /// Show, set or cancel the default rich menu
    Default {
        #[command(subcommand)]
        action: Option<DefaultCommand>,
    },

    /// Upload a JPEG or PNG image for a rich menu
    Upload {
        rich_menu_id: String,
        image: PathBuf,
    },

    /// Download the image of a rich menu
    Download {
        rich_menu_id: String,
        out: PathBuf,
    },

    /// Manage rich menu aliases
    Alias {
        #[command(subcommand)]
        command: AliasCommand,
    },
}

#[derive(Subcommand)]
pub enum DefaultCommand {
    /// Set the default rich menu
    Set { rich_menu_id: String },

    /// Show the default rich menu ID
    Get,

    /// Cancel the default rich menu
    Cancel,
}

#[derive(Subcommand)]
pub enum AliasCommand {
    Create {
        alias_id: String,
        rich_menu_id: String,
    },
    Update {
        alias_id: String,
        rich_menu_id: String,
    },
    Delete {
        alias_id: String,
    },
    Get {
        alias_id: String,
    },
    List,
}

/// Read a rich menu definition.
pub fn read_rich_menu(path: &Path) -> anyhow::Result<RichMenu> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid rich menu in {}", path.display()))
}

/// Run the richmenu command.
pub async fn run(args: RichMenuArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let client = client(config)?;

    match args.command {
        RichMenuCommand::List => print_json(&client.get_rich_menu_list().await?)?,

        RichMenuCommand::Get { rich_menu_id } => {
            print_json(&client.get_rich_menu(&rich_menu_id).await?)?
        }

        RichMenuCommand::Create { file, validate_only } => {
            let menu = read_rich_menu(&file)?;
            if validate_only {
                print_basic(&client.validate_rich_menu(&menu).await?)?;
            } else {
                let created = client.create_rich_menu(&menu).await?;
                info!("Created rich menu {}", created.rich_menu_id);
                print_json(&created)?;
            }
        }

        RichMenuCommand::Delete { rich_menu_id } => {
            print_basic(&client.delete_rich_menu(&rich_menu_id).await?)?
        }

        RichMenuCommand::Link { user_id, rich_menu_id } => {
            print_basic(&client.link_user_rich_menu(&user_id, &rich_menu_id).await?)?
        }

        RichMenuCommand::Unlink { user_id } => {
            print_basic(&client.unlink_user_rich_menu(&user_id).await?)?
        }

        RichMenuCommand::Default { action } => match action.unwrap_or(DefaultCommand::Get) {
            DefaultCommand::Set { rich_menu_id } => {
                print_basic(&client.set_default_rich_menu(&rich_menu_id).await?)?
            }
            DefaultCommand::Get => print_json(&client.get_default_rich_menu().await?)?,
            DefaultCommand::Cancel => print_basic(&client.cancel_default_rich_menu().await?)?,
        },

        RichMenuCommand::Upload { rich_menu_id, image } => {
            print_basic(&client.upload_rich_menu_image_file(&rich_menu_id, &image).await?)?
        }

        RichMenuCommand::Download { rich_menu_id, out } => {
            let content = client.download_rich_menu_image(&rich_menu_id).await?;
            tokio::fs::write(&out, &content.body)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!(
                "Saved {} bytes ({}) to {}",
                content.body.len(),
                content.content_type.as_deref().unwrap_or("unknown type"),
                out.display()
            );
        }

        RichMenuCommand::Alias { command } => match command {
            AliasCommand::Create { alias_id, rich_menu_id } => {
                let alias = RichMenuAlias {
                    rich_menu_alias_id: alias_id,
                    rich_menu_id,
                };
                print_basic(&client.create_rich_menu_alias(&alias).await?)?
            }
            AliasCommand::Update { alias_id, rich_menu_id } => {
                print_basic(&client.update_rich_menu_alias(&alias_id, &rich_menu_id).await?)?
            }
            AliasCommand::Delete { alias_id } => {
                print_basic(&client.delete_rich_menu_alias(&alias_id).await?)?
            }
            AliasCommand::Get { alias_id } => print_json(&client.get_rich_menu_alias(&alias_id).await?)?,
            AliasCommand::List => print_json(&client.get_rich_menu_alias_list().await?)?,
        },
    }

    Ok(())
}
