//! Insight and delivery statistics commands.

use super::client;
use crate::render::print_json;
use clap::{Args, Subcommand, ValueEnum};
use linebot_messaging::api::MessageKind;
use std::path::Path;

/// Insight command arguments.
#[derive(Args)]
pub struct InsightArgs {
    #[command(subcommand)]
    pub command: InsightCommand,
}

#[derive(Subcommand)]
pub enum InsightCommand {
    /// Messages delivered on a day
    Delivery {
        /// Day in yyyyMMdd (UTC+9)
        #[arg(long)]
        date: String,
    },

    /// Followers on a day
    Followers {
        /// Day in yyyyMMdd (UTC+9)
        #[arg(long)]
        date: String,
    },

    /// Demographics of friends
    Demographics,
}

/// Delivery command arguments.
#[derive(Args)]
pub struct DeliveryArgs {
    /// Send endpoint
    #[arg(long = "type", value_enum)]
    pub kind: DeliveryType,

    /// Day in yyyyMMdd (UTC+9)
    #[arg(long)]
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeliveryType {
    Reply,
    Push,
    Multicast,
    Broadcast,
}

impl From<DeliveryType> for MessageKind {
    fn from(kind: DeliveryType) -> Self {
        match kind {
            DeliveryType::Reply => MessageKind::Reply,
            DeliveryType::Push => MessageKind::Push,
            DeliveryType::Multicast => MessageKind::Multicast,
            DeliveryType::Broadcast => MessageKind::Broadcast,
        }
    }
}

/// Run the insight command.
pub async fn run(args: InsightArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let client = client(config)?;
    match args.command {
        InsightCommand::Delivery { date } => {
            print_json(&client.get_number_messages_delivery(&date).await?)
        }
        InsightCommand::Followers { date } => print_json(&client.get_number_followers(&date).await?),
        InsightCommand::Demographics => print_json(&client.get_friend_demographics().await?),
    }
}

/// Run the delivery command.
pub async fn run_delivery(args: DeliveryArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let client = client(config)?;
    let count = client.get_number_messages(args.kind.into(), &args.date).await?;
    print_json(&count)
}
