//! Profile and follower commands.

use super::client;
use crate::render::print_json;
use clap::Args;
use futures::{StreamExt, TryStreamExt};
use std::path::Path;

/// Followers command arguments.
#[derive(Args)]
pub struct FollowersArgs {
    /// Stop after this many IDs
    #[arg(long)]
    pub limit: Option<usize>,

    /// IDs requested per page (1-1000)
    #[arg(long)]
    pub page_size: Option<u16>,

    /// Continuation token from an earlier listing
    #[arg(long)]
    pub start: Option<String>,
}

/// Show a user's profile.
pub async fn profile(user_id: &str, config: Option<&Path>) -> anyhow::Result<()> {
    let client = client(config)?;
    print_json(&client.get_profile(user_id).await?)
}

/// Print follower IDs, one per line, fetching pages only as needed.
pub async fn followers(args: FollowersArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let client = client(config)?;
    let mut call = client.get_follower_ids(args.start.as_deref());
    if let Some(size) = args.page_size {
        call = call.limit(size);
    }

    let mut ids = call.scan().take(args.limit.unwrap_or(usize::MAX));
    let mut count = 0usize;
    while let Some(id) = ids.try_next().await? {
        println!("{}", id);
        count += 1;
    }
    tracing::info!("Listed {} follower(s)", count);
    Ok(())
}
