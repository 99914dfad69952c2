//! Lazy iteration over paginated ID listings.
//!
//! Follower, group member and room member IDs are returned in pages linked
//! by a `next` continuation token. [`IdScanner`] walks those pages on
//! demand and yields one ID at a time:
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//!
//! let mut ids = client.get_follower_ids(None).limit(1000).scan();
//! while let Some(id) = ids.try_next().await? {
//!     println!("{}", id);
//! }
//! ```

use crate::client::{Base, Client};
use crate::models::{MemberIdsResponse, UserIdsResponse};
use crate::Result;
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use reqwest::Method;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::debug;

/// Page size used when a limit of 0 is requested.
pub const DEFAULT_FOLLOWER_LIMIT: u16 = 300;

/// Largest page size the follower endpoint accepts.
pub const MAX_FOLLOWER_LIMIT: u16 = 1000;

/// Clamp a requested follower page size.
pub(crate) fn clamp_follower_limit(limit: u16) -> u16 {
    match limit {
        0 => DEFAULT_FOLLOWER_LIMIT,
        n if n > MAX_FOLLOWER_LIMIT => MAX_FOLLOWER_LIMIT,
        n => n,
    }
}

/// An ID listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IdSource {
    Followers { limit: Option<u16> },
    GroupMembers { group_id: String },
    RoomMembers { room_id: String },
}

/// One page of IDs plus the continuation token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct IdPage {
    pub ids: Vec<String>,
    pub next: Option<String>,
}

impl From<UserIdsResponse> for IdPage {
    fn from(r: UserIdsResponse) -> Self {
        Self {
            ids: r.user_ids,
            next: r.next,
        }
    }
}

impl From<MemberIdsResponse> for IdPage {
    fn from(r: MemberIdsResponse) -> Self {
        Self {
            ids: r.member_ids,
            next: r.next,
        }
    }
}

impl Client {
    pub(crate) async fn fetch_id_page(&self, source: &IdSource, start: Option<&str>) -> Result<IdPage> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(start) = start.filter(|s| !s.is_empty()) {
            query.push(("start", start.to_string()));
        }

        match source {
            IdSource::Followers { limit } => {
                if let Some(limit) = limit {
                    query.push(("limit", limit.to_string()));
                }
                let request = self
                    .request(Method::GET, Base::Api, "/v2/bot/followers/ids")
                    .query(&query);
                Ok(self.call::<UserIdsResponse>(request).await?.into())
            }
            IdSource::GroupMembers { group_id } => {
                let path = format!(
                    "/v2/bot/group/{}/members/ids",
                    crate::client::segment(group_id)
                );
                let request = self.request(Method::GET, Base::Api, &path).query(&query);
                Ok(self.call::<MemberIdsResponse>(request).await?.into())
            }
            IdSource::RoomMembers { room_id } => {
                let path = format!(
                    "/v2/bot/room/{}/members/ids",
                    crate::client::segment(room_id)
                );
                let request = self.request(Method::GET, Base::Api, &path).query(&query);
                Ok(self.call::<MemberIdsResponse>(request).await?.into())
            }
        }
    }
}

enum Cursor {
    First(Option<String>),
    Next(String),
    Done,
}

type PageIds = stream::Iter<std::vec::IntoIter<Result<String>>>;

async fn next_page(client: Client, source: IdSource, cursor: Cursor) -> Result<Option<(PageIds, Cursor)>> {
    let token = match cursor {
        Cursor::Done => return Ok(None),
        Cursor::First(token) => token,
        Cursor::Next(token) => Some(token),
    };

    let page = client.fetch_id_page(&source, token.as_deref()).await?;
    debug!(
        "Fetched {} IDs (more: {})",
        page.ids.len(),
        page.next.as_deref().map_or(false, |n| !n.is_empty())
    );

    let cursor = match page.next {
        Some(next) if !next.is_empty() => Cursor::Next(next),
        _ => Cursor::Done,
    };
    let ids: Vec<Result<String>> = page.ids.into_iter().map(Ok).collect();
    Ok(Some((stream::iter(ids), cursor)))
}

/// Stream of IDs across all pages of a listing.
///
/// A page is requested only once the IDs of the previous page have been
/// consumed. The first error is yielded and ends the stream. Dropping the
/// scanner cancels any request in flight.
pub struct IdScanner {
    inner: BoxStream<'static, Result<String>>,
}

impl IdScanner {
    pub(crate) fn new(client: Client, source: IdSource, start: Option<String>) -> Self {
        let pages = stream::try_unfold(Cursor::First(start), move |cursor| {
            next_page(client.clone(), source.clone(), cursor)
        });

        Self {
            inner: pages.try_flatten().boxed(),
        }
    }

    /// Drain the scanner into a vector, stopping at the first error.
    pub async fn collect_ids(self) -> Result<Vec<String>> {
        self.try_collect().await
    }
}

impl Stream for IdScanner {
    type Item = Result<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl std::fmt::Debug for IdScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdScanner").finish_non_exhaustive()
    }
}
