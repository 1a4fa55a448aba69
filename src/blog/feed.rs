//! Loading pages of blog posts
//!
//! [`load_page`] performs one fetch cycle: the filtered page itself
//! plus, when a filter is active, a minimal second request for the
//! unfiltered total ("N of M posts"). [`Feed`] wraps that cycle in an
//! owned state slice for interactive consumers, tagging every cycle
//! with a sequence number so a stale completion can never overwrite a
//! newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tracing::warn;

use crate::cms::{CmsError, Query};
use crate::content::BlogPost;

use super::filter::FilterState;
use super::ContentApi;

/// One loaded page of posts with its counts
#[derive(Debug, Clone, Default)]
pub struct PostPage {
    pub posts: Vec<BlogPost>,
    /// The page that was requested, 1-based
    pub page: usize,
    /// Matching posts across all pages (filtered)
    pub total: usize,
    /// `ceil(total / page_size)`
    pub total_pages: usize,
    /// Posts ignoring the filter; equals `total` when no filter is active
    pub overall_total: usize,
}

/// The collection query for one listing page
pub fn page_query(state: &FilterState, page_size: usize) -> Query {
    Query::new()
        .populate("featuredImage_landscape")
        .populate("featuredImage_portrait")
        .populate_fields("categories", &["name"])
        .filter(state.expression())
        .sort("publishedAt:desc")
        .paginate(state.page(), page_size)
}

/// Run one fetch cycle for the given filter state
pub async fn load_page<A: ContentApi>(
    api: &A,
    state: &FilterState,
    page_size: usize,
) -> Result<PostPage, CmsError> {
    let query = page_query(state, page_size);
    let page = api.find_posts(&query).await?;
    let total = page.total();

    // A second, minimal request for the unfiltered total; skipped when
    // the filter is inactive since the counts coincide.
    let overall_total = if query.has_filter() {
        api.find_posts(&Query::new().paginate(1, 1)).await?.total()
    } else {
        total
    };

    Ok(PostPage {
        posts: page.data,
        page: state.page(),
        total,
        total_pages: total.div_ceil(page_size.max(1)),
        overall_total,
    })
}

/// Fetch a single post by its handle, relations populated
///
/// `Ok(None)` means no such post exists — a different situation from a
/// failed fetch, and callers surface it differently.
pub async fn load_post_by_handle<A: ContentApi>(
    api: &A,
    handle: &str,
) -> Result<Option<BlogPost>, CmsError> {
    let query = Query::new()
        .populate("featuredImage_landscape")
        .populate("featuredImage_portrait")
        .populate_fields("categories", &["name"])
        .filter(crate::cms::Filter::eq(&["handle"], handle))
        .paginate(1, 1);

    let mut page = api.find_posts(&query).await?;
    if page.data.is_empty() {
        Ok(None)
    } else {
        Ok(Some(page.data.remove(0)))
    }
}

/// Snapshot of a [`Feed`]'s state
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub posts: Vec<BlogPost>,
    pub loading: bool,
    pub error: Option<String>,
    pub total: usize,
    pub total_pages: usize,
    pub overall_total: usize,
}

/// A self-contained post list state: posts, loading flag, error, counts
///
/// Every [`Feed::refresh`] starts exactly one fetch cycle carrying a
/// monotonically increasing sequence number. A completion only applies
/// while its number is still the newest, so rapid re-triggering cannot
/// leave an older response on screen. A failed cycle clears the list,
/// zeroes the counts and records the error; there is no automatic
/// retry.
pub struct Feed<A> {
    api: A,
    page_size: usize,
    latest: Arc<AtomicU64>,
    state: Arc<Mutex<FeedSnapshot>>,
}

impl<A: ContentApi + Clone + Send + Sync + 'static> Feed<A> {
    pub fn new(api: A, page_size: usize) -> Self {
        Self {
            api,
            page_size,
            latest: Arc::new(AtomicU64::new(0)),
            state: Arc::new(Mutex::new(FeedSnapshot {
                loading: true,
                ..Default::default()
            })),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> FeedSnapshot {
        lock(&self.state).clone()
    }

    /// Start a fetch cycle for the given filter state
    ///
    /// Returns the task handle; dropping it does not cancel the fetch,
    /// but a newer `refresh` supersedes it.
    pub fn refresh(&self, state: &FilterState) -> JoinHandle<()> {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut snapshot = lock(&self.state);
            snapshot.loading = true;
            snapshot.error = None;
        }

        let api = self.api.clone();
        let filter = state.clone();
        let latest = Arc::clone(&self.latest);
        let shared = Arc::clone(&self.state);
        let page_size = self.page_size;

        tokio::spawn(async move {
            let result = load_page(&api, &filter, page_size).await;

            let mut snapshot = lock(&shared);
            if latest.load(Ordering::SeqCst) != seq {
                // A newer cycle owns the state now.
                return;
            }

            match result {
                Ok(page) => {
                    *snapshot = FeedSnapshot {
                        posts: page.posts,
                        loading: false,
                        error: None,
                        total: page.total,
                        total_pages: page.total_pages,
                        overall_total: page.overall_total,
                    };
                }
                Err(e) => {
                    warn!("post fetch failed: {}", e);
                    *snapshot = FeedSnapshot {
                        posts: Vec::new(),
                        loading: false,
                        error: Some(e.to_string()),
                        total: 0,
                        total_pages: 0,
                        overall_total: 0,
                    };
                }
            }
        })
    }
}

fn lock(state: &Arc<Mutex<FeedSnapshot>>) -> MutexGuard<'_, FeedSnapshot> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
