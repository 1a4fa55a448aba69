//! Blog domain: filter state, post loading, debounced search
//!
//! Everything here talks to the content API through the [`ContentApi`]
//! seam so page handlers and tests can supply their own accessor.

mod categories;
mod debounce;
mod feed;
mod filter;

pub use categories::load_categories;
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use feed::{load_page, load_post_by_handle, page_query, Feed, FeedSnapshot, PostPage};
pub use filter::FilterState;

use std::future::Future;

use crate::cms::{CmsClient, CmsError, CollectionPage, Query};
use crate::content::{BlogPost, Category};

/// Posts collection name on the content API
const POSTS_COLLECTION: &str = "blog-posts";
/// Categories collection name on the content API
const CATEGORIES_COLLECTION: &str = "categories";

/// Accessor over the remote collections the blog consumes
pub trait ContentApi {
    fn find_posts(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<CollectionPage<BlogPost>, CmsError>> + Send;

    fn find_categories(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<CollectionPage<Category>, CmsError>> + Send;
}

impl ContentApi for CmsClient {
    fn find_posts(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<CollectionPage<BlogPost>, CmsError>> + Send {
        self.find(POSTS_COLLECTION, query)
    }

    fn find_categories(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<CollectionPage<Category>, CmsError>> + Send {
        self.find(CATEGORIES_COLLECTION, query)
    }
}
