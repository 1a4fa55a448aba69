//! Content API plumbing: client, query builder, filter expressions
//!
//! The API is a Strapi-style REST interface: collections under
//! `/api/{name}`, bracketed query parameters for filtering/population,
//! and a `data` + `meta.pagination` response envelope.

mod client;
mod filter;
mod query;
mod response;

pub use client::{CmsClient, CmsError};
pub use filter::Filter;
pub use query::Query;
pub use response::{CollectionPage, Meta, Pagination};
