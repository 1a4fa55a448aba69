//! Helper functions shared by the renderer, templates, and sitemap
//!
//! These cover HTML/XML escaping, URL joining and media URL resolution,
//! and the date formats used across the site.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
