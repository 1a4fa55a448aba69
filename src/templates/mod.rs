//! Page templates using the Tera template engine
//!
//! All templates are embedded directly in the binary. Context structs
//! carry preformatted strings where possible; the `short_month_year`
//! filter handles the compact date labels used on cards and post
//! headers.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::{full_date, short_month_year, truncate};

/// Template renderer with the embedded folio theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // The renderer already escapes rich-text content; templates
        // receive finished HTML fragments.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("folio/layout.html")),
            ("home.html", include_str!("folio/home.html")),
            ("blog.html", include_str!("folio/blog.html")),
            ("post.html", include_str!("folio/post.html")),
            ("contact.html", include_str!("folio/contact.html")),
            ("not_found.html", include_str!("folio/not_found.html")),
            ("error.html", include_str!("folio/error.html")),
            // Partials
            (
                "partials/post_card.html",
                include_str!("folio/partials/post_card.html"),
            ),
            (
                "partials/filters.html",
                include_str!("folio/partials/filters.html"),
            ),
            (
                "partials/pager.html",
                include_str!("folio/partials/pager.html"),
            ),
        ])?;

        tera.register_filter("short_month_year", short_month_year_filter);
        tera.register_filter("full_date", full_date_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: compact month/year label from an RFC 3339 date string
fn short_month_year_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("short_month_year", "value", String, value);
    match s.parse::<chrono::DateTime<chrono::Utc>>() {
        Ok(date) => Ok(tera::Value::String(short_month_year(&date))),
        Err(_) => Ok(tera::Value::String(s)),
    }
}

/// Tera filter: spelled-out date from an RFC 3339 date string
fn full_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("full_date", "value", String, value);
    match s.parse::<chrono::DateTime<chrono::Utc>>() {
        Ok(date) => Ok(tera::Value::String(full_date(&date))),
        Err(_) => Ok(tera::Value::String(s)),
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    Ok(tera::Value::String(truncate(&s, length, None)))
}

/// Data structures for template context

/// Site-wide context available to every page
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub tagline: String,
    pub language: String,
    pub about: String,
    pub available: bool,
    pub availability_note: String,
    pub social_links: Vec<SocialLinkData>,
    pub contact_email: String,
    pub contact_enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialLinkData {
    pub label: String,
    pub url: String,
}

/// A post rendered as a listing card
#[derive(Debug, Clone, Serialize)]
pub struct PostCardData {
    pub handle: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub published_at: Option<String>,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub image_alt: String,
    pub categories: Vec<String>,
}

/// A fully rendered post page
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub handle: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
    pub content_html: String,
    pub image_url: Option<String>,
    pub image_alt: String,
    pub categories: Vec<String>,
}

/// Pagination controls for the listing
#[derive(Debug, Clone, Serialize)]
pub struct PaginationData {
    pub current: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_link: String,
    pub next_link: String,
}

/// Filter sidebar state
#[derive(Debug, Clone, Serialize)]
pub struct FilterData {
    pub categories: Vec<FilterCategoryData>,
    pub years: Vec<FilterYearData>,
    pub search: String,
    pub has_active_filters: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterCategoryData {
    pub document_id: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterYearData {
    pub year: i32,
    pub selected: bool,
}

/// Contact form values and field-level errors
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactFormData {
    pub values: HashMap<String, String>,
    pub errors: HashMap<String, String>,
    pub submitted: bool,
    pub submit_error: Option<String>,
}
