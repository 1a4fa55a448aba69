//! Site configuration (folio.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
///
/// Everything here is presentation: titles, copy for the home page
/// sections, paging and summary budgets. Endpoints and credentials live
/// in the environment (see [`crate::config::Env`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub tagline: String,
    pub language: String,

    // Home page sections
    pub about: String,
    #[serde(default)]
    pub availability: AvailabilityConfig,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    pub contact_email: String,

    // Blog listing
    pub posts_per_page: usize,
    /// First year offered in the year filter; the range runs to the
    /// current year.
    pub first_post_year: i32,

    // Post card summaries
    pub summary_max_units: usize,
    pub summary_unit_width: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "John Doe".to_string(),
            tagline: String::new(),
            language: "en".to_string(),

            about: String::new(),
            availability: AvailabilityConfig::default(),
            social_links: Vec::new(),
            contact_email: String::new(),

            posts_per_page: 6,
            first_post_year: 2020,

            summary_max_units: 3,
            summary_unit_width: 64,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Years offered by the blog year filter, newest first
    pub fn filter_years(&self, current_year: i32) -> Vec<i32> {
        let first = self.first_post_year.min(current_year);
        (first..=current_year).rev().collect()
    }
}

/// Freelance availability banner on the home page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    pub available: bool,
    pub note: String,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            available: false,
            note: String::new(),
        }
    }
}

/// A "find me" link (GitHub, LinkedIn, ...)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}
