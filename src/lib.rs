//! folio-rs: a server-rendered portfolio and blog front-end
//!
//! This crate renders a personal site — marketing sections plus a blog
//! with filtering, search and pagination — from content held in a
//! headless CMS, and ships a sitemap generator for build pipelines.

pub mod blog;
pub mod cms;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod sitemap;
pub mod templates;

use anyhow::Result;
use std::path::Path;

use crate::blog::ContentApi;

/// Site config file name, resolved against the base directory
const CONFIG_FILE: &str = "folio.yml";

/// The main folio application handle
///
/// Owns the site configuration and environment values; subsystems
/// receive what they need explicitly rather than reading globals.
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Environment-supplied endpoints and credentials
    pub env: config::Env,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self {
            config,
            env: config::Env::from_env(),
        })
    }

    /// Build a content API client from the environment
    pub fn cms_client(&self) -> Result<cms::CmsClient> {
        let url = self.env.require_cms_url()?;
        let token = self.env.require_cms_token()?;
        Ok(cms::CmsClient::new(url, token)?)
    }

    /// Verify the environment and content API reachability
    pub async fn check(&self) -> Result<()> {
        let client = self.cms_client()?;
        let page = client.find_posts(&cms::Query::new().paginate(1, 1)).await?;
        println!("Content API reachable; {} published posts.", page.total());

        if self.env.contact_endpoint.is_none() {
            println!(
                "Note: {} is unset, the contact form will be disabled.",
                config::CONTACT_ENDPOINT_VAR
            );
        }
        if self.env.base_url.is_none() {
            println!(
                "Note: {} is unset, the sitemap command will fail.",
                config::BASE_URL_VAR
            );
        }

        Ok(())
    }
}
