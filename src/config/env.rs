//! Environment-supplied settings
//!
//! Endpoints and credentials are read from the environment rather than
//! the site config file. Each value is required only by the features
//! that use it: a missing CMS URL stops the server and the sitemap
//! command, a missing contact endpoint only disables the contact form.

use anyhow::{bail, Result};

/// CMS API base URL
pub const CMS_URL_VAR: &str = "FOLIO_CMS_URL";
/// CMS API bearer credential
pub const CMS_TOKEN_VAR: &str = "FOLIO_CMS_TOKEN";
/// Public base URL of the rendered site
pub const BASE_URL_VAR: &str = "FOLIO_BASE_URL";
/// Third-party endpoint receiving contact form submissions
pub const CONTACT_ENDPOINT_VAR: &str = "FOLIO_CONTACT_ENDPOINT";

/// Environment values recognized by folio-rs
#[derive(Debug, Clone, Default)]
pub struct Env {
    pub cms_url: Option<String>,
    pub cms_token: Option<String>,
    pub base_url: Option<String>,
    pub contact_endpoint: Option<String>,
}

impl Env {
    /// Read all recognized variables from the process environment
    pub fn from_env() -> Self {
        Self {
            cms_url: read_var(CMS_URL_VAR),
            cms_token: read_var(CMS_TOKEN_VAR),
            base_url: read_var(BASE_URL_VAR),
            contact_endpoint: read_var(CONTACT_ENDPOINT_VAR),
        }
    }

    /// CMS base URL, required by every feature that talks to the CMS
    pub fn require_cms_url(&self) -> Result<&str> {
        match self.cms_url.as_deref() {
            Some(url) => Ok(url),
            None => bail!("missing required environment variable {}", CMS_URL_VAR),
        }
    }

    /// CMS bearer credential
    pub fn require_cms_token(&self) -> Result<&str> {
        match self.cms_token.as_deref() {
            Some(token) => Ok(token),
            None => bail!("missing required environment variable {}", CMS_TOKEN_VAR),
        }
    }

    /// Public site base URL, required by the sitemap generator
    pub fn require_base_url(&self) -> Result<&str> {
        match self.base_url.as_deref() {
            Some(url) => Ok(url),
            None => bail!("missing required environment variable {}", BASE_URL_VAR),
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_present() {
        let env = Env {
            cms_url: Some("https://cms.example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(env.require_cms_url().unwrap(), "https://cms.example.com");
    }

    #[test]
    fn test_require_missing_names_the_variable() {
        let env = Env::default();
        let err = env.require_cms_token().unwrap_err();
        assert!(err.to_string().contains(CMS_TOKEN_VAR));
    }

    #[test]
    fn test_missing_contact_endpoint_is_not_an_error() {
        let env = Env::default();
        assert!(env.contact_endpoint.is_none());
    }
}
