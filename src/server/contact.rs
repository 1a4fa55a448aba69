//! Contact form parsing and validation

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// A contact form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub website: String,
    pub message: String,
}

impl ContactForm {
    /// Validate field by field
    ///
    /// Returns a map of field name to message; an empty map means the
    /// form is acceptable. Invalid fields never clear the others.
    pub fn validate(&self) -> HashMap<String, String> {
        let mut errors = HashMap::new();

        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "Please enter your name".to_string());
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("email".to_string(), "Please enter your email".to_string());
        } else if !EMAIL_RE.is_match(email) {
            errors.insert(
                "email".to_string(),
                "That doesn't look like an email address".to_string(),
            );
        }

        let website = self.website.trim();
        if !website.is_empty() && !is_valid_website(website) {
            errors.insert(
                "website".to_string(),
                "That doesn't look like a website address".to_string(),
            );
        }

        if self.message.trim().is_empty() {
            errors.insert(
                "message".to_string(),
                "Tell me a little about your project".to_string(),
            );
        }

        errors
    }

    /// Current values keyed by field name, for re-rendering the form
    pub fn values(&self) -> HashMap<String, String> {
        HashMap::from([
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("company".to_string(), self.company.clone()),
            ("website".to_string(), self.website.clone()),
            ("message".to_string(), self.message.clone()),
        ])
    }
}

/// Accept URLs with or without an explicit scheme
fn is_valid_website(website: &str) -> bool {
    let candidate = if website.contains("://") {
        website.to_string()
    } else {
        format!("https://{}", website)
    };

    match Url::parse(&candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|h| h.contains('.'))
        }
        Err(_) => false,
    }
}
