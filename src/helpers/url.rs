//! URL helper functions

use anyhow::{Context, Result};
use url::Url;

/// Join a path onto a base URL
///
/// # Examples
/// ```ignore
/// absolute_url("https://example.com", "blog/hello") // -> "https://example.com/blog/hello"
/// ```
pub fn absolute_url(base: &str, path: &str) -> Result<String> {
    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };
    let base = Url::parse(&base).with_context(|| format!("invalid base URL: {}", base))?;
    let joined = base
        .join(path.trim_start_matches('/'))
        .with_context(|| format!("cannot join {} onto {}", path, base))?;
    Ok(joined.to_string())
}

/// Resolve a media path returned by the CMS into a fetchable URL
///
/// Absolute URLs pass through untouched; relative paths are joined onto
/// the CMS base URL.
///
/// # Examples
/// ```ignore
/// resolve_media_url("https://cms.example.com", "/uploads/photo.jpg")
/// // -> "https://cms.example.com/uploads/photo.jpg"
/// ```
pub fn resolve_media_url(cms_base: &str, path: &str) -> String {
    if path.contains("://") {
        return path.to_string();
    }

    let base = cms_base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://example.com", "blog/hello").unwrap(),
            "https://example.com/blog/hello"
        );
        assert_eq!(
            absolute_url("https://example.com/", "/blog").unwrap(),
            "https://example.com/blog"
        );
        assert_eq!(
            absolute_url("https://example.com", "").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_absolute_url_rejects_garbage_base() {
        assert!(absolute_url("not a url", "blog").is_err());
    }

    #[test]
    fn test_resolve_media_url() {
        assert_eq!(
            resolve_media_url("https://cms.example.com/", "/uploads/a.jpg"),
            "https://cms.example.com/uploads/a.jpg"
        );
        assert_eq!(
            resolve_media_url("https://cms.example.com", "uploads/a.jpg"),
            "https://cms.example.com/uploads/a.jpg"
        );
    }

    #[test]
    fn test_resolve_media_url_passes_through_absolute() {
        assert_eq!(
            resolve_media_url("https://cms.example.com", "https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }
}
