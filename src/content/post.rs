//! Post and Category documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::block::{Block, Media};
use super::summary::summarize;

/// A blog post as returned by the content API
///
/// `content` is only present when the query asks for it; list queries
/// leave it empty. A missing `published_at` means the post is not yet
/// published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BlogPost {
    /// Numeric row id
    pub id: u64,

    /// Opaque document identifier
    #[serde(rename = "documentId")]
    pub document_id: String,

    /// Human-readable, URL-safe identifier
    pub handle: String,

    /// Post title
    pub title: String,

    /// Optional subtitle
    pub subtitle: Option<String>,

    /// Rich-text body
    pub content: Vec<Block>,

    /// Wide featured image for cards and post headers
    #[serde(rename = "featuredImage_landscape")]
    pub featured_image_landscape: Option<Media>,

    /// Tall featured image variant
    #[serde(rename = "featuredImage_portrait")]
    pub featured_image_portrait: Option<Media>,

    /// Associated categories
    pub categories: Vec<Category>,

    /// Publication date; absent for unpublished drafts
    #[serde(rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,

    /// Creation date
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update date
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    /// Whether the post has been published
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    /// Plain-text preview of the body for cards and lists
    pub fn summary(&self, max_units: usize, unit_width: usize) -> Option<String> {
        summarize(&self.content, max_units, unit_width)
    }
}

/// A post category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Category {
    pub id: u64,
    #[serde(rename = "documentId")]
    pub document_id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_list_item_shape() {
        // List queries return posts without content or relations
        let json = r#"{
            "id": 7,
            "documentId": "abc123",
            "handle": "hello-world",
            "title": "Hello, World",
            "subtitle": "An introduction",
            "publishedAt": "2024-03-01T09:00:00.000Z",
            "updatedAt": "2024-03-02T10:00:00.000Z"
        }"#;
        let post: BlogPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.handle, "hello-world");
        assert!(post.is_published());
        assert!(post.content.is_empty());
        assert!(post.categories.is_empty());
    }

    #[test]
    fn test_unpublished_post() {
        let json = r#"{"id": 1, "documentId": "d", "handle": "draft", "title": "Draft"}"#;
        let post: BlogPost = serde_json::from_str(json).unwrap();
        assert!(!post.is_published());
    }

    #[test]
    fn test_deserialize_populated_post() {
        let json = r#"{
            "id": 7,
            "documentId": "abc123",
            "handle": "hello-world",
            "title": "Hello, World",
            "content": [
                {"type": "paragraph", "children": [{"type": "text", "text": "Welcome."}]}
            ],
            "featuredImage_landscape": {"url": "/uploads/wide.jpg", "name": "wide.jpg"},
            "categories": [{"id": 1, "documentId": "c1", "name": "Engineering"}]
        }"#;
        let post: BlogPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.content.len(), 1);
        assert_eq!(post.categories[0].name, "Engineering");
        assert_eq!(
            post.featured_image_landscape.as_ref().unwrap().url,
            "/uploads/wide.jpg"
        );
        assert_eq!(post.summary(3, 64), Some("Welcome.".to_string()));
    }
}
