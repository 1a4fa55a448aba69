//! Rich-text content blocks
//!
//! The CMS stores post bodies as a tree of typed blocks with inline
//! formatting runs. The variants here mirror that wire format; anything
//! the CMS adds later lands in the explicit `Unknown` arms and is
//! silently skipped by the renderer rather than failing deserialization.

use serde::{Deserialize, Serialize};

/// One structural unit of a rich-text document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph {
        #[serde(default)]
        children: Vec<Inline>,
    },
    Heading {
        level: u8,
        #[serde(default)]
        children: Vec<Inline>,
    },
    List {
        #[serde(default)]
        format: ListFormat,
        #[serde(default)]
        children: Vec<ListItem>,
    },
    Quote {
        #[serde(default)]
        children: Vec<Inline>,
    },
    Code {
        #[serde(default)]
        language: Option<String>,
        #[serde(default)]
        children: Vec<TextNode>,
    },
    Image {
        #[serde(default)]
        image: Option<Media>,
    },
    /// Block types this front-end does not know about
    #[serde(other)]
    Unknown,
}

/// List numbering style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    Ordered,
    #[default]
    Unordered,
}

/// A single list entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub children: Vec<Inline>,
}

/// A formatted text run or link within a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Inline {
    Text(TextNode),
    /// Links carry plain text children only; they never nest further links
    Link {
        url: String,
        #[serde(default)]
        children: Vec<TextNode>,
    },
    #[serde(other)]
    Unknown,
}

impl Inline {
    /// Raw text of this node, formatting ignored
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text(node) => node.text.clone(),
            Inline::Link { children, .. } => text_of(children),
            Inline::Unknown => String::new(),
        }
    }
}

/// A run of text with optional formatting flags
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextNode {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub code: bool,
}

impl TextNode {
    /// A plain run with no formatting
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// An uploaded media item referenced by an image block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    pub url: String,
    pub name: String,
    #[serde(rename = "alternativeText")]
    pub alternative_text: Option<String>,
    pub caption: Option<String>,
}

impl Media {
    /// Alt text for rendering, falling back to the upload name
    pub fn alt(&self) -> &str {
        self.alternative_text.as_deref().unwrap_or(&self.name)
    }
}

/// Concatenated raw text of an inline sequence, formatting ignored
pub fn inline_text(children: &[Inline]) -> String {
    children.iter().map(Inline::plain_text).collect()
}

/// Concatenated raw text of plain text runs
pub fn text_of(children: &[TextNode]) -> String {
    children.iter().map(|c| c.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_paragraph_with_formatting() {
        let json = r#"{
            "type": "paragraph",
            "children": [
                {"type": "text", "text": "plain "},
                {"type": "text", "text": "bold", "bold": true},
                {"type": "link", "url": "https://example.com",
                 "children": [{"type": "text", "text": "a link", "italic": true}]}
            ]
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();
        let Block::Paragraph { children } = block else {
            panic!("expected paragraph");
        };
        assert_eq!(children.len(), 3);
        assert_eq!(inline_text(&children), "plain bolda link");
    }

    #[test]
    fn test_deserialize_list_formats() {
        let json = r#"{
            "type": "list",
            "format": "ordered",
            "children": [
                {"type": "list-item", "children": [{"type": "text", "text": "one"}]}
            ]
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();
        let Block::List { format, children } = block else {
            panic!("expected list");
        };
        assert_eq!(format, ListFormat::Ordered);
        assert_eq!(inline_text(&children[0].children), "one");
    }

    #[test]
    fn test_unknown_block_type_does_not_fail() {
        let json = r#"{"type": "embed", "url": "https://example.com"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block, Block::Unknown);
    }

    #[test]
    fn test_unknown_inline_type_does_not_fail() {
        let json = r#"{"type": "mention", "user": "someone"}"#;
        let inline: Inline = serde_json::from_str(json).unwrap();
        assert_eq!(inline, Inline::Unknown);
        assert_eq!(inline.plain_text(), "");
    }

    #[test]
    fn test_image_without_media() {
        let json = r#"{"type": "image"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block, Block::Image { image: None });
    }

    #[test]
    fn test_media_alt_falls_back_to_name() {
        let media = Media {
            url: "/uploads/a.jpg".to_string(),
            name: "a.jpg".to_string(),
            ..Default::default()
        };
        assert_eq!(media.alt(), "a.jpg");

        let with_alt = Media {
            alternative_text: Some("A photo".to_string()),
            ..media
        };
        assert_eq!(with_alt.alt(), "A photo");
    }
}
