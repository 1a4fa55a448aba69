//! Rendering content blocks to HTML
//!
//! Each block maps to one HTML unit; blocks the renderer cannot place
//! (unknown types, image blocks without media) map to none. Input order
//! is preserved.

use crate::helpers::{html_escape, resolve_media_url};

use super::block::{inline_text, text_of, Block, Inline, TextNode};

/// Renders block sequences to presentational HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    media_base: Option<String>,
}

impl HtmlRenderer {
    /// Renderer that leaves media URLs untouched
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that resolves relative media paths against the CMS base URL
    pub fn with_media_base(base: impl Into<String>) -> Self {
        Self {
            media_base: Some(base.into()),
        }
    }

    /// Render a block sequence, one HTML unit per rendered block
    pub fn render_blocks(&self, blocks: &[Block]) -> Vec<String> {
        blocks
            .iter()
            .filter_map(|block| self.render_block(block))
            .collect()
    }

    /// Render a block sequence into a single HTML fragment
    pub fn render(&self, blocks: &[Block]) -> String {
        self.render_blocks(blocks).join("\n")
    }

    fn render_block(&self, block: &Block) -> Option<String> {
        match block {
            Block::Paragraph { children } => {
                Some(format!("<p>{}</p>", render_inline_seq(children)))
            }
            Block::Heading { level, children } => {
                // Five size tiers; levels beyond 5 share the smallest.
                let tier = (*level).clamp(1, 5);
                Some(format!(
                    "<h{tier}>{}</h{tier}>",
                    render_inline_seq(children)
                ))
            }
            Block::List { children, .. } => {
                // Ordered lists currently render like unordered ones.
                let items: String = children
                    .iter()
                    .map(|item| format!("<li>{}</li>", render_inline_seq(&item.children)))
                    .collect();
                Some(format!("<ul>{}</ul>", items))
            }
            Block::Quote { children } => Some(format!(
                "<blockquote><p>{}</p></blockquote>",
                render_inline_seq(children)
            )),
            Block::Code { language, children } => {
                let text = html_escape(&text_of(children));
                let class = language
                    .as_deref()
                    .map(|lang| format!(" class=\"language-{}\"", html_escape(lang)))
                    .unwrap_or_default();
                Some(format!("<pre><code{}>{}</code></pre>", class, text))
            }
            Block::Image { image } => {
                let image = image.as_ref()?;
                let src = match &self.media_base {
                    Some(base) => resolve_media_url(base, &image.url),
                    None => image.url.clone(),
                };
                let mut html = format!(
                    r#"<figure><img src="{}" alt="{}">"#,
                    html_escape(&src),
                    html_escape(image.alt())
                );
                if let Some(caption) = &image.caption {
                    html.push_str(&format!(
                        "<figcaption>{}</figcaption>",
                        html_escape(caption)
                    ));
                }
                html.push_str("</figure>");
                Some(html)
            }
            Block::Unknown => None,
        }
    }
}

/// Render an inline sequence following the formatting rules
fn render_inline_seq(children: &[Inline]) -> String {
    children
        .iter()
        .filter_map(|child| match child {
            Inline::Text(node) => Some(render_text(node)),
            Inline::Link { url, children } => {
                // Link text is the children's raw text; their formatting
                // flags are not applied.
                Some(format!(
                    r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                    html_escape(url),
                    html_escape(&text_of(children))
                ))
            }
            Inline::Unknown => None,
        })
        .collect()
}

fn render_text(node: &TextNode) -> String {
    let text = html_escape(&node.text);

    // Inline code wins over every other flag.
    if node.code {
        return format!("<code>{}</code>", text);
    }

    let mut html = text;
    if node.underline {
        html = format!("<u>{}</u>", html);
    }
    if node.italic {
        html = format!("<em>{}</em>", html);
    }
    if node.bold {
        html = format!("<strong>{}</strong>", html);
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::block::{ListFormat, ListItem, Media};

    fn paragraph(text: &str) -> Block {
        Block::Paragraph {
            children: vec![Inline::Text(TextNode::plain(text))],
        }
    }

    #[test]
    fn test_order_preserved_and_unknown_skipped() {
        let blocks = vec![
            paragraph("first"),
            Block::Unknown,
            Block::Image { image: None },
            paragraph("second"),
        ];
        let units = HtmlRenderer::new().render_blocks(&blocks);
        assert_eq!(units, vec!["<p>first</p>", "<p>second</p>"]);
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert!(HtmlRenderer::new().render_blocks(&[]).is_empty());
    }

    #[test]
    fn test_link_ignores_child_formatting() {
        let blocks = vec![Block::Paragraph {
            children: vec![Inline::Link {
                url: "https://example.com".to_string(),
                children: vec![
                    TextNode {
                        text: "bold ".to_string(),
                        bold: true,
                        ..Default::default()
                    },
                    TextNode {
                        text: "plain".to_string(),
                        ..Default::default()
                    },
                ],
            }],
        }];
        let html = HtmlRenderer::new().render(&blocks);
        assert_eq!(
            html,
            r#"<p><a href="https://example.com" target="_blank" rel="noopener noreferrer">bold plain</a></p>"#
        );
    }

    #[test]
    fn test_code_flag_overrides_other_flags() {
        let html = render_text(&TextNode {
            text: "x".to_string(),
            bold: true,
            italic: true,
            code: true,
            ..Default::default()
        });
        assert_eq!(html, "<code>x</code>");
    }

    #[test]
    fn test_formatting_flags_combine() {
        let html = render_text(&TextNode {
            text: "x".to_string(),
            bold: true,
            italic: true,
            underline: true,
            ..Default::default()
        });
        assert_eq!(html, "<strong><em><u>x</u></em></strong>");
    }

    #[test]
    fn test_heading_tiers_collapse_above_five() {
        let renderer = HtmlRenderer::new();
        let render_level = |level: u8| {
            renderer.render(&[Block::Heading {
                level,
                children: vec![Inline::Text(TextNode::plain("t"))],
            }])
        };
        let tiers: Vec<String> = (1..=6).map(render_level).collect();
        assert_eq!(tiers[0], "<h1>t</h1>");
        assert_eq!(tiers[3], "<h4>t</h4>");
        // Levels 5 and 6 share the smallest tier
        assert_eq!(tiers[4], "<h5>t</h5>");
        assert_eq!(tiers[5], "<h5>t</h5>");
        let distinct: std::collections::HashSet<&String> = tiers.iter().collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn test_ordered_and_unordered_lists_render_identically() {
        let items = vec![ListItem {
            children: vec![Inline::Text(TextNode::plain("item"))],
        }];
        let renderer = HtmlRenderer::new();
        let ordered = renderer.render(&[Block::List {
            format: ListFormat::Ordered,
            children: items.clone(),
        }]);
        let unordered = renderer.render(&[Block::List {
            format: ListFormat::Unordered,
            children: items,
        }]);
        assert_eq!(ordered, "<ul><li>item</li></ul>");
        assert_eq!(ordered, unordered);
    }

    #[test]
    fn test_quote_renders_blockquote() {
        let html = HtmlRenderer::new().render(&[Block::Quote {
            children: vec![Inline::Text(TextNode::plain("wise words"))],
        }]);
        assert_eq!(html, "<blockquote><p>wise words</p></blockquote>");
    }

    #[test]
    fn test_code_block_concatenates_and_escapes() {
        let html = HtmlRenderer::new().render(&[Block::Code {
            language: Some("rust".to_string()),
            children: vec![
                TextNode {
                    text: "fn main() ".to_string(),
                    bold: true,
                    ..Default::default()
                },
                TextNode::plain("{ 1 < 2 }"),
            ],
        }]);
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">fn main() { 1 &lt; 2 }</code></pre>"
        );
    }

    #[test]
    fn test_image_with_caption_and_media_base() {
        let renderer = HtmlRenderer::with_media_base("https://cms.example.com");
        let html = renderer.render(&[Block::Image {
            image: Some(Media {
                url: "/uploads/a.jpg".to_string(),
                name: "a.jpg".to_string(),
                alternative_text: Some("A photo".to_string()),
                caption: Some("Taken in 2024".to_string()),
            }),
        }]);
        assert_eq!(
            html,
            r#"<figure><img src="https://cms.example.com/uploads/a.jpg" alt="A photo"><figcaption>Taken in 2024</figcaption></figure>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let html = HtmlRenderer::new().render(&[paragraph("<script>alert(1)</script>")]);
        assert_eq!(html, "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
    }

    #[test]
    fn test_inline_text_helper() {
        let children = vec![
            Inline::Text(TextNode::plain("a")),
            Inline::Link {
                url: "u".to_string(),
                children: vec![TextNode::plain("b")],
            },
        ];
        assert_eq!(inline_text(&children), "ab");
    }
}
