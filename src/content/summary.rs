//! Plain-text summaries for post cards
//!
//! A restricted walk over the block sequence: textual blocks contribute
//! one unit each (list items count individually), code and image blocks
//! are skipped without consuming budget, and the joined result is
//! truncated to `max_units * unit_width` characters.

use super::block::{inline_text, Block};

/// Extract a one-to-few-line preview from a block sequence
///
/// Returns `None` when the sequence contains no extractable text.
pub fn summarize(blocks: &[Block], max_units: usize, unit_width: usize) -> Option<String> {
    if max_units == 0 {
        return None;
    }

    let mut units: Vec<String> = Vec::with_capacity(max_units);

    for block in blocks {
        match block {
            Block::Paragraph { children }
            | Block::Heading { children, .. }
            | Block::Quote { children } => {
                push_unit(&mut units, &inline_text(children));
            }
            Block::List { children, .. } => {
                for item in children {
                    push_unit(&mut units, &inline_text(&item.children));
                    if units.len() == max_units {
                        break;
                    }
                }
            }
            // Code and image blocks never contribute to summaries
            Block::Code { .. } | Block::Image { .. } | Block::Unknown => {}
        }

        if units.len() == max_units {
            break;
        }
    }

    if units.is_empty() {
        return None;
    }

    let joined = units.join(" ");
    let budget = max_units * unit_width;

    if joined.chars().count() > budget {
        let truncated: String = joined.chars().take(budget).collect();
        Some(format!("{}...", truncated))
    } else {
        Some(joined)
    }
}

fn push_unit(units: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        units.push(text.to_string());
    }
}
