//! Lightweight markup rendering for answer text
//!
//! Backend answers carry a small fixed markup subset: `##`/`###` headers,
//! `**bold**`, `*italic*`, and `- ` bullet lists. This module converts that
//! text into a structured block tree the UI renders with plain widgets.
//! Because the output is structured data rather than HTML, untrusted answer
//! text can never smuggle markup constructs of its own.
//!
//! The rules are applied in a fixed order: headers are recognized before
//! inline emphasis so a header marker is never mistaken for emphasis, and
//! list grouping runs over whole lines before remaining text becomes
//! paragraph lines.

/// A run of inline text inside a block
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupSpan {
    /// Plain text
    Text(String),
    /// `**bold**` text
    Strong(String),
    /// `*italic*` text
    Emphasis(String),
}

/// A rendered block of answer text
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupBlock {
    /// `## ` (level 2) or `### ` (level 3) header line
    Heading { level: u8, spans: Vec<MarkupSpan> },
    /// One or more consecutive `- ` lines, one span list per item
    List { items: Vec<Vec<MarkupSpan>> },
    /// Any other line; empty lines render as explicit line breaks
    Line { spans: Vec<MarkupSpan> },
}

/// Render an answer string into markup blocks
///
/// Never fails: unrecognized constructs pass through as plain text.
pub fn render(text: &str) -> Vec<MarkupBlock> {
    let mut blocks = Vec::new();
    let mut list_items: Vec<Vec<MarkupSpan>> = Vec::new();

    for line in text.lines() {
        if let Some(item) = line.strip_prefix("- ") {
            // Consecutive list items accumulate into one list block
            list_items.push(parse_inline(item));
            continue;
        }

        if !list_items.is_empty() {
            blocks.push(MarkupBlock::List {
                items: std::mem::take(&mut list_items),
            });
        }

        if let Some(rest) = line.strip_prefix("### ") {
            blocks.push(MarkupBlock::Heading {
                level: 3,
                spans: parse_inline(rest),
            });
        } else if let Some(rest) = line.strip_prefix("## ") {
            blocks.push(MarkupBlock::Heading {
                level: 2,
                spans: parse_inline(rest),
            });
        } else {
            blocks.push(MarkupBlock::Line {
                spans: parse_inline(line),
            });
        }
    }

    if !list_items.is_empty() {
        blocks.push(MarkupBlock::List { items: list_items });
    }

    blocks
}

/// Parse `**bold**` and `*italic*` runs out of a single line
///
/// `**` is matched before `*` at every position, so bold delimiters are
/// never consumed as two italic markers. Unbalanced markers are left as
/// literal text.
fn parse_inline(line: &str) -> Vec<MarkupSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("**") {
            if let Some(end) = after.find("**") {
                flush_plain(&mut plain, &mut spans);
                spans.push(MarkupSpan::Strong(after[..end].to_string()));
                rest = &after[end + 2..];
                continue;
            }
        }
        if let Some(after) = rest.strip_prefix('*') {
            if let Some(end) = after.find('*') {
                flush_plain(&mut plain, &mut spans);
                spans.push(MarkupSpan::Emphasis(after[..end].to_string()));
                rest = &after[end + 1..];
                continue;
            }
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            plain.push(c);
        }
        rest = chars.as_str();
    }

    flush_plain(&mut plain, &mut spans);
    spans
}

fn flush_plain(plain: &mut String, spans: &mut Vec<MarkupSpan>) {
    if !plain.is_empty() {
        spans.push(MarkupSpan::Text(std::mem::take(plain)));
    }
}
