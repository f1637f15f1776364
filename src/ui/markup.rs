// SPDX-License-Identifier: MPL-2.0
//! Inline math markup in explanations.
//!
//! Language models write math between `$…$` or `\(…\)` (inline) and `$$…$$`
//! or `\[…\]` (display). The text is split into [`Segment`]s so math can be
//! drawn in a distinct font and color. An unclosed delimiter is kept as
//! plain text, and `\$` is a literal dollar sign.

use iced::widget::text::Span;
use iced::widget::span;
use iced::{Color, Font};

/// A piece of explanation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    InlineMath(String),
    DisplayMath(String),
}

const DELIMITERS: [(&str, &str, bool); 4] = [
    ("$$", "$$", true),
    ("\\[", "\\]", true),
    ("\\(", "\\)", false),
    ("$", "$", false),
];

/// Splits text into plain and math segments.
#[must_use]
pub fn parse(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    'outer: while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("\\$") {
            text.push('$');
            rest = after;
            continue;
        }

        for (open, close, display) in DELIMITERS {
            let Some(after_open) = rest.strip_prefix(open) else {
                continue;
            };
            let Some(end) = find_closing(after_open, close) else {
                continue;
            };
            let content = after_open[..end].trim();
            if content.is_empty() {
                continue;
            }

            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            segments.push(if display {
                Segment::DisplayMath(content.to_string())
            } else {
                Segment::InlineMath(content.to_string())
            });
            rest = &after_open[end + close.len()..];
            continue 'outer;
        }

        text.push(c);
        rest = &rest[c.len_utf8()..];
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}

/// Byte offset of `close` in `haystack`, skipping `\$` escapes for dollar
/// delimiters. Inline `$…$` may not span a blank line.
fn find_closing(haystack: &str, close: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(found) = haystack[offset..].find(close) {
        let position = offset + found;
        let escaped = close.starts_with('$') && haystack[..position].ends_with('\\');
        if !escaped {
            if close == "$" && haystack[..position].contains("\n\n") {
                return None;
            }
            return Some(position);
        }
        offset = position + close.len();
    }
    None
}

/// Turns segments into rich-text spans. Math uses the monospace font and
/// `math_color`; display math sits on its own line.
#[must_use]
pub fn spans(segments: &[Segment], math_color: Color) -> Vec<Span<'static, (), Font>> {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => span(text.clone()),
            Segment::InlineMath(math) => span(math.clone())
                .font(Font::MONOSPACE)
                .color(math_color),
            Segment::DisplayMath(math) => span(format!("\n{math}\n"))
                .font(Font::MONOSPACE)
                .color(math_color),
        })
        .collect()
}
