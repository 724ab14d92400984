use crate::buffer::span::Span;

use super::patterns;

fn abs(m: regex::Match<'_>, base: usize) -> Span {
    Span::new(base + m.start(), base + m.end())
}

/// An ATX heading line: `#` markers, one space, content to end of line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    pub full: Span,
    /// The `#` run including the following space.
    pub marker: Span,
    pub content: Span,
    /// 1..=6, from the marker length.
    pub level: u8,
}

pub fn find_atx_headings(text: &str, base: usize) -> Vec<HeadingMatch> {
    patterns()
        .atx_heading
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            let marker = caps.get(1)?;
            let content = caps.get(2)?;
            Some(HeadingMatch {
                full: abs(full, base),
                marker: abs(marker, base),
                content: abs(content, base),
                level: (marker.len() - 1) as u8,
            })
        })
        .collect()
}

/// A setext heading: a title line underlined with `=` (level 1) or `-`
/// (level 2). Only level 1 is wired into heading styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetextMatch {
    pub full: Span,
    pub title: Span,
    pub underline: Span,
    pub level: u8,
}

pub fn find_setext_headings(text: &str, base: usize) -> Vec<SetextMatch> {
    patterns()
        .setext_heading
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            let title = caps.get(1)?;
            let underline = caps.get(2)?;
            let level = if underline.as_str().starts_with('=') { 1 } else { 2 };
            Some(SetextMatch {
                full: abs(full, base),
                title: abs(title, base),
                underline: abs(underline, base),
                level,
            })
        })
        .collect()
}

/// Classifies a single line as a setext underline, for widening an
/// incremental restyle range to the adjacent title line.
pub fn setext_underline_level(line: &str) -> Option<u8> {
    let t = line
        .trim_end_matches(['\r', '\n'])
        .trim_end_matches([' ', '\t']);
    if t.len() < 2 {
        return None;
    }
    if t.bytes().all(|b| b == b'=') {
        Some(1)
    } else if t.bytes().all(|b| b == b'-') {
        Some(2)
    } else {
        None
    }
}

/// A list item marker: `-`, `+`, `*`, or `N.` after 0-3 spaces of indent.
/// Only the marker is captured; the item body is ordinary inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListMarkerMatch {
    pub marker: Span,
}

pub fn find_list_markers(text: &str, base: usize) -> Vec<ListMarkerMatch> {
    patterns()
        .list_marker
        .captures_iter(text)
        .filter_map(|caps| {
            Some(ListMarkerMatch {
                marker: abs(caps.get(1)?, base),
            })
        })
        .collect()
}

/// One blockquote line: the `>` marker (with optional trailing space) and
/// the quoted body after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteMatch {
    pub marker: Span,
    pub body: Span,
}

pub fn find_block_quotes(text: &str, base: usize) -> Vec<QuoteMatch> {
    patterns()
        .block_quote
        .captures_iter(text)
        .filter_map(|caps| {
            Some(QuoteMatch {
                marker: abs(caps.get(1)?, base),
                body: abs(caps.get(2)?, base),
            })
        })
        .collect()
}
