use regex::Regex;

use crate::buffer::span::Span;

use super::patterns;

fn abs(m: regex::Match<'_>, base: usize) -> Span {
    Span::new(base + m.start(), base + m.end())
}

/// A bold or italic match; `content` excludes the delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmphasisMatch {
    pub full: Span,
    pub content: Span,
}

/// A `~~text~~` match; `content` excludes the two tildes on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrikethroughMatch {
    pub full: Span,
    pub content: Span,
}

/// A bare `scheme://...` token. The rendered text is untouched; `target`
/// has trailing punctuation and an unbalanced closing paren stripped, and
/// `link` is the sub-span the stripped target occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutolinkMatch {
    pub full: Span,
    pub link: Span,
    pub target: String,
}

/// A `[text](url "title")` match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineLinkMatch {
    pub full: Span,
    /// Visible text between the brackets.
    pub text: Span,
    pub url: Span,
    /// Quoted title, quotes included, when present.
    pub title: Option<Span>,
    pub open_bracket: Span,
    pub close_bracket: Span,
    /// `(` through `)` inclusive.
    pub paren: Span,
}

/// A `#token` match; `token` excludes the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtagMatch {
    pub full: Span,
    pub token: String,
}

/// Finds matches while rejecting candidates via a byte-context filter,
/// resuming one byte past a rejected candidate so overlapping alternatives
/// are still considered.
fn scan_filtered<'t>(
    re: &Regex,
    text: &'t str,
    mut keep: impl FnMut(&regex::Captures<'t>) -> bool,
) -> Vec<regex::Captures<'t>> {
    let mut out = Vec::new();
    let mut at = 0;
    while at <= text.len() {
        let Some(caps) = re.captures_at(text, at) else {
            break;
        };
        let m = caps.get(0).expect("group 0 always present");
        if keep(&caps) {
            at = m.end();
            out.push(caps);
        } else {
            at = m.start() + 1;
        }
    }
    out
}

/// Emphasis candidates are dropped when the delimiter continues past the
/// match (`***x***`) or, for underscores, when the delimiter sits inside a
/// word (`snake_case_name`).
fn emphasis_matches(
    re: &Regex,
    text: &str,
    base: usize,
    delim: u8,
    reject_word_adjacent: bool,
) -> Vec<EmphasisMatch> {
    let bytes = text.as_bytes();
    scan_filtered(re, text, |caps| {
        let m = caps.get(0).expect("group 0 always present");
        let before = m.start().checked_sub(1).and_then(|i| bytes.get(i)).copied();
        let after = bytes.get(m.end()).copied();
        let adjacent = |b: Option<u8>| match b {
            None => false,
            Some(b) if b == delim => true,
            Some(b) => reject_word_adjacent && (b.is_ascii_alphanumeric() || b == b'_'),
        };
        !adjacent(before) && !adjacent(after)
    })
    .into_iter()
    .filter_map(|caps| {
        Some(EmphasisMatch {
            full: abs(caps.get(0)?, base),
            content: abs(caps.get(1)?, base),
        })
    })
    .collect()
}

pub fn find_bold(text: &str, base: usize) -> Vec<EmphasisMatch> {
    let ps = patterns();
    let mut out = emphasis_matches(&ps.bold_asterisk, text, base, b'*', false);
    out.extend(emphasis_matches(&ps.bold_underscore, text, base, b'_', true));
    out.sort_by_key(|m| m.full.start);
    out
}

pub fn find_italic(text: &str, base: usize) -> Vec<EmphasisMatch> {
    let ps = patterns();
    let mut out = emphasis_matches(&ps.italic_asterisk, text, base, b'*', false);
    out.extend(emphasis_matches(&ps.italic_underscore, text, base, b'_', true));
    out.sort_by_key(|m| m.full.start);
    out
}

pub fn find_strikethrough(text: &str, base: usize) -> Vec<StrikethroughMatch> {
    patterns()
        .strikethrough
        .find_iter(text)
        .map(|m| StrikethroughMatch {
            full: abs(m, base),
            content: abs(m, base).shrink(2),
        })
        .collect()
}

/// Strips trailing punctuation and an unbalanced closing paren from an
/// autolink target. `(https://a.com/x_(y))` keeps its balanced parens;
/// `https://a.com.` loses the period.
pub fn trim_autolink_target(mut s: &str) -> &str {
    loop {
        let Some(last) = s.chars().next_back() else {
            break;
        };
        match last {
            '.' | ',' | ';' | ':' | '!' | '?' | '_' => s = &s[..s.len() - 1],
            ')' => {
                let opens = s.matches('(').count();
                let closes = s.matches(')').count();
                if closes > opens {
                    s = &s[..s.len() - 1];
                } else {
                    break;
                }
            }
            _ => break,
        }
    }
    s
}

pub fn find_autolinks(text: &str, base: usize) -> Vec<AutolinkMatch> {
    patterns()
        .autolink
        .find_iter(text)
        .map(|m| {
            let target = trim_autolink_target(m.as_str());
            AutolinkMatch {
                full: abs(m, base),
                link: Span::new(base + m.start(), base + m.start() + target.len()),
                target: target.to_string(),
            }
        })
        .collect()
}

pub fn find_inline_links(text: &str, base: usize) -> Vec<InlineLinkMatch> {
    patterns()
        .inline_link
        .captures_iter(text)
        .filter_map(|caps| {
            let full = abs(caps.get(0)?, base);
            let text_span = abs(caps.get(1)?, base);
            Some(InlineLinkMatch {
                full,
                text: text_span,
                url: abs(caps.get(2)?, base),
                title: caps.get(3).map(|t| abs(t, base)),
                open_bracket: Span::new(full.start, full.start + 1),
                close_bracket: Span::new(text_span.end, text_span.end + 1),
                paren: Span::new(text_span.end + 1, full.end),
            })
        })
        .collect()
}

pub fn find_hashtags(text: &str, base: usize) -> Vec<HashtagMatch> {
    let bytes = text.as_bytes();
    scan_filtered(&patterns().hashtag, text, |caps| {
        let m = caps.get(0).expect("group 0 always present");
        let preceded_by_hash = m
            .start()
            .checked_sub(1)
            .and_then(|i| bytes.get(i))
            .is_some_and(|b| *b == b'#');
        let token = &m.as_str()[1..];
        let numeric = token.chars().all(|c| c.is_ascii_digit());
        !preceded_by_hash && !numeric
    })
    .into_iter()
    .filter_map(|caps| {
        let m = caps.get(0)?;
        Some(HashtagMatch {
            full: abs(m, base),
            token: m.as_str()[1..].to_string(),
        })
    })
    .collect()
}
