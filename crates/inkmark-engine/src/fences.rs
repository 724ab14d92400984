//! Whole-buffer fenced code block detection.
//!
//! The scan always covers the entire buffer regardless of how small the
//! triggering edit was: a single character can open or close a fence
//! anywhere. Blocks are recomputed from scratch on every pass and never
//! cached across edits.

use crate::buffer::{lines::lines_with_spans, span::Span};

/// The opening/closing fence token.
pub const FENCE: &str = "```";

/// A detected fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Full block span, fence lines included.
    pub span: Span,
    /// Inner content between the fence lines (may be empty).
    pub content: Span,
    /// Language tag from the opening fence line, if any.
    pub lang: Option<String>,
}

impl CodeBlock {
    pub fn language(&self) -> Option<&str> {
        self.lang.as_deref()
    }
}

/// Classifies a line as a fence line, returning the text after the token.
///
/// A fence line is exactly three backticks at line start, optionally
/// followed immediately (no space) by a language tag. A fourth backtick or
/// whitespace inside the tag disqualifies the line.
fn fence_tag(line: &str) -> Option<&str> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    let rest = trimmed.strip_prefix(FENCE)?;
    if rest.contains('`') || rest.chars().any(char::is_whitespace) {
        return None;
    }
    Some(rest)
}

/// Scans the whole buffer for fenced code blocks.
///
/// Blocks do not nest; the first closing fence after an opening fence
/// terminates the block. An opening fence with no close yields no block, so
/// a half-typed fence leaves its lines styled as ordinary text.
pub fn find_code_blocks(text: &str) -> Vec<CodeBlock> {
    let mut out = Vec::new();
    let mut open: Option<(Span, String)> = None;

    for line in lines_with_spans(text) {
        let Some(tag) = fence_tag(line.text) else {
            continue;
        };
        match open.take() {
            None => {
                // Opening fences must end in a newline; a fence on the very
                // last unterminated line cannot contain anything.
                if line.text.ends_with('\n') {
                    open = Some((line.span, tag.to_string()));
                }
            }
            Some((open_span, lang)) if tag.is_empty() => {
                out.push(CodeBlock {
                    span: Span::new(open_span.start, line.span.end),
                    content: Span::new(open_span.end, line.span.start),
                    lang: (!lang.is_empty()).then_some(lang),
                });
            }
            // A tagged fence line inside an open block is content, not a
            // close; the block stays open.
            Some(still_open) => open = Some(still_open),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_block_with_language() {
        let blocks = find_code_blocks("```swift\nlet x = 42\n```\n");
        assert_eq!(blocks.len(), 1);
        let b = &blocks[0];
        assert_eq!(b.span, Span::new(0, 24));
        assert_eq!(b.content, Span::new(9, 20));
        assert_eq!(b.language(), Some("swift"));
    }

    #[test]
    fn detects_block_without_language() {
        let blocks = find_code_blocks("```\nx\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lang, None);
        assert_eq!(blocks[0].content, Span::new(4, 6));
    }

    #[test]
    fn unclosed_fence_yields_no_block() {
        assert!(find_code_blocks("```rust\nlet x = 1;\n").is_empty());
        assert!(find_code_blocks("```").is_empty());
    }

    #[test]
    fn four_backticks_is_not_a_fence() {
        assert!(find_code_blocks("````\nx\n````\n").is_empty());
    }

    #[test]
    fn language_tag_with_space_is_not_a_fence() {
        assert!(find_code_blocks("``` rust\nx\n```\n").is_empty());
    }

    #[test]
    fn closing_fence_must_be_bare() {
        // A tagged line inside an open block does not close it.
        let blocks = find_code_blocks("```a\nx\n```b\ny\n```\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].span, Span::new(0, 18));
    }

    #[test]
    fn first_close_wins_and_scanning_continues() {
        let blocks = find_code_blocks("```\na\n```\nplain\n```\nb\n```\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].span, Span::new(0, 10));
        assert_eq!(blocks[1].span, Span::new(16, 26));
    }

    #[test]
    fn empty_content_block() {
        let blocks = find_code_blocks("```\n```\n");
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].content.is_empty());
    }

    #[test]
    fn fence_not_at_line_start_is_content() {
        assert!(find_code_blocks(" ```\nx\n ```\n").is_empty());
    }
}
