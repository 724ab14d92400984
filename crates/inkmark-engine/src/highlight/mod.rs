//! The code highlighter plug-in contract and the adapter that maps a
//! highlighter's output back onto absolute buffer offsets.

use std::ops::Range;

use tracing::warn;

use crate::buffer::{
    StyledBuffer,
    attrs::{Color, FontFamily, FontStyle},
    span::Span,
};
use crate::fences::{CodeBlock, FENCE};
use crate::options::Options;
use crate::theme::Theme;

/// One attribute run in a highlighter's output, zero-based over the
/// submitted content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRun {
    pub range: Range<usize>,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
}

/// A highlighter's result: the content echoed back plus attribute runs.
///
/// `text` must be exactly the submitted content; echoing it back lets the
/// adapter verify the contract instead of trusting the plug-in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Highlighted {
    pub text: String,
    pub runs: Vec<HighlightRun>,
}

/// A pluggable code highlighter.
///
/// Implementations style content, never alter it: the returned
/// [`Highlighted::text`] must equal the submitted code byte for byte. A
/// violating result is discarded by the adapter rather than desynchronizing
/// buffer offsets.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, code: &str, language: Option<&str>) -> Highlighted;
}

/// The built-in fallback: monospace rendering with no language-aware
/// coloring. Bound by default so absence of a real highlighter never needs
/// a null check at the styling call sites.
#[derive(Debug, Default)]
pub struct MonospaceHighlighter;

impl Highlighter for MonospaceHighlighter {
    fn highlight(&self, code: &str, _language: Option<&str>) -> Highlighted {
        // The adapter already paints the uniform code font and background;
        // nothing further to add.
        Highlighted {
            text: code.to_string(),
            runs: Vec::new(),
        }
    }
}

/// Extracts the language tag from an opening fence line: the fence token
/// removed, whitespace trimmed, empty meaning no language.
fn language_of(first_line: &str) -> Option<&str> {
    let tag = first_line
        .trim_end_matches(['\r', '\n'])
        .strip_prefix(FENCE)?
        .trim();
    (!tag.is_empty()).then_some(tag)
}

/// Renders one fenced code block: uniform code styling over the whole
/// block, muted (optionally hidden) fence lines, then the bound
/// highlighter's runs mapped onto absolute offsets.
///
/// `text` is the pass's buffer snapshot; `block` must come from
/// [`crate::fences::find_code_blocks`] over the same snapshot.
pub fn render_code_block(
    buf: &mut StyledBuffer,
    text: &str,
    block: &CodeBlock,
    highlighter: &dyn Highlighter,
    opts: &Options,
    theme: &Theme,
) {
    let raw = &text[block.span.clamp_to(text.len()).range()];
    let Some(first_newline) = raw.find('\n') else {
        return;
    };
    let first_line = &raw[..=first_newline];
    let content_str = &text[block.content.clamp_to(text.len()).range()];
    let content_str = content_str
        .strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(content_str);

    // The block may extend past the paragraph an incremental pass styled,
    // so the adapter owns the full reset of its own range.
    let attrs = buf.attrs_mut();
    attrs.clear_decorations(block.span);
    attrs.set_font(
        block.span,
        FontStyle {
            family: FontFamily::Code,
            ..FontStyle::default()
        },
    );
    attrs.set_bg(block.span, theme.code_bg);
    attrs.set_fg(block.content, theme.body);

    // Fence lines: muted, hidden when syntax hiding is on.
    let opening = Span::new(block.span.start, block.content.start);
    let closing = Span::new(block.content.end, block.span.end);
    for fence_line in [opening, closing] {
        attrs.set_fg(fence_line, theme.muted);
        if opts.hide_syntax {
            attrs.hide(fence_line);
        }
    }

    let highlighted = highlighter.highlight(content_str, language_of(first_line));
    if highlighted.text != content_str {
        warn!(
            expected_len = content_str.len(),
            got_len = highlighted.text.len(),
            "highlighter altered code content; discarding its output"
        );
        return;
    }

    let origin = block.content.start;
    for run in &highlighted.runs {
        let mapped = Span::new(origin + run.range.start, origin + run.range.end);
        if mapped.start >= block.content.end {
            // Defensive clamp: a run past the content cannot be mapped.
            continue;
        }
        let mapped = Span::new(mapped.start, mapped.end.min(block.content.end));
        if let Some(fg) = run.fg {
            attrs.set_fg(mapped, fg);
        }
        if let Some(bg) = run.bg {
            attrs.set_bg(mapped, bg);
        }
        if run.bold || run.italic {
            let (bold, italic) = (run.bold, run.italic);
            attrs.map_font(mapped, move |f| {
                f.bold |= bold;
                f.italic |= italic;
            });
        }
    }
}
