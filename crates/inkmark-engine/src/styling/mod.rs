//! The style applicator: one pass of construct detection and attribute
//! mutation over a buffer range.

pub(crate) mod kinds;

use crate::buffer::{StyledBuffer, span::Span};
use crate::fences::CodeBlock;
use crate::options::Options;
use crate::patterns::{APPLY_ORDER, PatternKind};
use crate::theme::Theme;

/// Whether a pass covers the whole buffer or one paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassScope {
    /// Attributes were freshly reset buffer-wide by the controller; the
    /// per-range reset is skipped.
    Full,
    /// Attributes in the range may be stale and are reset first.
    Incremental,
}

/// Shared state for one applicator pass.
pub(crate) struct StyleCtx<'a> {
    pub buf: &'a mut StyledBuffer,
    /// Snapshot of the whole buffer text for this pass.
    pub text: &'a str,
    /// The range being restyled.
    pub range: Span,
    pub opts: &'a Options,
    pub theme: &'a Theme,
    pub fences: &'a [CodeBlock],
}

impl StyleCtx<'_> {
    /// The text slice under the styling range.
    pub fn slice(&self) -> &str {
        &self.text[self.range.range()]
    }

    /// Constructs beginning inside a fenced block belong to the code
    /// highlight adapter, not this pass.
    pub fn in_fence(&self, offset: usize) -> bool {
        self.fences.iter().any(|cb| cb.span.contains(offset))
    }

    /// Styles a syntax marker: muted color, or rendered invisible when
    /// syntax hiding is on.
    pub fn mute_marker(&mut self, span: Span) {
        self.buf.attrs_mut().set_fg(span, self.theme.muted);
        if self.opts.hide_syntax {
            self.buf.attrs_mut().hide(span);
        }
    }
}

/// Applies every non-code construct's attributes inside `range`.
///
/// `text` must be a snapshot of the buffer's current content and `fences`
/// the result of [`crate::fences::find_code_blocks`] over that snapshot.
/// Malformed markdown is never an error: what the patterns do not match is
/// simply left unstyled.
pub fn apply_styles(
    buf: &mut StyledBuffer,
    text: &str,
    range: Span,
    fences: &[CodeBlock],
    opts: &Options,
    theme: &Theme,
    scope: PassScope,
) {
    let range = range.clamp_to(text.len());
    if range.is_empty() {
        return;
    }

    if scope == PassScope::Incremental {
        // Drop attributes whose markers may have just been edited away.
        buf.attrs_mut().reset_fonts(range);
        buf.attrs_mut().clear_decorations(range);
    }
    buf.attrs_mut().set_fg(range, theme.body);

    let mut ctx = StyleCtx {
        buf,
        text,
        range,
        opts,
        theme,
        fences,
    };

    for kind in APPLY_ORDER {
        match kind {
            PatternKind::Headings => kinds::headings::apply(&mut ctx),
            PatternKind::Lists => kinds::lists::apply(&mut ctx),
            PatternKind::Quotes => kinds::quotes::apply(&mut ctx),
            PatternKind::Autolinks => kinds::links::apply_autolinks(&mut ctx),
            PatternKind::InlineLinks => kinds::links::apply_inline_links(&mut ctx),
            PatternKind::Italic => kinds::emphasis::apply_italic(&mut ctx),
            PatternKind::Bold => kinds::emphasis::apply_bold(&mut ctx),
            PatternKind::Strikethrough => kinds::emphasis::apply_strikethrough(&mut ctx),
            PatternKind::Hashtags => kinds::tags::apply(&mut ctx),
            PatternKind::CodeSpans => kinds::code_span::apply(&mut ctx),
        }
    }
}
