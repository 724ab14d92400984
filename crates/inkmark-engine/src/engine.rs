//! The incremental controller: decides what to restyle on each edit and
//! drives the detector, applicator and highlight adapter in order.

use std::ops::Range;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::buffer::{StyledBuffer, span::Span};
use crate::fences::find_code_blocks;
use crate::highlight::{Highlighter, MonospaceHighlighter, render_code_block};
use crate::options::Options;
use crate::patterns::setext_underline_level;
use crate::styling::{PassScope, apply_styles};
use crate::theme::Theme;

/// Styles a markdown buffer incrementally.
///
/// All operations run synchronously on the caller's thread; the engine holds
/// no interior locks and is not reentrant. A host that defers passes must
/// keep them FIFO per buffer: applying a later edit's pass before an earlier
/// one can leave stale styling behind. Attribute-only mutations must never
/// be reported via [`Self::notify_edit`], or styling would retrigger itself.
pub struct StyleEngine {
    opts: Options,
    theme: Theme,
    highlighter: Arc<dyn Highlighter>,
}

impl StyleEngine {
    pub fn new(opts: Options) -> Self {
        Self::with_theme(opts, Theme::default())
    }

    pub fn with_theme(opts: Options, theme: Theme) -> Self {
        Self {
            opts,
            theme,
            highlighter: Arc::new(MonospaceHighlighter),
        }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Swaps the bound highlighter. Takes effect on the next pass; a pass
    /// already underway on another clone of the `Arc` is unaffected.
    pub fn set_highlighter(&mut self, highlighter: Arc<dyn Highlighter>) {
        self.highlighter = highlighter;
    }

    /// Full-document pass: resets every attribute to base state, then
    /// styles the whole buffer and renders every fenced block.
    ///
    /// This is the only operation that reconciles the entire document; call
    /// it after loading content wholesale or after swapping options or the
    /// highlighter.
    pub fn process_initial(&self, buf: &mut StyledBuffer) {
        if buf.is_empty() {
            return;
        }
        let text = buf.text();
        debug!(len = text.len(), "full styling pass");
        buf.attrs_mut().reset_all();
        let fences = find_code_blocks(&text);
        let whole = Span::new(0, text.len());
        apply_styles(
            buf,
            &text,
            whole,
            &fences,
            &self.opts,
            &self.theme,
            PassScope::Full,
        );
        for block in &fences {
            render_code_block(
                buf,
                &text,
                block,
                self.highlighter.as_ref(),
                &self.opts,
                &self.theme,
            );
        }
    }

    /// Forced re-render; identical to [`Self::process_initial`], offered
    /// for callers that distinguish first render from refresh.
    pub fn force_full_render(&self, buf: &mut StyledBuffer) {
        self.process_initial(buf);
    }

    /// Incremental pass after one character-level edit.
    ///
    /// Restyles the paragraph containing `edited` (in post-edit
    /// coordinates), after a whole-buffer fence scan; fenced blocks
    /// touching the paragraph are re-rendered. Cost is bounded by the
    /// paragraph length plus the fence scan.
    pub fn notify_edit(&self, buf: &mut StyledBuffer, edited: Range<usize>, len_delta: isize) {
        if buf.is_empty() {
            return;
        }
        let text = buf.text();
        let paragraph = buf.paragraph_span(edited.clone());
        let range = extend_for_setext(&text, paragraph);
        trace!(
            ?edited,
            len_delta,
            start = range.start,
            end = range.end,
            "incremental styling pass"
        );
        let fences = find_code_blocks(&text);
        apply_styles(
            buf,
            &text,
            range,
            &fences,
            &self.opts,
            &self.theme,
            PassScope::Incremental,
        );
        for block in fences.iter().filter(|b| b.span.intersects(range)) {
            render_code_block(
                buf,
                &text,
                block,
                self.highlighter.as_ref(),
                &self.opts,
                &self.theme,
            );
        }
    }
}

/// Setext headings span two lines, so a one-line restyle range is widened
/// when an underline borders it: up to the title line when the range starts
/// with an underline, down to the underline when the next line is one.
fn extend_for_setext(text: &str, range: Span) -> Span {
    let mut out = range;

    let first_line_end = text[range.start..]
        .find('\n')
        .map_or(text.len(), |i| range.start + i + 1);
    let first_line = &text[range.start..first_line_end];
    if setext_underline_level(first_line).is_some() && range.start > 0 {
        // range.start sits just past the previous line's newline.
        let prev_start = text[..range.start - 1].rfind('\n').map_or(0, |i| i + 1);
        out.start = prev_start.min(out.start);
    }

    if range.end < text.len() {
        let next_end = text[range.end..]
            .find('\n')
            .map_or(text.len(), |i| range.end + i + 1);
        let next_line = &text[range.end..next_end];
        if setext_underline_level(next_line).is_some() {
            out.end = next_end.max(out.end);
        }
    }

    out
}
