pub mod attrs;
pub mod lines;
pub mod span;

use std::borrow::Cow;
use std::ops::Range;

use xi_rope::{Delta, Interval, Rope};

use attrs::{AttrMap, AttrRun, CharAttrs};
use span::Span;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("buffer content is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Description of one character-level host edit, as expected by
/// [`crate::StyleEngine::notify_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// The replaced range in post-edit coordinates.
    pub range: Range<usize>,
    /// Net length change of the buffer.
    pub len_delta: isize,
}

/// A text buffer with a per-byte attribute layer.
///
/// The text is owned by the host editor; the engine borrows the buffer for
/// the duration of one styling pass and mutates only the attribute layer.
/// Invariant: the attribute map always has exactly one cell per text byte,
/// and no engine operation ever changes the character sequence.
pub struct StyledBuffer {
    text: Rope,
    attrs: AttrMap,
}

impl StyledBuffer {
    pub fn new() -> Self {
        Self::from_str("")
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            text: Rope::from(s),
            attrs: AttrMap::new(s.len()),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        let s = std::str::from_utf8(bytes)?;
        Ok(Self::from_str(s))
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.len() == 0
    }

    /// The current text content as a pass snapshot.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// Slice the text to a cow string, clamping the range to buffer bounds.
    pub fn slice_to_cow(&self, range: Range<usize>) -> Cow<'_, str> {
        let span = Span::from(range).clamp_to(self.text.len());
        self.text.slice_to_cow(span.range())
    }

    /// Host edit entry point: replaces `range` with `s`, splicing the
    /// attribute layer so fresh bytes carry default attributes.
    ///
    /// Returns the [`Edit`] to forward to the engine. Attribute-only
    /// mutations go through the attribute API and must never be reported
    /// as edits.
    pub fn replace(&mut self, range: Range<usize>, s: &str) -> Edit {
        let span = Span::from(range).clamp_to(self.text.len());
        let delta = Delta::simple_edit(
            Interval::new(span.start, span.end),
            Rope::from(s),
            self.text.len(),
        );
        self.text = delta.apply(&self.text);
        self.attrs.splice(span, s.len());
        debug_assert_eq!(self.text.len(), self.attrs.len());
        Edit {
            range: span.start..span.start + s.len(),
            len_delta: s.len() as isize - span.len() as isize,
        }
    }

    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut AttrMap {
        &mut self.attrs
    }

    pub fn attr_at(&self, offset: usize) -> Option<&CharAttrs> {
        self.attrs.get(offset)
    }

    /// Coalesced attribute runs over the whole buffer.
    pub fn attr_runs(&self) -> Vec<AttrRun> {
        self.attrs.runs()
    }

    /// The maximal line-bounded span containing `range`: from the start of
    /// the line holding `range.start` to the end of the line holding
    /// `range.end` (trailing newline included). This is the unit of
    /// incremental restyling.
    pub fn paragraph_span(&self, range: Range<usize>) -> Span {
        let len = self.text.len();
        let inner = Span::from(range).clamp_to(len);
        let first = self.text.line_of_offset(inner.start);
        let last = self.text.line_of_offset(inner.end);
        Span::new(
            self.text.offset_of_line(first),
            self.text.offset_of_line(last + 1),
        )
    }
}

impl Default for StyledBuffer {
    fn default() -> Self {
        Self::new()
    }
}
