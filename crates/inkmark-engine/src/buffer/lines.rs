use super::span::Span;

/// A reference to a single line of a pass's text snapshot with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef<'a> {
    /// Byte span of this line in the buffer (includes newline if present).
    pub span: Span,
    /// The line text, newline included.
    pub text: &'a str,
}

/// Returns an iterator over lines with their byte spans.
///
/// Newlines are preserved in the yielded text, which is important for
/// accurate span tracking during fence scanning.
pub fn lines_with_spans(text: &str) -> impl Iterator<Item = LineRef<'_>> {
    let mut offset = 0usize;
    text.split_inclusive('\n').map(move |line| {
        let start = offset;
        offset += line.len();
        LineRef {
            span: Span::new(start, offset),
            text: line,
        }
    })
}
