use crate::buffer::span::Span;

use super::cursor::Cursor;

/// The backtick character that delimits code spans.
pub(crate) const TICK: u8 = b'`';

/// An inline code span: delimiter runs of equal length around content on a
/// single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSpanMatch {
    /// Full span including both delimiter runs.
    pub full: Span,
    pub open: Span,
    pub close: Span,
}

impl CodeSpanMatch {
    /// Content between the delimiter runs.
    pub fn content(&self) -> Span {
        Span::new(self.open.end, self.close.start)
    }
}

/// Scans for code spans the way a regex with backreferences would: an
/// opening backtick run closes only at the next run of exactly the same
/// length on the same line. Runs of a different length are content. An
/// unclosed opening run is left unmatched and scanning resumes after it.
pub fn find_code_spans(text: &str, base: usize) -> Vec<CodeSpanMatch> {
    let mut cur = Cursor::new(text, base);
    let mut out = Vec::new();

    while !cur.eof() {
        if cur.peek() != Some(TICK) {
            cur.bump();
            continue;
        }
        let open_start = cur.pos();
        let n = cur.bump_run(TICK);
        let open = Span::new(open_start, cur.pos());

        let resume = cur.clone();
        let mut close = None;
        while !cur.eof() {
            match cur.peek() {
                Some(b'\n') => break,
                Some(TICK) => {
                    let close_start = cur.pos();
                    let m = cur.bump_run(TICK);
                    if m == n {
                        close = Some(Span::new(close_start, cur.pos()));
                        break;
                    }
                }
                _ => cur.bump(),
            }
        }

        match close {
            Some(close) => out.push(CodeSpanMatch {
                full: Span::new(open.start, close.end),
                open,
                close,
            }),
            None => cur = resume,
        }
    }

    out
}
