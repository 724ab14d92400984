//! The pattern library: one compiled matcher per markdown construct, plus
//! the fixed order in which a styling pass evaluates them.
//!
//! Matchers are compiled once on first use; an invalid pattern is a build
//! defect and fails fast there rather than being handled per call. Where a
//! construct needs context the regex engine cannot express (delimiter
//! adjacency, `#` lookbehind, matching backtick runs), the finder combines a
//! regex with a byte-context filter or a cursor scan.

mod block;
mod code_span;
mod cursor;
mod inline;

use std::sync::LazyLock;

use regex::Regex;

pub use block::{
    HeadingMatch, ListMarkerMatch, QuoteMatch, SetextMatch, find_atx_headings, find_block_quotes,
    find_list_markers, find_setext_headings, setext_underline_level,
};
pub use code_span::{CodeSpanMatch, find_code_spans};
pub use inline::{
    AutolinkMatch, EmphasisMatch, HashtagMatch, InlineLinkMatch, StrikethroughMatch,
    find_autolinks, find_bold, find_hashtags, find_inline_links, find_italic,
    find_strikethrough, trim_autolink_target,
};

/// One evaluation slot in a styling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Headings,
    Lists,
    Quotes,
    Autolinks,
    InlineLinks,
    Italic,
    Bold,
    Strikethrough,
    Hashtags,
    CodeSpans,
}

/// The order constructs are applied in, per pass.
///
/// This ordering is a composition contract, not a tuning knob: link text must
/// receive its attributes before the emphasis matchers see the bracket
/// characters, bold runs before strikethrough so `**~~x~~**` layers
/// predictably, and code spans come last so their font wins over everything
/// inside the delimiters.
pub const APPLY_ORDER: [PatternKind; 10] = [
    PatternKind::Headings,
    PatternKind::Lists,
    PatternKind::Quotes,
    PatternKind::Autolinks,
    PatternKind::InlineLinks,
    PatternKind::Italic,
    PatternKind::Bold,
    PatternKind::Strikethrough,
    PatternKind::Hashtags,
    PatternKind::CodeSpans,
];

pub(crate) struct PatternSet {
    pub atx_heading: Regex,
    pub setext_heading: Regex,
    pub list_marker: Regex,
    pub block_quote: Regex,
    pub bold_asterisk: Regex,
    pub bold_underscore: Regex,
    pub italic_asterisk: Regex,
    pub italic_underscore: Regex,
    pub strikethrough: Regex,
    pub autolink: Regex,
    pub inline_link: Regex,
    pub hashtag: Regex,
}

static PATTERNS: LazyLock<PatternSet> = LazyLock::new(PatternSet::compile);

pub(crate) fn patterns() -> &'static PatternSet {
    &PATTERNS
}

impl PatternSet {
    fn compile() -> Self {
        fn re(pattern: &str) -> Regex {
            // A pattern that fails to compile is a defect in this table, not
            // a runtime condition.
            Regex::new(pattern).expect("built-in pattern must compile")
        }

        Self {
            atx_heading: re(r"(?m)^(#{1,6} )(.*)$"),
            // Underline alternatives for both setext levels; only the `=`
            // level is wired into heading styling.
            setext_heading: re(r"(?m)^(.+)\n(={2,}|-{2,})[ \t]*$"),
            list_marker: re(r"(?m)^ {0,3}([-+*]|[0-9]+\.) +"),
            block_quote: re(r"(?m)^ {0,3}(> ?)(.*)$"),
            bold_asterisk: re(r"\*\*([^*\n]+?)\*\*"),
            bold_underscore: re(r"__([^_\n]+?)__"),
            italic_asterisk: re(r"\*([^*\n]+?)\*"),
            italic_underscore: re(r"_([^_\n]+?)_"),
            strikethrough: re(r"~~([^~\n]+?)~~"),
            autolink: re(r"[A-Za-z][A-Za-z0-9+.-]*://[^\s]+"),
            inline_link: re(
                r#"\[([^\[\]\n]*)\]\(([^()\s]*)(?:[ \t]+("[^"\n]*"|'[^'\n]*'))?[ \t]*\)"#,
            ),
            hashtag: re(r##"#[^#\s)\]\},?!'";:.\\]+"##),
        }
    }
}
