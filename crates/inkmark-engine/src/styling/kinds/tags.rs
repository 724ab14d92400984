use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::patterns::find_hashtags;
use crate::styling::StyleCtx;

/// Fixed non-network scheme carried by tag links.
pub(crate) const TAG_SCHEME: &str = "tag:";

/// Builds the `tag:` target for a token: surrounding whitespace and any
/// internal newlines dropped, then percent-encoded.
pub(crate) fn tag_target(token: &str) -> String {
    let cleaned: String = token.trim().chars().filter(|c| *c != '\n').collect();
    format!(
        "{TAG_SCHEME}{}",
        utf8_percent_encode(&cleaned, NON_ALPHANUMERIC)
    )
}

pub(crate) fn apply(ctx: &mut StyleCtx<'_>) {
    if !ctx.opts.inline_tags {
        return;
    }
    for m in find_hashtags(ctx.slice(), ctx.range.start) {
        if ctx.in_fence(m.full.start) {
            continue;
        }
        let target = tag_target(&m.token);
        ctx.buf.attrs_mut().set_link(m.full, &target);
        ctx.buf.attrs_mut().set_fg(m.full, ctx.theme.accent);
    }
}
