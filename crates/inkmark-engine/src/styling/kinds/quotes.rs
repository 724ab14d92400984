use crate::patterns::find_block_quotes;
use crate::styling::StyleCtx;

pub(crate) fn apply(ctx: &mut StyleCtx<'_>) {
    for m in find_block_quotes(ctx.slice(), ctx.range.start) {
        if ctx.in_fence(m.marker.start) {
            continue;
        }
        // Body color first so the marker's muting wins on overlap.
        ctx.buf.attrs_mut().set_fg(m.body, ctx.theme.quote_body);
        ctx.mute_marker(m.marker);
    }
}
