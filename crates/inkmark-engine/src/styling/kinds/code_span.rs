use crate::buffer::attrs::{FontFamily, FontStyle};
use crate::fences::FENCE;
use crate::patterns::find_code_spans;
use crate::styling::StyleCtx;

pub(crate) fn apply(ctx: &mut StyleCtx<'_>) {
    for m in find_code_spans(ctx.slice(), ctx.range.start) {
        if ctx.in_fence(m.full.start) {
            continue;
        }
        // A triple-backtick run is a fence marker, owned by the detector
        // and the highlight adapter.
        if ctx.text[m.full.range()].starts_with(FENCE) {
            continue;
        }
        // Code font and fill cover the delimiters too, so the span renders
        // as one monospace unit. The font is replaced wholesale: emphasis
        // traits and heading scale do not leak into code.
        ctx.buf.attrs_mut().set_font(
            m.full,
            FontStyle {
                family: FontFamily::Code,
                ..FontStyle::default()
            },
        );
        ctx.buf.attrs_mut().set_bg(m.full, ctx.theme.code_bg);
        ctx.mute_marker(m.open);
        ctx.mute_marker(m.close);
    }
}
