use crate::buffer::span::Span;
use crate::patterns::{find_bold, find_italic, find_strikethrough};
use crate::styling::StyleCtx;

pub(crate) fn apply_italic(ctx: &mut StyleCtx<'_>) {
    for m in find_italic(ctx.slice(), ctx.range.start) {
        if ctx.in_fence(m.full.start) {
            continue;
        }
        ctx.buf.attrs_mut().map_font(m.content, |f| f.italic = true);
        ctx.mute_marker(Span::new(m.full.start, m.content.start));
        ctx.mute_marker(Span::new(m.content.end, m.full.end));
    }
}

pub(crate) fn apply_bold(ctx: &mut StyleCtx<'_>) {
    for m in find_bold(ctx.slice(), ctx.range.start) {
        if ctx.in_fence(m.full.start) {
            continue;
        }
        ctx.buf.attrs_mut().map_font(m.content, |f| f.bold = true);
        ctx.mute_marker(Span::new(m.full.start, m.content.start));
        ctx.mute_marker(Span::new(m.content.end, m.full.end));
    }
}

pub(crate) fn apply_strikethrough(ctx: &mut StyleCtx<'_>) {
    for m in find_strikethrough(ctx.slice(), ctx.range.start) {
        if ctx.in_fence(m.full.start) {
            continue;
        }
        ctx.buf.attrs_mut().set_strikethrough(m.content);
        ctx.mute_marker(Span::new(m.full.start, m.content.start));
        ctx.mute_marker(Span::new(m.content.end, m.full.end));
    }
}
