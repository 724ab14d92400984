use crate::patterns::find_list_markers;
use crate::styling::StyleCtx;

pub(crate) fn apply(ctx: &mut StyleCtx<'_>) {
    for m in find_list_markers(ctx.slice(), ctx.range.start) {
        if ctx.in_fence(m.marker.start) {
            continue;
        }
        ctx.mute_marker(m.marker);
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::{StyledBuffer, span::Span};
    use crate::options::Options;
    use crate::styling::{PassScope, apply_styles};
    use crate::theme::Theme;

    #[test]
    fn bullet_marker_is_muted_body_is_not() {
        let text = "- item one\n2. item two\n";
        let mut buf = StyledBuffer::from_str(text);
        apply_styles(
            &mut buf,
            text,
            Span::new(0, text.len()),
            &[],
            &Options::default(),
            &Theme::default(),
            PassScope::Incremental,
        );
        let theme = Theme::default();
        assert_eq!(buf.attr_at(0).unwrap().fg, Some(theme.muted));
        assert_eq!(buf.attr_at(2).unwrap().fg, Some(theme.body));
        assert_eq!(buf.attr_at(11).unwrap().fg, Some(theme.muted)); // "2"
        assert_eq!(buf.attr_at(12).unwrap().fg, Some(theme.muted)); // "."
        assert_eq!(buf.attr_at(14).unwrap().fg, Some(theme.body));
    }
}
