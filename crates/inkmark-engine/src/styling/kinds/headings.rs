use crate::patterns::{find_atx_headings, find_setext_headings};
use crate::styling::StyleCtx;

/// Font scale per heading level; level 1 doubles the base size, level 6 is
/// barely above body text.
pub(crate) const HEADING_SCALES: [f32; 6] = [2.0, 1.7, 1.4, 1.25, 1.15, 1.05];

pub(crate) fn apply(ctx: &mut StyleCtx<'_>) {
    for m in find_atx_headings(ctx.slice(), ctx.range.start) {
        if ctx.in_fence(m.full.start) {
            continue;
        }
        let scale = HEADING_SCALES[usize::from(m.level - 1).min(5)];
        ctx.buf.attrs_mut().map_font(m.full, move |f| {
            f.bold = true;
            f.scale = scale;
        });
        ctx.mute_marker(m.marker);
    }

    for m in find_setext_headings(ctx.slice(), ctx.range.start) {
        if ctx.in_fence(m.full.start) {
            continue;
        }
        // Only `=` underlines are wired to a heading level; `-` underlined
        // titles are recognized but stay unstyled.
        if m.level != 1 {
            continue;
        }
        ctx.buf.attrs_mut().map_font(m.title, |f| {
            f.bold = true;
            f.scale = HEADING_SCALES[0];
        });
        ctx.mute_marker(m.underline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{StyledBuffer, span::Span};
    use crate::options::Options;
    use crate::styling::{PassScope, apply_styles};
    use crate::theme::Theme;

    fn style(text: &str, opts: &Options) -> StyledBuffer {
        let mut buf = StyledBuffer::from_str(text);
        apply_styles(
            &mut buf,
            text,
            Span::new(0, text.len()),
            &[],
            opts,
            &Theme::default(),
            PassScope::Incremental,
        );
        buf
    }

    #[test]
    fn level_one_heading_doubles_and_bolds() {
        let buf = style("# Header 1", &Options::default());
        let content = buf.attr_at(2).unwrap();
        assert!(content.font.bold);
        assert_eq!(content.font.scale, 2.0);
        let marker = buf.attr_at(0).unwrap();
        assert_eq!(marker.fg, Some(Theme::default().muted));
    }

    #[test]
    fn level_six_heading_scale() {
        let buf = style("###### six", &Options::default());
        assert_eq!(buf.attr_at(8).unwrap().font.scale, 1.05);
    }

    #[test]
    fn hidden_marker_when_hide_syntax() {
        let opts = Options {
            hide_syntax: true,
            ..Options::default()
        };
        let buf = style("# Header", &opts);
        let marker = buf.attr_at(0).unwrap();
        assert!(marker.hidden);
        assert_eq!(marker.fg, Some(crate::buffer::attrs::Color::TRANSPARENT));
        assert!(!buf.attr_at(2).unwrap().hidden);
    }

    #[test]
    fn setext_equals_styles_title() {
        let buf = style("Title\n=====", &Options::default());
        let title = buf.attr_at(0).unwrap();
        assert!(title.font.bold);
        assert_eq!(title.font.scale, 2.0);
        assert_eq!(buf.attr_at(6).unwrap().fg, Some(Theme::default().muted));
    }

    #[test]
    fn setext_dashes_stay_unstyled() {
        let buf = style("Title\n-----", &Options::default());
        let title = buf.attr_at(0).unwrap();
        assert!(!title.font.bold);
        assert_eq!(buf.attr_at(6).unwrap().fg, Some(Theme::default().body));
    }
}
