use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

use crate::patterns::{find_autolinks, find_inline_links};
use crate::styling::StyleCtx;

/// Characters escaped when falling back to percent-encoding a target that
/// is not a well-formed URL.
const TARGET_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// A well-formed URL is used verbatim; anything else is percent-encoded so
/// the host always receives an openable target.
pub(crate) fn resolve_target(raw: &str) -> String {
    if Url::parse(raw).is_ok() {
        raw.to_string()
    } else {
        utf8_percent_encode(raw, TARGET_ESCAPE).to_string()
    }
}

pub(crate) fn apply_autolinks(ctx: &mut StyleCtx<'_>) {
    for m in find_autolinks(ctx.slice(), ctx.range.start) {
        if ctx.in_fence(m.full.start) {
            continue;
        }
        let target = resolve_target(&m.target);
        ctx.buf.attrs_mut().set_link(m.link, &target);
    }
}

pub(crate) fn apply_inline_links(ctx: &mut StyleCtx<'_>) {
    for m in find_inline_links(ctx.slice(), ctx.range.start) {
        if ctx.in_fence(m.full.start) {
            continue;
        }
        let raw = &ctx.text[m.url.range()];
        let target = resolve_target(raw);
        // The link rides on the visible text, not on the URL characters;
        // the autolink pass already saw the URL inside the parens, so its
        // attribute is removed again here.
        ctx.buf.attrs_mut().update(m.paren, |c| c.link = None);
        ctx.buf.attrs_mut().set_link(m.text, &target);
        ctx.mute_marker(m.open_bracket);
        ctx.mute_marker(m.close_bracket);
        ctx.mute_marker(m.paren);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{StyledBuffer, span::Span};
    use crate::options::Options;
    use crate::styling::{PassScope, apply_styles};
    use crate::theme::Theme;

    fn style(text: &str) -> StyledBuffer {
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
        buf
    }

    #[test]
    fn resolve_keeps_well_formed_urls() {
        assert_eq!(
            resolve_target("https://example.com/a?b=1"),
            "https://example.com/a?b=1"
        );
    }

    #[test]
    fn resolve_encodes_malformed_targets() {
        assert_eq!(resolve_target("not a url"), "not%20a%20url");
    }

    #[test]
    fn autolink_target_drops_trailing_period() {
        let buf = style("Visit https://example.com now.");
        let link = buf.attr_at(10).unwrap().link.clone();
        assert_eq!(link.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn inline_link_attaches_to_visible_text() {
        let buf = style("[docs](https://docs.rs)");
        let text_cell = buf.attr_at(1).unwrap();
        assert_eq!(text_cell.link.as_deref(), Some("https://docs.rs"));
        // URL characters carry no link attribute, only muting.
        let url_cell = buf.attr_at(8).unwrap();
        assert_eq!(url_cell.link, None);
        assert_eq!(url_cell.fg, Some(Theme::default().muted));
        assert_eq!(buf.attr_at(0).unwrap().fg, Some(Theme::default().muted));
    }

    #[test]
    fn title_is_muted_but_not_part_of_target() {
        let buf = style(r#"[a](b "title")"#);
        assert_eq!(buf.attr_at(1).unwrap().link.as_deref(), Some("b"));
        assert_eq!(buf.attr_at(8).unwrap().fg, Some(Theme::default().muted));
    }
}
