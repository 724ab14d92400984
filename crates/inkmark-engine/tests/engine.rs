//! End-to-end properties of the styling engine: full-pass idempotence,
//! incremental/full equivalence, and the documented attribute outcomes for
//! each construct.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use rstest::rstest;

use inkmark_engine::{
    Color, FontFamily, Highlighted, Highlighter, Options, StyleEngine, StyledBuffer, Theme,
};

fn full_pass(text: &str, engine: &StyleEngine) -> StyledBuffer {
    let mut buf = StyledBuffer::from_str(text);
    engine.process_initial(&mut buf);
    buf
}

/// Builds the document one character insertion at a time, reporting each
/// edit to the engine, the way a host editor would on live typing.
fn replay_insertions(text: &str, engine: &StyleEngine) -> StyledBuffer {
    let mut buf = StyledBuffer::new();
    for (i, ch) in text.char_indices() {
        let edit = buf.replace(i..i, &text[i..i + ch.len_utf8()]);
        engine.notify_edit(&mut buf, edit.range, edit.len_delta);
    }
    buf
}

#[rstest]
#[case::headings("# Header 1\n\nThis is **bold** text and *italic* too.\n")]
#[case::setext_and_blocks("Title\n=====\n\n- item one\n- item two\n\n> quoted line\n")]
#[case::fenced_code("```swift\nlet x = 42\n```\nafter `code` span\n")]
#[case::links_and_tags(
    "Visit https://example.com. #tag #42\n[docs](https://docs.rs \"Docs\")\n"
)]
#[case::strike_and_ticks("~~struck~~ and `multi `` ticks`\n")]
#[case::unclosed_fence("```rust\nlet half = typed\n")]
fn incremental_replay_matches_full_pass(#[case] text: &str) {
    let engine = StyleEngine::new(Options::default());
    let full = full_pass(text, &engine);
    let replayed = replay_insertions(text, &engine);
    assert_eq!(replayed.text(), full.text());
    assert_eq!(replayed.attr_runs(), full.attr_runs());
}

#[rstest]
fn incremental_replay_matches_full_pass_with_hidden_syntax() {
    let opts = Options {
        hide_syntax: true,
        ..Options::default()
    };
    let engine = StyleEngine::new(opts);
    let text = "# Head\n**b** `c`\n```\nx\n```\n";
    let full = full_pass(text, &engine);
    let replayed = replay_insertions(text, &engine);
    assert_eq!(replayed.attr_runs(), full.attr_runs());
}

#[test]
fn full_pass_is_idempotent() {
    let text = "# H\n**b** *i* `c`\n> q\n- l\n```py\nx=1\n```\nhttps://a.io. #t\n";
    let engine = StyleEngine::new(Options::default());
    let mut buf = StyledBuffer::from_str(text);
    engine.process_initial(&mut buf);
    let first = buf.attr_runs();
    engine.process_initial(&mut buf);
    assert_eq!(buf.attr_runs(), first);
}

#[test]
fn force_full_render_equals_process_initial() {
    let text = "# Same\n**thing**\n";
    let engine = StyleEngine::new(Options::default());
    let mut a = StyledBuffer::from_str(text);
    let mut b = StyledBuffer::from_str(text);
    engine.process_initial(&mut a);
    engine.force_full_render(&mut b);
    assert_eq!(a.attr_runs(), b.attr_runs());
}

#[test]
fn heading_scale_and_marker_color() {
    let engine = StyleEngine::new(Options::default());
    let buf = full_pass("# Header 1", &engine);
    let content = buf.attr_at(4).unwrap();
    assert!(content.font.bold);
    assert_eq!(content.font.scale, 2.0);
    for i in 0..2 {
        assert_eq!(buf.attr_at(i).unwrap().fg, Some(Theme::default().muted));
    }
}

#[test]
fn bold_trait_and_muted_delimiters() {
    let engine = StyleEngine::new(Options::default());
    let buf = full_pass("This is **bold** text", &engine);
    for i in 10..14 {
        assert!(buf.attr_at(i).unwrap().font.bold, "byte {i}");
    }
    for i in [8, 9, 14, 15] {
        assert_eq!(
            buf.attr_at(i).unwrap().fg,
            Some(Theme::default().muted),
            "byte {i}"
        );
    }
    assert!(!buf.attr_at(5).unwrap().font.bold);
}

#[test]
fn hidden_syntax_shrinks_delimiters() {
    let opts = Options {
        hide_syntax: true,
        ..Options::default()
    };
    let engine = StyleEngine::new(opts);
    let buf = full_pass("This is **bold** text", &engine);
    let delim = buf.attr_at(8).unwrap();
    assert!(delim.hidden);
    assert_eq!(delim.fg, Some(Color::TRANSPARENT));
    assert!(delim.font.scale < 0.1);
    assert!(!buf.attr_at(10).unwrap().hidden);
}

#[test]
fn code_span_font_background_and_ticks() {
    let engine = StyleEngine::new(Options::default());
    let buf = full_pass("`code`", &engine);
    let theme = Theme::default();
    for i in 0..6 {
        let cell = buf.attr_at(i).unwrap();
        assert_eq!(cell.font.family, FontFamily::Code);
        assert_eq!(cell.bg, Some(theme.code_bg));
    }
    assert_eq!(buf.attr_at(0).unwrap().fg, Some(theme.muted));
    assert_eq!(buf.attr_at(5).unwrap().fg, Some(theme.muted));
}

#[derive(Default)]
struct RecordingHighlighter {
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl Highlighter for RecordingHighlighter {
    fn highlight(&self, code: &str, language: Option<&str>) -> Highlighted {
        self.calls
            .lock()
            .unwrap()
            .push((code.to_string(), language.map(str::to_string)));
        Highlighted {
            text: code.to_string(),
            runs: Vec::new(),
        }
    }
}

#[test]
fn highlighter_receives_language_and_inner_content() {
    let recorder = Arc::new(RecordingHighlighter::default());
    let mut engine = StyleEngine::new(Options::default());
    engine.set_highlighter(recorder.clone());

    let mut buf = StyledBuffer::from_str("```swift\nlet x = 42\n```");
    engine.process_initial(&mut buf);

    let calls = recorder.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "let x = 42");
    assert_eq!(calls[0].1.as_deref(), Some("swift"));
}

struct LengthChangingHighlighter;

impl Highlighter for LengthChangingHighlighter {
    fn highlight(&self, code: &str, _language: Option<&str>) -> Highlighted {
        Highlighted {
            text: format!("{code}\n// injected"),
            runs: Vec::new(),
        }
    }
}

#[test]
fn length_changing_highlighter_never_alters_buffer() {
    let text = "```\ncode\n```\n";
    let mut engine = StyleEngine::new(Options::default());
    engine.set_highlighter(Arc::new(LengthChangingHighlighter));
    let mut buf = StyledBuffer::from_str(text);
    engine.process_initial(&mut buf);
    // The buffer text is untouched and the uniform code styling stands.
    assert_eq!(buf.text(), text);
    assert_eq!(buf.attr_at(4).unwrap().font.family, FontFamily::Code);
    assert_eq!(buf.attr_at(4).unwrap().fg, Some(Theme::default().body));
}

#[test]
fn autolink_target_strips_trailing_period() {
    let engine = StyleEngine::new(Options::default());
    let buf = full_pass("Visit https://example.com now.", &engine);
    let link = buf.attr_at(10).unwrap().link.clone();
    assert_eq!(link.as_deref(), Some("https://example.com"));
}

#[test]
fn numeric_hashtag_rejected_and_word_tag_linked() {
    let engine = StyleEngine::new(Options::default());
    let buf = full_pass("#42 #tag", &engine);
    assert_eq!(buf.attr_at(0).unwrap().link, None);
    let tag = buf.attr_at(4).unwrap();
    assert_eq!(tag.link.as_deref(), Some("tag:tag"));
    assert_eq!(tag.fg, Some(Theme::default().accent));
}

#[rstest]
#[case::empty("")]
#[case::whitespace("   \n\t \n")]
fn trivial_buffers_are_no_ops(#[case] text: &str) {
    let engine = StyleEngine::new(Options::default());
    let mut buf = StyledBuffer::from_str(text);
    engine.process_initial(&mut buf);
    engine.notify_edit(&mut buf, 0..0, 0);
    assert_eq!(buf.text(), text);
    assert_eq!(buf.len(), text.len());
}

#[test]
fn editing_away_bold_markers_clears_stale_attributes() {
    let engine = StyleEngine::new(Options::default());
    let mut buf = StyledBuffer::from_str("**bold**");
    engine.process_initial(&mut buf);
    assert!(buf.attr_at(3).unwrap().font.bold);

    // Delete the trailing delimiters; "**bold" is no longer bold.
    let edit = buf.replace(6..8, "");
    engine.notify_edit(&mut buf, edit.range, edit.len_delta);
    assert!(!buf.attr_at(3).unwrap().font.bold);
}

#[test]
fn deleting_a_backtick_clears_code_background() {
    let engine = StyleEngine::new(Options::default());
    let mut buf = StyledBuffer::from_str("`code`");
    engine.process_initial(&mut buf);
    assert!(buf.attr_at(2).unwrap().bg.is_some());

    let edit = buf.replace(5..6, "");
    engine.notify_edit(&mut buf, edit.range, edit.len_delta);
    assert_eq!(buf.attr_at(2).unwrap().bg, None);
}

#[test]
fn typing_the_closing_fence_restyles_the_block() {
    let engine = StyleEngine::new(Options::default());
    let mut buf = StyledBuffer::new();
    let typed = "```\n# not a heading\n``";
    for (i, ch) in typed.char_indices() {
        let edit = buf.replace(i..i, &typed[i..i + ch.len_utf8()]);
        engine.notify_edit(&mut buf, edit.range, edit.len_delta);
    }
    // Fence still open: the hash line was styled as a heading.
    assert!(buf.attr_at(6).unwrap().font.bold);

    let edit = buf.replace(22..22, "`");
    engine.notify_edit(&mut buf, edit.range, edit.len_delta);
    // Fence closed: the adapter reset the block to plain code styling.
    let cell = buf.attr_at(6).unwrap();
    assert!(!cell.font.bold);
    assert_eq!(cell.font.family, FontFamily::Code);
}

#[test]
fn swapping_the_highlighter_takes_effect_on_next_pass() {
    let text = "```\nx\n```\n";
    let mut engine = StyleEngine::new(Options::default());
    let mut buf = StyledBuffer::from_str(text);
    engine.process_initial(&mut buf);
    assert_eq!(buf.attr_at(4).unwrap().fg, Some(Theme::default().body));

    struct RedHighlighter;
    impl Highlighter for RedHighlighter {
        fn highlight(&self, code: &str, _language: Option<&str>) -> Highlighted {
            Highlighted {
                text: code.to_string(),
                runs: vec![inkmark_engine::HighlightRun {
                    range: 0..code.len(),
                    fg: Some(Color::rgb(200, 30, 30)),
                    bg: None,
                    bold: false,
                    italic: false,
                }],
            }
        }
    }

    engine.set_highlighter(Arc::new(RedHighlighter));
    engine.force_full_render(&mut buf);
    assert_eq!(buf.attr_at(4).unwrap().fg, Some(Color::rgb(200, 30, 30)));
}

#[test]
fn incremental_pass_only_touches_the_edited_paragraph() {
    let engine = StyleEngine::new(Options::default());
    let mut buf = StyledBuffer::from_str("# Heading\nbody text\n");
    engine.process_initial(&mut buf);
    let heading_runs: Vec<_> = (0..9).map(|i| buf.attr_at(i).unwrap().clone()).collect();

    let edit = buf.replace(15..15, "x");
    engine.notify_edit(&mut buf, edit.range, edit.len_delta);
    for (i, before) in heading_runs.iter().enumerate() {
        assert_eq!(buf.attr_at(i).unwrap(), before, "byte {i}");
    }
}

#[test]
fn setext_title_styles_while_typing_the_underline() {
    let engine = StyleEngine::new(Options::default());
    let text = "Title\n==";
    let full = full_pass(text, &engine);
    let replayed = replay_insertions(text, &engine);
    assert_eq!(replayed.attr_runs(), full.attr_runs());
    assert!(replayed.attr_at(0).unwrap().font.bold);
    assert_eq!(replayed.attr_at(0).unwrap().font.scale, 2.0);
}

#[test]
fn buffer_length_never_changes_across_passes() {
    let text = "# H\n```swift\nlet x = 1\n```\n**b** https://a.io.\n";
    let engine = StyleEngine::new(Options::default());
    let mut buf = StyledBuffer::from_str(text);
    engine.process_initial(&mut buf);
    assert_eq!(buf.len(), text.len());
    let edit = buf.replace(2..2, "i");
    engine.notify_edit(&mut buf, edit.range, edit.len_delta);
    assert_eq!(buf.len(), text.len() + 1);
    assert_eq!(buf.attrs().len(), buf.len());
}
