use std::sync::Arc;

use super::span::Span;

/// Font scale applied to syntax markers in hide-syntax mode. The characters
/// stay in the buffer; they are rendered unreadably small and transparent.
pub const HIDDEN_SCALE: f32 = 0.01;

/// An RGBA color. Hosts map this onto whatever color type they render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
}

/// Which configured font a run of text renders with. The concrete family
/// names live in [`crate::Options`]; the buffer only records the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    Base,
    Code,
}

/// Font descriptor for one byte of the buffer.
///
/// `scale` multiplies the host's base point size, so a level-1 heading is
/// `2.0` and hidden syntax is [`HIDDEN_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontStyle {
    pub family: FontFamily,
    pub bold: bool,
    pub italic: bool,
    pub scale: f32,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            family: FontFamily::Base,
            bold: false,
            italic: false,
            scale: 1.0,
        }
    }
}

/// The full attribute set carried by one byte of the buffer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharAttrs {
    pub font: FontStyle,
    /// Foreground color; `None` means the host default.
    pub fg: Option<Color>,
    /// Background color; `None` means no fill.
    pub bg: Option<Color>,
    /// Link target, shared across the covered range.
    pub link: Option<Arc<str>>,
    pub strikethrough: bool,
    /// Rendered invisibly (hide-syntax mode). The byte itself is untouched.
    pub hidden: bool,
}

/// A coalesced run of identical attributes, for host rendering and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrRun {
    pub span: Span,
    pub attrs: CharAttrs,
}

/// One [`CharAttrs`] cell per byte of the buffer text.
///
/// Every range argument is clamped to the map's length before use, so
/// delimiter-adjacent arithmetic at the buffer edges can never fault.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttrMap {
    cells: Vec<CharAttrs>,
}

impl AttrMap {
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![CharAttrs::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, offset: usize) -> Option<&CharAttrs> {
        self.cells.get(offset)
    }

    fn cells_in(&mut self, span: Span) -> &mut [CharAttrs] {
        let span = span.clamp_to(self.cells.len());
        &mut self.cells[span.range()]
    }

    /// Applies `f` to every cell in `span`.
    pub fn update(&mut self, span: Span, f: impl Fn(&mut CharAttrs)) {
        for cell in self.cells_in(span) {
            f(cell);
        }
    }

    pub fn set_font(&mut self, span: Span, font: FontStyle) {
        self.update(span, |c| c.font = font);
    }

    /// Adjusts fonts in place, preserving traits `f` does not touch. Used to
    /// layer e.g. a bold trait onto text that already carries a heading scale.
    pub fn map_font(&mut self, span: Span, f: impl Fn(&mut FontStyle)) {
        self.update(span, |c| f(&mut c.font));
    }

    pub fn set_fg(&mut self, span: Span, color: Color) {
        self.update(span, |c| c.fg = Some(color));
    }

    pub fn set_bg(&mut self, span: Span, color: Color) {
        self.update(span, |c| c.bg = Some(color));
    }

    pub fn set_link(&mut self, span: Span, target: &str) {
        let target: Arc<str> = Arc::from(target);
        self.update(span, |c| c.link = Some(target.clone()));
    }

    pub fn set_strikethrough(&mut self, span: Span) {
        self.update(span, |c| c.strikethrough = true);
    }

    /// Renders a range invisibly: hidden flag, transparent foreground, and a
    /// near-zero font scale. The bytes themselves are untouched.
    pub fn hide(&mut self, span: Span) {
        self.update(span, |c| {
            c.hidden = true;
            c.fg = Some(Color::TRANSPARENT);
            c.font.scale = HIDDEN_SCALE;
        });
    }

    /// Resets fonts in `span` to the base font, dropping bold/italic traits
    /// and any scale.
    pub fn reset_fonts(&mut self, span: Span) {
        self.update(span, |c| c.font = FontStyle::default());
    }

    /// Clears attributes that must not survive an edit which removed their
    /// markers: link, strikethrough, hidden flag, and background fill.
    pub fn clear_decorations(&mut self, span: Span) {
        self.update(span, |c| {
            c.link = None;
            c.strikethrough = false;
            c.hidden = false;
            c.bg = None;
        });
    }

    /// Resets every cell to the default attribute state.
    pub fn reset_all(&mut self) {
        for cell in &mut self.cells {
            *cell = CharAttrs::default();
        }
    }

    /// Replaces the cells covering `span` with `new_len` default cells,
    /// keeping the map aligned with a host edit of the text.
    pub fn splice(&mut self, span: Span, new_len: usize) {
        let span = span.clamp_to(self.cells.len());
        drop(
            self.cells
                .splice(span.range(), std::iter::repeat_n(CharAttrs::default(), new_len)),
        );
    }

    /// Coalesces adjacent identical cells into runs.
    pub fn runs(&self) -> Vec<AttrRun> {
        let mut out = Vec::new();
        let mut iter = self.cells.iter().enumerate();
        let Some((_, first)) = iter.next() else {
            return out;
        };
        let mut run_start = 0;
        let mut current = first;
        for (i, cell) in iter {
            if cell != current {
                out.push(AttrRun {
                    span: Span::new(run_start, i),
                    attrs: current.clone(),
                });
                run_start = i;
                current = cell;
            }
        }
        out.push(AttrRun {
            span: Span::new(run_start, self.cells.len()),
            attrs: current.clone(),
        });
        out
    }
}
