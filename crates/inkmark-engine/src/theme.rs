use crate::buffer::attrs::Color;

/// The color roles a styling pass assigns. Hosts supply their own palette or
/// use the built-in light one.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Ordinary body text.
    pub body: Color,
    /// Markdown markers when not hidden.
    pub muted: Color,
    /// Tag links.
    pub accent: Color,
    /// Blockquote body text.
    pub quote_body: Color,
    /// Fill behind code spans and fenced blocks.
    pub code_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            body: Color::rgb(33, 33, 33),
            muted: Color::rgb(160, 160, 160),
            accent: Color::rgb(0, 122, 255),
            quote_body: Color::rgb(110, 110, 110),
            code_bg: Color::rgb(242, 242, 240),
        }
    }
}
