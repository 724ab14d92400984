use serde::{Deserialize, Serialize};

/// Immutable engine configuration, snapshotted at construction.
///
/// A host that changes options builds a new engine and calls
/// [`crate::StyleEngine::force_full_render`] to refresh the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Base point size; every [`crate::buffer::attrs::FontStyle::scale`] is a
    /// multiplier over this.
    pub base_font_size: f32,
    /// Family the host renders for [`crate::buffer::attrs::FontFamily::Base`].
    pub base_font_family: String,
    /// Family the host renders for [`crate::buffer::attrs::FontFamily::Code`].
    pub code_font_family: String,
    /// Render markdown markers invisibly instead of muted.
    pub hide_syntax: bool,
    /// Style `#hashtags` as tag links.
    pub inline_tags: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_font_size: 16.0,
            base_font_family: "system-ui".to_string(),
            code_font_family: "monospace".to_string(),
            hide_syntax: false,
            inline_tags: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let opts = Options::default();
        assert_eq!(opts.base_font_size, 16.0);
        assert!(!opts.hide_syntax);
        assert!(opts.inline_tags);
    }
}
