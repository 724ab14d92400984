pub mod buffer;
pub mod engine;
pub mod fences;
pub mod highlight;
pub mod options;
pub mod patterns;
pub mod styling;
pub mod theme;

// Re-export key types for easier usage
pub use buffer::{Edit, EngineError, StyledBuffer, attrs::*, span::Span};
pub use engine::StyleEngine;
pub use fences::{CodeBlock, find_code_blocks};
pub use highlight::{Highlighted, HighlightRun, Highlighter, MonospaceHighlighter};
pub use options::Options;
pub use styling::{PassScope, apply_styles};
pub use theme::Theme;
