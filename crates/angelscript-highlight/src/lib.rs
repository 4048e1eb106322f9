//! Highlight classification for AngelScript: maps semantic tokens from the
//! language server onto a closed category set, with a lexer-based fallback
//! and a spell-check gate driven by the same token model.

mod category;
mod classify;
mod fallback;
mod spellcheck;

pub use category::{HighlightCategory, HighlightSpan};
pub use classify::classify;
pub use fallback::{fallback_category, fallback_spans};
pub use spellcheck::should_spell_check;
