//! Bridges the external language server's semantic-token stream to editor
//! highlight spans. Tracks a monotonic version per open document, discards
//! stale responses, and falls back to lexer-derived highlighting whenever no
//! current semantic data is available.

mod bridge;
mod session;

pub use bridge::HighlightBridge;
pub use session::{
    NullSession, SemanticToken, SemanticTokenSource, SessionError, StdioSession,
};
