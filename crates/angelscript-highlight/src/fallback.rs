use angelscript_syntax::{Lexer, TokenKind};

use crate::category::{HighlightCategory, HighlightSpan};

/// Lexer-only classification, used whenever no current semantic-token data
/// is available. Identifiers stay unclassified; the semantic stream is the
/// only thing that can tell a class name from a variable.
pub fn fallback_category(kind: TokenKind) -> Option<HighlightCategory> {
    match kind {
        TokenKind::Keyword => Some(HighlightCategory::Keyword),
        TokenKind::String => Some(HighlightCategory::String),
        TokenKind::Comment => Some(HighlightCategory::Comment),
        TokenKind::Number => Some(HighlightCategory::Number),
        kind if kind.is_operator() => Some(HighlightCategory::Operator),
        _ => None,
    }
}

/// Scans `source` and produces fallback highlight spans. Synchronous and
/// pure; safe to call on every render while a server round-trip is pending.
pub fn fallback_spans(source: &str) -> Vec<HighlightSpan> {
    Lexer::new(source)
        .filter_map(|token| {
            fallback_category(token.kind).map(|category| HighlightSpan {
                category,
                start: token.start as u32,
                length: token.len as u32,
            })
        })
        .collect()
}
