//! Lexical analysis for AngelScript source text.
//!
//! The lexer is total: every character of the input belongs to exactly one
//! token, malformed constructs recover instead of failing, and concatenating
//! the token spans in order reconstructs the input.

mod lexer;
mod token;

pub use lexer::{Lexer, tokenize};
pub use token::{KEYWORDS, Token, TokenKind};
