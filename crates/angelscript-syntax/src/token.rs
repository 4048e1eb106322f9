use serde::Serialize;

/// AngelScript reserved words.
pub const KEYWORDS: &[&str] = &[
    "abstract", "and", "auto", "bool", "break", "case", "cast", "catch", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "explicit", "external", "false",
    "final", "float", "for", "foreach", "from", "funcdef", "function", "get", "if", "import",
    "in", "inout", "int", "int16", "int32", "int64", "int8", "interface", "is", "mixin",
    "namespace", "not", "null", "or", "out", "override", "private", "property", "protected",
    "return", "set", "shared", "super", "switch", "this", "true", "try", "typedef", "uint",
    "uint16", "uint32", "uint64", "uint8", "void", "while", "xor",
];

/// Lexical category of a token. Closed set; one variant per
/// operator/punctuation class, mirroring the editor's token model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    String,
    Comment,
    Whitespace,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    PowAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    ShiftRightArithAssign,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    And,
    Or,
    Not,
    Amp,
    BitOr,
    BitXor,
    BitNot,
    ShiftLeft,
    ShiftRight,
    ShiftRightArith,
    Inc,
    Dec,
    Question,
    Colon,
    Scope,
    Handle,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Comma,
    Semicolon,
    Dot,

    /// A character no rule recognizes. The scan continues after it.
    Unknown,
}

impl TokenKind {
    /// True for every operator and punctuation class.
    pub fn is_operator(self) -> bool {
        !matches!(
            self,
            TokenKind::Keyword
                | TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::Comment
                | TokenKind::Whitespace
                | TokenKind::Unknown
        )
    }
}

/// A classified span of source text. Spans index into the buffer the token
/// was lexed from; tokens are contiguous and non-overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub len: usize,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.start + self.len]
    }
}
