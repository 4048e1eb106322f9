use crate::token::{KEYWORDS, Token, TokenKind};

/// Lexes the whole buffer eagerly. Convenience wrapper over [`Lexer`].
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// A restartable scanner over an immutable source buffer.
///
/// The lexer never fails: unterminated strings and comments produce a single
/// best-effort token spanning to end-of-line or end-of-file, and characters
/// outside the grammar come out as [`TokenKind::Unknown`]. Re-scanning is a
/// matter of constructing a new `Lexer` over the same buffer.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { source, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    /// Consumes `literal` when the input continues with it. All multi-char
    /// operators are ASCII, so byte-length advancement is safe here.
    fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    fn scan_whitespace(&mut self) -> TokenKind {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
        TokenKind::Whitespace
    }

    fn scan_comment(&mut self) -> TokenKind {
        if self.eat("//") {
            // To end of line; the newline joins the following whitespace token.
            match self.rest().find('\n') {
                Some(offset) => self.pos += offset,
                None => self.pos = self.source.len(),
            }
        } else {
            self.eat("/*");
            // Non-nesting; an unterminated block comment runs to end-of-file.
            match self.rest().find("*/") {
                Some(offset) => self.pos += offset + 2,
                None => self.pos = self.source.len(),
            }
        }
        TokenKind::Comment
    }

    fn scan_string(&mut self, quote: char) -> TokenKind {
        if quote == '"' && self.rest().starts_with("\"\"\"") {
            // Heredoc: """...""", may span lines; unterminated runs to EOF.
            self.pos += 3;
            match self.rest().find("\"\"\"") {
                Some(offset) => self.pos += offset + 3,
                None => self.pos = self.source.len(),
            }
            return TokenKind::String;
        }
        self.pos += 1;
        while let Some(ch) = self.peek() {
            match ch {
                '\\' => {
                    self.pos += 1;
                    if let Some(escaped) = self.peek() {
                        self.pos += escaped.len_utf8();
                    }
                }
                '\n' => break, // unterminated; recover at end of line
                _ => {
                    self.pos += ch.len_utf8();
                    if ch == quote {
                        break;
                    }
                }
            }
        }
        TokenKind::String
    }

    fn eat_digits(&mut self, radix: u32) {
        while let Some(ch) = self.peek() {
            if ch.is_digit(radix) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        if self.eat("0x") || self.eat("0X") {
            self.eat_digits(16);
            return TokenKind::Number;
        }
        if self.eat("0b") || self.eat("0B") {
            self.eat_digits(2);
            return TokenKind::Number;
        }
        if self.eat("0o") || self.eat("0O") {
            self.eat_digits(8);
            return TokenKind::Number;
        }
        self.eat_digits(10);
        if self.peek() == Some('.') && self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
            self.eat_digits(10);
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let mut lookahead = 1;
            if matches!(self.peek_byte(1), Some(b'+' | b'-')) {
                lookahead = 2;
            }
            if self.peek_byte(lookahead).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += lookahead;
                self.eat_digits(10);
            }
        }
        if matches!(self.peek(), Some('f' | 'F')) {
            self.pos += 1;
        }
        TokenKind::Number
    }

    fn scan_word(&mut self) -> TokenKind {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == '_' || ch.is_ascii_alphanumeric() {
                self.pos += 1;
            } else {
                break;
            }
        }
        if KEYWORDS.contains(&&self.source[start..self.pos]) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        }
    }

    /// Operators, maximal munch: each arm tries the longest spelling first.
    fn scan_symbol(&mut self, ch: char) -> TokenKind {
        let start = self.pos;
        let kind = match ch {
            '+' if self.eat("++") => TokenKind::Inc,
            '+' if self.eat("+=") => TokenKind::AddAssign,
            '+' => TokenKind::Plus,
            '-' if self.eat("--") => TokenKind::Dec,
            '-' if self.eat("-=") => TokenKind::SubAssign,
            '-' => TokenKind::Minus,
            '*' if self.eat("**=") => TokenKind::PowAssign,
            '*' if self.eat("**") => TokenKind::StarStar,
            '*' if self.eat("*=") => TokenKind::MulAssign,
            '*' => TokenKind::Star,
            '/' if self.eat("/=") => TokenKind::DivAssign,
            '/' => TokenKind::Slash,
            '%' if self.eat("%=") => TokenKind::ModAssign,
            '%' => TokenKind::Percent,
            '=' if self.eat("==") => TokenKind::Equal,
            '=' => TokenKind::Assign,
            '!' if self.eat("!=") => TokenKind::NotEqual,
            '!' => TokenKind::Not,
            '<' if self.eat("<<=") => TokenKind::ShiftLeftAssign,
            '<' if self.eat("<<") => TokenKind::ShiftLeft,
            '<' if self.eat("<=") => TokenKind::LessThanOrEqual,
            '<' => TokenKind::LessThan,
            '>' if self.eat(">>>=") => TokenKind::ShiftRightArithAssign,
            '>' if self.eat(">>>") => TokenKind::ShiftRightArith,
            '>' if self.eat(">>=") => TokenKind::ShiftRightAssign,
            '>' if self.eat(">>") => TokenKind::ShiftRight,
            '>' if self.eat(">=") => TokenKind::GreaterThanOrEqual,
            '>' => TokenKind::GreaterThan,
            '&' if self.eat("&&") => TokenKind::And,
            '&' if self.eat("&=") => TokenKind::AndAssign,
            '&' => TokenKind::Amp,
            '|' if self.eat("||") => TokenKind::Or,
            '|' if self.eat("|=") => TokenKind::OrAssign,
            '|' => TokenKind::BitOr,
            '^' if self.eat("^=") => TokenKind::XorAssign,
            '^' => TokenKind::BitXor,
            '~' => TokenKind::BitNot,
            '?' => TokenKind::Question,
            ':' if self.eat("::") => TokenKind::Scope,
            ':' => TokenKind::Colon,
            '@' => TokenKind::Handle,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            _ => TokenKind::Unknown,
        };
        // Single-char spellings (and Unknown) fall through without an `eat`.
        if self.pos == start {
            self.pos += ch.len_utf8();
        }
        kind
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let start = self.pos;
        let ch = self.peek()?;
        let kind = if ch.is_whitespace() {
            self.scan_whitespace()
        } else if ch == '/' && matches!(self.peek_byte(1), Some(b'/' | b'*')) {
            self.scan_comment()
        } else if ch == '"' || ch == '\'' {
            self.scan_string(ch)
        } else if ch.is_ascii_digit() {
            self.scan_number()
        } else if ch == '.' && self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()) {
            self.scan_number()
        } else if ch == '_' || ch.is_ascii_alphabetic() {
            self.scan_word()
        } else {
            self.scan_symbol(ch)
        };
        Some(Token {
            kind,
            start,
            len: self.pos - start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).iter().map(|t| t.kind).collect()
    }

    fn assert_reconstructs(source: &str) {
        let tokens = tokenize(source);
        let mut cursor = 0;
        for token in &tokens {
            assert_eq!(token.start, cursor, "gap or overlap in {source:?}");
            assert!(token.len > 0, "empty token in {source:?}");
            cursor += token.len;
        }
        assert_eq!(cursor, source.len(), "tokens do not cover {source:?}");
        let rebuilt: String = tokens.iter().map(|t| t.text(source)).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn covers_and_reconstructs_typical_source() {
        assert_reconstructs(
            "class Foo : Bar {\n    int count = 0x1F;\n    void Tick(float dt) {\n        count += 1; // per frame\n    }\n}\n",
        );
        assert_reconstructs("/* block */ string s = \"a\\\"b\" + 'c';");
        assert_reconstructs("float pi = 3.14f; double e = 2.718e0; auto half = .5;");
        assert_reconstructs("");
        assert_reconstructs("émoji € in § source");
    }

    #[test]
    fn keywords_and_identifiers() {
        let source = "class MyClass int counter";
        let tokens = tokenize(source);
        let words: Vec<(TokenKind, &str)> = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| (t.kind, t.text(source)))
            .collect();
        assert_eq!(
            words,
            vec![
                (TokenKind::Keyword, "class"),
                (TokenKind::Identifier, "MyClass"),
                (TokenKind::Keyword, "int"),
                (TokenKind::Identifier, "counter"),
            ]
        );
    }

    #[test]
    fn maximal_munch_prefers_longest_operator() {
        assert_eq!(kinds(">>>="), vec![TokenKind::ShiftRightArithAssign]);
        assert_eq!(kinds(">>>"), vec![TokenKind::ShiftRightArith]);
        assert_eq!(kinds(">>"), vec![TokenKind::ShiftRight]);
        assert_eq!(kinds(">="), vec![TokenKind::GreaterThanOrEqual]);
        assert_eq!(kinds("++"), vec![TokenKind::Inc]);
        assert_eq!(
            kinds("+ +"),
            vec![TokenKind::Plus, TokenKind::Whitespace, TokenKind::Plus]
        );
        assert_eq!(kinds("**="), vec![TokenKind::PowAssign]);
        assert_eq!(kinds("::"), vec![TokenKind::Scope]);
        assert_eq!(kinds("&&"), vec![TokenKind::And]);
        assert_eq!(kinds("&="), vec![TokenKind::AndAssign]);
        assert_eq!(kinds("+="), vec![TokenKind::AddAssign]);
    }

    #[test]
    fn number_literal_forms() {
        for source in ["42", "0x1F", "0b1010", "0o17", "3.14", "3.14f", "1e-3", "2.5E+10", ".5"] {
            assert_eq!(kinds(source), vec![TokenKind::Number], "for {source:?}");
        }
        // Trailing dot is a member access, not part of the number.
        assert_eq!(kinds("1."), vec![TokenKind::Number, TokenKind::Dot]);
    }

    #[test]
    fn string_literal_forms() {
        assert_eq!(kinds("\"hello\""), vec![TokenKind::String]);
        assert_eq!(kinds("'h'"), vec![TokenKind::String]);
        assert_eq!(kinds("\"a\\\"b\""), vec![TokenKind::String]);
        assert_eq!(kinds("\"\"\"multi\nline\"\"\""), vec![TokenKind::String]);
    }

    #[test]
    fn no_concatenation_across_quote_styles() {
        let source = "\"a\"'b'";
        let tokens = tokenize(source);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text(source), "\"a\"");
        assert_eq!(tokens[1].text(source), "'b'");
    }

    #[test]
    fn unterminated_string_recovers_at_end_of_line() {
        let source = "\"open\nint x;";
        let tokens = tokenize(source);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text(source), "\"open");
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_reconstructs(source);
    }

    #[test]
    fn unterminated_block_comment_recovers_at_end_of_file() {
        let source = "int x; /* trailing";
        let tokens = tokenize(source);
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Comment);
        assert_eq!(last.text(source), "/* trailing");
        assert_reconstructs(source);
    }

    #[test]
    fn unterminated_heredoc_recovers_at_end_of_file() {
        let source = "s = \"\"\"open\nnever closed";
        let tokens = tokenize(source);
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::String);
        assert_eq!(last.text(source), "\"\"\"open\nnever closed");
    }

    #[test]
    fn line_comment_without_trailing_newline() {
        let source = "// last line";
        assert_eq!(kinds(source), vec![TokenKind::Comment]);
        assert_reconstructs(source);
    }

    #[test]
    fn block_comments_do_not_nest() {
        let source = "/* outer /* inner */ x";
        let tokens = tokenize(source);
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text(source), "/* outer /* inner */");
    }

    #[test]
    fn unknown_characters_are_single_tokens() {
        assert_eq!(
            kinds("#€"),
            vec![TokenKind::Unknown, TokenKind::Unknown]
        );
        assert_reconstructs("a # b € c");
    }

    #[test]
    fn rescanning_is_deterministic() {
        let source = "void f() { return 1 + 2; }";
        let first: Vec<Token> = Lexer::new(source).collect();
        let second: Vec<Token> = Lexer::new(source).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn operator_kinds_report_as_operators() {
        for token in tokenize("a += b && c[0] ?: d::e;") {
            match token.kind {
                TokenKind::Identifier | TokenKind::Number | TokenKind::Whitespace => {
                    assert!(!token.kind.is_operator())
                }
                kind => assert!(kind.is_operator(), "{kind:?} should be an operator"),
            }
        }
    }
}
