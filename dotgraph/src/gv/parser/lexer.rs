//! The Lexer implementation for the GraphViz file format.
//!
//! The lexer has no knowledge of the grammar. Keywords such as 'digraph' or
//! 'node' are returned as plain identifiers and the parser decides what they
//! mean from the context. The lexer never fails: unterminated strings yield
//! the text that was scanned, and characters that can't start a token are
//! returned as Illegal tokens for the parser to report.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Identifier,
    String,
    Number,
    Html,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Semicolon,
    Comma,
    Colon,
    Equal,
    Arrow,
    Illegal,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Eof => "end of input",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Html => "html string",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Equal => "'='",
            TokenKind::Arrow => "edge operator",
            TokenKind::Illegal => "illegal character",
        };
        f.write_str(name)
    }
}

/// A token and the location of its first character. Lines and columns
/// start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: &str, line: usize, col: usize) -> Self {
        Self {
            kind,
            value: value.to_string(),
            line,
            col,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Returns true if this is the unquoted identifier \p keyword.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Identifier && self.value == keyword
    }

    /// Returns true if the token can be used as an ID (a node name, a graph
    /// name or an attribute value).
    pub fn is_id(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::Html
        )
    }
}

#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    // Index of the character after 'ch'.
    pos: usize,
    ch: char,
    line: usize,
    col: usize,
    // One token of lookahead.
    peeked: Option<Token>,
}

impl Lexer {
    pub fn from_string(input: &str) -> Self {
        let chars = input.chars().collect();
        Lexer::new(chars)
    }

    pub fn new(input: Vec<char>) -> Self {
        let mut l = Self {
            input,
            pos: 0,
            ch: '\0',
            line: 1,
            col: 0,
            peeked: None,
        };
        l.read_char();
        l
    }

    fn at_eof(&self) -> bool {
        self.pos > self.input.len()
    }

    fn read_char(&mut self) {
        if self.at_eof() {
            return;
        }
        if self.ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        if self.pos < self.input.len() {
            self.ch = self.input[self.pos];
        } else {
            self.ch = '\0';
        }
        self.pos += 1;
    }

    /// Returns the character after 'ch' without consuming anything.
    fn peek_char(&self) -> char {
        self.input.get(self.pos).copied().unwrap_or('\0')
    }

    fn skip_whitespace(&mut self) -> bool {
        let mut changed = false;
        while !self.at_eof() && self.ch.is_whitespace() {
            self.read_char();
            changed = true;
        }
        changed
    }

    fn skip_line(&mut self) {
        while !self.at_eof() && self.ch != '\n' {
            self.read_char();
        }
    }

    fn skip_comment(&mut self) -> bool {
        if self.at_eof() {
            return false;
        }

        // Lines that start with '#' are the output of the C preprocessor.
        if self.ch == '#' && self.col == 1 {
            self.skip_line();
            return true;
        }

        if self.ch != '/' {
            return false;
        }

        match self.peek_char() {
            '/' => {
                self.skip_line();
                true
            }
            '*' => {
                // Consume the '/*'.
                self.read_char();
                self.read_char();
                let mut prev = '\0';
                while !self.at_eof() {
                    if prev == '*' && self.ch == '/' {
                        self.read_char();
                        return true;
                    }
                    prev = self.ch;
                    self.read_char();
                }
                true
            }
            _ => false,
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while !self.at_eof() && (self.ch.is_alphanumeric() || self.ch == '_') {
            result.push(self.ch);
            self.read_char();
        }
        result
    }

    fn read_number(&mut self) -> String {
        let mut result = String::new();
        let mut period = false;
        while !self.at_eof() && (self.ch.is_ascii_digit() || self.ch == '.') {
            // Only allow one period in each number.
            if self.ch == '.' {
                if period {
                    break;
                }
                period = true;
            }
            result.push(self.ch);
            self.read_char();
        }
        result
    }

    /// Returns true if a number starts at the current character.
    fn at_number(&self) -> bool {
        self.ch.is_ascii_digit()
            || (self.ch == '.' && self.peek_char().is_ascii_digit())
    }

    fn read_string(&mut self) -> String {
        let mut result = String::new();
        // Consume the opening quote.
        self.read_char();
        while !self.at_eof() {
            match self.ch {
                '"' => {
                    self.read_char();
                    break;
                }
                '\\' => {
                    // Consume the escape character.
                    self.read_char();
                    if self.at_eof() {
                        break;
                    }
                    let ch = match self.ch {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    };
                    result.push(ch);
                    self.read_char();
                }
                ch => {
                    result.push(ch);
                    self.read_char();
                }
            }
        }
        result
    }

    fn read_html(&mut self) -> String {
        let mut result = String::new();
        let mut bracket_balance = 1;
        // Consume the opening '<'.
        self.read_char();
        while !self.at_eof() {
            if self.ch == '<' {
                bracket_balance += 1;
            } else if self.ch == '>' {
                bracket_balance -= 1;
                if bracket_balance == 0 {
                    self.read_char();
                    break;
                }
            }
            result.push(self.ch);
            self.read_char();
        }
        result
    }

    /// Returns the next token without consuming it.
    pub fn peek_token(&mut self) -> &Token {
        let tok = self.next_token();
        self.peeked.insert(tok)
    }

    /// Consumes and returns the next token. After the end of the input this
    /// keeps returning Eof tokens.
    pub fn next_token(&mut self) -> Token {
        match self.peeked.take() {
            Some(tok) => tok,
            None => self.scan_token(),
        }
    }

    /// Reads the next token from the input. A '-' that does not start an edge
    /// operator or a negative number becomes an Illegal token, which the
    /// parser reports as an unexpected character.
    fn scan_token(&mut self) -> Token {
        while self.skip_comment() || self.skip_whitespace() {}

        let line = self.line;
        let col = self.col;
        let make = |kind: TokenKind, value: &str| Token::new(kind, value, line, col);

        if self.at_eof() {
            return make(TokenKind::Eof, "");
        }

        let kind = match self.ch {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '=' => TokenKind::Equal,
            '"' => {
                let s = self.read_string();
                return make(TokenKind::String, &s);
            }
            '<' => {
                let s = self.read_html();
                return make(TokenKind::Html, &s);
            }
            '-' => {
                match self.peek_char() {
                    '>' | '-' => {
                        let mut arrow = String::from('-');
                        self.read_char();
                        arrow.push(self.ch);
                        self.read_char();
                        return make(TokenKind::Arrow, &arrow);
                    }
                    _ => {}
                }
                // Not an edge operator, try to read a negative number.
                self.read_char();
                if !self.at_eof() && self.at_number() {
                    let mut num = String::from('-');
                    num.push_str(&self.read_number());
                    return make(TokenKind::Number, &num);
                }
                return make(TokenKind::Illegal, "-");
            }
            _ => {
                if self.at_number() {
                    let num = self.read_number();
                    return make(TokenKind::Number, &num);
                }
                if self.ch.is_alphabetic() || self.ch == '_' {
                    let name = self.read_identifier();
                    return make(TokenKind::Identifier, &name);
                }
                TokenKind::Illegal
            }
        };

        let value = self.ch.to_string();
        self.read_char();
        make(kind, &value)
    }
}

#[cfg(test)]
fn kinds(input: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::from_string(input);
    let mut result = Vec::new();
    loop {
        let tok = lexer.next_token();
        result.push(tok.kind);
        if tok.is(TokenKind::Eof) {
            return result;
        }
    }
}

#[test]
fn test_positions() {
    let mut lexer = Lexer::from_string("digraph {\n  a -> b\n}");
    let t = lexer.next_token();
    assert_eq!((t.line, t.col), (1, 1));
    let t = lexer.next_token();
    assert_eq!((t.kind, t.line, t.col), (TokenKind::LBrace, 1, 9));
    let t = lexer.next_token();
    assert_eq!((t.value.as_str(), t.line, t.col), ("a", 2, 3));
    let t = lexer.next_token();
    assert_eq!((t.value.as_str(), t.line, t.col), ("->", 2, 5));
    let t = lexer.next_token();
    assert_eq!((t.line, t.col), (2, 8));
    let t = lexer.next_token();
    assert_eq!((t.kind, t.line, t.col), (TokenKind::RBrace, 3, 1));
    assert!(lexer.next_token().is(TokenKind::Eof));
    assert!(lexer.next_token().is(TokenKind::Eof));
}

#[test]
fn test_peek_does_not_consume() {
    let mut lexer = Lexer::from_string("a b");
    assert_eq!(lexer.peek_token().value, "a");
    assert_eq!(lexer.peek_token().value, "a");
    assert_eq!(lexer.next_token().value, "a");
    assert_eq!(lexer.peek_token().value, "b");
    assert_eq!(lexer.next_token().value, "b");
    assert!(lexer.peek_token().is(TokenKind::Eof));
}

#[test]
fn test_comments() {
    let input = "/* block\n comment */ a // line\n# 1 \"file.dot\"\nb";
    let mut lexer = Lexer::from_string(input);
    let a = lexer.next_token();
    assert_eq!((a.value.as_str(), a.line, a.col), ("a", 2, 13));
    let b = lexer.next_token();
    assert_eq!((b.value.as_str(), b.line, b.col), ("b", 4, 1));
    assert!(lexer.next_token().is(TokenKind::Eof));

    // An unterminated block comment runs to the end of the input.
    assert_eq!(kinds("a /* b c"), vec![TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn test_strings() {
    let mut lexer = Lexer::from_string(r#""a\"b\\c\nd\qe" "open"#);
    let t = lexer.next_token();
    assert_eq!(t.kind, TokenKind::String);
    assert_eq!(t.value, "a\"b\\c\ndqe");
    // Unterminated strings keep what was read.
    let t = lexer.next_token();
    assert_eq!((t.kind, t.value.as_str()), (TokenKind::String, "open"));
    assert!(lexer.next_token().is(TokenKind::Eof));
}

#[test]
fn test_html() {
    let mut lexer = Lexer::from_string("<<b>bold</b>> <x");
    let t = lexer.next_token();
    assert_eq!((t.kind, t.value.as_str()), (TokenKind::Html, "<b>bold</b>"));
    let t = lexer.next_token();
    assert_eq!((t.kind, t.value.as_str()), (TokenKind::Html, "x"));
}

#[test]
fn test_numbers_and_arrows() {
    let mut lexer = Lexer::from_string("-1.5.3 .5 -.25 a--b - x");
    let expected = [
        (TokenKind::Number, "-1.5"),
        (TokenKind::Number, ".3"),
        (TokenKind::Number, ".5"),
        (TokenKind::Number, "-.25"),
        (TokenKind::Identifier, "a"),
        (TokenKind::Arrow, "--"),
        (TokenKind::Identifier, "b"),
        (TokenKind::Illegal, "-"),
        (TokenKind::Identifier, "x"),
        (TokenKind::Eof, ""),
    ];
    for (kind, value) in expected.iter() {
        let t = lexer.next_token();
        assert_eq!((t.kind, t.value.as_str()), (*kind, *value));
    }
}

#[test]
fn test_punctuation_and_illegal() {
    assert_eq!(
        kinds("{}[]();,:= @"),
        vec![
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Colon,
            TokenKind::Equal,
            TokenKind::Illegal,
            TokenKind::Eof,
        ]
    );
}
