pub mod error;

pub use error::LexError;

use crate::token::{Literal, Span, Token, TokenKind};

/// Character-level scanner for Scribe source text.
///
/// Scanning never fails: unrecognized characters are recorded as `LexError`s
/// and skipped, so the token stream is always well formed and terminated by a
/// single EOF sentinel.
pub struct Lexer<'a> {
    source: &'a str,
    start: usize,
    current: usize,
    line: usize,
    tokens: Vec<Token<'a>>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scans the whole source, returning every token plus any lexical errors
    /// encountered along the way.
    pub fn scan(mut self) -> (Vec<Token<'a>>, Vec<LexError>) {
        while !self.is_eof() {
            self.start = self.current;
            self.scan_token();
        }

        let len = self.source.len();
        self.tokens.push(Token::new(
            TokenKind::Eof,
            None,
            Literal::Undefined,
            Span {
                start: len,
                end: len,
                line: self.line,
            },
        ));

        (self.tokens, self.errors)
    }

    fn scan_token(&mut self) {
        let c = self.step();

        match c {
            '#' => {
                while self.peek() != '\n' && !self.is_eof() {
                    self.step();
                }
            }

            '-' => {
                let kind = if self.step_if('>') {
                    TokenKind::Continue
                } else {
                    TokenKind::Minus
                };
                self.push_token(kind);
            }

            '=' => {
                let kind = if self.step_if('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                self.push_token(kind);
            }

            '>' => {
                let kind = if self.step_if('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                self.push_token(kind);
            }

            '<' => {
                let kind = if self.step_if('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                self.push_token(kind);
            }

            ' ' | '\r' | '\t' => {}

            '\n' => self.line += 1,

            '"' => self.string('"'),
            '\'' => self.string('\''),

            '$' => self.accessor(),

            c if c.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.identifier(),

            c => {
                if let Some(kind) = symbol_kind(c) {
                    self.push_token(kind);
                } else {
                    self.errors.push(LexError::UnexpectedCharacter {
                        character: c,
                        line: self.line,
                        start: self.start,
                        end: self.current,
                    });
                }
            }
        }
    }

    /// Consumes through the matching quote. Embedded newlines are legal and
    /// counted; the emitted literal is the raw content between the quotes.
    fn string(&mut self, quote: char) {
        while self.peek() != quote && !self.is_eof() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.step();
        }

        if self.is_eof() {
            self.errors.push(LexError::UnterminatedString {
                line: self.line,
                start: self.start,
                end: self.current,
            });
            return;
        }

        self.step(); // closing quote

        let content = &self.source[self.start + 1..self.current - 1];
        self.push_literal(TokenKind::String, Literal::String(content));
    }

    /// `$name` environment accessor. Whether it is a plain accessor or a
    /// macro call is decided by the parser, which peeks for a following `(`.
    fn accessor(&mut self) {
        while is_alphanumeric(self.peek()) {
            self.step();
        }

        self.push_token(TokenKind::Env);
    }

    /// Digits, an optional fraction, and an optional `s` suffix marking a
    /// seconds literal.
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.step();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.step();
            while self.peek().is_ascii_digit() {
                self.step();
            }
        }

        let (kind, digits) = if self.peek() == 's' {
            self.step();
            (TokenKind::Seconds, &self.source[self.start..self.current - 1])
        } else {
            (TokenKind::Number, &self.source[self.start..self.current])
        };

        match digits.parse::<f64>() {
            Ok(value) => {
                let literal = match kind {
                    TokenKind::Seconds => Literal::Seconds(value),
                    _ => Literal::Number(value),
                };
                self.push_literal(kind, literal);
            }
            Err(_) => self.errors.push(LexError::InvalidNumberLiteral {
                literal: digits.to_string(),
                line: self.line,
                start: self.start,
                end: self.current,
            }),
        }
    }

    fn identifier(&mut self) {
        while is_alphanumeric(self.peek()) {
            self.step();
        }

        let text = &self.source[self.start..self.current];
        let kind = keyword_kind(text).unwrap_or(TokenKind::Identifier);
        self.push_token(kind);
    }

    fn push_token(&mut self, kind: TokenKind) {
        self.push_literal(kind, Literal::Undefined);
    }

    fn push_literal(&mut self, kind: TokenKind, literal: Literal<'a>) {
        self.tokens.push(Token::new(
            kind,
            Some(&self.source[self.start..self.current]),
            literal,
            Span {
                start: self.start,
                end: self.current,
                line: self.line,
            },
        ));
    }

    fn is_eof(&self) -> bool {
        self.current >= self.source.len()
    }

    fn step(&mut self) -> char {
        let c = self.peek();
        self.current += c.len_utf8();
        c
    }

    /// Consumes the next character only if it matches.
    fn step_if(&mut self, expected: char) -> bool {
        if self.is_eof() || self.peek() != expected {
            return false;
        }

        self.current += expected.len_utf8();
        true
    }

    fn peek(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next().unwrap_or('\0')
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

fn keyword_kind(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "actor" => TokenKind::Actor,
        "and" => TokenKind::And,
        "default" => TokenKind::Default,
        "do" => TokenKind::Do,
        "echo" => TokenKind::Echo,
        "else" => TokenKind::Else,
        "exit" => TokenKind::Exit,
        "false" => TokenKind::False,
        "if" => TokenKind::If,
        "interact" => TokenKind::Interact,
        "not" => TokenKind::Not,
        "option" => TokenKind::Option,
        "property" => TokenKind::Property,
        "objective" => TokenKind::Objective,
        "or" => TokenKind::Or,
        "otherwise" => TokenKind::Otherwise,
        "trigger" => TokenKind::Trigger,
        "true" => TokenKind::True,
        "set" => TokenKind::Set,
        "scene" => TokenKind::Scene,
        "start" => TokenKind::Start,
        "store" => TokenKind::Store,
        "undefined" => TokenKind::Undefined,
        "with" => TokenKind::With,
        _ => return None,
    };

    Some(kind)
}

fn symbol_kind(c: char) -> Option<TokenKind> {
    let kind = match c {
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        '{' => TokenKind::LeftBrace,
        '}' => TokenKind::RightBrace,
        '[' => TokenKind::LeftBracket,
        ']' => TokenKind::RightBracket,
        '+' => TokenKind::Plus,
        '/' => TokenKind::Slash,
        '*' => TokenKind::Star,
        '^' => TokenKind::Exponent,
        '%' => TokenKind::Modulus,
        ',' => TokenKind::Comma,
        ':' => TokenKind::Colon,
        _ => return None,
    };

    Some(kind)
}

/// Scans `source` into an EOF-terminated token list plus any lexical errors.
pub fn tokenize(source: &str) -> (Vec<Token<'_>>, Vec<LexError>) {
    Lexer::new(source).scan()
}
