use std::fmt::{Display, Formatter};

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(String),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub start: usize,
    pub end: usize,
    pub line: i32,
    pub col: i32,
}

impl Token {
    pub(crate) fn new(
        kind: TokenKind,
        literal: String,
        start: usize,
        end: usize,
        line: i32,
        col: i32,
    ) -> Self {
        Self {
            kind,
            literal,
            start,
            end,
            line,
            col,
        }
    }

    /// Lexical error carried by an `Illegal` token, if any
    pub fn error(&self) -> Option<LexError> {
        match self.kind {
            TokenKind::Illegal => Some(LexError::UnexpectedChar(self.literal.clone())),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} '{}' at {}:{}",
            self.kind, self.literal, self.line, self.col
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Number,
    Ident,
    Keyword,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Carrot,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    Equal,
    NotEqual,
    Bang,
    Assign,

    // Grouping
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,

    // Separators
    Comma,
    Semicolon,

    // Informational
    Illegal,
    Eof,
}

pub const KEYWORDS: [&str; 8] = ["let", "fn", "return", "and", "or", "if", "else", "while"];

pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}
