use std::str::Chars;

use crate::token::*;

const EOF: char = '\0';

pub struct Lexer<'a> {
    /// Source Text
    source: &'a str,

    /// Remaining source characters
    chars: Chars<'a>,
    line: i32,
    col: i32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars(),
            line: 1,
            col: 1,
        }
    }

    /// Yields every token up to, but not including, `Eof`
    pub fn tokenize(&'a mut self) -> impl Iterator<Item = Token> + '_ {
        std::iter::from_fn(move || {
            let token = self.next_token();
            if token.kind != TokenKind::Eof {
                Some(token)
            } else {
                None
            }
        })
    }

    /// Scans the next token. Once the input is exhausted every call returns `Eof`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.offset();
        let line = self.line;
        let col = self.col;

        let c = match self.advance() {
            Some(c) => c,
            None => return Token::new(TokenKind::Eof, String::new(), start, start, line, col),
        };

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '^' => TokenKind::Carrot,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '=' => match self.peek() {
                '=' => {
                    self.advance();
                    TokenKind::Equal
                }
                _ => TokenKind::Assign,
            },
            '<' => match self.peek() {
                '=' => {
                    self.advance();
                    TokenKind::LessOrEqual
                }
                _ => TokenKind::Less,
            },
            '>' => match self.peek() {
                '=' => {
                    self.advance();
                    TokenKind::GreaterOrEqual
                }
                _ => TokenKind::Greater,
            },
            '!' => match self.peek() {
                '=' => {
                    self.advance();
                    TokenKind::NotEqual
                }
                _ => TokenKind::Bang,
            },
            '0'..='9' => self.number(),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier(start),
            _ => TokenKind::Illegal,
        };

        let end = self.offset();

        Token::new(
            kind,
            self.source[start..end].to_string(),
            start,
            end,
            line,
            col,
        )
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' => {
                    self.advance();
                    self.line += 1;
                    self.col = 1;
                }
                _ => break,
            }
        }
    }

    fn number(&mut self) -> TokenKind {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        TokenKind::Number
    }

    fn identifier(&mut self, start: usize) -> TokenKind {
        while self.peek().is_ascii_alphabetic() || self.peek() == '_' {
            self.advance();
        }

        if is_keyword(&self.source[start..self.offset()]) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        }
    }

    /// Get offset into source text
    fn offset(&self) -> usize {
        self.source.len() - self.chars.as_str().len()
    }

    fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.col += 1;

        Some(c)
    }
}
