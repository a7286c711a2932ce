use lexer::Token;
use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("unbalanced parenthesis: expected '(' before ')' at {line}:{col}")]
    UnmatchedCloseParen { line: i32, col: i32 },
    #[error("unbalanced parenthesis: expected ')' to close '(' at {line}:{col}")]
    UnclosedOpenParen { line: i32, col: i32 },
    #[error("malformed numeric literal '{literal}' at {line}:{col}: {reason}")]
    InvalidNumber {
        literal: String,
        reason: String,
        line: i32,
        col: i32,
    },
    #[error("unexpected character '{literal}' at {line}:{col}")]
    IllegalToken { literal: String, line: i32, col: i32 },
    #[error("unsupported operator '{literal}' at {line}:{col}: expected one of + - * /")]
    UnsupportedOperator { literal: String, line: i32, col: i32 },
    #[error("expected an operator, found '{literal}' at {line}:{col}")]
    UnexpectedOperand { literal: String, line: i32, col: i32 },
    #[error("missing operand for '{literal}' at {line}:{col}")]
    MissingOperand { literal: String, line: i32, col: i32 },
    #[error("expected a single expression, found {0}")]
    ExpectedSingleExpression(usize),
}

impl ParseError {
    pub fn is_unbalanced(&self) -> bool {
        matches!(
            self,
            ParseError::UnmatchedCloseParen { .. } | ParseError::UnclosedOpenParen { .. }
        )
    }

    pub(crate) fn unmatched_close(token: &Token) -> Self {
        ParseError::UnmatchedCloseParen {
            line: token.line,
            col: token.col,
        }
    }

    pub(crate) fn unclosed_open(token: &Token) -> Self {
        ParseError::UnclosedOpenParen {
            line: token.line,
            col: token.col,
        }
    }

    pub(crate) fn illegal(token: &Token) -> Self {
        ParseError::IllegalToken {
            literal: token.literal.clone(),
            line: token.line,
            col: token.col,
        }
    }

    pub(crate) fn unsupported(token: &Token) -> Self {
        ParseError::UnsupportedOperator {
            literal: token.literal.clone(),
            line: token.line,
            col: token.col,
        }
    }

    pub(crate) fn unexpected_operand(token: &Token) -> Self {
        ParseError::UnexpectedOperand {
            literal: token.literal.clone(),
            line: token.line,
            col: token.col,
        }
    }

    pub(crate) fn missing_operand(token: &Token) -> Self {
        ParseError::MissingOperand {
            literal: token.literal.clone(),
            line: token.line,
            col: token.col,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
