use lexer::{Token, TokenKind};

use crate::{ParseError, ParseResult};

/// Binding power of every binary operator the scan recognises. Higher binds tighter.
pub(crate) fn get_precedence(kind: TokenKind) -> Option<i32> {
    match kind {
        TokenKind::Equal | TokenKind::NotEqual => Some(1),
        TokenKind::Less
        | TokenKind::LessOrEqual
        | TokenKind::Greater
        | TokenKind::GreaterOrEqual => Some(2),
        TokenKind::Plus | TokenKind::Minus => Some(3),
        TokenKind::Star | TokenKind::Slash => Some(4),
        TokenKind::Carrot => Some(5),
        _ => None,
    }
}

/// Receives operands and reduced operators from [`shunting_yard`] in postfix order
pub(crate) trait Sink {
    fn operand(&mut self, token: Token) -> ParseResult<()>;
    fn operator(&mut self, token: Token) -> ParseResult<()>;
}

/// Single left-to-right operator-precedence scan. All operators are left-associative:
/// the top of the operator stack is reduced while its precedence is `>=` the incoming one.
/// Operands and operators must alternate; `expect_operand` tracks which one comes next.
pub(crate) fn shunting_yard<S: Sink>(tokens: Vec<Token>, sink: &mut S) -> ParseResult<()> {
    let mut operators: Vec<Token> = vec![];
    let mut expect_operand = true;
    // operator still waiting for its right operand
    let mut trailing: Option<Token> = None;

    for token in tokens {
        match token.kind {
            TokenKind::Number | TokenKind::Ident => {
                if !expect_operand {
                    return Err(ParseError::unexpected_operand(&token));
                }
                sink.operand(token)?;
                expect_operand = false;
                trailing = None;
            }
            TokenKind::OpenParen => {
                if !expect_operand {
                    return Err(ParseError::unexpected_operand(&token));
                }
                operators.push(token);
            }
            TokenKind::CloseParen => {
                if expect_operand {
                    return Err(ParseError::missing_operand(trailing.as_ref().unwrap_or(&token)));
                }
                loop {
                    match operators.pop() {
                        Some(Token {
                            kind: TokenKind::OpenParen,
                            ..
                        }) => break,
                        Some(op) => sink.operator(op)?,
                        None => return Err(ParseError::unmatched_close(&token)),
                    }
                }
            }
            TokenKind::Illegal => return Err(ParseError::illegal(&token)),
            TokenKind::Eof => break,
            kind => match get_precedence(kind) {
                Some(prec) => {
                    if expect_operand {
                        return Err(ParseError::missing_operand(&token));
                    }
                    while operators
                        .last()
                        .and_then(|top| get_precedence(top.kind))
                        .is_some_and(|top_prec| top_prec >= prec)
                    {
                        if let Some(top) = operators.pop() {
                            sink.operator(top)?;
                        }
                    }
                    trailing = Some(token.clone());
                    operators.push(token);
                    expect_operand = true;
                }
                None => log::trace!("skipping {}", token),
            },
        }
    }

    if let Some(op) = trailing {
        return Err(ParseError::missing_operand(&op));
    }

    while let Some(op) = operators.pop() {
        if op.kind == TokenKind::OpenParen {
            return Err(ParseError::unclosed_open(&op));
        }
        sink.operator(op)?;
    }

    Ok(())
}
