use ast::*;
use lexer::*;
use log::{debug, trace};

use crate::precedence::{shunting_yard, Sink};
use crate::{ParseError, ParseResult};

/// Builds expression trees out of a token stream with an operator-precedence scan
pub struct Parser {
    tokens: Vec<Token>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn parse(self) -> ParseResult<Vec<Stmt>> {
        let mut builder = TreeBuilder::default();
        shunting_yard(self.tokens, &mut builder)?;

        let mut output = builder.output;
        if output.len() != 1 {
            return Err(ParseError::ExpectedSingleExpression(output.len()));
        }

        let expr = output.remove(0);
        debug!("parsed expression {}", expr);

        Ok(vec![Stmt::Expression(expr)])
    }
}

pub fn parse(tokens: Vec<Token>) -> ParseResult<Vec<Stmt>> {
    Parser::new(tokens).parse()
}

#[derive(Default)]
struct TreeBuilder {
    output: Vec<Expr>,
}

impl Sink for TreeBuilder {
    fn operand(&mut self, token: Token) -> ParseResult<()> {
        if token.kind != TokenKind::Number {
            trace!("skipping {}", token);
            return Ok(());
        }

        let value = token
            .literal
            .parse::<i64>()
            .map_err(|err| ParseError::InvalidNumber {
                literal: token.literal.clone(),
                reason: err.to_string(),
                line: token.line,
                col: token.col,
            })?;

        self.output.push(Expr::Number(value));
        Ok(())
    }

    fn operator(&mut self, token: Token) -> ParseResult<()> {
        let op = get_binop(&token)?;

        let (Some(rhs), Some(lhs)) = (self.output.pop(), self.output.pop()) else {
            return Err(ParseError::missing_operand(&token));
        };

        trace!("reducing {} {} {}", lhs, op.symbol(), rhs);
        self.output.push(Expr::binary(op, lhs, rhs));
        Ok(())
    }
}

fn get_binop(token: &Token) -> ParseResult<BinaryOp> {
    match token.kind {
        TokenKind::Plus => Ok(BinaryOp::Add),
        TokenKind::Minus => Ok(BinaryOp::Sub),
        TokenKind::Star => Ok(BinaryOp::Mul),
        TokenKind::Slash => Ok(BinaryOp::Div),
        _ => Err(ParseError::unsupported(token)),
    }
}
