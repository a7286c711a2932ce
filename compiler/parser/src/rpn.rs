use itertools::Itertools;
use lexer::Token;

use crate::precedence::{shunting_yard, Sink};
use crate::ParseResult;

/// Reorders an infix token stream into postfix (reverse Polish) order.
/// Operands are passed through undecoded; identifiers are kept.
pub fn to_rpn(tokens: Vec<Token>) -> ParseResult<Vec<Token>> {
    let mut queue = RpnQueue::default();
    shunting_yard(tokens, &mut queue)?;

    Ok(queue.output)
}

/// Space separated literals, e.g. `3 4 2 * +`
pub fn format_rpn(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.literal.as_str()).join(" ")
}

#[derive(Default)]
struct RpnQueue {
    output: Vec<Token>,
}

impl Sink for RpnQueue {
    fn operand(&mut self, token: Token) -> ParseResult<()> {
        self.output.push(token);
        Ok(())
    }

    fn operator(&mut self, token: Token) -> ParseResult<()> {
        self.output.push(token);
        Ok(())
    }
}
