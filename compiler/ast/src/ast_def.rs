use std::fmt::{Display, Formatter};

/// Defines AST datatypes

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Stmt {
    Expression(Expr),
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Expr {
    Number(i64),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

/// Fully parenthesised infix form, e.g. `(3 + (4 * 2))`
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(val) => write!(f, "{}", val),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nested() {
        let expr = Expr::binary(
            BinaryOp::Sub,
            Expr::binary(BinaryOp::Mul, Expr::Number(3), Expr::Number(4)),
            Expr::Number(2),
        );

        assert_eq!(expr.to_string(), "((3 * 4) - 2)");
        assert_eq!(Stmt::Expression(Expr::Number(9)).to_string(), "9");
    }
}
