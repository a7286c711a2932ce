use ast::{BinaryOp, Expr, Stmt};
use lir::*;
use log::{trace, warn};

pub use crate::gen_err::CodegenError;
use crate::reg_stack::RegStack;

mod gen_err;
mod reg_stack;

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Emit `ADDR` for subtraction, matching the output of older tool versions
    pub sub_as_add: bool,
}

/// Assembly text plus every constraint violation found while producing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub text: String,
    pub errors: Vec<CodegenError>,
}

pub fn generate(stmts: &[Stmt]) -> Generated {
    generate_with(stmts, &Options::default())
}

pub fn generate_with(stmts: &[Stmt], options: &Options) -> Generated {
    let (prog, errors) = gen_assm(stmts, options);

    Generated {
        text: emission::render(&prog),
        errors,
    }
}

/// Lowers statements to register-machine instructions. Out-of-range immediates are
/// collected rather than aborting, so the program is always complete.
pub fn gen_assm(stmts: &[Stmt], options: &Options) -> (Program, Vec<CodegenError>) {
    let mut gen = Gen::new(options);

    for stmt in stmts {
        gen.gen_stmt(stmt);
    }

    (
        Program {
            instructions: gen.instructions,
        },
        gen.errors,
    )
}

struct Gen<'a> {
    options: &'a Options,
    instructions: Vec<Instruction>,
    errors: Vec<CodegenError>,
    regs: RegStack,
}

impl<'a> Gen<'a> {
    fn new(options: &'a Options) -> Self {
        Self {
            options,
            instructions: vec![],
            errors: vec![],
            regs: RegStack::default(),
        }
    }

    fn gen_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => {
                self.gen_operand(expr, Register::A);
                self.regs.pop();
            }
        }

        debug_assert!(self.regs.is_empty());
    }

    /// Leaves the value of `expr` in a register and pushes that register.
    /// Leaves are loaded into `leaf_reg`; binary results always land in `C`.
    fn gen_operand(&mut self, expr: &Expr, leaf_reg: Register) {
        match expr {
            Expr::Number(value) => {
                self.emit_mov(leaf_reg, *value);
                self.regs.push(leaf_reg);
            }
            Expr::Binary { op, lhs, rhs } => self.gen_binary(*op, lhs, rhs),
        }
    }

    fn gen_binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr) {
        self.gen_operand(lhs, Register::A);
        self.gen_operand(rhs, Register::B);

        let rhs = self.regs.pop();
        let lhs = self.regs.pop();
        let op = self.gen_arith(op);

        self.emit(Instruction::Arith {
            op,
            dest: Register::C,
            lhs,
            rhs,
        });

        self.regs.push(Register::C);
    }

    fn gen_arith(&self, op: BinaryOp) -> ArithOp {
        match op {
            BinaryOp::Add => ArithOp::AddR,
            BinaryOp::Sub if self.options.sub_as_add => ArithOp::AddR,
            BinaryOp::Sub => ArithOp::SubR,
            BinaryOp::Mul => ArithOp::MulR,
            BinaryOp::Div => ArithOp::DivR,
        }
    }

    fn emit_mov(&mut self, dest: Register, value: i64) {
        if !fits_immediate(value, IMMEDIATE_BITS) {
            let err = CodegenError::ImmediateOutOfRange {
                value,
                bits: IMMEDIATE_BITS,
                max: MAX_IMMEDIATE,
            };
            warn!("{}", err);
            self.errors.push(err);
        }

        self.emit(Instruction::Mov { dest, value });
    }

    fn emit(&mut self, instruction: Instruction) {
        trace!("emit {:?}", instruction);
        self.instructions.push(instruction);
    }
}
