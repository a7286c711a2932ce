/// Defines register-machine instruction datatypes

/// Width of an immediate operand field in bits
pub const IMMEDIATE_BITS: u32 = 9;

/// Largest value an immediate operand can hold: `0b111111111`
pub const MAX_IMMEDIATE: i64 = (1 << IMMEDIATE_BITS) - 1;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Load an immediate into a register
    Mov { dest: Register, value: i64 },
    Arith {
        op: ArithOp,
        dest: Register,
        lhs: Register,
        rhs: Register,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    AddR,
    SubR,
    MulR,
    DivR,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    A,
    B,
    C,
    M,
    BP,
    SP,
    PC,
    FLAGS,
}

impl Register {
    /// Panics on an ordinal outside `0..=7`, which can only come from an allocator bug
    pub fn from_ordinal(ordinal: u8) -> Register {
        match ordinal {
            0 => Register::A,
            1 => Register::B,
            2 => Register::C,
            3 => Register::M,
            4 => Register::BP,
            5 => Register::SP,
            6 => Register::PC,
            7 => Register::FLAGS,
            _ => panic!("unknown register {}", ordinal),
        }
    }
}

/// Whether `value` can be encoded as an unsigned immediate of `bits` width
pub fn fits_immediate(value: i64, bits: u32) -> bool {
    value >= 0 && value < (1 << bits)
}
