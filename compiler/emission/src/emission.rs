use std::fs::File;
use std::io::{BufWriter, Write};

use lir::*;

type IOResult = std::io::Result<()>;

pub fn output(path: &str, assm: &Program) -> IOResult {
    let output = File::create(path)?;
    let mut writer = BufWriter::new(output);

    emit(&mut writer, assm)?;

    writer.flush()
}

/// Writes one `<MNEMONIC> <operands>` line per instruction
pub fn emit<W: Write>(writer: &mut W, assm: &Program) -> IOResult {
    for instruction in &assm.instructions {
        writeln!(writer, "{}", show_instruction(instruction))?;
    }

    Ok(())
}

pub fn render(assm: &Program) -> String {
    assm.instructions
        .iter()
        .map(|instruction| format!("{}\n", show_instruction(instruction)))
        .collect()
}

fn show_instruction(instruction: &Instruction) -> String {
    match instruction {
        Instruction::Mov { dest, value } => {
            format!("MOV {}, {}", show_reg(*dest), show_immediate(*value))
        }
        Instruction::Arith { op, dest, lhs, rhs } => format!(
            "{} {}, {}, {}",
            show_arith(op),
            show_reg(*dest),
            show_reg(*lhs),
            show_reg(*rhs)
        ),
    }
}

fn show_arith(op: &ArithOp) -> &'static str {
    match op {
        ArithOp::AddR => "ADDR",
        ArithOp::SubR => "SUBR",
        ArithOp::MulR => "MULR",
        ArithOp::DivR => "DIVR",
    }
}

pub fn show_reg(reg: Register) -> &'static str {
    match reg {
        Register::A => "A",
        Register::B => "B",
        Register::C => "C",
        Register::M => "M",
        Register::BP => "BP",
        Register::SP => "SP",
        Register::PC => "PC",
        Register::FLAGS => "FLAGS",
    }
}

fn show_immediate(value: i64) -> String {
    format!("#{}", value)
}
