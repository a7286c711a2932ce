use lir::Register;

/// Registers currently holding the values of live subexpressions, most recent last.
/// Owned by a single code generation pass.
#[derive(Debug, Default)]
pub(crate) struct RegStack {
    regs: Vec<Register>,
}

impl RegStack {
    pub(crate) fn push(&mut self, reg: Register) {
        self.regs.push(reg);
    }

    pub(crate) fn pop(&mut self) -> Register {
        match self.regs.pop() {
            Some(reg) => reg,
            None => unreachable!("Internal Error: register stack underflow"),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }
}
