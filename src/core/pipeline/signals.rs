//! Pipeline control signals.
//!
//! This module defines the control word attached to an instruction once
//! decoded (module [`crate::core::stages::decode`]). The control word is the
//! single source of truth for what every downstream stage does with an
//! instruction — no stage re-inspects the opcode.

/// ALU operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AluOp {
    /// No ALU operation; result is always 0.
    #[default]
    None,
    Add,
    Sub,
    And,
    Or,
    Xor,
    Slt,
}

/// Conditional branch kind, resolved in EX.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BranchOp {
    #[default]
    None,
    Beq,
    Bne,
}

/// Unconditional control-transfer kind, resolved in EX.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum JumpOp {
    #[default]
    None,
    /// `j target` — transfer to `id_ex.addr`.
    J,
    /// `jr rs` — transfer to the (forwarded) value of `rs`.
    Jr,
    /// `jal target` — transfer to `id_ex.addr`, link `pc + 1` into `$31`.
    Jal,
}

/// Control signals generated during decode, carried alongside an
/// instruction through EX, MEM, and WB.
///
/// Decoding is a pure function of an [`crate::isa::Instruction`] (see
/// [`crate::core::stages::decode::control_for`]); rows this table omits
/// default to every boolean false, `alu_op = AluOp::None`, and
/// `dest_reg = -1`, so an unrecognized opcode — unreachable in practice
/// since the loader rejects unknown mnemonics — still decodes to an
/// inert no-op rather than an arbitrary write.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlSignals {
    pub reg_write: bool,
    pub mem_read: bool,
    pub mem_write: bool,
    pub mem_to_reg: bool,
    /// Selects `imm` over `val_rt` as the ALU's second operand.
    pub alu_src_imm: bool,
    pub alu_op: AluOp,
    pub branch: BranchOp,
    pub jump: JumpOp,
    /// Destination register index, or -1 if this instruction writes no
    /// register.
    pub dest_reg: i32,
}
