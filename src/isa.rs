//! MIPS-I integer instruction set: the decoded record carried through the
//! pipeline.
//!
//! The core never sees raw machine words. It operates entirely on
//! [`Instruction`] values produced by the assembly loader (module [`crate::sim::loader`]).

/// Operations supported by the integer subset this simulator models.
///
/// An unrecognized opcode never reaches [`Instruction`] in practice — the
/// loader rejects unknown mnemonics before constructing one — but
/// [`Opcode::decode_control`] still defaults unhandled variants to an
/// all-false, no-op control word, so a future variant added here without a
/// matching decode arm fails safe rather than panicking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Opcode {
    /// No operation.
    #[default]
    Nop,
    /// `add rd, rs, rt`
    Add,
    /// `sub rd, rs, rt`
    Sub,
    /// `and rd, rs, rt`
    And,
    /// `or rd, rs, rt`
    Or,
    /// `xor rd, rs, rt`
    Xor,
    /// `slt rd, rs, rt`
    Slt,
    /// `jr rs`
    Jr,
    /// `addi rt, rs, imm`
    Addi,
    /// `andi rt, rs, imm`
    Andi,
    /// `ori rt, rs, imm`
    Ori,
    /// `lw rt, imm(rs)`
    Lw,
    /// `sw rt, imm(rs)`
    Sw,
    /// `beq rs, rt, target`
    Beq,
    /// `bne rs, rt, target`
    Bne,
    /// `j target`
    J,
    /// `jal target`
    Jal,
}

/// A decoded instruction, as produced by the assembly loader and carried
/// through the pipeline latches.
///
/// Register indices (`rs`, `rt`, `rd`) are always in `[0, 31]`; index 0
/// denotes the hardwired zero register. `imm` is already sign-extended.
/// `addr` holds an absolute jump target (an instruction index, not a byte
/// address) and is meaningful only for `J`/`Jal`. `raw_text` is preserved
/// purely for inspection (pipeline dumps, debugging) and has no bearing on
/// execution semantics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instruction {
    pub op: Opcode,
    pub rs: usize,
    pub rt: usize,
    pub rd: usize,
    pub imm: i32,
    pub addr: i32,
    pub raw_text: String,
}

impl Instruction {
    /// Builds a bare NOP with no operands, used for bubbles and defaults.
    pub fn nop() -> Self {
        Self::default()
    }
}
