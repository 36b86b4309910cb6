//! Inter-stage pipeline latches.
//!
//! Each latch exists twice: a *current* value read by stages this cycle and
//! a *next* value written by stages this cycle. At the end of [`tick`], next
//! overwrites current atomically. A latch with `valid == false` is
//! semantically a bubble — it must never cause an architectural state
//! change when consumed downstream.
//!
//! [`tick`]: crate::core::cpu::Cpu::tick

use crate::isa::Instruction;

use super::signals::ControlSignals;

/// IF/ID latch: fetch to decode.
#[derive(Clone, Debug, Default)]
pub struct IfId {
    pub pc: i64,
    pub raw_instr: Instruction,
    pub valid: bool,
}

/// ID/EX latch: decode to execute.
#[derive(Clone, Debug, Default)]
pub struct IdEx {
    pub pc: i64,
    pub val_rs: i32,
    pub val_rt: i32,
    pub imm: i32,
    pub addr: i32,
    pub rs: usize,
    pub rt: usize,
    pub ctrl: ControlSignals,
    pub raw_instr: Instruction,
    pub valid: bool,
}

/// EX/MEM latch: execute to memory.
#[derive(Clone, Debug, Default)]
pub struct ExMem {
    pub alu_result: i32,
    pub val_rt: i32,
    pub branch_target: i64,
    pub zero: bool,
    pub ctrl: ControlSignals,
    pub raw_instr: Instruction,
    pub valid: bool,
}

/// MEM/WB latch: memory to writeback.
#[derive(Clone, Debug, Default)]
pub struct MemWb {
    pub alu_result: i32,
    pub mem_data: i32,
    pub ctrl: ControlSignals,
    pub raw_instr: Instruction,
    pub valid: bool,
}

/// The four inter-stage latches, each held as a current/next pair.
///
/// `clear_next` resets every `*_next` slot to a bubble; it is called once
/// per cycle before any stage runs (see [`Cpu::tick`](crate::core::cpu::Cpu::tick)),
/// so a stage that does nothing this cycle produces a bubble by omission
/// rather than by an explicit write.
#[derive(Clone, Debug, Default)]
pub struct PipelineRegisters {
    pub if_id: IfId,
    pub if_id_next: IfId,
    pub id_ex: IdEx,
    pub id_ex_next: IdEx,
    pub ex_mem: ExMem,
    pub ex_mem_next: ExMem,
    pub mem_wb: MemWb,
    pub mem_wb_next: MemWb,
}

impl PipelineRegisters {
    /// Clears all four `*_next` latches to the bubble value.
    pub fn clear_next(&mut self) {
        self.if_id_next = IfId::default();
        self.id_ex_next = IdEx::default();
        self.ex_mem_next = ExMem::default();
        self.mem_wb_next = MemWb::default();
    }

    /// Promotes every `*_next` latch into `current`, atomically from the
    /// caller's perspective (no stage observes a partially-promoted state).
    pub fn promote(&mut self) {
        self.if_id = std::mem::take(&mut self.if_id_next);
        self.id_ex = std::mem::take(&mut self.id_ex_next);
        self.ex_mem = std::mem::take(&mut self.ex_mem_next);
        self.mem_wb = std::mem::take(&mut self.mem_wb_next);
    }

    /// Clears every latch (current and next) to a bubble. Used by
    /// `load_program`/`reset`.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// True iff every latch is currently a bubble — one half of the halted
    /// condition (see [`Cpu::is_halted`](crate::core::cpu::Cpu::is_halted)).
    pub fn all_bubbles(&self) -> bool {
        !self.if_id.valid && !self.id_ex.valid && !self.ex_mem.valid && !self.mem_wb.valid
    }
}
