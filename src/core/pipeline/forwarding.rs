//! EX-stage operand forwarding.
//!
//! The forwarding unit is a pure function from the three pipeline latches
//! visible to EX (ID/EX, EX/MEM, MEM/WB) to a pair of source-operand
//! selectors. It never stalls the pipeline — every hazard it can't resolve
//! falls to the hazard unit (module [`super::hazards`]) instead.

use super::latches::{ExMem, IdEx, MemWb};

/// Selects where an EX operand's value comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardSel {
    /// Use the value already latched in ID/EX.
    None,
    /// Forward the ALU result just produced by the instruction ahead in
    /// EX/MEM — the nearer producer, so this takes priority over MEM/WB.
    FromExMem,
    /// Forward the committing value from MEM/WB.
    FromMemWb,
}

/// The forwarding decision for both EX source operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForwardingDecision {
    pub a: ForwardSel,
    pub b: ForwardSel,
}

fn select_for(reg: usize, ex_mem: &ExMem, mem_wb: &MemWb) -> ForwardSel {
    if reg == 0 {
        return ForwardSel::None;
    }
    if ex_mem.valid && ex_mem.ctrl.reg_write && ex_mem.ctrl.dest_reg == reg as i32 {
        return ForwardSel::FromExMem;
    }
    if mem_wb.valid && mem_wb.ctrl.reg_write && mem_wb.ctrl.dest_reg == reg as i32 {
        return ForwardSel::FromMemWb;
    }
    ForwardSel::None
}

/// Resolves forwarding for the ID/EX instruction's two source registers
/// against the current EX/MEM and MEM/WB latches.
///
/// EX/MEM dominates MEM/WB: a value the instruction immediately ahead just
/// computed is always fresher than one a registers-ago instruction is
/// writing back.
pub fn resolve(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb) -> ForwardingDecision {
    ForwardingDecision {
        a: select_for(id_ex.rs, ex_mem, mem_wb),
        b: select_for(id_ex.rt, ex_mem, mem_wb),
    }
}

/// Resolves a forwarding selector to a concrete value, given the ID/EX
/// latch's own (un-forwarded) value as the fallback.
pub fn value_for(sel: ForwardSel, fallback: i32, ex_mem: &ExMem, mem_wb: &MemWb) -> i32 {
    match sel {
        ForwardSel::None => fallback,
        ForwardSel::FromExMem => ex_mem.alu_result,
        ForwardSel::FromMemWb => {
            if mem_wb.ctrl.mem_to_reg {
                mem_wb.mem_data
            } else {
                mem_wb.alu_result
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::signals::ControlSignals;

    fn producer_ex_mem(dest: i32) -> ExMem {
        ExMem {
            valid: true,
            alu_result: 99,
            ctrl: ControlSignals {
                reg_write: true,
                dest_reg: dest,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn ex_mem_takes_priority_over_mem_wb() {
        let id_ex = IdEx {
            rs: 3,
            ..Default::default()
        };
        let ex_mem = producer_ex_mem(3);
        let mem_wb = MemWb {
            valid: true,
            alu_result: 7,
            ctrl: ControlSignals {
                reg_write: true,
                dest_reg: 3,
                ..Default::default()
            },
            ..Default::default()
        };
        let decision = resolve(&id_ex, &ex_mem, &mem_wb);
        assert_eq!(decision.a, ForwardSel::FromExMem);
    }

    #[test]
    fn falls_back_to_mem_wb_when_no_ex_mem_producer() {
        let id_ex = IdEx {
            rt: 5,
            ..Default::default()
        };
        let ex_mem = ExMem::default();
        let mem_wb = MemWb {
            valid: true,
            mem_data: 42,
            ctrl: ControlSignals {
                reg_write: true,
                mem_to_reg: true,
                dest_reg: 5,
                ..Default::default()
            },
            ..Default::default()
        };
        let decision = resolve(&id_ex, &ex_mem, &mem_wb);
        assert_eq!(decision.b, ForwardSel::FromMemWb);
        assert_eq!(value_for(decision.b, -1, &ex_mem, &mem_wb), 42);
    }

    #[test]
    fn zero_register_never_forwarded() {
        let id_ex = IdEx {
            rs: 0,
            ..Default::default()
        };
        let ex_mem = producer_ex_mem(0);
        let mem_wb = MemWb::default();
        let decision = resolve(&id_ex, &ex_mem, &mem_wb);
        assert_eq!(decision.a, ForwardSel::None);
    }
}
