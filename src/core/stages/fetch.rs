//! IF stage: advance fetch unless stalled.

use crate::core::cpu::Cpu;

/// Evaluates the IF stage for one cycle.
///
/// Reads only `cpu.pc` and the *current* `if_id` latch; writes only
/// `cpu.pipe.if_id_next` and `pc_next`. Control-flow redirects resolved
/// later this same cycle in EX take precedence over the sequential update
/// computed here by overwriting `pc_next` and invalidating `if_id_next`
/// after this function has already run (see
/// [`crate::core::stages::execute::evaluate`]).
pub fn evaluate(cpu: &mut Cpu, pc_next: &mut i64, stall: bool) {
    if stall {
        cpu.pipe.if_id_next = cpu.pipe.if_id.clone();
        *pc_next = cpu.pc;
        return;
    }

    let pc = cpu.pc;
    if pc < 0 || pc as usize >= cpu.program.len() {
        cpu.pipe.if_id_next.valid = false;
        *pc_next = pc;
        return;
    }

    cpu.pipe.if_id_next.pc = pc;
    cpu.pipe.if_id_next.raw_instr = cpu.program[pc as usize].clone();
    cpu.pipe.if_id_next.valid = true;

    *pc_next = pc + 1;
}
