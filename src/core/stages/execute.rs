//! EX stage: ALU, operand forwarding, and control-flow resolution.
//!
//! This is the only stage that reads a latch other than its own input —
//! [`evaluate`] also reads `cpu.pipe.mem_wb_next`, because MEM has already
//! run earlier this same cycle (see [`crate::core::cpu::Cpu::tick`]) and may
//! have just computed the load value this very instruction needs forwarded.
//! Every other stage reads only its current input latch.

use crate::core::cpu::Cpu;
use crate::core::pipeline::forwarding::{self, ForwardSel};
use crate::core::pipeline::signals::{AluOp, BranchOp, JumpOp};

fn alu(op: AluOp, a: i32, b: i32) -> i32 {
    match op {
        AluOp::None => 0,
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => (a < b) as i32,
    }
}

/// Forwards a source operand for the *current* EX instruction, then applies
/// the single exception to normal forwarding: if the EX/MEM instruction
/// immediately ahead is itself a load, its data was not yet available to
/// forwarding (EX/MEM's `alu_result` holds the address, not the loaded
/// word) until MEM latched it into `mem_wb_next` earlier this cycle. When
/// that in-flight load writes the register this operand needs, its value
/// takes priority over whatever the forwarding unit chose from the
/// (one-cycle-stale) current EX/MEM/MEM-WB latches.
fn forward_with_inflight_load(
    sel: ForwardSel,
    reg: usize,
    fallback: i32,
    cpu: &Cpu,
) -> i32 {
    let ex_mem = &cpu.pipe.ex_mem;
    let mem_wb_next = &cpu.pipe.mem_wb_next;
    if ex_mem.valid
        && ex_mem.ctrl.mem_read
        && ex_mem.ctrl.reg_write
        && ex_mem.ctrl.dest_reg == reg as i32
        && reg != 0
        && mem_wb_next.valid
    {
        return mem_wb_next.mem_data;
    }
    forwarding::value_for(sel, fallback, ex_mem, &cpu.pipe.mem_wb)
}

/// Evaluates the EX stage for one cycle.
///
/// Reads only the *current* ID/EX latch (plus `mem_wb_next`, see module
/// docs); writes `cpu.pipe.ex_mem_next`, and on a taken branch or jump also
/// overwrites `pc_next` and flushes `if_id_next`/`id_ex_next` — both of
/// which IF and ID have already populated earlier this cycle with
/// instructions that must never be allowed to commit.
pub fn evaluate(cpu: &mut Cpu, pc_next: &mut i64) {
    let id_ex = cpu.pipe.id_ex.clone();
    if !id_ex.valid {
        return;
    }

    let decision = forwarding::resolve(&id_ex, &cpu.pipe.ex_mem, &cpu.pipe.mem_wb);
    let val_a = forward_with_inflight_load(decision.a, id_ex.rs, id_ex.val_rs, cpu);
    let val_b = forward_with_inflight_load(decision.b, id_ex.rt, id_ex.val_rt, cpu);

    let operand2 = if id_ex.ctrl.alu_src_imm {
        id_ex.imm
    } else {
        val_b
    };
    let mut alu_result = alu(id_ex.ctrl.alu_op, val_a, operand2);

    let branch_target = id_ex.pc + 1 + id_ex.imm as i64;
    let zero = alu_result == 0;

    let redirect = match id_ex.ctrl.branch {
        BranchOp::Beq if zero => Some(branch_target),
        BranchOp::Bne if !zero => Some(branch_target),
        _ => match id_ex.ctrl.jump {
            JumpOp::J => Some(id_ex.addr as i64),
            JumpOp::Jal => {
                alu_result = (id_ex.pc + 1) as i32;
                Some(id_ex.addr as i64)
            }
            JumpOp::Jr => Some(val_a as i64),
            JumpOp::None => None,
        },
    };

    let out = &mut cpu.pipe.ex_mem_next;
    out.alu_result = alu_result;
    out.val_rt = val_b;
    out.branch_target = branch_target;
    out.zero = zero;
    out.ctrl = id_ex.ctrl;
    out.raw_instr = id_ex.raw_instr;
    out.valid = true;

    if let Some(target) = redirect {
        if cpu.trace {
            eprintln!("EX  pc={} redirect -> {}", id_ex.pc, target);
        }
        *pc_next = target;
        cpu.pipe.if_id_next.valid = false;
        cpu.pipe.id_ex_next.valid = false;
        cpu.stats.flushes += 1;
    }
}
