//! ID stage: decode and register read.
//!
//! Decoding is expressed as a static match over [`Opcode`] so that an
//! unhandled variant is statically detectable rather than falling through
//! silent default logic (see [`control_for`]).

use crate::core::cpu::Cpu;
use crate::core::pipeline::signals::{AluOp, BranchOp, ControlSignals, JumpOp};
use crate::isa::Opcode;

/// Decodes the control signals for an opcode. Pure function, no side
/// effects — the single source of truth for what every downstream stage
/// does with an instruction.
///
/// Rows this match omits (there are none left to omit in this ISA subset,
/// but `Opcode` derives `Default = Nop` and `Nop`'s arm is the same
/// all-false word a future unhandled opcode would need) default to
/// `reg_write = false`, every other bool false, `alu_op = AluOp::None`,
/// `dest_reg = -1`.
pub fn control_for(op: Opcode, rd: usize, rt: usize) -> ControlSignals {
    match op {
        Opcode::Add => ControlSignals {
            reg_write: true,
            alu_op: AluOp::Add,
            dest_reg: rd as i32,
            ..Default::default()
        },
        Opcode::Sub => ControlSignals {
            reg_write: true,
            alu_op: AluOp::Sub,
            dest_reg: rd as i32,
            ..Default::default()
        },
        Opcode::And => ControlSignals {
            reg_write: true,
            alu_op: AluOp::And,
            dest_reg: rd as i32,
            ..Default::default()
        },
        Opcode::Or => ControlSignals {
            reg_write: true,
            alu_op: AluOp::Or,
            dest_reg: rd as i32,
            ..Default::default()
        },
        Opcode::Xor => ControlSignals {
            reg_write: true,
            alu_op: AluOp::Xor,
            dest_reg: rd as i32,
            ..Default::default()
        },
        Opcode::Slt => ControlSignals {
            reg_write: true,
            alu_op: AluOp::Slt,
            dest_reg: rd as i32,
            ..Default::default()
        },
        Opcode::Jr => ControlSignals {
            jump: JumpOp::Jr,
            ..Default::default()
        },
        Opcode::Addi => ControlSignals {
            reg_write: true,
            alu_src_imm: true,
            alu_op: AluOp::Add,
            dest_reg: rt as i32,
            ..Default::default()
        },
        Opcode::Andi => ControlSignals {
            reg_write: true,
            alu_src_imm: true,
            alu_op: AluOp::And,
            dest_reg: rt as i32,
            ..Default::default()
        },
        Opcode::Ori => ControlSignals {
            reg_write: true,
            alu_src_imm: true,
            alu_op: AluOp::Or,
            dest_reg: rt as i32,
            ..Default::default()
        },
        Opcode::Lw => ControlSignals {
            reg_write: true,
            mem_read: true,
            mem_to_reg: true,
            alu_src_imm: true,
            alu_op: AluOp::Add,
            dest_reg: rt as i32,
            ..Default::default()
        },
        Opcode::Sw => ControlSignals {
            mem_write: true,
            alu_src_imm: true,
            alu_op: AluOp::Add,
            ..Default::default()
        },
        Opcode::Beq => ControlSignals {
            alu_op: AluOp::Sub,
            branch: BranchOp::Beq,
            ..Default::default()
        },
        Opcode::Bne => ControlSignals {
            alu_op: AluOp::Sub,
            branch: BranchOp::Bne,
            ..Default::default()
        },
        Opcode::J => ControlSignals {
            jump: JumpOp::J,
            ..Default::default()
        },
        Opcode::Jal => ControlSignals {
            reg_write: true,
            jump: JumpOp::Jal,
            dest_reg: 31,
            ..Default::default()
        },
        Opcode::Nop => ControlSignals::default(),
    }
}

/// Reads a register, applying the same-cycle MEM/WB bypass: if the
/// *current* MEM/WB latch is valid, writes a register, and its
/// `dest_reg == idx` (and `idx != 0`), the not-yet-committed writeback
/// value is returned in place of the array value. This is the "write-first"
/// register-file timing of classic MIPS, made explicit here because the
/// register file itself commits only at the end of the cycle.
fn read_with_bypass(cpu: &Cpu, idx: usize) -> i32 {
    let mem_wb = &cpu.pipe.mem_wb;
    if mem_wb.valid && mem_wb.ctrl.reg_write && mem_wb.ctrl.dest_reg == idx as i32 && idx != 0 {
        if mem_wb.ctrl.mem_to_reg {
            mem_wb.mem_data
        } else {
            mem_wb.alu_result
        }
    } else {
        cpu.regs.read(idx)
    }
}

/// Evaluates the ID stage for one cycle.
///
/// Reads only the *current* IF/ID latch and the register file (with the
/// bypass above); writes only `cpu.pipe.id_ex_next`.
pub fn evaluate(cpu: &mut Cpu, stall: bool) {
    if stall || !cpu.pipe.if_id.valid {
        cpu.pipe.id_ex_next.valid = false;
        return;
    }

    let in_latch = cpu.pipe.if_id.clone();
    let instr = in_latch.raw_instr.clone();

    let val_rs = read_with_bypass(cpu, instr.rs);
    let val_rt = read_with_bypass(cpu, instr.rt);
    let ctrl = control_for(instr.op, instr.rd, instr.rt);

    let out = &mut cpu.pipe.id_ex_next;
    out.pc = in_latch.pc;
    out.val_rs = val_rs;
    out.val_rt = val_rt;
    out.imm = instr.imm;
    out.addr = instr.addr;
    out.rs = instr.rs;
    out.rt = instr.rt;
    out.ctrl = ctrl;
    out.raw_instr = instr;
    out.valid = true;
}
