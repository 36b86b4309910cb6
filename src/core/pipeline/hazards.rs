//! Load-use hazard detection.
//!
//! The hazard unit is the single source of pipeline stalls in this design —
//! every other data hazard is resolved by forwarding (module
//! [`super::forwarding`]). It is a pure function of the *current* ID/EX and
//! IF/ID latches.

use crate::isa::Opcode;

use super::latches::{IdEx, IfId};

/// Whether an instruction with the given opcode reads `rs` as a source
/// operand. True for every opcode except `J`/`Jal` (which read no
/// registers) and `Nop`.
fn reads_rs(op: Opcode) -> bool {
    !matches!(op, Opcode::Nop | Opcode::J | Opcode::Jal)
}

/// Whether an instruction with the given opcode reads `rt` as a source
/// operand.
///
/// True for the R-type ALU ops, `Beq`/`Bne`, and `Sw` (which reads `rt` as
/// the value to store). False for `Jr` (reads only `rs`) and for the
/// I-type ops that use `rt` as a *destination* rather than a source.
fn reads_rt(op: Opcode) -> bool {
    matches!(
        op,
        Opcode::Add
            | Opcode::Sub
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Slt
            | Opcode::Beq
            | Opcode::Bne
            | Opcode::Sw
    )
}

/// Detects a load-use hazard: the *current* ID/EX holds a load whose
/// destination the *current* IF/ID instruction reads as a source.
///
/// Returns `true` iff a stall is needed this cycle. A source register index
/// of 0 never causes a stall — the zero register is never truly read.
pub fn need_stall(id_ex: &IdEx, if_id: &IfId) -> bool {
    if !id_ex.valid || !if_id.valid {
        return false;
    }

    if !(id_ex.ctrl.mem_read && id_ex.ctrl.reg_write) {
        return false;
    }

    let load_dest = id_ex.ctrl.dest_reg;
    if load_dest <= 0 {
        return false;
    }
    let load_dest = load_dest as usize;

    let op = if_id.raw_instr.op;
    let rs_hazard = reads_rs(op) && if_id.raw_instr.rs == load_dest;
    let rt_hazard = reads_rt(op) && if_id.raw_instr.rt == load_dest;

    rs_hazard || rt_hazard
}
