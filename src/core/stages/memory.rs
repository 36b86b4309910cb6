//! MEM stage: data memory access.
//!
//! Evaluated *before* EX each cycle (see [`crate::core::cpu::Cpu::tick`]), so
//! that a load landing in `mem_wb_next` this cycle is already available for
//! EX's in-flight forwarding check on the very next instruction.

use crate::core::cpu::Cpu;

/// Evaluates the MEM stage for one cycle.
///
/// Reads only the *current* EX/MEM latch; writes only
/// `cpu.pipe.mem_wb_next`. A store stages its write via
/// [`crate::core::memory::DataMemory::write_next`] — it is not applied until
/// [`commit`](crate::core::memory::DataMemory::commit) at the end of the
/// cycle, alongside the register file and every latch promotion.
pub fn evaluate(cpu: &mut Cpu) {
    let ex_mem = cpu.pipe.ex_mem.clone();
    if !ex_mem.valid {
        return;
    }

    let mem_data = if ex_mem.ctrl.mem_read {
        cpu.mem.read(ex_mem.alu_result)
    } else {
        0
    };

    if ex_mem.ctrl.mem_write {
        cpu.mem.write_next(ex_mem.alu_result, ex_mem.val_rt);
    }

    let out = &mut cpu.pipe.mem_wb_next;
    out.alu_result = ex_mem.alu_result;
    out.mem_data = mem_data;
    out.ctrl = ex_mem.ctrl;
    out.raw_instr = ex_mem.raw_instr;
    out.valid = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::latches::ExMem;
    use crate::core::pipeline::signals::ControlSignals;

    #[test]
    fn load_reads_memory_into_mem_data() {
        let mut cpu = Cpu::new();
        cpu.mem.write_immediate(4, 123);
        cpu.pipe.ex_mem = ExMem {
            valid: true,
            alu_result: 4,
            ctrl: ControlSignals {
                mem_read: true,
                mem_to_reg: true,
                reg_write: true,
                dest_reg: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        evaluate(&mut cpu);
        assert_eq!(cpu.pipe.mem_wb_next.mem_data, 123);
    }

    #[test]
    fn store_stages_write_not_yet_visible() {
        let mut cpu = Cpu::new();
        cpu.pipe.ex_mem = ExMem {
            valid: true,
            alu_result: 8,
            val_rt: 99,
            ctrl: ControlSignals {
                mem_write: true,
                ..Default::default()
            },
            ..Default::default()
        };
        evaluate(&mut cpu);
        assert_eq!(cpu.mem.read(8), 0);
        cpu.mem.commit();
        assert_eq!(cpu.mem.read(8), 99);
    }

    #[test]
    fn non_memory_instruction_passes_through_untouched() {
        let mut cpu = Cpu::new();
        cpu.pipe.ex_mem = ExMem {
            valid: true,
            alu_result: 7,
            ctrl: ControlSignals {
                reg_write: true,
                dest_reg: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        evaluate(&mut cpu);
        assert_eq!(cpu.pipe.mem_wb_next.alu_result, 7);
        assert_eq!(cpu.pipe.mem_wb_next.mem_data, 0);
    }

    #[test]
    fn bubble_input_produces_no_output() {
        let mut cpu = Cpu::new();
        evaluate(&mut cpu);
        assert!(!cpu.pipe.mem_wb_next.valid);
    }
}
