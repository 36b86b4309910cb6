//! WB stage: commit a result to the register file.
//!
//! The write staged here is not visible to [`crate::core::stages::decode`]'s
//! bypass or to [`RegisterFile::read`](crate::core::arch::gpr::RegisterFile::read)
//! until [`crate::core::arch::gpr::RegisterFile::commit`] runs at the end of
//! the cycle.

use crate::core::cpu::Cpu;

/// Evaluates the WB stage for one cycle.
///
/// Reads only the *current* MEM/WB latch; stages at most one register
/// write via [`RegisterFile::write_next`](crate::core::arch::gpr::RegisterFile::write_next).
pub fn evaluate(cpu: &mut Cpu) {
    let mem_wb = &cpu.pipe.mem_wb;
    if !mem_wb.valid || !mem_wb.ctrl.reg_write {
        return;
    }

    let value = if mem_wb.ctrl.mem_to_reg {
        mem_wb.mem_data
    } else {
        mem_wb.alu_result
    };
    cpu.regs.write_next(mem_wb.ctrl.dest_reg as usize, value);
    cpu.stats.instructions_retired += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::latches::MemWb;
    use crate::core::pipeline::signals::ControlSignals;

    #[test]
    fn alu_result_is_staged_for_commit() {
        let mut cpu = Cpu::new();
        cpu.pipe.mem_wb = MemWb {
            valid: true,
            alu_result: 42,
            ctrl: ControlSignals {
                reg_write: true,
                dest_reg: 5,
                ..Default::default()
            },
            ..Default::default()
        };
        evaluate(&mut cpu);
        assert_eq!(cpu.regs.read(5), 0);
        cpu.regs.commit();
        assert_eq!(cpu.regs.read(5), 42);
    }

    #[test]
    fn load_result_prefers_mem_data() {
        let mut cpu = Cpu::new();
        cpu.pipe.mem_wb = MemWb {
            valid: true,
            alu_result: 0xdead,
            mem_data: 7,
            ctrl: ControlSignals {
                reg_write: true,
                mem_to_reg: true,
                dest_reg: 5,
                ..Default::default()
            },
            ..Default::default()
        };
        evaluate(&mut cpu);
        cpu.regs.commit();
        assert_eq!(cpu.regs.read(5), 7);
    }

    #[test]
    fn non_writing_instruction_writes_nothing() {
        let mut cpu = Cpu::new();
        cpu.regs.write_next(5, 1);
        cpu.regs.commit();
        cpu.pipe.mem_wb = MemWb {
            valid: true,
            ctrl: ControlSignals::default(),
            ..Default::default()
        };
        evaluate(&mut cpu);
        cpu.regs.commit();
        assert_eq!(cpu.regs.read(5), 1);
    }

    #[test]
    fn bubble_retires_nothing() {
        let mut cpu = Cpu::new();
        let before = cpu.stats.instructions_retired;
        evaluate(&mut cpu);
        assert_eq!(cpu.stats.instructions_retired, before);
    }
}
