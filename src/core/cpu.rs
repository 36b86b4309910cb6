//! The CPU core: architectural state plus the cycle driver.
//!
//! [`Cpu::tick`] is the only place pipeline state changes. Every other
//! method is either construction/reset or a read-only inspection helper for
//! the CLI and tests.

use crate::config::Config;
use crate::isa::Instruction;

use super::arch::gpr::RegisterFile;
use super::memory::DataMemory;
use super::pipeline::hazards;
use super::pipeline::PipelineRegisters;
use super::stages;
use crate::stats::SimStats;

/// A 5-stage in-order pipelined simulator for the integer subset of
/// classic MIPS-I.
pub struct Cpu {
    pub pc: i64,
    pub clock: u64,
    pub program: Vec<Instruction>,
    pub pipe: PipelineRegisters,
    pub regs: RegisterFile,
    pub mem: DataMemory,
    pub trace: bool,
    pub stats: SimStats,
}

impl Cpu {
    /// Builds a CPU with a default-sized memory and tracing off.
    pub fn new() -> Self {
        Self {
            pc: 0,
            clock: 0,
            program: Vec::new(),
            pipe: PipelineRegisters::default(),
            regs: RegisterFile::new(),
            mem: DataMemory::default(),
            trace: false,
            stats: SimStats::default(),
        }
    }

    /// Builds a CPU from a loaded [`Config`], sizing memory and enabling
    /// tracing per the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            mem: DataMemory::new(config.memory.words),
            trace: config.general.trace_instructions,
            ..Self::new()
        }
    }

    /// Loads a freshly assembled program and resets every piece of
    /// architectural and pipeline state except data memory, so that data
    /// pre-staged with [`Cpu::set_mem_word`] before this call survives it.
    pub fn load_program(&mut self, program: Vec<Instruction>) {
        self.program = program;
        self.pc = 0;
        self.clock = 0;
        self.pipe.clear_all();
        self.regs.reset();
        self.stats = SimStats::default();
    }

    /// Resets the CPU to its post-load state, optionally zeroing data
    /// memory as well.
    pub fn reset(&mut self, clear_memory: bool) {
        self.pc = 0;
        self.clock = 0;
        self.pipe.clear_all();
        self.regs.reset();
        if clear_memory {
            self.mem.reset();
        }
        self.stats = SimStats::default();
    }

    /// Advances the pipeline by exactly one cycle.
    ///
    /// 1. Detect a load-use hazard from the *current* ID/EX and IF/ID
    ///    latches.
    /// 2. Clear every `*_next` latch to a bubble.
    /// 3. Evaluate the five stages in the order IF, ID, MEM, EX, WB — MEM
    ///    ahead of EX so EX can see the load MEM just produced this cycle
    ///    (see [`stages::execute`]).
    /// 4. Promote every `*_next` latch into `current`.
    /// 5. Commit the register file and data memory writes staged this
    ///    cycle.
    /// 6. Adopt the PC EX (or IF, absent a redirect) computed, and advance
    ///    the clock.
    pub fn tick(&mut self) {
        let stall = hazards::need_stall(&self.pipe.id_ex, &self.pipe.if_id);

        self.pipe.clear_next();

        let mut pc_next = self.pc;
        stages::fetch::evaluate(self, &mut pc_next, stall);
        stages::decode::evaluate(self, stall);
        stages::memory::evaluate(self);
        stages::execute::evaluate(self, &mut pc_next);
        stages::writeback::evaluate(self);

        self.pipe.promote();
        self.regs.commit();
        self.mem.commit();

        self.pc = pc_next;
        self.clock += 1;
        self.stats.cycles += 1;
        if stall {
            self.stats.stalls += 1;
        }
    }

    /// True once the program counter has run past the end of the loaded
    /// program and every pipeline latch has drained to a bubble — the
    /// point at which further ticks would have no observable effect.
    pub fn is_halted(&self) -> bool {
        (self.pc < 0 || self.pc as usize >= self.program.len()) && self.pipe.all_bubbles()
    }

    /// The loaded program, for dumps and inspection.
    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    /// A snapshot of the four pipeline latches, for dumps and inspection.
    pub fn pipeline(&self) -> &PipelineRegisters {
        &self.pipe
    }

    /// Reads a committed register value.
    pub fn reg(&self, idx: usize) -> i32 {
        self.regs.read(idx)
    }

    /// A snapshot of all 32 committed registers, for a full dump.
    pub fn dump_registers(&self) -> [i32; 32] {
        self.regs.snapshot()
    }

    /// Reads a committed data memory word.
    pub fn mem_word(&self, addr: i32) -> i32 {
        self.mem.read(addr)
    }

    /// Writes a data memory word immediately (bypassing the pending-write
    /// staging), for test and CLI fixturing of initial memory contents.
    pub fn set_mem_word(&mut self, addr: i32, value: i32) {
        self.mem.write_immediate(addr, value);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
