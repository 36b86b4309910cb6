//! The five stage evaluators.
//!
//! Each submodule exposes a single `evaluate` function taking `&mut Cpu` (and,
//! for IF/EX, the shared `pc_next` accumulator) and a handful of `stall`/
//! redirect parameters. Every evaluator reads only its current-cycle input
//! latch(es) and writes only its `*_next` output latch — the one documented
//! exception is [`execute`], which also reads `mem_wb_next` for in-flight
//! load forwarding. [`crate::core::cpu::Cpu::tick`] calls them in the order
//! IF, ID, MEM, EX, WB: MEM ahead of EX is intentional, see [`execute`].

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory;
pub mod writeback;
