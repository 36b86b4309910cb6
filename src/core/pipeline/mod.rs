//! Instruction pipeline implementation.
//!
//! This module contains the pipeline latches for inter-stage communication,
//! control signals, load-use hazard detection, and EX-stage forwarding. The
//! five stage evaluators themselves live in [`crate::core::stages`]; they
//! are kept separate from the latches/signals they operate on so that the
//! hazard and forwarding units can stay pure functions with no dependency
//! on the stages.

/// EX-stage operand forwarding unit.
pub mod forwarding;

/// Load-use hazard detection (the hazard unit).
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

pub use latches::PipelineRegisters;
