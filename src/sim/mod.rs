//! Simulation harness: the textual assembly loader.

/// Parses the line-oriented assembly surface (spec.md §6) into decoded
/// instructions.
pub mod loader;
