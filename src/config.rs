//! TOML configuration for the simulator's ambient parameters — memory size
//! and tracing — as distinct from the program it runs, which is always
//! supplied separately via the assembly loader.

use serde::Deserialize;

use crate::core::memory::DEFAULT_WORDS;

const DEFAULT_MAX_CYCLES: u64 = 100_000;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace_instructions: bool,
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_cycles: default_max_cycles(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_words")]
    pub words: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            words: default_words(),
        }
    }
}

fn default_max_cycles() -> u64 {
    DEFAULT_MAX_CYCLES
}

fn default_words() -> usize {
    DEFAULT_WORDS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            memory: MemoryConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_carries_the_same_bounds_toml_would_fill_in() {
        let config = Config::default();
        assert_eq!(config.general.max_cycles, DEFAULT_MAX_CYCLES);
        assert_eq!(config.memory.words, DEFAULT_WORDS);
        assert!(!config.general.trace_instructions);
    }

    #[test]
    fn partial_toml_fills_in_missing_sections_with_defaults() {
        let config: Config = toml::from_str("[general]\ntrace_instructions = true\n").unwrap();
        assert!(config.general.trace_instructions);
        assert_eq!(config.general.max_cycles, DEFAULT_MAX_CYCLES);
        assert_eq!(config.memory.words, DEFAULT_WORDS);
    }

    #[test]
    fn empty_toml_matches_the_rust_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.general.max_cycles, DEFAULT_MAX_CYCLES);
        assert_eq!(config.memory.words, DEFAULT_WORDS);
    }
}
