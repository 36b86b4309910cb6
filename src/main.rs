//! MIPS5 pipeline simulator CLI.
//!
//! Assembles a program with the textual loader, drives the pipeline to
//! completion (or a cycle bound), and prints the resulting architectural
//! state plus simulation statistics.

use clap::Parser;
use std::{fs, process};

extern crate mips5_sim;

use mips5_sim::config::Config;
use mips5_sim::sim::loader;
use mips5_sim::Cpu;

/// Command-line arguments for the MIPS5 pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "MIPS-I five-stage pipeline simulator")]
struct Args {
    /// Path to an assembly program (spec.md §6 surface).
    program: String,

    /// Path to a TOML configuration file. Defaults baked in if omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Upper bound on simulated cycles, overriding the config value.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Enable per-cycle stall/redirect tracing to stderr.
    #[arg(long)]
    trace: bool,

    /// Print the full register file after the run.
    #[arg(long)]
    dump_registers: bool,

    /// Print data memory words `start..end` after the run, e.g. `0..8`.
    #[arg(long)]
    dump_memory: Option<String>,
}

fn load_config(path: Option<&str>) -> Config {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: could not read config '{}': {}", path, e);
                process::exit(1);
            });
            toml::from_str(&content).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: could not parse config '{}': {}", path, e);
                process::exit(1);
            })
        }
        None => Config::default(),
    }
}

fn parse_dump_range(spec: &str) -> Option<(i32, i32)> {
    let (start, end) = spec.split_once("..")?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}

fn main() {
    let args = Args::parse();
    let config = load_config(args.config.as_deref());

    let mut cpu = Cpu::from_config(&config);
    cpu.trace = cpu.trace || args.trace;

    println!("MIPS5 Configuration");
    println!("-------------------");
    println!("  Program:            {}", args.program);
    println!("  Memory words:       {}", cpu.mem.size());
    println!("  Trace:              {}", cpu.trace);

    let program = loader::load_file(&args.program).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {}", e);
        process::exit(1);
    });
    println!("  Instructions:       {}", program.len());
    println!("-------------------");

    cpu.load_program(program);

    let max_cycles = args.max_cycles.unwrap_or(config.general.max_cycles);
    while !cpu.is_halted() && cpu.clock < max_cycles {
        cpu.tick();
    }

    if cpu.is_halted() {
        println!("\n[*] Halted after {} cycles.", cpu.clock);
    } else {
        println!(
            "\n[!] Stopped at cycle bound {} without halting.",
            max_cycles
        );
    }

    if args.dump_registers {
        println!("\nRegisters");
        println!("---------");
        for (idx, value) in cpu.dump_registers().iter().enumerate() {
            println!("  ${:<3} = {}", idx, value);
        }
    }

    if let Some(spec) = args.dump_memory.as_deref() {
        match parse_dump_range(spec) {
            Some((start, end)) => {
                println!("\nMemory [{}..{})", start, end);
                println!("--------------");
                for addr in start..end {
                    println!("  [{:>4}] = {}", addr, cpu.mem_word(addr));
                }
            }
            None => eprintln!("[!] invalid --dump-memory range: {}", spec),
        }
    }

    cpu.stats.print();
}
