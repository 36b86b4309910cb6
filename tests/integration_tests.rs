//! End-to-end pipeline scenarios (spec.md §8, S1-S6) plus the quantified
//! properties that hold across every tick.

use mips5_sim::sim::loader;
use mips5_sim::Cpu;

/// Drains a program for `program.len() + margin` cycles, the minimum the
/// spec guarantees is enough to observe every architectural write.
fn run(source: &str, margin: u64) -> Cpu {
    let program = loader::load_program(source).expect("program should assemble");
    let mut cpu = Cpu::new();
    let len = program.len() as u64;
    cpu.load_program(program);
    for _ in 0..(len + margin) {
        cpu.tick();
    }
    cpu
}

#[test]
fn s1_alu_forwarding() {
    let cpu = run(
        "addi $1,$0,5\naddi $2,$0,7\nadd $3,$1,$2\nsub $4,$3,$1\n",
        8,
    );
    assert_eq!(cpu.reg(1), 5);
    assert_eq!(cpu.reg(2), 7);
    assert_eq!(cpu.reg(3), 12);
    assert_eq!(cpu.reg(4), 7);
}

#[test]
fn s2_load_use_stall_with_mem_to_ex_forward() {
    let mut cpu_seed = Cpu::new();
    cpu_seed.set_mem_word(0, 42);
    let program = loader::load_program("lw $1,0($0)\nadd $2,$1,$1\naddi $3,$2,1\n").unwrap();
    cpu_seed.load_program(program.clone());
    for _ in 0..(program.len() as u64 + 8) {
        cpu_seed.tick();
    }
    assert_eq!(cpu_seed.reg(1), 42);
    assert_eq!(cpu_seed.reg(2), 84);
    assert_eq!(cpu_seed.reg(3), 85);
    assert!(cpu_seed.stats.stalls >= 1);
}

#[test]
fn s3_store_data_forwarding() {
    let cpu = run("addi $1,$0,99\nsw $1,0($0)\nlw $2,0($0)\n", 8);
    assert_eq!(cpu.mem_word(0), 99);
    assert_eq!(cpu.reg(2), 99);
}

#[test]
fn s4_branch_taken_flushes_two_slots() {
    let cpu = run(
        "addi $1,$0,1\naddi $2,$0,1\nbeq $1,$2,5\naddi $3,$0,123\naddi $3,$0,456\naddi $3,$0,789\n",
        8,
    );
    assert_eq!(cpu.reg(3), 789);
}

#[test]
fn s5_jal_and_jr_round_trip() {
    let cpu = run(
        "jal 4\naddi $1,$0,111\nj 7\nnop\naddi $2,$0,222\njr $31\nnop\naddi $3,$0,333\n",
        8,
    );
    assert_eq!(cpu.reg(31), 1);
    assert_eq!(cpu.reg(1), 111);
    assert_eq!(cpu.reg(2), 222);
    assert_eq!(cpu.reg(3), 333);
}

#[test]
fn s6_zero_register_is_immutable() {
    let cpu = run("addi $0,$0,123\naddi $1,$0,5\nadd $0,$1,$0\n", 8);
    assert_eq!(cpu.reg(0), 0);
    assert_eq!(cpu.reg(1), 5);
}

#[test]
fn zero_register_invariant_holds_every_cycle() {
    let program = loader::load_program("addi $0,$0,123\nadd $0,$1,$0\naddi $1,$0,5\n").unwrap();
    let mut cpu = Cpu::new();
    cpu.load_program(program);
    for _ in 0..20 {
        cpu.tick();
        assert_eq!(cpu.reg(0), 0);
    }
}

#[test]
fn clock_counts_exactly_the_completed_ticks() {
    let mut cpu = Cpu::new();
    cpu.load_program(loader::load_program("nop\nnop\nnop\n").unwrap());
    for n in 1..=15u64 {
        cpu.tick();
        assert_eq!(cpu.clock, n);
    }
}

#[test]
fn alu_chain_without_hazards_retires_by_length_plus_four_cycles() {
    let source = "addi $1,$0,1\naddi $2,$0,2\naddi $3,$0,3\naddi $4,$0,4\n";
    let program = loader::load_program(source).unwrap();
    let len = program.len();
    let mut cpu = Cpu::new();
    cpu.load_program(program);
    for _ in 0..(len as u64 + 4) {
        cpu.tick();
    }
    assert_eq!(cpu.reg(1), 1);
    assert_eq!(cpu.reg(2), 2);
    assert_eq!(cpu.reg(3), 3);
    assert_eq!(cpu.reg(4), 4);
}

#[test]
fn determinism_same_program_same_initial_state_same_trace() {
    let source = "addi $1,$0,5\nlw $2,0($0)\nadd $3,$1,$2\nbeq $1,$1,6\naddi $4,$0,1\nnop\naddi $5,$0,9\n";

    let run_once = || {
        let program = loader::load_program(source).unwrap();
        let mut cpu = Cpu::new();
        cpu.set_mem_word(0, 7);
        cpu.load_program(program);
        let mut trace = Vec::new();
        for _ in 0..20 {
            cpu.tick();
            trace.push((
                cpu.pc,
                cpu.reg(1),
                cpu.reg(2),
                cpu.reg(3),
                cpu.reg(4),
                cpu.reg(5),
            ));
        }
        trace
    };

    assert_eq!(run_once(), run_once());
}

#[test]
fn reset_true_is_idempotent() {
    let mut cpu = Cpu::new();
    cpu.set_mem_word(0, 123);
    cpu.load_program(loader::load_program("addi $1,$0,5\nlw $2,0($0)\n").unwrap());
    for _ in 0..5 {
        cpu.tick();
    }

    cpu.reset(true);
    let regs_once = cpu.dump_registers();
    let mem_once: Vec<i32> = (0..8).map(|a| cpu.mem_word(a)).collect();
    let pc_once = cpu.pc;
    let clock_once = cpu.clock;

    cpu.reset(true);
    assert_eq!(cpu.dump_registers(), regs_once);
    let mem_twice: Vec<i32> = (0..8).map(|a| cpu.mem_word(a)).collect();
    assert_eq!(mem_twice, mem_once);
    assert_eq!(cpu.pc, pc_once);
    assert_eq!(cpu.clock, clock_once);
}

#[test]
fn load_program_preserves_memory_but_reset_clears_it_when_requested() {
    let mut cpu = Cpu::new();
    cpu.set_mem_word(0, 55);
    cpu.load_program(loader::load_program("nop\n").unwrap());
    assert_eq!(cpu.mem_word(0), 55);

    cpu.reset(false);
    assert_eq!(cpu.mem_word(0), 55);

    cpu.reset(true);
    assert_eq!(cpu.mem_word(0), 0);
}

#[test]
fn halts_once_pc_runs_past_program_and_pipeline_drains() {
    let mut cpu = Cpu::new();
    cpu.load_program(loader::load_program("addi $1,$0,1\naddi $2,$0,2\n").unwrap());
    assert!(!cpu.is_halted());
    for _ in 0..10 {
        cpu.tick();
    }
    assert!(cpu.is_halted());
}
