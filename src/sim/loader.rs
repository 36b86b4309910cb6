//! Textual assembly loader.
//!
//! Turns the line-oriented assembly surface described in spec.md §6 into a
//! `Vec<Instruction>`. This module is the sole source of fallible,
//! `Result`-returning operations in this crate — the core itself never
//! fails at tick time (see [`crate::core::cpu::Cpu::tick`]).
//!
//! One instruction per line; `#` or `//` starts a comment; blank lines are
//! ignored. Register tokens are `$N` (the leading `$` is optional) with
//! `N` in `[0, 31]`; immediates are signed decimal. `beq`/`bne` operands are
//! an absolute instruction index, converted here — at load time, not decode
//! time — into the PC-relative offset the EX stage expects:
//! `imm := targetIndex - (currentIndex + 1)`.

use std::fmt;
use std::fs;

use crate::isa::{Instruction, Opcode};

/// The kind of error a line of assembly can produce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoaderErrorKind {
    UnknownMnemonic,
    MissingOperand,
    InvalidRegister,
    RegisterOutOfRange,
    InvalidImmediate,
    MalformedMemoryOperand,
    Io,
}

impl fmt::Display for LoaderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoaderErrorKind::UnknownMnemonic => "unknown mnemonic",
            LoaderErrorKind::MissingOperand => "missing operand",
            LoaderErrorKind::InvalidRegister => "invalid register",
            LoaderErrorKind::RegisterOutOfRange => "register out of range",
            LoaderErrorKind::InvalidImmediate => "invalid immediate",
            LoaderErrorKind::MalformedMemoryOperand => "malformed memory operand",
            LoaderErrorKind::Io => "I/O error",
        };
        f.write_str(s)
    }
}

/// A loader failure: a 1-based line number, the offending token, and what
/// went wrong. The loader aborts on the first error (spec.md §7).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoaderError {
    pub line: usize,
    pub token: String,
    pub kind: LoaderErrorKind,
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.token)
    }
}

impl std::error::Error for LoaderError {}

fn err(line: usize, token: &str, kind: LoaderErrorKind) -> LoaderError {
    LoaderError {
        line,
        token: token.to_string(),
        kind,
    }
}

/// Strips a trailing `,` from a register or immediate token, so both
/// `add $1, $2, $3` and `add $1,$2,$3` parse identically.
fn strip_punct(tok: &str) -> &str {
    tok.trim_end_matches(',')
}

fn parse_reg(tok: &str, line: usize) -> Result<usize, LoaderError> {
    let s = strip_punct(tok);
    let digits = s.strip_prefix('$').unwrap_or(s);
    if digits.is_empty() {
        return Err(err(line, tok, LoaderErrorKind::MissingOperand));
    }
    let value: i64 = digits
        .parse()
        .map_err(|_| err(line, tok, LoaderErrorKind::InvalidRegister))?;
    if !(0..=31).contains(&value) {
        return Err(err(line, tok, LoaderErrorKind::RegisterOutOfRange));
    }
    Ok(value as usize)
}

fn parse_imm(tok: &str, line: usize) -> Result<i32, LoaderError> {
    let s = strip_punct(tok);
    if s.is_empty() {
        return Err(err(line, tok, LoaderErrorKind::MissingOperand));
    }
    s.parse()
        .map_err(|_| err(line, tok, LoaderErrorKind::InvalidImmediate))
}

/// Parses a `imm(base)` memory operand, e.g. `8($2)`. An empty `imm` (e.g.
/// `lw $1, ($2)`) defaults to 0.
fn parse_mem_operand(tok: &str, line: usize) -> Result<(i32, usize), LoaderError> {
    let s = strip_punct(tok);
    let open = s.find('(');
    let close = s.find(')');
    let (open, close) = match (open, close) {
        (Some(o), Some(c)) if c > o => (o, c),
        _ => return Err(err(line, tok, LoaderErrorKind::MalformedMemoryOperand)),
    };
    let imm_str = &s[..open];
    let base_str = &s[open + 1..close];
    let imm = if imm_str.is_empty() {
        0
    } else {
        parse_imm(imm_str, line)?
    };
    let base = parse_reg(base_str, line)?;
    Ok((imm, base))
}

/// Strips a `#` or `//` comment (whichever starts earliest) from a line.
fn strip_comment(line: &str) -> &str {
    let hash = line.find('#');
    let slashes = line.find("//");
    match (hash, slashes) {
        (Some(h), Some(s)) => &line[..h.min(s)],
        (Some(h), None) => &line[..h],
        (None, Some(s)) => &line[..s],
        (None, None) => line,
    }
}

fn missing(line: usize, mnem: &str) -> LoaderError {
    err(line, mnem, LoaderErrorKind::MissingOperand)
}

/// Parses one non-empty, comment-stripped, trimmed line into an
/// [`Instruction`]. `program_len` is the number of instructions already
/// pushed — the 0-based index this instruction will occupy, needed to
/// convert a branch's absolute target index into a PC-relative offset.
fn parse_line(raw: &str, line: usize, program_len: usize) -> Result<Instruction, LoaderError> {
    let mut tokens = raw.split_whitespace();
    let mnem = tokens.next().unwrap().to_ascii_lowercase();
    let rest: Vec<&str> = tokens.collect();

    let mut instr = Instruction {
        raw_text: raw.to_string(),
        ..Instruction::default()
    };

    match mnem.as_str() {
        "nop" => {
            instr.op = Opcode::Nop;
        }
        "add" | "sub" | "and" | "or" | "xor" | "slt" => {
            let [rd, rs, rt] = take3(&rest, line, &mnem)?;
            instr.rd = parse_reg(rd, line)?;
            instr.rs = parse_reg(rs, line)?;
            instr.rt = parse_reg(rt, line)?;
            instr.op = match mnem.as_str() {
                "add" => Opcode::Add,
                "sub" => Opcode::Sub,
                "and" => Opcode::And,
                "or" => Opcode::Or,
                "xor" => Opcode::Xor,
                _ => Opcode::Slt,
            };
        }
        "jr" => {
            let rs = rest.first().copied().ok_or_else(|| missing(line, &mnem))?;
            instr.rs = parse_reg(rs, line)?;
            instr.op = Opcode::Jr;
        }
        "addi" | "andi" | "ori" => {
            let [rt, rs, imm] = take3(&rest, line, &mnem)?;
            instr.rt = parse_reg(rt, line)?;
            instr.rs = parse_reg(rs, line)?;
            instr.imm = parse_imm(imm, line)?;
            instr.op = match mnem.as_str() {
                "addi" => Opcode::Addi,
                "andi" => Opcode::Andi,
                _ => Opcode::Ori,
            };
        }
        "lw" | "sw" => {
            let mut it = rest.iter();
            let rt = it.next().ok_or_else(|| missing(line, &mnem))?;
            let mem = it.next().ok_or_else(|| missing(line, &mnem))?;
            let (imm, base) = parse_mem_operand(mem, line)?;
            instr.rt = parse_reg(rt, line)?;
            instr.rs = base;
            instr.imm = imm;
            instr.op = if mnem == "lw" { Opcode::Lw } else { Opcode::Sw };
        }
        "beq" | "bne" => {
            let [rs, rt, target] = take3(&rest, line, &mnem)?;
            instr.rs = parse_reg(rs, line)?;
            instr.rt = parse_reg(rt, line)?;
            let target_index = parse_imm(target, line)?;
            instr.imm = target_index - (program_len as i32 + 1);
            instr.op = if mnem == "beq" { Opcode::Beq } else { Opcode::Bne };
        }
        "j" | "jal" => {
            let target = rest.first().copied().ok_or_else(|| missing(line, &mnem))?;
            instr.addr = parse_imm(target, line)?;
            instr.op = if mnem == "j" { Opcode::J } else { Opcode::Jal };
        }
        _ => {
            return Err(err(line, &mnem, LoaderErrorKind::UnknownMnemonic));
        }
    }

    Ok(instr)
}

/// Pulls exactly three operand tokens out of `rest`, or a `MissingOperand`
/// error naming the mnemonic.
fn take3<'a>(rest: &[&'a str], line: usize, mnem: &str) -> Result<[&'a str; 3], LoaderError> {
    if rest.len() < 3 {
        return Err(missing(line, mnem));
    }
    Ok([rest[0], rest[1], rest[2]])
}

/// Assembles a program from its textual source, one instruction per line.
///
/// Aborts and returns the first [`LoaderError`] encountered; never
/// partially constructs a program the caller could mistake for a
/// successful load.
pub fn load_program(source: &str) -> Result<Vec<Instruction>, LoaderError> {
    let mut program = Vec::new();

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let stripped = strip_comment(raw_line).trim();
        if stripped.is_empty() {
            continue;
        }
        let instr = parse_line(stripped, line_no, program.len())?;
        program.push(instr);
    }

    Ok(program)
}

/// Reads and assembles a program from a file path.
pub fn load_file(path: &str) -> Result<Vec<Instruction>, LoaderError> {
    let source = fs::read_to_string(path).map_err(|_| err(0, path, LoaderErrorKind::Io))?;
    load_program(&source)
}
