//! MIPS Assembly Instruction Definitions
//! 
//! The subset of the MIPS32 register file and instruction set the compiler
//! emits. `Display` produces the exact text of one output line.

use serde::{Deserialize, Serialize};
use std::fmt;

/// MIPS registers used by generated code
/// 
/// - `$zero`: hardwired zero, used as the branch comparand
/// - `$v0`: return value and syscall selector
/// - `$a0`-`$a3`: argument registers
/// - `$t0`-`$t3`: the temporary pool
/// - `$sp`, `$ra`: stack pointer and return address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reg {
    Zero,
    V0,
    A0, A1, A2, A3,
    T0, T1, T2, T3,
    Sp,
    Ra,
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Reg::Zero => "$zero",
            Reg::V0 => "$v0",
            Reg::A0 => "$a0",
            Reg::A1 => "$a1",
            Reg::A2 => "$a2",
            Reg::A3 => "$a3",
            Reg::T0 => "$t0",
            Reg::T1 => "$t1",
            Reg::T2 => "$t2",
            Reg::T3 => "$t3",
            Reg::Sp => "$sp",
            Reg::Ra => "$ra",
        };
        f.write_str(name)
    }
}

/// One line of MIPS assembly output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsmInst {
    // Directives
    Text,                         // .text
    Globl(String),                // .globl sym

    // Arithmetic
    Add(Reg, Reg, Reg),           // rd = rs + rt
    Sub(Reg, Reg, Reg),           // rd = rs - rt
    Mul(Reg, Reg, Reg),           // rd = rs * rt
    Div(Reg, Reg, Reg),           // rd = rs / rt
    Addi(Reg, Reg, i32),          // rd = rs + imm
    Slt(Reg, Reg, Reg),           // rd = (rs < rt) ? 1 : 0

    // Memory
    Li(Reg, i64),                 // rd = immediate
    Lw(Reg, i32, Reg),            // rd = mem[base + offset]
    Sw(Reg, i32, Reg),            // mem[base + offset] = rs
    Move(Reg, Reg),               // rd = rs

    // Control flow
    Beq(Reg, Reg, String),        // branch if rs == rt
    J(String),                    // unconditional jump
    Jal(String),                  // jump and link
    Jr(Reg),                      // jump register

    // System
    Syscall,

    Label(String),
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmInst::Text => write!(f, ".text"),
            AsmInst::Globl(sym) => write!(f, ".globl {}", sym),

            AsmInst::Add(rd, rs, rt) => write!(f, "add {}, {}, {}", rd, rs, rt),
            AsmInst::Sub(rd, rs, rt) => write!(f, "sub {}, {}, {}", rd, rs, rt),
            AsmInst::Mul(rd, rs, rt) => write!(f, "mul {}, {}, {}", rd, rs, rt),
            AsmInst::Div(rd, rs, rt) => write!(f, "div {}, {}, {}", rd, rs, rt),
            AsmInst::Addi(rd, rs, imm) => write!(f, "addi {}, {}, {}", rd, rs, imm),
            AsmInst::Slt(rd, rs, rt) => write!(f, "slt {}, {}, {}", rd, rs, rt),

            AsmInst::Li(rd, imm) => write!(f, "li {}, {}", rd, imm),
            AsmInst::Lw(rd, offset, base) => write!(f, "lw {}, {}({})", rd, offset, base),
            AsmInst::Sw(rs, offset, base) => write!(f, "sw {}, {}({})", rs, offset, base),
            AsmInst::Move(rd, rs) => write!(f, "move {}, {}", rd, rs),

            AsmInst::Beq(rs, rt, label) => write!(f, "beq {}, {}, {}", rs, rt, label),
            AsmInst::J(label) => write!(f, "j {}", label),
            AsmInst::Jal(label) => write!(f, "jal {}", label),
            AsmInst::Jr(rs) => write!(f, "jr {}", rs),

            AsmInst::Syscall => write!(f, "syscall"),

            AsmInst::Label(label) => write!(f, "{}:", label),
        }
    }
}
