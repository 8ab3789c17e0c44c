//! MIPS Toy Compiler - Target Model
//! 
//! Everything the code generator needs to know about the 32-bit MIPS target,
//! independent of the source language:
//! 
//! - Register names and the instruction lines we emit
//! - The calling convention (argument/return registers, prologue, epilogue)
//! - Per-scope allocation state: temporaries, labels and stack slots
//! - Joining an instruction list into assembly text

pub mod asm;
pub mod abi;
pub mod regalloc;
pub mod emit;

pub use asm::{AsmInst, Reg};
pub use abi::{CallingConvention, Frame};
pub use regalloc::{LabelGenerator, StackSlots, TempRegisterPool};
pub use emit::emit_instructions;
