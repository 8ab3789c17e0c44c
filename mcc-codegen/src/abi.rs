//! MIPS ABI Implementation
//! 
//! The calling convention the generated code follows and the fixed
//! instruction sequences derived from it: function prologue and epilogue,
//! the call sequence and the program exit.

use crate::asm::{AsmInst, Reg};

/// Calling convention for generated code
/// 
/// Register usage:
/// - A0-A3: the first four arguments; further arguments are not passed
/// - V0: return value (and syscall selector)
/// - RA: return address, saved by the callee on entry
/// - SP: stack pointer; locals live at non-negative offsets from it
/// - T0-T3: caller-owned temporaries, never preserved across calls
pub struct CallingConvention;

impl CallingConvention {
    /// Maximum number of arguments passed in registers
    pub const MAX_REG_ARGS: usize = 4;
    
    /// Registers used for passing arguments
    pub const ARG_REGS: [Reg; 4] = [Reg::A0, Reg::A1, Reg::A2, Reg::A3];

    pub const RETURN_REG: Reg = Reg::V0;
    pub const RETURN_ADDR: Reg = Reg::Ra;
    pub const STACK_PTR: Reg = Reg::Sp;

    /// Bytes reserved on the stack for the saved return address
    pub const RA_SAVE_SIZE: i32 = 4;

    /// `syscall` service number for process exit
    pub const EXIT_SYSCALL: i64 = 10;

    /// Argument register for a 0-based position, if it is passed in one
    pub fn arg_reg(index: usize) -> Option<Reg> {
        Self::ARG_REGS.get(index).copied()
    }

    /// `li $v0, 10; syscall`
    pub fn gen_exit() -> Vec<AsmInst> {
        vec![
            AsmInst::Li(Self::RETURN_REG, Self::EXIT_SYSCALL),
            AsmInst::Syscall,
        ]
    }

    /// Wire already-evaluated argument registers and call `target`
    /// 
    /// Only the first four arguments are moved into `$a0`-`$a3`; the rest
    /// have been evaluated by the caller but are not passed.
    pub fn gen_call(target: &str, args: &[Reg]) -> Vec<AsmInst> {
        let mut code: Vec<AsmInst> = args
            .iter()
            .zip(Self::ARG_REGS)
            .map(|(&arg, param)| AsmInst::Move(param, arg))
            .collect();
        code.push(AsmInst::Jal(target.to_string()));
        code
    }
}

/// Activation record of one generated function
/// 
/// The frame only ever holds the saved return address at `0($sp)`;
/// parameter and local slots are addressed from `$sp` by the slot table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
}

impl Frame {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }

    /// Entry label, then save `$ra`
    pub fn gen_prologue(&self) -> Vec<AsmInst> {
        vec![
            AsmInst::Label(self.name.clone()),
            AsmInst::Addi(
                CallingConvention::STACK_PTR,
                CallingConvention::STACK_PTR,
                -CallingConvention::RA_SAVE_SIZE,
            ),
            AsmInst::Sw(CallingConvention::RETURN_ADDR, 0, CallingConvention::STACK_PTR),
        ]
    }

    /// Store an incoming argument register into the parameter's slot
    /// 
    /// Returns `None` for parameters past the fourth, which have no
    /// argument register to store from.
    pub fn gen_param_store(&self, index: usize, offset: i32) -> Option<AsmInst> {
        CallingConvention::arg_reg(index)
            .map(|reg| AsmInst::Sw(reg, offset, CallingConvention::STACK_PTR))
    }

    /// Move the result into `$v0`, restore `$ra`, pop and return
    pub fn gen_epilogue(&self, result: Reg) -> Vec<AsmInst> {
        vec![
            AsmInst::Move(CallingConvention::RETURN_REG, result),
            AsmInst::Lw(CallingConvention::RETURN_ADDR, 0, CallingConvention::STACK_PTR),
            AsmInst::Addi(
                CallingConvention::STACK_PTR,
                CallingConvention::STACK_PTR,
                CallingConvention::RA_SAVE_SIZE,
            ),
            AsmInst::Jr(CallingConvention::RETURN_ADDR),
        ]
    }
}
