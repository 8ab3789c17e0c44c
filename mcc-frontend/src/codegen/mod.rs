//! Code generation from the AST to MIPS assembly
//!
//! A [`CodeGenerator`] owns every piece of allocation state for one scope:
//! the instruction list, the temporary pool, the label counter and the
//! stack-slot table. The program is generated by one instance; each
//! function definition gets its own child instance whose finished
//! instructions are moved into the parent's list. No state is shared
//! between instances, so compiling the same source twice yields the same
//! text.
//!
//! Expression generation returns the register holding the result;
//! statement generation only emits. Nothing is validated here: reading an
//! unbound variable loads offset 0 and surplus call arguments are dropped.

mod function_gen;
mod statements;
mod expressions;

use crate::ast::Program;
use log::debug;
use mcc_codegen::{
    emit_instructions, AsmInst, CallingConvention, LabelGenerator, Reg, StackSlots,
    TempRegisterPool,
};

/// Generator for one scope (the program's `main`, or one function)
#[derive(Debug, Default)]
pub struct CodeGenerator {
    instructions: Vec<AsmInst>,
    temps: TempRegisterPool,
    labels: LabelGenerator,
    slots: StackSlots,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn emit(&mut self, inst: AsmInst) {
        self.instructions.push(inst);
    }

    pub(crate) fn emit_all(&mut self, insts: impl IntoIterator<Item = AsmInst>) {
        self.instructions.extend(insts);
    }

    /// Next register from the cyclic temporary pool
    pub(crate) fn new_temp(&mut self) -> Reg {
        self.temps.next()
    }

    pub(crate) fn new_label(&mut self) -> String {
        self.labels.next()
    }

    /// Generate a whole program
    ///
    /// Layout: directives, every function body in source order, the `main`
    /// label, every top-level statement in source order, process exit.
    pub fn generate_program(&mut self, program: &Program) {
        self.emit(AsmInst::Text);
        self.emit(AsmInst::Globl("main".to_string()));

        let mut function_count = 0;
        for func in program.functions() {
            self.generate_function(func);
            function_count += 1;
        }

        self.emit(AsmInst::Label("main".to_string()));
        self.slots.clear();
        for stmt in program.statements() {
            self.generate_statement(stmt);
        }
        self.emit_all(CallingConvention::gen_exit());

        debug!(
            "generated {} instructions ({} functions, {} main variables)",
            self.instructions.len(),
            function_count,
            self.slots.len()
        );
    }

    pub fn instructions(&self) -> &[AsmInst] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<AsmInst> {
        self.instructions
    }

    /// Variables bound in this scope so far
    pub fn slots(&self) -> &StackSlots {
        &self.slots
    }

    /// The instructions as assembly text, newline-joined
    pub fn code(&self) -> String {
        emit_instructions(&self.instructions)
    }
}

/// Generate the instruction list for a program with a fresh generator
pub fn generate(program: &Program) -> Vec<AsmInst> {
    let mut generator = CodeGenerator::new();
    generator.generate_program(program);
    generator.into_instructions()
}
