//! Function definition generation

use super::CodeGenerator;
use crate::ast::FunctionDefinition;
use log::debug;
use mcc_codegen::Frame;

impl CodeGenerator {
    /// Generate `func` in a child scope and append its finished code
    ///
    /// The child owns its own temporaries, labels and slots; none of them
    /// are visible to this generator or to other functions.
    pub(crate) fn generate_function(&mut self, func: &FunctionDefinition) {
        let mut scope = CodeGenerator::new();
        scope.generate_function_body(func);

        debug!(
            "function '{}': {} instructions, {} slots",
            func.name,
            scope.instructions.len(),
            scope.slots.len()
        );
        self.instructions.extend(scope.into_instructions());
    }

    fn generate_function_body(&mut self, func: &FunctionDefinition) {
        let frame = Frame::new(&func.name);
        self.emit_all(frame.gen_prologue());

        for (index, param) in func.params.iter().enumerate() {
            let offset = self.slots.bind_fresh(param);
            if let Some(store) = frame.gen_param_store(index, offset) {
                self.emit(store);
            }
        }

        for stmt in &func.body {
            self.generate_statement(stmt);
        }

        let result = self.generate_expression(&func.return_expr);
        self.emit_all(frame.gen_epilogue(result));
    }
}
