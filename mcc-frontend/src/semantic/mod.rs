//! Optional semantic checks
//! 
//! The code generator validates nothing. This pass is run separately, on
//! request, and reports as warnings the constructs the generator accepts
//! silently but that are almost certainly mistakes. It never changes the
//! generated code.
//! 
//! Two passes: first every function definition is collected (calls may
//! refer to functions defined later, since all function bodies are emitted
//! before `main`), then each scope is walked in source order. The walk keeps
//! its own [`StackSlots`] table, filled exactly as the generator fills it, so
//! a warning can name the offset an unassigned read really loads from.

mod symbols;

pub use symbols::{FunctionSignature, FunctionTable};

use crate::ast::*;
use log::debug;
use mcc_codegen::{CallingConvention, StackSlots};
use mcc_common::{Diagnostic, ErrorReporter};
use std::collections::HashSet;

/// Variables of the scope being checked
#[derive(Debug, Default)]
struct Scope {
    /// Slot layout as the generator builds it
    slots: StackSlots,
    /// Names whose slot has been written
    assigned: HashSet<String>,
}

impl Scope {
    fn is_assigned(&self, name: &str) -> bool {
        self.assigned.contains(name)
    }
}

/// Semantic checker for one program
pub struct SemanticChecker {
    functions: FunctionTable,
    reporter: ErrorReporter,
}

impl SemanticChecker {
    pub fn new() -> Self {
        Self {
            functions: FunctionTable::new(),
            reporter: ErrorReporter::new(),
        }
    }

    /// Check `program` and return the warnings found
    pub fn check(mut self, program: &Program) -> Vec<Diagnostic> {
        // First pass: collect function signatures
        for func in program.functions() {
            self.declare_function(func);
        }

        // Second pass: each function scope, then main
        for func in program.functions() {
            self.check_function(func);
        }
        let mut main_scope = Scope::default();
        for stmt in program.statements() {
            self.check_statement(stmt, &mut main_scope);
        }

        debug!("semantic checks: {}", self.reporter.summary());
        self.reporter.into_diagnostics()
    }

    fn declare_function(&mut self, func: &FunctionDefinition) {
        if func.name == "main" {
            self.reporter.warning(
                "function named 'main' collides with the program entry label".to_string(),
                func.span.clone(),
            );
        }

        if let Err(previous) = self.functions.declare(func) {
            self.reporter.report(
                Diagnostic::warning(
                    format!("function '{}' is defined more than once", func.name),
                    func.span.clone(),
                )
                .with_note(format!("first definition at {}", previous.span.start)),
            );
        }

        if func.params.len() > CallingConvention::MAX_REG_ARGS {
            self.reporter.warning(
                format!(
                    "function '{}' declares {} parameters; only the first {} receive values",
                    func.name,
                    func.params.len(),
                    CallingConvention::MAX_REG_ARGS
                ),
                func.span.clone(),
            );
        }

        let mut seen = HashSet::new();
        for param in &func.params {
            if !seen.insert(param.as_str()) {
                self.reporter.warning(
                    format!("parameter '{}' is repeated in function '{}'", param, func.name),
                    func.span.clone(),
                );
            }
        }
    }

    fn check_function(&mut self, func: &FunctionDefinition) {
        let mut scope = Scope::default();
        for param in &func.params {
            scope.slots.bind_fresh(param);
            scope.assigned.insert(param.clone());
        }
        for stmt in &func.body {
            self.check_statement(stmt, &mut scope);
        }
        self.check_expression(&func.return_expr, &scope);
    }

    fn check_statement(&mut self, stmt: &Statement, scope: &mut Scope) {
        match &stmt.kind {
            StatementKind::Assign { target, value } => {
                // The slot exists before the value is evaluated
                scope.slots.allocate(target);
                self.check_expression(value, scope);
                scope.assigned.insert(target.clone());
            }
            StatementKind::If { condition, then_body } => {
                self.check_condition(condition, scope);
                self.check_block(then_body, scope);
            }
            StatementKind::IfElse { condition, then_body, else_body } => {
                self.check_condition(condition, scope);
                self.check_block(then_body, scope);
                self.check_block(else_body, scope);
            }
            StatementKind::While { condition, body } => {
                self.check_condition(condition, scope);
                self.check_block(body, scope);
            }
        }
    }

    /// Blocks do not open a scope; a name assigned inside keeps its slot after
    fn check_block(&mut self, body: &[Statement], scope: &mut Scope) {
        for stmt in body {
            self.check_statement(stmt, scope);
        }
    }

    fn check_condition(&mut self, condition: &Condition, scope: &Scope) {
        self.check_expression(&condition.left, scope);
        self.check_expression(&condition.right, scope);
    }

    fn check_expression(&mut self, expr: &Expression, scope: &Scope) {
        match &expr.kind {
            ExpressionKind::Number(_) => {}
            ExpressionKind::Identifier(name) => {
                if !scope.is_assigned(name) {
                    self.reporter.report(
                        Diagnostic::warning(
                            format!("variable '{}' is read before any assignment", name),
                            expr.span.clone(),
                        )
                        .with_note(format!(
                            "it is loaded from stack offset {}",
                            scope.slots.resolve(name)
                        )),
                    );
                }
            }
            ExpressionKind::Binary { left, right, .. } => {
                self.check_expression(left, scope);
                self.check_expression(right, scope);
            }
            ExpressionKind::Call { name, arguments } => {
                for arg in arguments {
                    self.check_expression(arg, scope);
                }
                self.check_call(name, arguments.len(), expr);
            }
        }
    }

    fn check_call(&mut self, name: &str, arg_count: usize, call: &Expression) {
        match self.functions.lookup(name) {
            None => {
                self.reporter.warning(
                    format!("call to undefined function '{}'", name),
                    call.span.clone(),
                );
            }
            Some(signature) if signature.param_count != arg_count => {
                let message = format!(
                    "function '{}' takes {} arguments but {} were given",
                    name, signature.param_count, arg_count
                );
                self.reporter.warning(message, call.span.clone());
            }
            Some(_) => {}
        }

        if arg_count > CallingConvention::MAX_REG_ARGS {
            self.reporter.warning(
                format!(
                    "call to '{}' passes {} arguments; only the first {} are passed in registers",
                    name,
                    arg_count,
                    CallingConvention::MAX_REG_ARGS
                ),
                call.span.clone(),
            );
        }
    }
}

impl Default for SemanticChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the optional checks over a parsed program
pub fn check_program(program: &Program) -> Vec<Diagnostic> {
    SemanticChecker::new().check(program)
}
