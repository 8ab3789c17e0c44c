//! Statement code generation (assignment, if, if-else, while)

use super::CodeGenerator;
use crate::ast::{Condition, Expression, Statement, StatementKind};
use mcc_codegen::{AsmInst, CallingConvention, Reg};
use mcc_codegen::regalloc::SLOT_SIZE;

impl CodeGenerator {
    pub(crate) fn generate_statement(&mut self, stmt: &Statement) {
        match &stmt.kind {
            StatementKind::Assign { target, value } => self.generate_assign(target, value),
            StatementKind::If { condition, then_body } => self.generate_if(condition, then_body),
            StatementKind::IfElse { condition, then_body, else_body } => {
                self.generate_if_else(condition, then_body, else_body)
            }
            StatementKind::While { condition, body } => self.generate_while(condition, body),
        }
    }

    fn generate_block(&mut self, body: &[Statement]) {
        for stmt in body {
            self.generate_statement(stmt);
        }
    }

    /// First assignment to a name grows the stack by one slot before the
    /// right-hand side is evaluated.
    fn generate_assign(&mut self, target: &str, value: &Expression) {
        if self.slots.allocate(target) {
            self.emit(AsmInst::Addi(
                CallingConvention::STACK_PTR,
                CallingConvention::STACK_PTR,
                -SLOT_SIZE,
            ));
        }

        let value_reg = self.generate_expression(value);
        let offset = self.slots.resolve(target);
        self.emit(AsmInst::Sw(value_reg, offset, CallingConvention::STACK_PTR));
    }

    /// `slt` with the operands swapped: nonzero exactly when left > right
    fn generate_condition(&mut self, condition: &Condition) -> Reg {
        let left = self.generate_expression(&condition.left);
        let right = self.generate_expression(&condition.right);
        let result = self.new_temp();
        self.emit(AsmInst::Slt(result, right, left));
        result
    }

    fn generate_if(&mut self, condition: &Condition, then_body: &[Statement]) {
        let cond = self.generate_condition(condition);
        let end_label = self.new_label();

        self.emit(AsmInst::Beq(cond, Reg::Zero, end_label.clone()));
        self.generate_block(then_body);
        self.emit(AsmInst::Label(end_label));
    }

    fn generate_if_else(
        &mut self,
        condition: &Condition,
        then_body: &[Statement],
        else_body: &[Statement],
    ) {
        let cond = self.generate_condition(condition);
        let else_label = self.new_label();
        let end_label = self.new_label();

        self.emit(AsmInst::Beq(cond, Reg::Zero, else_label.clone()));
        self.generate_block(then_body);
        self.emit(AsmInst::J(end_label.clone()));

        self.emit(AsmInst::Label(else_label));
        self.generate_block(else_body);
        self.emit(AsmInst::Label(end_label));
    }

    fn generate_while(&mut self, condition: &Condition, body: &[Statement]) {
        let start_label = self.new_label();
        let end_label = self.new_label();

        self.emit(AsmInst::Label(start_label.clone()));
        let cond = self.generate_condition(condition);
        self.emit(AsmInst::Beq(cond, Reg::Zero, end_label.clone()));

        self.generate_block(body);
        self.emit(AsmInst::J(start_label));
        self.emit(AsmInst::Label(end_label));
    }
}
