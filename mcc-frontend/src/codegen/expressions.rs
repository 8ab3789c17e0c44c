//! Expression code generation
//!
//! Each expression evaluates into a freshly requested temporary and
//! returns it. Temporaries cycle through `$t0`-`$t3` without liveness
//! tracking, so deeply nested expressions can overwrite an operand that is
//! still pending; that is the intended allocation policy.

use super::CodeGenerator;
use crate::ast::{BinaryOp, Expression, ExpressionKind};
use mcc_codegen::{AsmInst, CallingConvention, Reg};

/// Instruction computing `rd = rs <op> rt`
fn arithmetic(op: BinaryOp, rd: Reg, rs: Reg, rt: Reg) -> AsmInst {
    match op {
        BinaryOp::Add => AsmInst::Add(rd, rs, rt),
        BinaryOp::Sub => AsmInst::Sub(rd, rs, rt),
        BinaryOp::Mul => AsmInst::Mul(rd, rs, rt),
        BinaryOp::Div => AsmInst::Div(rd, rs, rt),
    }
}

impl CodeGenerator {
    /// Generate `expr` and return the register holding its value
    pub(crate) fn generate_expression(&mut self, expr: &Expression) -> Reg {
        match &expr.kind {
            ExpressionKind::Number(value) => {
                let reg = self.new_temp();
                self.emit(AsmInst::Li(reg, *value));
                reg
            }

            ExpressionKind::Identifier(name) => {
                let reg = self.new_temp();
                let offset = self.slots.resolve(name);
                self.emit(AsmInst::Lw(reg, offset, CallingConvention::STACK_PTR));
                reg
            }

            ExpressionKind::Binary { op, left, right } => {
                let lhs = self.generate_expression(left);
                let rhs = self.generate_expression(right);
                let result = self.new_temp();
                self.emit(arithmetic(*op, result, lhs, rhs));
                result
            }

            ExpressionKind::Call { name, arguments } => self.generate_call(name, arguments),
        }
    }

    /// Evaluate every argument left to right, wire the first four, call,
    /// then copy `$v0` into a fresh temporary.
    fn generate_call(&mut self, name: &str, arguments: &[Expression]) -> Reg {
        let arg_regs: Vec<Reg> = arguments
            .iter()
            .map(|arg| self.generate_expression(arg))
            .collect();
        self.emit_all(CallingConvention::gen_call(name, &arg_regs));

        let result = self.new_temp();
        self.emit(AsmInst::Move(result, CallingConvention::RETURN_REG));
        result
    }
}
