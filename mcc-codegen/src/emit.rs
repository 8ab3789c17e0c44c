//! Assembly text emission

use crate::asm::AsmInst;

/// Render an instruction list as assembly text, one instruction per line
/// 
/// Lines are joined with `\n`; there is no trailing newline.
pub fn emit_instructions(instructions: &[AsmInst]) -> String {
    instructions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
