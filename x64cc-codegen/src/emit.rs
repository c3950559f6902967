//! Assembly text emission

use crate::asm::AsmInst;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render instructions as assembler input, one per line
pub fn emit_instructions(instructions: &[AsmInst]) -> String {
    let mut out = String::new();

    for inst in instructions {
        if !inst.is_unindented() {
            out.push_str(INDENT);
        }
        // Writing into a String cannot fail
        let _ = writeln!(out, "{}", inst);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asm::{Operand, Reg};

    #[test]
    fn test_emit_layout() {
        let text = emit_instructions(&[
            AsmInst::Directive(".intel_syntax noprefix".to_string()),
            AsmInst::Label("main".to_string()),
            AsmInst::Push(Operand::Imm(3)),
            AsmInst::Pop(Reg::Rax),
            AsmInst::Ret,
        ]);

        assert_eq!(
            text,
            ".intel_syntax noprefix\nmain:\n  push 3\n  pop rax\n  ret\n"
        );
    }
}
