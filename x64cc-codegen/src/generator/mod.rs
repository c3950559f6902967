//! Stack-machine code generator
//!
//! Every expression leaves exactly one 8-byte value on the machine stack;
//! its parent pops what it needs. Locals are always memory resident, so no
//! register allocation is needed. The generator tracks how many values are
//! on the evaluation stack to keep calls 16-byte aligned.

pub mod errors;
mod expressions;
mod statements;

pub use errors::GenError;

use crate::abi::Frame;
use crate::asm::{AsmInst, Operand, Reg};
use crate::options::CodegenOptions;
use log::debug;
use x64cc_common::{CompilerError, LabelGenerator};
use x64cc_frontend::{FunctionDef, Program, VarId, Variable};

pub struct CodeGenerator<'a> {
    options: &'a CodegenOptions,
    labels: LabelGenerator,
    code: Vec<AsmInst>,
    /// Values currently pushed by expression evaluation
    depth: usize,
}

/// Function being generated
struct FunctionContext<'f> {
    locals: &'f [Variable],
    frame: Frame,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(options: &'a CodegenOptions) -> Self {
        Self {
            options,
            labels: LabelGenerator::new(),
            code: Vec::new(),
            depth: 0,
        }
    }

    /// Generate the whole program; frame offsets are assigned on the way
    pub fn generate(mut self, mut program: Program) -> Result<Vec<AsmInst>, CompilerError> {
        self.emit(AsmInst::Directive(".intel_syntax noprefix".to_string()));
        self.emit(AsmInst::Directive(format!(".global {}", self.options.symbol("main"))));

        for func in &mut program.functions {
            let frame = Frame::layout(&mut func.locals)?;
            debug!("function '{}': frame of {} bytes", func.name, frame.size);
            self.gen_function(func, frame)?;
        }

        if self.options.needs_stack_note() {
            self.emit(AsmInst::Directive(".section .note.GNU-stack,\"\",@progbits".to_string()));
        }

        debug!("generated {} instructions, {} labels", self.code.len(), self.labels.issued());
        Ok(self.code)
    }

    fn gen_function(&mut self, func: &FunctionDef, frame: Frame) -> Result<(), CompilerError> {
        let ctx = FunctionContext { locals: &func.locals, frame };

        let mut param_offsets = Vec::with_capacity(func.params.len());
        for param in &func.params {
            let var = param
                .variable()
                .ok_or_else(|| GenError::UnknownNode(format!("parameter {}", param.kind_name())))?;
            param_offsets.push(ctx.slot(var)?);
        }

        self.emit(AsmInst::Label(self.options.symbol(&func.name)));
        let prologue = ctx.frame.gen_prologue(&param_offsets)?;
        self.code.extend(prologue);

        self.depth = 0;
        for stmt in &func.body {
            self.gen_stmt(&ctx, stmt)?;
        }

        // Falling off the end returns 0
        self.emit(AsmInst::Mov(Reg::Rax.into(), Operand::Imm(0)));
        self.code.extend(ctx.frame.gen_epilogue());
        Ok(())
    }

    pub(crate) fn emit(&mut self, inst: AsmInst) {
        self.code.push(inst);
    }

    /// Push onto the evaluation stack
    pub(crate) fn push(&mut self, operand: impl Into<Operand>) {
        self.code.push(AsmInst::Push(operand.into()));
        self.depth += 1;
    }

    /// Pop from the evaluation stack
    pub(crate) fn pop(&mut self, reg: Reg) {
        self.code.push(AsmInst::Pop(reg));
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn new_label(&mut self, prefix: &str) -> String {
        self.labels.new_label_with_prefix(prefix)
    }
}

impl FunctionContext<'_> {
    fn variable(&self, var: VarId) -> Result<&Variable, GenError> {
        self.locals
            .get(var.0)
            .ok_or_else(|| GenError::MissingSlot(format!("#{}", var.0)))
    }

    /// Frame offset of a variable
    fn slot(&self, var: VarId) -> Result<u64, GenError> {
        let variable = self.variable(var)?;
        variable
            .offset
            .ok_or_else(|| GenError::MissingSlot(variable.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::emit_instructions;
    use x64cc_frontend::Frontend;

    fn asm(source: &str) -> String {
        let program = Frontend::analyze_source(source).unwrap();
        let options = CodegenOptions::elf();
        emit_instructions(&CodeGenerator::new(&options).generate(program).unwrap())
    }

    #[test]
    fn test_header_and_function_shape() {
        let text = asm("int main() { return 42; }");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], ".intel_syntax noprefix");
        assert_eq!(lines[1], ".global main");
        assert_eq!(lines[2], "main:");
        assert_eq!(&lines[3..6], &["  push rbp", "  mov rbp, rsp", "  sub rsp, 0"]);
        assert!(text.contains("  push 42\n  pop rax\n  mov rsp, rbp\n  pop rbp\n  ret\n"));
    }

    #[test]
    fn test_balanced_prologue_and_epilogue() {
        let text = asm(
            "int f(int x) { if (x) return 1; return 2; } int main() { return f(3); }",
        );
        let prologues = text.matches("push rbp").count();
        let epilogues = text.matches("pop rbp").count();

        assert_eq!(prologues, 2);
        // Two explicit returns in f, one in main, plus one implicit per function
        assert_eq!(epilogues, 5);
        assert_eq!(text.matches("\n  ret\n").count(), epilogues);
    }

    #[test]
    fn test_labels_are_unique() {
        let text = asm(
            "int main() { int i; int s; s = 0; for (i = 0; i < 10; i++) { if (i && s || 1) s = s + i; } while (s > 100) s = s - 1; return s; }",
        );
        let mut labels: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with(".L") && l.ends_with(':'))
            .collect();
        let total = labels.len();
        labels.sort_unstable();
        labels.dedup();

        assert!(total > 0);
        assert_eq!(labels.len(), total);
    }

    #[test]
    fn test_parameters_spilled_to_slots() {
        let text = asm("int add(int a, int b) { return a + b; }");
        assert!(text.contains("  mov [rbp-8], rdi\n"));
        assert!(text.contains("  mov [rbp-16], rsi\n"));
        assert!(text.contains("  sub rsp, 16\n"));
    }

    #[test]
    fn test_too_many_parameters() {
        let program =
            Frontend::analyze_source("int f(int a, int b, int c, int d, int e, int f, int g) { return a; }")
                .unwrap();
        let options = CodegenOptions::elf();
        let err = CodeGenerator::new(&options).generate(program).unwrap_err();
        assert!(err.to_string().contains("Too many parameters"), "{err}");
    }
}
