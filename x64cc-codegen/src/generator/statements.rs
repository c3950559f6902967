//! Statement lowering
//!
//! Statements leave the evaluation stack as they found it.

use super::{CodeGenerator, FunctionContext};
use crate::asm::{AsmInst, Cond, Operand, Reg};
use x64cc_common::CompilerError;
use x64cc_frontend::{Expr, Stmt};

impl CodeGenerator<'_> {
    pub(super) fn gen_stmt(&mut self, ctx: &FunctionContext<'_>, stmt: &Stmt) -> Result<(), CompilerError> {
        match stmt {
            Stmt::Expression(expr) => self.gen_discarded(ctx, expr)?,
            Stmt::Block(items) => {
                for item in items {
                    self.gen_stmt(ctx, item)?;
                }
            }
            Stmt::Return(expr) => {
                self.gen_expr(ctx, expr)?;
                self.pop(Reg::Rax);
                self.code.extend(ctx.frame.gen_epilogue());
            }
            Stmt::If { condition, then_branch, else_branch } => {
                let else_label = self.new_label(".Lelse");
                let end_label = self.new_label(".Lend");

                self.gen_branch_if_false(ctx, condition, &else_label)?;
                self.gen_stmt(ctx, then_branch)?;
                self.emit(AsmInst::Jmp(end_label.clone()));
                self.emit(AsmInst::Label(else_label));
                if let Some(else_branch) = else_branch {
                    self.gen_stmt(ctx, else_branch)?;
                }
                self.emit(AsmInst::Label(end_label));
            }
            Stmt::While { condition, body } => {
                let begin_label = self.new_label(".Lbegin");
                let end_label = self.new_label(".Lend");

                self.emit(AsmInst::Label(begin_label.clone()));
                self.gen_branch_if_false(ctx, condition, &end_label)?;
                self.gen_stmt(ctx, body)?;
                self.emit(AsmInst::Jmp(begin_label));
                self.emit(AsmInst::Label(end_label));
            }
            Stmt::For { init, condition, update, body } => {
                let begin_label = self.new_label(".Lbegin");
                let end_label = self.new_label(".Lend");

                if let Some(init) = init {
                    self.gen_discarded(ctx, init)?;
                }
                self.emit(AsmInst::Label(begin_label.clone()));
                if let Some(condition) = condition {
                    self.gen_branch_if_false(ctx, condition, &end_label)?;
                }
                self.gen_stmt(ctx, body)?;
                if let Some(update) = update {
                    self.gen_discarded(ctx, update)?;
                }
                self.emit(AsmInst::Jmp(begin_label));
                self.emit(AsmInst::Label(end_label));
            }
            Stmt::Empty => {}
        }
        Ok(())
    }

    /// Evaluate for side effects only
    fn gen_discarded(&mut self, ctx: &FunctionContext<'_>, expr: &Expr) -> Result<(), CompilerError> {
        self.gen_expr(ctx, expr)?;
        self.pop(Reg::Rax);
        Ok(())
    }

    fn gen_branch_if_false(
        &mut self,
        ctx: &FunctionContext<'_>,
        condition: &Expr,
        label: &str,
    ) -> Result<(), CompilerError> {
        self.gen_expr(ctx, condition)?;
        self.pop(Reg::Rax);
        self.emit(AsmInst::Cmp(Reg::Rax.into(), Operand::Imm(0)));
        self.emit(AsmInst::Jcc(Cond::E, label.to_string()));
        Ok(())
    }
}
