//! Expression lowering
//!
//! Each routine leaves exactly one value on the evaluation stack.

use super::{CodeGenerator, FunctionContext, GenError};
use crate::abi::CallingConvention;
use crate::asm::{AsmInst, Cond, Operand, Reg, Width};
use log::trace;
use x64cc_common::CompilerError;
use x64cc_frontend::{BinaryOp, Expr, PostfixOp, Type};

impl CodeGenerator<'_> {
    pub(super) fn gen_expr(&mut self, ctx: &FunctionContext<'_>, expr: &Expr) -> Result<(), CompilerError> {
        match expr {
            Expr::Number(value) => self.push_immediate(*value),
            Expr::Identifier { ty, .. } => {
                self.gen_address(ctx, expr)?;
                self.load(ty.as_ref(), "identifier")?;
            }
            Expr::AddressOf { operand, .. } => self.gen_address(ctx, operand)?,
            Expr::Dereference { operand, ty, .. } => {
                self.gen_expr(ctx, operand)?;
                self.load(ty.as_ref(), "dereference")?;
            }
            Expr::Call { name, args, .. } => self.gen_call(ctx, name, args)?,
            Expr::Binary { op: BinaryOp::Assign, left, right, .. } => {
                self.gen_address(ctx, left)?;
                self.gen_expr(ctx, right)?;
                self.pop(Reg::Rdi);
                self.pop(Reg::Rax);
                self.emit(AsmInst::Mov(Operand::mem(Reg::Rax), Reg::Rdi.into()));
                self.push(Reg::Rdi);
            }
            Expr::Binary { op: BinaryOp::LogicalAnd, left, right, .. } => {
                let false_label = self.new_label(".Lfalse");
                self.gen_truth_test(ctx, left, Cond::E, &false_label)?;
                self.gen_truth_test(ctx, right, Cond::E, &false_label)?;
                self.push_branch_result(1, false_label, 0);
            }
            Expr::Binary { op: BinaryOp::LogicalOr, left, right, .. } => {
                let true_label = self.new_label(".Ltrue");
                self.gen_truth_test(ctx, left, Cond::Ne, &true_label)?;
                self.gen_truth_test(ctx, right, Cond::Ne, &true_label)?;
                self.push_branch_result(0, true_label, 1);
            }
            Expr::Binary { op, left, right, .. } => {
                self.gen_expr(ctx, left)?;
                self.gen_expr(ctx, right)?;
                self.pop(Reg::Rdi);
                self.pop(Reg::Rax);
                self.gen_binary_op(*op)?;
            }
            Expr::Postfix { op, operand, ty } => {
                let step = match ty {
                    Some(Type::Pointer(target)) => target.size() as i64,
                    _ => 1,
                };
                self.gen_address(ctx, operand)?;
                self.pop(Reg::Rax);
                self.emit(AsmInst::Mov(Reg::Rdi.into(), Operand::mem(Reg::Rax)));
                // The old value is the result
                self.push(Reg::Rdi);
                let stepped = match op {
                    PostfixOp::Increment => AsmInst::Add(Reg::Rdi.into(), Operand::Imm(step)),
                    PostfixOp::Decrement => AsmInst::Sub(Reg::Rdi.into(), Operand::Imm(step)),
                };
                self.emit(stepped);
                self.emit(AsmInst::Mov(Operand::mem(Reg::Rax), Reg::Rdi.into()));
            }
        }
        Ok(())
    }

    /// Push the address an lvalue designates
    pub(super) fn gen_address(&mut self, ctx: &FunctionContext<'_>, expr: &Expr) -> Result<(), CompilerError> {
        match expr {
            Expr::Identifier { var, .. } => {
                let offset = ctx.slot(*var)?;
                self.emit(AsmInst::Lea(Reg::Rax, Operand::frame_slot(offset)));
                if ctx.variable(*var)?.indirect {
                    self.emit(AsmInst::Mov(Reg::Rax.into(), Operand::mem(Reg::Rax)));
                }
                self.push(Reg::Rax);
                Ok(())
            }
            // The value of the pointer is the address
            Expr::Dereference { operand, .. } => self.gen_expr(ctx, operand),
            other => Err(GenError::InvalidLvalue(other.kind_name()).into()),
        }
    }

    /// Replace the address on top of the stack with the value stored there
    fn load(&mut self, ty: Option<&Type>, node: &'static str) -> Result<(), GenError> {
        let ty = ty.ok_or(GenError::MissingType(node))?;
        match Width::from_size(ty.size()) {
            Some(Width::Qword) => {
                self.pop(Reg::Rax);
                self.emit(AsmInst::Mov(Reg::Rax.into(), Operand::mem(Reg::Rax)));
                self.push(Reg::Rax);
                Ok(())
            }
            _ => Err(GenError::UnsupportedWidth(ty.size())),
        }
    }

    fn push_immediate(&mut self, value: i64) {
        if i32::try_from(value).is_ok() {
            self.push(Operand::Imm(value));
        } else {
            self.emit(AsmInst::Mov(Reg::Rax.into(), Operand::Imm(value)));
            self.push(Reg::Rax);
        }
    }

    /// Evaluate `expr` and jump to `label` if it compares `cond` against zero
    fn gen_truth_test(
        &mut self,
        ctx: &FunctionContext<'_>,
        expr: &Expr,
        cond: Cond,
        label: &str,
    ) -> Result<(), CompilerError> {
        self.gen_expr(ctx, expr)?;
        self.pop(Reg::Rax);
        self.emit(AsmInst::Cmp(Reg::Rax.into(), Operand::Imm(0)));
        self.emit(AsmInst::Jcc(cond, label.to_string()));
        Ok(())
    }

    /// Push `fallthrough`, or `taken` when control arrives via `taken_label`
    fn push_branch_result(&mut self, fallthrough: i64, taken_label: String, taken: i64) {
        let end = self.new_label(".Lend");
        self.push(Operand::Imm(fallthrough));
        self.emit(AsmInst::Jmp(end.clone()));
        // Only one of the two pushes executes
        self.depth -= 1;
        self.emit(AsmInst::Label(taken_label));
        self.push(Operand::Imm(taken));
        self.emit(AsmInst::Label(end));
    }

    /// Combine rax (left) and rdi (right), pushing the result
    fn gen_binary_op(&mut self, op: BinaryOp) -> Result<(), CompilerError> {
        let (rax, rdi) = (Reg::Rax, Reg::Rdi);

        let cond = match op {
            BinaryOp::Equal => Some(Cond::E),
            BinaryOp::NotEqual => Some(Cond::Ne),
            BinaryOp::Less => Some(Cond::L),
            BinaryOp::Greater => Some(Cond::G),
            BinaryOp::LessEqual => Some(Cond::Le),
            BinaryOp::GreaterEqual => Some(Cond::Ge),
            _ => None,
        };
        if let Some(cond) = cond {
            let true_label = self.new_label(".Ltrue");
            self.emit(AsmInst::Cmp(rax.into(), rdi.into()));
            self.emit(AsmInst::Jcc(cond, true_label.clone()));
            self.push_branch_result(0, true_label, 1);
            return Ok(());
        }

        match op {
            BinaryOp::Add => self.emit(AsmInst::Add(rax.into(), rdi.into())),
            BinaryOp::Sub => self.emit(AsmInst::Sub(rax.into(), rdi.into())),
            BinaryOp::Mul => self.emit(AsmInst::Imul(rax, rdi)),
            BinaryOp::Div => {
                self.emit(AsmInst::Cqo);
                self.emit(AsmInst::Idiv(rdi));
            }
            BinaryOp::Mod => {
                self.emit(AsmInst::Cqo);
                self.emit(AsmInst::Idiv(rdi));
                self.emit(AsmInst::Mov(rax.into(), Reg::Rdx.into()));
            }
            BinaryOp::BitAnd => self.emit(AsmInst::And(rax, rdi)),
            BinaryOp::BitOr => self.emit(AsmInst::Or(rax, rdi)),
            BinaryOp::BitXor => self.emit(AsmInst::Xor(rax, rdi)),
            BinaryOp::LeftShift => {
                self.emit(AsmInst::Mov(Reg::Rcx.into(), rdi.into()));
                self.emit(AsmInst::Shl(rax));
            }
            BinaryOp::RightShift => {
                self.emit(AsmInst::Mov(Reg::Rcx.into(), rdi.into()));
                self.emit(AsmInst::Sar(rax));
            }
            other => return Err(GenError::UnknownNode(format!("binary operator '{}'", other)).into()),
        }
        self.push(rax);
        Ok(())
    }

    /// Evaluate arguments left to right onto the stack, then pop them into
    /// their registers so nested calls cannot clobber a loaded register
    fn gen_call(&mut self, ctx: &FunctionContext<'_>, name: &str, args: &[Expr]) -> Result<(), CompilerError> {
        CallingConvention::check_arguments(args.len())?;

        for arg in args {
            self.gen_expr(ctx, arg)?;
        }
        for index in (0..args.len()).rev() {
            self.pop(CallingConvention::arg_reg(index)?);
        }

        let padded = self.depth % 2 == 1;
        if padded {
            self.emit(AsmInst::Sub(Reg::Rsp.into(), Operand::Imm(8)));
        }
        self.emit(AsmInst::Mov(Operand::Sized(Reg::Rax, Width::Byte), Operand::Imm(0)));
        self.emit(AsmInst::Call(self.options.call_target(name)));
        if padded {
            self.emit(AsmInst::Add(Reg::Rsp.into(), Operand::Imm(8)));
        }
        trace!("call '{}' with {} argument(s), padded: {}", name, args.len(), padded);

        self.push(CallingConvention::RETURN_REG);
        Ok(())
    }
}
