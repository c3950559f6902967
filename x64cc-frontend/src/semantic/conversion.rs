//! Type annotation and implicit conversions
//!
//! A single bottom-up walk: children are converted before their parent looks
//! at their types. Nodes that already carry a type are left untouched, so
//! converting a converted tree is a no-op.

use crate::ast::*;
use crate::semantic::SemanticError;
use crate::types::Type;
use log::debug;
use x64cc_common::{CompilerError, SourceLocation};

/// Convert a parsed program into a fully typed one
pub fn convert(program: Program) -> Result<Program, CompilerError> {
    let functions = program
        .functions
        .into_iter()
        .map(convert_function)
        .collect::<Result<Vec<_>, _>>()?;

    debug!("converted {} function(s)", functions.len());
    Ok(Program { functions })
}

fn convert_function(func: FunctionDef) -> Result<FunctionDef, CompilerError> {
    let FunctionDef { name, params, body, locals, location, .. } = func;

    let converter = Converter { locals: &locals };
    let params = params
        .into_iter()
        .map(|param| converter.expr(param))
        .collect::<Result<Vec<_>, _>>()?;
    let body = body
        .into_iter()
        .map(|stmt| converter.stmt(stmt))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FunctionDef {
        name,
        params,
        body,
        locals,
        ty: Some(Type::Int),
        location,
    })
}

struct Converter<'a> {
    locals: &'a [Variable],
}

impl Converter<'_> {
    fn stmt(&self, stmt: Stmt) -> Result<Stmt, CompilerError> {
        Ok(match stmt {
            Stmt::Expression(expr) => Stmt::Expression(self.expr(expr)?),
            Stmt::Block(items) => Stmt::Block(
                items
                    .into_iter()
                    .map(|item| self.stmt(item))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Stmt::Return(expr) => Stmt::Return(self.expr(expr)?),
            Stmt::If { condition, then_branch, else_branch } => Stmt::If {
                condition: self.expr(condition)?,
                then_branch: Box::new(self.stmt(*then_branch)?),
                else_branch: else_branch
                    .map(|stmt| self.stmt(*stmt).map(Box::new))
                    .transpose()?,
            },
            Stmt::For { init, condition, update, body } => Stmt::For {
                init: self.optional(init)?,
                condition: self.optional(condition)?,
                update: self.optional(update)?,
                body: Box::new(self.stmt(*body)?),
            },
            Stmt::While { condition, body } => Stmt::While {
                condition: self.expr(condition)?,
                body: Box::new(self.stmt(*body)?),
            },
            Stmt::Empty => Stmt::Empty,
        })
    }

    fn optional(&self, expr: Option<Expr>) -> Result<Option<Expr>, CompilerError> {
        expr.map(|e| self.expr(e)).transpose()
    }

    fn expr(&self, expr: Expr) -> Result<Expr, CompilerError> {
        if expr.ty().is_some() {
            return Ok(expr);
        }

        match expr {
            Expr::Identifier { .. } | Expr::Dereference { .. } => Ok(decay(self.undecayed(expr)?)),
            Expr::AddressOf { operand, .. } => {
                let operand = self.undecayed(*operand)?;
                let ty = operand.ty().cloned().map(Type::pointer_to);
                Ok(Expr::AddressOf { operand: Box::new(operand), ty, decayed: false })
            }
            Expr::Call { name, args, location, .. } => {
                let args = args
                    .into_iter()
                    .map(|arg| self.expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::Call { name, args, ty: Some(Type::Int), location })
            }
            Expr::Binary { op, left, right, .. } => self.binary(op, *left, *right),
            Expr::Postfix { op, operand, .. } => {
                let operand = self.expr(*operand)?;
                let ty = operand.ty().cloned();
                Ok(Expr::Postfix { op, operand: Box::new(operand), ty })
            }
            Expr::Number(_) => Ok(expr),
        }
    }

    /// Type an identifier or dereference without decaying the result
    fn undecayed(&self, expr: Expr) -> Result<Expr, CompilerError> {
        match expr {
            Expr::Identifier { name, var, ty: None } => {
                let ty = self.variable_type(&name, var)?;
                Ok(Expr::Identifier { name, var, ty: Some(ty) })
            }
            Expr::Dereference { operand, location, ty: None } => {
                let operand = self.expr(*operand)?;
                let ty = match operand.ty() {
                    Some(Type::Pointer(target)) => target.as_ref().clone(),
                    other => {
                        return Err(SemanticError::DereferenceNonPointer {
                            found: other.cloned().unwrap_or(Type::Int),
                            location,
                        }
                        .into())
                    }
                };
                Ok(Expr::Dereference { operand: Box::new(operand), ty: Some(ty), location })
            }
            other => self.expr(other),
        }
    }

    fn binary(&self, op: BinaryOp, left: Expr, right: Expr) -> Result<Expr, CompilerError> {
        let mut left = self.expr(left)?;
        let mut right = self.expr(right)?;
        let left_ty = left.ty().cloned().unwrap_or(Type::Int);
        let right_ty = right.ty().cloned().unwrap_or(Type::Int);

        let ty = match op {
            BinaryOp::Add => {
                if let Some(target) = left_ty.pointee() {
                    right = scale(right, target.size());
                    left_ty
                } else if let Some(target) = right_ty.pointee() {
                    left = scale(left, target.size());
                    right_ty
                } else {
                    widest(&left, &right)
                }
            }
            BinaryOp::Sub => {
                if let Some(target) = left_ty.pointee() {
                    right = scale(right, target.size());
                    left_ty
                } else {
                    widest(&left, &right)
                }
            }
            BinaryOp::Assign => left_ty,
            op if op.is_comparison() => left_ty,
            op if op.is_logical() => Type::Int,
            _ => widest(&left, &right),
        };

        Ok(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty: Some(ty),
        })
    }

    fn variable_type(&self, name: &str, var: VarId) -> Result<Type, CompilerError> {
        self.locals
            .get(var.0)
            .map(|v| v.ty.clone())
            .ok_or_else(|| {
                CompilerError::semantic_error(
                    format!("variable '{name}' is not bound in this function"),
                    SourceLocation::default(),
                )
            })
    }
}

/// Replace an array-typed expression with a pointer to its first element
fn decay(expr: Expr) -> Expr {
    match expr.ty() {
        Some(Type::Array { element, .. }) => {
            let ty = Type::pointer_to(element.as_ref().clone());
            Expr::AddressOf { operand: Box::new(expr), ty: Some(ty), decayed: true }
        }
        _ => expr,
    }
}

/// `expr * size`, typed like `expr`
fn scale(expr: Expr, size: u64) -> Expr {
    let ty = expr.ty().cloned();
    Expr::Binary {
        op: BinaryOp::Mul,
        left: Box::new(expr),
        right: Box::new(Expr::Number(size as i64)),
        ty,
    }
}

/// Result type of an arithmetic operator
///
/// A literal operand never widens the other one; otherwise the larger type
/// wins, the left one on a tie.
fn widest(left: &Expr, right: &Expr) -> Type {
    let left_ty = left.ty().cloned().unwrap_or(Type::Int);
    let right_ty = right.ty().cloned().unwrap_or(Type::Int);

    if left.is_number() {
        right_ty
    } else if right.is_number() || left_ty.size() >= right_ty.size() {
        left_ty
    } else {
        right_ty
    }
}
