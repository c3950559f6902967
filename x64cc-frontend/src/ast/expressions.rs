//! Expression AST nodes
//! 
//! Every `ty` slot is `None` straight out of the parser and filled in by the
//! conversion pass. Number literals are always `int` and carry no slot.

use super::ops::{BinaryOp, PostfixOp};
use super::statements::VarId;
use crate::types::Type;
use serde::{Deserialize, Serialize};
use x64cc_common::SourceLocation;

static INT: Type = Type::Int;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Integer literal
    Number(i64),

    /// Reference to a variable of the enclosing function
    Identifier {
        name: String,
        var: VarId,
        ty: Option<Type>,
    },

    /// `&operand`, or an array-to-pointer decay inserted by the conversion pass
    AddressOf {
        operand: Box<Expr>,
        ty: Option<Type>,
        decayed: bool,
    },

    /// `*operand`
    Dereference {
        operand: Box<Expr>,
        ty: Option<Type>,
        location: SourceLocation,
    },

    /// Call of a named function
    Call {
        name: String,
        args: Vec<Expr>,
        ty: Option<Type>,
        location: SourceLocation,
    },

    /// Binary operation, assignment included
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        ty: Option<Type>,
    },

    /// `operand++` / `operand--`
    Postfix {
        op: PostfixOp,
        operand: Box<Expr>,
        ty: Option<Type>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty: None,
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Expr {
        Expr::binary(BinaryOp::Assign, target, value)
    }

    pub fn address_of(operand: Expr) -> Expr {
        Expr::AddressOf {
            operand: Box::new(operand),
            ty: None,
            decayed: false,
        }
    }

    pub fn dereference(operand: Expr, location: SourceLocation) -> Expr {
        Expr::Dereference {
            operand: Box::new(operand),
            ty: None,
            location,
        }
    }

    /// Resolved type; `None` before conversion
    pub fn ty(&self) -> Option<&Type> {
        match self {
            Expr::Number(_) => Some(&INT),
            Expr::Identifier { ty, .. }
            | Expr::AddressOf { ty, .. }
            | Expr::Dereference { ty, .. }
            | Expr::Call { ty, .. }
            | Expr::Binary { ty, .. }
            | Expr::Postfix { ty, .. } => ty.as_ref(),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Expr::Number(_))
    }

    /// Variable named by this expression, looking through a decay wrapper
    pub fn variable(&self) -> Option<VarId> {
        match self {
            Expr::Identifier { var, .. } => Some(*var),
            Expr::AddressOf { operand, decayed: true, .. } => operand.variable(),
            _ => None,
        }
    }

    /// Short node name for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Number(_) => "number",
            Expr::Identifier { .. } => "identifier",
            Expr::AddressOf { .. } => "address-of",
            Expr::Dereference { .. } => "dereference",
            Expr::Call { .. } => "call",
            Expr::Binary { .. } => "binary operation",
            Expr::Postfix { .. } => "postfix operation",
        }
    }
}
