//! Statement AST nodes and function definitions

use super::expressions::Expr;
use crate::types::Type;
use serde::{Deserialize, Serialize};
use x64cc_common::SourceLocation;

/// Index of a variable in its function's `locals`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarId(pub usize);

/// A declared variable or parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub ty: Type,
    /// Distance below the frame base; assigned once by frame layout
    pub offset: Option<u64>,
    /// The slot holds the address of the storage, not the storage itself
    pub indirect: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            offset: None,
            indirect: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// Expression evaluated for its side effects
    Expression(Expr),

    /// Compound statement
    Block(Vec<Stmt>),

    Return(Expr),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    For {
        init: Option<Expr>,
        condition: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },

    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    /// `;` or a declaration without initializer
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    /// Parameter identifiers, in order
    pub params: Vec<Expr>,
    pub body: Vec<Stmt>,
    /// Every variable declared in the function, parameters first
    pub locals: Vec<Variable>,
    pub ty: Option<Type>,
    pub location: SourceLocation,
}

impl FunctionDef {
    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.locals.get(id.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub functions: Vec<FunctionDef>,
}
