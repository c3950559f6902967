//! Expression parsing
//! 
//! One function per precedence level, lowest first. Assignment is detected
//! after parsing the left operand as a full logical-or expression, so no
//! backtracking is needed.

mod assignment;
mod binary;
mod postfix;
mod primary;
mod unary;

use crate::ast::*;
use crate::parser::{ParseError, Parser};
use x64cc_common::{CompilerError, SourceLocation};

impl Parser {
    /// Parse expression (top level)
    pub fn parse_expression(&mut self) -> Result<Expr, CompilerError> {
        self.parse_assignment_expression()
    }

    /// Only variables and dereferences denote storage
    pub(crate) fn ensure_assignable(
        &self,
        target: &Expr,
        location: SourceLocation,
    ) -> Result<(), ParseError> {
        match target {
            Expr::Identifier { .. } | Expr::Dereference { .. } => Ok(()),
            other => Err(ParseError::InvalidExpression {
                message: format!("invalid assignment target: {}", other.kind_name()),
                location,
            }),
        }
    }
}
