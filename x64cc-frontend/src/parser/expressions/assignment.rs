//! Assignment expression parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::Parser;
use x64cc_common::CompilerError;

impl Parser {
    /// Parse assignment expression (right associative)
    ///
    /// `lhs op= rhs` desugars to `lhs = lhs op rhs`; the target expression is
    /// evaluated twice.
    pub fn parse_assignment_expression(&mut self) -> Result<Expr, CompilerError> {
        let left = self.parse_logical_or_expression()?;

        let Some(op) = assignment_operator(self.peek_type()) else {
            return Ok(left);
        };
        let location = self.current_location();
        self.ensure_assignable(&left, location)?;
        self.advance();

        let right = self.parse_assignment_expression()?;
        let value = match op {
            None => right,
            Some(op) => Expr::binary(op, left.clone(), right),
        };
        Ok(Expr::assign(left, value))
    }
}

/// `Some(None)` for plain `=`, `Some(Some(op))` for `op=`
fn assignment_operator(token: &TokenType) -> Option<Option<BinaryOp>> {
    let op = match token {
        TokenType::Equal => return Some(None),
        TokenType::PlusEqual => BinaryOp::Add,
        TokenType::MinusEqual => BinaryOp::Sub,
        TokenType::StarEqual => BinaryOp::Mul,
        TokenType::SlashEqual => BinaryOp::Div,
        TokenType::PercentEqual => BinaryOp::Mod,
        TokenType::AmpersandEqual => BinaryOp::BitAnd,
        TokenType::PipeEqual => BinaryOp::BitOr,
        TokenType::CaretEqual => BinaryOp::BitXor,
        TokenType::LeftShiftEqual => BinaryOp::LeftShift,
        TokenType::RightShiftEqual => BinaryOp::RightShift,
        _ => return None,
    };
    Some(Some(op))
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;
    use x64cc_common::CompilerError;

    fn x() -> Expr {
        Expr::Identifier { name: "x".to_string(), var: VarId(0), ty: None }
    }

    fn y() -> Expr {
        Expr::Identifier { name: "y".to_string(), var: VarId(1), ty: None }
    }

    fn last_stmt(input: &str) -> Stmt {
        let mut body = parse(tokenize(input).unwrap()).unwrap().functions.remove(0).body;
        body.pop().unwrap()
    }

    #[test]
    fn test_compound_assignment_desugars() {
        assert_eq!(
            last_stmt("{ int x; x += 2; }"),
            Stmt::Expression(Expr::assign(
                x(),
                Expr::binary(BinaryOp::Add, x(), Expr::Number(2))
            ))
        );
        assert_eq!(
            last_stmt("{ int x; x <<= 1; }"),
            Stmt::Expression(Expr::assign(
                x(),
                Expr::binary(BinaryOp::LeftShift, x(), Expr::Number(1))
            ))
        );
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(
            last_stmt("{ int x; int y; x = y = 4; }"),
            Stmt::Expression(Expr::assign(x(), Expr::assign(y(), Expr::Number(4))))
        );
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = parse(tokenize("{ int x; x + 1 = 2; }").unwrap()).unwrap_err();
        match err {
            CompilerError::ParseError { message, .. } => {
                assert!(message.contains("invalid assignment target"), "{message}")
            }
            other => panic!("Expected parse error, got {other:?}"),
        }

        assert!(parse(tokenize("{ 3 = 4; }").unwrap()).is_err());
    }

    #[test]
    fn test_assign_through_pointer_and_index() {
        assert!(parse(tokenize("{ int *p; *p = 1; }").unwrap()).is_ok());
        assert!(parse(tokenize("{ int a[2]; a[1] = 1; }").unwrap()).is_ok());
    }
}
