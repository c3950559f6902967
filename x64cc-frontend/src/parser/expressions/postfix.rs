//! Postfix expression parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::Parser;
use x64cc_common::CompilerError;

impl Parser {
    /// Parse postfix expression
    ///
    /// `e[i]` desugars to `*(e + i)`; the conversion pass scales the index.
    pub fn parse_postfix_expression(&mut self) -> Result<Expr, CompilerError> {
        let mut expr = self.parse_primary_expression()?;

        loop {
            let location = self.current_location();
            match self.peek_type() {
                TokenType::LeftBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect(TokenType::RightBracket, "array subscript")?;
                    expr = Expr::dereference(Expr::binary(BinaryOp::Add, expr, index), location);
                }
                TokenType::PlusPlus | TokenType::MinusMinus => {
                    let op = if self.check(&TokenType::PlusPlus) {
                        PostfixOp::Increment
                    } else {
                        PostfixOp::Decrement
                    };
                    self.ensure_assignable(&expr, location)?;
                    self.advance();
                    expr = Expr::Postfix { op, operand: Box::new(expr), ty: None };
                }
                _ => break,
            }
        }

        Ok(expr)
    }
}
