//! Unary expression parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::Parser;
use x64cc_common::CompilerError;

impl Parser {
    /// Parse unary expression
    ///
    /// Prefix `++x` / `--x` desugar to `x = x + 1` / `x = x - 1`, `-e` to
    /// `0 - e` and `!e` to `e == 0`.
    pub fn parse_unary_expression(&mut self) -> Result<Expr, CompilerError> {
        let location = self.current_location();

        match self.peek_type() {
            TokenType::Ampersand => {
                self.advance();
                let operand = self.parse_unary_expression()?;
                Ok(Expr::address_of(operand))
            }
            TokenType::Star => {
                self.advance();
                let operand = self.parse_unary_expression()?;
                Ok(Expr::dereference(operand, location))
            }
            TokenType::PlusPlus | TokenType::MinusMinus => {
                let op = if self.check(&TokenType::PlusPlus) {
                    BinaryOp::Add
                } else {
                    BinaryOp::Sub
                };
                self.advance();
                let operand = self.parse_unary_expression()?;
                self.ensure_assignable(&operand, location)?;
                let stepped = Expr::binary(op, operand.clone(), Expr::Number(1));
                Ok(Expr::assign(operand, stepped))
            }
            TokenType::Minus => {
                self.advance();
                let operand = self.parse_unary_expression()?;
                Ok(Expr::binary(BinaryOp::Sub, Expr::Number(0), operand))
            }
            TokenType::Bang => {
                self.advance();
                let operand = self.parse_unary_expression()?;
                Ok(Expr::binary(BinaryOp::Equal, operand, Expr::Number(0)))
            }
            TokenType::Plus => {
                self.advance();
                self.parse_unary_expression()
            }
            _ => self.parse_postfix_expression(),
        }
    }
}
