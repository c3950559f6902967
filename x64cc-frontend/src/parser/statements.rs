//! Statement parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::Parser;
use x64cc_common::CompilerError;

impl Parser {
    /// Parse a declaration or a statement inside a block
    pub fn parse_block_item(&mut self) -> Result<Stmt, CompilerError> {
        if self.check(&TokenType::Int) {
            self.parse_declaration()
        } else {
            self.parse_statement()
        }
    }

    /// Parse a statement
    pub fn parse_statement(&mut self) -> Result<Stmt, CompilerError> {
        match self.peek_type() {
            TokenType::Return => self.parse_return_statement(),
            TokenType::LeftBrace => Ok(Stmt::Block(self.parse_compound_statement()?)),
            TokenType::If => self.parse_if_statement(),
            TokenType::For => self.parse_for_statement(),
            TokenType::While => self.parse_while_statement(),
            TokenType::Semicolon => {
                self.advance();
                Ok(Stmt::Empty)
            }
            _ => {
                let expr = self.parse_expression()?;
                self.expect(TokenType::Semicolon, "expression statement")?;
                Ok(Stmt::Expression(expr))
            }
        }
    }

    /// Parse `{ ... }` in a scope of its own
    pub fn parse_compound_statement(&mut self) -> Result<Vec<Stmt>, CompilerError> {
        self.expect(TokenType::LeftBrace, "compound statement")?;
        self.scopes.push_scope();

        let mut items = Vec::new();
        while !self.check(&TokenType::RightBrace) && !self.check(&TokenType::EndOfFile) {
            items.push(self.parse_block_item()?);
        }

        self.expect(TokenType::RightBrace, "compound statement")?;
        self.scopes.pop_scope();
        Ok(items)
    }

    fn parse_return_statement(&mut self) -> Result<Stmt, CompilerError> {
        self.expect(TokenType::Return, "return statement")?;
        let value = self.parse_expression()?;
        self.expect(TokenType::Semicolon, "return statement")?;
        Ok(Stmt::Return(value))
    }

    fn parse_if_statement(&mut self) -> Result<Stmt, CompilerError> {
        self.expect(TokenType::If, "if statement")?;
        self.expect(TokenType::LeftParen, "if statement")?;
        let condition = self.parse_expression()?;
        self.expect(TokenType::RightParen, "if statement")?;

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.match_token(&TokenType::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If { condition, then_branch, else_branch })
    }

    /// Parse `for (init; cond; update) body`; every clause may be empty and
    /// `init` may declare a variable scoped to the loop
    fn parse_for_statement(&mut self) -> Result<Stmt, CompilerError> {
        self.expect(TokenType::For, "for statement")?;
        self.expect(TokenType::LeftParen, "for statement")?;
        self.scopes.push_scope();

        let init = if self.check(&TokenType::Int) {
            match self.parse_declaration()? {
                Stmt::Expression(expr) => Some(expr),
                _ => None,
            }
        } else if self.match_token(&TokenType::Semicolon) {
            None
        } else {
            let expr = self.parse_expression()?;
            self.expect(TokenType::Semicolon, "for statement")?;
            Some(expr)
        };

        let condition = if self.check(&TokenType::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenType::Semicolon, "for statement")?;

        let update = if self.check(&TokenType::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenType::RightParen, "for statement")?;

        let body = Box::new(self.parse_statement()?);
        self.scopes.pop_scope();

        Ok(Stmt::For { init, condition, update, body })
    }

    fn parse_while_statement(&mut self) -> Result<Stmt, CompilerError> {
        self.expect(TokenType::While, "while statement")?;
        self.expect(TokenType::LeftParen, "while statement")?;
        let condition = self.parse_expression()?;
        self.expect(TokenType::RightParen, "while statement")?;
        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While { condition, body })
    }
}
