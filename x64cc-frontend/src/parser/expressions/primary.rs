//! Primary expression parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::Parser;
use crate::semantic::SemanticError;
use x64cc_common::CompilerError;

impl Parser {
    /// Parse primary expression
    pub fn parse_primary_expression(&mut self) -> Result<Expr, CompilerError> {
        let location = self.current_location();

        match self.peek_type().clone() {
            TokenType::IntLiteral(value) => {
                self.advance();
                Ok(Expr::Number(value))
            }
            TokenType::Identifier(name) => {
                self.advance();

                if self.match_token(&TokenType::LeftParen) {
                    let args = self.parse_argument_list()?;
                    return Ok(Expr::Call { name, args, ty: None, location });
                }

                let var = self
                    .scopes
                    .lookup(&name)
                    .ok_or_else(|| SemanticError::UndefinedVariable { name: name.clone(), location })?;
                Ok(Expr::Identifier { name, var, ty: None })
            }
            TokenType::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenType::RightParen, "parenthesized expression")?;
                Ok(expr)
            }
            _ => Err(self.unexpected("expression".to_string()).into()),
        }
    }

    /// Parse call arguments after the opening parenthesis
    fn parse_argument_list(&mut self) -> Result<Vec<Expr>, CompilerError> {
        let mut args = Vec::new();

        if !self.check(&TokenType::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(&TokenType::Comma) {
                    break;
                }
            }
        }

        self.expect(TokenType::RightParen, "function call")?;
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use x64cc_common::{CompilerError, SourceLocation};

    #[test]
    fn test_undefined_identifier() {
        let err = parse(tokenize("{ return nope; }").unwrap()).unwrap_err();
        match err {
            CompilerError::Semantic { message, location } => {
                assert!(message.contains("nope"), "{message}");
                assert_eq!(location, SourceLocation::new(1, 9));
            }
            other => panic!("Expected semantic error, got {other:?}"),
        }
    }

    #[test]
    fn test_calls_need_no_declaration() {
        assert!(parse(tokenize("{ return foo(); }").unwrap()).is_ok());
        assert!(parse(tokenize("{ return foo(1, 2, 3); }").unwrap()).is_ok());
    }

    #[test]
    fn test_unexpected_token_in_expression() {
        let err = parse(tokenize("{ return ; }").unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "Parse error at 1:9: Expected expression, found ';'");
    }

    #[test]
    fn test_stray_punctuation() {
        assert!(parse(tokenize("{ return 1 @ 2; }").unwrap()).is_err());
    }
}
