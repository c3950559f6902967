//! Recursive descent parser
//! 
//! Builds the AST from the token stream with one token of lookahead. Names
//! are resolved against a stack of lexical scopes as they are parsed, so an
//! identifier node already knows which variable it refers to.

pub mod declarations;
pub mod errors;
pub mod expressions;
pub mod scope;
pub mod statements;

use crate::ast::*;
use crate::lexer::{Token, TokenType};
use log::debug;
use x64cc_common::{CompilerError, SourceLocation};

pub use errors::ParseError;
pub use scope::ScopeStack;

/// Name given to the function wrapping a bare top-level body
pub const IMPLICIT_ENTRY: &str = "main";

pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) eof: Token,
    pub(crate) scopes: ScopeStack,
}

impl Parser {
    /// Create a new parser
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map(|t| t.location)
            .unwrap_or_else(SourceLocation::start);
        tokens.retain(|t| !matches!(t.token_type, TokenType::EndOfFile));

        Self {
            tokens,
            position: 0,
            eof: Token::eof(end),
            scopes: ScopeStack::new(),
        }
    }

    /// Peek at current token without consuming
    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.eof)
    }

    pub(crate) fn peek_type(&self) -> &TokenType {
        &self.peek().token_type
    }

    /// Peek `offset` tokens past the current one
    pub(crate) fn peek_ahead(&self, offset: usize) -> &TokenType {
        &self
            .tokens
            .get(self.position + offset)
            .unwrap_or(&self.eof)
            .token_type
    }

    /// Get current token and advance
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    /// Check if current token matches expected type
    pub(crate) fn check(&self, token_type: &TokenType) -> bool {
        std::mem::discriminant(self.peek_type()) == std::mem::discriminant(token_type)
    }

    /// Consume token if it matches expected type
    pub(crate) fn match_token(&mut self, token_type: &TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect and consume a specific token type
    pub(crate) fn expect(&mut self, token_type: TokenType, context: &str) -> Result<Token, ParseError> {
        if self.check(&token_type) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(format!("{} in {}", token_type, context)))
        }
    }

    /// Expect an identifier and return its name
    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<(String, SourceLocation), ParseError> {
        let token = self.peek().clone();
        match token.token_type {
            TokenType::Identifier(name) => {
                self.advance();
                Ok((name, token.location))
            }
            _ => Err(self.unexpected(format!("identifier in {}", context))),
        }
    }

    /// Error for the current token not being `expected`
    pub(crate) fn unexpected(&self, expected: String) -> ParseError {
        let found = self.peek().clone();
        if matches!(found.token_type, TokenType::EndOfFile) {
            ParseError::UnexpectedEndOfFile { expected, location: found.location }
        } else {
            ParseError::UnexpectedToken { expected, found }
        }
    }

    /// Get current location for error reporting
    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Parse a whole translation unit
    ///
    /// Accepted forms: a list of function definitions, a single bare
    /// compound statement, or a bare list of declarations and statements.
    /// The last two become the body of an implicit `int main()`.
    pub fn parse_program(&mut self) -> Result<Program, CompilerError> {
        let functions = if self.check(&TokenType::EndOfFile) {
            Vec::new()
        } else if self.at_function_definition() {
            let mut functions = Vec::new();
            while !self.check(&TokenType::EndOfFile) {
                functions.push(self.parse_function_definition()?);
            }
            functions
        } else {
            vec![self.parse_implicit_main()?]
        };

        debug!("parsed {} function(s)", functions.len());
        Ok(Program { functions })
    }

    fn at_function_definition(&self) -> bool {
        self.check(&TokenType::Int)
            && matches!(self.peek_ahead(1), TokenType::Identifier(_))
            && matches!(self.peek_ahead(2), TokenType::LeftParen)
    }

    fn parse_implicit_main(&mut self) -> Result<FunctionDef, CompilerError> {
        let location = self.current_location();
        self.scopes.push_scope();

        let body = if self.check(&TokenType::LeftBrace) {
            let block = self.parse_compound_statement()?;
            self.expect(TokenType::EndOfFile, "program")?;
            block
        } else {
            let mut items = Vec::new();
            while !self.check(&TokenType::EndOfFile) {
                items.push(self.parse_block_item()?);
            }
            items
        };

        self.scopes.pop_scope();
        Ok(FunctionDef {
            name: IMPLICIT_ENTRY.to_string(),
            params: Vec::new(),
            body,
            locals: self.scopes.take_locals(),
            ty: None,
            location,
        })
    }
}

/// Parse a token stream into a program
pub fn parse(tokens: Vec<Token>) -> Result<Program, CompilerError> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::types::Type;
    use pretty_assertions::assert_eq;

    fn parse_str(input: &str) -> Result<Program, CompilerError> {
        parse(tokenize(input)?)
    }

    fn ident(name: &str, id: usize) -> Expr {
        Expr::Identifier { name: name.to_string(), var: VarId(id), ty: None }
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(parse_str("").unwrap(), Program::default());
    }

    #[test]
    fn test_bare_block_becomes_main() {
        let program = parse_str("{ int a; a = 3; return a; }").unwrap();
        assert_eq!(program.functions.len(), 1);

        let main = &program.functions[0];
        assert_eq!(main.name, "main");
        assert!(main.params.is_empty());
        assert_eq!(main.locals, vec![Variable::new("a", Type::Int)]);
        assert_eq!(
            main.body,
            vec![
                Stmt::Empty,
                Stmt::Expression(Expr::assign(ident("a", 0), Expr::Number(3))),
                Stmt::Return(ident("a", 0)),
            ]
        );
    }

    #[test]
    fn test_bare_statement_list_becomes_main() {
        let program = parse_str("int x; x = 5; return x;").unwrap();
        assert_eq!(program.functions.len(), 1);
        assert_eq!(program.functions[0].body.len(), 3);
    }

    #[test]
    fn test_function_definitions() {
        let program =
            parse_str("int add(int a, int b) { return a+b; } int main() { return add(2,3); }")
                .unwrap();
        assert_eq!(program.functions.len(), 2);

        let add = &program.functions[0];
        assert_eq!(add.name, "add");
        assert_eq!(add.params, vec![ident("a", 0), ident("b", 1)]);
        assert_eq!(
            add.body,
            vec![Stmt::Return(Expr::binary(BinaryOp::Add, ident("a", 0), ident("b", 1)))]
        );

        match &program.functions[1].body[0] {
            Stmt::Return(Expr::Call { name, args, .. }) => {
                assert_eq!(name, "add");
                assert_eq!(args, &vec![Expr::Number(2), Expr::Number(3)]);
            }
            other => panic!("Expected return of a call, got {other:?}"),
        }
    }

    #[test]
    fn test_operator_precedence() {
        let program = parse_str("return 2 + 3 * 4;").unwrap();

        // Should parse as 2 + (3 * 4)
        assert_eq!(
            program.functions[0].body[0],
            Stmt::Return(Expr::binary(
                BinaryOp::Add,
                Expr::Number(2),
                Expr::binary(BinaryOp::Mul, Expr::Number(3), Expr::Number(4)),
            ))
        );
    }

    #[test]
    fn test_missing_paren_reports_token() {
        let err = parse_str("int main() { if (1 { return 1; } }").unwrap_err();
        match &err {
            CompilerError::ParseError { message, location } => {
                assert!(message.contains("')'"), "{message}");
                assert!(message.contains("'{'"), "{message}");
                assert_eq!(location.line, 1);
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_end_of_input() {
        let err = parse_str("int main() { return 1;").unwrap_err();
        assert!(err.to_string().contains("end of input"), "{err}");
    }

    #[test]
    fn test_trailing_tokens_after_bare_block() {
        assert!(parse_str("{ return 1; } 2;").is_err());
    }
}
