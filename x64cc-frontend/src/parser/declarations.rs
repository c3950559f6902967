//! Declaration parsing
//! 
//! Handles function definitions, parameters and local variable
//! declarations, including pointer stars and array dimensions.

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};
use crate::semantic::SemanticError;
use crate::types::{Type, MAX_OBJECT_SIZE};
use log::trace;
use x64cc_common::{CompilerError, SourceLocation};

/// Deepest array nesting a declaration may spell out
const MAX_ARRAY_DIMENSIONS: usize = 2;

impl Parser {
    /// Parse `int name(params) { body }`
    pub fn parse_function_definition(&mut self) -> Result<FunctionDef, CompilerError> {
        let location = self.current_location();
        self.expect(TokenType::Int, "function definition")?;
        let (name, _) = self.expect_identifier("function definition")?;
        self.expect(TokenType::LeftParen, "function definition")?;

        // The parameter scope doubles as the body's top-level scope
        self.scopes.push_scope();

        let mut params = Vec::new();
        if !self.check(&TokenType::RightParen) {
            loop {
                params.push(self.parse_parameter()?);
                if !self.match_token(&TokenType::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenType::RightParen, "parameter list")?;

        self.expect(TokenType::LeftBrace, "function body")?;
        let mut body = Vec::new();
        while !self.check(&TokenType::RightBrace) && !self.check(&TokenType::EndOfFile) {
            body.push(self.parse_block_item()?);
        }
        self.expect(TokenType::RightBrace, "function body")?;

        self.scopes.pop_scope();
        let locals = self.scopes.take_locals();
        trace!("function '{}': {} param(s), {} local(s)", name, params.len(), locals.len());

        Ok(FunctionDef {
            name,
            params,
            body,
            locals,
            ty: None,
            location,
        })
    }

    /// Parse `int *name[N]...` in a parameter list
    fn parse_parameter(&mut self) -> Result<Expr, CompilerError> {
        self.expect(TokenType::Int, "parameter")?;
        let base = self.parse_pointer_stars(Type::Int);
        let (name, location) = self.expect_identifier("parameter")?;
        let ty = self.parse_array_suffix(base, true)?;

        // An array parameter's slot holds the caller's pointer
        let indirect = ty.is_array();
        self.declare_variable(name, ty, indirect, location)
    }

    /// Parse a local declaration, with optional initializer
    ///
    /// `int x = e;` becomes the expression statement `x = e`; a declaration
    /// without initializer leaves an empty statement behind.
    pub fn parse_declaration(&mut self) -> Result<Stmt, CompilerError> {
        self.expect(TokenType::Int, "declaration")?;
        let base = self.parse_pointer_stars(Type::Int);
        let (name, location) = self.expect_identifier("declaration")?;
        let ty = self.parse_array_suffix(base, false)?;
        let is_array = ty.is_array();

        let target = self.declare_variable(name.clone(), ty, false, location)?;

        let stmt = if self.check(&TokenType::Equal) {
            let init_location = self.current_location();
            self.advance();
            if is_array {
                return Err(ParseError::InvalidDeclaration {
                    message: format!("array '{}' cannot have an initializer", name),
                    location: init_location,
                }
                .into());
            }
            let value = self.parse_expression()?;
            Stmt::Expression(Expr::assign(target, value))
        } else {
            Stmt::Empty
        };

        self.expect(TokenType::Semicolon, "declaration")?;
        Ok(stmt)
    }

    fn parse_pointer_stars(&mut self, mut ty: Type) -> Type {
        while self.match_token(&TokenType::Star) {
            ty = Type::pointer_to(ty);
        }
        ty
    }

    /// Parse `[N][M]...` after a declarator name
    ///
    /// Dimensions are collected left to right and wrapped from the innermost
    /// outward, so `int a[3][2]` is an array of 3 arrays of 2 ints. At most two
    /// dimensions are accepted. An empty `[]` is only accepted as the
    /// outermost dimension of a parameter.
    fn parse_array_suffix(&mut self, base: Type, allow_unsized: bool) -> Result<Type, CompilerError> {
        let start = self.current_location();
        let mut dims = Vec::new();

        while self.check(&TokenType::LeftBracket) {
            let location = self.current_location();
            if dims.len() == MAX_ARRAY_DIMENSIONS {
                return Err(ParseError::InvalidDeclaration {
                    message: format!("arrays of more than {} dimensions are not supported", MAX_ARRAY_DIMENSIONS),
                    location,
                }
                .into());
            }
            self.advance();

            if self.match_token(&TokenType::RightBracket) {
                if !allow_unsized || !dims.is_empty() {
                    return Err(ParseError::InvalidDeclaration {
                        message: "array dimension must be given here".to_string(),
                        location,
                    }
                    .into());
                }
                dims.push(None);
                continue;
            }

            let len = match self.peek_type() {
                TokenType::IntLiteral(n) => *n as u64,
                _ => return Err(self.unexpected("array length in declaration".to_string()).into()),
            };
            self.advance();
            self.expect(TokenType::RightBracket, "array declaration")?;
            dims.push(Some(len));
        }

        // Every level is bounded, so an unsized outer dimension cannot hide
        // an oversized element
        let mut ty = base;
        for len in dims.into_iter().rev() {
            ty = Type::array_of(ty, len);
            if ty.checked_size().map_or(true, |size| size > MAX_OBJECT_SIZE) {
                return Err(ParseError::InvalidDeclaration {
                    message: format!("array of type '{}' exceeds {} bytes", ty, MAX_OBJECT_SIZE),
                    location: start,
                }
                .into());
            }
        }
        Ok(ty)
    }

    /// Declare a variable in the innermost scope and return an identifier for it
    fn declare_variable(
        &mut self,
        name: String,
        ty: Type,
        indirect: bool,
        location: SourceLocation,
    ) -> Result<Expr, CompilerError> {
        let variable = Variable {
            name: name.clone(),
            ty,
            offset: None,
            indirect,
        };
        let var = self
            .scopes
            .declare(variable)
            .ok_or_else(|| SemanticError::Redeclaration { name: name.clone(), location })?;

        Ok(Expr::Identifier { name, var, ty: None })
    }
}
