//! Identifier and literal scanning
//!
//! Integer literals are decimal only. A character literal is exactly one
//! character (or one escape sequence) between single quotes and yields an
//! integer literal holding the character code.

use crate::lexer::{Lexer, TokenType};
use x64cc_common::CompilerError;

impl Lexer {
    /// Tokenize an identifier or keyword
    pub(crate) fn tokenize_identifier(&mut self) -> TokenType {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        TokenType::keyword(&identifier).unwrap_or(TokenType::Identifier(identifier))
    }

    /// Tokenize a decimal integer literal
    pub(crate) fn tokenize_integer(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.current_location();
        let mut value: i64 = 0;

        while let Some(digit) = self.current_char().and_then(|c| c.to_digit(10)) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(digit)))
                .ok_or_else(|| {
                    CompilerError::lexer_error("Integer literal is too large", start)
                })?;
            self.advance();
        }

        Ok(TokenType::IntLiteral(value))
    }

    /// Tokenize a character literal
    pub(crate) fn tokenize_char_literal(&mut self) -> Result<TokenType, CompilerError> {
        self.advance(); // Skip opening quote

        let value = match self.advance() {
            Some('\\') => self.parse_escape_sequence()?,
            Some(ch) => ch as i64,
            None => {
                return Err(CompilerError::lexer_error(
                    "Unclosed character literal at end of input",
                    self.current_location(),
                ))
            }
        };

        if !self.eat('\'') {
            let found = self
                .current_char()
                .map(|c| format!("'{}'", c.escape_default()))
                .unwrap_or_else(|| "end of input".to_string());
            return Err(CompilerError::lexer_error(
                format!("Unclosed character literal, found {found}"),
                self.current_location(),
            ));
        }

        Ok(TokenType::IntLiteral(value))
    }

    fn parse_escape_sequence(&mut self) -> Result<i64, CompilerError> {
        let location = self.current_location();
        match self.advance() {
            Some('n') => Ok(b'\n' as i64),
            Some('t') => Ok(b'\t' as i64),
            Some('r') => Ok(b'\r' as i64),
            Some('0') => Ok(0),
            Some('\\') => Ok(b'\\' as i64),
            Some('\'') => Ok(b'\'' as i64),
            Some('"') => Ok(b'"' as i64),
            Some(ch) => Err(CompilerError::lexer_error(
                format!("Unknown escape sequence '\\{ch}'"),
                location,
            )),
            None => Err(CompilerError::lexer_error(
                "Unclosed character literal at end of input",
                location,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{tokenize, TokenType};

    #[test]
    fn test_char_escapes() {
        let tokens = tokenize(r"'\n' '\t' '\0' '\'' '\\'").unwrap();

        assert_eq!(tokens.len(), 6); // 5 chars + EOF
        assert_eq!(tokens[0].token_type, TokenType::IntLiteral(10));
        assert_eq!(tokens[1].token_type, TokenType::IntLiteral(9));
        assert_eq!(tokens[2].token_type, TokenType::IntLiteral(0));
        assert_eq!(tokens[3].token_type, TokenType::IntLiteral(39));
        assert_eq!(tokens[4].token_type, TokenType::IntLiteral(92));
    }

    #[test]
    fn test_integer_overflow() {
        assert!(tokenize("99999999999999999999").is_err());
        assert_eq!(
            tokenize("9223372036854775807").unwrap()[0].token_type,
            TokenType::IntLiteral(i64::MAX)
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = tokenize("integer returned").unwrap();
        assert_eq!(tokens[0].token_type, TokenType::Identifier("integer".to_string()));
        assert_eq!(tokens[1].token_type, TokenType::Identifier("returned".to_string()));
    }
}
