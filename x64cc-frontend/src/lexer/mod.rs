//! Lexer
//!
//! Converts source text into a stream of tokens terminated by exactly one
//! `EndOfFile` token. Whitespace and comments are skipped; every token records
//! the location of its first character.

pub mod literals;
pub mod operators;
pub mod token;

pub use token::{Token, TokenType};

use log::debug;
use x64cc_common::{CompilerError, SourceLocation};

/// Single-pass scanner with one character of lookahead
pub struct Lexer {
    pub(crate) input: Vec<char>,
    pub(crate) position: usize,
    pub(crate) location: SourceLocation,
}

impl Lexer {
    /// Create a new lexer
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            location: SourceLocation::start(),
        }
    }

    /// Get current character
    pub(crate) fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    pub(crate) fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Advance to next character
    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        self.location.advance(ch);
        Some(ch)
    }

    /// Consume the current character if it equals `expected`
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.current_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Get current location
    pub(crate) fn current_location(&self) -> SourceLocation {
        self.location
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) -> Result<(), CompilerError> {
        loop {
            match (self.current_char(), self.peek_char(1)) {
                (Some(ch), _) if ch.is_whitespace() => {
                    self.advance();
                }
                (Some('/'), Some('/')) => self.skip_line_comment(),
                (Some('/'), Some('*')) => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Get next token
    pub fn next_token(&mut self) -> Result<Token, CompilerError> {
        self.skip_trivia()?;

        let start_location = self.current_location();

        let token_type = match self.current_char() {
            None => TokenType::EndOfFile,
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.tokenize_identifier(),
            Some(ch) if ch.is_ascii_digit() => self.tokenize_integer()?,
            Some('\'') => self.tokenize_char_literal()?,
            Some(ch) => self.tokenize_operator(ch),
        };

        Ok(Token::new(token_type, start_location))
    }

    /// Tokenize entire input into a vector of tokens
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompilerError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token_type, TokenType::EndOfFile);
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        debug!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }
}

/// Convenience wrapper: tokenize a whole source text
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompilerError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn types(source: &str) -> Vec<TokenType> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn test_keywords() {
        let tokens = types("int main return if else for while");

        assert_eq!(
            tokens,
            vec![
                TokenType::Int,
                TokenType::Identifier("main".to_string()),
                TokenType::Return,
                TokenType::If,
                TokenType::Else,
                TokenType::For,
                TokenType::While,
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_operators() {
        let tokens = types("+ - * / % == != < > <= >= && || ++ -- << >>");

        let expected = vec![
            TokenType::Plus, TokenType::Minus, TokenType::Star, TokenType::Slash,
            TokenType::Percent, TokenType::EqualEqual, TokenType::BangEqual,
            TokenType::Less, TokenType::Greater, TokenType::LessEqual,
            TokenType::GreaterEqual, TokenType::AmpersandAmpersand,
            TokenType::PipePipe, TokenType::PlusPlus, TokenType::MinusMinus,
            TokenType::LeftShift, TokenType::RightShift, TokenType::EndOfFile,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_assignment_operators() {
        let tokens = types("= += -= *= /= %= &= |= ^= <<= >>=");

        let expected = vec![
            TokenType::Equal, TokenType::PlusEqual, TokenType::MinusEqual,
            TokenType::StarEqual, TokenType::SlashEqual, TokenType::PercentEqual,
            TokenType::AmpersandEqual, TokenType::PipeEqual, TokenType::CaretEqual,
            TokenType::LeftShiftEqual, TokenType::RightShiftEqual, TokenType::EndOfFile,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_maximal_munch_without_spaces() {
        // `a&&b` and `a&b` must not be confused, nor `x<<=1` with `x<<`
        assert_eq!(
            types("a&&b&c"),
            vec![
                TokenType::Identifier("a".to_string()),
                TokenType::AmpersandAmpersand,
                TokenType::Identifier("b".to_string()),
                TokenType::Ampersand,
                TokenType::Identifier("c".to_string()),
                TokenType::EndOfFile,
            ]
        );
        assert_eq!(
            types("x<<=1"),
            vec![
                TokenType::Identifier("x".to_string()),
                TokenType::LeftShiftEqual,
                TokenType::IntLiteral(1),
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_literals() {
        let tokens = types("42 'a' 007");
        assert_eq!(
            tokens,
            vec![
                TokenType::IntLiteral(42),
                TokenType::IntLiteral(97),
                TokenType::IntLiteral(7),
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        let tokens = types("variable _private var123 __special");

        assert_eq!(tokens.len(), 5); // 4 identifiers + EOF
        assert_eq!(tokens[0], TokenType::Identifier("variable".to_string()));
        assert_eq!(tokens[1], TokenType::Identifier("_private".to_string()));
        assert_eq!(tokens[2], TokenType::Identifier("var123".to_string()));
    }

    #[test]
    fn test_unknown_character_is_punct() {
        assert_eq!(types("@"), vec![TokenType::Punct('@'), TokenType::EndOfFile]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = types("// line comment\nint /* block\ncomment */ x;");
        assert_eq!(
            tokens,
            vec![
                TokenType::Int,
                TokenType::Identifier("x".to_string()),
                TokenType::Semicolon,
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("int a;\n  return a;").unwrap();

        assert_eq!(tokens[0].location, SourceLocation::new(1, 0));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 4));
        assert_eq!(tokens[2].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 2));
        assert_eq!(tokens[4].location, SourceLocation::new(2, 9));
    }

    #[test]
    fn test_single_eof() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_type, TokenType::EndOfFile);

        let tokens = tokenize("  \n\t ").unwrap();
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_unterminated_char_literal() {
        let err = tokenize("'ab'").unwrap_err();
        match err {
            CompilerError::LexError { location, message } => {
                assert_eq!(location, SourceLocation::new(1, 2));
                assert!(message.contains("Unclosed character literal"), "{message}");
                assert!(message.contains("'b'"), "{message}");
            }
            other => panic!("Expected lexical error, got {other:?}"),
        }

        assert!(tokenize("'a").is_err());
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert!(matches!(
            tokenize("int /* never closed"),
            Err(CompilerError::LexError { .. })
        ));
    }
}
