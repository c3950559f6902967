//! Operator and comment scanning
//!
//! Each operator character first looks one character ahead for `=` (or a
//! doubled character) so that the longest operator wins.

use crate::lexer::{Lexer, TokenType};
use x64cc_common::CompilerError;

impl Lexer {
    /// Skip a `//` comment up to (not including) the newline
    pub(crate) fn skip_line_comment(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip a `/* ... */` comment
    pub(crate) fn skip_block_comment(&mut self) -> Result<(), CompilerError> {
        let start = self.current_location();
        self.advance(); // Skip '/'
        self.advance(); // Skip '*'

        while let Some(ch) = self.current_char() {
            if ch == '*' && self.peek_char(1) == Some('/') {
                self.advance(); // Skip '*'
                self.advance(); // Skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(CompilerError::lexer_error("Unterminated block comment", start))
    }

    /// Tokenize punctuation starting with `ch`
    pub(crate) fn tokenize_operator(&mut self, ch: char) -> TokenType {
        self.advance();

        match ch {
            '+' => {
                if self.eat('+') {
                    TokenType::PlusPlus
                } else if self.eat('=') {
                    TokenType::PlusEqual
                } else {
                    TokenType::Plus
                }
            }
            '-' => {
                if self.eat('-') {
                    TokenType::MinusMinus
                } else if self.eat('=') {
                    TokenType::MinusEqual
                } else {
                    TokenType::Minus
                }
            }
            '*' => self.with_equal(TokenType::Star, TokenType::StarEqual),
            '/' => self.with_equal(TokenType::Slash, TokenType::SlashEqual),
            '%' => self.with_equal(TokenType::Percent, TokenType::PercentEqual),
            '!' => self.with_equal(TokenType::Bang, TokenType::BangEqual),
            '=' => self.with_equal(TokenType::Equal, TokenType::EqualEqual),
            '^' => self.with_equal(TokenType::Caret, TokenType::CaretEqual),
            '&' => {
                if self.eat('&') {
                    TokenType::AmpersandAmpersand
                } else {
                    self.with_equal(TokenType::Ampersand, TokenType::AmpersandEqual)
                }
            }
            '|' => {
                if self.eat('|') {
                    TokenType::PipePipe
                } else {
                    self.with_equal(TokenType::Pipe, TokenType::PipeEqual)
                }
            }
            '<' => {
                if self.eat('<') {
                    self.with_equal(TokenType::LeftShift, TokenType::LeftShiftEqual)
                } else {
                    self.with_equal(TokenType::Less, TokenType::LessEqual)
                }
            }
            '>' => {
                if self.eat('>') {
                    self.with_equal(TokenType::RightShift, TokenType::RightShiftEqual)
                } else {
                    self.with_equal(TokenType::Greater, TokenType::GreaterEqual)
                }
            }
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '{' => TokenType::LeftBrace,
            '}' => TokenType::RightBrace,
            '[' => TokenType::LeftBracket,
            ']' => TokenType::RightBracket,
            ';' => TokenType::Semicolon,
            ',' => TokenType::Comma,
            other => TokenType::Punct(other),
        }
    }

    fn with_equal(&mut self, plain: TokenType, with_equal: TokenType) -> TokenType {
        if self.eat('=') {
            with_equal
        } else {
            plain
        }
    }
}
