//! Token definitions for the lexer
//!
//! This module defines token types and the Token struct.

use serde::{Deserialize, Serialize};
use std::fmt;
use x64cc_common::SourceLocation;

/// Token types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    // Literals (character literals are folded into integer literals)
    IntLiteral(i64),

    Identifier(String),

    // Keywords
    Int, Return, If, Else, For, While,

    // Operators
    Plus,           // +
    Minus,          // -
    Star,           // *
    Slash,          // /
    Percent,        // %
    Ampersand,      // &
    Pipe,           // |
    Caret,          // ^
    Bang,           // !
    Equal,          // =
    Less,           // <
    Greater,        // >

    // Compound operators
    PlusPlus,       // ++
    MinusMinus,     // --
    LeftShift,      // <<
    RightShift,     // >>
    LessEqual,      // <=
    GreaterEqual,   // >=
    EqualEqual,     // ==
    BangEqual,      // !=
    AmpersandAmpersand, // &&
    PipePipe,       // ||

    // Assignment operators
    PlusEqual,      // +=
    MinusEqual,     // -=
    StarEqual,      // *=
    SlashEqual,     // /=
    PercentEqual,   // %=
    AmpersandEqual, // &=
    PipeEqual,      // |=
    CaretEqual,     // ^=
    LeftShiftEqual, // <<=
    RightShiftEqual, // >>=

    // Delimiters
    LeftParen,      // (
    RightParen,     // )
    LeftBrace,      // {
    RightBrace,     // }
    LeftBracket,    // [
    RightBracket,   // ]
    Semicolon,      // ;
    Comma,          // ,

    /// Any other single character; the parser rejects it where it appears
    Punct(char),

    EndOfFile,
}

impl TokenType {
    /// Keyword table lookup
    pub fn keyword(word: &str) -> Option<TokenType> {
        match word {
            "int" => Some(TokenType::Int),
            "return" => Some(TokenType::Return),
            "if" => Some(TokenType::If),
            "else" => Some(TokenType::Else),
            "for" => Some(TokenType::For),
            "while" => Some(TokenType::While),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::IntLiteral(n) => write!(f, "{n}"),
            TokenType::Identifier(s) => write!(f, "{s}"),

            TokenType::Int => write!(f, "'int'"),
            TokenType::Return => write!(f, "'return'"),
            TokenType::If => write!(f, "'if'"),
            TokenType::Else => write!(f, "'else'"),
            TokenType::For => write!(f, "'for'"),
            TokenType::While => write!(f, "'while'"),

            TokenType::Plus => write!(f, "'+'"),
            TokenType::Minus => write!(f, "'-'"),
            TokenType::Star => write!(f, "'*'"),
            TokenType::Slash => write!(f, "'/'"),
            TokenType::Percent => write!(f, "'%'"),
            TokenType::Ampersand => write!(f, "'&'"),
            TokenType::Pipe => write!(f, "'|'"),
            TokenType::Caret => write!(f, "'^'"),
            TokenType::Bang => write!(f, "'!'"),
            TokenType::Equal => write!(f, "'='"),
            TokenType::Less => write!(f, "'<'"),
            TokenType::Greater => write!(f, "'>'"),

            TokenType::PlusPlus => write!(f, "'++'"),
            TokenType::MinusMinus => write!(f, "'--'"),
            TokenType::LeftShift => write!(f, "'<<'"),
            TokenType::RightShift => write!(f, "'>>'"),
            TokenType::LessEqual => write!(f, "'<='"),
            TokenType::GreaterEqual => write!(f, "'>='"),
            TokenType::EqualEqual => write!(f, "'=='"),
            TokenType::BangEqual => write!(f, "'!='"),
            TokenType::AmpersandAmpersand => write!(f, "'&&'"),
            TokenType::PipePipe => write!(f, "'||'"),

            TokenType::PlusEqual => write!(f, "'+='"),
            TokenType::MinusEqual => write!(f, "'-='"),
            TokenType::StarEqual => write!(f, "'*='"),
            TokenType::SlashEqual => write!(f, "'/='"),
            TokenType::PercentEqual => write!(f, "'%='"),
            TokenType::AmpersandEqual => write!(f, "'&='"),
            TokenType::PipeEqual => write!(f, "'|='"),
            TokenType::CaretEqual => write!(f, "'^='"),
            TokenType::LeftShiftEqual => write!(f, "'<<='"),
            TokenType::RightShiftEqual => write!(f, "'>>='"),

            TokenType::LeftParen => write!(f, "'('"),
            TokenType::RightParen => write!(f, "')'"),
            TokenType::LeftBrace => write!(f, "'{{'"),
            TokenType::RightBrace => write!(f, "'}}'"),
            TokenType::LeftBracket => write!(f, "'['"),
            TokenType::RightBracket => write!(f, "']'"),
            TokenType::Semicolon => write!(f, "';'"),
            TokenType::Comma => write!(f, "','"),

            TokenType::Punct(c) => write!(f, "'{c}'"),
            TokenType::EndOfFile => write!(f, "end of input"),
        }
    }
}

/// A token with the location where it starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(token_type: TokenType, location: SourceLocation) -> Self {
        Self { token_type, location }
    }

    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenType::EndOfFile, location)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.token_type, self.location)
    }
}
