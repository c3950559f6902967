//! Source location tracking for error reporting

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the source text.
///
/// `line` is 1-based; `column` is the 0-based character offset within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Location of the first character of a source text
    pub fn start() -> Self {
        Self::new(1, 0)
    }

    /// Advance past one character
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location() {
        let loc = SourceLocation::new(42, 10);
        assert_eq!(loc.line, 42);
        assert_eq!(loc.column, 10);
        assert_eq!(format!("{}", loc), "42:10");
    }

    #[test]
    fn test_advance() {
        let mut loc = SourceLocation::start();
        loc.advance('h');
        loc.advance('i');
        assert_eq!(loc, SourceLocation::new(1, 2));

        loc.advance('\n');
        assert_eq!(loc, SourceLocation::new(2, 0));

        loc.advance('t');
        assert_eq!(loc, SourceLocation::new(2, 1));
    }
}
