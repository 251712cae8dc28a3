//! Source location tracking for error messages.

use std::fmt;

/// A location in source text (line, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed, in characters not bytes)
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Location of `token` inside `line`, which is line number `line_no`.
    ///
    /// `token` must be a subslice of `line`; otherwise the column falls back to 1.
    pub fn of_token(line_no: u32, line: &str, token: &str) -> Self {
        let base = line.as_ptr() as usize;
        let at = token.as_ptr() as usize;
        let column = if at >= base && at <= base + line.len() {
            line[..at - base].chars().count() as u32 + 1
        } else {
            1
        };
        Self::new(line_no, column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(Location::new(12, 4).to_string(), "12:4");
    }

    #[test]
    fn test_of_token_column() {
        let line = "( 1 2 x )";
        let token = &line[6..7];
        assert_eq!(Location::of_token(3, line, token), Location::new(3, 7));
    }

    #[test]
    fn test_of_token_counts_chars_not_bytes() {
        let line = "é x";
        let token = &line[3..4];
        assert_eq!(Location::of_token(1, line, token).column, 3);
    }
}
