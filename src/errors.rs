use thiserror::Error;

/// The result type for the `gridrex` crate.
pub type Result<T> = std::result::Result<T, GridrexError>;

/// The error type for the `gridrex` crate.
#[derive(Error, Debug)]
pub struct GridrexError {
    /// The source of the error.
    pub source: Box<GridrexErrorKind>,
}

impl GridrexError {
    /// Create a new `GridrexError`.
    pub fn new(kind: GridrexErrorKind) -> Self {
        GridrexError {
            source: Box::new(kind),
        }
    }

    /// Create an out-of-bounds error for the given coordinate and grid size.
    pub fn out_of_bounds(x: usize, y: usize, width: usize, height: usize) -> Self {
        GridrexError::new(GridrexErrorKind::OutOfBounds {
            x,
            y,
            width,
            height,
        })
    }

    /// Create an unknown-key error from anything that can be displayed as a key.
    pub fn unknown_key(key: impl std::fmt::Display) -> Self {
        GridrexError::new(GridrexErrorKind::UnknownKey(key.to_string()))
    }
}

impl std::fmt::Display for GridrexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum GridrexErrorKind {
    /// A coordinate lies outside the grid.
    #[error("coordinate ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        /// The offending column.
        x: usize,
        /// The offending row.
        y: usize,
        /// The grid width.
        width: usize,
        /// The grid height.
        height: usize,
    },

    /// A symbol, row or pattern key is not present in the respective id map.
    #[error("unknown key: {0}")]
    UnknownKey(String),

    /// A DFA was stepped with an out-of-range state or letter.
    #[error("invalid DFA state or letter: {0}")]
    InvalidState(String),

    /// A pattern string could not be parsed.
    #[error("malformed pattern: {0}")]
    MalformedPattern(String),

    /// An alphabet declaration is empty or contains duplicate symbols.
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = GridrexError::out_of_bounds(4, 2, 3, 3);
        assert_eq!(
            error.to_string(),
            "coordinate (4, 2) out of bounds for 3x3 grid"
        );
        let error = GridrexError::unknown_key('Q');
        assert_eq!(error.to_string(), "unknown key: Q");
    }
}
