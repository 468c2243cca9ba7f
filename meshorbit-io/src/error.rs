//! Parse errors for mesh importers

use thiserror::Error;

/// A malformed line in a text mesh file
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("line {line}: expected magic token {expected:?}, found {found:?}")]
    BadMagic {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: expected {expected} {what}, found {found}")]
    MissingTokens {
        line: usize,
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid {what} {token:?}")]
    InvalidNumber {
        line: usize,
        what: &'static str,
        token: String,
    },

    #[error("line {line}: face has {count} vertices, need at least 3")]
    FaceTooSmall { line: usize, count: usize },

    #[error("line {line}: vertex index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        line: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("line {line}: non-finite coordinate {value}")]
    NonFinite { line: usize, value: f32 },

    #[error("line {line}: not valid UTF-8 text")]
    InvalidText { line: usize },

    #[error("unexpected end of file, expected {what}")]
    UnexpectedEof { what: &'static str },
}

impl From<ParseError> for meshorbit_core::Error {
    fn from(e: ParseError) -> Self {
        meshorbit_core::Error::Format(e.to_string())
    }
}
