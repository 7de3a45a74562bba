use std::result;

use thiserror::Error as ThisError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, ThisError)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("Unexpected character: {0}")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
    #[error("Invalid number.")]
    InvalidNumber(String),
}

/// A lexical error and the line it was raised on.
#[derive(Debug, Clone, PartialEq, ThisError)]
#[error("[line {line}] Error: {kind}")]
pub struct Error {
    kind: ErrorKind,
    line: usize,
}

impl Error {
    pub fn unexpected_character(line: usize, c: char) -> Error {
        Error { kind: ErrorKind::UnexpectedCharacter(c), line }
    }

    pub fn unterminated_string(line: usize) -> Error {
        Error { kind: ErrorKind::UnterminatedString, line }
    }

    pub fn invalid_number<S: Into<String>>(line: usize, text: S) -> Error {
        Error { kind: ErrorKind::InvalidNumber(text.into()), line }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_character_shows_the_character() {
        let e = Error::unexpected_character(3, '@');
        assert_eq!("[line 3] Error: Unexpected character: @", e.to_string());
    }

    #[test]
    fn unterminated_string() {
        let e = Error::unterminated_string(1);
        assert_eq!("[line 1] Error: Unterminated string.", e.to_string());
    }

    #[test]
    fn invalid_number_keeps_the_text_out_of_the_message() {
        let e = Error::invalid_number(7, "1.2.3");
        assert_eq!("[line 7] Error: Invalid number.", e.to_string());
        assert_eq!(&ErrorKind::InvalidNumber("1.2.3".into()), e.kind());
    }
}
