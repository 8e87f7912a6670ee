use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected \"{character}\" on line {line} [start {start}, end {end}]")]
    UnexpectedCharacter {
        character: char,
        line: usize,
        start: usize,
        end: usize,
    },
    #[error("Unterminated string on line {line} [start {start}, end {end}]")]
    UnterminatedString {
        line: usize,
        start: usize,
        end: usize,
    },
    #[error("Invalid number literal '{literal}' on line {line} [start {start}, end {end}]")]
    InvalidNumberLiteral {
        literal: String,
        line: usize,
        start: usize,
        end: usize,
    },
}
