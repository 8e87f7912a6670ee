use thiserror::Error;

use crate::lexer::LexError;
use crate::parser::ParseError;

/// Any diagnostic the front end can emit. Neither kind aborts scanning or
/// parsing; callers decide what "fail on error" means.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScribeError {
    #[error("[Scribe:LexicalError]: {0}")]
    Lexical(#[from] LexError),
    #[error("[Scribe:SyntaxError]: {0}")]
    Syntax(#[from] ParseError),
}
