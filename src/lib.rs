pub mod ast;
pub mod error;
pub mod fixtures;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::ScribeError;

use ast::Stmt;

/// Scans and parses `source` in one pass, merging both components'
/// diagnostics. The statement list is always returned, possibly partial.
pub fn build(source: &str) -> (Vec<Stmt<'_>>, Vec<ScribeError>) {
    let (tokens, lex_errors) = lexer::tokenize(source);
    let (statements, parse_errors) = parser::parse(tokens);

    let mut diagnostics: Vec<ScribeError> =
        lex_errors.into_iter().map(ScribeError::from).collect();
    diagnostics.extend(parse_errors.into_iter().map(ScribeError::from));

    (statements, diagnostics)
}
