use std::fmt;

use thiserror::Error;

use crate::ast::{Block, Expr, Stmt};
use crate::token::{Literal, Span, Token, TokenKind};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("End of file reached | line {line}")]
    UnexpectedEof { line: usize },
    #[error("{message} | [ln {line}, start {start}, end {end}] | got '{lexeme}'")]
    UnexpectedToken {
        message: String,
        found: TokenKind,
        lexeme: String,
        line: usize,
        start: usize,
        end: usize,
    },
}

/// Operators accepted on the right of a completed primary expression.
const BINARY_OPERATORS: [TokenKind; 14] = [
    TokenKind::Star,
    TokenKind::Minus,
    TokenKind::Plus,
    TokenKind::Exponent,
    TokenKind::Modulus,
    TokenKind::Slash,
    TokenKind::Equal,
    TokenKind::Greater,
    TokenKind::Less,
    TokenKind::GreaterEqual,
    TokenKind::LessEqual,
    TokenKind::EqualEqual,
    TokenKind::Or,
    TokenKind::And,
];

/// Lookahead set deciding between the single-condition and the
/// block-of-conditions `if` forms.
const CONDITION_STARTERS: [TokenKind; 6] = [
    TokenKind::String,
    TokenKind::Number,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Identifier,
    TokenKind::LeftParen,
];

/// Tokens that can begin an expression; used to decide whether an optional
/// value (store, set, exit) is present.
const EXPRESSION_STARTERS: [TokenKind; 12] = [
    TokenKind::String,
    TokenKind::Number,
    TokenKind::Seconds,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Identifier,
    TokenKind::LeftParen,
    TokenKind::LeftBracket,
    TokenKind::Minus,
    TokenKind::Not,
    TokenKind::Env,
    TokenKind::Start,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclKind {
    Property,
    Actor,
    Objective,
    Store,
    Set,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeclKind::Property => "property",
            DeclKind::Actor => "actor",
            DeclKind::Objective => "objective",
            DeclKind::Store => "store",
            DeclKind::Set => "set",
        };
        f.write_str(name)
    }
}

/// Recursive-descent parser over an EOF-terminated token stream.
///
/// A failure while parsing one top-level declaration is reported, one token
/// is discarded, and parsing resumes — so a single pass surfaces every
/// independent error and always yields a statement list.
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    current: usize,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    pub fn parse(mut self) -> (Vec<Stmt<'a>>, Vec<ParseError>) {
        let mut statements = Vec::new();

        while !self.is_eof() {
            match self.declare() {
                Ok(stmt) => statements.push(stmt),
                Err(error) => {
                    self.errors.push(error);
                    self.advance(); // discard exactly one token, then resume
                }
            }
        }

        (statements, self.errors)
    }

    /** Cursor primitives */

    fn token_at(&self, index: usize) -> Token<'a> {
        self.tokens.get(index).copied().unwrap_or(Token {
            kind: TokenKind::Eof,
            lexeme: None,
            literal: Literal::Undefined,
            span: Span::default(),
        })
    }

    fn peek(&self) -> Token<'a> {
        self.token_at(self.current)
    }

    fn previous(&self) -> Token<'a> {
        self.token_at(self.current.saturating_sub(1))
    }

    fn is_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token<'a> {
        if !self.is_eof() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_eof() && self.peek().kind == kind
    }

    fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|kind| self.check(*kind))
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    fn matches_any(&mut self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if self.matches(*kind) {
                return true;
            }
        }
        false
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token<'a>, ParseError> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.error(message))
    }

    fn error(&self, message: &str) -> ParseError {
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            return ParseError::UnexpectedEof {
                line: token.span.line,
            };
        }

        ParseError::UnexpectedToken {
            message: message.to_string(),
            found: token.kind,
            lexeme: token.text().to_string(),
            line: token.span.line,
            start: token.span.start,
            end: token.span.end,
        }
    }

    fn can_begin_expression(&self) -> bool {
        self.check_any(&EXPRESSION_STARTERS)
    }

    /** Expressions */

    fn express(&mut self) -> Result<Expr<'a>, ParseError> {
        if self.matches(TokenKind::Start) {
            return self.start();
        }

        if self.matches(TokenKind::Env) {
            return self.accessor();
        }

        if self.matches(TokenKind::Exit) {
            return self.exit();
        }

        let expr = self.expression()?;

        if self.matches(TokenKind::Continue) {
            if self.check(TokenKind::LeftBrace) {
                // The arrow introduced a condition body; the `{` belongs to
                // the statement layer.
                return Ok(expr);
            }
            return self.ternary(expr);
        }

        Ok(expr)
    }

    fn expression(&mut self) -> Result<Expr<'a>, ParseError> {
        if self.matches_any(&[TokenKind::Minus, TokenKind::Not]) {
            return self.unary();
        }

        let left = self.primary()?;

        if self.matches_any(&BINARY_OPERATORS) {
            return self.binary(left);
        }

        Ok(left)
    }

    fn primary(&mut self) -> Result<Expr<'a>, ParseError> {
        if self.matches_any(&[
            TokenKind::String,
            TokenKind::Number,
            TokenKind::False,
            TokenKind::True,
            TokenKind::Seconds,
        ]) {
            return Ok(self.literal());
        }

        if self.matches(TokenKind::LeftParen) {
            return self.grouping();
        }

        if self.matches(TokenKind::LeftBracket) {
            return self.array();
        }

        if self.matches(TokenKind::Identifier) {
            return Ok(Expr::Variable {
                name: self.previous(),
            });
        }

        Err(self.error("Expected an expression!"))
    }

    fn unary(&mut self) -> Result<Expr<'a>, ParseError> {
        let operator = self.previous();
        let right = self.express()?;

        Ok(Expr::Unary {
            operator,
            right: Box::new(right),
        })
    }

    fn binary(&mut self, left: Expr<'a>) -> Result<Expr<'a>, ParseError> {
        let operator = self.previous();
        let right = self.expression()?;

        Ok(Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn ternary(&mut self, condition: Expr<'a>) -> Result<Expr<'a>, ParseError> {
        let if_true = self.express()?;
        self.consume(
            TokenKind::Colon,
            "Expected ':' after the expression to denote the ternary's continuation.",
        )?;
        let if_false = self.express()?;

        Ok(Expr::Ternary {
            condition: Box::new(condition),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
        })
    }

    /// `true`/`false` keywords normalize to boolean values; everything else
    /// carries the literal the lexer scanned.
    fn literal(&mut self) -> Expr<'a> {
        let token = self.previous();
        let value = match token.kind {
            TokenKind::True => Literal::Boolean(true),
            TokenKind::False => Literal::Boolean(false),
            _ => token.literal,
        };

        Expr::Literal { value }
    }

    /// The scanned `$name` token becomes a macro call when a `(` follows,
    /// otherwise a plain environment accessor.
    fn accessor(&mut self) -> Result<Expr<'a>, ParseError> {
        let name = self.previous();

        if self.matches(TokenKind::LeftParen) {
            let args = self.expression_list(
                TokenKind::RightParen,
                "Expected ')' to close the macro arguments.",
            )?;
            return Ok(Expr::Macro { name, args });
        }

        Ok(Expr::Accessor { name })
    }

    fn grouping(&mut self) -> Result<Expr<'a>, ParseError> {
        let expr = self.express()?;
        self.consume(
            TokenKind::RightParen,
            "Expected \")\" to close a grouping expression.",
        )?;

        Ok(Expr::Grouping {
            expr: Box::new(expr),
        })
    }

    fn array(&mut self) -> Result<Expr<'a>, ParseError> {
        let expressions = self.expression_list(
            TokenKind::RightBracket,
            "Expected enclosing bracket (]) to an array expression.",
        )?;

        Ok(Expr::Array { expressions })
    }

    fn metadata(&mut self) -> Result<Expr<'a>, ParseError> {
        let args = self.expression_list(
            TokenKind::RightParen,
            "Expected enclosing parenthesis to a metadata expression.",
        )?;

        Ok(Expr::Metadata { args })
    }

    /// Collects expressions until `closing`, consuming an optional comma
    /// between elements. Shared by arrays, metadata, and macro arguments.
    fn expression_list(
        &mut self,
        closing: TokenKind,
        message: &str,
    ) -> Result<Vec<Expr<'a>>, ParseError> {
        let mut exprs = Vec::new();

        while !self.check(closing) {
            if self.is_eof() {
                return Err(self.error(message));
            }
            exprs.push(self.express()?);
            self.matches(TokenKind::Comma);
        }
        self.consume(closing, message)?;

        Ok(exprs)
    }

    fn start(&mut self) -> Result<Expr<'a>, ParseError> {
        let objective = self.consume(
            TokenKind::Identifier,
            "Expected an objective identifier to start!",
        )?;

        Ok(Expr::Start { objective })
    }

    fn exit(&mut self) -> Result<Expr<'a>, ParseError> {
        let value = if self.can_begin_expression() {
            Some(Box::new(self.express()?))
        } else {
            None
        };

        Ok(Expr::Exit { value })
    }

    /** Statements */

    fn declare(&mut self) -> Result<Stmt<'a>, ParseError> {
        if self.matches(TokenKind::Property) {
            return self.declaration(DeclKind::Property, false, false);
        }

        if self.matches(TokenKind::Objective) {
            return self.declaration(DeclKind::Objective, false, false);
        }

        if self.matches(TokenKind::Store) {
            return self.declaration(DeclKind::Store, true, false);
        }

        if self.matches(TokenKind::Scene) {
            return self.scene();
        }

        if self.matches(TokenKind::Do) {
            return self.do_body();
        }

        if self.matches(TokenKind::Interact) {
            return self.interact();
        }

        if self.matches(TokenKind::Actor) {
            return self.declaration(DeclKind::Actor, false, false);
        }

        self.statement()
    }

    fn statement(&mut self) -> Result<Stmt<'a>, ParseError> {
        if self.matches(TokenKind::If) {
            return self.if_statement();
        }

        if self.matches(TokenKind::Option) {
            return self.option();
        }

        if self.matches(TokenKind::Otherwise) {
            return self.otherwise();
        }

        if self.matches(TokenKind::Trigger) {
            return self.trigger();
        }

        if self.matches(TokenKind::Echo) {
            return self.echo();
        }

        if self.matches(TokenKind::Set) {
            return self.declaration(DeclKind::Set, false, false);
        }

        if self.matches(TokenKind::LeftBracket) {
            return self.dialogue();
        }

        if self.matches(TokenKind::Default) {
            self.consume(TokenKind::Objective, "Expected \"objective\" after default.")?;
            return self.declaration(DeclKind::Objective, false, true);
        }

        Ok(Stmt::Expression {
            expr: self.express()?,
        })
    }

    /// One routine services property/actor/objective/store/set; callers pass
    /// which optional pieces their form permits.
    fn declaration(
        &mut self,
        kind: DeclKind,
        has_metadata: bool,
        is_default: bool,
    ) -> Result<Stmt<'a>, ParseError> {
        let name = self.consume(
            TokenKind::Identifier,
            &format!("Expected an identifier for the {kind}."),
        )?;

        match kind {
            DeclKind::Property => {
                let value = self.express()?;
                Ok(Stmt::Property { name, value })
            }
            DeclKind::Actor => {
                let value = self.express()?;
                Ok(Stmt::Actor { name, value })
            }
            DeclKind::Objective => {
                let value = self.express()?;
                Ok(Stmt::Objective {
                    name,
                    default: is_default,
                    value,
                })
            }
            DeclKind::Store => {
                let identifier =
                    self.consume(TokenKind::Identifier, "Expected a storage key identifier.")?;
                let metadata = if has_metadata && self.matches(TokenKind::LeftParen) {
                    Some(self.metadata()?)
                } else {
                    None
                };
                let value = self.optional_value()?;
                Ok(Stmt::Store {
                    name,
                    identifier,
                    metadata,
                    value,
                })
            }
            DeclKind::Set => {
                let value = self.optional_value()?;
                Ok(Stmt::Set { name, value })
            }
        }
    }

    fn optional_value(&mut self) -> Result<Option<Expr<'a>>, ParseError> {
        if self.can_begin_expression() {
            return Ok(Some(self.express()?));
        }
        Ok(None)
    }

    fn block(&mut self, open_message: &str) -> Result<Block<'a>, ParseError> {
        self.consume(TokenKind::LeftBrace, open_message)?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) {
            if self.is_eof() {
                return Err(self.error("Expected '}' to close a block."));
            }
            statements.push(self.statement()?);
        }
        self.consume(TokenKind::RightBrace, "Expected '}' to close a block.")?;

        Ok(Block { statements })
    }

    /// Body of the block-of-conditions `if` form: condition arms with an
    /// optional trailing `otherwise`. The opening `{` is already consumed.
    fn conditions_block(&mut self) -> Result<Block<'a>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RightBrace) {
            if self.is_eof() {
                return Err(self.error("Expected '}' to close a conditions block."));
            }
            if self.matches(TokenKind::Otherwise) {
                statements.push(self.otherwise()?);
            } else {
                statements.push(self.condition()?);
            }
        }
        self.consume(
            TokenKind::RightBrace,
            "Expected '}' to close a conditions block.",
        )?;

        Ok(Block { statements })
    }

    fn condition(&mut self) -> Result<Stmt<'a>, ParseError> {
        let condition = self.express()?;
        let body = self.block("Expected \"{\" after -> to start a condition's body.")?;

        Ok(Stmt::Condition { condition, body })
    }

    fn otherwise(&mut self) -> Result<Stmt<'a>, ParseError> {
        self.consume(TokenKind::Continue, "Expected \"->\" after otherwise.")?;
        let body = self.block("Expected \"{\" to start the otherwise body.")?;

        Ok(Stmt::Otherwise { body })
    }

    /// Two grammatical forms: a leading expression token selects the
    /// single-condition form (with an optional `else`), anything else the
    /// block-of-conditions form.
    fn if_statement(&mut self) -> Result<Stmt<'a>, ParseError> {
        if self.check_any(&CONDITION_STARTERS) {
            let condition = self.express()?;
            let body = self.block("Expected \"{\" after a -> for the body start.")?;
            let else_body = if self.matches(TokenKind::Else) {
                Some(self.block("Expected \"{\" after else.")?)
            } else {
                None
            };

            return Ok(Stmt::If {
                condition: Some(condition),
                body,
                else_body,
            });
        }

        self.consume(TokenKind::LeftBrace, "Expected \"{\" after an if")?;
        let body = self.conditions_block()?;

        Ok(Stmt::If {
            condition: None,
            body,
            else_body: None,
        })
    }

    fn scene(&mut self) -> Result<Stmt<'a>, ParseError> {
        let name = self.consume(TokenKind::Identifier, "Expected a scene identifier.")?;
        let body = self.block("Expected \"{\" after a scene for the body start.")?;

        Ok(Stmt::Scene { name, body })
    }

    fn do_body(&mut self) -> Result<Stmt<'a>, ParseError> {
        let body = self.block("Expected \"{\" after do.")?;

        Ok(Stmt::Do { body })
    }

    /// The caller consumed the opening `[` of the `[Actor]` marker.
    fn dialogue(&mut self) -> Result<Stmt<'a>, ParseError> {
        let actor = self.consume(
            TokenKind::Identifier,
            "Expected an Actor to start a dialogue.",
        )?;
        self.consume(
            TokenKind::RightBracket,
            "Expected to close the dialogue Actor specification.",
        )?;

        let text = self.express()?;

        let metadata = if self.matches(TokenKind::LeftParen) {
            Some(self.metadata()?)
        } else {
            None
        };

        let body = if self.matches(TokenKind::With) {
            Some(self.block("Expected an opening for a dialogue's body.")?)
        } else {
            None
        };

        let options = body
            .as_ref()
            .map(|block| {
                block
                    .statements
                    .iter()
                    .enumerate()
                    .filter(|(_, stmt)| matches!(stmt, Stmt::Option { .. }))
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Stmt::Dialogue {
            actor,
            text,
            metadata,
            body,
            options,
        })
    }

    fn option(&mut self) -> Result<Stmt<'a>, ParseError> {
        let value = if self.check(TokenKind::LeftBrace) {
            None
        } else {
            Some(self.express()?)
        };

        let metadata = if self.matches(TokenKind::LeftParen) {
            Some(self.metadata()?)
        } else {
            None
        };

        let body = self.block("Expected \"{\" to start the option's body.")?;

        Ok(Stmt::Option {
            value,
            metadata,
            body,
        })
    }

    fn trigger(&mut self) -> Result<Stmt<'a>, ParseError> {
        let values = if self.matches(TokenKind::LeftBracket) {
            self.array()?
        } else {
            self.express()?
        };

        let body = self.block("Expected \"{\" to start the trigger's body.")?;

        Ok(Stmt::Trigger { values, body })
    }

    fn interact(&mut self) -> Result<Stmt<'a>, ParseError> {
        let identifier = self.consume(
            TokenKind::Identifier,
            "Expected an identifier for the interaction.",
        )?;
        let body = self.block("Expected \"{\" to start the interaction's body.")?;

        Ok(Stmt::Interact { identifier, body })
    }

    fn echo(&mut self) -> Result<Stmt<'a>, ParseError> {
        Ok(Stmt::Echo {
            expr: self.express()?,
        })
    }
}

/// Parses an EOF-terminated token stream into top-level statements plus every
/// syntax error encountered. Never fails outright.
pub fn parse(tokens: Vec<Token<'_>>) -> (Vec<Stmt<'_>>, Vec<ParseError>) {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;
    use indoc::indoc;

    fn parse_clean(source: &str) -> Vec<Stmt<'_>> {
        let (tokens, lex_errors) = lexer::tokenize(source);
        assert!(lex_errors.is_empty(), "lex errors: {lex_errors:?}");
        let (statements, errors) = parse(tokens);
        assert!(errors.is_empty(), "parse errors: {errors:?}");
        statements
    }

    fn parse_all(source: &str) -> (Vec<Stmt<'_>>, Vec<ParseError>) {
        let (tokens, _) = lexer::tokenize(source);
        parse(tokens)
    }

    #[test]
    fn parses_an_objective_declaration() {
        let statements = parse_clean("objective Quest \"Find the key\"");
        assert_eq!(statements.len(), 1);

        match &statements[0] {
            Stmt::Objective {
                name,
                default,
                value,
            } => {
                assert_eq!(name.lexeme, Some("Quest"));
                assert!(!*default);
                assert_eq!(
                    value,
                    &Expr::Literal {
                        value: Literal::String("Find the key")
                    }
                );
            }
            other => panic!("expected an objective, got {other:?}"),
        }
    }

    #[test]
    fn parses_a_default_objective() {
        let statements = parse_clean("default objective Main \"Main quest\"");
        assert!(matches!(
            &statements[0],
            Stmt::Objective { default: true, .. }
        ));
    }

    #[test]
    fn parses_a_store_with_metadata_and_value() {
        let statements = parse_clean("store Gold gold (\"persistent\") 100");
        match &statements[0] {
            Stmt::Store {
                name,
                identifier,
                metadata,
                value,
            } => {
                assert_eq!(name.lexeme, Some("Gold"));
                assert_eq!(identifier.lexeme, Some("gold"));
                assert!(matches!(metadata, Some(Expr::Metadata { .. })));
                assert_eq!(
                    value.as_ref(),
                    Some(&Expr::Literal {
                        value: Literal::Number(100.0)
                    })
                );
            }
            other => panic!("expected a store, got {other:?}"),
        }
    }

    #[test]
    fn store_and_set_values_are_optional() {
        let statements = parse_clean("store Flag seen_intro");
        assert!(matches!(
            &statements[0],
            Stmt::Store {
                metadata: None,
                value: None,
                ..
            }
        ));

        let statements = parse_clean("set done");
        assert!(matches!(&statements[0], Stmt::Set { value: None, .. }));

        let statements = parse_clean("set done true");
        assert!(matches!(&statements[0], Stmt::Set { value: Some(_), .. }));
    }

    #[test]
    fn parses_ternary_continuations() {
        let statements = parse_clean("visited -> \"again\" : \"hello\"");
        match &statements[0] {
            Stmt::Expression {
                expr: Expr::Ternary { condition, .. },
            } => {
                assert!(matches!(**condition, Expr::Variable { .. }));
            }
            other => panic!("expected a ternary, got {other:?}"),
        }
    }

    #[test]
    fn selects_the_single_condition_if_form() {
        let source = indoc! {r#"
            if visited -> {
                echo 1
            } else {
                echo 2
            }
        "#};
        let statements = parse_clean(source);

        match &statements[0] {
            Stmt::If {
                condition,
                body,
                else_body,
            } => {
                assert!(condition.is_some());
                assert_eq!(body.statements.len(), 1);
                assert!(else_body.is_some());
            }
            other => panic!("expected an if, got {other:?}"),
        }
    }

    #[test]
    fn selects_the_conditions_block_if_form() {
        let source = indoc! {r#"
            if {
                "north" -> { echo 1 }
                "south" -> { echo 2 }
                otherwise -> { echo 3 }
            }
        "#};
        let statements = parse_clean(source);

        match &statements[0] {
            Stmt::If {
                condition,
                body,
                else_body,
            } => {
                assert!(condition.is_none());
                assert!(else_body.is_none());
                assert_eq!(body.statements.len(), 3);
                assert!(matches!(body.statements[0], Stmt::Condition { .. }));
                assert!(matches!(body.statements[1], Stmt::Condition { .. }));
                assert!(matches!(body.statements[2], Stmt::Otherwise { .. }));
            }
            other => panic!("expected an if, got {other:?}"),
        }
    }

    #[test]
    fn extracts_dialogue_options() {
        let source = indoc! {r#"
            [Benoit] "What will you do?" with {
                echo "before"
                option "Leave" { exit }
            }
        "#};
        let statements = parse_clean(source);

        match &statements[0] {
            Stmt::Dialogue {
                actor,
                body: Some(body),
                options,
                ..
            } => {
                assert_eq!(actor.lexeme, Some("Benoit"));
                assert_eq!(options, &vec![1]);
                assert!(matches!(body.statements[1], Stmt::Option { .. }));
            }
            other => panic!("expected a dialogue with a body, got {other:?}"),
        }
    }

    #[test]
    fn parses_dialogue_metadata() {
        let statements = parse_clean("[Benoit] \"Hello.\" (\"calm\", 2s)");
        assert!(matches!(
            &statements[0],
            Stmt::Dialogue {
                metadata: Some(Expr::Metadata { .. }),
                body: None,
                ..
            }
        ));
    }

    #[test]
    fn recovers_from_independent_errors() {
        let source = indoc! {r#"
            property greeting "Hello!"
            objective 123
            actor Benoit "Benoit"
            ^
            set done true
        "#};
        let (statements, errors) = parse_all(source);

        assert_eq!(errors.len(), 2, "errors: {errors:?}");
        assert_eq!(statements.len(), 3);
        assert!(matches!(statements[0], Stmt::Property { .. }));
        assert!(matches!(statements[1], Stmt::Actor { .. }));
        assert!(matches!(statements[2], Stmt::Set { .. }));
    }

    #[test]
    fn never_fails_on_garbage() {
        let (statements, errors) = parse_all("} ) ] -> :");
        assert!(statements.is_empty());
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn reports_structured_errors() {
        let (_, errors) = parse_all("objective 123");
        match &errors[0] {
            ParseError::UnexpectedToken {
                found,
                lexeme,
                line,
                ..
            } => {
                assert_eq!(*found, TokenKind::Number);
                assert_eq!(lexeme, "123");
                assert_eq!(*line, 1);
            }
            other => panic!("expected a token error, got {other:?}"),
        }
    }

    #[test]
    fn distinguishes_macros_from_accessors() {
        let statements = parse_clean("echo $player_name");
        assert!(matches!(
            &statements[0],
            Stmt::Echo {
                expr: Expr::Accessor { .. }
            }
        ));

        let statements = parse_clean("echo $notify(\"hey\", 2s)");
        match &statements[0] {
            Stmt::Echo {
                expr: Expr::Macro { name, args },
            } => {
                assert_eq!(name.lexeme, Some("$notify"));
                assert_eq!(args.len(), 2);
            }
            other => panic!("expected a macro, got {other:?}"),
        }
    }

    #[test]
    fn parses_exit_with_and_without_a_value() {
        let statements = parse_clean("exit");
        assert!(matches!(
            &statements[0],
            Stmt::Expression {
                expr: Expr::Exit { value: None }
            }
        ));

        let statements = parse_clean("exit 3");
        assert!(matches!(
            &statements[0],
            Stmt::Expression {
                expr: Expr::Exit { value: Some(_) }
            }
        ));
    }

    #[test]
    fn parses_trigger_value_shapes() {
        let statements = parse_clean("trigger \"boom\" { echo 1 }");
        assert!(matches!(
            &statements[0],
            Stmt::Trigger {
                values: Expr::Literal { .. },
                ..
            }
        ));

        let statements = parse_clean("trigger [\"boom\" \"bang\"] { echo 1 }");
        match &statements[0] {
            Stmt::Trigger {
                values: Expr::Array { expressions },
                ..
            } => assert_eq!(expressions.len(), 2),
            other => panic!("expected an array trigger, got {other:?}"),
        }
    }

    #[test]
    fn array_commas_are_optional() {
        let statements = parse_clean("echo [1 2, 3,]");
        match &statements[0] {
            Stmt::Echo {
                expr: Expr::Array { expressions },
            } => assert_eq!(expressions.len(), 3),
            other => panic!("expected an array, got {other:?}"),
        }
    }

    #[test]
    fn parses_scene_interact_and_do_bodies() {
        let source = indoc! {r#"
            scene Intro {
                [Benoit] "Welcome."
            }
            interact Door {
                start Quest
            }
            do {
                set counted true
            }
        "#};
        let statements = parse_clean(source);

        assert!(matches!(&statements[0], Stmt::Scene { body, .. } if body.statements.len() == 1));
        assert!(matches!(&statements[1], Stmt::Interact { .. }));
        assert!(matches!(&statements[2], Stmt::Do { .. }));
    }

    #[test]
    fn parses_options_without_values() {
        let statements = parse_clean("option { echo 1 }");
        assert!(matches!(
            &statements[0],
            Stmt::Option {
                value: None,
                metadata: None,
                ..
            }
        ));

        let statements = parse_clean("option \"Go north\" (\"fast\") { echo 1 }");
        assert!(matches!(
            &statements[0],
            Stmt::Option {
                value: Some(_),
                metadata: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn parses_unary_and_grouped_binaries() {
        let statements = parse_clean("echo not true");
        assert!(matches!(
            &statements[0],
            Stmt::Echo {
                expr: Expr::Unary { .. }
            }
        ));

        let statements = parse_clean("echo -(2 + 3)");
        match &statements[0] {
            Stmt::Echo {
                expr: Expr::Unary { operator, right },
            } => {
                assert_eq!(operator.kind, TokenKind::Minus);
                assert!(matches!(**right, Expr::Grouping { .. }));
            }
            other => panic!("expected a unary, got {other:?}"),
        }
    }

    #[test]
    fn parses_start_expressions() {
        let statements = parse_clean("start MainQuest");
        match &statements[0] {
            Stmt::Expression {
                expr: Expr::Start { objective },
            } => assert_eq!(objective.lexeme, Some("MainQuest")),
            other => panic!("expected a start expression, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_blocks_are_reported() {
        let (statements, errors) = parse_all("scene Intro { echo 1");
        assert!(statements.is_empty());
        assert!(!errors.is_empty());
        assert!(matches!(errors[0], ParseError::UnexpectedEof { .. }));
    }
}
