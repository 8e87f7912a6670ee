//! S-expression serialization of the syntax tree, used by the `mkscribe`
//! binary and the golden files of the integration harness.

use crate::ast::{Block, Expr, ExprVisitor, Stmt, StmtVisitor};
use crate::token::{Literal, Token};

pub struct Printer;

impl Printer {
    pub fn new() -> Self {
        Self
    }

    /// One statement per line.
    pub fn print_program(&mut self, statements: &[Stmt<'_>]) -> String {
        statements
            .iter()
            .map(|stmt| stmt.accept(self))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn print_expr(&mut self, expr: &Expr<'_>) -> String {
        expr.accept(self)
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr<'_>]) -> String {
        let mut out = String::from("(");
        out.push_str(name);
        for expr in exprs {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }
        out.push(')');
        out
    }

    /// `(e1 e2 ...)` with no head symbol.
    fn listed(&mut self, exprs: &[Expr<'_>]) -> String {
        let parts: Vec<String> = exprs.iter().map(|expr| expr.accept(self)).collect();
        format!("({})", parts.join(" "))
    }

    fn block(&mut self, block: &Block<'_>) -> String {
        let mut out = String::from("(block");
        for stmt in &block.statements {
            out.push('\n');
            out.push_str(&indent(&stmt.accept(self)));
        }
        out.push(')');
        out
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("   {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl<'a> ExprVisitor<'a> for Printer {
    type Output = String;

    fn visit_binary(&mut self, left: &Expr<'a>, operator: &Token<'a>, right: &Expr<'a>) -> String {
        self.parenthesize(operator.text(), &[left, right])
    }

    fn visit_unary(&mut self, operator: &Token<'a>, right: &Expr<'a>) -> String {
        self.parenthesize(operator.text(), &[right])
    }

    fn visit_ternary(
        &mut self,
        condition: &Expr<'a>,
        if_true: &Expr<'a>,
        if_false: &Expr<'a>,
    ) -> String {
        format!(
            "(? {} ({} : {}))",
            condition.accept(self),
            if_true.accept(self),
            if_false.accept(self)
        )
    }

    fn visit_variable(&mut self, name: &Token<'a>) -> String {
        name.text().to_string()
    }

    fn visit_accessor(&mut self, name: &Token<'a>) -> String {
        name.text().to_string()
    }

    fn visit_macro(&mut self, name: &Token<'a>, args: &[Expr<'a>]) -> String {
        format!("(macro {} {})", name.text(), self.listed(args))
    }

    fn visit_literal(&mut self, value: &Literal<'a>) -> String {
        match value {
            Literal::String(s) => format!("\"{s}\""),
            Literal::Number(n) => format!("{n}"),
            Literal::Seconds(n) => format!("{n}s"),
            Literal::Boolean(b) => format!("{b}"),
            Literal::Undefined => "undefined".to_string(),
        }
    }

    fn visit_grouping(&mut self, expr: &Expr<'a>) -> String {
        format!("(group ({}))", expr.accept(self))
    }

    fn visit_array(&mut self, expressions: &[Expr<'a>]) -> String {
        format!("(array {})", self.listed(expressions))
    }

    fn visit_metadata(&mut self, args: &[Expr<'a>]) -> String {
        format!("(metadata {})", self.listed(args))
    }

    fn visit_start(&mut self, objective: &Token<'a>) -> String {
        format!("(start {})", objective.text())
    }

    fn visit_exit(&mut self, value: Option<&Expr<'a>>) -> String {
        match value {
            Some(value) => format!("(exit {})", value.accept(self)),
            None => "(exit)".to_string(),
        }
    }
}

impl<'a> StmtVisitor<'a> for Printer {
    type Output = String;

    fn visit_expression(&mut self, expr: &Expr<'a>) -> String {
        self.parenthesize("expression", &[expr])
    }

    fn visit_property(&mut self, name: &Token<'a>, value: &Expr<'a>) -> String {
        format!("(property ({} {}))", name.text(), value.accept(self))
    }

    fn visit_actor(&mut self, name: &Token<'a>, value: &Expr<'a>) -> String {
        format!("(actor ({} {}))", name.text(), value.accept(self))
    }

    fn visit_store(
        &mut self,
        name: &Token<'a>,
        identifier: &Token<'a>,
        metadata: Option<&Expr<'a>>,
        value: Option<&Expr<'a>>,
    ) -> String {
        let mut parts = vec![name.text().to_string(), identifier.text().to_string()];
        if let Some(metadata) = metadata {
            parts.push(metadata.accept(self));
        }
        if let Some(value) = value {
            parts.push(value.accept(self));
        }
        format!("(store ({}))", parts.join(" "))
    }

    fn visit_objective(&mut self, name: &Token<'a>, default: bool, value: &Expr<'a>) -> String {
        let head = if default {
            "default-objective"
        } else {
            "objective"
        };
        format!("({head} ({} {}))", name.text(), value.accept(self))
    }

    fn visit_set(&mut self, name: &Token<'a>, value: Option<&Expr<'a>>) -> String {
        match value {
            Some(value) => format!("(set ({} {}))", name.text(), value.accept(self)),
            None => format!("(set ({}))", name.text()),
        }
    }

    fn visit_block(&mut self, block: &Block<'a>) -> String {
        self.block(block)
    }

    fn visit_do(&mut self, body: &Block<'a>) -> String {
        format!("(do {})", self.block(body))
    }

    fn visit_dialogue(
        &mut self,
        actor: &Token<'a>,
        text: &Expr<'a>,
        metadata: Option<&Expr<'a>>,
        body: Option<&Block<'a>>,
        _options: &[usize],
    ) -> String {
        let mut out = format!("(dialogue {} {}", actor.text(), text.accept(self));
        if let Some(metadata) = metadata {
            out.push(' ');
            out.push_str(&metadata.accept(self));
        }
        if let Some(body) = body {
            out.push(' ');
            out.push_str(&self.block(body));
        }
        out.push(')');
        out
    }

    fn visit_condition(&mut self, condition: &Expr<'a>, body: &Block<'a>) -> String {
        format!("(cond ({}) {})", condition.accept(self), self.block(body))
    }

    fn visit_otherwise(&mut self, body: &Block<'a>) -> String {
        format!("(otherwise {})", self.block(body))
    }

    fn visit_if(
        &mut self,
        condition: Option<&Expr<'a>>,
        body: &Block<'a>,
        else_body: Option<&Block<'a>>,
    ) -> String {
        let mut out = String::from("(if");
        if let Some(condition) = condition {
            out.push_str(&format!(" ({})", condition.accept(self)));
        }
        out.push(' ');
        out.push_str(&self.block(body));
        if let Some(else_body) = else_body {
            out.push_str(&format!(" (else {})", self.block(else_body)));
        }
        out.push(')');
        out
    }

    fn visit_scene(&mut self, name: &Token<'a>, body: &Block<'a>) -> String {
        format!("(scene {} {})", name.text(), self.block(body))
    }

    fn visit_option(
        &mut self,
        value: Option<&Expr<'a>>,
        metadata: Option<&Expr<'a>>,
        body: &Block<'a>,
    ) -> String {
        let mut out = String::from("(option");
        if let Some(value) = value {
            out.push(' ');
            out.push_str(&value.accept(self));
        }
        if let Some(metadata) = metadata {
            out.push(' ');
            out.push_str(&metadata.accept(self));
        }
        out.push(' ');
        out.push_str(&self.block(body));
        out.push(')');
        out
    }

    fn visit_trigger(&mut self, values: &Expr<'a>, body: &Block<'a>) -> String {
        format!("(trigger {} {})", values.accept(self), self.block(body))
    }

    fn visit_interact(&mut self, identifier: &Token<'a>, body: &Block<'a>) -> String {
        format!("(interact {} {})", identifier.text(), self.block(body))
    }

    fn visit_echo(&mut self, expr: &Expr<'a>) -> String {
        self.parenthesize("echo", &[expr])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer, parser};

    fn print(source: &str) -> String {
        let (tokens, lex_errors) = lexer::tokenize(source);
        assert!(lex_errors.is_empty(), "lex errors: {lex_errors:?}");
        let (statements, parse_errors) = parser::parse(tokens);
        assert!(parse_errors.is_empty(), "parse errors: {parse_errors:?}");
        Printer::new().print_program(&statements)
    }

    #[test]
    fn prints_binary_expressions() {
        assert_eq!(print("1 + 2"), "(expression (+ 1 2))");
    }

    #[test]
    fn prints_declarations() {
        assert_eq!(
            print("objective Quest \"Find the key\""),
            "(objective (Quest \"Find the key\"))"
        );
        assert_eq!(print("actor Benoit \"Benoit\""), "(actor (Benoit \"Benoit\"))");
        assert_eq!(
            print("store Gold gold 100"),
            "(store (Gold gold 100))"
        );
    }

    #[test]
    fn prints_ternaries() {
        assert_eq!(
            print("visited -> \"again\" : \"hello\""),
            "(expression (? visited (\"again\" : \"hello\")))"
        );
    }

    #[test]
    fn prints_seconds_and_booleans() {
        assert_eq!(print("echo 10s"), "(echo 10s)");
        assert_eq!(print("set ready true"), "(set (ready true))");
    }

    #[test]
    fn prints_do_blocks() {
        assert_eq!(print("do { echo 1 }"), "(do (block\n   (echo 1)))");
    }

    #[test]
    fn prints_exit_forms() {
        assert_eq!(print("exit"), "(expression (exit))");
        assert_eq!(print("exit 3"), "(expression (exit 3))");
    }

    #[test]
    fn prints_macros_and_accessors() {
        assert_eq!(print("echo $name"), "(echo $name)");
        assert_eq!(
            print("echo $notify(\"hey\" 2s)"),
            "(echo (macro $notify (\"hey\" 2s)))"
        );
    }
}
