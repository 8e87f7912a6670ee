pub mod printer;

use crate::token::{Literal, Token};

/// Expression nodes. Each variant owns its children outright; tokens are
/// embedded by value for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Binary {
        left: Box<Expr<'a>>,
        operator: Token<'a>,
        right: Box<Expr<'a>>,
    },
    Unary {
        operator: Token<'a>,
        right: Box<Expr<'a>>,
    },
    /// `condition -> if_true : if_false`
    Ternary {
        condition: Box<Expr<'a>>,
        if_true: Box<Expr<'a>>,
        if_false: Box<Expr<'a>>,
    },
    Variable {
        name: Token<'a>,
    },
    /// `$name`, looked up in the host environment at evaluation time.
    Accessor {
        name: Token<'a>,
    },
    /// `$name(args...)`
    Macro {
        name: Token<'a>,
        args: Vec<Expr<'a>>,
    },
    Literal {
        value: Literal<'a>,
    },
    Grouping {
        expr: Box<Expr<'a>>,
    },
    /// `[e1, e2, ...]` — commas between elements are optional.
    Array {
        expressions: Vec<Expr<'a>>,
    },
    /// `(e1, e2, ...)` attached to a declaration, dialogue, or option.
    Metadata {
        args: Vec<Expr<'a>>,
    },
    /// `start OBJECTIVE`
    Start {
        objective: Token<'a>,
    },
    /// `exit` / `exit value`
    Exit {
        value: Option<Box<Expr<'a>>>,
    },
}

/// A braced statement list. Every construct with a body owns one of these.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block<'a> {
    pub statements: Vec<Stmt<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt<'a> {
    Expression {
        expr: Expr<'a>,
    },
    Property {
        name: Token<'a>,
        value: Expr<'a>,
    },
    Actor {
        name: Token<'a>,
        value: Expr<'a>,
    },
    Store {
        name: Token<'a>,
        identifier: Token<'a>,
        metadata: Option<Expr<'a>>,
        value: Option<Expr<'a>>,
    },
    Objective {
        name: Token<'a>,
        default: bool,
        value: Expr<'a>,
    },
    Set {
        name: Token<'a>,
        value: Option<Expr<'a>>,
    },
    Block(Block<'a>),
    Do {
        body: Block<'a>,
    },
    Dialogue {
        actor: Token<'a>,
        text: Expr<'a>,
        metadata: Option<Expr<'a>>,
        body: Option<Block<'a>>,
        /// Indices into `body.statements` at which option statements sit.
        /// Children are owned exactly once, so the typed shortcut points
        /// rather than clones.
        options: Vec<usize>,
    },
    /// One `condition -> { body }` arm of a block-of-conditions `if`.
    Condition {
        condition: Expr<'a>,
        body: Block<'a>,
    },
    /// `otherwise -> { body }`, the default arm.
    Otherwise {
        body: Block<'a>,
    },
    /// Single-condition form carries a condition and may carry an `else`
    /// body; the block-of-conditions form carries neither.
    If {
        condition: Option<Expr<'a>>,
        body: Block<'a>,
        else_body: Option<Block<'a>>,
    },
    Scene {
        name: Token<'a>,
        body: Block<'a>,
    },
    Option {
        value: Option<Expr<'a>>,
        metadata: Option<Expr<'a>>,
        body: Block<'a>,
    },
    Trigger {
        /// A single expression or an array of them.
        values: Expr<'a>,
        body: Block<'a>,
    },
    Interact {
        identifier: Token<'a>,
        body: Block<'a>,
    },
    Echo {
        expr: Expr<'a>,
    },
}

/// One method per expression variant, no fallback: adding a variant is a
/// compile-time-visible change for every consumer.
pub trait ExprVisitor<'a> {
    type Output;

    fn visit_binary(
        &mut self,
        left: &Expr<'a>,
        operator: &Token<'a>,
        right: &Expr<'a>,
    ) -> Self::Output;
    fn visit_unary(&mut self, operator: &Token<'a>, right: &Expr<'a>) -> Self::Output;
    fn visit_ternary(
        &mut self,
        condition: &Expr<'a>,
        if_true: &Expr<'a>,
        if_false: &Expr<'a>,
    ) -> Self::Output;
    fn visit_variable(&mut self, name: &Token<'a>) -> Self::Output;
    fn visit_accessor(&mut self, name: &Token<'a>) -> Self::Output;
    fn visit_macro(&mut self, name: &Token<'a>, args: &[Expr<'a>]) -> Self::Output;
    fn visit_literal(&mut self, value: &Literal<'a>) -> Self::Output;
    fn visit_grouping(&mut self, expr: &Expr<'a>) -> Self::Output;
    fn visit_array(&mut self, expressions: &[Expr<'a>]) -> Self::Output;
    fn visit_metadata(&mut self, args: &[Expr<'a>]) -> Self::Output;
    fn visit_start(&mut self, objective: &Token<'a>) -> Self::Output;
    fn visit_exit(&mut self, value: Option<&Expr<'a>>) -> Self::Output;
}

pub trait StmtVisitor<'a> {
    type Output;

    fn visit_expression(&mut self, expr: &Expr<'a>) -> Self::Output;
    fn visit_property(&mut self, name: &Token<'a>, value: &Expr<'a>) -> Self::Output;
    fn visit_actor(&mut self, name: &Token<'a>, value: &Expr<'a>) -> Self::Output;
    fn visit_store(
        &mut self,
        name: &Token<'a>,
        identifier: &Token<'a>,
        metadata: Option<&Expr<'a>>,
        value: Option<&Expr<'a>>,
    ) -> Self::Output;
    fn visit_objective(
        &mut self,
        name: &Token<'a>,
        default: bool,
        value: &Expr<'a>,
    ) -> Self::Output;
    fn visit_set(&mut self, name: &Token<'a>, value: Option<&Expr<'a>>) -> Self::Output;
    fn visit_block(&mut self, block: &Block<'a>) -> Self::Output;
    fn visit_do(&mut self, body: &Block<'a>) -> Self::Output;
    fn visit_dialogue(
        &mut self,
        actor: &Token<'a>,
        text: &Expr<'a>,
        metadata: Option<&Expr<'a>>,
        body: Option<&Block<'a>>,
        options: &[usize],
    ) -> Self::Output;
    fn visit_condition(&mut self, condition: &Expr<'a>, body: &Block<'a>) -> Self::Output;
    fn visit_otherwise(&mut self, body: &Block<'a>) -> Self::Output;
    fn visit_if(
        &mut self,
        condition: Option<&Expr<'a>>,
        body: &Block<'a>,
        else_body: Option<&Block<'a>>,
    ) -> Self::Output;
    fn visit_scene(&mut self, name: &Token<'a>, body: &Block<'a>) -> Self::Output;
    fn visit_option(
        &mut self,
        value: Option<&Expr<'a>>,
        metadata: Option<&Expr<'a>>,
        body: &Block<'a>,
    ) -> Self::Output;
    fn visit_trigger(&mut self, values: &Expr<'a>, body: &Block<'a>) -> Self::Output;
    fn visit_interact(&mut self, identifier: &Token<'a>, body: &Block<'a>) -> Self::Output;
    fn visit_echo(&mut self, expr: &Expr<'a>) -> Self::Output;
}

impl<'a> Expr<'a> {
    pub fn accept<V: ExprVisitor<'a>>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Binary {
                left,
                operator,
                right,
            } => visitor.visit_binary(left, operator, right),
            Expr::Unary { operator, right } => visitor.visit_unary(operator, right),
            Expr::Ternary {
                condition,
                if_true,
                if_false,
            } => visitor.visit_ternary(condition, if_true, if_false),
            Expr::Variable { name } => visitor.visit_variable(name),
            Expr::Accessor { name } => visitor.visit_accessor(name),
            Expr::Macro { name, args } => visitor.visit_macro(name, args),
            Expr::Literal { value } => visitor.visit_literal(value),
            Expr::Grouping { expr } => visitor.visit_grouping(expr),
            Expr::Array { expressions } => visitor.visit_array(expressions),
            Expr::Metadata { args } => visitor.visit_metadata(args),
            Expr::Start { objective } => visitor.visit_start(objective),
            Expr::Exit { value } => visitor.visit_exit(value.as_deref()),
        }
    }
}

impl<'a> Stmt<'a> {
    pub fn accept<V: StmtVisitor<'a>>(&self, visitor: &mut V) -> V::Output {
        match self {
            Stmt::Expression { expr } => visitor.visit_expression(expr),
            Stmt::Property { name, value } => visitor.visit_property(name, value),
            Stmt::Actor { name, value } => visitor.visit_actor(name, value),
            Stmt::Store {
                name,
                identifier,
                metadata,
                value,
            } => visitor.visit_store(name, identifier, metadata.as_ref(), value.as_ref()),
            Stmt::Objective {
                name,
                default,
                value,
            } => visitor.visit_objective(name, *default, value),
            Stmt::Set { name, value } => visitor.visit_set(name, value.as_ref()),
            Stmt::Block(block) => visitor.visit_block(block),
            Stmt::Do { body } => visitor.visit_do(body),
            Stmt::Dialogue {
                actor,
                text,
                metadata,
                body,
                options,
            } => visitor.visit_dialogue(actor, text, metadata.as_ref(), body.as_ref(), options),
            Stmt::Condition { condition, body } => visitor.visit_condition(condition, body),
            Stmt::Otherwise { body } => visitor.visit_otherwise(body),
            Stmt::If {
                condition,
                body,
                else_body,
            } => visitor.visit_if(condition.as_ref(), body, else_body.as_ref()),
            Stmt::Scene { name, body } => visitor.visit_scene(name, body),
            Stmt::Option {
                value,
                metadata,
                body,
            } => visitor.visit_option(value.as_ref(), metadata.as_ref(), body),
            Stmt::Trigger { values, body } => visitor.visit_trigger(values, body),
            Stmt::Interact { identifier, body } => visitor.visit_interact(identifier, body),
            Stmt::Echo { expr } => visitor.visit_echo(expr),
        }
    }
}
