use std::{fmt::Display, slice::Iter};

use crate::lexer::tokens::Token;

use super::{ast::{Expr, Stmt}, expressions::IdentifierExpr};

/// How an assignment statement was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignKind {
    Let,
    Const,
    /// Bare `name = value`
    Reassign,
}

/// Assignment Statement
/// `let x = 5;`, `const x = 5;` or `x = 5;`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    /// `let`/`const` keyword, or the target identifier for a reassignment
    pub token: Token,
    pub kind: AssignKind,
    pub name: IdentifierExpr,
    pub value: Box<Expr>,
}

impl Display for AssignStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            AssignKind::Let => write!(f, "let ")?,
            AssignKind::Const => write!(f, "const ")?,
            AssignKind::Reassign => {}
        }
        write!(f, "{} = {};", self.name, self.value)
    }
}

/// Block Statement
/// `{ ... }`, the body of conditionals, loops and functions.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub token: Token,
    pub body: Vec<Stmt>,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ ")?;
        for stmt in &self.body {
            write!(f, "{}", stmt)?;
        }
        write!(f, " }}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub token: Token,
    pub value: Option<Expr>,
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "return {};", value),
            None => write!(f, "return;"),
        }
    }
}

/// Expression Statement
/// A bare expression in statement position.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    /// First token of the expression
    pub token: Token,
    pub expression: Expr,
}

impl Display for ExpressionStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}
