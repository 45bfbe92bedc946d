use std::{fmt::Display, mem};

use crate::{
    grow_stack,
    lexer::tokens::{Token, TokenKind},
    MK_TOKEN,
};

use super::{
    expressions::{
        ArrayExpr, BooleanExpr, CallExpr, DictExpr, ForExpr, FunctionExpr, IdentifierExpr,
        IfExpr, IndexExpr, InfixExpr, NullExpr, NumberExpr, PrefixExpr, StringExpr,
    },
    statements::{AssignStmt, BlockStmt, ExpressionStmt, ReturnStmt},
};

/// Root of a parsed source buffer: the top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// Statement
///
/// Every statement kind the parser can produce. Each variant owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign(AssignStmt),
    Block(BlockStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    /// The token the statement starts at.
    pub fn token(&self) -> &Token {
        match self {
            Stmt::Assign(stmt) => &stmt.token,
            Stmt::Block(stmt) => &stmt.token,
            Stmt::Return(stmt) => &stmt.token,
            Stmt::Expression(stmt) => &stmt.token,
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        grow_stack(|| match self {
            Stmt::Assign(stmt) => Display::fmt(stmt, f),
            Stmt::Block(stmt) => Display::fmt(stmt, f),
            Stmt::Return(stmt) => Display::fmt(stmt, f),
            Stmt::Expression(stmt) => Display::fmt(stmt, f),
        })
    }
}

/// Expression
///
/// Every expression kind the parser can produce. Each variant owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(IdentifierExpr),
    Number(NumberExpr),
    String(StringExpr),
    Boolean(BooleanExpr),
    Null(NullExpr),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    Index(IndexExpr),
    Call(CallExpr),
    Array(ArrayExpr),
    Dict(DictExpr),
    If(Box<IfExpr>),
    For(Box<ForExpr>),
    Function(Box<FunctionExpr>),
}

impl Expr {
    /// The token the expression was built from.
    ///
    /// For operators this is the operator token, for literals the literal.
    pub fn token(&self) -> &Token {
        match self {
            Expr::Identifier(expr) => &expr.token,
            Expr::Number(expr) => &expr.token,
            Expr::String(expr) => &expr.token,
            Expr::Boolean(expr) => &expr.token,
            Expr::Null(expr) => &expr.token,
            Expr::Prefix(expr) => &expr.token,
            Expr::Infix(expr) => &expr.token,
            Expr::Index(expr) => &expr.token,
            Expr::Call(expr) => &expr.token,
            Expr::Array(expr) => &expr.token,
            Expr::Dict(expr) => &expr.token,
            Expr::If(expr) => &expr.token,
            Expr::For(expr) => &expr.token,
            Expr::Function(expr) => &expr.token,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        grow_stack(|| match self {
            Expr::Identifier(expr) => Display::fmt(expr, f),
            Expr::Number(expr) => Display::fmt(expr, f),
            Expr::String(expr) => Display::fmt(expr, f),
            Expr::Boolean(expr) => Display::fmt(expr, f),
            Expr::Null(expr) => Display::fmt(expr, f),
            Expr::Prefix(expr) => Display::fmt(expr, f),
            Expr::Infix(expr) => Display::fmt(expr, f),
            Expr::Index(expr) => Display::fmt(expr, f),
            Expr::Call(expr) => Display::fmt(expr, f),
            Expr::Array(expr) => Display::fmt(expr, f),
            Expr::Dict(expr) => Display::fmt(expr, f),
            Expr::If(expr) => Display::fmt(expr, f),
            Expr::For(expr) => Display::fmt(expr, f),
            Expr::Function(expr) => Display::fmt(expr, f),
        })
    }
}

// TEARDOWN
//
// Derived drop glue recurses once per nesting level. Trees are instead taken
// apart with an explicit worklist: children are moved out of a node before
// it drops, so every drop is shallow.

enum Node {
    Expr(Expr),
    Stmt(Stmt),
}

/// Stand-in left behind where a child was moved out.
fn hollow() -> Expr {
    Expr::Null(NullExpr {
        token: MK_TOKEN!(TokenKind::Null, String::new(), 0, 0, 0),
    })
}

fn take_expr(slot: &mut Expr) -> Node {
    Node::Expr(mem::replace(slot, hollow()))
}

fn take_body(body: &mut BlockStmt, pending: &mut Vec<Node>) {
    pending.extend(mem::take(&mut body.body).into_iter().map(Node::Stmt));
}

fn detach_expr(expr: &mut Expr, pending: &mut Vec<Node>) {
    match expr {
        Expr::Identifier(_)
        | Expr::Number(_)
        | Expr::String(_)
        | Expr::Boolean(_)
        | Expr::Null(_) => {}
        Expr::Prefix(node) => pending.push(take_expr(&mut node.right)),
        Expr::Infix(node) => {
            pending.push(take_expr(&mut node.left));
            pending.push(take_expr(&mut node.right));
        }
        Expr::Index(node) => {
            pending.push(take_expr(&mut node.left));
            pending.push(take_expr(&mut node.index));
        }
        Expr::Call(node) => {
            pending.push(take_expr(&mut node.callee));
            pending.extend(mem::take(&mut node.arguments).into_iter().map(Node::Expr));
        }
        Expr::Array(node) => {
            pending.extend(mem::take(&mut node.elements).into_iter().map(Node::Expr));
        }
        Expr::Dict(node) => {
            for (key, value) in mem::take(&mut node.pairs) {
                pending.push(Node::Expr(key));
                pending.push(Node::Expr(value));
            }
        }
        Expr::If(node) => {
            for mut clause in mem::take(&mut node.clauses) {
                take_body(&mut clause.body, pending);
                pending.push(Node::Expr(clause.condition));
            }
            if let Some(mut alternative) = node.alternative.take() {
                take_body(&mut alternative, pending);
            }
        }
        Expr::For(node) => {
            pending.push(take_expr(&mut node.assignment.value));
            take_body(&mut node.body, pending);
        }
        Expr::Function(node) => take_body(&mut node.body, pending),
    }
}

fn detach_stmt(stmt: &mut Stmt, pending: &mut Vec<Node>) {
    match stmt {
        Stmt::Assign(node) => pending.push(take_expr(&mut node.value)),
        Stmt::Block(node) => take_body(node, pending),
        Stmt::Return(node) => pending.extend(node.value.take().map(Node::Expr)),
        Stmt::Expression(node) => pending.push(take_expr(&mut node.expression)),
    }
}

fn dismantle(mut pending: Vec<Node>) {
    while let Some(mut node) = pending.pop() {
        match &mut node {
            Node::Expr(expr) => detach_expr(expr, &mut pending),
            Node::Stmt(stmt) => detach_stmt(stmt, &mut pending),
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = vec![];
        detach_expr(self, &mut pending);
        dismantle(pending);
    }
}

impl Drop for Stmt {
    fn drop(&mut self) {
        let mut pending = vec![];
        detach_stmt(self, &mut pending);
        dismantle(pending);
    }
}
