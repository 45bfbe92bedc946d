use std::fmt::Display;

use crate::lexer::tokens::Token;

use super::{
    ast::Expr,
    statements::{AssignStmt, BlockStmt},
};

fn write_joined(f: &mut std::fmt::Formatter<'_>, items: &[Expr]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

// LITERALS

/// Identifier Expression
/// Represents a name in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub token: Token,
    pub value: String,
}

impl Display for IdentifierExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Numeric value of a literal; integer unless the literal had a decimal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberValue {
    Int(i64),
    Float(f64),
}

/// Number Expression
/// Represents a numeric literal in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub token: Token,
    pub value: NumberValue,
}

impl NumberExpr {
    pub fn is_float(&self) -> bool {
        matches!(self.value, NumberValue::Float(_))
    }
}

impl Display for NumberExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token.value)
    }
}

/// String Expression
/// Represents a string literal in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub token: Token,
    pub value: String,
}

impl Display for StringExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub token: Token,
    pub value: bool,
}

impl Display for BooleanExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullExpr {
    pub token: Token,
}

impl Display for NullExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "null")
    }
}

// OPERATORS

/// Prefix Expression
/// `!x` or `-x`
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expr>,
}

impl Display for PrefixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

/// Infix Expression
/// Binary arithmetic, comparison and logical operators.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub operator: String,
    pub right: Box<Expr>,
}

impl Display for InfixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

/// Index Expression
/// `left[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub index: Box<Expr>,
}

impl Display for IndexExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

/// Call Expression
/// `callee(arg, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub token: Token,
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
}

impl Display for CallExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.callee)?;
        write_joined(f, &self.arguments)?;
        write!(f, ")")
    }
}

// COLLECTIONS

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr {
    pub token: Token,
    pub elements: Vec<Expr>,
}

impl Display for ArrayExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        write_joined(f, &self.elements)?;
        write!(f, "]")
    }
}

/// Dictionary Expression
/// `{key: value, ...}`. Pairs are kept in source order; consumers must not
/// rely on that order meaning anything.
#[derive(Debug, Clone, PartialEq)]
pub struct DictExpr {
    pub token: Token,
    pub pairs: Vec<(Expr, Expr)>,
}

impl Display for DictExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

// CONTROL FLOW

/// One `if`/`elif` clause: a condition and the block it guards.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Expr,
    pub body: BlockStmt,
}

/// If Expression
/// `if c { } elif c { } else { }`
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub token: Token,
    /// The `if` clause followed by every `elif` clause, in order
    pub clauses: Vec<Conditional>,
    pub alternative: Option<BlockStmt>,
}

impl Display for IfExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            let keyword = if i == 0 { "if" } else { "elif" };
            write!(f, "{} {} {}", keyword, clause.condition, clause.body)?;
        }
        if let Some(alternative) = &self.alternative {
            write!(f, "else {}", alternative)?;
        }
        Ok(())
    }
}

/// For Expression
/// `for let i = range(arr) { }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForExpr {
    pub token: Token,
    pub assignment: AssignStmt,
    pub body: BlockStmt,
}

impl Display for ForExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "for {}{}", self.assignment, self.body)
    }
}

/// Function Expression
/// `fn name(a, b) { }`, the name is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub token: Token,
    pub name: Option<IdentifierExpr>,
    pub parameters: Vec<IdentifierExpr>,
    pub body: BlockStmt,
}

impl Display for FunctionExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn")?;
        if let Some(name) = &self.name {
            write!(f, " {}", name)?;
        }
        write!(f, "(")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", parameter)?;
        }
        write!(f, ") {}", self.body)
    }
}
