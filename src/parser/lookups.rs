use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::ast::{Expr, Stmt},
    errors::errors::Diagnostic,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, weakest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum BindingPower {
    Default,
    Logical,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Index,
}

lazy_static! {
    static ref BINDING_POWER_LOOKUP: BPLookup = {
        let mut map = HashMap::new();
        map.insert(TokenKind::And, BindingPower::Logical);
        map.insert(TokenKind::Or, BindingPower::Logical);
        map.insert(TokenKind::Equals, BindingPower::Equality);
        map.insert(TokenKind::NotEquals, BindingPower::Equality);
        map.insert(TokenKind::Less, BindingPower::Relational);
        map.insert(TokenKind::Greater, BindingPower::Relational);
        map.insert(TokenKind::LessEquals, BindingPower::Relational);
        map.insert(TokenKind::GreaterEquals, BindingPower::Relational);
        map.insert(TokenKind::Plus, BindingPower::Additive);
        map.insert(TokenKind::Dash, BindingPower::Additive);
        map.insert(TokenKind::Star, BindingPower::Multiplicative);
        map.insert(TokenKind::Slash, BindingPower::Multiplicative);
        map.insert(TokenKind::OpenParen, BindingPower::Call);
        map.insert(TokenKind::OpenBracket, BindingPower::Index);
        map
    };
}

impl BindingPower {
    /// Precedence of `kind` when it appears in infix position; kinds that are
    /// not infix operators bind at `Default`.
    pub fn of(kind: TokenKind) -> BindingPower {
        BINDING_POWER_LOOKUP
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Diagnostic>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Diagnostic>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Diagnostic>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.led(TokenKind::And, parse_binary_expr);
    parser.led(TokenKind::Or, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, parse_binary_expr);
    parser.led(TokenKind::NotEquals, parse_binary_expr);
    parser.led(TokenKind::Less, parse_binary_expr);
    parser.led(TokenKind::LessEquals, parse_binary_expr);
    parser.led(TokenKind::Greater, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, parse_binary_expr);
    parser.led(TokenKind::Dash, parse_binary_expr);
    parser.led(TokenKind::Star, parse_binary_expr);
    parser.led(TokenKind::Slash, parse_binary_expr);

    parser.led(TokenKind::OpenParen, parse_call_expr);
    parser.led(TokenKind::OpenBracket, parse_index_expr);

    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::Int, parse_primary_expr);
    parser.nud(TokenKind::Float, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::Null, parse_primary_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenBracket, parse_array_expr);
    parser.nud(TokenKind::OpenCurly, parse_dict_expr);
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::For, parse_for_expr);
    parser.nud(TokenKind::Fn, parse_fn_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_var_decl_stmt);
    parser.stmt(TokenKind::Const, parse_var_decl_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

// Lookup tables inside parser struct, so each parser owns its own
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
