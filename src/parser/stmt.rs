use crate::{
    ast::{
        ast::Stmt,
        statements::{AssignKind, AssignStmt, BlockStmt, ExpressionStmt, ReturnStmt},
    },
    errors::errors::{Diagnostic, ErrorImpl},
    grow_stack,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_expr, parse_identifier},
    lookups::BindingPower,
    parser::Parser,
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    if parser.current_token_kind() == TokenKind::Identifier
        && parser.next_token_kind() == TokenKind::Assignment
    {
        return Ok(Stmt::Assign(parse_assignment_tail(
            parser,
            AssignKind::Reassign,
        )?));
    }

    if let Some(stmt_fn) = parser.get_stmt_handler(parser.current_token_kind()) {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

/// Parses one statement, recording its diagnostic on failure.
pub fn parse_stmt_or_record(parser: &mut Parser) -> Option<Stmt> {
    // A lone `;` is an empty statement
    if parser.current_token_kind() == TokenKind::Semicolon {
        return None;
    }

    match parse_stmt(parser) {
        Ok(stmt) => Some(stmt),
        Err(err) => {
            parser.record(err);
            None
        }
    }
}

fn skip_semicolon(parser: &mut Parser) {
    if parser.next_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }
}

/// `name = value[;]`, starting on `name`.
fn parse_assignment_tail(parser: &mut Parser, kind: AssignKind) -> Result<AssignStmt, Diagnostic> {
    let token = parser.current_token().clone();
    let name = parse_identifier(parser);

    parser.expect_next(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Default)?;
    skip_semicolon(parser);

    Ok(AssignStmt {
        token,
        kind,
        name,
        value: Box::new(value),
    })
}

fn parse_declaration(parser: &mut Parser) -> Result<AssignStmt, Diagnostic> {
    let token = parser.current_token().clone();
    let kind = if token.kind == TokenKind::Const {
        AssignKind::Const
    } else {
        AssignKind::Let
    };

    parser.expect_next(TokenKind::Identifier)?;

    let mut stmt = parse_assignment_tail(parser, kind)?;
    stmt.token = token;
    Ok(stmt)
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    Ok(Stmt::Assign(parse_declaration(parser)?))
}

/// The assignment heading a `for` loop: `let`, `const` or a reassignment.
pub fn parse_assignment_clause(parser: &mut Parser) -> Result<AssignStmt, Diagnostic> {
    match parser.current_token_kind() {
        TokenKind::Let | TokenKind::Const => parse_declaration(parser),
        TokenKind::Identifier if parser.next_token_kind() == TokenKind::Assignment => {
            parse_assignment_tail(parser, AssignKind::Reassign)
        }
        got => Err(parser.error(
            ErrorImpl::UnexpectedToken {
                got,
                want: TokenKind::Let,
            },
            parser.current_token(),
        )),
    }
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let token = parser.current_token().clone();

    let value = match parser.next_token_kind() {
        TokenKind::Semicolon => {
            parser.advance();
            return Ok(Stmt::Return(ReturnStmt { token, value: None }));
        }
        TokenKind::CloseCurly | TokenKind::UnclosedBlock | TokenKind::EOF => None,
        _ => {
            parser.advance();
            let value = parse_expr(parser, BindingPower::Default)?;
            skip_semicolon(parser);
            Some(value)
        }
    };

    Ok(Stmt::Return(ReturnStmt { token, value }))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Diagnostic> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Default)?;
    skip_semicolon(parser);

    Ok(Stmt::Expression(ExpressionStmt { token, expression }))
}

fn at_block_end(parser: &Parser, depth: usize) -> bool {
    let token = parser.current_token();
    if token.is_one_of_many(&[TokenKind::EOF, TokenKind::UnclosedBlock]) {
        return true;
    }

    token.kind == TokenKind::CloseCurly && token.depth == depth
}

/// Parses `{ ... }`, starting on the `{` and ending on its matching `}`.
///
/// Statements that fail inside the block are recorded and skipped, the block
/// itself only fails when its closing brace never comes.
pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Diagnostic> {
    grow_stack(|| parse_block_body(parser))
}

fn parse_block_body(parser: &mut Parser) -> Result<BlockStmt, Diagnostic> {
    let token = parser.current_token().clone();
    let depth = token.depth;
    let mut body = vec![];

    parser.advance();

    while !at_block_end(parser, depth) {
        if let Some(stmt) = parse_stmt_or_record(parser) {
            body.push(stmt);
        }

        // A failed statement can stop right on our closing brace
        if at_block_end(parser, depth) {
            break;
        }
        parser.advance();
    }

    parser.expect_current(TokenKind::CloseCurly)?;

    Ok(BlockStmt { token, body })
}
