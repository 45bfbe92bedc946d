use crate::{
    ast::{
        ast::Expr,
        expressions::{
            ArrayExpr, BooleanExpr, CallExpr, Conditional, DictExpr, ForExpr, FunctionExpr,
            IdentifierExpr, IfExpr, IndexExpr, InfixExpr, NullExpr, NumberExpr, NumberValue,
            PrefixExpr, StringExpr,
        },
    },
    errors::errors::{Diagnostic, ErrorImpl},
    grow_stack,
    lexer::tokens::TokenKind,
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    stmt::{parse_assignment_clause, parse_block_stmt},
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Diagnostic> {
    grow_stack(|| parse_expr_inner(parser, bp))
}

fn parse_expr_inner(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Diagnostic> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_handler(token_kind) else {
        return Err(parser.error(
            ErrorImpl::MissingPrefix { kind: token_kind },
            parser.current_token(),
        ));
    };

    let mut left = nud(parser)?;

    // While the lookahead binds tighter than bp, fold it into lhs
    while parser.next_token_kind() != TokenKind::Semicolon
        && bp < BindingPower::of(parser.next_token_kind())
    {
        let token_kind = parser.next_token_kind();
        let Some(led) = parser.get_led_handler(token_kind) else {
            return Err(parser.error(
                ErrorImpl::MissingInfix { kind: token_kind },
                parser.next_token(),
            ));
        };

        parser.advance();
        left = led(parser, left, BindingPower::of(token_kind))?;
    }

    Ok(left)
}

pub fn parse_identifier(parser: &Parser) -> IdentifierExpr {
    let token = parser.current_token().clone();
    IdentifierExpr {
        value: token.value.clone(),
        token,
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Identifier => Ok(Expr::Identifier(parse_identifier(parser))),
        TokenKind::Int => match token.value.parse::<i64>() {
            Ok(value) => Ok(Expr::Number(NumberExpr {
                value: NumberValue::Int(value),
                token,
            })),
            Err(err) => Err(number_error(parser, err.to_string())),
        },
        TokenKind::Float => match token.value.parse::<f64>() {
            Ok(value) => Ok(Expr::Number(NumberExpr {
                value: NumberValue::Float(value),
                token,
            })),
            Err(err) => Err(number_error(parser, err.to_string())),
        },
        TokenKind::String => Ok(Expr::String(StringExpr {
            value: token.value.clone(),
            token,
        })),
        TokenKind::True | TokenKind::False => Ok(Expr::Boolean(BooleanExpr {
            value: token.kind == TokenKind::True,
            token,
        })),
        TokenKind::Null => Ok(Expr::Null(NullExpr { token })),
        kind => Err(parser.error(ErrorImpl::MissingPrefix { kind }, &token)),
    }
}

fn number_error(parser: &Parser, reason: String) -> Diagnostic {
    let token = parser.current_token();
    parser.error(
        ErrorImpl::NumberParseError {
            token: token.value.clone(),
            reason,
        },
        token,
    )
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_next(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Parses a comma separated expression list closed by `end`. The current
/// token is the opening delimiter; on return it is `end`.
pub fn parse_expr_list(parser: &mut Parser, end: TokenKind) -> Result<Vec<Expr>, Diagnostic> {
    let mut list = vec![];

    if parser.next_token_kind() == end {
        parser.advance();
        return Ok(list);
    }

    parser.advance();
    list.push(parse_expr(parser, BindingPower::Default)?);

    while parser.next_token_kind() == TokenKind::Comma {
        parser.advance();
        parser.advance();
        list.push(parse_expr(parser, BindingPower::Default)?);
    }

    parser.expect_next(end)?;

    Ok(list)
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let token = parser.current_token().clone();
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;

    Ok(Expr::Array(ArrayExpr { token, elements }))
}

pub fn parse_dict_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let token = parser.current_token().clone();
    let mut pairs = vec![];

    while parser.next_token_kind() != TokenKind::CloseCurly {
        parser.advance();
        let key = parse_expr(parser, BindingPower::Default)?;

        parser.expect_next(TokenKind::Colon)?;
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;

        pairs.push((key, value));

        if parser.next_token_kind() != TokenKind::CloseCurly {
            parser.expect_next(TokenKind::Comma)?;
        }
    }

    parser.expect_next(TokenKind::CloseCurly)?;

    Ok(Expr::Dict(DictExpr { token, pairs }))
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    let token = parser.current_token().clone();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        token,
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_index_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Diagnostic> {
    let token = parser.current_token().clone();
    parser.advance();

    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect_next(TokenKind::CloseBracket)?;

    Ok(Expr::Index(IndexExpr {
        token,
        left: Box::new(left),
        index: Box::new(index),
    }))
}

/// Parses `<condition> { ... }`, starting on the token before the condition.
fn parse_conditional(parser: &mut Parser) -> Result<Conditional, Diagnostic> {
    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;

    parser.expect_next(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser)?;

    Ok(Conditional { condition, body })
}

pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let token = parser.current_token().clone();
    let mut clauses = vec![parse_conditional(parser)?];

    while parser.next_token_kind() == TokenKind::Elif {
        parser.advance();
        clauses.push(parse_conditional(parser)?);
    }

    let alternative = if parser.next_token_kind() == TokenKind::Else {
        parser.advance();
        parser.expect_next(TokenKind::OpenCurly)?;
        Some(parse_block_stmt(parser)?)
    } else {
        None
    };

    Ok(Expr::If(Box::new(IfExpr {
        token,
        clauses,
        alternative,
    })))
}

pub fn parse_for_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let token = parser.current_token().clone();
    parser.advance();

    let assignment = parse_assignment_clause(parser)?;

    parser.expect_next(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser)?;

    Ok(Expr::For(Box::new(ForExpr {
        token,
        assignment,
        body,
    })))
}

pub fn parse_fn_expr(parser: &mut Parser) -> Result<Expr, Diagnostic> {
    let token = parser.current_token().clone();

    let name = if parser.next_token_kind() == TokenKind::Identifier {
        parser.advance();
        Some(parse_identifier(parser))
    } else {
        None
    };

    parser.expect_next(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    if parser.next_token_kind() == TokenKind::CloseParen {
        parser.advance();
    } else {
        parser.expect_next(TokenKind::Identifier)?;
        parameters.push(parse_identifier(parser));

        while parser.next_token_kind() == TokenKind::Comma {
            parser.advance();
            parser.expect_next(TokenKind::Identifier)?;
            parameters.push(parse_identifier(parser));
        }

        parser.expect_next(TokenKind::CloseParen)?;
    }

    parser.expect_next(TokenKind::OpenCurly)?;
    let body = parse_block_stmt(parser)?;

    Ok(Expr::Function(Box::new(FunctionExpr {
        token,
        name,
        parameters,
        body,
    })))
}
