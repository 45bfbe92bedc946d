//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers and floats)
//! - String literals
//! - Operators and punctuation
//! - Comments
//! - Line, column and nesting depth tracking

use super::{
    lexer::{tokenize, Lexer},
    tokens::{Color, Token, TokenKind},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.blue".to_string()))
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize("fn let const true false if elif else return for null", None);

    assert_eq!(tokens[0].kind, TokenKind::Fn);
    assert_eq!(tokens[1].kind, TokenKind::Let);
    assert_eq!(tokens[2].kind, TokenKind::Const);
    assert_eq!(tokens[3].kind, TokenKind::True);
    assert_eq!(tokens[4].kind, TokenKind::False);
    assert_eq!(tokens[5].kind, TokenKind::If);
    assert_eq!(tokens[6].kind, TokenKind::Elif);
    assert_eq!(tokens[7].kind, TokenKind::Else);
    assert_eq!(tokens[8].kind, TokenKind::Return);
    assert_eq!(tokens[9].kind, TokenKind::For);
    assert_eq!(tokens[10].kind, TokenKind::Null);
    assert_eq!(tokens[11].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore CamelCase letter iffy", None);

    let expected = ["foo", "bar", "baz_123", "_underscore", "CamelCase", "letter", "iffy"];
    for (token, value) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.value, value);
    }
    assert_eq!(tokens[expected.len()].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 100.5 7.", None);

    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Int);
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[3].value, "100.5");
    // A dot without digits after it is not part of the number
    assert_eq!(tokens[4].kind, TokenKind::Int);
    assert_eq!(tokens[4].value, "7");
    assert_eq!(tokens[5].kind, TokenKind::Unknown);
    assert_eq!(tokens[5].value, ".");
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""foo bar" "" "a//b""#, None);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "foo bar");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "a//b");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unterminated_string() {
    let tokens = tokenize("let s = \"runs off", None);

    assert_eq!(tokens[3].kind, TokenKind::String);
    assert_eq!(tokens[3].value, "runs off");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("= + - ! * / : ; , < > == != <= >= && ||"),
        vec![
            TokenKind::Assignment,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Not,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_two_char_operators_without_spaces() {
    let tokens = tokenize("a<=b!=!c", None);

    assert_eq!(tokens[1].kind, TokenKind::LessEquals);
    assert_eq!(tokens[1].value, "<=");
    assert_eq!(tokens[3].kind, TokenKind::NotEquals);
    assert_eq!(tokens[3].value, "!=");
    assert_eq!(tokens[4].kind, TokenKind::Not);
    assert_eq!(tokens[5].value, "c");
}

#[test]
fn test_tokenize_delimiters() {
    assert_eq!(
        kinds("( ) [ ] { }"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_unknown_bytes() {
    let tokens = tokenize("@ & | #", None);

    for token in &tokens[..4] {
        assert_eq!(token.kind, TokenKind::Unknown);
    }
    assert_eq!(tokens[0].value, "@");
    assert_eq!(tokens[1].value, "&");
    assert_eq!(tokens[2].value, "|");
    assert_eq!(tokens[3].value, "#");
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("let x = 5 // this is a comment\nlet y = 10", None);

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].value, "x");
    assert_eq!(tokens[3].kind, TokenKind::Int);
    assert_eq!(tokens[3].value, "5");
    assert_eq!(tokens[4].kind, TokenKind::Let);
    assert_eq!(tokens[4].line, 2);
    assert_eq!(tokens[5].value, "y");
    assert_eq!(tokens[7].value, "10");
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_only_comments_and_whitespace() {
    assert_eq!(kinds("  // one\n\t// two\r\n   // three"), vec![TokenKind::EOF]);
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}

#[test]
fn test_tokenize_slash_is_not_a_comment() {
    assert_eq!(
        kinds("a / b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Slash,
            TokenKind::Identifier,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_positions() {
    let source = "let x = 5;\n  foo(x)\n\n\"s\" + 1";
    let tokens = tokenize(source, None);

    let positions: Vec<(&str, usize, usize)> = tokens
        .iter()
        .map(|token| (token.value.as_str(), token.line, token.col))
        .collect();

    assert_eq!(
        positions,
        vec![
            ("let", 1, 1),
            ("x", 1, 5),
            ("=", 1, 7),
            ("5", 1, 9),
            (";", 1, 10),
            ("foo", 2, 3),
            ("(", 2, 6),
            ("x", 2, 7),
            (")", 2, 8),
            ("s", 4, 1),
            ("+", 4, 5),
            ("1", 4, 7),
            ("", 4, 8),
        ]
    );
}

#[test]
fn test_tokenize_nesting_depth() {
    let tokens = tokenize("a { b { c } d } e", None);

    let depths: Vec<(TokenKind, usize)> = tokens
        .iter()
        .map(|token| (token.kind, token.depth))
        .collect();

    assert_eq!(
        depths,
        vec![
            (TokenKind::Identifier, 0),
            (TokenKind::OpenCurly, 1),
            (TokenKind::Identifier, 1),
            (TokenKind::OpenCurly, 2),
            (TokenKind::Identifier, 2),
            (TokenKind::CloseCurly, 2),
            (TokenKind::Identifier, 1),
            (TokenKind::CloseCurly, 1),
            (TokenKind::Identifier, 0),
            (TokenKind::EOF, 0),
        ]
    );
}

#[test]
fn test_tokenize_unclosed_block() {
    let tokens = tokenize("fn() { {", None);

    let last = tokens.len() - 1;
    assert_eq!(tokens[last - 1].kind, TokenKind::UnclosedBlock);
    assert_eq!(tokens[last - 1].depth, 2);
    assert_eq!(tokens[last].kind, TokenKind::EOF);
    assert_eq!(tokens[last].depth, 0);
}

#[test]
fn test_tokenize_stray_close_does_not_go_negative() {
    let tokens = tokenize("} x", None);

    assert_eq!(tokens[0].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[0].depth, 0);
    assert_eq!(tokens[1].depth, 0);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_lexer_keeps_returning_eof() {
    let mut lexer = Lexer::new("x", None);

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().kind, TokenKind::EOF);
    assert_eq!(lexer.depth(), 0);
}

#[test]
fn test_lexer_default_file_name() {
    assert_eq!(Lexer::new("", None).file(), "shell");
    assert_eq!(Lexer::new("", Some("main.blue".to_string())).file(), "main.blue");
}

#[test]
fn test_line_text() {
    let lexer = Lexer::new("first\nsecond line\n\nlast", None);

    assert_eq!(lexer.line_text(1), "first");
    assert_eq!(lexer.line_text(2), "second line");
    assert_eq!(lexer.line_text(3), "");
    assert_eq!(lexer.line_text(4), "last");
    assert_eq!(lexer.line_text(5), "");
    assert_eq!(lexer.line_text(0), "");
}

#[test]
fn test_token_highlight() {
    let token = Token {
        kind: TokenKind::Int,
        value: "5".to_string(),
        line: 1,
        col: 10,
        depth: 0,
    };

    assert_eq!(
        token.highlight("let x != 5;", Color::Red),
        "let x != \x1b[31m5\x1b[0m;"
    );
    assert_eq!(token.highlight_err("let x != 5;"), "let x != \x1b[31m5\x1b[0m;");
    assert_eq!(token.highlight_err(""), "");
}

#[test]
fn test_token_highlight_first_occurrence_only() {
    let token = Token {
        kind: TokenKind::Identifier,
        value: "x".to_string(),
        line: 1,
        col: 5,
        depth: 0,
    };

    assert_eq!(token.highlight_err("x + x"), "\x1b[31mx\x1b[0m + x");
}

#[test]
fn test_token_highlight_empty_literal() {
    let eof = tokenize("let x", None).pop().expect("EOF is scanned");
    assert_eq!(eof.kind, TokenKind::EOF);
    assert_eq!(eof.highlight_err("let x"), "let x");

    let unclosed = tokenize("if a {", None).remove(3);
    assert_eq!(unclosed.kind, TokenKind::UnclosedBlock);
    assert_eq!(unclosed.highlight(" if a {", Color::Red), " if a {");
}

#[test]
fn test_token_display() {
    let token = tokenize("\n  foo", None).remove(0);

    assert_eq!(
        token.to_string(),
        "Type=identifier|Literal=\"foo\"|Line=2|Col=3|Depth=0"
    );
}
