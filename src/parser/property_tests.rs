//! Property-based tests for the lexer and parser.
//!
//! These tests use `proptest` to check invariants over generated inputs:
//!
//! 1. **Parser never panics** and always terminates on arbitrary input
//! 2. **Lexer always ends balanced**: the final token is EOF at depth 0
//! 3. **Diagnostics point into the input**: every reported line exists
//! 4. **Canonical form is stable**: rendering, re-parsing and rendering
//!    again yields the same text

use proptest::prelude::*;

use crate::lexer::{
    lexer::tokenize,
    tokens::{lookup_identifier, TokenKind},
};

use super::parser::parse;

/// Source fragments for composing near-valid programs.
const FRAGMENTS: &[&str] = &[
    "let x = 5;",
    "const y = 3.14",
    "x = x + 1",
    "return;",
    "return x * 2",
    "fn add(a, b) { return a + b; }",
    "fn() { }",
    "if x < y { x } elif x > y { y } else { 0 }",
    "for let i = range(arr) { print(i); }",
    "[1, 2 * 2, 3 + 3]",
    "{\"one\": 1, \"two\": 2}",
    "add(1, 2)[0]",
    "!true == false",
    "a && b || c",
    "\"foo bar\"",
    "null",
    "// comment\n",
    "{",
    "}",
    "(",
    ")",
    "@",
];

fn fragment() -> impl Strategy<Value = String> {
    prop::sample::select(FRAGMENTS).prop_map(ToString::to_string)
}

/// Programs built from fragments, cut at an arbitrary point.
fn near_valid_program() -> impl Strategy<Value = String> {
    (prop::collection::vec(fragment(), 0..8), any::<prop::sample::Index>()).prop_map(
        |(parts, cut)| {
            let source = parts.join("\n");
            let end = if source.is_empty() {
                0
            } else {
                cut.index(source.len() + 1)
            };
            source[..end].to_string()
        },
    )
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,6}".prop_filter("keywords are not identifiers", |name| {
        lookup_identifier(name) == TokenKind::Identifier
    })
}

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        identifier(),
        (0u32..100_000).prop_map(|n| n.to_string()),
        (0u32..1000, 0u32..1000).prop_map(|(a, b)| format!("{}.{}", a, b)),
        "[a-z ]{0,8}".prop_map(|s| format!("\"{}\"", s)),
        Just("true".to_string()),
        Just("false".to_string()),
        Just("null".to_string()),
    ]
}

/// Well-formed expressions of bounded depth.
fn expression() -> impl Strategy<Value = String> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(&["+", "-", "*", "/", "==", "!=", "<", ">", "<=", ">=", "&&", "||"][..]),
                inner.clone()
            )
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            (prop::sample::select(&["-", "!"][..]), inner.clone())
                .prop_map(|(op, e)| format!("{}{}", op, e)),
            inner.clone().prop_map(|e| format!("({})", e)),
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|items| format!("[{}]", items.join(", "))),
            (identifier(), prop::collection::vec(inner.clone(), 0..4))
                .prop_map(|(callee, args)| format!("{}({})", callee, args.join(", "))),
            (identifier(), inner).prop_map(|(base, index)| format!("{}[{}]", base, index)),
        ]
    })
}

fn proptest_config() -> ProptestConfig {
    let default = ProptestConfig::default();
    ProptestConfig {
        cases: default.cases.max(512),
        ..default
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn parser_never_panics(input in "\\PC{0,300}") {
        let (_, _program) = parse(input.as_str(), None);
    }

    #[test]
    fn parser_never_panics_on_near_valid_input(input in near_valid_program()) {
        let (_, _program) = parse(input.as_str(), None);
    }

    #[test]
    fn lexer_ends_at_depth_zero(input in near_valid_program()) {
        let tokens = tokenize(input.as_str(), None);
        let last = tokens.last().unwrap();

        prop_assert_eq!(last.kind, TokenKind::EOF);
        prop_assert_eq!(last.depth, 0);

        let unclosed = tokens.iter().filter(|t| t.kind == TokenKind::UnclosedBlock).count();
        prop_assert!(unclosed <= 1);
    }

    #[test]
    fn diagnostics_point_into_input(input in near_valid_program()) {
        let (parser, _) = parse(input.as_str(), None);
        let lines = input.split('\n').count();

        for diagnostic in parser.errors() {
            let token = diagnostic.get_token();
            prop_assert!(token.line >= 1 && token.line <= lines);
            prop_assert!(token.col >= 1);
        }
    }

    #[test]
    fn canonical_form_is_stable(source in expression()) {
        let (parser, program) = parse(source.as_str(), None);
        prop_assert!(!parser.has_errors(), "{:?}: {:?}", source, parser.errors());

        let rendered = program.to_string();
        let (parser, reparsed) = parse(rendered.as_str(), None);
        prop_assert!(!parser.has_errors(), "{:?}: {:?}", rendered, parser.errors());
        prop_assert_eq!(reparsed.to_string(), rendered);
    }

    #[test]
    fn declarations_render_canonically(name in identifier(), value in expression()) {
        let (parser, program) = parse(format!("let {} = {}", name, value), None);
        prop_assert!(!parser.has_errors());
        prop_assert_eq!(program.len(), 1);

        let rendered = program.to_string();
        let prefix = format!("let {} = ", name);
        prop_assert!(rendered.starts_with(&prefix), "{:?}", rendered);
        prop_assert!(rendered.ends_with(';'));
    }
}
