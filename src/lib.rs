#![allow(clippy::module_inception)]

//! Front end for the blue scripting language.
//!
//! Source text goes through the [`lexer`] into a pull-based token stream, the
//! [`parser`] turns that stream into an [`ast`] while collecting
//! [`errors::errors::Diagnostic`]s, and everything after that (evaluation,
//! type checking, builtins) is left to the caller.

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

pub use ast::ast::{Expr, Program, Stmt};
pub use errors::errors::Diagnostic;
pub use parser::parser::{parse, Parser};

/// Runs `callback`, first moving to a fresh heap-allocated stack segment when
/// less than 64 KiB of stack remains.
///
/// Parsing and rendering recurse once per nesting level and nesting has no
/// fixed limit, so every recursive entry point goes through here.
pub(crate) fn grow_stack<R>(callback: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(64 * 1024, 1024 * 1024, callback)
}
