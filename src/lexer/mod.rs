//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (scanner) that converts source bytes
//! into a pull-based stream of tokens for parsing. It handles:
//!
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line, column and block nesting depth tracking for every token
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
