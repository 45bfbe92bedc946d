//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser pulls tokens from its own lexer two at a time (current and
//! next) and dispatches on token kind through per-parser lookup tables:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//!
//! Grammar violations are recorded as diagnostics and parsing carries on
//! with the next statement.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Diagnostic, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, LEDHandler, LEDLookup, NUDHandler, NUDLookup, StmtHandler,
        StmtLookup,
    },
    stmt::parse_stmt_or_record,
};

/// The main parser structure that maintains parsing state.
///
/// Handlers are entered with the current token on the first token of their
/// construct and return with the current token on its last token.
pub struct Parser {
    /// The token source
    lexer: Lexer,
    /// Token being parsed
    cur: Token,
    /// One token of lookahead
    next: Token,
    /// Diagnostics in the order they were found
    errors: Vec<Diagnostic>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
}

impl Parser {
    /// Creates a new Parser over `source`.
    ///
    /// # Arguments
    ///
    /// * `source` - Source text of the program
    /// * `file` - Name used in diagnostics, `"shell"` when absent
    pub fn new(source: impl Into<Vec<u8>>, file: Option<String>) -> Self {
        let mut lexer = Lexer::new(source, file);
        let cur = lexer.next_token();
        let next = lexer.next_token();

        let mut parser = Parser {
            lexer,
            cur,
            next,
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.cur
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.cur.kind
    }

    /// Returns the lookahead token.
    pub fn next_token(&self) -> &Token {
        &self.next
    }

    /// Returns the kind of the lookahead token.
    pub fn next_token_kind(&self) -> TokenKind {
        self.next.kind
    }

    /// Shifts the lookahead into the current token and pulls a new lookahead.
    pub fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.cur = std::mem::replace(&mut self.next, next);
    }

    /// Checks that the current token is `expected_kind`.
    pub fn expect_current(&self, expected_kind: TokenKind) -> Result<(), Diagnostic> {
        if self.cur.kind != expected_kind {
            return Err(self.unexpected(&self.cur, expected_kind));
        }
        Ok(())
    }

    /// Advances onto the lookahead if it is `expected_kind`, otherwise
    /// reports it without moving.
    pub fn expect_next(&mut self, expected_kind: TokenKind) -> Result<(), Diagnostic> {
        if self.next.kind != expected_kind {
            return Err(self.unexpected(&self.next, expected_kind));
        }
        self.advance();
        Ok(())
    }

    /// Builds a diagnostic for `token`, highlighting it in its source line.
    pub fn error(&self, error: ErrorImpl, token: &Token) -> Diagnostic {
        Diagnostic::new(
            error,
            token.clone(),
            &self.lexer.line_text(token.line),
            self.lexer.file(),
        )
    }

    fn unexpected(&self, token: &Token, want: TokenKind) -> Diagnostic {
        self.error(
            ErrorImpl::UnexpectedToken {
                got: token.kind,
                want,
            },
            token,
        )
    }

    /// Adds `diagnostic` to the collected errors.
    ///
    /// A failure escaping nested blocks reaches several statement boundaries;
    /// only the first report for a token is kept.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        if self
            .errors
            .last()
            .is_some_and(|last| last.get_token() == diagnostic.get_token())
        {
            return;
        }

        debug!(
            name = diagnostic.get_error_name(),
            line = diagnostic.get_token().line,
            col = diagnostic.get_token().col,
            "recorded parse diagnostic"
        );
        self.errors.push(diagnostic);
    }

    /// Diagnostics collected so far, in order.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn file(&self) -> &str {
        self.lexer.file()
    }

    /// Returns the statement handler registered for `kind`.
    pub fn get_stmt_handler(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.stmt_lookup.get(&kind).copied()
    }

    /// Returns the NUD (null denotation) handler registered for `kind`.
    pub fn get_nud_handler(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    /// Returns the LED (left denotation) handler registered for `kind`.
    pub fn get_led_handler(&self, kind: TokenKind) -> Option<LEDHandler> {
        self.led_lookup.get(&kind).copied()
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, led_fn: LEDHandler) {
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Parses statements until the end of input.
    ///
    /// A statement that fails to parse is left out of the program and its
    /// diagnostic recorded; the parser always advances at least one token per
    /// statement attempt.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while self.cur.kind != TokenKind::EOF {
            if let Some(stmt) = parse_stmt_or_record(self) {
                program.statements.push(stmt);
            }
            self.advance();
        }

        debug!(
            file = self.lexer.file(),
            statements = program.statements.len(),
            diagnostics = self.errors.len(),
            "parsed program"
        );
        program
    }
}

/// Parses `source` into a program.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses all statements until EOF.
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance, holding the diagnostics found
/// - The parsed Program (statements that failed to parse are absent)
pub fn parse(source: impl Into<Vec<u8>>, file: Option<String>) -> (Parser, Program) {
    let mut parser = Parser::new(source, file);
    let program = parser.parse_program();
    (parser, program)
}
