use std::fmt::Display;

use thiserror::Error;

use crate::lexer::tokens::{Token, TokenKind};

/// A recoverable grammar violation found while parsing.
///
/// Diagnostics are collected in order by the parser; none of them stops the
/// parse. `message` is the fully formatted text, including the offending
/// source line with the token highlighted.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct Diagnostic {
    internal_error: ErrorImpl,
    token: Token,
    file: String,
    source_line: String,
    line: String,
    message: String,
}

impl Diagnostic {
    /// `line_text` is the raw text of the line `token` sits on.
    pub fn new(error_impl: ErrorImpl, token: Token, line_text: &str, file: &str) -> Self {
        let line = token.highlight_err(line_text);
        let message = format!(
            "ParseError: {} at\n\t{}:L{}:C{} ------> {}",
            error_impl, file, token.line, token.col, line
        );

        Diagnostic {
            internal_error: error_impl,
            token,
            file: file.to_string(),
            source_line: line_text.to_string(),
            line,
            message,
        }
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_token(&self) -> &Token {
        &self.token
    }

    /// The offending source line with the token highlighted.
    pub fn get_line(&self) -> &str {
        &self.line
    }

    pub fn get_message(&self) -> &str {
        &self.message
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::MissingPrefix { .. } => "MissingPrefix",
            ErrorImpl::MissingInfix { .. } => "MissingInfix",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken {
                got: TokenKind::UnclosedBlock,
                ..
            } => ErrorTip::Suggestion(String::from(
                "Reached the end of input inside a block, is a `}` missing?",
            )),
            ErrorImpl::UnexpectedToken { want, .. }
                if matches!(
                    want,
                    TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseCurly
                ) =>
            {
                ErrorTip::Suggestion(format!("Expected a closing `{}`", want))
            }
            ErrorImpl::UnexpectedToken { .. } => ErrorTip::None,
            ErrorImpl::MissingPrefix {
                kind: TokenKind::UnclosedBlock,
            } => ErrorTip::Suggestion(String::from(
                "Reached the end of input inside a block, is a `}` missing?",
            )),
            ErrorImpl::MissingPrefix { kind } => {
                ErrorTip::Suggestion(format!("`{}` cannot start an expression", kind))
            }
            ErrorImpl::MissingInfix { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { token, .. } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
        }
    }

    /// Renders the diagnostic as a gutter report pointing at the token.
    ///
    /// ```text
    /// Error: UnexpectedToken (Expected a closing `)`)
    /// -> main.blue
    ///   |
    /// 1 | let a = (1 + 2;
    ///   | --------------^
    /// ```
    pub fn report(&self) -> String {
        let line_str = self.token.line.to_string();
        let padding = line_str.len() + 2;

        let mut out = String::new();
        if let ErrorTip::None = self.get_tip() {
            out.push_str(&format!("Error: {}\n", self.get_error_name()));
        } else {
            out.push_str(&format!("Error: {} ({})\n", self.get_error_name(), self.get_tip()));
        }
        out.push_str(&format!("-> {}\n", self.file));
        out.push_str(&format!("{:>padding$}\n", "|"));

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&self.source_line);
        out.push_str(&format!("{} | {}\n", line_str, line_text_removed.trim_end()));

        let arrows = self.token.col.saturating_sub(removed_whitespace).max(1);
        out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));

        out
    }
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unexpected token, got=\"{got}\", want=\"{want}\"")]
    UnexpectedToken { got: TokenKind, want: TokenKind },
    #[error("no \"prefix\" function found for token \"{kind}\"")]
    MissingPrefix { kind: TokenKind },
    #[error("no \"infix\" function found for token \"{kind}\"")]
    MissingInfix { kind: TokenKind },
    #[error("failed to parse \"{token}\" as a number: {reason}")]
    NumberParseError { token: String, reason: String },
}
