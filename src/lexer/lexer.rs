use tracing::trace;

use crate::MK_TOKEN;

use super::tokens::{lookup_identifier, Token, TokenKind};

/// Pull-based scanner over a byte buffer.
///
/// The lexer keeps the current byte plus one byte of lookahead and tracks
/// line, column and block nesting depth as it goes. Each call to
/// [`Lexer::next_token`] produces exactly one token.
#[derive(Clone)]
pub struct Lexer {
    source: Vec<u8>,
    /// Index of `current` in `source`
    pos: usize,
    current: Option<u8>,
    line: usize,
    col: usize,
    depth: usize,
    file: String,
}

impl Lexer {
    pub fn new(source: impl Into<Vec<u8>>, file: Option<String>) -> Lexer {
        let source = source.into();
        let current = source.first().copied();

        Lexer {
            source,
            pos: 0,
            current,
            line: 1,
            col: 1,
            depth: 0,
            file: file.unwrap_or_else(|| String::from("shell")),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Current block nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Moves to the next byte, keeping line and column up to date.
    fn advance(&mut self) {
        if self.current.is_none() {
            return;
        }

        if self.current == Some(b'\n') {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }

        self.pos += 1;
        self.current = self.source.get(self.pos).copied();
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current, Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.advance();
        }
    }

    fn skip_comment(&mut self) {
        while !matches!(self.current, None | Some(b'\n')) {
            self.advance();
        }
    }

    fn text(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.source[start..end]).into_owned()
    }

    fn read_while(&mut self, accept: fn(u8) -> bool) -> String {
        let start = self.pos;
        while self.current.is_some_and(accept) {
            self.advance();
        }
        self.text(start, self.pos)
    }

    /// Builds a token for the current byte and moves past it.
    fn single(&mut self, kind: TokenKind) -> Token {
        let byte = self.current.unwrap_or_default();
        let token = MK_TOKEN!(kind, (byte as char).to_string(), self.line, self.col, self.depth);
        self.advance();
        token
    }

    /// Builds `double` if the byte after the current one is `second`,
    /// otherwise falls back to the one-byte `single` kind.
    fn either(&mut self, second: u8, double: TokenKind, single: TokenKind) -> Token {
        if self.peek() != Some(second) {
            return self.single(single);
        }

        let (line, col, start) = (self.line, self.col, self.pos);
        self.advance();
        self.advance();
        MK_TOKEN!(double, self.text(start, start + 2), line, col, self.depth)
    }

    fn string(&mut self) -> Token {
        let (line, col) = (self.line, self.col);
        self.advance(); // opening quote

        let start = self.pos;
        while !matches!(self.current, None | Some(b'"')) {
            self.advance();
        }
        let value = self.text(start, self.pos);

        // Unterminated strings run to the end of input
        self.advance();
        MK_TOKEN!(TokenKind::String, value, line, col, self.depth)
    }

    fn identifier(&mut self) -> Token {
        let (line, col) = (self.line, self.col);
        let value = self.read_while(is_identifier);
        MK_TOKEN!(lookup_identifier(&value), value, line, col, self.depth)
    }

    fn number(&mut self) -> Token {
        let (line, col) = (self.line, self.col);
        let mut value = self.read_while(is_digit);

        if self.current == Some(b'.') && self.peek().is_some_and(is_digit) {
            self.advance();
            value.push('.');
            value.push_str(&self.read_while(is_digit));
            return MK_TOKEN!(TokenKind::Float, value, line, col, self.depth);
        }

        MK_TOKEN!(TokenKind::Int, value, line, col, self.depth)
    }

    fn end_of_input(&mut self) -> Token {
        if self.depth > 0 {
            let token = MK_TOKEN!(TokenKind::UnclosedBlock, String::new(), self.line, self.col, self.depth);
            self.depth = 0;
            return token;
        }

        self.eof()
    }

    fn eof(&self) -> Token {
        if self.depth != 0 {
            panic!(
                "end of input reached at nesting depth {} in {}",
                self.depth, self.file
            );
        }

        MK_TOKEN!(TokenKind::EOF, String::new(), self.line, self.col, self.depth)
    }

    /// Produces the next token and advances past it.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            if self.current == Some(b'/') && self.peek() == Some(b'/') {
                self.skip_comment();
            } else {
                break;
            }
        }

        let Some(byte) = self.current else {
            return self.end_of_input();
        };

        let token = match byte {
            b'=' => self.either(b'=', TokenKind::Equals, TokenKind::Assignment),
            b'!' => self.either(b'=', TokenKind::NotEquals, TokenKind::Not),
            b'<' => self.either(b'=', TokenKind::LessEquals, TokenKind::Less),
            b'>' => self.either(b'=', TokenKind::GreaterEquals, TokenKind::Greater),
            b'&' => self.either(b'&', TokenKind::And, TokenKind::Unknown),
            b'|' => self.either(b'|', TokenKind::Or, TokenKind::Unknown),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Dash),
            b'*' => self.single(TokenKind::Star),
            b'/' => self.single(TokenKind::Slash),
            b':' => self.single(TokenKind::Colon),
            b';' => self.single(TokenKind::Semicolon),
            b',' => self.single(TokenKind::Comma),
            b'(' => self.single(TokenKind::OpenParen),
            b')' => self.single(TokenKind::CloseParen),
            b'[' => self.single(TokenKind::OpenBracket),
            b']' => self.single(TokenKind::CloseBracket),
            b'{' => {
                self.depth += 1;
                self.single(TokenKind::OpenCurly)
            }
            b'}' => {
                let token = self.single(TokenKind::CloseCurly);
                self.depth = self.depth.saturating_sub(1);
                token
            }
            b'"' => self.string(),
            b if is_identifier_start(b) => self.identifier(),
            b if is_digit(b) => self.number(),
            _ => self.single(TokenKind::Unknown),
        };

        trace!(kind = ?token.kind, value = %token.value, line = token.line, col = token.col, "scanned token");
        token
    }

    /// Returns the text of line `line` (1-based) without its newline, or an
    /// empty string when the line does not exist.
    pub fn line_text(&self, line: usize) -> String {
        if line == 0 {
            return String::new();
        }

        self.source
            .split(|byte| *byte == b'\n')
            .nth(line - 1)
            .map(|text| String::from_utf8_lossy(text).into_owned())
            .unwrap_or_default()
    }
}

fn is_identifier_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

fn is_identifier(byte: u8) -> bool {
    is_identifier_start(byte) || is_digit(byte)
}

fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

/// Scans `source` to completion, returning every token up to and including
/// the EOF token.
pub fn tokenize(source: impl Into<Vec<u8>>, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
