use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("let", TokenKind::Let);
        map.insert("const", TokenKind::Const);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("elif", TokenKind::Elif);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map.insert("for", TokenKind::For);
        map.insert("null", TokenKind::Null);
        map
    };
}

/// Looks up `ident` in the reserved words, falling back to `Identifier`.
pub fn lookup_identifier(ident: &str) -> TokenKind {
    RESERVED_LOOKUP
        .get(ident)
        .copied()
        .unwrap_or(TokenKind::Identifier)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Unknown,
    UnclosedBlock,

    Identifier,
    Int,
    Float,
    String,

    Assignment, // =
    Plus,
    Dash,
    Not, // !
    Star,
    Slash,
    Colon,
    Semicolon,
    Comma,

    Less,
    Greater,
    Equals,    // ==
    NotEquals, // !=
    LessEquals,
    GreaterEquals,
    And, // &&
    Or,  // ||

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    OpenBracket,
    CloseBracket,

    // Reserved
    Fn,
    Let,
    Const,
    True,
    False,
    If,
    Elif,
    Else,
    Return,
    For,
    Null,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TokenKind::EOF => "end of input",
            TokenKind::Unknown => "unknown",
            TokenKind::UnclosedBlock => "unclosed block",
            TokenKind::Identifier => "identifier",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::Assignment => "=",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Not => "!",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::LessEquals => "<=",
            TokenKind::GreaterEquals => ">=",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Fn => "fn",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::For => "for",
            TokenKind::Null => "null",
        };
        write!(f, "{}", text)
    }
}

/// Terminal escape used when highlighting a token inside a source line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    Red,
    Reset,
}

impl Color {
    pub fn escape(&self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Reset => "\x1b[0m",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// 1-based line
    pub line: usize,
    /// 1-based column, one per byte
    pub col: usize,
    /// Number of open blocks when the token was produced
    pub depth: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Type={}|Literal={:?}|Line={}|Col={}|Depth={}",
            self.kind, self.value, self.line, self.col, self.depth
        )
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Returns `line` with the first occurrence of this token's literal
    /// wrapped in `color`. Tokens with an empty literal leave it untouched.
    pub fn highlight(&self, line: &str, color: Color) -> String {
        if line.is_empty() {
            return String::new();
        }
        // Nothing to point at, e.g. EOF or an unclosed block
        if self.value.is_empty() {
            return line.to_string();
        }

        let escaped = self.value.replace('\n', "\\n").replace('\t', "\\t");
        let colored = format!("{}{}{}", color.escape(), escaped, Color::Reset.escape());

        line.replacen(self.value.as_str(), &colored, 1)
    }

    pub fn highlight_err(&self, line: &str) -> String {
        self.highlight(line, Color::Red)
    }
}
