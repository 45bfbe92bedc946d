//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's literal text
/// * `$line` - 1-based source line
/// * `$col` - 1-based source column
/// * `$depth` - Block nesting depth at emission
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), 1, 9, 0);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr, $col:expr, $depth:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $line,
            col: $col,
            depth: $depth,
        }
    };
}
