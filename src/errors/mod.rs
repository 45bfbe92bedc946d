//! Error types and error handling for the front end.
//!
//! This module defines the diagnostics produced while parsing. It includes:
//!
//! - The error variants a parse can report
//! - Diagnostic records carrying the offending token and source line
//! - Message and report formatting with the token highlighted

pub mod errors;
