//! Lexical analysis module for the front-end.
//!
//! This module converts source code into a stream of tokens for parsing. It handles:
//!
//! - Data-driven regex rule tables, one per lexer mode
//! - String literals with `\{ ... }` template interpolation through a mode stack
//! - Recognition of keywords, identifiers, integer literals and operators
//! - Token position tracking (offset, line, column) for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod modes;
pub mod stream;
pub mod tokens;

#[cfg(test)]
mod tests;
