//! Diagnostics produced by every stage of the front-end.
//!
//! - `Error` pairs an `ErrorImpl` with the source position it refers to
//! - `ErrorKind` groups errors into syntax, semantic, type and internal errors
//! - `Reporter` collects diagnostics in the order they were found

pub mod errors;

#[cfg(test)]
mod tests;
