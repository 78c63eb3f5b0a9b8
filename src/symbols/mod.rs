//! Lexical scopes.
//!
//! Every scope-introducing construct (compilation unit, block, function,
//! anonymous function, lambda) owns one `SymbolTable` inside the unit's
//! `SymbolArena`, linked to its enclosing table by `ScopeId`.

pub mod symbols;

#[cfg(test)]
mod tests;
