/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Compilation unit, imports and the structural equivalence trait
/// - expressions: Expression nodes and operators
/// - statements: Statements, functions, variables and top-level declarations
/// - types: Type names as written in source
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
