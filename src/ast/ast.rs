use crate::{
    symbols::symbols::{ScopeId, SymbolArena},
    Span,
};

use super::statements::TopLevel;

/// Equality over the meaning of a tree.
///
/// Spans, resolved type slots, scope ids and definition ids are ignored, so a
/// reparsed or freshly built tree compares equal to the original.
pub trait StructurallyEquivalent {
    fn is_structurally_equivalent(&self, other: &Self) -> bool;
}

impl<T: StructurallyEquivalent> StructurallyEquivalent for Vec<T> {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(left, right)| left.is_structurally_equivalent(right))
    }
}

impl<T: StructurallyEquivalent> StructurallyEquivalent for Option<T> {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(left), Some(right)) => left.is_structurally_equivalent(right),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: StructurallyEquivalent> StructurallyEquivalent for Box<T> {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        (**self).is_structurally_equivalent(&**other)
    }
}

/// `Name` or `Name as Alias` inside an import.
#[derive(Debug, Clone)]
pub struct ImportEntry {
    pub name: String,
    pub alias: Option<String>,
    pub span: Span,
}

impl ImportEntry {
    /// The name the entry is known by in this unit.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl StructurallyEquivalent for ImportEntry {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        self.name == other.name && self.alias == other.alias
    }
}

/// `import "path" { A, B as C }`
#[derive(Debug, Clone)]
pub struct Import {
    pub path: String,
    pub entries: Vec<ImportEntry>,
    pub span: Span,
    /// Set once type resolution has registered the entries.
    pub resolved: bool,
}

impl StructurallyEquivalent for Import {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        self.path == other.path && self.entries.is_structurally_equivalent(&other.entries)
    }
}

/// Root of one parsed source file. Owns the scope arena of the whole file.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub imports: Vec<Import>,
    pub entries: Vec<TopLevel>,
    pub table: ScopeId,
    pub symbols: SymbolArena,
    pub span: Span,
}

impl StructurallyEquivalent for CompilationUnit {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        self.imports.is_structurally_equivalent(&other.imports)
            && self.entries.is_structurally_equivalent(&other.entries)
    }
}
