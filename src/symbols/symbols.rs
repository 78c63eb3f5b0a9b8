use std::collections::HashMap;

use crate::{type_checker::types::Type, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefinitionId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Function,
    Argument,
    LocalVariable,
    Property,
}

/// A named declaration. `resolved` is filled once by type resolution.
#[derive(Debug, Clone)]
pub struct Definition {
    pub name: String,
    pub kind: DefinitionKind,
    pub span: Span,
    /// References before this offset do not see the definition.
    pub visible_from: u32,
    pub is_mutable: bool,
    pub resolved: Option<Type>,
}

impl Definition {
    pub fn new(name: &str, kind: DefinitionKind, span: Span, visible_from: u32, is_mutable: bool) -> Self {
        Definition {
            name: name.to_string(),
            kind,
            span,
            visible_from,
            is_mutable,
            resolved: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    pub parent: Option<ScopeId>,
    entries: HashMap<String, DefinitionId>,
}

impl SymbolTable {
    pub fn get(&self, name: &str) -> Option<DefinitionId> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owns every table and definition of one compilation unit.
///
/// Tables point at their parent by index, so the chain can be walked from any
/// scope without back-references.
#[derive(Debug, Clone, Default)]
pub struct SymbolArena {
    tables: Vec<SymbolTable>,
    definitions: Vec<Definition>,
}

impl SymbolArena {
    pub fn new() -> Self {
        SymbolArena::default()
    }

    pub fn create_table(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.tables.len());
        self.tables.push(SymbolTable {
            parent,
            entries: HashMap::new(),
        });
        id
    }

    pub fn table(&self, scope: ScopeId) -> &SymbolTable {
        &self.tables[scope.0]
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.tables[scope.0].parent
    }

    pub fn add_definition(&mut self, definition: Definition) -> DefinitionId {
        let id = DefinitionId(self.definitions.len());
        self.definitions.push(definition);
        id
    }

    pub fn definition(&self, id: DefinitionId) -> &Definition {
        &self.definitions[id.0]
    }

    pub fn definition_mut(&mut self, id: DefinitionId) -> &mut Definition {
        &mut self.definitions[id.0]
    }

    /// Binds `name` in `scope`.
    ///
    /// # Panics
    ///
    /// Panics if `scope` already binds `name`; callers check `has_local` first.
    pub fn define(&mut self, scope: ScopeId, name: &str, definition: DefinitionId) {
        let table = &mut self.tables[scope.0];
        assert!(
            !table.entries.contains_key(name),
            "'{}' is already defined in scope {:?}",
            name,
            scope
        );
        table.entries.insert(name.to_string(), definition);
    }

    pub fn has_local(&self, scope: ScopeId, name: &str) -> bool {
        self.tables[scope.0].entries.contains_key(name)
    }

    /// Searches `scope` then its ancestors, first match wins.
    pub fn find(&self, scope: ScopeId, name: &str) -> Option<DefinitionId> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let table = &self.tables[id.0];
            if let Some(found) = table.get(name) {
                return Some(found);
            }
            current = table.parent;
        }

        None
    }

    /// Like `find`, but skips definitions that are not yet visible at `offset`.
    pub fn find_visible(&self, scope: ScopeId, name: &str, offset: u32) -> Option<DefinitionId> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let table = &self.tables[id.0];
            if let Some(found) = table.get(name) {
                if self.definitions[found.0].visible_from <= offset {
                    return Some(found);
                }
            }
            current = table.parent;
        }

        None
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }
}
