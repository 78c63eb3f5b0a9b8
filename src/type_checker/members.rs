//! Per-unit caches filled while resolving imports and type names.

use std::collections::HashMap;

use super::types::{Type, TypeMember};

/// Named types visible in one unit: builtins plus imported types.
///
/// Also remembers every type name already resolved, keyed by its source text,
/// so `int | string` is resolved (and reported) once per unit.
#[derive(Debug, Default)]
pub struct TypeCache {
    entries: HashMap<String, Type>,
    by_text: HashMap<String, Type>,
}

impl TypeCache {
    pub fn new() -> Self {
        TypeCache::default()
    }

    /// Adds `name`, returning `false` without replacing when it already exists.
    pub fn define(&mut self, name: &str, type_: Type) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }

        self.entries.insert(name.to_string(), type_);
        true
    }

    pub fn find(&self, name: &str) -> Option<&Type> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn find_resolved(&self, text: &str) -> Option<&Type> {
        self.by_text.get(text)
    }

    pub fn remember_resolved(&mut self, text: &str, type_: Type) {
        self.by_text.insert(text.to_string(), type_);
    }
}

/// Imported top-level members by local name. Overloads share a name.
#[derive(Debug, Default)]
pub struct MemberCache {
    members: HashMap<String, Vec<TypeMember>>,
}

impl MemberCache {
    pub fn new() -> Self {
        MemberCache::default()
    }

    pub fn define(&mut self, name: &str, member: TypeMember) {
        self.members.entry(name.to_string()).or_default().push(member);
    }

    pub fn find(&self, name: &str) -> &[TypeMember] {
        self.members.get(name).map_or(&[], |members| members.as_slice())
    }

    pub fn find_properties(&self, name: &str) -> Vec<&TypeMember> {
        self.find(name)
            .iter()
            .filter(|member| matches!(member, TypeMember::Property { .. }))
            .collect()
    }

    /// Functions known as `name` whose parameter types equal `arguments` exactly.
    ///
    /// `name` is the local name, so an aliased import matches under its alias.
    pub fn find_functions(&self, name: &str, arguments: &[Type]) -> Vec<&TypeMember> {
        self.find(name)
            .iter()
            .filter(|member| {
                matches!(member, TypeMember::Function { parameter_types, .. } if parameter_types.as_slice() == arguments)
            })
            .collect()
    }
}
