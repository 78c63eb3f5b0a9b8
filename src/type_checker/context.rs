//! Configuration shared by every compilation unit of one run.
//!
//! The context carries the builtin type names and the collaborator that maps
//! import paths to host types and members.

use std::collections::HashMap;

use super::types::{BuiltinType, ContainerType, Type, TypeMember, Visibility};

/// Maps `import "path" { Name }` entries to types or top-level members.
pub trait ImportResolver {
    /// The type exported as `name` from `path`, if any.
    fn resolve_type(&self, path: &str, name: &str) -> Option<Type>;

    /// Top-level functions and properties exported as `name` from `path`.
    fn find_members(&self, path: &str, name: &str) -> Vec<TypeMember>;
}

/// In-memory registry of importable types and members.
#[derive(Debug, Default, Clone)]
pub struct StaticImportResolver {
    types: HashMap<(String, String), Type>,
    members: HashMap<(String, String), Vec<TypeMember>>,
}

impl StaticImportResolver {
    pub fn new() -> Self {
        StaticImportResolver::default()
    }

    pub fn register_type(&mut self, path: &str, name: &str, type_: Type) {
        self.types.insert((path.to_string(), name.to_string()), type_);
    }

    /// Adds a member under `name`. Several members may share one name.
    pub fn register_member(&mut self, path: &str, member: TypeMember) {
        self.members
            .entry((path.to_string(), member.name().to_string()))
            .or_default()
            .push(member);
    }

    pub fn with_type(mut self, path: &str, name: &str, type_: Type) -> Self {
        self.register_type(path, name, type_);
        self
    }

    pub fn with_member(mut self, path: &str, member: TypeMember) -> Self {
        self.register_member(path, member);
        self
    }

    /// The small standard library available to every program run by the binary.
    pub fn standard() -> Self {
        let function = |name: &str, parameter_types: Vec<Type>, return_type: Type| TypeMember::Function {
            name: name.to_string(),
            parameter_types,
            return_type,
            visibility: Visibility::Public,
        };

        let console = ContainerType::new(
            "Console",
            true,
            vec![
                function("print", vec![Type::string()], Type::unit()),
                function("println", vec![Type::string()], Type::unit()),
                function("readLine", vec![], Type::string()),
                TypeMember::Property {
                    name: String::from("buffer"),
                    type_: Type::string(),
                    visibility: Visibility::Private,
                },
            ],
        );

        StaticImportResolver::new()
            .with_type("std/io", "Console", Type::container(console))
            .with_member("std/io", function("print", vec![Type::string()], Type::unit()))
            .with_member("std/io", function("print", vec![Type::int()], Type::unit()))
            .with_member("std/io", function("int_input", vec![], Type::int()))
            .with_member("std/io", function("string_input", vec![Type::int()], Type::string()))
            .with_member(
                "std/string",
                function("strcmp", vec![Type::string(), Type::string()], Type::int()),
            )
            .with_member(
                "std/system",
                TypeMember::Property {
                    name: String::from("newline"),
                    type_: Type::string(),
                    visibility: Visibility::Public,
                },
            )
    }
}

impl ImportResolver for StaticImportResolver {
    fn resolve_type(&self, path: &str, name: &str) -> Option<Type> {
        self.types.get(&(path.to_string(), name.to_string())).cloned()
    }

    fn find_members(&self, path: &str, name: &str) -> Vec<TypeMember> {
        self.members
            .get(&(path.to_string(), name.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

pub struct CompilerContext {
    builtins: HashMap<String, Type>,
    import_resolver: Box<dyn ImportResolver>,
}

impl CompilerContext {
    pub fn new(import_resolver: impl ImportResolver + 'static) -> Self {
        let builtins = BuiltinType::ALL
            .iter()
            .map(|builtin| (builtin.name().to_string(), Type::Builtin(*builtin)))
            .collect();

        CompilerContext {
            builtins,
            import_resolver: Box::new(import_resolver),
        }
    }

    /// Builtin type names, registered in every unit's type cache.
    pub fn builtins(&self) -> impl Iterator<Item = (&String, &Type)> {
        self.builtins.iter()
    }

    pub fn resolve_type(&self, path: &str, name: &str) -> Option<Type> {
        self.import_resolver.resolve_type(path, name)
    }

    pub fn find_members(&self, path: &str, name: &str) -> Vec<TypeMember> {
        self.import_resolver.find_members(path, name)
    }
}

impl Default for CompilerContext {
    fn default() -> Self {
        CompilerContext::new(StaticImportResolver::new())
    }
}
