//! Semantic types produced by type resolution.

use std::{fmt::Display, rc::Rc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Any,
    Nothing,
    Unit,
    String,
    Boolean,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 12] = [
        BuiltinType::Any,
        BuiltinType::Nothing,
        BuiltinType::Unit,
        BuiltinType::String,
        BuiltinType::Boolean,
        BuiltinType::Char,
        BuiltinType::Int8,
        BuiltinType::Int16,
        BuiltinType::Int32,
        BuiltinType::Int64,
        BuiltinType::Float32,
        BuiltinType::Float64,
    ];

    /// The name used for this type in source code.
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinType::Any => "any",
            BuiltinType::Nothing => "nothing",
            BuiltinType::Unit => "unit",
            BuiltinType::String => "string",
            BuiltinType::Boolean => "boolean",
            BuiltinType::Char => "char",
            BuiltinType::Int8 => "byte",
            BuiltinType::Int16 => "short",
            BuiltinType::Int32 => "int",
            BuiltinType::Int64 => "long",
            BuiltinType::Float32 => "float",
            BuiltinType::Float64 => "double",
        }
    }

    /// Position in the numeric widening order, `None` for non-numeric types.
    pub fn numeric_rank(&self) -> Option<u8> {
        match self {
            BuiltinType::Int8 => Some(0),
            BuiltinType::Int16 => Some(1),
            BuiltinType::Int32 => Some(2),
            BuiltinType::Int64 => Some(3),
            BuiltinType::Float32 => Some(4),
            BuiltinType::Float64 => Some(5),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// A function or property exposed by an imported or container type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeMember {
    Function {
        name: String,
        parameter_types: Vec<Type>,
        return_type: Type,
        visibility: Visibility,
    },
    Property {
        name: String,
        type_: Type,
        visibility: Visibility,
    },
}

impl TypeMember {
    pub fn name(&self) -> &str {
        match self {
            TypeMember::Function { name, .. } | TypeMember::Property { name, .. } => name,
        }
    }

    pub fn is_public(&self) -> bool {
        let visibility = match self {
            TypeMember::Function { visibility, .. } | TypeMember::Property { visibility, .. } => visibility,
        };
        *visibility == Visibility::Public
    }

    /// Type of the member used as a value; functions become function types.
    pub fn value_type(&self) -> Type {
        match self {
            TypeMember::Function {
                parameter_types,
                return_type,
                ..
            } => Type::function(parameter_types.clone(), return_type.clone()),
            TypeMember::Property { type_, .. } => type_.clone(),
        }
    }

    /// Type produced when the member is accessed or invoked.
    pub fn result_type(&self) -> Type {
        match self {
            TypeMember::Function { return_type, .. } => return_type.clone(),
            TypeMember::Property { type_, .. } => type_.clone(),
        }
    }

    pub fn matches_signature(&self, function_name: &str, arguments: &[Type]) -> bool {
        match self {
            TypeMember::Function {
                name,
                parameter_types,
                ..
            } => name == function_name && parameter_types.as_slice() == arguments,
            TypeMember::Property { .. } => false,
        }
    }
}

/// A named type with members, such as an imported class or object.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerType {
    pub name: String,
    /// Objects are referenced as values, other containers statically.
    pub is_object: bool,
    pub members: Vec<TypeMember>,
}

impl ContainerType {
    pub fn new(name: &str, is_object: bool, members: Vec<TypeMember>) -> Self {
        ContainerType {
            name: name.to_string(),
            is_object,
            members,
        }
    }

    /// Function member with exactly these parameter types.
    pub fn find_function(&self, name: &str, arguments: &[Type]) -> Option<&TypeMember> {
        self.members
            .iter()
            .find(|member| member.matches_signature(name, arguments))
    }

    pub fn find_property(&self, name: &str) -> Option<&TypeMember> {
        self.members
            .iter()
            .find(|member| matches!(member, TypeMember::Property { .. }) && member.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub parameters: Vec<Type>,
    pub return_type: Type,
}

/// Sentinel for a failed resolution. Compatible with every other type so one
/// mistake is reported once.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorType {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Builtin(BuiltinType),
    Container(Rc<ContainerType>),
    Function(Rc<FunctionType>),
    Union(Box<Type>, Box<Type>),
    Intersection(Box<Type>, Box<Type>),
    Error(ErrorType),
}

impl Type {
    pub fn any() -> Type {
        Type::Builtin(BuiltinType::Any)
    }

    pub fn nothing() -> Type {
        Type::Builtin(BuiltinType::Nothing)
    }

    pub fn unit() -> Type {
        Type::Builtin(BuiltinType::Unit)
    }

    pub fn string() -> Type {
        Type::Builtin(BuiltinType::String)
    }

    pub fn boolean() -> Type {
        Type::Builtin(BuiltinType::Boolean)
    }

    pub fn int() -> Type {
        Type::Builtin(BuiltinType::Int32)
    }

    pub fn long() -> Type {
        Type::Builtin(BuiltinType::Int64)
    }

    pub fn function(parameters: Vec<Type>, return_type: Type) -> Type {
        Type::Function(Rc::new(FunctionType {
            parameters,
            return_type,
        }))
    }

    pub fn container(container: ContainerType) -> Type {
        Type::Container(Rc::new(container))
    }

    pub fn error(description: impl Into<String>) -> Type {
        Type::Error(ErrorType {
            description: description.into(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error(_))
    }

    pub fn is_builtin(&self, builtin: BuiltinType) -> bool {
        matches!(self, Type::Builtin(b) if *b == builtin)
    }

    pub fn as_container(&self) -> Option<&ContainerType> {
        match self {
            Type::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn numeric_rank(&self) -> Option<u8> {
        match self {
            Type::Builtin(builtin) => builtin.numeric_rank(),
            _ => None,
        }
    }

    /// The wider of two numeric types, `None` if either is not numeric.
    pub fn wider_numeric(&self, other: &Type) -> Option<Type> {
        let left = self.numeric_rank()?;
        let right = other.numeric_rank()?;
        Some(if left >= right { self.clone() } else { other.clone() })
    }

    /// Whether a value of type `source` may be stored where `self` is expected.
    pub fn is_assignable_from(&self, source: &Type) -> bool {
        if self.is_error() || source.is_error() || self == source {
            return true;
        }

        match (self, source) {
            (Type::Builtin(BuiltinType::Any), _) => true,
            (_, Type::Builtin(BuiltinType::Nothing)) => true,
            (Type::Union(left, right), _) if left.is_assignable_from(source) || right.is_assignable_from(source) => {
                true
            }
            (_, Type::Intersection(left, right)) => {
                self.is_assignable_from(left) || self.is_assignable_from(right)
            }
            (_, Type::Union(left, right)) => self.is_assignable_from(left) && self.is_assignable_from(right),
            (target, source) => match (target.numeric_rank(), source.numeric_rank()) {
                (Some(target), Some(source)) => source <= target,
                _ => false,
            },
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Builtin(builtin) => write!(f, "{}", builtin.name()),
            Type::Container(container) => write!(f, "{}", container.name),
            Type::Function(function) => {
                let parameters = function
                    .parameters
                    .iter()
                    .map(|parameter| parameter.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "({}) -> {}", parameters, function.return_type)
            }
            Type::Union(left, right) => write!(f, "{} | {}", left, right),
            Type::Intersection(left, right) => write!(f, "{} & {}", left, right),
            Type::Error(error) => write!(f, "<error: {}>", error.description),
        }
    }
}
