//! Type annotations as written in source.
//!
//! A `TypeName` is what the parser sees (`int`, `A | B`, `A & B`, or nothing at
//! all); type resolution later fills its `resolved` slot with a semantic `Type`.

use std::fmt::Display;

use crate::{type_checker::types::Type, Span};

use super::ast::StructurallyEquivalent;

#[derive(Debug, Clone)]
pub enum TypeNameKind {
    /// No annotation was written.
    Undefined,
    Basic(String),
    Union(Box<TypeName>, Box<TypeName>),
    Intersection(Box<TypeName>, Box<TypeName>),
}

#[derive(Debug, Clone)]
pub struct TypeName {
    pub kind: TypeNameKind,
    pub span: Span,
    pub resolved: Option<Type>,
}

impl TypeName {
    pub fn new(kind: TypeNameKind, span: Span) -> Self {
        TypeName {
            kind,
            span,
            resolved: None,
        }
    }

    pub fn undefined(span: Span) -> Self {
        TypeName::new(TypeNameKind::Undefined, span)
    }

    pub fn basic(name: &str, span: Span) -> Self {
        TypeName::new(TypeNameKind::Basic(name.to_string()), span)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self.kind, TypeNameKind::Undefined)
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TypeNameKind::Undefined => write!(f, "?"),
            TypeNameKind::Basic(name) => write!(f, "{}", name),
            TypeNameKind::Union(left, right) => write!(f, "{} | {}", left, right),
            TypeNameKind::Intersection(left, right) => write!(f, "{} & {}", left, right),
        }
    }
}

impl StructurallyEquivalent for TypeName {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (TypeNameKind::Undefined, TypeNameKind::Undefined) => true,
            (TypeNameKind::Basic(left), TypeNameKind::Basic(right)) => left == right,
            (TypeNameKind::Union(a, b), TypeNameKind::Union(c, d))
            | (TypeNameKind::Intersection(a, b), TypeNameKind::Intersection(c, d)) => {
                a.is_structurally_equivalent(c) && b.is_structurally_equivalent(d)
            }
            _ => false,
        }
    }
}
