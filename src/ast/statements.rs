use crate::{
    symbols::symbols::{DefinitionId, ScopeId},
    Span,
};

use super::{ast::StructurallyEquivalent, expressions::Expr, types::TypeName};

/// `name: Type (= default)?` in a function signature.
#[derive(Debug, Clone)]
pub struct FunctionArgument {
    pub name: String,
    pub type_name: TypeName,
    pub default: Option<Expr>,
    pub definition: DefinitionId,
    pub span: Span,
}

impl StructurallyEquivalent for FunctionArgument {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_name.is_structurally_equivalent(&other.type_name)
            && self.default.is_structurally_equivalent(&other.default)
    }
}

/// `val`/`var` declaration, either a local variable or a top-level property.
#[derive(Debug, Clone)]
pub struct Variable {
    pub is_mutable: bool,
    pub name: String,
    pub type_name: TypeName,
    pub initializer: Option<Expr>,
    pub definition: DefinitionId,
    pub span: Span,
}

impl StructurallyEquivalent for Variable {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        self.is_mutable == other.is_mutable
            && self.name == other.name
            && self.type_name.is_structurally_equivalent(&other.type_name)
            && self.initializer.is_structurally_equivalent(&other.initializer)
    }
}

/// Named function, top-level or local.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub arguments: Vec<FunctionArgument>,
    pub return_type: TypeName,
    /// `None` for a declaration without a body.
    pub body: Option<Box<Expr>>,
    pub table: ScopeId,
    pub definition: DefinitionId,
    pub span: Span,
}

impl StructurallyEquivalent for Function {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        self.name == other.name
            && self.arguments.is_structurally_equivalent(&other.arguments)
            && self.return_type.is_structurally_equivalent(&other.return_type)
            && self.body.is_structurally_equivalent(&other.body)
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(Expr),
    Variable(Variable),
    Function(Function),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression(expression) => &expression.span,
            Stmt::Variable(variable) => &variable.span,
            Stmt::Function(function) => &function.span,
        }
    }
}

impl StructurallyEquivalent for Stmt {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Stmt::Expression(a), Stmt::Expression(b)) => a.is_structurally_equivalent(b),
            (Stmt::Variable(a), Stmt::Variable(b)) => a.is_structurally_equivalent(b),
            (Stmt::Function(a), Stmt::Function(b)) => a.is_structurally_equivalent(b),
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum TopLevel {
    Function(Function),
    Property(Variable),
}

impl TopLevel {
    pub fn name(&self) -> &str {
        match self {
            TopLevel::Function(function) => &function.name,
            TopLevel::Property(property) => &property.name,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            TopLevel::Function(function) => &function.span,
            TopLevel::Property(property) => &property.span,
        }
    }
}

impl StructurallyEquivalent for TopLevel {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (TopLevel::Function(a), TopLevel::Function(b)) => a.is_structurally_equivalent(b),
            (TopLevel::Property(a), TopLevel::Property(b)) => a.is_structurally_equivalent(b),
            _ => false,
        }
    }
}
