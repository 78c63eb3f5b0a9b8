use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// Broad category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Semantic,
    Type,
    Internal,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Semantic => write!(f, "semantic error"),
            ErrorKind::Type => write!(f, "type error"),
            ErrorKind::Internal => write!(f, "internal error"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedExpression { .. }
            | ErrorImpl::InvalidIntLiteral { .. }
            | ErrorImpl::InvalidEscapeSequence { .. }
            | ErrorImpl::UnexpectedStringPart { .. }
            | ErrorImpl::TemplateImportPath
            | ErrorImpl::ImportAfterDeclaration
            | ErrorImpl::ExpectedTopLevelDeclaration
            | ErrorImpl::NamedAnonymousFunction
            | ErrorImpl::MissingFunctionBody => ErrorKind::Syntax,
            ErrorImpl::Redefinition { .. }
            | ErrorImpl::ImportNotFound { .. }
            | ErrorImpl::ImportRedefinition { .. }
            | ErrorImpl::UnresolvedReference { .. }
            | ErrorImpl::UnknownType { .. }
            | ErrorImpl::IllegalMemberAccess { .. }
            | ErrorImpl::ExpectedInvocationOrReference
            | ErrorImpl::NonPublicMember { .. }
            | ErrorImpl::PropertyOverloadResolution { .. }
            | ErrorImpl::NoMatchingFunction { .. }
            | ErrorImpl::CannotInferVariableType { .. }
            | ErrorImpl::InvalidAssignmentTarget
            | ErrorImpl::ValReassignment { .. } => ErrorKind::Semantic,
            ErrorImpl::TypeMismatch { .. }
            | ErrorImpl::InvalidOperands { .. }
            | ErrorImpl::InvalidOperand { .. }
            | ErrorImpl::NotCallable { .. } => ErrorKind::Type,
            ErrorImpl::EmptyScopeStack | ErrorImpl::UnresolvedDefinition { .. } => {
                ErrorKind::Internal
            }
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::InvalidIntLiteral { .. } => "InvalidIntLiteral",
            ErrorImpl::InvalidEscapeSequence { .. } => "InvalidEscapeSequence",
            ErrorImpl::UnexpectedStringPart { .. } => "UnexpectedStringPart",
            ErrorImpl::TemplateImportPath => "TemplateImportPath",
            ErrorImpl::ImportAfterDeclaration => "ImportAfterDeclaration",
            ErrorImpl::ExpectedTopLevelDeclaration => "ExpectedTopLevelDeclaration",
            ErrorImpl::NamedAnonymousFunction => "NamedAnonymousFunction",
            ErrorImpl::MissingFunctionBody => "MissingFunctionBody",
            ErrorImpl::Redefinition { .. } => "Redefinition",
            ErrorImpl::ImportNotFound { .. } => "ImportNotFound",
            ErrorImpl::ImportRedefinition { .. } => "ImportRedefinition",
            ErrorImpl::UnresolvedReference { .. } => "UnresolvedReference",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::IllegalMemberAccess { .. } => "IllegalMemberAccess",
            ErrorImpl::ExpectedInvocationOrReference => "ExpectedInvocationOrReference",
            ErrorImpl::NonPublicMember { .. } => "NonPublicMember",
            ErrorImpl::PropertyOverloadResolution { .. } => "PropertyOverloadResolution",
            ErrorImpl::NoMatchingFunction { .. } => "NoMatchingFunction",
            ErrorImpl::CannotInferVariableType { .. } => "CannotInferVariableType",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::ValReassignment { .. } => "ValReassignment",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::InvalidOperands { .. } => "InvalidOperands",
            ErrorImpl::InvalidOperand { .. } => "InvalidOperand",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::EmptyScopeStack => "EmptyScopeStack",
            ErrorImpl::UnresolvedDefinition { .. } => "UnresolvedDefinition",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token, expected } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected {}",
                token, expected
            )),
            ErrorImpl::ExpectedExpression { found } => {
                ErrorTip::Suggestion(format!("Expecting expression, got `{}`", found))
            }
            ErrorImpl::InvalidIntLiteral { literal } => ErrorTip::Suggestion(format!(
                "Invalid integer: `{}`, is it above the integer limit?",
                literal
            )),
            ErrorImpl::NonPublicMember { name } => ErrorTip::Suggestion(format!(
                "`{}` is not public, only public members may be accessed",
                name
            )),
            ErrorImpl::ImportAfterDeclaration => ErrorTip::Suggestion(String::from(
                "Move the import above the first declaration",
            )),
            ErrorImpl::CannotInferVariableType { .. } => ErrorTip::Suggestion(String::from(
                "Please specify the type explicitly",
            )),
            ErrorImpl::EmptyScopeStack | ErrorImpl::UnresolvedDefinition { .. } => {
                ErrorTip::Suggestion(String::from(
                    "This is a bug in the compiler, not in your code",
                ))
            }
            other => ErrorTip::Suggestion(other.to_string()),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.get_kind(),
            self.internal_error,
            self.position
        )
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Syntax
    #[error("unexpected character: {character:?}")]
    UnexpectedCharacter { character: String },
    #[error("unexpected token {token:?}, expected {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("expecting expression, got {found:?}")]
    ExpectedExpression { found: String },
    #[error("invalid integer literal: {literal:?}")]
    InvalidIntLiteral { literal: String },
    #[error("invalid escape sequence: {sequence:?}")]
    InvalidEscapeSequence { sequence: String },
    #[error("unexpected token in string: {token:?}")]
    UnexpectedStringPart { token: String },
    #[error("only simple strings are allowed as paths")]
    TemplateImportPath,
    #[error("'import' must be declared before anything else")]
    ImportAfterDeclaration,
    #[error("expected a top level declaration")]
    ExpectedTopLevelDeclaration,
    #[error("anonymous functions with names are prohibited")]
    NamedAnonymousFunction,
    #[error("function must have a body")]
    MissingFunctionBody,

    // Semantic
    #[error("definition with name '{name}' already exists")]
    Redefinition { name: String },
    #[error("unable to find {path}/{name}")]
    ImportNotFound { path: String, name: String },
    #[error("import for {name} already exists")]
    ImportRedefinition { name: String },
    #[error("unresolved reference: {name}")]
    UnresolvedReference { name: String },
    #[error("unknown type name '{name}'")]
    UnknownType { name: String },
    #[error("member access operation is illegal on type: {type_}")]
    IllegalMemberAccess { type_: String },
    #[error("expected invocation or reference")]
    ExpectedInvocationOrReference,
    #[error("can't access non public member: {name}")]
    NonPublicMember { name: String },
    #[error("property overload resolution error: {candidates} candidates for '{name}'")]
    PropertyOverloadResolution { name: String, candidates: usize },
    #[error("no function found with signature: {signature}")]
    NoMatchingFunction { signature: String },
    #[error("could not infer type of '{name}'")]
    CannotInferVariableType { name: String },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("val '{name}' cannot be reassigned")]
    ValReassignment { name: String },

    // Type
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMismatch { expected: String, received: String },
    #[error("operator '{operator}' cannot be applied to {left} and {right}")]
    InvalidOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("operator '{operator}' cannot be applied to {operand}")]
    InvalidOperand { operator: String, operand: String },
    #[error("expression of type {type_} is not callable")]
    NotCallable { type_: String },

    // Internal
    #[error("no table found in the current scopes")]
    EmptyScopeStack,
    #[error("definition '{name}' was referenced before its type was resolved")]
    UnresolvedDefinition { name: String },
}

/// Ordered diagnostic sink shared by one parser or one resolution pass.
#[derive(Debug, Default)]
pub struct Reporter {
    errors: Vec<Error>,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter::default()
    }

    pub fn report(&mut self, error: Error) {
        tracing::debug!(kind = %error.get_kind(), position = %error.get_position(), "{}", error.get_message());
        self.errors.push(error);
    }

    pub fn report_at(&mut self, error_impl: ErrorImpl, position: Position) {
        self.report(Error::new(error_impl, position));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// `Ok(value)` when nothing was reported, every diagnostic otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, Vec<Error>> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}
