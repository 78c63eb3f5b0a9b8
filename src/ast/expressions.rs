use std::fmt::Display;

use crate::{
    lexer::tokens::TokenKind,
    symbols::symbols::{DefinitionId, ScopeId},
    type_checker::types::{Type, TypeMember},
    Span,
};

use super::{
    ast::StructurallyEquivalent,
    statements::{FunctionArgument, Stmt},
    types::TypeName,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Equals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    And,
    Or,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => BinaryOperator::Plus,
            TokenKind::Dash => BinaryOperator::Minus,
            TokenKind::Star => BinaryOperator::Multiply,
            TokenKind::Slash => BinaryOperator::Divide,
            TokenKind::Percent => BinaryOperator::Modulo,
            TokenKind::Equals => BinaryOperator::Equals,
            TokenKind::NotEquals => BinaryOperator::NotEquals,
            TokenKind::Less => BinaryOperator::Less,
            TokenKind::LessEquals => BinaryOperator::LessEquals,
            TokenKind::Greater => BinaryOperator::Greater,
            TokenKind::GreaterEquals => BinaryOperator::GreaterEquals,
            TokenKind::And => BinaryOperator::And,
            TokenKind::Or => BinaryOperator::Or,
            _ => return None,
        })
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Not,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Negate => write!(f, "-"),
            UnaryOperator::Not => write!(f, "not"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl AssignmentOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Assignment => AssignmentOperator::Assign,
            TokenKind::PlusEquals => AssignmentOperator::Add,
            TokenKind::MinusEquals => AssignmentOperator::Subtract,
            TokenKind::StarEquals => AssignmentOperator::Multiply,
            TokenKind::SlashEquals => AssignmentOperator::Divide,
            _ => return None,
        })
    }

    /// The binary operation a compound assignment performs.
    pub fn binary(&self) -> Option<BinaryOperator> {
        match self {
            AssignmentOperator::Assign => None,
            AssignmentOperator::Add => Some(BinaryOperator::Plus),
            AssignmentOperator::Subtract => Some(BinaryOperator::Minus),
            AssignmentOperator::Multiply => Some(BinaryOperator::Multiply),
            AssignmentOperator::Divide => Some(BinaryOperator::Divide),
        }
    }
}

/// How a resolved reference reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// A definition in the scope chain.
    Local,
    /// A non-object container type.
    Static,
    /// An object container type.
    Object,
    /// An imported top-level property.
    TopLevel,
    /// A property of the container on the left of `.` or `?.`.
    Member,
}

/// `name = value` or `value` inside an invocation.
#[derive(Debug, Clone)]
pub struct InvocationArgument {
    pub name: Option<String>,
    pub value: Expr,
    pub span: Span,
}

impl StructurallyEquivalent for InvocationArgument {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        self.name == other.name && self.value.is_structurally_equivalent(&other.value)
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub table: ScopeId,
}

// EXPRESSIONS

#[derive(Debug, Clone)]
pub enum ExprKind {
    IntLiteral(i32),
    LongLiteral(i64),
    BooleanLiteral(bool),
    StringLiteral(String),
    /// Literal parts are `StringLiteral` expressions.
    StringTemplate(Vec<Expr>),
    Reference {
        name: String,
        kind: Option<ReferenceKind>,
        definition: Option<DefinitionId>,
        member: Option<TypeMember>,
    },
    Invocation {
        name: String,
        arguments: Vec<InvocationArgument>,
        definition: Option<DefinitionId>,
        member: Option<TypeMember>,
    },
    /// Calling the value of an arbitrary expression, `(fun() = 1)()`.
    AnonymousInvocation {
        callee: Box<Expr>,
        arguments: Vec<InvocationArgument>,
    },
    MemberAccess {
        left: Box<Expr>,
        /// `?.` rather than `.`
        safe: bool,
        right: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOperator,
        right: Box<Expr>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    Assignment {
        target: Box<Expr>,
        operator: AssignmentOperator,
        value: Box<Expr>,
    },
    Parenthesized(Box<Expr>),
    Block(Block),
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    AnonymousFunction {
        arguments: Vec<FunctionArgument>,
        return_type: TypeName,
        body: Box<Expr>,
        table: ScopeId,
    },
    Lambda {
        arguments: Vec<FunctionArgument>,
        body: Box<Expr>,
        table: ScopeId,
    },
    Return(Option<Box<Expr>>),
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub resolved: Option<Type>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            resolved: None,
        }
    }

    pub fn reference(name: &str, span: Span) -> Self {
        Expr::new(
            ExprKind::Reference {
                name: name.to_string(),
                kind: None,
                definition: None,
                member: None,
            },
            span,
        )
    }

    pub fn invocation(name: &str, arguments: Vec<InvocationArgument>, span: Span) -> Self {
        Expr::new(
            ExprKind::Invocation {
                name: name.to_string(),
                arguments,
                definition: None,
                member: None,
            },
            span,
        )
    }

    /// Whether the expression's last token is a `}`, in which case a
    /// statement made of it needs no `;`.
    pub fn ends_with_block(&self) -> bool {
        match &self.kind {
            ExprKind::Block(_) => true,
            ExprKind::Conditional {
                then_branch,
                else_branch,
                ..
            } => match else_branch {
                Some(else_branch) => else_branch.ends_with_block(),
                None => then_branch.ends_with_block(),
            },
            ExprKind::AnonymousFunction { body, .. } | ExprKind::Lambda { body, .. } => body.ends_with_block(),
            _ => false,
        }
    }
}

impl StructurallyEquivalent for Expr {
    fn is_structurally_equivalent(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (ExprKind::IntLiteral(a), ExprKind::IntLiteral(b)) => a == b,
            (ExprKind::LongLiteral(a), ExprKind::LongLiteral(b)) => a == b,
            (ExprKind::BooleanLiteral(a), ExprKind::BooleanLiteral(b)) => a == b,
            (ExprKind::StringLiteral(a), ExprKind::StringLiteral(b)) => a == b,
            (ExprKind::StringTemplate(a), ExprKind::StringTemplate(b)) => a.is_structurally_equivalent(b),
            (ExprKind::Reference { name: a, .. }, ExprKind::Reference { name: b, .. }) => a == b,
            (
                ExprKind::Invocation {
                    name: a,
                    arguments: a_arguments,
                    ..
                },
                ExprKind::Invocation {
                    name: b,
                    arguments: b_arguments,
                    ..
                },
            ) => a == b && a_arguments.is_structurally_equivalent(b_arguments),
            (
                ExprKind::AnonymousInvocation {
                    callee: a,
                    arguments: a_arguments,
                },
                ExprKind::AnonymousInvocation {
                    callee: b,
                    arguments: b_arguments,
                },
            ) => a.is_structurally_equivalent(b) && a_arguments.is_structurally_equivalent(b_arguments),
            (
                ExprKind::MemberAccess {
                    left: a_left,
                    safe: a_safe,
                    right: a_right,
                },
                ExprKind::MemberAccess {
                    left: b_left,
                    safe: b_safe,
                    right: b_right,
                },
            ) => {
                a_safe == b_safe
                    && a_left.is_structurally_equivalent(b_left)
                    && a_right.is_structurally_equivalent(b_right)
            }
            (
                ExprKind::Binary {
                    left: a_left,
                    operator: a_operator,
                    right: a_right,
                },
                ExprKind::Binary {
                    left: b_left,
                    operator: b_operator,
                    right: b_right,
                },
            ) => {
                a_operator == b_operator
                    && a_left.is_structurally_equivalent(b_left)
                    && a_right.is_structurally_equivalent(b_right)
            }
            (
                ExprKind::Unary {
                    operator: a_operator,
                    operand: a,
                },
                ExprKind::Unary {
                    operator: b_operator,
                    operand: b,
                },
            ) => a_operator == b_operator && a.is_structurally_equivalent(b),
            (
                ExprKind::Assignment {
                    target: a_target,
                    operator: a_operator,
                    value: a_value,
                },
                ExprKind::Assignment {
                    target: b_target,
                    operator: b_operator,
                    value: b_value,
                },
            ) => {
                a_operator == b_operator
                    && a_target.is_structurally_equivalent(b_target)
                    && a_value.is_structurally_equivalent(b_value)
            }
            (ExprKind::Parenthesized(a), ExprKind::Parenthesized(b)) => a.is_structurally_equivalent(b),
            (ExprKind::Block(a), ExprKind::Block(b)) => a.statements.is_structurally_equivalent(&b.statements),
            (
                ExprKind::Conditional {
                    condition: a_condition,
                    then_branch: a_then,
                    else_branch: a_else,
                },
                ExprKind::Conditional {
                    condition: b_condition,
                    then_branch: b_then,
                    else_branch: b_else,
                },
            ) => {
                a_condition.is_structurally_equivalent(b_condition)
                    && a_then.is_structurally_equivalent(b_then)
                    && a_else.is_structurally_equivalent(b_else)
            }
            (
                ExprKind::AnonymousFunction {
                    arguments: a_arguments,
                    return_type: a_return,
                    body: a_body,
                    ..
                },
                ExprKind::AnonymousFunction {
                    arguments: b_arguments,
                    return_type: b_return,
                    body: b_body,
                    ..
                },
            ) => {
                a_arguments.is_structurally_equivalent(b_arguments)
                    && a_return.is_structurally_equivalent(b_return)
                    && a_body.is_structurally_equivalent(b_body)
            }
            (
                ExprKind::Lambda {
                    arguments: a_arguments,
                    body: a_body,
                    ..
                },
                ExprKind::Lambda {
                    arguments: b_arguments,
                    body: b_body,
                    ..
                },
            ) => a_arguments.is_structurally_equivalent(b_arguments) && a_body.is_structurally_equivalent(b_body),
            (ExprKind::Return(a), ExprKind::Return(b)) => a.is_structurally_equivalent(b),
            _ => false,
        }
    }
}
