use std::rc::Rc;

use crate::{
    ast::{
        ast::{CompilationUnit, Import},
        expressions::{
            AssignmentOperator, BinaryOperator, Block, Expr, ExprKind, InvocationArgument, ReferenceKind,
            UnaryOperator,
        },
        statements::{Function, FunctionArgument, Stmt, TopLevel, Variable},
        types::{TypeName, TypeNameKind},
    },
    errors::errors::{Error, ErrorImpl, Reporter},
    symbols::symbols::{DefinitionId, DefinitionKind, ScopeId, SymbolArena},
    Position, Span,
};

use super::{
    context::CompilerContext,
    members::{MemberCache, TypeCache},
    types::{BuiltinType, ContainerType, Type, TypeMember},
};

/// State of one resolution pass over one compilation unit.
pub struct TypeResolver<'a> {
    context: &'a CompilerContext,
    pub symbols: SymbolArena,
    /// Tables of the nodes being resolved, innermost last
    scopes: Vec<ScopeId>,
    types: TypeCache,
    members: MemberCache,
    /// Declared return type of every enclosing function, `None` when it is inferred
    return_types: Vec<Option<Type>>,
    reporter: Reporter,
}

impl<'a> TypeResolver<'a> {
    pub fn new(context: &'a CompilerContext, symbols: SymbolArena) -> Self {
        let mut types = TypeCache::new();
        for (name, type_) in context.builtins() {
            types.define(name, type_.clone());
        }

        TypeResolver {
            context,
            symbols,
            scopes: vec![],
            types,
            members: MemberCache::new(),
            return_types: vec![],
            reporter: Reporter::new(),
        }
    }

    pub fn enter(&mut self, table: ScopeId) {
        tracing::trace!(?table, depth = self.scopes.len(), "enter table");
        self.scopes.push(table);
    }

    pub fn leave(&mut self) {
        self.scopes.pop();
    }

    pub fn errors(&self) -> &[Error] {
        self.reporter.errors()
    }

    fn current_table(&mut self, position: &Position) -> Option<ScopeId> {
        match self.scopes.last() {
            Some(table) => Some(*table),
            None => {
                self.report(ErrorImpl::EmptyScopeStack, position.clone());
                None
            }
        }
    }

    fn report(&mut self, error: ErrorImpl, position: Position) {
        self.reporter.report_at(error, position);
    }

    /// Reports `error` and returns an error type describing it.
    fn error_type(&mut self, error: ErrorImpl, position: &Position) -> Type {
        let type_ = Type::error(error.to_string());
        self.report(error, position.clone());
        type_
    }

    fn definition_type(&mut self, id: DefinitionId, position: &Position) -> Type {
        if let Some(resolved) = &self.symbols.definition(id).resolved {
            return resolved.clone();
        }

        let name = self.symbols.definition(id).name.clone();
        self.error_type(ErrorImpl::UnresolvedDefinition { name }, position)
    }

    fn is_resolved(&self, id: DefinitionId) -> bool {
        self.symbols.definition(id).resolved.is_some()
    }

    /// Fills the slot of a definition once, later calls keep the first type.
    fn set_definition_type(&mut self, id: DefinitionId, type_: Type) {
        let definition = self.symbols.definition_mut(id);
        if definition.resolved.is_none() {
            definition.resolved = Some(type_);
        }
    }

    fn check_assignable(&mut self, expected: &Type, received: &Type, position: &Position) {
        if !expected.is_assignable_from(received) {
            self.report(
                ErrorImpl::TypeMismatch {
                    expected: expected.to_string(),
                    received: received.to_string(),
                },
                position.clone(),
            );
        }
    }
}

/// Resolves every type slot of `unit` in textual order.
///
/// Slots are always filled, failed resolutions hold `Type::Error`; the
/// diagnostics are returned when anything was reported.
pub fn resolve_types(unit: &mut CompilationUnit, context: &CompilerContext) -> Result<(), Vec<Error>> {
    tracing::debug!(
        imports = unit.imports.len(),
        entries = unit.entries.len(),
        "resolving types"
    );

    let mut resolver = TypeResolver::new(context, std::mem::take(&mut unit.symbols));
    resolver.enter(unit.table);

    for import in unit.imports.iter_mut() {
        resolve_import(&mut resolver, import);
    }

    for entry in unit.entries.iter_mut() {
        resolve_top_level(&mut resolver, entry);
    }

    resolver.leave();
    unit.symbols = resolver.symbols;
    resolver.reporter.into_result(())
}

/// Registers the entries of `import` once. Everything resolved against them
/// already holds its type, so a resolved import is skipped.
pub fn resolve_import(resolver: &mut TypeResolver, import: &mut Import) {
    if import.resolved {
        return;
    }
    import.resolved = true;

    let context = resolver.context;

    for entry in &import.entries {
        let local_name = entry.local_name();

        if let Some(type_) = context.resolve_type(&import.path, &entry.name) {
            tracing::debug!(path = %import.path, name = %entry.name, local_name, "imported type");
            if !resolver.types.define(local_name, type_) {
                resolver.report(
                    ErrorImpl::ImportRedefinition {
                        name: local_name.to_string(),
                    },
                    entry.span.start.clone(),
                );
            }
            continue;
        }

        let members = context.find_members(&import.path, &entry.name);
        if members.is_empty() {
            resolver.report(
                ErrorImpl::ImportNotFound {
                    path: import.path.clone(),
                    name: entry.name.clone(),
                },
                entry.span.start.clone(),
            );
            continue;
        }

        tracing::debug!(path = %import.path, name = %entry.name, local_name, count = members.len(), "imported members");
        for member in members {
            resolver.members.define(local_name, member);
        }
    }
}

pub fn resolve_top_level(resolver: &mut TypeResolver, entry: &mut TopLevel) {
    match entry {
        TopLevel::Function(function) => resolve_function(resolver, function),
        TopLevel::Property(property) => resolve_variable(resolver, property),
    }
}

// DEFINITIONS

/// Sets the function type before the body is resolved, so the body may call
/// the function recursively.
pub fn resolve_function(resolver: &mut TypeResolver, function: &mut Function) {
    if resolver.is_resolved(function.definition) {
        return;
    }

    tracing::trace!(name = %function.name, "resolving function");
    resolver.enter(function.table);

    let parameters: Vec<Type> = function
        .arguments
        .iter_mut()
        .map(|argument| resolve_argument_type(resolver, argument))
        .collect();

    let declared = if function.return_type.is_undefined() {
        None
    } else {
        Some(resolve_type_name(resolver, &mut function.return_type))
    };

    let return_type = declared.clone().unwrap_or_else(Type::unit);
    resolver.set_definition_type(function.definition, Type::function(parameters, return_type));

    for argument in function.arguments.iter_mut() {
        resolve_argument_default(resolver, argument);
    }

    if let Some(body) = function.body.as_mut() {
        resolver.return_types.push(declared.clone());
        let body_type = resolve_expr(resolver, body);
        resolver.return_types.pop();

        // a unit function discards the value of its body
        if let Some(declared) = declared.filter(|declared| !declared.is_builtin(BuiltinType::Unit)) {
            resolver.check_assignable(&declared, &body_type, &body.span.start);
        }
    }

    resolver.leave();
}

fn resolve_argument_type(resolver: &mut TypeResolver, argument: &mut FunctionArgument) -> Type {
    let type_ = if argument.type_name.is_undefined() {
        resolver.error_type(
            ErrorImpl::CannotInferVariableType {
                name: argument.name.clone(),
            },
            &argument.span.start,
        )
    } else {
        resolve_type_name(resolver, &mut argument.type_name)
    };

    resolver.set_definition_type(argument.definition, type_.clone());
    type_
}

fn resolve_argument_default(resolver: &mut TypeResolver, argument: &mut FunctionArgument) {
    let Some(default) = argument.default.as_mut() else {
        return;
    };

    let received = resolve_expr(resolver, default);
    let expected = resolver.definition_type(argument.definition, &argument.span.start);
    resolver.check_assignable(&expected, &received, &default.span.start);
}

/// Local variables and properties: the declared type wins, otherwise the
/// initializer's type is used.
pub fn resolve_variable(resolver: &mut TypeResolver, variable: &mut Variable) {
    if resolver.is_resolved(variable.definition) {
        return;
    }

    let declared = if variable.type_name.is_undefined() {
        None
    } else {
        Some(resolve_type_name(resolver, &mut variable.type_name))
    };

    let initializer = variable
        .initializer
        .as_mut()
        .map(|initializer| (resolve_expr(resolver, initializer), initializer.span.start.clone()));

    let type_ = match (declared, initializer) {
        (Some(declared), Some((received, position))) => {
            resolver.check_assignable(&declared, &received, &position);
            declared
        }
        (Some(declared), None) => declared,
        (None, Some((received, _))) => received,
        (None, None) => resolver.error_type(
            ErrorImpl::CannotInferVariableType {
                name: variable.name.clone(),
            },
            &variable.span.start,
        ),
    };

    resolver.set_definition_type(variable.definition, type_);
}

// TYPE NAMES

pub fn resolve_type_name(resolver: &mut TypeResolver, type_name: &mut TypeName) -> Type {
    if let Some(resolved) = &type_name.resolved {
        return resolved.clone();
    }

    let text = type_name.to_string();
    let position = type_name.span.start.clone();

    let resolved = match &mut type_name.kind {
        TypeNameKind::Undefined => Type::error("undefined type name"),
        TypeNameKind::Basic(name) => match resolver.types.find_resolved(&text).cloned() {
            Some(cached) => cached,
            None => {
                let resolved = match resolver.types.find(name).cloned() {
                    Some(type_) => type_,
                    None => resolver.error_type(ErrorImpl::UnknownType { name: name.clone() }, &position),
                };
                resolver.types.remember_resolved(&text, resolved.clone());
                resolved
            }
        },
        TypeNameKind::Union(left, right) => {
            let left = resolve_type_name(resolver, left);
            let right = resolve_type_name(resolver, right);
            combine_type_names(resolver, &text, left, right, Type::Union)
        }
        TypeNameKind::Intersection(left, right) => {
            let left = resolve_type_name(resolver, left);
            let right = resolve_type_name(resolver, right);
            combine_type_names(resolver, &text, left, right, Type::Intersection)
        }
    };

    type_name.resolved = Some(resolved.clone());
    resolved
}

fn combine_type_names(
    resolver: &mut TypeResolver,
    text: &str,
    left: Type,
    right: Type,
    combine: fn(Box<Type>, Box<Type>) -> Type,
) -> Type {
    if let Some(cached) = resolver.types.find_resolved(text) {
        return cached.clone();
    }

    let combined = if left.is_error() {
        left
    } else if right.is_error() {
        right
    } else {
        combine(Box::new(left), Box::new(right))
    };

    resolver.types.remember_resolved(text, combined.clone());
    combined
}

// EXPRESSIONS

/// Infers the type of `expr`, filling its slot. A filled slot is returned as is.
pub fn resolve_expr(resolver: &mut TypeResolver, expr: &mut Expr) -> Type {
    if let Some(resolved) = &expr.resolved {
        return resolved.clone();
    }

    let span = expr.span.clone();
    let resolved = match &mut expr.kind {
        ExprKind::IntLiteral(_) => Type::int(),
        ExprKind::LongLiteral(_) => Type::long(),
        ExprKind::BooleanLiteral(_) => Type::boolean(),
        ExprKind::StringLiteral(_) => Type::string(),
        ExprKind::StringTemplate(parts) => {
            for part in parts.iter_mut() {
                resolve_expr(resolver, part);
            }
            Type::string()
        }
        ExprKind::Reference {
            name,
            kind,
            definition,
            member,
        } => resolve_reference(resolver, name, kind, definition, member, &span),
        ExprKind::Invocation {
            name,
            arguments,
            definition,
            member,
        } => resolve_invocation(resolver, name, arguments, definition, member, &span),
        ExprKind::AnonymousInvocation { callee, arguments } => {
            let callee_type = resolve_expr(resolver, callee);
            let argument_types = resolve_arguments(resolver, arguments);
            call_type(resolver, "", &callee_type, &argument_types, &span.start)
        }
        ExprKind::MemberAccess { left, right, .. } => resolve_member_access(resolver, left, right, &span),
        ExprKind::Binary { left, operator, right } => {
            let left = resolve_expr(resolver, left);
            let right = resolve_expr(resolver, right);
            binary_type(resolver, *operator, &left, &right, &span.start)
        }
        ExprKind::Unary { operator, operand } => {
            let operand = resolve_expr(resolver, operand);
            unary_type(resolver, *operator, &operand, &span.start)
        }
        ExprKind::Assignment {
            target,
            operator,
            value,
        } => resolve_assignment(resolver, target, *operator, value),
        ExprKind::Parenthesized(inner) => resolve_expr(resolver, inner),
        ExprKind::Block(block) => resolve_block(resolver, block),
        ExprKind::Conditional {
            condition,
            then_branch,
            else_branch,
        } => resolve_conditional(resolver, condition, then_branch, else_branch.as_deref_mut()),
        ExprKind::AnonymousFunction {
            arguments,
            return_type,
            body,
            table,
        } => resolve_function_literal(resolver, arguments, Some(return_type), body, *table),
        ExprKind::Lambda { arguments, body, table } => {
            resolve_function_literal(resolver, arguments, None, body, *table)
        }
        ExprKind::Return(value) => resolve_return(resolver, value.as_deref_mut(), &span),
    };

    expr.resolved = Some(resolved.clone());
    resolved
}

/// Scope chain first, then type names, then imported properties.
fn resolve_reference(
    resolver: &mut TypeResolver,
    name: &str,
    kind: &mut Option<ReferenceKind>,
    definition: &mut Option<DefinitionId>,
    member: &mut Option<TypeMember>,
    span: &Span,
) -> Type {
    let Some(table) = resolver.current_table(&span.start) else {
        return Type::error("no table to resolve in");
    };

    if let Some(id) = resolver.symbols.find_visible(table, name, span.start.offset) {
        *kind = Some(ReferenceKind::Local);
        *definition = Some(id);
        return resolver.definition_type(id, &span.start);
    }

    if let Some(type_) = resolver.types.find(name).cloned() {
        *kind = Some(match type_.as_container() {
            Some(container) if container.is_object => ReferenceKind::Object,
            _ => ReferenceKind::Static,
        });
        return type_;
    }

    let properties: Vec<TypeMember> = resolver
        .members
        .find_properties(name)
        .into_iter()
        .cloned()
        .collect();

    match properties.as_slice() {
        [] => resolver.error_type(
            ErrorImpl::UnresolvedReference {
                name: name.to_string(),
            },
            &span.start,
        ),
        [property] => {
            *kind = Some(ReferenceKind::TopLevel);
            *member = Some(property.clone());
            property.result_type()
        }
        candidates => resolver.error_type(
            ErrorImpl::PropertyOverloadResolution {
                name: name.to_string(),
                candidates: candidates.len(),
            },
            &span.start,
        ),
    }
}

fn resolve_arguments(resolver: &mut TypeResolver, arguments: &mut [InvocationArgument]) -> Vec<Type> {
    arguments
        .iter_mut()
        .map(|argument| resolve_expr(resolver, &mut argument.value))
        .collect()
}

fn signature(name: &str, arguments: &[Type]) -> String {
    let arguments = arguments
        .iter()
        .map(|argument| argument.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!("{}({})", name, arguments)
}

/// `name(arguments)`: a visible definition, else an imported function whose
/// parameter types match exactly.
fn resolve_invocation(
    resolver: &mut TypeResolver,
    name: &str,
    arguments: &mut [InvocationArgument],
    definition: &mut Option<DefinitionId>,
    member: &mut Option<TypeMember>,
    span: &Span,
) -> Type {
    let argument_types = resolve_arguments(resolver, arguments);

    let Some(table) = resolver.current_table(&span.start) else {
        return Type::error("no table to resolve in");
    };

    if let Some(id) = resolver.symbols.find_visible(table, name, span.start.offset) {
        *definition = Some(id);
        let callee = resolver.definition_type(id, &span.start);
        return call_type(resolver, name, &callee, &argument_types, &span.start);
    }

    let function = resolver
        .members
        .find_functions(name, &argument_types)
        .into_iter()
        .next()
        .cloned();

    if let Some(function) = function {
        let result = function.result_type();
        *member = Some(function);
        return result;
    }

    if let Some(error) = argument_types.iter().find(|argument| argument.is_error()) {
        return error.clone();
    }

    resolver.error_type(
        ErrorImpl::NoMatchingFunction {
            signature: signature(name, &argument_types),
        },
        &span.start,
    )
}

/// Result of calling a value of type `callee`. Arguments are matched by position.
fn call_type(resolver: &mut TypeResolver, name: &str, callee: &Type, arguments: &[Type], position: &Position) -> Type {
    match callee {
        Type::Function(function) => {
            let accepted = function.parameters.len() == arguments.len()
                && function
                    .parameters
                    .iter()
                    .zip(arguments)
                    .all(|(parameter, argument)| parameter.is_assignable_from(argument));

            if accepted {
                function.return_type.clone()
            } else {
                resolver.error_type(
                    ErrorImpl::NoMatchingFunction {
                        signature: signature(name, arguments),
                    },
                    position,
                )
            }
        }
        Type::Error(_) => callee.clone(),
        other => resolver.error_type(
            ErrorImpl::NotCallable {
                type_: other.to_string(),
            },
            position,
        ),
    }
}

fn member_target(resolver: &mut TypeResolver, target: &Type, position: &Position) -> Result<Rc<ContainerType>, Type> {
    match target {
        Type::Container(container) => Ok(Rc::clone(container)),
        Type::Error(_) => Err(target.clone()),
        other => Err(resolver.error_type(
            ErrorImpl::IllegalMemberAccess {
                type_: other.to_string(),
            },
            position,
        )),
    }
}

fn use_if_public(
    resolver: &mut TypeResolver,
    found: TypeMember,
    slot: &mut Option<TypeMember>,
    position: &Position,
) -> Type {
    if !found.is_public() {
        return resolver.error_type(
            ErrorImpl::NonPublicMember {
                name: found.name().to_string(),
            },
            position,
        );
    }

    let result = found.result_type();
    *slot = Some(found);
    result
}

/// `left.right`: the left side must be a container; the right side is looked
/// up among its members and gets the same type as the whole access.
fn resolve_member_access(resolver: &mut TypeResolver, left: &mut Expr, right: &mut Expr, span: &Span) -> Type {
    let target = resolve_expr(resolver, left);
    let position = right.span.start.clone();

    let resolved = match &mut right.kind {
        ExprKind::Invocation {
            name,
            arguments,
            member,
            ..
        } => {
            let argument_types = resolve_arguments(resolver, arguments);

            match member_target(resolver, &target, &span.start) {
                Err(error) => error,
                Ok(container) => match container.find_function(name, &argument_types).cloned() {
                    Some(function) => use_if_public(resolver, function, member, &position),
                    None => match argument_types.iter().find(|argument| argument.is_error()) {
                        Some(error) => error.clone(),
                        None => resolver.error_type(
                            ErrorImpl::NoMatchingFunction {
                                signature: signature(name, &argument_types),
                            },
                            &position,
                        ),
                    },
                },
            }
        }
        ExprKind::Reference { name, kind, member, .. } => match member_target(resolver, &target, &span.start) {
            Err(error) => error,
            Ok(container) => match container.find_property(name).cloned() {
                Some(property) => {
                    *kind = Some(ReferenceKind::Member);
                    use_if_public(resolver, property, member, &position)
                }
                None => resolver.error_type(ErrorImpl::UnresolvedReference { name: name.clone() }, &position),
            },
        },
        _ => resolver.error_type(ErrorImpl::ExpectedInvocationOrReference, &position),
    };

    right.resolved = Some(resolved.clone());
    resolved
}

// OPERATORS

fn binary_type(
    resolver: &mut TypeResolver,
    operator: BinaryOperator,
    left: &Type,
    right: &Type,
    position: &Position,
) -> Type {
    if left.is_error() {
        return left.clone();
    }
    if right.is_error() {
        return right.clone();
    }

    let result = match operator {
        BinaryOperator::Plus if left.is_builtin(BuiltinType::String) || right.is_builtin(BuiltinType::String) => {
            Some(Type::string())
        }
        BinaryOperator::Plus
        | BinaryOperator::Minus
        | BinaryOperator::Multiply
        | BinaryOperator::Divide
        | BinaryOperator::Modulo => left.wider_numeric(right),
        BinaryOperator::Less | BinaryOperator::LessEquals | BinaryOperator::Greater | BinaryOperator::GreaterEquals => {
            left.wider_numeric(right).map(|_| Type::boolean())
        }
        BinaryOperator::Equals | BinaryOperator::NotEquals => {
            (left.is_assignable_from(right) || right.is_assignable_from(left)).then(Type::boolean)
        }
        BinaryOperator::And | BinaryOperator::Or => {
            (left.is_builtin(BuiltinType::Boolean) && right.is_builtin(BuiltinType::Boolean)).then(Type::boolean)
        }
    };

    result.unwrap_or_else(|| {
        resolver.error_type(
            ErrorImpl::InvalidOperands {
                operator: operator.to_string(),
                left: left.to_string(),
                right: right.to_string(),
            },
            position,
        )
    })
}

fn unary_type(resolver: &mut TypeResolver, operator: UnaryOperator, operand: &Type, position: &Position) -> Type {
    let valid = match operator {
        UnaryOperator::Negate => operand.numeric_rank().is_some(),
        UnaryOperator::Not => operand.is_builtin(BuiltinType::Boolean),
    };

    if valid || operand.is_error() {
        return operand.clone();
    }

    resolver.error_type(
        ErrorImpl::InvalidOperand {
            operator: operator.to_string(),
            operand: operand.to_string(),
        },
        position,
    )
}

fn resolve_assignment(
    resolver: &mut TypeResolver,
    target: &mut Expr,
    operator: AssignmentOperator,
    value: &mut Expr,
) -> Type {
    let target_type = resolve_expr(resolver, target);
    let value_type = resolve_expr(resolver, value);

    if !target_type.is_error() {
        check_assignment_target(resolver, target);
    }

    let stored = match operator.binary() {
        Some(binary) => binary_type(resolver, binary, &target_type, &value_type, &value.span.start),
        None => value_type,
    };
    resolver.check_assignable(&target_type, &stored, &value.span.start);

    Type::unit()
}

/// Only mutable definitions, imported properties and member properties can be assigned.
fn check_assignment_target(resolver: &mut TypeResolver, target: &Expr) {
    let position = target.span.start.clone();

    match &target.kind {
        ExprKind::Reference {
            kind: Some(ReferenceKind::Local),
            definition: Some(id),
            ..
        } => {
            let definition = resolver.symbols.definition(*id);
            let (kind, is_mutable, name) = (definition.kind, definition.is_mutable, definition.name.clone());

            if kind == DefinitionKind::Function {
                resolver.report(ErrorImpl::InvalidAssignmentTarget, position);
            } else if !is_mutable {
                resolver.report(ErrorImpl::ValReassignment { name }, position);
            }
        }
        ExprKind::Reference {
            kind: Some(ReferenceKind::TopLevel),
            ..
        } => {}
        ExprKind::MemberAccess { right, .. } if matches!(right.kind, ExprKind::Reference { .. }) => {}
        _ => resolver.report(ErrorImpl::InvalidAssignmentTarget, position),
    }
}

// COMPOUND EXPRESSIONS

/// The type of the last statement when it is an expression, `unit` otherwise.
pub fn resolve_block(resolver: &mut TypeResolver, block: &mut Block) -> Type {
    resolver.enter(block.table);

    let mut last = Type::unit();
    for statement in block.statements.iter_mut() {
        last = match statement {
            Stmt::Expression(expression) => resolve_expr(resolver, expression),
            Stmt::Variable(variable) => {
                resolve_variable(resolver, variable);
                Type::unit()
            }
            Stmt::Function(function) => {
                resolve_function(resolver, function);
                Type::unit()
            }
        };
    }

    resolver.leave();
    last
}

fn resolve_conditional(
    resolver: &mut TypeResolver,
    condition: &mut Expr,
    then_branch: &mut Expr,
    else_branch: Option<&mut Expr>,
) -> Type {
    let condition_type = resolve_expr(resolver, condition);
    resolver.check_assignable(&Type::boolean(), &condition_type, &condition.span.start);

    let then_type = resolve_expr(resolver, then_branch);
    match else_branch {
        Some(else_branch) => {
            let else_type = resolve_expr(resolver, else_branch);
            if then_type == else_type {
                then_type
            } else {
                Type::unit()
            }
        }
        None => Type::unit(),
    }
}

/// Anonymous functions and lambdas. Without a declared return type the body's
/// type is used.
fn resolve_function_literal(
    resolver: &mut TypeResolver,
    arguments: &mut [FunctionArgument],
    return_type: Option<&mut TypeName>,
    body: &mut Expr,
    table: ScopeId,
) -> Type {
    resolver.enter(table);

    let parameters: Vec<Type> = arguments
        .iter_mut()
        .map(|argument| resolve_argument_type(resolver, argument))
        .collect();

    for argument in arguments.iter_mut() {
        resolve_argument_default(resolver, argument);
    }

    let declared = match return_type {
        Some(return_type) if !return_type.is_undefined() => Some(resolve_type_name(resolver, return_type)),
        _ => None,
    };

    resolver.return_types.push(declared.clone());
    let body_type = resolve_expr(resolver, body);
    resolver.return_types.pop();
    resolver.leave();

    let return_type = match declared {
        Some(declared) => {
            if !declared.is_builtin(BuiltinType::Unit) {
                resolver.check_assignable(&declared, &body_type, &body.span.start);
            }
            declared
        }
        None => body_type,
    };

    Type::function(parameters, return_type)
}

fn resolve_return(resolver: &mut TypeResolver, value: Option<&mut Expr>, span: &Span) -> Type {
    let (received, position) = match value {
        Some(value) => (resolve_expr(resolver, value), value.span.start.clone()),
        None => (Type::unit(), span.start.clone()),
    };

    if let Some(Some(expected)) = resolver.return_types.last().cloned() {
        resolver.check_assignable(&expected, &received, &position);
    }

    Type::nothing()
}
