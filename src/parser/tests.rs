//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Operator precedence and associativity
//! - Strings and string templates
//! - Invocations, named arguments and member access
//! - Imports, functions, variables and type names
//! - Scopes and redefinition checks
//! - Error recovery

use crate::{
    ast::{
        ast::{CompilationUnit, StructurallyEquivalent},
        expressions::{BinaryOperator, Expr, ExprKind, InvocationArgument},
        statements::{Stmt, TopLevel},
        types::TypeNameKind,
    },
    errors::errors::{Error, ErrorImpl},
    symbols::symbols::DefinitionKind,
    Span,
};

use super::parser::{parse_compilation_unit, parse_expression};

fn expression(source: &str) -> Expr {
    parse_expression(source, "test.jk").unwrap()
}

fn unit(source: &str) -> CompilationUnit {
    parse_compilation_unit(source, "test.jk").unwrap()
}

fn errors(source: &str) -> Vec<Error> {
    parse_compilation_unit(source, "test.jk").unwrap_err()
}

fn int(value: i32) -> Expr {
    Expr::new(ExprKind::IntLiteral(value), Span::null())
}

fn string(value: &str) -> Expr {
    Expr::new(ExprKind::StringLiteral(value.to_string()), Span::null())
}

fn reference(name: &str) -> Expr {
    Expr::reference(name, Span::null())
}

fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Expr {
    Expr::new(
        ExprKind::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        },
        Span::null(),
    )
}

fn argument(name: Option<&str>, value: Expr) -> InvocationArgument {
    InvocationArgument {
        name: name.map(String::from),
        value,
        span: Span::null(),
    }
}

fn function_body(unit: &CompilationUnit, index: usize) -> &Expr {
    match &unit.entries[index] {
        TopLevel::Function(function) => function.body.as_deref().unwrap(),
        other => panic!("expected a function, got {:?}", other),
    }
}

// EXPRESSIONS

#[test]
fn test_parse_additive_is_left_associative() {
    let parsed = expression("1 + 2 + 3");
    let expected = binary(
        binary(int(1), BinaryOperator::Plus, int(2)),
        BinaryOperator::Plus,
        int(3),
    );

    assert!(parsed.is_structurally_equivalent(&expected));
}

#[test]
fn test_parse_multiplicative_binds_tighter() {
    let parsed = expression("1 - 2 * 3 / 4");
    let expected = binary(
        int(1),
        BinaryOperator::Minus,
        binary(
            binary(int(2), BinaryOperator::Multiply, int(3)),
            BinaryOperator::Divide,
            int(4),
        ),
    );

    assert!(parsed.is_structurally_equivalent(&expected));
}

#[test]
fn test_parse_logical_and_comparison() {
    let parsed = expression("a < 1 or b == 2 and not c");

    let ExprKind::Binary { left, operator, right } = &parsed.kind else {
        panic!("expected binary, got {:?}", parsed.kind);
    };
    assert_eq!(*operator, BinaryOperator::Or);
    assert!((**left).is_structurally_equivalent(&binary(reference("a"), BinaryOperator::Less, int(1))));

    let ExprKind::Binary { operator, right: negated, .. } = &right.kind else {
        panic!("expected binary, got {:?}", right.kind);
    };
    assert_eq!(*operator, BinaryOperator::And);
    assert!(matches!(negated.kind, ExprKind::Unary { .. }));
}

#[test]
fn test_parse_assignment_is_right_associative() {
    let parsed = expression("a = b += 1");

    let ExprKind::Assignment { target, value, .. } = &parsed.kind else {
        panic!("expected assignment, got {:?}", parsed.kind);
    };
    assert!((**target).is_structurally_equivalent(&reference("a")));
    assert!(matches!(value.kind, ExprKind::Assignment { .. }));
}

#[test]
fn test_parse_int_literals() {
    assert!(matches!(expression("0x1F").kind, ExprKind::IntLiteral(31)));
    assert!(matches!(expression("0b1010").kind, ExprKind::IntLiteral(10)));
    assert!(matches!(expression("1_000").kind, ExprKind::IntLiteral(1000)));
    assert!(matches!(expression("10L").kind, ExprKind::LongLiteral(10)));

    let errors = parse_expression("2147483648", "test.jk").unwrap_err();
    assert!(matches!(errors[0].get_impl(), ErrorImpl::InvalidIntLiteral { .. }));
}

#[test]
fn test_parse_simple_string() {
    let parsed = expression(r#""foo bar""#);
    assert!(parsed.is_structurally_equivalent(&string("foo bar")));
}

#[test]
fn test_parse_string_escapes_fold_into_one_literal() {
    let parsed = expression(r#""\u0000\u0000\u0000""#);
    assert!(parsed.is_structurally_equivalent(&string("\0\0\0")));

    let parsed = expression(r#""a\tb\u{1F600}""#);
    assert!(parsed.is_structurally_equivalent(&string("a\tb\u{1F600}")));
}

#[test]
fn test_parse_empty_string() {
    assert!(expression(r#""""#).is_structurally_equivalent(&string("")));
}

#[test]
fn test_parse_string_template() {
    let parsed = expression(r#""foo \{1 + 2} bar""#);
    let expected = Expr::new(
        ExprKind::StringTemplate(vec![
            string("foo "),
            binary(int(1), BinaryOperator::Plus, int(2)),
            string(" bar"),
        ]),
        Span::null(),
    );

    assert!(parsed.is_structurally_equivalent(&expected));
}

#[test]
fn test_parse_nested_string_template() {
    let parsed = expression(r#""a\{"b\{c}"}""#);

    let ExprKind::StringTemplate(parts) = &parsed.kind else {
        panic!("expected template, got {:?}", parsed.kind);
    };
    assert_eq!(parts.len(), 2);
    assert!(parts[0].is_structurally_equivalent(&string("a")));
    assert!(matches!(&parts[1].kind, ExprKind::StringTemplate(inner) if inner.len() == 2));
}

#[test]
fn test_parse_member_access_invocation() {
    let parsed = expression("foo.bar(1)");
    let expected = Expr::new(
        ExprKind::MemberAccess {
            left: Box::new(reference("foo")),
            safe: false,
            right: Box::new(Expr::invocation("bar", vec![argument(None, int(1))], Span::null())),
        },
        Span::null(),
    );

    assert!(parsed.is_structurally_equivalent(&expected));
}

#[test]
fn test_parse_safe_member_access_chain() {
    let parsed = expression("a?.b.c");

    let ExprKind::MemberAccess { left, safe, right } = &parsed.kind else {
        panic!("expected member access, got {:?}", parsed.kind);
    };
    assert!(!safe);
    assert!((**right).is_structurally_equivalent(&reference("c")));
    assert!(matches!(left.kind, ExprKind::MemberAccess { safe: true, .. }));
}

#[test]
fn test_parse_member_access_requires_name() {
    let errors = parse_expression("foo.1", "test.jk").unwrap_err();
    assert!(matches!(errors[0].get_impl(), ErrorImpl::UnexpectedToken { .. }));
}

#[test]
fn test_parse_named_invocation_arguments() {
    let parsed = expression("foo(1, bar = 2, 3)");
    let expected = Expr::invocation(
        "foo",
        vec![
            argument(None, int(1)),
            argument(Some("bar"), int(2)),
            argument(None, int(3)),
        ],
        Span::null(),
    );

    assert!(parsed.is_structurally_equivalent(&expected));
}

#[test]
fn test_parse_positional_argument_starting_with_identifier() {
    let parsed = expression("foo(x == 1, y,)");
    let expected = Expr::invocation(
        "foo",
        vec![
            argument(None, binary(reference("x"), BinaryOperator::Equals, int(1))),
            argument(None, reference("y")),
        ],
        Span::null(),
    );

    assert!(parsed.is_structurally_equivalent(&expected));
}

#[test]
fn test_parse_anonymous_invocation() {
    let parsed = expression("(fun(x: int) = x)(1)");

    let ExprKind::AnonymousInvocation { callee, arguments } = &parsed.kind else {
        panic!("expected anonymous invocation, got {:?}", parsed.kind);
    };
    assert_eq!(arguments.len(), 1);
    assert!(matches!(&callee.kind, ExprKind::Parenthesized(inner) if matches!(inner.kind, ExprKind::AnonymousFunction { .. })));
}

#[test]
fn test_parse_anonymous_function_errors() {
    let errors = parse_expression("fun foo() = 1", "test.jk").unwrap_err();
    assert_eq!(errors[0].get_impl(), &ErrorImpl::NamedAnonymousFunction);

    let errors = parse_expression("fun(a: int)", "test.jk").unwrap_err();
    assert_eq!(errors[0].get_impl(), &ErrorImpl::MissingFunctionBody);
}

#[test]
fn test_parse_lambda() {
    let parsed = expression("|a: int, b| a + b");

    let ExprKind::Lambda { arguments, body, .. } = &parsed.kind else {
        panic!("expected lambda, got {:?}", parsed.kind);
    };
    assert_eq!(arguments.len(), 2);
    assert!(matches!(&arguments[0].type_name.kind, TypeNameKind::Basic(name) if name == "int"));
    assert!(arguments[1].type_name.is_undefined());
    assert!((**body).is_structurally_equivalent(&binary(reference("a"), BinaryOperator::Plus, reference("b"))));
}

#[test]
fn test_parse_conditional() {
    let parsed = expression("if (a) { 1 } else 2");

    let ExprKind::Conditional {
        condition,
        then_branch,
        else_branch,
    } = &parsed.kind
    else {
        panic!("expected conditional, got {:?}", parsed.kind);
    };
    assert!((**condition).is_structurally_equivalent(&reference("a")));
    assert!(matches!(then_branch.kind, ExprKind::Block(_)));
    assert!((**else_branch.as_ref().unwrap()).is_structurally_equivalent(&int(2)));
}

#[test]
fn test_parse_return() {
    assert!(matches!(expression("return").kind, ExprKind::Return(None)));
    assert!(matches!(expression("return 1").kind, ExprKind::Return(Some(_))));
}

#[test]
fn test_parse_unexpected_character() {
    let errors = errors("val x = @;");

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_impl(),
        &ErrorImpl::UnexpectedCharacter {
            character: String::from("@")
        }
    );
}

// DECLARATIONS

#[test]
fn test_parse_imports() {
    let unit = unit(r#"import "foo/bar" { Foo as Fooy, Bar, }"#);

    assert_eq!(unit.imports.len(), 1);
    let import = &unit.imports[0];
    assert_eq!(import.path, "foo/bar");
    assert_eq!(import.entries.len(), 2);
    assert_eq!(import.entries[0].name, "Foo");
    assert_eq!(import.entries[0].local_name(), "Fooy");
    assert_eq!(import.entries[1].name, "Bar");
    assert_eq!(import.entries[1].alias, None);
}

#[test]
fn test_parse_template_import_path() {
    let errors = errors(r#"import "foo\{1}" { Foo }"#);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_impl(), &ErrorImpl::TemplateImportPath);
}

#[test]
fn test_parse_import_after_declaration() {
    let errors = errors(r#"val x = 1; import "foo" { Foo }"#);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_impl(), &ErrorImpl::ImportAfterDeclaration);
}

#[test]
fn test_parse_functions() {
    let unit = unit(
        "fun add(a: int, b: int = 2) -> int = a + b;\n\
         fun log(message: string) { message }\n\
         fun external(value: int) -> int;",
    );

    assert_eq!(unit.entries.len(), 3);

    let TopLevel::Function(add) = &unit.entries[0] else {
        panic!("expected function");
    };
    assert_eq!(add.name, "add");
    assert_eq!(add.arguments.len(), 2);
    assert!(add.arguments[1].default.is_some());
    assert!(matches!(&add.return_type.kind, TypeNameKind::Basic(name) if name == "int"));

    let TopLevel::Function(log) = &unit.entries[1] else {
        panic!("expected function");
    };
    assert!(log.return_type.is_undefined());
    assert!(matches!(function_body(&unit, 1).kind, ExprKind::Block(_)));

    let TopLevel::Function(external) = &unit.entries[2] else {
        panic!("expected function");
    };
    assert!(external.body.is_none());
}

#[test]
fn test_parse_properties() {
    let unit = unit("val a = 1;\nvar b: string;");

    let TopLevel::Property(a) = &unit.entries[0] else {
        panic!("expected property");
    };
    assert!(!a.is_mutable);
    assert!(a.type_name.is_undefined());
    assert!(a.initializer.is_some());

    let TopLevel::Property(b) = &unit.entries[1] else {
        panic!("expected property");
    };
    assert!(b.is_mutable);
    assert!(b.initializer.is_none());
    assert_eq!(unit.symbols.definition(b.definition).kind, DefinitionKind::Property);
}

#[test]
fn test_parse_union_and_intersection_types() {
    let unit = unit("val x: int | string & boolean;");

    let TopLevel::Property(x) = &unit.entries[0] else {
        panic!("expected property");
    };
    let TypeNameKind::Union(left, right) = &x.type_name.kind else {
        panic!("expected union, got {:?}", x.type_name.kind);
    };
    assert!(matches!(&left.kind, TypeNameKind::Basic(name) if name == "int"));
    assert!(matches!(right.kind, TypeNameKind::Intersection(_, _)));
}

#[test]
fn test_parse_block_statements() {
    let unit = unit("fun f() { val x = 1; fun g() = x; if (true) { x } else { g() } x }");

    let ExprKind::Block(block) = &function_body(&unit, 0).kind else {
        panic!("expected block");
    };
    assert_eq!(block.statements.len(), 4);
    assert!(matches!(block.statements[0], Stmt::Variable(_)));
    assert!(matches!(block.statements[1], Stmt::Function(_)));
    assert!(matches!(block.statements[2], Stmt::Expression(_)));
    assert!(matches!(block.statements[3], Stmt::Expression(_)));
}

#[test]
fn test_parse_missing_semicolon() {
    let errors = errors("fun f() { foo() bar() }");

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].get_impl(), ErrorImpl::UnexpectedToken { .. }));
}

// SCOPES

#[test]
fn test_parse_redefinition_in_block() {
    let errors = errors("fun f() {\n    val x = 1;\n    val x = 2;\n}");

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_impl(),
        &ErrorImpl::Redefinition {
            name: String::from("x")
        }
    );
    assert_eq!(errors[0].get_position().line, 3);
    assert_eq!(errors[0].get_position().column, 9);
}

#[test]
fn test_parse_redefinition_of_arguments_and_top_level() {
    let errors = errors("fun f(a: int, a: int) = a;\nfun g() = 1;\nfun g() = 2;");

    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|error| matches!(error.get_impl(), ErrorImpl::Redefinition { .. })));
}

#[test]
fn test_parse_shadowing_in_nested_scope() {
    let unit = unit("val x = 1;\nfun f(x: int) { val x = 2; { val x = 3; } }");

    // unit, function, body block, nested block
    assert_eq!(unit.symbols.table_count(), 4);
    assert_eq!(unit.symbols.definitions().iter().filter(|d| d.name == "x").count(), 4);
}

#[test]
fn test_parse_definition_visibility() {
    let source = "fun f() = f();\nval a = 1;";
    let unit = unit(source);

    let TopLevel::Function(f) = &unit.entries[0] else {
        panic!("expected function");
    };
    let TopLevel::Property(a) = &unit.entries[1] else {
        panic!("expected property");
    };

    // functions see themselves, variables only after their declaration
    assert_eq!(unit.symbols.definition(f.definition).visible_from, 4);
    assert_eq!(unit.symbols.definition(a.definition).visible_from, source.len() as u32);
    assert_eq!(unit.symbols.find(unit.table, "a"), Some(a.definition));
}

// RECOVERY

#[test]
fn test_parse_top_level_synchronization() {
    let errors = errors("val = 1;\nval y = 2;\n42");

    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0].get_impl(), ErrorImpl::UnexpectedToken { .. }));
    assert_eq!(errors[1].get_impl(), &ErrorImpl::ExpectedTopLevelDeclaration);
    assert_eq!(errors[1].get_position().line, 3);
}

#[test]
fn test_parse_block_synchronization() {
    let errors = errors("fun f() { val = 1; val y = ; y }\nfun g() = 1;");

    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0].get_impl(), ErrorImpl::UnexpectedToken { .. }));
    assert!(matches!(errors[1].get_impl(), ErrorImpl::ExpectedExpression { .. }));
}

#[test]
fn test_parse_unterminated_block_aborts_at_end() {
    let errors = errors("fun f() { val x = 1;");

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].get_impl(), ErrorImpl::UnexpectedToken { .. }));
}

// EQUIVALENCE

#[test]
fn test_reparse_is_structurally_equivalent() {
    let source = r#"
        import "std/io" { Printer as P }

        val greeting: string = "hello \{name()}";

        fun name() -> string = "world";

        fun main(count: int = 3) {
            var i = 0;
            i += count * 2;
            if (i > 1) { P.print(greeting) } else { return }
        }
    "#;

    let first = unit(source);
    let second = unit(source);
    assert!(first.is_structurally_equivalent(&second));

    let different = unit(&source.replace("count * 2", "count * 3"));
    assert!(!first.is_structurally_equivalent(&different));
}
