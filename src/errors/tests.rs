//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip, Reporter};
use crate::Position;
use std::rc::Rc;

fn position(offset: u32) -> Position {
    Position::new(offset, 1, offset + 1, Rc::new("test.jk".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnexpectedCharacter {
            character: "@".to_string(),
        },
        position(10),
    );

    assert_eq!(error.get_error_name(), "UnexpectedCharacter");
    assert_eq!(error.get_kind(), ErrorKind::Syntax);
    assert_eq!(error.get_position().offset, 10);
}

#[test]
fn test_error_kinds() {
    let redefinition = Error::new(
        ErrorImpl::Redefinition {
            name: "x".to_string(),
        },
        position(0),
    );
    assert_eq!(redefinition.get_kind(), ErrorKind::Semantic);

    let mismatch = Error::new(
        ErrorImpl::TypeMismatch {
            expected: "int".to_string(),
            received: "string".to_string(),
        },
        position(0),
    );
    assert_eq!(mismatch.get_kind(), ErrorKind::Type);

    let internal = Error::new(ErrorImpl::EmptyScopeStack, position(0));
    assert_eq!(internal.get_kind(), ErrorKind::Internal);
}

#[test]
fn test_error_messages() {
    let error = Error::new(
        ErrorImpl::ImportNotFound {
            path: "foo/bar".to_string(),
            name: "Baz".to_string(),
        },
        position(0),
    );
    assert_eq!(error.get_message(), "unable to find foo/bar/Baz");

    let error = Error::new(
        ErrorImpl::Redefinition {
            name: "a".to_string(),
        },
        position(0),
    );
    assert_eq!(error.get_message(), "definition with name 'a' already exists");
}

#[test]
fn test_error_display_includes_position() {
    let error = Error::new(
        ErrorImpl::UnresolvedReference {
            name: "foo".to_string(),
        },
        Position::new(4, 2, 3, Rc::new("main.jk".to_string())),
    );

    assert_eq!(
        error.to_string(),
        "semantic error: unresolved reference: foo (main.jk:2:3)"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnexpectedCharacter {
            character: "@".to_string(),
        },
        position(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
            expected: "';'".to_string(),
        },
        position(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Unexpected token: `}`, expected ';'"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_reporter_keeps_order() {
    let mut reporter = Reporter::new();
    assert!(!reporter.has_errors());

    reporter.report_at(ErrorImpl::EmptyScopeStack, position(3));
    reporter.report_at(
        ErrorImpl::UnknownType {
            name: "Foo".to_string(),
        },
        position(1),
    );

    assert!(reporter.has_errors());
    let names = reporter
        .errors()
        .iter()
        .map(|error| error.get_error_name().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["EmptyScopeStack", "UnknownType"]);
    assert!(reporter.into_result(()).is_err());
}

#[test]
fn test_reporter_into_result_ok() {
    let reporter = Reporter::new();
    assert_eq!(reporter.into_result(5).unwrap(), 5);
}
