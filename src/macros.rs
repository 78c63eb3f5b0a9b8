//! Utility macros for the front-end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_RULE!` - Creates a lexer rule from a regex or a literal and a `RuleAction`
//!
//! These macros keep the lexer rule tables readable.

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntLiteral, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer `Rule` anchored at the cursor.
///
/// `regex` patterns are used as written, `literal` patterns are escaped first.
///
/// # Example
///
/// ```ignore
/// MK_RULE!(literal "->", RuleAction::Emit(TokenKind::Arrow))
/// MK_RULE!(regex "[ \t\r\n]+", RuleAction::Skip)
/// ```
#[macro_export]
macro_rules! MK_RULE {
    (regex $pattern:expr, $action:expr) => {
        Rule {
            regex: Regex::new(&format!("^(?:{})", $pattern)).unwrap(),
            action: $action,
        }
    };
    (literal $pattern:expr, $action:expr) => {
        Rule {
            regex: Regex::new(&format!("^(?:{})", regex::escape($pattern))).unwrap(),
            action: $action,
        }
    };
}
