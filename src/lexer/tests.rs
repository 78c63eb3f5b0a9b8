//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, soft keywords and identifiers
//! - Integer literals in every radix
//! - Operators and punctuation (longest match)
//! - Strings, escape sequences and nested templates
//! - Comments, positions and unexpected characters
//! - The token stream cursor

use super::{
    lexer::tokenize,
    stream::TokenStream,
    tokens::{Token, TokenKind},
};

fn lex(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("test.jk".to_string()))
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = kinds("fun val var true false return if else and or not as import set get");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Fun,
            TokenKind::Val,
            TokenKind::Var,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Return,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::As,
            TokenKind::Import,
            TokenKind::Set,
            TokenKind::Get,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = lex("foo _bar baz_123 funny `if");

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "_bar");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "baz_123");
    // a keyword prefix does not make a keyword
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "funny");
    assert_eq!(tokens[4].kind, TokenKind::EscapedIdentifier);
    assert_eq!(tokens[4].value, "`if");
    assert_eq!(tokens[4].identifier_name(), "if");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_int_literals() {
    let tokens = lex("0 42 1_000 0xFF 0b1010 10L 0x1fl");

    let values = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::IntLiteral)
        .map(|token| token.value.as_str())
        .collect::<Vec<_>>();

    assert_eq!(values, vec!["0", "42", "1_000", "0xFF", "0b1010", "10L", "0x1fl"]);
    assert_eq!(tokens.len(), 8);
}

#[test]
fn test_tokenize_operators() {
    let tokens = kinds("-> == != <= >= += -= *= /= #{ #( ?. = < > ? [ ] { } ( ) | & . + - * / % ; : ,");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Arrow,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::MapStart,
            TokenKind::TupleStart,
            TokenKind::QuestionDot,
            TokenKind::Assignment,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Question,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Pipe,
            TokenKind::Ampersand,
            TokenKind::Dot,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_longest_match_without_spaces() {
    assert_eq!(
        kinds("a==b->c"),
        vec![
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::Identifier,
            TokenKind::Arrow,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("val x // this is a comment\n= 1"),
        vec![
            TokenKind::Val,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::IntLiteral,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_simple_string() {
    let tokens = lex(r#""hello world""#);

    assert_eq!(tokens[0].kind, TokenKind::StringStart);
    assert_eq!(tokens[1].kind, TokenKind::StringContent);
    assert_eq!(tokens[1].value, "hello world");
    assert_eq!(tokens[2].kind, TokenKind::StringEnd);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_escape_sequences() {
    let tokens = lex(r#""a\n\u0041\u{1F600}b""#);

    assert_eq!(tokens[0].kind, TokenKind::StringStart);
    assert_eq!(tokens[1].value, "a");
    assert_eq!(tokens[2].kind, TokenKind::EscapeSequence);
    assert_eq!(tokens[2].value, r"\n");
    assert_eq!(tokens[3].kind, TokenKind::EscapeSequence);
    assert_eq!(tokens[3].value, r"\u0041");
    assert_eq!(tokens[4].kind, TokenKind::EscapeSequence);
    assert_eq!(tokens[4].value, r"\u{1F600}");
    assert_eq!(tokens[5].kind, TokenKind::StringContent);
    assert_eq!(tokens[5].value, "b");
    assert_eq!(tokens[6].kind, TokenKind::StringEnd);
}

#[test]
fn test_tokenize_string_template() {
    assert_eq!(
        kinds(r#""a\{x}b""#),
        vec![
            TokenKind::StringStart,
            TokenKind::StringContent,
            TokenKind::StringTemplateStart,
            TokenKind::Identifier,
            TokenKind::StringTemplateEnd,
            TokenKind::StringContent,
            TokenKind::StringEnd,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_braces_inside_template() {
    assert_eq!(
        kinds(r#""\{ { 1 } }""#),
        vec![
            TokenKind::StringStart,
            TokenKind::StringTemplateStart,
            TokenKind::OpenCurly,
            TokenKind::IntLiteral,
            TokenKind::CloseCurly,
            TokenKind::StringTemplateEnd,
            TokenKind::StringEnd,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_map_start_inside_template() {
    assert_eq!(
        kinds(r#""\{ #{ 1 } }""#),
        vec![
            TokenKind::StringStart,
            TokenKind::StringTemplateStart,
            TokenKind::MapStart,
            TokenKind::IntLiteral,
            TokenKind::CloseCurly,
            TokenKind::StringTemplateEnd,
            TokenKind::StringEnd,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_nested_templates() {
    assert_eq!(
        kinds(r#""\{ { "\{x}" } }""#),
        vec![
            TokenKind::StringStart,
            TokenKind::StringTemplateStart,
            TokenKind::OpenCurly,
            TokenKind::StringStart,
            TokenKind::StringTemplateStart,
            TokenKind::Identifier,
            TokenKind::StringTemplateEnd,
            TokenKind::StringEnd,
            TokenKind::CloseCurly,
            TokenKind::StringTemplateEnd,
            TokenKind::StringEnd,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_unexpected_characters() {
    let tokens = lex("val @ x # !");

    assert_eq!(tokens[0].kind, TokenKind::Val);
    assert_eq!(tokens[1].kind, TokenKind::UnexpectedCharacter);
    assert_eq!(tokens[1].value, "@");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].kind, TokenKind::UnexpectedCharacter);
    assert_eq!(tokens[3].value, "#");
    assert_eq!(tokens[4].kind, TokenKind::UnexpectedCharacter);
    assert_eq!(tokens[4].value, "!");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_token_positions() {
    let tokens = lex("val x\n  = 1");

    let assignment = &tokens[2];
    assert_eq!(assignment.kind, TokenKind::Assignment);
    assert_eq!(assignment.span.start.offset, 8);
    assert_eq!(assignment.span.start.line, 2);
    assert_eq!(assignment.span.start.column, 3);
    assert_eq!(assignment.span.end.column, 4);

    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind, TokenKind::EOF);
    assert_eq!(eof.span.start.offset, 11);
    assert_eq!(eof.span.start.file.as_str(), "test.jk");
}

#[test]
fn test_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
    assert_eq!(kinds("  \n\t// nothing here"), vec![TokenKind::EOF]);
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        kinds(r#""abc"#),
        vec![
            TokenKind::StringStart,
            TokenKind::StringContent,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_token_stream_cursor() {
    let mut stream = TokenStream::from_source("val x = 1;", "test.jk");

    assert!(stream.check(TokenKind::Val));
    assert!(stream.has_more());

    let val = stream.consume();
    assert_eq!(val.kind, TokenKind::Val);
    assert_eq!(stream.previous().kind, TokenKind::Val);

    assert!(!stream.matches(TokenKind::Assignment));
    assert!(stream.matches(TokenKind::Identifier));
    assert!(stream.check_any(&[TokenKind::Colon, TokenKind::Assignment]));

    stream.unconsume();
    assert!(stream.check(TokenKind::Identifier));

    while stream.has_more() {
        stream.consume();
    }
    assert_eq!(stream.previous().kind, TokenKind::Semicolon);
    assert!(stream.check(TokenKind::EOF));

    // consuming past the end keeps returning EOF
    assert_eq!(stream.consume().kind, TokenKind::EOF);
    assert_eq!(stream.consume().kind, TokenKind::EOF);
}
