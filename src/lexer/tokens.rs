use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fun", TokenKind::Fun);
        map.insert("val", TokenKind::Val);
        map.insert("var", TokenKind::Var);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("not", TokenKind::Not);
        map.insert("as", TokenKind::As);
        map.insert("import", TokenKind::Import);
        map.insert("set", TokenKind::Set);
        map.insert("get", TokenKind::Get);
        map
    };
}

/// Tokens that may be used wherever a name is expected.
pub const IDENTIFIERS: [TokenKind; 4] = [
    TokenKind::Identifier,
    TokenKind::EscapedIdentifier,
    TokenKind::Set,
    TokenKind::Get,
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    IntLiteral,
    Identifier,
    EscapedIdentifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,
    MapStart,   // #{
    TupleStart, // #(

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    QuestionDot,
    Question,
    Semicolon,
    Colon,
    Comma,
    Arrow,
    Pipe,
    Ampersand,

    PlusEquals,
    MinusEquals,
    SlashEquals,
    StarEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Strings
    StringStart,
    StringContent,
    EscapeSequence,
    StringTemplateStart,
    StringTemplateEnd,
    StringEnd,

    UnexpectedCharacter,

    // Reserved
    Fun,
    Val,
    Var,
    True,
    False,
    Return,
    If,
    Else,
    And,
    Or,
    Not,
    As,
    Import,
    Set,
    Get,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:?})", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// The name this token stands for, without the back-tick of an escaped identifier.
    pub fn identifier_name(&self) -> &str {
        match self.kind {
            TokenKind::EscapedIdentifier => self.value.trim_start_matches('`'),
            _ => &self.value,
        }
    }
}
