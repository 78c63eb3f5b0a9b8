use lazy_static::lazy_static;
use regex::Regex;

use crate::MK_RULE;

use super::tokens::TokenKind;

/// Lexical context the lexer is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Default,
    String,
    StringTemplate,
}

/// What the engine does once a rule wins at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Drop the matched text.
    Skip,
    Emit(TokenKind),
    /// Emit a reserved word if the text is one, an identifier otherwise.
    Word,
    /// Emit, then enter a new mode.
    Push(TokenKind, Mode),
    /// Emit, then leave the current mode.
    Pop(TokenKind),
    /// `{` or `#{` inside a template expression, both are closed by `}`.
    OpenBrace(TokenKind),
    /// `}` inside a template expression, closes the template at depth zero.
    CloseBrace,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub regex: Regex,
    pub action: RuleAction,
}

const INT_LITERAL: &str = r"(?:0[xX][_0-9A-Fa-f]+|0[bB][_01]+|0|[1-9][0-9_]*)[lL]?";
const IDENTIFIER: &str = r"[a-zA-Z_][a-zA-Z0-9_]*";
const ESCAPED_IDENTIFIER: &str = r"`[a-zA-Z0-9_]+";
const ESCAPE_SEQUENCE: &str = r#"\\u(?:[0-9A-Fa-f]{4}|\{[0-9A-Za-z_]*\})|\\[ntr"\\]"#;
const ANY_CHARACTER: &str = r"[\s\S]";

lazy_static! {
    pub static ref DEFAULT_RULES: Vec<Rule> = default_rules();
    pub static ref STRING_RULES: Vec<Rule> = string_rules();
    pub static ref STRING_TEMPLATE_RULES: Vec<Rule> = string_template_rules();
}

pub fn rules_for(mode: Mode) -> &'static [Rule] {
    match mode {
        Mode::Default => &DEFAULT_RULES,
        Mode::String => &STRING_RULES,
        Mode::StringTemplate => &STRING_TEMPLATE_RULES,
    }
}

/// Everything except the catch-all, so template mode can append its own.
fn code_rules() -> Vec<Rule> {
    vec![
        MK_RULE!(regex r"[ \t\r\n\f]+", RuleAction::Skip),
        MK_RULE!(regex r"//[^\n]*", RuleAction::Skip),
        MK_RULE!(regex INT_LITERAL, RuleAction::Emit(TokenKind::IntLiteral)),
        MK_RULE!(regex IDENTIFIER, RuleAction::Word),
        MK_RULE!(regex ESCAPED_IDENTIFIER, RuleAction::Emit(TokenKind::EscapedIdentifier)),
        MK_RULE!(literal "->", RuleAction::Emit(TokenKind::Arrow)),
        MK_RULE!(literal "==", RuleAction::Emit(TokenKind::Equals)),
        MK_RULE!(literal "!=", RuleAction::Emit(TokenKind::NotEquals)),
        MK_RULE!(literal "<=", RuleAction::Emit(TokenKind::LessEquals)),
        MK_RULE!(literal ">=", RuleAction::Emit(TokenKind::GreaterEquals)),
        MK_RULE!(literal "+=", RuleAction::Emit(TokenKind::PlusEquals)),
        MK_RULE!(literal "-=", RuleAction::Emit(TokenKind::MinusEquals)),
        MK_RULE!(literal "*=", RuleAction::Emit(TokenKind::StarEquals)),
        MK_RULE!(literal "/=", RuleAction::Emit(TokenKind::SlashEquals)),
        MK_RULE!(literal "#{", RuleAction::Emit(TokenKind::MapStart)),
        MK_RULE!(literal "#(", RuleAction::Emit(TokenKind::TupleStart)),
        MK_RULE!(literal "?.", RuleAction::Emit(TokenKind::QuestionDot)),
        MK_RULE!(literal "=", RuleAction::Emit(TokenKind::Assignment)),
        MK_RULE!(literal "<", RuleAction::Emit(TokenKind::Less)),
        MK_RULE!(literal ">", RuleAction::Emit(TokenKind::Greater)),
        MK_RULE!(literal "?", RuleAction::Emit(TokenKind::Question)),
        MK_RULE!(literal "[", RuleAction::Emit(TokenKind::OpenBracket)),
        MK_RULE!(literal "]", RuleAction::Emit(TokenKind::CloseBracket)),
        MK_RULE!(literal "{", RuleAction::Emit(TokenKind::OpenCurly)),
        MK_RULE!(literal "}", RuleAction::Emit(TokenKind::CloseCurly)),
        MK_RULE!(literal "(", RuleAction::Emit(TokenKind::OpenParen)),
        MK_RULE!(literal ")", RuleAction::Emit(TokenKind::CloseParen)),
        MK_RULE!(literal "|", RuleAction::Emit(TokenKind::Pipe)),
        MK_RULE!(literal "&", RuleAction::Emit(TokenKind::Ampersand)),
        MK_RULE!(literal ".", RuleAction::Emit(TokenKind::Dot)),
        MK_RULE!(literal "+", RuleAction::Emit(TokenKind::Plus)),
        MK_RULE!(literal "-", RuleAction::Emit(TokenKind::Dash)),
        MK_RULE!(literal "*", RuleAction::Emit(TokenKind::Star)),
        MK_RULE!(literal "/", RuleAction::Emit(TokenKind::Slash)),
        MK_RULE!(literal "%", RuleAction::Emit(TokenKind::Percent)),
        MK_RULE!(literal ";", RuleAction::Emit(TokenKind::Semicolon)),
        MK_RULE!(literal ":", RuleAction::Emit(TokenKind::Colon)),
        MK_RULE!(literal ",", RuleAction::Emit(TokenKind::Comma)),
        MK_RULE!(literal "\"", RuleAction::Push(TokenKind::StringStart, Mode::String)),
    ]
}

fn default_rules() -> Vec<Rule> {
    let mut rules = code_rules();
    rules.push(MK_RULE!(regex ANY_CHARACTER, RuleAction::Emit(TokenKind::UnexpectedCharacter)));
    rules
}

fn string_rules() -> Vec<Rule> {
    vec![
        MK_RULE!(
            literal "\\{",
            RuleAction::Push(TokenKind::StringTemplateStart, Mode::StringTemplate)
        ),
        MK_RULE!(regex ESCAPE_SEQUENCE, RuleAction::Emit(TokenKind::EscapeSequence)),
        MK_RULE!(regex r#"[^\\"]+"#, RuleAction::Emit(TokenKind::StringContent)),
        MK_RULE!(literal "\"", RuleAction::Pop(TokenKind::StringEnd)),
        MK_RULE!(regex ANY_CHARACTER, RuleAction::Emit(TokenKind::UnexpectedCharacter)),
    ]
}

fn string_template_rules() -> Vec<Rule> {
    // declared first so they win the tie against the default brace rules
    let mut rules = vec![
        MK_RULE!(literal "#{", RuleAction::OpenBrace(TokenKind::MapStart)),
        MK_RULE!(literal "{", RuleAction::OpenBrace(TokenKind::OpenCurly)),
        MK_RULE!(literal "}", RuleAction::CloseBrace),
    ];
    rules.extend(default_rules());
    rules
}
