use std::collections::HashMap;

use crate::{ast::expressions::Expr, errors::errors::Error, lexer::tokens::{Token, TokenKind}};

use super::{expr::*, parser::Parser};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Member,
    Primary,
}

impl BindingPower {
    /// The next weaker binding power, used to make an operator right-associative.
    pub fn lower(self) -> BindingPower {
        match self {
            BindingPower::Default | BindingPower::Assignment => BindingPower::Default,
            BindingPower::LogicalOr => BindingPower::Assignment,
            BindingPower::LogicalAnd => BindingPower::LogicalOr,
            BindingPower::Equality => BindingPower::LogicalAnd,
            BindingPower::Relational => BindingPower::Equality,
            BindingPower::Additive => BindingPower::Relational,
            BindingPower::Multiplicative => BindingPower::Additive,
            BindingPower::Unary => BindingPower::Multiplicative,
            BindingPower::Call => BindingPower::Unary,
            BindingPower::Member => BindingPower::Call,
            BindingPower::Primary => BindingPower::Member,
        }
    }
}

/// Prefix handler, receives the already consumed token.
pub type NUDHandler = fn(&mut Parser, Token) -> Result<Expr, Error>;
/// Infix handler, receives the left operand and the already consumed operator.
pub type LEDHandler = fn(&mut Parser, Expr, Token, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    parser.led(TokenKind::Assignment, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::PlusEquals, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::MinusEquals, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::StarEquals, BindingPower::Assignment, parse_assignment_expr);
    parser.led(TokenKind::SlashEquals, BindingPower::Assignment, parse_assignment_expr);

    // Logical
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);

    // Member
    parser.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);
    parser.led(TokenKind::QuestionDot, BindingPower::Member, parse_member_expr);

    // Literals and references
    parser.nud(TokenKind::IntLiteral, parse_int_literal);
    parser.nud(TokenKind::True, parse_boolean_literal);
    parser.nud(TokenKind::False, parse_boolean_literal);
    parser.nud(TokenKind::Identifier, parse_reference_expr);
    parser.nud(TokenKind::EscapedIdentifier, parse_reference_expr);
    parser.nud(TokenKind::Set, parse_reference_expr);
    parser.nud(TokenKind::Get, parse_reference_expr);
    parser.nud(TokenKind::StringStart, parse_string_expr);

    // Prefix operators and compound expressions
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::OpenCurly, parse_block_expr);
    parser.nud(TokenKind::If, parse_if_expr);
    parser.nud(TokenKind::Fun, parse_anonymous_function_expr);
    parser.nud(TokenKind::Pipe, parse_lambda_expr);
    parser.nud(TokenKind::Return, parse_return_expr);
}

// Lookup tables inside parser struct, so it's easier
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
