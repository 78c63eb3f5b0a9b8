//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Basic types (identifiers)
//! - Union types, `A | B`
//! - Intersection types, `A & B`, binding tighter than unions
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers for parsing complex type expressions.

use std::collections::HashMap;

use crate::{
    ast::types::{TypeName, TypeNameKind},
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser, Token) -> Result<TypeName, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, TypeName, Token, BindingPower) -> Result<TypeName, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_basic_type);
    parser.type_nud(TokenKind::EscapedIdentifier, parse_basic_type);
    parser.type_nud(TokenKind::Set, parse_basic_type);
    parser.type_nud(TokenKind::Get, parse_basic_type);

    parser.type_led(TokenKind::Pipe, BindingPower::LogicalOr, parse_union_type);
    parser.type_led(TokenKind::Ampersand, BindingPower::LogicalAnd, parse_intersection_type);
}

pub fn parse_basic_type(_parser: &mut Parser, token: Token) -> Result<TypeName, Error> {
    let name = token.identifier_name().to_string();
    Ok(TypeName::basic(&name, token.span))
}

pub fn parse_union_type(
    parser: &mut Parser,
    left: TypeName,
    _operator: Token,
    bp: BindingPower,
) -> Result<TypeName, Error> {
    let right = parse_type(parser, bp)?;
    let span = Span::between(&left.span, &right.span);

    Ok(TypeName::new(TypeNameKind::Union(Box::new(left), Box::new(right)), span))
}

pub fn parse_intersection_type(
    parser: &mut Parser,
    left: TypeName,
    _operator: Token,
    bp: BindingPower,
) -> Result<TypeName, Error> {
    let right = parse_type(parser, bp)?;
    let span = Span::between(&left.span, &right.span);

    Ok(TypeName::new(
        TypeNameKind::Intersection(Box::new(left), Box::new(right)),
        span,
    ))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeName, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("type name"));
    };

    let token = parser.consume();
    let mut left = nud(parser, token)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let (Some(operator_bp), Some(led)) = (
            parser.get_type_bp_lookup().get(&token_kind).copied(),
            parser.get_type_led_lookup().get(&token_kind).copied(),
        ) else {
            break;
        };

        if operator_bp <= bp {
            break;
        }

        let token = parser.consume();
        left = led(parser, left, token, operator_bp)?;
    }

    Ok(left)
}

/// `separator Type`, or an undefined type name positioned at `fallback` when the separator is absent.
pub fn parse_optional_type_declaration(
    parser: &mut Parser,
    separator: TokenKind,
    fallback: &Span,
) -> Result<TypeName, Error> {
    if parser.matches(separator) {
        parse_type(parser, BindingPower::Default)
    } else {
        Ok(TypeName::undefined(fallback.clone()))
    }
}
