//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parsing entry points.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and grammar functions for declarations and statements.
//!
//! It maintains lookup tables for:
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers
//!
//! Alongside the tables it owns the scope stack and the symbol arena, so
//! definitions are checked for redefinition as soon as they are parsed.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{ast::CompilationUnit, expressions::Expr},
    errors::errors::{Error, ErrorImpl, Reporter},
    lexer::{
        stream::TokenStream,
        tokens::{Token, TokenKind, IDENTIFIERS},
    },
    symbols::symbols::{Definition, DefinitionId, DefinitionKind, ScopeId, SymbolArena},
    Position, Span,
};

use super::{
    expr::parse_expr_required,
    lookups::{create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup},
    stmt,
    types::{create_token_type_lookups, TypeLEDHandler, TypeLEDLookup, TypeNUDHandler, TypeNUDLookup},
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The token stream being parsed
    tokens: TokenStream,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
    /// Lookup table for type left denotation handlers
    type_led_lookup: TypeLEDLookup,
    /// Lookup table for type binding powers
    type_binding_power_lookup: BPLookup,
    /// Every table and definition created while parsing
    symbols: SymbolArena,
    /// Open scopes, innermost last
    scopes: Vec<ScopeId>,
    /// Diagnostics reported so far
    reporter: Reporter,
}

impl Parser {
    /// Creates a new Parser with every lookup table registered.
    pub fn new(tokens: TokenStream, file: Rc<String>) -> Self {
        let mut parser = Parser {
            tokens,
            file,
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
            symbols: SymbolArena::new(),
            scopes: vec![],
            reporter: Reporter::new(),
        };

        create_token_lookups(&mut parser);
        create_token_type_lookups(&mut parser);
        parser
    }

    pub fn current(&self) -> &Token {
        self.tokens.current()
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens.current().kind
    }

    pub fn previous(&self) -> &Token {
        self.tokens.previous()
    }

    pub fn consume(&mut self) -> Token {
        self.tokens.consume()
    }

    pub fn unconsume(&mut self) {
        self.tokens.unconsume()
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.tokens.check(kind)
    }

    pub fn check_any(&self, kinds: &[TokenKind]) -> bool {
        self.tokens.check_any(kinds)
    }

    /// Consumes the current token if it has the given kind.
    pub fn matches(&mut self, kind: TokenKind) -> bool {
        self.tokens.matches(kind)
    }

    pub fn has_more(&self) -> bool {
        self.tokens.has_more()
    }

    /// Error describing why the current token cannot be used here.
    pub fn unexpected(&self, expected: &str) -> Error {
        let token = self.current();
        let error = match token.kind {
            TokenKind::UnexpectedCharacter => ErrorImpl::UnexpectedCharacter {
                character: token.value.clone(),
            },
            _ => ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
                expected: expected.to_string(),
            },
        };

        Error::new(error, token.span.start.clone())
    }

    /// Consumes a token of the given kind or fails with an error naming `expected`.
    pub fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, Error> {
        if self.check(kind) {
            Ok(self.consume())
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub fn expect_identifier(&mut self) -> Result<Token, Error> {
        if self.check_any(&IDENTIFIERS) {
            Ok(self.consume())
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    pub fn get_type_led_lookup(&self) -> &TypeLEDLookup {
        &self.type_led_lookup
    }

    pub fn get_type_bp_lookup(&self) -> &BPLookup {
        &self.type_binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a type left denotation handler.
    pub fn type_led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: TypeLEDHandler) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_led_lookup.insert(kind, led_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    pub fn get_position(&self) -> Position {
        self.current().span.start.clone()
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn report(&mut self, error: Error) {
        self.reporter.report(error);
    }

    // SCOPES

    pub fn current_table(&self) -> Result<ScopeId, Error> {
        self.scopes
            .last()
            .copied()
            .ok_or_else(|| Error::new(ErrorImpl::EmptyScopeStack, self.get_position()))
    }

    /// Runs `body` inside a fresh table whose parent is the current table.
    /// The table is closed again whether or not `body` succeeds.
    pub fn scoped<R>(&mut self, body: impl FnOnce(&mut Parser, ScopeId) -> Result<R, Error>) -> Result<R, Error> {
        let parent = self.scopes.last().copied();
        let table = self.symbols.create_table(parent);
        tracing::trace!(?table, ?parent, "open scope");

        self.scopes.push(table);
        let result = body(self, table);
        self.scopes.pop();

        result
    }

    /// Creates a definition and binds it in the current table, reporting a
    /// redefinition instead of binding when the table already has the name.
    pub fn try_define(
        &mut self,
        name: &Token,
        kind: DefinitionKind,
        span: Span,
        visible_from: u32,
        is_mutable: bool,
    ) -> Result<DefinitionId, Error> {
        let table = self.current_table()?;
        let identifier = name.identifier_name().to_string();
        let definition = self
            .symbols
            .add_definition(Definition::new(&identifier, kind, span, visible_from, is_mutable));

        if self.symbols.has_local(table, &identifier) {
            self.report(Error::new(
                ErrorImpl::Redefinition { name: identifier },
                name.span.start.clone(),
            ));
        } else {
            self.symbols.define(table, &identifier, definition);
        }

        Ok(definition)
    }

    pub fn take_symbols(&mut self) -> SymbolArena {
        std::mem::take(&mut self.symbols)
    }

    pub fn symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    // ERROR RECOVERY

    /// Runs `body`; on failure reports the error, skips at least one token if
    /// `body` made no progress, then skips until `checkpoint` holds or input ends.
    pub fn with_synchronization<T>(
        &mut self,
        checkpoint: fn(&Parser) -> bool,
        fallback: impl FnOnce() -> T,
        body: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> T {
        let start = self.tokens.index();

        match body(self) {
            Ok(value) => value,
            Err(error) => {
                self.report(error);

                if self.tokens.index() == start {
                    self.consume();
                }

                while self.has_more() && !checkpoint(self) {
                    self.consume();
                }

                tracing::debug!(position = %self.get_position(), "parser synchronized");
                fallback()
            }
        }
    }
}

/// Start of a top-level declaration.
pub fn top_level_checkpoint(parser: &Parser) -> bool {
    parser.check_any(&[TokenKind::Fun, TokenKind::Val, TokenKind::Var, TokenKind::Import])
}

/// Just after a `;`, or at the start of a statement or the end of a block.
pub fn block_checkpoint(parser: &Parser) -> bool {
    parser.previous().kind == TokenKind::Semicolon
        || parser.check_any(&[
            TokenKind::Fun,
            TokenKind::Val,
            TokenKind::Var,
            TokenKind::Return,
            TokenKind::If,
            TokenKind::CloseCurly,
        ])
}

/// Tokenizes `source` and runs `action` over it.
///
/// Succeeds only when nothing was reported; an error returned by `action`
/// aborts parsing and is appended to the diagnostics collected so far.
pub fn parse<T>(
    source: &str,
    file: &str,
    action: impl FnOnce(&mut Parser) -> Result<T, Error>,
) -> Result<T, Vec<Error>> {
    let tokens = TokenStream::from_source(source, file);
    let mut parser = Parser::new(tokens, Rc::new(file.to_string()));

    match action(&mut parser) {
        Ok(value) => parser.reporter.into_result(value),
        Err(error) => {
            parser.report(error);
            Err(parser.reporter.into_errors())
        }
    }
}

pub fn parse_compilation_unit(source: &str, file: &str) -> Result<CompilationUnit, Vec<Error>> {
    parse(source, file, stmt::parse_compilation_unit)
}

pub fn parse_expression(source: &str, file: &str) -> Result<Expr, Vec<Error>> {
    parse(source, file, |parser| parse_expr_required(parser, BindingPower::Default))
}
