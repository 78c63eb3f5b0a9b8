use crate::{
    ast::{
        ast::{CompilationUnit, Import, ImportEntry},
        expressions::{Block, Expr, ExprKind, InvocationArgument},
        statements::{Function, FunctionArgument, Stmt, TopLevel, Variable},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, IDENTIFIERS},
    parser::{expr::parse_expr_required, lookups::BindingPower},
    symbols::symbols::DefinitionKind,
    Span,
};

use super::{
    expr::{invocation_argument, parse_string_expr},
    parser::{block_checkpoint, top_level_checkpoint, Parser},
    types::{parse_optional_type_declaration, parse_type},
};

/// Imports first, then top-level declarations until the end of input.
pub fn parse_compilation_unit(parser: &mut Parser) -> Result<CompilationUnit, Error> {
    parser.scoped(|parser, table| {
        let mut imports = vec![];
        while parser.has_more() && parser.check(TokenKind::Import) {
            if let Some(import) = parse_import(parser) {
                imports.push(import);
            }
        }

        let mut entries = vec![];
        while parser.has_more() {
            if let Some(entry) = parse_top_level(parser) {
                entries.push(entry);
            }
        }

        let end = parser.expect(TokenKind::EOF, "end of file")?;
        let start = imports
            .first()
            .map(|import| import.span.clone())
            .or_else(|| entries.first().map(|entry| entry.get_span().clone()))
            .unwrap_or_else(|| end.span.clone());

        Ok(CompilationUnit {
            imports,
            entries,
            table,
            symbols: parser.take_symbols(),
            span: Span::between(&start, &end.span),
        })
    })
}

/// `import "path" { Name (as Alias)?, ... }`
pub fn parse_import(parser: &mut Parser) -> Option<Import> {
    parser.with_synchronization(
        top_level_checkpoint,
        || None,
        |parser| {
            let keyword = parser.expect(TokenKind::Import, "'import'")?;
            let path_start = parser.expect(TokenKind::StringStart, "import path")?;
            let path = parse_string_expr(parser, path_start)?;
            parser.expect(TokenKind::OpenCurly, "'{'")?;
            let entries = parse_arguments(parser, TokenKind::Comma, TokenKind::CloseCurly, parse_import_entry)?;
            let end = parser.expect(TokenKind::CloseCurly, "'}'")?;

            // checked last so the entry block is still consumed
            let ExprKind::StringLiteral(path_value) = path.kind else {
                return Err(Error::new(ErrorImpl::TemplateImportPath, path.span.start));
            };

            Ok(Some(Import {
                path: path_value,
                entries,
                span: Span::between(&keyword.span, &end.span),
                resolved: false,
            }))
        },
    )
}

fn parse_import_entry(parser: &mut Parser) -> Result<ImportEntry, Error> {
    let name = parser.expect_identifier()?;
    let alias = if parser.matches(TokenKind::As) {
        Some(parser.expect_identifier()?)
    } else {
        None
    };

    let span = match &alias {
        Some(alias) => Span::between(&name.span, &alias.span),
        None => name.span.clone(),
    };

    Ok(ImportEntry {
        name: name.identifier_name().to_string(),
        alias: alias.map(|alias| alias.identifier_name().to_string()),
        span,
    })
}

fn parse_top_level(parser: &mut Parser) -> Option<TopLevel> {
    parser.with_synchronization(
        top_level_checkpoint,
        || None,
        |parser| match parser.current_token_kind() {
            TokenKind::Fun => Ok(Some(TopLevel::Function(parse_function(parser)?))),
            TokenKind::Val | TokenKind::Var => Ok(Some(TopLevel::Property(parse_variable(
                parser,
                DefinitionKind::Property,
            )?))),
            TokenKind::Import => Err(Error::new(ErrorImpl::ImportAfterDeclaration, parser.get_position())),
            TokenKind::UnexpectedCharacter => Err(parser.unexpected("top level declaration")),
            _ => Err(Error::new(ErrorImpl::ExpectedTopLevelDeclaration, parser.get_position())),
        },
    )
}

/// `fun name(arguments) (-> Type)? (= expr; | { block } | ;?)`
///
/// The name is bound in the enclosing table once the whole function is parsed.
pub fn parse_function(parser: &mut Parser) -> Result<Function, Error> {
    let keyword = parser.expect(TokenKind::Fun, "'fun'")?;
    let name = parser.expect_identifier()?;

    let (arguments, return_type, body, table) = parser.scoped(|parser, table| {
        parser.expect(TokenKind::OpenParen, "'('")?;
        let arguments = parse_arguments(parser, TokenKind::Comma, TokenKind::CloseParen, parse_function_argument)?;
        let argument_end = parser.expect(TokenKind::CloseParen, "')'")?;
        let return_type = parse_optional_type_declaration(parser, TokenKind::Arrow, &argument_end.span)?;

        let body = if parser.matches(TokenKind::Assignment) {
            let expression = parse_expr_required(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Semicolon, "';'")?;
            Some(Box::new(expression))
        } else if parser.check(TokenKind::OpenCurly) {
            let start = parser.consume();
            Some(Box::new(parse_block(parser, start)?))
        } else {
            // declaration without a body
            parser.matches(TokenKind::Semicolon);
            None
        };

        Ok((arguments, return_type, body, table))
    })?;

    let span = Span::between(&keyword.span, &parser.previous().span);
    let definition = parser.try_define(
        &name,
        DefinitionKind::Function,
        span.clone(),
        name.span.start.offset,
        false,
    )?;

    Ok(Function {
        name: name.identifier_name().to_string(),
        arguments,
        return_type,
        body,
        table,
        definition,
        span,
    })
}

/// `val|var name (: Type)? (= expr)? ;`, visible only after its own declaration.
pub fn parse_variable(parser: &mut Parser, kind: DefinitionKind) -> Result<Variable, Error> {
    let keyword = parser.consume();
    let is_mutable = keyword.kind == TokenKind::Var;
    let name = parser.expect_identifier()?;
    let type_name = parse_optional_type_declaration(parser, TokenKind::Colon, &name.span)?;

    let initializer = if parser.matches(TokenKind::Assignment) {
        Some(parse_expr_required(parser, BindingPower::Default)?)
    } else {
        None
    };

    let end = parser.expect(TokenKind::Semicolon, "';'")?;
    let span = Span::between(&keyword.span, &end.span);
    let definition = parser.try_define(&name, kind, span.clone(), span.end.offset, is_mutable)?;

    Ok(Variable {
        is_mutable,
        name: name.identifier_name().to_string(),
        type_name,
        initializer,
        definition,
        span,
    })
}

/// Parses `parse` separated by `separator` until `terminator`, which is left
/// unconsumed. A trailing separator is allowed.
pub fn parse_arguments<T>(
    parser: &mut Parser,
    separator: TokenKind,
    terminator: TokenKind,
    parse: fn(&mut Parser) -> Result<T, Error>,
) -> Result<Vec<T>, Error> {
    if parser.check(terminator) {
        return Ok(vec![]);
    }

    let mut arguments = vec![parse(parser)?];
    while parser.matches(separator) {
        if parser.check(terminator) {
            break;
        }
        arguments.push(parse(parser)?);
    }

    Ok(arguments)
}

/// `name = expr` or `expr`
pub fn parse_invocation_argument(parser: &mut Parser) -> Result<InvocationArgument, Error> {
    if parser.check_any(&IDENTIFIERS) {
        let name = parser.consume();
        if parser.matches(TokenKind::Assignment) {
            let value = parse_expr_required(parser, BindingPower::Default)?;
            return Ok(invocation_argument(Some(name), value));
        }
        parser.unconsume();
    }

    let value = parse_expr_required(parser, BindingPower::Default)?;
    Ok(invocation_argument(None, value))
}

/// `name: Type (= default)?`
pub fn parse_function_argument(parser: &mut Parser) -> Result<FunctionArgument, Error> {
    let name = parser.expect_identifier()?;
    parser.expect(TokenKind::Colon, "':'")?;
    let type_name = parse_type(parser, BindingPower::Default)?;

    let default = if parser.matches(TokenKind::Assignment) {
        Some(parse_expr_required(parser, BindingPower::Default)?)
    } else {
        None
    };

    let end = default.as_ref().map_or(&type_name.span, |default| &default.span);
    let span = Span::between(&name.span, end);
    let definition = parser.try_define(
        &name,
        DefinitionKind::Argument,
        span.clone(),
        span.end.offset,
        false,
    )?;

    Ok(FunctionArgument {
        name: name.identifier_name().to_string(),
        type_name,
        default,
        definition,
        span,
    })
}

pub fn parse_statement(parser: &mut Parser) -> Result<Stmt, Error> {
    match parser.current_token_kind() {
        TokenKind::Val | TokenKind::Var => Ok(Stmt::Variable(parse_variable(
            parser,
            DefinitionKind::LocalVariable,
        )?)),
        TokenKind::Fun => {
            // `fun name` declares, `fun(` starts an anonymous function
            parser.consume();
            let is_named = parser.check_any(&IDENTIFIERS);
            parser.unconsume();

            if is_named {
                Ok(Stmt::Function(parse_function(parser)?))
            } else {
                parse_expression_statement(parser)
            }
        }
        _ => parse_expression_statement(parser),
    }
}

/// An expression followed by `;`. The `;` may be left out after a `}` or
/// before the end of the enclosing block.
pub fn parse_expression_statement(parser: &mut Parser) -> Result<Stmt, Error> {
    let expression = parse_expr_required(parser, BindingPower::Default)?;

    if !parser.matches(TokenKind::Semicolon)
        && !expression.ends_with_block()
        && !parser.check(TokenKind::CloseCurly)
    {
        return Err(parser.unexpected("';'"));
    }

    Ok(Stmt::Expression(expression))
}

/// Statements until the closing `}`; `start` is the already consumed `{`.
pub fn parse_block(parser: &mut Parser, start: Token) -> Result<Expr, Error> {
    parser.scoped(|parser, table| {
        let mut statements = vec![];

        while !parser.check(TokenKind::CloseCurly) && parser.has_more() {
            let statement = parser.with_synchronization(
                block_checkpoint,
                || None,
                |parser| parse_statement(parser).map(Some),
            );

            if let Some(statement) = statement {
                statements.push(statement);
            }
        }

        let end = parser.expect(TokenKind::CloseCurly, "'}'")?;
        Ok(Expr::new(
            ExprKind::Block(Block { statements, table }),
            Span::between(&start.span, &end.span),
        ))
    })
}
