use crate::{
    ast::{
        expressions::{AssignmentOperator, BinaryOperator, Expr, ExprKind, InvocationArgument, UnaryOperator},
        statements::FunctionArgument,
        types::TypeName,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, IDENTIFIERS},
    symbols::symbols::DefinitionKind,
    Span,
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    stmt::{parse_arguments, parse_block, parse_function_argument, parse_invocation_argument},
    types::{parse_optional_type_declaration, parse_type},
};

/// Parses an expression whose operators bind tighter than `bp`.
///
/// Returns `None`, leaving the stream untouched, when the current token cannot start an expression.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Option<Expr>, Error> {
    let token = parser.consume();
    let Some(nud) = parser.get_nud_lookup().get(&token.kind).copied() else {
        parser.unconsume();
        return Ok(None);
    };

    let mut left = nud(parser, token)?;

    // While the current token is an infix operator binding tighter than bp, keep extending lhs
    loop {
        let kind = parser.current_token_kind();
        let (Some(operator_bp), Some(led)) = (
            parser.get_bp_lookup().get(&kind).copied(),
            parser.get_led_lookup().get(&kind).copied(),
        ) else {
            break;
        };

        if operator_bp <= bp {
            break;
        }

        let token = parser.consume();
        left = led(parser, left, token, operator_bp)?;
    }

    Ok(Some(left))
}

pub fn parse_expr_required(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    match parse_expr(parser, bp)? {
        Some(expression) => Ok(expression),
        None => {
            let token = parser.current();
            let error = match token.kind {
                TokenKind::UnexpectedCharacter => ErrorImpl::UnexpectedCharacter {
                    character: token.value.clone(),
                },
                _ => ErrorImpl::ExpectedExpression {
                    found: token.value.clone(),
                },
            };
            Err(Error::new(error, token.span.start.clone()))
        }
    }
}

// LITERALS

pub fn parse_int_literal(_parser: &mut Parser, token: Token) -> Result<Expr, Error> {
    let invalid = || {
        Error::new(
            ErrorImpl::InvalidIntLiteral {
                literal: token.value.clone(),
            },
            token.span.start.clone(),
        )
    };

    let mut text = token.value.replace('_', "");
    let is_long = text.ends_with(|c| c == 'l' || c == 'L');
    if is_long {
        text.pop();
    }

    let (digits, radix) = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(binary) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        (binary, 2)
    } else {
        (text.as_str(), 10)
    };

    let kind = if is_long {
        ExprKind::LongLiteral(i64::from_str_radix(digits, radix).map_err(|_| invalid())?)
    } else {
        ExprKind::IntLiteral(i32::from_str_radix(digits, radix).map_err(|_| invalid())?)
    };

    Ok(Expr::new(kind, token.span))
}

pub fn parse_boolean_literal(_parser: &mut Parser, token: Token) -> Result<Expr, Error> {
    let value = token.kind == TokenKind::True;
    Ok(Expr::new(ExprKind::BooleanLiteral(value), token.span))
}

/// Expands one escape sequence token, `\n`, `\u0041` or `\u{1F600}`.
fn unescape(token: &Token) -> Result<String, Error> {
    let invalid = || {
        Error::new(
            ErrorImpl::InvalidEscapeSequence {
                sequence: token.value.clone(),
            },
            token.span.start.clone(),
        )
    };

    let body = token.value.strip_prefix('\\').ok_or_else(invalid)?;
    let escaped = match body {
        "n" => '\n',
        "t" => '\t',
        "r" => '\r',
        "\"" => '"',
        "\\" => '\\',
        _ => {
            let code = body.strip_prefix('u').ok_or_else(invalid)?;
            let code = code
                .strip_prefix('{')
                .and_then(|code| code.strip_suffix('}'))
                .unwrap_or(code);
            let value = u32::from_str_radix(code, 16).map_err(|_| invalid())?;
            char::from_u32(value).ok_or_else(invalid)?
        }
    };

    Ok(escaped.to_string())
}

/// Parses the parts of a string after its opening quote.
///
/// A string made only of text and escapes folds into one `StringLiteral`;
/// any `\{ ... }` part turns it into a `StringTemplate`.
pub fn parse_string_expr(parser: &mut Parser, token: Token) -> Result<Expr, Error> {
    let mut parts: Vec<Expr> = vec![];
    let mut is_template = false;

    while !parser.check(TokenKind::StringEnd) && parser.has_more() {
        let part = parser.consume();
        let expression = match part.kind {
            TokenKind::StringContent => Expr::new(ExprKind::StringLiteral(part.value.clone()), part.span),
            TokenKind::EscapeSequence => Expr::new(ExprKind::StringLiteral(unescape(&part)?), part.span),
            TokenKind::StringTemplateStart => {
                is_template = true;
                let expression = parse_expr_required(parser, BindingPower::Default)?;
                parser.expect(TokenKind::StringTemplateEnd, "'}'")?;
                expression
            }
            TokenKind::UnexpectedCharacter => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedCharacter { character: part.value },
                    part.span.start,
                ))
            }
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedStringPart { token: part.value },
                    part.span.start,
                ))
            }
        };

        // merge adjacent text so templates alternate between text and expressions
        let merged = match (parts.last_mut(), &expression.kind) {
            (
                Some(Expr {
                    kind: ExprKind::StringLiteral(previous),
                    span,
                    ..
                }),
                ExprKind::StringLiteral(text),
            ) => {
                previous.push_str(text);
                span.end = expression.span.end.clone();
                true
            }
            _ => false,
        };

        if !merged {
            parts.push(expression);
        }
    }

    let end = parser.expect(TokenKind::StringEnd, "'\"'")?;
    let span = Span::between(&token.span, &end.span);

    if is_template {
        return Ok(Expr::new(ExprKind::StringTemplate(parts), span));
    }

    let value = match parts.pop() {
        Some(Expr {
            kind: ExprKind::StringLiteral(value),
            ..
        }) => value,
        _ => String::new(),
    };

    Ok(Expr::new(ExprKind::StringLiteral(value), span))
}

// REFERENCES

/// `name` or `name(arguments)`.
pub fn parse_reference_expr(parser: &mut Parser, token: Token) -> Result<Expr, Error> {
    let name = token.identifier_name().to_string();

    if !parser.matches(TokenKind::OpenParen) {
        return Ok(Expr::reference(&name, token.span));
    }

    let arguments = parse_arguments(parser, TokenKind::Comma, TokenKind::CloseParen, parse_invocation_argument)?;
    let end = parser.expect(TokenKind::CloseParen, "')'")?;

    Ok(Expr::invocation(&name, arguments, Span::between(&token.span, &end.span)))
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: Expr,
    operator: Token,
    bp: BindingPower,
) -> Result<Expr, Error> {
    if !parser.check_any(&IDENTIFIERS) {
        return Err(parser.unexpected("member name"));
    }

    let right = parse_expr_required(parser, bp)?;
    if !matches!(right.kind, ExprKind::Reference { .. } | ExprKind::Invocation { .. }) {
        return Err(Error::new(ErrorImpl::ExpectedInvocationOrReference, right.span.start.clone()));
    }

    let span = Span::between(&left.span, &right.span);
    Ok(Expr::new(
        ExprKind::MemberAccess {
            left: Box::new(left),
            safe: operator.kind == TokenKind::QuestionDot,
            right: Box::new(right),
        },
        span,
    ))
}

/// Invocation of an arbitrary callee, `(fun(x: int) = x)(1)`.
pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expr,
    _operator: Token,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let arguments = parse_arguments(parser, TokenKind::Comma, TokenKind::CloseParen, parse_invocation_argument)?;
    let end = parser.expect(TokenKind::CloseParen, "')'")?;
    let span = Span::between(&left.span, &end.span);

    Ok(Expr::new(
        ExprKind::AnonymousInvocation {
            callee: Box::new(left),
            arguments,
        },
        span,
    ))
}

// OPERATORS

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    operator: Token,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let Some(binary_operator) = BinaryOperator::from_token(operator.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator.value,
                expected: String::from("binary operator"),
            },
            operator.span.start,
        ));
    };

    let right = parse_expr_required(parser, bp)?;
    let span = Span::between(&left.span, &right.span);

    Ok(Expr::new(
        ExprKind::Binary {
            left: Box::new(left),
            operator: binary_operator,
            right: Box::new(right),
        },
        span,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser, operator: Token) -> Result<Expr, Error> {
    let unary_operator = match operator.kind {
        TokenKind::Not => UnaryOperator::Not,
        _ => UnaryOperator::Negate,
    };

    let operand = parse_expr_required(parser, BindingPower::Unary)?;
    let span = Span::between(&operator.span, &operand.span);

    Ok(Expr::new(
        ExprKind::Unary {
            operator: unary_operator,
            operand: Box::new(operand),
        },
        span,
    ))
}

pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    operator: Token,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let Some(assignment_operator) = AssignmentOperator::from_token(operator.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator.value,
                expected: String::from("assignment operator"),
            },
            operator.span.start,
        ));
    };

    // one step weaker makes `a = b = c` parse as `a = (b = c)`
    let value = parse_expr_required(parser, bp.lower())?;
    let span = Span::between(&left.span, &value.span);

    Ok(Expr::new(
        ExprKind::Assignment {
            target: Box::new(left),
            operator: assignment_operator,
            value: Box::new(value),
        },
        span,
    ))
}

// COMPOUND EXPRESSIONS

pub fn parse_grouping_expr(parser: &mut Parser, token: Token) -> Result<Expr, Error> {
    let inner = parse_expr_required(parser, BindingPower::Default)?;
    let end = parser.expect(TokenKind::CloseParen, "')'")?;

    Ok(Expr::new(
        ExprKind::Parenthesized(Box::new(inner)),
        Span::between(&token.span, &end.span),
    ))
}

pub fn parse_block_expr(parser: &mut Parser, token: Token) -> Result<Expr, Error> {
    parse_block(parser, token)
}

/// `if (condition) then (else otherwise)?`, branches are blocks or expressions.
pub fn parse_if_expr(parser: &mut Parser, token: Token) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen, "'('")?;
    let condition = parse_expr_required(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, "')'")?;

    let then_branch = parse_expr_required(parser, BindingPower::Default)?;
    let else_branch = if parser.matches(TokenKind::Else) {
        Some(Box::new(parse_expr_required(parser, BindingPower::Default)?))
    } else {
        None
    };

    let end = else_branch.as_ref().map_or(&then_branch.span, |branch| &branch.span);
    let span = Span::between(&token.span, end);

    Ok(Expr::new(
        ExprKind::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch,
        },
        span,
    ))
}

/// `fun(arguments) (-> Type)? (= expr | { block })`
pub fn parse_anonymous_function_expr(parser: &mut Parser, token: Token) -> Result<Expr, Error> {
    if parser.check_any(&IDENTIFIERS) {
        return Err(Error::new(ErrorImpl::NamedAnonymousFunction, parser.get_position()));
    }

    parser.scoped(|parser, table| {
        parser.expect(TokenKind::OpenParen, "'('")?;
        let arguments = parse_arguments(parser, TokenKind::Comma, TokenKind::CloseParen, parse_function_argument)?;
        let argument_end = parser.expect(TokenKind::CloseParen, "')'")?;
        let return_type = parse_optional_type_declaration(parser, TokenKind::Arrow, &argument_end.span)?;

        let body = if parser.matches(TokenKind::Assignment) {
            parse_expr_required(parser, BindingPower::Default)?
        } else if parser.check(TokenKind::OpenCurly) {
            let start = parser.consume();
            parse_block(parser, start)?
        } else {
            return Err(Error::new(ErrorImpl::MissingFunctionBody, parser.get_position()));
        };

        let span = Span::between(&token.span, &body.span);
        Ok(Expr::new(
            ExprKind::AnonymousFunction {
                arguments,
                return_type,
                body: Box::new(body),
                table,
            },
            span,
        ))
    })
}

/// `|a: int, b: int| a + b`
pub fn parse_lambda_expr(parser: &mut Parser, token: Token) -> Result<Expr, Error> {
    parser.scoped(|parser, table| {
        let arguments = parse_arguments(parser, TokenKind::Comma, TokenKind::Pipe, parse_lambda_argument)?;
        parser.expect(TokenKind::Pipe, "'|'")?;

        let body = parse_expr_required(parser, BindingPower::Default)?;
        let span = Span::between(&token.span, &body.span);

        Ok(Expr::new(
            ExprKind::Lambda {
                arguments,
                body: Box::new(body),
                table,
            },
            span,
        ))
    })
}

fn parse_lambda_argument(parser: &mut Parser) -> Result<FunctionArgument, Error> {
    let name = parser.expect_identifier()?;

    // a union would swallow the closing `|`, so only intersections are allowed here
    let type_name = if parser.matches(TokenKind::Colon) {
        parse_type(parser, BindingPower::LogicalOr)?
    } else {
        TypeName::undefined(name.span.clone())
    };

    let span = Span::between(&name.span, &type_name.span);
    let definition = parser.try_define(
        &name,
        DefinitionKind::Argument,
        span.clone(),
        name.span.start.offset,
        false,
    )?;

    Ok(FunctionArgument {
        name: name.identifier_name().to_string(),
        type_name,
        default: None,
        definition,
        span,
    })
}

pub fn parse_return_expr(parser: &mut Parser, token: Token) -> Result<Expr, Error> {
    let value = parse_expr(parser, BindingPower::Default)?;
    let span = match &value {
        Some(value) => Span::between(&token.span, &value.span),
        None => token.span.clone(),
    };

    Ok(Expr::new(ExprKind::Return(value.map(Box::new)), span))
}

/// Builds an invocation argument list entry, used by the grammar in `stmt`.
pub fn invocation_argument(name: Option<Token>, value: Expr) -> InvocationArgument {
    let span = match &name {
        Some(name) => Span::between(&name.span, &value.span),
        None => value.span.clone(),
    };

    InvocationArgument {
        name: name.map(|name| name.identifier_name().to_string()),
        value,
        span,
    }
}
