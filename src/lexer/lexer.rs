use std::rc::Rc;

use crate::{Position, Span, MK_TOKEN};

use super::{
    modes::{rules_for, Mode, Rule, RuleAction},
    tokens::{Token, TokenKind, RESERVED_LOOKUP},
};

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
    modes: Vec<Mode>,
    /// Open `{` count of every active template expression, innermost last.
    template_braces: Vec<u32>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
            modes: vec![Mode::Default],
            template_braces: vec![],
        }
    }

    pub fn mode(&self) -> Mode {
        *self.modes.last().unwrap_or(&Mode::Default)
    }

    pub fn position(&self) -> Position {
        Position::new(self.pos as u32, self.line, self.column, Rc::clone(&self.file))
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Longest match among the rules of the current mode, earliest rule on ties.
    fn longest_match(&self) -> Option<(usize, &'static Rule)> {
        let remaining = self.remainder();
        let mut best: Option<(usize, &'static Rule)> = None;

        for rule in rules_for(self.mode()) {
            let Some(found) = rule.regex.find(remaining) else {
                continue;
            };

            let length = found.end();
            if length > 0 && best.map_or(true, |(longest, _)| length > longest) {
                best = Some((length, rule));
            }
        }

        best
    }

    /// Moves the cursor over `length` bytes, returning the text and its span.
    fn advance(&mut self, length: usize) -> (String, Span) {
        let start = self.position();
        let text = self.source[self.pos..self.pos + length].to_string();

        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += length;

        (text, Span { start, end: self.position() })
    }

    fn push(&mut self, kind: TokenKind, value: String, span: Span) {
        self.tokens.push(MK_TOKEN!(kind, value, span));
    }

    fn enter(&mut self, mode: Mode) {
        tracing::trace!(from = ?self.mode(), to = ?mode, position = %self.position(), "lexer mode push");
        if mode == Mode::StringTemplate {
            self.template_braces.push(0);
        }
        self.modes.push(mode);
    }

    fn leave(&mut self) {
        if self.modes.len() <= 1 {
            return;
        }

        if let Some(Mode::StringTemplate) = self.modes.pop() {
            self.template_braces.pop();
        }
        tracing::trace!(to = ?self.mode(), position = %self.position(), "lexer mode pop");
    }

    fn apply(&mut self, action: RuleAction, text: String, span: Span) {
        match action {
            RuleAction::Skip => {}
            RuleAction::Emit(kind) => self.push(kind, text, span),
            RuleAction::Word => {
                let kind = RESERVED_LOOKUP
                    .get(text.as_str())
                    .copied()
                    .unwrap_or(TokenKind::Identifier);
                self.push(kind, text, span);
            }
            RuleAction::Push(kind, mode) => {
                self.push(kind, text, span);
                self.enter(mode);
            }
            RuleAction::Pop(kind) => {
                self.push(kind, text, span);
                self.leave();
            }
            RuleAction::OpenBrace(kind) => {
                if let Some(depth) = self.template_braces.last_mut() {
                    *depth += 1;
                }
                self.push(kind, text, span);
            }
            RuleAction::CloseBrace => match self.template_braces.last_mut() {
                Some(depth) if *depth > 0 => {
                    *depth -= 1;
                    self.push(TokenKind::CloseCurly, text, span);
                }
                _ => {
                    self.push(TokenKind::StringTemplateEnd, text, span);
                    self.leave();
                }
            },
        }
    }
}

/// Splits `source` into tokens. Never fails: unknown input becomes
/// `UnexpectedCharacter` tokens and the last token is always `EOF`.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let Some((length, rule)) = lex.longest_match() else {
            // only reachable on an empty remainder, every mode ends with a catch-all
            break;
        };

        let (text, span) = lex.advance(length);
        lex.apply(rule.action, text, span);
    }

    let eof = lex.position();
    lex.push(TokenKind::EOF, String::from("EOF"), Span::point(eof));
    lex.tokens
}
