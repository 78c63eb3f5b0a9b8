use super::{
    lexer::tokenize,
    tokens::{Token, TokenKind},
};

/// Cursor over an eagerly tokenized source. The underlying vector always ends with `EOF`.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |token| token.kind != TokenKind::EOF) {
            let span = tokens
                .last()
                .map(|token| crate::Span::point(token.span.end.clone()))
                .unwrap_or_else(crate::Span::null);
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span,
            });
        }

        TokenStream { tokens, pos: 0 }
    }

    pub fn from_source(source: &str, file: &str) -> Self {
        TokenStream::new(tokenize(source.to_string(), Some(file.to_string())))
    }

    fn eof(&self) -> &Token {
        &self.tokens[self.tokens.len() - 1]
    }

    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| self.eof())
    }

    /// The most recently consumed token, or the first token before anything was consumed.
    pub fn previous(&self) -> &Token {
        let index = self.pos.saturating_sub(1).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub fn consume(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub fn unconsume(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub fn check_any(&self, kinds: &[TokenKind]) -> bool {
        self.current().is_one_of_many(kinds)
    }

    /// Consumes the current token only if it has the given kind.
    pub fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.consume();
            true
        } else {
            false
        }
    }

    pub fn has_more(&self) -> bool {
        self.current().kind != TokenKind::EOF
    }

    /// Index of the current token, used to detect lack of progress.
    pub fn index(&self) -> usize {
        self.pos
    }
}
