use crate::token::{Token, TokenKind};
use crate::{markup, script, styles};
use codepad_common::Fragment;
use std::ops::Range;

/// Anything that can split editor text into an ordered token list.
///
/// Implementations must cover the input exactly: the token lengths (in
/// characters) add up to `text.chars().count()`.
pub trait Tokenize {
    fn tokenize(&self, text: &str, language: Fragment) -> Vec<Token>;
}

impl<F> Tokenize for F
where
    F: Fn(&str, Fragment) -> Vec<Token>,
{
    fn tokenize(&self, text: &str, language: Fragment) -> Vec<Token> {
        self(text, language)
    }
}

/// The built-in logos lexers for all three languages
#[derive(Debug, Default, Clone, Copy)]
pub struct Lexer;

impl Tokenize for Lexer {
    fn tokenize(&self, text: &str, language: Fragment) -> Vec<Token> {
        tokenize(text, language)
    }
}

/// Tokenize `text` with the built-in lexer for `language`
pub fn tokenize(text: &str, language: Fragment) -> Vec<Token> {
    match language {
        Fragment::Markup => markup::tokenize(text),
        Fragment::Styles => styles::tokenize(text),
        Fragment::Script => script::tokenize(text),
    }
}

/// Accumulates classified byte spans into character-length tokens.
///
/// Gaps between spans and the tail after the last span become plain tokens,
/// and adjacent plain tokens are merged.
pub(crate) struct TokenStreamBuilder<'src> {
    source: &'src str,
    cursor: usize,
    tokens: Vec<Token>,
}

impl<'src> TokenStreamBuilder<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            cursor: 0,
            tokens: Vec::new(),
        }
    }

    pub fn push(&mut self, span: Range<usize>, kind: Option<TokenKind>) {
        if span.start < self.cursor {
            return;
        }
        if span.start > self.cursor {
            self.emit(self.cursor..span.start, None);
        }
        let end = span.end;
        self.emit(span, kind);
        self.cursor = end;
    }

    pub fn finish(mut self) -> Vec<Token> {
        if self.cursor < self.source.len() {
            self.emit(self.cursor..self.source.len(), None);
        }
        self.tokens
    }

    fn emit(&mut self, span: Range<usize>, kind: Option<TokenKind>) {
        let length = self.source[span].chars().count();
        if length == 0 {
            return;
        }

        match (kind, self.tokens.last_mut()) {
            (None, Some(last)) if last.paint_kind().is_none() => last.length += length,
            (Some(kind), _) => self.tokens.push(Token::new(kind, length)),
            (None, _) => self.tokens.push(Token::plain(length)),
        }
    }
}
