//! Styles (CSS) lexer

use crate::lexer::TokenStreamBuilder;
use crate::token::{Token, TokenKind};
use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Raw {
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    Comment,

    #[regex(r"@[a-zA-Z-]+")]
    AtRule,

    #[regex(r#""[^"\n]*""#)]
    #[regex(r"'[^'\n]*'")]
    Str,

    #[regex(r"url\([^)]*\)")]
    Url,

    #[regex(r"-?[0-9]+(\.[0-9]+)?[a-zA-Z%]*")]
    #[regex(r"-?\.[0-9]+[a-zA-Z%]*")]
    Number,

    /// Id selector or hex colour, depending on position
    #[regex(r"#[a-zA-Z0-9_-]+")]
    Hash,

    #[regex(r"\.[a-zA-Z_-][a-zA-Z0-9_-]*")]
    Class,

    #[regex(r"--[a-zA-Z0-9_-]+")]
    CustomProperty,

    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    #[regex(r"![ \t]*important")]
    Important,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(";")]
    Semi,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r"[>+~*=\[\]]")]
    Combinator,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
}

pub(crate) fn tokenize(source: &str) -> Vec<Token> {
    let raw: Vec<(Option<Raw>, Range<usize>)> = Raw::lexer(source)
        .spanned()
        .map(|(token, span)| (token.ok(), span))
        .collect();

    // For each position, whether a `{` arrives before the next `;` or `}`.
    // That decides selector versus declaration without tracking nesting.
    let mut opens_block = vec![false; raw.len()];
    let mut next_is_block = false;
    for (i, (token, _)) in raw.iter().enumerate().rev() {
        match token {
            Some(Raw::LBrace) => next_is_block = true,
            Some(Raw::Semi) | Some(Raw::RBrace) => next_is_block = false,
            _ => {}
        }
        opens_block[i] = next_is_block;
    }

    let mut builder = TokenStreamBuilder::new(source);
    let mut depth = 0usize;
    let mut in_value = false;
    let mut in_prelude = false;

    for (i, (token, span)) in raw.iter().enumerate() {
        let in_selector = !in_value && !in_prelude && (depth == 0 || opens_block[i]);

        let kind = match token {
            Some(Raw::Comment) => Some(TokenKind::Comment),
            Some(Raw::Str) => Some(TokenKind::String),
            Some(Raw::Url) => Some(TokenKind::Url),
            Some(Raw::Important) => Some(TokenKind::Important),
            Some(Raw::CustomProperty) => Some(TokenKind::Variable),
            Some(Raw::Number) => Some(TokenKind::Number),
            Some(Raw::AtRule) => {
                in_prelude = true;
                Some(TokenKind::Atrule)
            }
            Some(Raw::LBrace) => {
                depth += 1;
                in_value = false;
                in_prelude = false;
                Some(TokenKind::Punctuation)
            }
            Some(Raw::RBrace) => {
                depth = depth.saturating_sub(1);
                in_value = false;
                Some(TokenKind::Punctuation)
            }
            Some(Raw::Semi) => {
                in_value = false;
                in_prelude = false;
                Some(TokenKind::Punctuation)
            }
            Some(Raw::Colon) if in_selector => Some(TokenKind::Selector),
            Some(Raw::Colon) => {
                if depth > 0 && !in_prelude {
                    in_value = true;
                }
                Some(TokenKind::Punctuation)
            }
            Some(Raw::Comma) | Some(Raw::LParen) | Some(Raw::RParen) => {
                Some(TokenKind::Punctuation)
            }
            Some(Raw::Hash) | Some(Raw::Class) | Some(Raw::Combinator) if in_selector => {
                Some(TokenKind::Selector)
            }
            Some(Raw::Hash) if in_value => Some(TokenKind::Number),
            Some(Raw::Combinator) => Some(TokenKind::Operator),
            Some(Raw::Ident) if in_selector => Some(TokenKind::Selector),
            Some(Raw::Ident) if followed_by_paren(&raw, i) => Some(TokenKind::Function),
            Some(Raw::Ident) if depth > 0 && !in_value && !in_prelude => {
                Some(TokenKind::Property)
            }
            _ => None,
        };
        builder.push(span.clone(), kind);
    }

    builder.finish()
}

fn followed_by_paren(raw: &[(Option<Raw>, Range<usize>)], index: usize) -> bool {
    matches!(raw.get(index + 1), Some((Some(Raw::LParen), _)))
}
