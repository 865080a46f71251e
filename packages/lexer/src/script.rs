//! Script (JavaScript) lexer

use crate::lexer::TokenStreamBuilder;
use crate::token::{Token, TokenKind};
use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Raw {
    #[regex(r"//[^\n]*")]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    Comment,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    #[regex(r"`([^`\\]|\\.)*`")]
    Str,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]+)?([eE][+-]?[0-9]+)?n?")]
    #[regex(r"0[xX][0-9a-fA-F_]+n?")]
    #[regex(r"\.[0-9]+")]
    Number,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[token("/")]
    #[token("/=")]
    #[regex(r"[-+*%=&|^!<>?~]+")]
    Operator,

    #[regex(r"[{}()\[\];,.:]")]
    Punctuation,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,
}

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "finally", "for", "from", "function",
    "get", "if", "import", "in", "instanceof", "let", "new", "null", "of", "return", "set",
    "static", "super", "switch", "this", "throw", "try", "typeof", "undefined", "var", "void",
    "while", "with", "yield",
];

pub(crate) fn tokenize(source: &str) -> Vec<Token> {
    let raw: Vec<(Option<Raw>, Range<usize>)> = Raw::lexer(source)
        .spanned()
        .map(|(token, span)| (token.ok(), span))
        .collect();

    let mut builder = TokenStreamBuilder::new(source);
    let mut previous_word: Option<&str> = None;

    for (i, (token, span)) in raw.iter().enumerate() {
        let text = &source[span.clone()];
        let kind = match token {
            Some(Raw::Comment) => Some(TokenKind::Comment),
            Some(Raw::Str) => Some(TokenKind::String),
            Some(Raw::Number) => Some(TokenKind::Number),
            Some(Raw::Operator) => Some(TokenKind::Operator),
            Some(Raw::Punctuation) => Some(TokenKind::Punctuation),
            Some(Raw::Ident) => {
                classify_ident(text, previous_word, next_significant(source, &raw, i))
            }
            Some(Raw::Whitespace) | None => None,
        };

        match token {
            Some(Raw::Whitespace) | Some(Raw::Comment) => {}
            Some(Raw::Ident) => previous_word = Some(text),
            _ => previous_word = None,
        }

        builder.push(span.clone(), kind);
    }

    builder.finish()
}

fn classify_ident(text: &str, previous_word: Option<&str>, next: Option<&str>) -> Option<TokenKind> {
    match text {
        "true" | "false" => Some(TokenKind::Boolean),
        "NaN" | "Infinity" => Some(TokenKind::Number),
        _ if KEYWORDS.contains(&text) => Some(TokenKind::Keyword),
        _ if matches!(previous_word, Some("class" | "new" | "extends" | "instanceof")) => {
            Some(TokenKind::ClassName)
        }
        _ if next == Some("(") => Some(TokenKind::Function),
        _ => None,
    }
}

/// Text of the next token that is neither whitespace nor a comment
fn next_significant<'src>(
    source: &'src str,
    raw: &[(Option<Raw>, Range<usize>)],
    index: usize,
) -> Option<&'src str> {
    raw[index + 1..]
        .iter()
        .find(|(token, _)| !matches!(token, Some(Raw::Whitespace) | Some(Raw::Comment)))
        .map(|(_, span)| &source[span.clone()])
}
