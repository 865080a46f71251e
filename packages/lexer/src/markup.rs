//! Markup (HTML) lexer

use crate::lexer::TokenStreamBuilder;
use crate::token::{Token, TokenKind};
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Raw {
    #[regex(r"<!--([^-]|-[^-])*-->")]
    Comment,

    #[regex(r"<![dD][oO][cC][tT][yY][pP][eE][^>]*>")]
    Doctype,

    #[regex(r"<!\[CDATA\[([^\]]|\][^\]])*\]\]>")]
    Cdata,

    /// `<name` or `</name`
    #[regex(r"</?[a-zA-Z][a-zA-Z0-9:-]*")]
    TagOpen,

    #[token(">")]
    #[token("/>")]
    TagEnd,

    #[regex(r"[a-zA-Z_:][a-zA-Z0-9_:.-]*")]
    Name,

    #[token("=")]
    Eq,

    // Quoted runs may not cross a `<`, so apostrophes in text cannot swallow tags
    #[regex(r#""[^"<]*""#)]
    #[regex(r"'[^'<]*'")]
    Quoted,

    #[regex(r"&[a-zA-Z][a-zA-Z0-9]*;")]
    #[regex(r"&#[0-9]+;")]
    #[regex(r"&#[xX][0-9a-fA-F]+;")]
    Entity,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
}

pub(crate) fn tokenize(source: &str) -> Vec<Token> {
    let mut builder = TokenStreamBuilder::new(source);
    let mut in_tag = false;

    for (raw, span) in Raw::lexer(source).spanned() {
        let kind = match raw {
            Ok(Raw::Comment) => Some(TokenKind::Comment),
            Ok(Raw::Doctype) => Some(TokenKind::Doctype),
            Ok(Raw::Cdata) => Some(TokenKind::Cdata),
            Ok(Raw::Entity) => Some(TokenKind::Entity),
            Ok(Raw::TagOpen) => {
                in_tag = true;
                Some(TokenKind::Tag)
            }
            Ok(Raw::TagEnd) if in_tag => {
                in_tag = false;
                Some(TokenKind::Punctuation)
            }
            Ok(Raw::Name) if in_tag => Some(TokenKind::Attr),
            Ok(Raw::Eq) if in_tag => Some(TokenKind::Punctuation),
            Ok(Raw::Quoted) if in_tag => Some(TokenKind::String),
            // Outside a tag everything else is text content
            _ => None,
        };
        builder.push(span, kind);
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(Option<TokenKind>, String)> {
        let mut chars = source.chars();
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind, chars.by_ref().take(t.length).collect()))
            .collect()
    }

    #[test]
    fn test_tag_with_attribute() {
        let tokens = kinds(r#"<a href="/x">go</a>"#);
        assert_eq!(
            tokens,
            vec![
                (Some(TokenKind::Tag), "<a".to_string()),
                (None, " ".to_string()),
                (Some(TokenKind::Attr), "href".to_string()),
                (Some(TokenKind::Punctuation), "=".to_string()),
                (Some(TokenKind::String), "\"/x\"".to_string()),
                (Some(TokenKind::Punctuation), ">".to_string()),
                (None, "go".to_string()),
                (Some(TokenKind::Tag), "</a".to_string()),
                (Some(TokenKind::Punctuation), ">".to_string()),
            ]
        );
    }

    #[test]
    fn test_text_content_is_plain() {
        let tokens = kinds("<p>it's a = b's</p>");
        assert_eq!(tokens[2], (None, "it's a = b's".to_string()));
        assert_eq!(tokens[3].0, Some(TokenKind::Tag));
    }

    #[test]
    fn test_doctype_comment_and_entity() {
        let tokens = kinds("<!DOCTYPE html><!-- hi -->&amp;");
        assert_eq!(tokens[0], (Some(TokenKind::Doctype), "<!DOCTYPE html>".to_string()));
        assert_eq!(tokens[1], (Some(TokenKind::Comment), "<!-- hi -->".to_string()));
        assert_eq!(tokens[2], (Some(TokenKind::Entity), "&amp;".to_string()));
    }

    #[test]
    fn test_self_closing_tag() {
        let tokens = kinds("<br/>");
        assert_eq!(tokens[0].0, Some(TokenKind::Tag));
        assert_eq!(tokens[1], (Some(TokenKind::Punctuation), "/>".to_string()));
    }
}
