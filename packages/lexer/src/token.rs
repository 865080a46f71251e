use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lexical categories a token can be painted as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    Comment,
    Prolog,
    Doctype,
    Cdata,
    Punctuation,
    Namespace,
    Property,
    Tag,
    Boolean,
    Number,
    Constant,
    Symbol,
    Deleted,
    Selector,
    Attr,
    String,
    Char,
    Builtin,
    Inserted,
    Operator,
    Entity,
    Url,
    Atrule,
    Keyword,
    Function,
    Class,
    Regex,
    Important,
    Variable,
    Bold,
    Italic,
    Parameter,
    ClassName,
}

impl TokenKind {
    pub const ALL: [TokenKind; 33] = [
        TokenKind::Comment,
        TokenKind::Prolog,
        TokenKind::Doctype,
        TokenKind::Cdata,
        TokenKind::Punctuation,
        TokenKind::Namespace,
        TokenKind::Property,
        TokenKind::Tag,
        TokenKind::Boolean,
        TokenKind::Number,
        TokenKind::Constant,
        TokenKind::Symbol,
        TokenKind::Deleted,
        TokenKind::Selector,
        TokenKind::Attr,
        TokenKind::String,
        TokenKind::Char,
        TokenKind::Builtin,
        TokenKind::Inserted,
        TokenKind::Operator,
        TokenKind::Entity,
        TokenKind::Url,
        TokenKind::Atrule,
        TokenKind::Keyword,
        TokenKind::Function,
        TokenKind::Class,
        TokenKind::Regex,
        TokenKind::Important,
        TokenKind::Variable,
        TokenKind::Bold,
        TokenKind::Italic,
        TokenKind::Parameter,
        TokenKind::ClassName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::Prolog => "prolog",
            TokenKind::Doctype => "doctype",
            TokenKind::Cdata => "cdata",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Namespace => "namespace",
            TokenKind::Property => "property",
            TokenKind::Tag => "tag",
            TokenKind::Boolean => "boolean",
            TokenKind::Number => "number",
            TokenKind::Constant => "constant",
            TokenKind::Symbol => "symbol",
            TokenKind::Deleted => "deleted",
            TokenKind::Selector => "selector",
            TokenKind::Attr => "attr",
            TokenKind::String => "string",
            TokenKind::Char => "char",
            TokenKind::Builtin => "builtin",
            TokenKind::Inserted => "inserted",
            TokenKind::Operator => "operator",
            TokenKind::Entity => "entity",
            TokenKind::Url => "url",
            TokenKind::Atrule => "atrule",
            TokenKind::Keyword => "keyword",
            TokenKind::Function => "function",
            TokenKind::Class => "class",
            TokenKind::Regex => "regex",
            TokenKind::Important => "important",
            TokenKind::Variable => "variable",
            TokenKind::Bold => "bold",
            TokenKind::Italic => "italic",
            TokenKind::Parameter => "parameter",
            TokenKind::ClassName => "class-name",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown token kind: {0}")]
pub struct UnknownTokenKind(pub String);

impl FromStr for TokenKind {
    type Err = UnknownTokenKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownTokenKind(s.to_string()))
    }
}

/// A run of `length` consecutive characters sharing one lexical category.
///
/// `kind` is `None` for text the lexer does not classify (whitespace,
/// plain words). `alias`, when present, overrides `kind` for painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: Option<TokenKind>,
    pub alias: Option<TokenKind>,
    pub length: usize,
}

impl Token {
    pub fn new(kind: TokenKind, length: usize) -> Self {
        Self {
            kind: Some(kind),
            alias: None,
            length,
        }
    }

    /// Unclassified text
    pub fn plain(length: usize) -> Self {
        Self {
            kind: None,
            alias: None,
            length,
        }
    }

    pub fn with_alias(mut self, alias: TokenKind) -> Self {
        self.alias = Some(alias);
        self
    }

    /// The category this token is painted as, if any
    pub fn paint_kind(&self) -> Option<TokenKind> {
        self.alias.or(self.kind)
    }
}
