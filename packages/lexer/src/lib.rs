//! # Codepad Lexer
//!
//! Turns editor text into a flat, ordered token list for highlighting.
//!
//! The lexers are lexical approximations: they know nothing about nesting
//! between languages and never fail. Anything they do not recognise becomes
//! a token without a kind, so the lengths of the returned tokens always add
//! up to the length of the input.

mod lexer;
mod markup;
mod script;
mod styles;
mod token;

pub use lexer::{tokenize, Lexer, Tokenize};
pub use token::{Token, TokenKind, UnknownTokenKind};
