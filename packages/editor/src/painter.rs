//! Maps a flat token list onto highlight ranges over a buffer's text node.

use crate::buffer::EditableBuffer;
use crate::errors::EditorError;
use crate::registry::{HighlightRange, HighlightRegistry};
use codepad_lexer::Token;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaintStats {
    /// Ranges registered by this pass
    pub ranges: usize,
    /// Tokens whose range could not be built
    pub skipped_tokens: usize,
    /// The token stream ran past the end of the text and was cut short
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintOutcome {
    Painted(PaintStats),
    /// The buffer has no text node; its stale ranges were cleared
    Empty,
    /// The precondition did not hold and nothing was touched
    Skipped(EditorError),
}

pub struct TokenPainter<'a> {
    registry: &'a mut HighlightRegistry,
}

impl<'a> TokenPainter<'a> {
    pub fn new(registry: &'a mut HighlightRegistry) -> Self {
        Self { registry }
    }

    /// Replace the buffer's ranges with ranges derived from `tokens`.
    ///
    /// The buffer must hold exactly one text node. Token lengths are expected
    /// to add up to the node length; a longer stream is cut off at the end of
    /// the text, a shorter one leaves the tail unpainted.
    pub fn paint(&mut self, buffer: &EditableBuffer, tokens: &[Token]) -> PaintOutcome {
        let node = match buffer.nodes() {
            [] => {
                self.registry.clear_buffer(buffer.id());
                return PaintOutcome::Empty;
            }
            [node] => node,
            nodes => {
                let error = EditorError::Fragmented { nodes: nodes.len() };
                warn!(fragment = %buffer.fragment(), %error, "Skipping paint");
                return PaintOutcome::Skipped(error);
            }
        };

        let len = node.len();
        self.registry.clear_buffer(buffer.id());

        let mut stats = PaintStats::default();
        let mut pos = 0;

        for (index, token) in tokens.iter().enumerate() {
            if pos >= len {
                stats.truncated = tokens[index..].iter().any(|t| t.length > 0);
                break;
            }

            if let Some(kind) = token.paint_kind() {
                let end = (pos + token.length).min(len);
                match HighlightRange::new(kind, pos, end, len) {
                    Ok(range) => {
                        self.registry.add(buffer.id(), node.id(), range);
                        stats.ranges += 1;
                    }
                    Err(error) => {
                        debug!(%kind, %error, "Skipping token");
                        stats.skipped_tokens += 1;
                    }
                }
            }

            pos += token.length;
        }

        if stats.truncated || pos < len {
            debug!(
                fragment = %buffer.fragment(),
                covered = pos,
                len,
                "Token stream out of step with text"
            );
        }

        PaintOutcome::Painted(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codepad_common::Fragment;
    use codepad_lexer::TokenKind;

    fn buffer(text: &str) -> EditableBuffer {
        EditableBuffer::new(Fragment::Script, text)
    }

    #[test]
    fn test_two_tokens_tile_text() {
        let buf = buffer("ab");
        let mut registry = HighlightRegistry::new();
        let tokens = [
            Token::new(TokenKind::Keyword, 1),
            Token::new(TokenKind::String, 1),
        ];

        let outcome = TokenPainter::new(&mut registry).paint(&buf, &tokens);

        assert_eq!(
            outcome,
            PaintOutcome::Painted(PaintStats {
                ranges: 2,
                ..Default::default()
            })
        );
        assert_eq!(
            registry.ranges_for(buf.id()),
            vec![
                HighlightRange { kind: TokenKind::Keyword, start: 0, end: 1 },
                HighlightRange { kind: TokenKind::String, start: 1, end: 2 },
            ]
        );
    }

    #[test]
    fn test_plain_tokens_are_left_unpainted() {
        let buf = buffer("a b");
        let mut registry = HighlightRegistry::new();
        let tokens = [
            Token::new(TokenKind::Keyword, 1),
            Token::plain(1),
            Token::new(TokenKind::Keyword, 1),
        ];
        TokenPainter::new(&mut registry).paint(&buf, &tokens);

        let ranges = registry.ranges_for(buf.id());
        assert_eq!(ranges.len(), 2);
        assert_eq!((ranges[1].start, ranges[1].end), (2, 3));
    }

    #[test]
    fn test_alias_wins_over_kind() {
        let buf = buffer("x");
        let mut registry = HighlightRegistry::new();
        let tokens = [Token::new(TokenKind::Attr, 1).with_alias(TokenKind::Property)];
        TokenPainter::new(&mut registry).paint(&buf, &tokens);

        assert_eq!(registry.ranges(TokenKind::Property).len(), 1);
        assert!(registry.ranges(TokenKind::Attr).is_empty());
    }

    #[test]
    fn test_overlong_stream_is_clamped_and_truncated() {
        let buf = buffer("abc");
        let mut registry = HighlightRegistry::new();
        let tokens = [
            Token::new(TokenKind::Number, 2),
            Token::new(TokenKind::String, 4),
            Token::new(TokenKind::Comment, 3),
        ];

        let outcome = TokenPainter::new(&mut registry).paint(&buf, &tokens);

        assert_eq!(
            outcome,
            PaintOutcome::Painted(PaintStats {
                ranges: 2,
                skipped_tokens: 0,
                truncated: true,
            })
        );
        let ranges = registry.ranges_for(buf.id());
        assert_eq!(ranges[1], HighlightRange { kind: TokenKind::String, start: 2, end: 3 });
        assert!(registry.ranges(TokenKind::Comment).is_empty());
    }

    #[test]
    fn test_zero_length_token_is_skipped_not_fatal() {
        let buf = buffer("ab");
        let mut registry = HighlightRegistry::new();
        let tokens = [
            Token::new(TokenKind::Operator, 0),
            Token::new(TokenKind::Keyword, 2),
        ];

        let outcome = TokenPainter::new(&mut registry).paint(&buf, &tokens);

        assert_eq!(
            outcome,
            PaintOutcome::Painted(PaintStats {
                ranges: 1,
                skipped_tokens: 1,
                truncated: false,
            })
        );
    }

    #[test]
    fn test_fragmented_buffer_is_skipped_untouched() {
        let mut buf = buffer("ab");
        let mut registry = HighlightRegistry::new();
        TokenPainter::new(&mut registry).paint(&buf, &[Token::new(TokenKind::Keyword, 2)]);

        buf.insert_text("c");
        let outcome = TokenPainter::new(&mut registry).paint(&buf, &[Token::new(TokenKind::String, 3)]);

        assert_eq!(outcome, PaintOutcome::Skipped(EditorError::Fragmented { nodes: 2 }));
        // Old ranges are still there
        assert_eq!(registry.ranges(TokenKind::Keyword).len(), 1);
        assert!(registry.ranges(TokenKind::String).is_empty());
    }

    #[test]
    fn test_empty_buffer_clears_stale_ranges() {
        let mut buf = buffer("ab");
        let mut registry = HighlightRegistry::new();
        TokenPainter::new(&mut registry).paint(&buf, &[Token::new(TokenKind::Keyword, 2)]);

        buf.set_content("");
        let outcome = TokenPainter::new(&mut registry).paint(&buf, &[]);

        assert_eq!(outcome, PaintOutcome::Empty);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_repaint_replaces_only_own_ranges() {
        let markup = EditableBuffer::new(Fragment::Markup, "<a>");
        let script = buffer("if");
        let mut registry = HighlightRegistry::new();
        let mut painter = TokenPainter::new(&mut registry);

        painter.paint(&markup, &[Token::new(TokenKind::Tag, 3)]);
        painter.paint(&script, &[Token::new(TokenKind::Keyword, 2)]);
        painter.paint(&script, &[Token::new(TokenKind::Variable, 2)]);

        assert_eq!(registry.ranges(TokenKind::Tag).len(), 1);
        assert!(registry.ranges(TokenKind::Keyword).is_empty());
        assert_eq!(registry.ranges(TokenKind::Variable).len(), 1);
    }
}
