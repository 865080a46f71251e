//! # Codepad Editor
//!
//! Editable buffers and the incremental highlighting engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ EditableBuffer: keystrokes → text nodes     │
//! │  - fragments on insert, normalize merges    │
//! │  - shadow copy synced on key up             │
//! └─────────────────────────────────────────────┘
//!                     ↓ schedule
//! ┌─────────────────────────────────────────────┐
//! │ HighlightScheduler: one repaint per frame   │
//! └─────────────────────────────────────────────┘
//!                     ↓ tokenize + paint
//! ┌─────────────────────────────────────────────┐
//! │ TokenPainter → HighlightRegistry            │
//! │  - ranges scoped to the painting buffer     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use codepad_common::Fragment;
//! use codepad_editor::{EditorSession, Key};
//! use codepad_lexer::Lexer;
//!
//! let mut session = EditorSession::new();
//! session.key_down(Fragment::Script, Key::Char(';'));
//! session.key_up(Fragment::Script);
//!
//! let report = session.run_frame(&Lexer);
//! assert_eq!(report.painted.len(), 3);
//! ```

mod buffer;
mod errors;
mod painter;
mod registry;
mod scheduler;
mod session;

pub use buffer::{BufferId, EditableBuffer, Key, KeyOutcome, NodeId, Selection, TextNode};
pub use errors::{EditorError, RangeError};
pub use painter::{PaintOutcome, PaintStats, TokenPainter};
pub use registry::{HighlightRange, HighlightRegistry, PaintedRange};
pub use scheduler::{FrameReport, HighlightScheduler, RepaintReason};
pub use session::EditorSession;
