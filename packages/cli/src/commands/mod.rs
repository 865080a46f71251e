pub mod highlight;
pub mod init;
pub mod render;
pub mod serve;

pub use highlight::{highlight, HighlightArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use serve::{serve, ServeArgs};
