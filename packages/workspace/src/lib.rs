pub mod backend;
pub mod composer;
pub mod config;
pub mod formatter;
pub mod server;
pub mod store;
pub mod submit;

pub use backend::{AssetBackend, DirectoryBackend, MemoryBackend};
pub use composer::{compose, PreviewComposer};
pub use config::{Config, ConfigError, RenderMode, SubmitResponse, DEFAULT_CONFIG_NAME};
pub use formatter::{FormatError, Formatter, MarkupIndenter, Passthrough};
pub use server::{open_store, router, serve, AppState};
pub use store::{Asset, AssetOrigin, AssetStore, Snapshot, StoreError};
pub use submit::{SubmitForm, SubmitPipeline};
