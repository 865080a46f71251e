pub mod defaults;
pub mod error;
pub mod fragment;

pub use defaults::*;
pub use error::*;
pub use fragment::*;
