//! Pipeline module - column roles, encoding, assembly, split and training

pub mod assembler;
pub mod columns;
pub mod config;
pub mod encoder;
pub mod error;
pub mod loader;
pub mod model;
pub mod run;
pub mod scaler;
pub mod split;
pub mod target;

pub use assembler::*;
pub use columns::*;
pub use config::*;
pub use encoder::*;
pub use error::*;
pub use loader::*;
pub use model::*;
pub use run::*;
pub use scaler::*;
pub use split::*;
pub use target::*;
