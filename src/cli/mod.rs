//! CLI module - argument parsing and the two job runners

pub mod args;
pub mod encode;
pub mod train;

pub use args::*;
pub use encode::run_encode;
pub use train::run_train;
