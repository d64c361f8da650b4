//! heartprep: encode a health-survey CSV into a numeric feature matrix and
//! train a class-balanced logistic classifier on it.
//!
//! The library exposes the encoding and training pipeline so integration
//! tests and benchmarks can drive it without the console front end.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
