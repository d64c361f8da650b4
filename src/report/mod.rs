//! Report module - metrics, training report, mapping export and console summary

pub mod mapping_export;
pub mod metrics;
pub mod summary;
pub mod training_report;

pub use mapping_export::*;
pub use metrics::*;
pub use summary::*;
pub use training_report::*;
