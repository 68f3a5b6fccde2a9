pub mod collect;
pub mod config;
pub mod error;
pub mod extract;
pub mod graph;
pub mod merge;
pub mod pipeline;
pub mod report;

pub use error::AmalgamateError;
pub use pipeline::{run, Options};
