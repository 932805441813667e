//! Data module - Loading and aggregation

pub mod columns;

mod aggregator;
mod loader;

pub use aggregator::{AggregateError, Aggregator, StateTotal, Summary};
pub use loader::{DatasetLoader, Datasets, LoaderError, DATA_DIR};
