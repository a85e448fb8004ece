pub mod dataset;
pub mod errors;

pub use dataset::{Dataset, FileSummary};
