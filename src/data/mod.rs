//! Data module - CSV loading and derived columns

mod loader;
mod processor;

pub use loader::DataLoader;
pub use processor::{AgeBand, DataProcessor, AGE_CATEGORY_COLUMN};
