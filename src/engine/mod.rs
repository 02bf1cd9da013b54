//! The entry-processing pipeline: seen/category filtering and declarative
//! field extraction.

mod extractor;
mod processor;

pub use extractor::{FieldExtractor, MappingError};
pub use processor::EntryProcessor;
