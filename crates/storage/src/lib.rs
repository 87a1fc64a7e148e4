#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::{JsonFileSource, parse_glossary};
pub use repository::{InMemorySource, StorageError, TermSource};
