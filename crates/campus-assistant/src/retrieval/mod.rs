//! Web retrieval for search context

pub mod search;

pub use search::WebRetriever;
