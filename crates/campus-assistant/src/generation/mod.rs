//! Prompt construction, search context formatting and citation handling

pub mod citation;
pub mod format;
pub mod prompt;

pub use citation::resolve_sources;
pub use format::{build_context, format_search_results, FALLBACK_CONTEXT};
pub use prompt::PromptBuilder;
