//! Two-stage question answering pipeline
//!
//! classify → search (relevant questions only) → format → answer → resolve sources

pub mod answerer;
pub mod assistant;
pub mod classifier;

pub use answerer::Answerer;
pub use assistant::{attribution_suffix, Assistant, IRRELEVANT_REASONING};
pub use classifier::Classifier;
