//! campus-assistant: question answering service for ITMO University
//!
//! A question is classified by a language model (multiple choice, open ended
//! or off topic), relevant questions are searched on the university's own
//! sites, and a second model call produces the answer with cited sources.

pub mod config;
pub mod error;
pub mod generation;
pub mod logging;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::AssistantConfig;
pub use error::{Error, Result};
pub use pipeline::Assistant;
pub use server::{AppState, AssistantServer};
pub use types::{AssistantAnswer, PredictionRequest, PredictionResponse, QuestionCategory};
