//! Provider abstractions for the language model and web search
//!
//! Pipeline stages only see these traits, so backends can be swapped or
//! replaced with scripted fakes in tests.

pub mod llm;
pub mod mock;
pub mod openai;
pub mod search;
pub mod tavily;

pub use llm::{ChatMessage, LlmProvider, OutputSchema, Role};
pub use openai::OpenAiClient;
pub use search::SearchProvider;
pub use tavily::TavilyClient;
