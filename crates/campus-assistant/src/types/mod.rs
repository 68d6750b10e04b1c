//! Core types for the assistant

pub mod answer;
pub mod request;
pub mod search;

pub use answer::{AnswerDraft, AssistantAnswer, Classification, QuestionCategory};
pub use request::{PredictionRequest, PredictionResponse};
pub use search::{SearchHit, SearchRequest};
