//! Typed outputs of the classifier and answer stages
//!
//! Model responses arrive as loose JSON. They are converted into these types
//! immediately after the call, so anything past this point can rely on the
//! contract holding.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, Stage};

/// Highest option number a multiple-choice answer may carry
pub const MAX_OPTION: u8 = 10;

/// Kind of question as decided by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    /// Question lists numbered options
    MultipleChoice,
    /// Free-form question without options
    OpenEnded,
    /// Question is outside the service's subject
    Irrelevant,
}

impl QuestionCategory {
    /// Map the classifier's `is_variants` code to a category
    ///
    /// `1` and `2` are the two answerable kinds; `0` and every other value
    /// are treated as irrelevant.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::MultipleChoice,
            2 => Self::OpenEnded,
            _ => Self::Irrelevant,
        }
    }

    /// Whether search and answer stages should run
    pub fn is_relevant(&self) -> bool {
        !matches!(self, Self::Irrelevant)
    }
}

#[derive(Deserialize)]
struct RawClassification {
    is_variants: i64,
    #[serde(default)]
    search_query: String,
}

/// Result of the classifier stage
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: QuestionCategory,
    pub search_query: String,
}

impl Classification {
    /// Validate a raw classifier response
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawClassification = serde_json::from_value(value)
            .map_err(|e| Error::schema(Stage::Classifier, e.to_string()))?;

        if !matches!(raw.is_variants, 0..=2) {
            tracing::warn!(
                "Classifier returned unknown category code {}, treating as irrelevant",
                raw.is_variants
            );
        }
        let category = QuestionCategory::from_code(raw.is_variants);
        let search_query = raw.search_query.trim().to_string();

        if category.is_relevant() && search_query.is_empty() {
            return Err(Error::schema(
                Stage::Classifier,
                "search_query is empty for a relevant question",
            ));
        }

        Ok(Self {
            category,
            search_query,
        })
    }
}

#[derive(Deserialize)]
struct RawAnswer {
    answer: Option<i64>,
    reasoning: String,
    sources: Vec<i64>,
}

/// Result of the answer stage, before source indices are resolved
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerDraft {
    /// Option as emitted by the model; only checked for multiple-choice questions
    pub answer: Option<i64>,
    pub reasoning: String,
    /// 1-based positions in the search context shown to the model
    pub sources: Vec<usize>,
}

impl AnswerDraft {
    /// Validate a raw answer-stage response
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawAnswer = serde_json::from_value(value)
            .map_err(|e| Error::schema(Stage::Answerer, e.to_string()))?;

        let sources = raw
            .sources
            .into_iter()
            .map(|index| {
                usize::try_from(index)
                    .ok()
                    .filter(|i| *i >= 1)
                    .ok_or_else(|| {
                        Error::schema(
                            Stage::Answerer,
                            format!("source index {} is below 1", index),
                        )
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            answer: raw.answer,
            reasoning: raw.reasoning,
            sources,
        })
    }

    /// The chosen option of a multiple-choice answer, checked against 1..=10
    pub fn choice(&self) -> Result<Option<u8>> {
        match self.answer {
            None => Ok(None),
            Some(n) if (1..=MAX_OPTION as i64).contains(&n) => Ok(Some(n as u8)),
            Some(n) => Err(Error::schema(
                Stage::Answerer,
                format!("answer {} is outside 1..={}", n, MAX_OPTION),
            )),
        }
    }
}

/// Final pipeline output with sources resolved to URLs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantAnswer {
    pub answer: Option<u8>,
    pub reasoning: String,
    pub sources: Vec<String>,
}
