//! Prompt templates and output schemas for both model stages

use serde_json::json;

use crate::providers::{ChatMessage, OutputSchema};

/// Prompt builder for the classifier and answer stages
pub struct PromptBuilder;

impl PromptBuilder {
    /// Classifier conversation: the bare question
    pub fn classifier_messages(question: &str) -> Vec<ChatMessage> {
        vec![ChatMessage::user(format!("QUESTION: {}", question))]
    }

    /// Answer conversation: the question followed by the search context
    pub fn answer_messages(question: &str, search_results: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::user(format!("QUESTION: {}", question)),
            ChatMessage::assistant(format!("SEARCH_RESULTS:\n{}", search_results)),
        ]
    }

    /// Contract for the classifier stage
    ///
    /// `is_variants`: 0 irrelevant, 1 multiple-choice, 2 open-ended.
    pub fn classifier_schema() -> OutputSchema {
        OutputSchema {
            name: "itmo-info-chooser",
            description: "Система оценки вопросов об университете ИТМО. Осуществляет \
                          переформулирование вопроса для поиска доп. информации в сети.",
            schema: json!({
                "title": "itmo-info-chooser",
                "type": "object",
                "properties": {
                    "is_variants": {
                        "description": "0 - если вопрос не связан с университетом ИТМО, \
                                        1 - если вопрос содержит варианты ответа, \
                                        2 - если вопрос без вариантов ответа",
                        "type": "integer",
                        "enum": [0, 1, 2]
                    },
                    "search_query": {
                        "description": "Сформулируй содержательный текстовый запрос к поисковой \
                                        системе для получения необходимой информации для ответа \
                                        на вопрос!",
                        "type": "string"
                    }
                },
                "required": ["is_variants", "search_query"]
            }),
        }
    }

    /// Contract for the answer stage
    pub fn answer_schema() -> OutputSchema {
        OutputSchema {
            name: "itmo-answers",
            description: "Ты - гениальный знаток истории университета ИТМО! Ты знаешь всё об \
                          этом вузе и можешь дать точный ответ на поставленный вопрос из блока \
                          QUESTION! Ты можешь использовать информацию в блоках SEARCH_RESULTS \
                          для составления ответа",
            schema: json!({
                "title": "itmo-answers",
                "type": "object",
                "properties": {
                    "answer": {
                        "description": "Номер правильного ответа на поставленный вопрос. Если \
                                        вопрос не предполагает выбор из вариантов, то выведи null!",
                        "type": ["integer", "null"],
                        "minimum": 1,
                        "maximum": 10
                    },
                    "reasoning": {
                        "description": "Объяснение ответа или дополнительная информация по \
                                        вопросу. Если в вопросе нет вариантов ответа, то здесь \
                                        должен быть дан развернутый ответ! (не более 2-3 предложений)",
                        "type": "string"
                    },
                    "sources": {
                        "description": "Список номеров ссылок на используемые в ответе ресурсы \
                                        из SEARCH_RESULTS. Если нет ссылок, то вернуть пустой array",
                        "type": "array",
                        "items": {
                            "description": "Номер URL ссылки с используемой для ответа информацией",
                            "type": "integer",
                            "minimum": 1
                        }
                    }
                },
                "required": ["answer", "reasoning", "sources"]
            }),
        }
    }
}
