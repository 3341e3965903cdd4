// src/models/question.rs

use serde::{Deserialize, Serialize};

/// The five kinds of prompt a survey can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultiChoice,
    RatingMatrix,
    Likert,
    Text,
}

impl QuestionType {
    /// Single choice, multi choice and Likert questions carry options.
    pub fn has_options(self) -> bool {
        matches!(
            self,
            QuestionType::SingleChoice | QuestionType::MultiChoice | QuestionType::Likert
        )
    }
}

/// One selectable option. `value` is what ends up in the answer store,
/// `id` only identifies the option inside its question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
    pub value: String,
}

/// A row of a rating matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubQuestion {
    pub id: String,
    pub text: String,
}

/// A single prompt, as supplied by the content catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_questions: Vec<SubQuestion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_select: Option<usize>,

    /// Upper bound on multi-choice selections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_select: Option<usize>,
}

impl Question {
    pub fn has_option_value(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn has_sub_question(&self, sub_question_id: &str) -> bool {
        self.sub_questions.iter().any(|s| s.id == sub_question_id)
    }
}
