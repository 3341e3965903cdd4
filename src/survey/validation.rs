// src/survey/validation.rs

use crate::models::{
    answer::{Answer, AnswerStore},
    question::{Question, QuestionType},
};

/// Decides whether `question` is answered well enough to move on.
///
/// * Single choice / Likert: a non-empty string.
/// * Multi choice: a non-empty selection, at least `min_select` long when declared.
/// * Free text: non-empty after trimming. The stored text itself is left as typed.
/// * Rating matrix: a rating for every declared sub-question.
///
/// A missing entry, or one whose shape does not match the type, fails.
pub fn can_proceed(question: &Question, answers: &AnswerStore) -> bool {
    let Some(answer) = answers.get(&question.id) else {
        return false;
    };

    match (question.question_type, answer) {
        (QuestionType::SingleChoice | QuestionType::Likert, Answer::Text(value)) => {
            !value.is_empty()
        }
        (QuestionType::MultiChoice, Answer::Selections(values)) => {
            !values.is_empty() && values.len() >= question.min_select.unwrap_or(1)
        }
        (QuestionType::Text, Answer::Text(value)) => !value.trim().is_empty(),
        (QuestionType::RatingMatrix, Answer::Ratings(ratings)) => question
            .sub_questions
            .iter()
            .all(|sub| ratings.contains_key(&sub.id)),
        _ => false,
    }
}
