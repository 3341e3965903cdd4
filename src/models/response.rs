// src/models/response.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

use crate::models::{
    answer::{Answer, AnswerStore},
    content::SurveyContent,
    question::QuestionType,
};

/// Represents the 'survey_responses' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SubmittedRecord {
    pub id: String,

    /// Label of the branch taken, e.g. 'middle_school' or 'university'.
    pub track_label: String,

    /// Final answer store, stored as a JSON object.
    pub answers: Json<AnswerStore>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// What a finished session hands to the submission store.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionDraft {
    pub track_label: String,
    pub answers: AnswerStore,
}

/// Aggregated view for the admin dashboard.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponseStats {
    pub total: usize,

    /// Record count per track label.
    pub by_track: BTreeMap<String, usize>,

    /// Question id -> option value -> number of records choosing it.
    pub choices: BTreeMap<String, BTreeMap<String, usize>>,

    /// Question id -> sub-question id -> mean rating.
    pub ratings: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ResponseStats {
    /// Groups and counts records. Question types come from `content`;
    /// answers to questions it does not know, and free text, are skipped.
    pub fn from_records(records: &[SubmittedRecord], content: &SurveyContent) -> Self {
        let mut stats = ResponseStats {
            total: records.len(),
            ..Default::default()
        };
        let mut rating_sums: BTreeMap<String, BTreeMap<String, (u64, u64)>> = BTreeMap::new();

        for record in records {
            *stats.by_track.entry(record.track_label.clone()).or_default() += 1;

            for (question_id, answer) in record.answers.iter() {
                let Some(question) = content.find_question(question_id) else {
                    continue;
                };

                match (question.question_type, answer) {
                    (QuestionType::SingleChoice | QuestionType::Likert, Answer::Text(value)) => {
                        *stats
                            .choices
                            .entry(question_id.clone())
                            .or_default()
                            .entry(value.clone())
                            .or_default() += 1;
                    }
                    (QuestionType::MultiChoice, Answer::Selections(values)) => {
                        let counts = stats.choices.entry(question_id.clone()).or_default();
                        for value in values {
                            *counts.entry(value.clone()).or_default() += 1;
                        }
                    }
                    (QuestionType::RatingMatrix, Answer::Ratings(ratings)) => {
                        let sums = rating_sums.entry(question_id.clone()).or_default();
                        for (sub_id, rating) in ratings {
                            let (sum, count) = sums.entry(sub_id.clone()).or_default();
                            *sum += u64::from(*rating);
                            *count += 1;
                        }
                    }
                    _ => {}
                }
            }
        }

        stats.ratings = rating_sums
            .into_iter()
            .map(|(question_id, subs)| {
                let means = subs
                    .into_iter()
                    .map(|(sub_id, (sum, count))| (sub_id, sum as f64 / count as f64))
                    .collect();
                (question_id, means)
            })
            .collect();

        stats
    }
}
