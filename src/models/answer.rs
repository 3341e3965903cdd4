// src/models/answer.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A stored answer. The shape follows the question type:
/// single choice, Likert and free text keep a `Text`, multi choice keeps
/// `Selections`, a rating matrix keeps `Ratings` keyed by sub-question id.
///
/// Serialized untagged, so the stored JSON is a plain string, a string array
/// or an object of integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Selections(Vec<String>),
    Ratings(BTreeMap<String, u8>),
}

/// Session-scoped answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore(BTreeMap<String, Answer>);

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.0.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Answer)> {
        self.0.iter()
    }

    /// Replaces whatever was stored for `question_id`.
    pub fn set(&mut self, question_id: impl Into<String>, answer: Answer) {
        self.0.insert(question_id.into(), answer);
    }

    /// Toggles `value` in a multi-choice selection.
    ///
    /// A present value is removed. An absent value is appended unless the
    /// selection already holds `max_select` entries, in which case nothing
    /// changes. A non-list entry is replaced by a fresh selection.
    pub fn toggle(&mut self, question_id: &str, value: &str, max_select: Option<usize>) {
        let mut current = match self.0.get(question_id) {
            Some(Answer::Selections(values)) => values.clone(),
            _ => Vec::new(),
        };

        if let Some(pos) = current.iter().position(|v| v == value) {
            current.remove(pos);
        } else {
            if max_select.is_some_and(|max| current.len() >= max) {
                return;
            }
            current.push(value.to_string());
        }

        self.0
            .insert(question_id.to_string(), Answer::Selections(current));
    }

    /// Merges one sub-question rating into a rating-matrix answer.
    /// Other sub-ratings are kept. The range is the caller's business.
    pub fn rate(&mut self, question_id: &str, sub_question_id: &str, rating: u8) {
        let entry = self
            .0
            .entry(question_id.to_string())
            .or_insert_with(|| Answer::Ratings(BTreeMap::new()));

        match entry {
            Answer::Ratings(ratings) => {
                ratings.insert(sub_question_id.to_string(), rating);
            }
            other => {
                *other = Answer::Ratings(BTreeMap::from([(sub_question_id.to_string(), rating)]));
            }
        }
    }
}
