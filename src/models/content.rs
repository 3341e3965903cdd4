// src/models/content.rs

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::question::{Question, QuestionType};

/// The two fixed question sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    /// Middle and high school framing.
    Lower,
    University,
}

/// Where a branch answer leads: the track to walk and the label the
/// submitted record carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSelection {
    pub track: Track,
    pub label: String,
}

/// One accepted answer to the branching question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchOutcome {
    pub value: String,
    pub track: Track,
    pub label: String,
}

/// Lookup table from branching answer to track.
/// Values without an outcome take the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branching {
    pub outcomes: Vec<BranchOutcome>,
    pub fallback: TrackSelection,
}

impl Branching {
    pub fn resolve(&self, value: &str) -> TrackSelection {
        self.outcomes
            .iter()
            .find(|o| o.value == value)
            .map(|o| TrackSelection {
                track: o.track,
                label: o.label.clone(),
            })
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Static UI strings for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiLabels {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub start_btn: String,
    pub back_btn: String,
    pub next_btn: String,
    pub submitting_btn: String,
    pub lowest: String,
    pub highest: String,
    pub placeholder: String,
    pub complete_title: String,
    pub complete_text: String,
    pub return_home: String,
    pub consent_title: String,
    pub consent_text: String,
    pub consent_checkbox: String,
}

/// Everything a survey needs in one language. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyContent {
    pub ui: UiLabels,
    pub initial_question: Question,
    pub branching: Branching,
    pub lower_track: Vec<Question>,
    pub university_track: Vec<Question>,
}

impl SurveyContent {
    pub fn track(&self, track: Track) -> &[Question] {
        match track {
            Track::Lower => &self.lower_track,
            Track::University => &self.university_track,
        }
    }

    /// Finds a question by id in the branching question or either track.
    pub fn find_question(&self, question_id: &str) -> Option<&Question> {
        std::iter::once(&self.initial_question)
            .chain(self.lower_track.iter())
            .chain(self.university_track.iter())
            .find(|q| q.id == question_id)
    }

    /// Checks the structural guarantees navigation relies on.
    pub fn check(&self) -> Result<(), ContentError> {
        if !matches!(
            self.initial_question.question_type,
            QuestionType::SingleChoice | QuestionType::Likert
        ) {
            return Err(ContentError::BranchingNotSingleChoice(
                self.initial_question.id.clone(),
            ));
        }
        check_question(&self.initial_question)?;

        for outcome in &self.branching.outcomes {
            if !self.initial_question.has_option_value(&outcome.value) {
                return Err(ContentError::UnknownBranchValue(outcome.value.clone()));
            }
        }

        for track in [Track::Lower, Track::University] {
            let questions = self.track(track);
            if questions.is_empty() {
                return Err(ContentError::EmptyTrack(track));
            }

            let mut seen = HashSet::new();
            for question in questions {
                if !seen.insert(question.id.as_str()) {
                    return Err(ContentError::DuplicateQuestion(question.id.clone()));
                }
                check_question(question)?;
            }
        }

        Ok(())
    }
}

fn check_question(question: &Question) -> Result<(), ContentError> {
    if question.question_type.has_options() && question.options.is_empty() {
        return Err(ContentError::MissingOptions(question.id.clone()));
    }
    if question.question_type == QuestionType::RatingMatrix && question.sub_questions.is_empty() {
        return Err(ContentError::MissingSubQuestions(question.id.clone()));
    }
    Ok(())
}

/// Structural problems in a loaded content table.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentError {
    BranchingNotSingleChoice(String),
    UnknownBranchValue(String),
    EmptyTrack(Track),
    DuplicateQuestion(String),
    MissingOptions(String),
    MissingSubQuestions(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::BranchingNotSingleChoice(id) => {
                write!(f, "branching question '{}' must be single choice", id)
            }
            ContentError::UnknownBranchValue(value) => {
                write!(f, "branch value '{}' is not an option of the branching question", value)
            }
            ContentError::EmptyTrack(track) => write!(f, "track {:?} has no questions", track),
            ContentError::DuplicateQuestion(id) => write!(f, "question id '{}' appears twice", id),
            ContentError::MissingOptions(id) => write!(f, "question '{}' has no options", id),
            ContentError::MissingSubQuestions(id) => {
                write!(f, "rating matrix '{}' has no sub-questions", id)
            }
        }
    }
}

impl std::error::Error for ContentError {}
