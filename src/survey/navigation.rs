// src/survey/navigation.rs

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    models::{
        answer::{Answer, AnswerStore},
        content::{SurveyContent, Track, TrackSelection},
        question::{Question, QuestionType},
        response::SubmissionDraft,
    },
    survey::validation::can_proceed,
};

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Position {
    /// Showing the branching question.
    PreTrack,
    /// `index` is always below the track length.
    InTrack { track: Track, index: usize },
}

/// Outcome of a forward step.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Moved,
    /// Current question is not answered; nothing changed.
    Blocked,
    /// A submission is in flight; nothing changed.
    Pending,
    /// Last question done. The session is now pending until the caller
    /// reports the outcome of storing the draft.
    Submit(SubmissionDraft),
}

/// Outcome of a backward step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Moved,
    /// Stepped back from the branching question: leave the survey.
    ExitHome,
    Pending,
}

/// One user input aimed at the current question.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerInput {
    /// Single choice or Likert.
    Choice { value: String },
    /// Multi choice; selects or deselects one value.
    Toggle { value: String },
    /// One row of a rating matrix. Values that do not fit a stored rating
    /// are rejected.
    Rating { sub_question_id: String, rating: i64 },
    Text { value: String },
}

impl AnswerInput {
    fn fits(&self, question_type: QuestionType) -> bool {
        matches!(
            (self, question_type),
            (
                AnswerInput::Choice { .. },
                QuestionType::SingleChoice | QuestionType::Likert
            ) | (AnswerInput::Toggle { .. }, QuestionType::MultiChoice)
                | (AnswerInput::Rating { .. }, QuestionType::RatingMatrix)
                | (AnswerInput::Text { .. }, QuestionType::Text)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurveyError {
    SubmissionPending,
    RatingOutOfRange(i64),
    AnswerMismatch {
        question_id: String,
        question_type: QuestionType,
    },
}

impl fmt::Display for SurveyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurveyError::SubmissionPending => write!(f, "a submission is already in progress"),
            SurveyError::RatingOutOfRange(rating) => write!(f, "rating {} is out of range", rating),
            SurveyError::AnswerMismatch {
                question_id,
                question_type,
            } => write!(
                f,
                "answer kind does not fit question '{}' of type {:?}",
                question_id, question_type
            ),
        }
    }
}

impl std::error::Error for SurveyError {}

/// One survey attempt: its answers and its place in the flow.
#[derive(Debug, Clone)]
pub struct SurveySession {
    content: Arc<SurveyContent>,
    answers: AnswerStore,
    position: Position,
    selection: Option<TrackSelection>,
    pending: bool,
}

impl SurveySession {
    pub fn new(content: Arc<SurveyContent>) -> Self {
        Self {
            content,
            answers: AnswerStore::new(),
            position: Position::PreTrack,
            selection: None,
            pending: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn selection(&self) -> Option<&TrackSelection> {
        self.selection.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn current_question(&self) -> &Question {
        match self.position {
            Position::PreTrack => &self.content.initial_question,
            Position::InTrack { track, index } => &self.content.track(track)[index],
        }
    }

    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers.get(&self.current_question().id)
    }

    pub fn can_proceed(&self) -> bool {
        can_proceed(self.current_question(), &self.answers)
    }

    /// 0 before a track is chosen, then `(index + 1) / len`.
    pub fn progress_fraction(&self) -> f64 {
        match self.position {
            Position::PreTrack => 0.0,
            Position::InTrack { track, index } => {
                (index + 1) as f64 / self.content.track(track).len() as f64
            }
        }
    }

    /// 1-based step and track length, once on a track.
    pub fn step(&self) -> Option<(usize, usize)> {
        match self.position {
            Position::PreTrack => None,
            Position::InTrack { track, index } => {
                Some((index + 1, self.content.track(track).len()))
            }
        }
    }

    /// Applies `input` to the current question.
    pub fn answer(&mut self, input: AnswerInput) -> Result<(), SurveyError> {
        if self.pending {
            return Err(SurveyError::SubmissionPending);
        }

        let question = self.current_question();
        if !input.fits(question.question_type) {
            return Err(SurveyError::AnswerMismatch {
                question_id: question.id.clone(),
                question_type: question.question_type,
            });
        }

        let question_id = question.id.clone();
        let max_select = question.max_select;

        match input {
            AnswerInput::Choice { value } | AnswerInput::Text { value } => {
                self.answers.set(question_id, Answer::Text(value));
            }
            AnswerInput::Toggle { value } => {
                self.answers.toggle(&question_id, &value, max_select);
            }
            AnswerInput::Rating {
                sub_question_id,
                rating,
            } => {
                let rating =
                    u8::try_from(rating).map_err(|_| SurveyError::RatingOutOfRange(rating))?;
                self.answers.rate(&question_id, &sub_question_id, rating);
            }
        }

        Ok(())
    }

    pub fn advance(&mut self) -> Advance {
        if self.pending {
            return Advance::Pending;
        }
        if !self.can_proceed() {
            return Advance::Blocked;
        }

        match self.position {
            Position::PreTrack => {
                let Some(Answer::Text(value)) = self.current_answer() else {
                    return Advance::Blocked;
                };
                let selection = self.content.branching.resolve(value);
                tracing::debug!(
                    "Branch '{}' selected track {:?} ({})",
                    value,
                    selection.track,
                    selection.label
                );
                self.position = Position::InTrack {
                    track: selection.track,
                    index: 0,
                };
                self.selection = Some(selection);
                Advance::Moved
            }
            Position::InTrack { track, index } => {
                if index + 1 < self.content.track(track).len() {
                    self.position = Position::InTrack {
                        track,
                        index: index + 1,
                    };
                    return Advance::Moved;
                }

                let track_label = match &self.selection {
                    Some(selection) => selection.label.clone(),
                    None => self.content.branching.fallback.label.clone(),
                };
                self.pending = true;
                Advance::Submit(SubmissionDraft {
                    track_label,
                    answers: self.answers.clone(),
                })
            }
        }
    }

    pub fn retreat(&mut self) -> Retreat {
        if self.pending {
            return Retreat::Pending;
        }

        match self.position {
            Position::PreTrack => Retreat::ExitHome,
            Position::InTrack { index: 0, .. } => {
                self.position = Position::PreTrack;
                Retreat::Moved
            }
            Position::InTrack { track, index } => {
                self.position = Position::InTrack {
                    track,
                    index: index - 1,
                };
                Retreat::Moved
            }
        }
    }

    /// The store rejected the draft. The session stays on its last question
    /// so the user can try again.
    pub fn submission_failed(&mut self) {
        self.pending = false;
    }
}
