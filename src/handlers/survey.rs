// src/handlers/survey.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{answer::Answer, question::Question, response::SubmissionDraft},
    state::AppState,
    survey::{Advance, AnswerInput, Position, Retreat, SessionEntry, SurveyError, SurveySession},
};

const MAX_TEXT_LENGTH: usize = 5000;

/// DTO for opening a survey session.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[serde(default)]
    #[validate(length(min = 2, max = 16))]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StepCounter {
    pub current: usize,
    pub total: usize,
}

/// Snapshot of a session for the client.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub language: String,
    pub position: Position,
    pub track_label: Option<String>,
    pub question: Question,
    pub answer: Option<Answer>,
    pub can_proceed: bool,
    pub progress: f64,
    pub step: Option<StepCounter>,
    pub submitting: bool,
}

impl SessionView {
    fn new(id: Uuid, entry: &SessionEntry) -> Self {
        let session = &entry.session;
        Self {
            id,
            language: entry.language.clone(),
            position: session.position(),
            track_label: session.selection().map(|s| s.label.clone()),
            question: session.current_question().clone(),
            answer: session.current_answer().cloned(),
            can_proceed: session.can_proceed(),
            progress: session.progress_fraction(),
            step: session
                .step()
                .map(|(current, total)| StepCounter { current, total }),
            submitting: session.is_pending(),
        }
    }
}

/// Result of a navigation request.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepResponse {
    InProgress { session: SessionView },
    Complete { record_id: String },
    /// The user stepped back out of the survey; the session is gone.
    Home,
}

enum Forward {
    Moved(SessionView),
    Submit(SubmissionDraft),
}

/// Opens a new session at the branching question.
pub async fn create_session(
    State(state): State<AppState>,
    payload: Option<Json<CreateSessionRequest>>,
) -> Result<impl IntoResponse, AppError> {
    // No body, or no JSON content type: open in the default language.
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let requested = payload
        .language
        .unwrap_or_else(|| state.catalog.default_language().to_string());
    let (language, content) = state.catalog.content(&requested);
    let language = language.to_string();

    let view = state
        .sessions
        .open(language, SurveySession::new(content), SessionView::new)
        .await;

    tracing::info!("Opened survey session {} ({})", view.id, view.language);

    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let view = state
        .sessions
        .with_session(id, |entry| SessionView::new(id, entry))
        .await?;

    Ok(Json(view))
}

/// Records one answer for the current question.
///
/// * Rejects input while a submission is in flight (409).
/// * Rejects values that are not options of the question, unknown
///   sub-questions, ratings outside 1..=5 and oversized text (400).
pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AnswerInput>,
) -> Result<impl IntoResponse, AppError> {
    let view = state
        .sessions
        .with_session(id, |entry| -> Result<SessionView, AppError> {
            if entry.session.is_pending() {
                return Err(SurveyError::SubmissionPending.into());
            }
            check_input(entry.session.current_question(), &input)?;
            entry.session.answer(input)?;
            Ok(SessionView::new(id, entry))
        })
        .await??;

    Ok(Json(view))
}

/// Moves to the next question, or submits on the last one.
///
/// * Unanswered current question: 400, session unchanged.
/// * Submission already in flight: 409.
/// * Store failure: 503, session stays on its last question for a manual retry.
/// * A dropped request does not abandon the submission; the session is
///   settled the same way once the store answers.
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let step = state
        .sessions
        .with_session(id, |entry| match entry.session.advance() {
            Advance::Moved => Ok(Forward::Moved(SessionView::new(id, entry))),
            Advance::Submit(draft) => Ok(Forward::Submit(draft)),
            Advance::Blocked => Err(AppError::BadRequest(
                "Current question is not answered".to_string(),
            )),
            Advance::Pending => Err(AppError::from(SurveyError::SubmissionPending)),
        })
        .await??;

    let draft = match step {
        Forward::Submit(draft) => draft,
        Forward::Moved(session) => return Ok(Json(StepResponse::InProgress { session })),
    };

    // The registry lock is released here; other sessions keep moving.
    // The task settles the session even if this request is dropped.
    let record_id = tokio::spawn(submit_draft(state, id, draft))
        .await
        .map_err(|e| AppError::InternalServerError(format!("Submission task failed: {}", e)))??;

    Ok(Json(StepResponse::Complete { record_id }))
}

/// Stores the draft, then drops the session on success or clears its
/// pending flag on failure.
async fn submit_draft(
    state: AppState,
    id: Uuid,
    draft: SubmissionDraft,
) -> Result<String, AppError> {
    match state.store.submit(draft).await {
        Ok(record_id) => {
            state.sessions.remove(id).await;
            tracing::info!("Survey session {} completed as {}", id, record_id);
            Ok(record_id)
        }
        Err(e) => {
            // The session can only be gone if it was abandoned or swept meanwhile.
            let _ = state
                .sessions
                .with_session(id, |entry| entry.session.submission_failed())
                .await;
            Err(e)
        }
    }
}

/// Moves back one question. Stepping back from the branching question
/// leaves the survey and discards the session.
pub async fn retreat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state
        .sessions
        .with_session(id, |entry| match entry.session.retreat() {
            Retreat::Moved => Ok(Some(SessionView::new(id, entry))),
            Retreat::ExitHome => Ok(None),
            Retreat::Pending => Err(AppError::from(SurveyError::SubmissionPending)),
        })
        .await??;

    match outcome {
        Some(session) => Ok(Json(StepResponse::InProgress { session })),
        None => {
            state.sessions.remove(id).await;
            tracing::debug!("Survey session {} returned home", id);
            Ok(Json(StepResponse::Home))
        }
    }
}

/// Abandons a session. Nothing is persisted.
pub async fn abandon_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound("Survey session not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

fn check_input(question: &Question, input: &AnswerInput) -> Result<(), AppError> {
    match input {
        AnswerInput::Choice { value } | AnswerInput::Toggle { value } => {
            if !question.has_option_value(value) {
                return Err(AppError::BadRequest(format!(
                    "'{}' is not an option of question '{}'",
                    value, question.id
                )));
            }
        }
        AnswerInput::Rating {
            sub_question_id,
            rating,
        } => {
            if !question.has_sub_question(sub_question_id) {
                return Err(AppError::BadRequest(format!(
                    "'{}' is not a sub-question of '{}'",
                    sub_question_id, question.id
                )));
            }
            if !(1..=5).contains(rating) {
                return Err(AppError::BadRequest(
                    "Rating must be between 1 and 5".to_string(),
                ));
            }
        }
        AnswerInput::Text { value } => {
            if value.chars().count() > MAX_TEXT_LENGTH {
                return Err(AppError::BadRequest(format!(
                    "Answer must be at most {} characters",
                    MAX_TEXT_LENGTH
                )));
            }
        }
    }
    Ok(())
}
