//! Interaction state machine for one roast session.
//!
//! ```text
//! Idle ──begin_roast──▶ Roasting ──complete(ok)──▶ Results
//!  ▲                        │    └─complete(err)─▶ Failed
//!  └──────── clear ◀────────┴──── (from any phase)
//! ```
//!
//! Transitions are synchronous. The only suspension point is the completion call
//! in `run_roast`, which runs on its own task with the session unlocked, so it
//! finishes even if the caller goes away. Each accepted submission
//! carries a `SubmissionId`; a result whose id no longer matches is dropped, so a
//! response arriving after `clear` (or after a newer submission) never lands.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::llm_client::{CompletionClient, LlmError};
use crate::models::feedback::FeedbackItem;
use crate::roast::analyzer::{
    analyze_resume, failure_feedback, ERROR_SECTION, GENERIC_FAILURE_MESSAGE,
};
use crate::roast::parser::ParsedReply;
use crate::roast::rating::Rating;
use crate::roast::view::{RoastView, SessionView};

pub type SubmissionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Roasting { submission: SubmissionId },
    Results,
    Failed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("WHERE'S THE RESUME?! I NEED SOMETHING TO WORK WITH, YOU DONUT!")]
    EmptyResume,

    #[error("A roast is already cooking. Wait for it to come out of the oven.")]
    AlreadyRoasting,
}

/// Accepted submission handed to the caller of `begin_roast`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: SubmissionId,
    pub resume_text: String,
}

#[derive(Debug)]
pub struct RoastSession {
    resume_text: String,
    feedback: Vec<FeedbackItem>,
    rating: Option<Rating>,
    phase: Phase,
    roasted_at: Option<DateTime<Utc>>,
    next_submission: SubmissionId,
}

impl Default for RoastSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RoastSession {
    pub fn new() -> Self {
        Self {
            resume_text: String::new(),
            feedback: Vec::new(),
            rating: None,
            phase: Phase::Idle,
            roasted_at: None,
            next_submission: 1,
        }
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn feedback(&self) -> &[FeedbackItem] {
        &self.feedback
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn roasted_at(&self) -> Option<DateTime<Utc>> {
        self.roasted_at
    }

    pub fn is_roasting(&self) -> bool {
        matches!(self.phase, Phase::Roasting { .. })
    }

    /// Replaces the résumé text. Allowed in every phase; an in-flight roast keeps
    /// the text it was submitted with.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.resume_text = text.into();
    }

    /// Validates the current text and moves to `Roasting`.
    ///
    /// Rejections leave the session untouched.
    pub fn begin_roast(&mut self) -> Result<Submission, SessionError> {
        if self.is_roasting() {
            return Err(SessionError::AlreadyRoasting);
        }
        if self.resume_text.trim().is_empty() {
            return Err(SessionError::EmptyResume);
        }

        let id = self.next_submission;
        self.next_submission += 1;
        self.phase = Phase::Roasting { submission: id };

        Ok(Submission {
            id,
            resume_text: self.resume_text.clone(),
        })
    }

    /// Replaces the text (when given) and begins a roast as one step. A session
    /// that is already roasting rejects the call before the text is touched.
    pub fn submit(&mut self, text: Option<String>) -> Result<Submission, SessionError> {
        if self.is_roasting() {
            return Err(SessionError::AlreadyRoasting);
        }
        if let Some(text) = text {
            self.resume_text = text;
        }
        self.begin_roast()
    }

    /// Applies the outcome of submission `id`. Feedback and rating are replaced
    /// together. Returns `false` (and changes nothing) if `id` is stale.
    pub fn complete(&mut self, id: SubmissionId, outcome: Result<ParsedReply, LlmError>) -> bool {
        if self.phase != (Phase::Roasting { submission: id }) {
            return false;
        }

        match outcome {
            Ok(parsed) => {
                self.feedback = parsed.sections;
                self.rating = Some(parsed.rating);
                self.phase = Phase::Results;
            }
            Err(err) => {
                self.feedback = vec![failure_feedback(&err)];
                self.rating = None;
                self.phase = Phase::Failed;
            }
        }
        self.roasted_at = Some(Utc::now());
        true
    }

    /// Fails submission `id` without an `LlmError`, for a roast task that died.
    pub fn abandon(&mut self, id: SubmissionId) -> bool {
        if self.phase != (Phase::Roasting { submission: id }) {
            return false;
        }
        self.feedback = vec![FeedbackItem::new(ERROR_SECTION, GENERIC_FAILURE_MESSAGE)];
        self.rating = None;
        self.phase = Phase::Failed;
        self.roasted_at = Some(Utc::now());
        true
    }

    /// Back to an empty `Idle`. Any outstanding submission becomes stale.
    pub fn clear(&mut self) {
        self.resume_text.clear();
        self.feedback.clear();
        self.rating = None;
        self.roasted_at = None;
        self.phase = Phase::Idle;
    }
}

/// Runs one full roast against a shared session, optionally replacing its text first.
///
/// The completion call and the final transition run on a spawned task. Dropping
/// the returned future (client disconnect) detaches that task instead of
/// cancelling it, so the session always leaves `Roasting`.
pub async fn run_roast(
    session: Arc<Mutex<RoastSession>>,
    llm: Arc<dyn CompletionClient>,
    resume_text: Option<String>,
) -> Result<SessionView, SessionError> {
    let submission = session.lock().await.submit(resume_text)?;
    let id = submission.id;
    info!(submission = id, "Roast started");

    let task = {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            let outcome = analyze_resume(llm.as_ref(), &submission.resume_text).await;
            if !session.lock().await.complete(submission.id, outcome) {
                warn!(
                    submission = submission.id,
                    "Discarding stale roast result; session moved on"
                );
            }
        })
    };

    if let Err(e) = task.await {
        error!(submission = id, "Roast task failed: {e}");
        session.lock().await.abandon(id);
    }

    let guard = session.lock().await;
    Ok(SessionView::from(&*guard))
}

/// One-shot roast with no shared state, driven by a throwaway session.
pub async fn roast_once(
    llm: &dyn CompletionClient,
    resume_text: &str,
) -> Result<RoastView, SessionError> {
    let mut session = RoastSession::new();
    session.set_text(resume_text);
    let submission = session.begin_roast()?;

    let outcome = analyze_resume(llm, &submission.resume_text).await;
    session.complete(submission.id, outcome);

    Ok(RoastView::from(&session))
}
