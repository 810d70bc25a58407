//! Presentation view models: everything a front end needs to draw the roast page.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::feedback::FeedbackItem;
use crate::roast::rating::{Bucket, Rating};
use crate::roast::session::{Phase, RoastSession};

pub const ROAST_LABEL: &str = "ROAST IT!";
pub const ROASTING_LABEL: &str = "COOKING UP FEEDBACK...";

/// Star strip, caption, and reaction image for one rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerdictView {
    pub stars: [bool; 5],
    pub bucket: Bucket,
    pub caption: &'static str,
    pub reaction_image: &'static str,
}

impl From<Rating> for VerdictView {
    fn from(rating: Rating) -> Self {
        let bucket = rating.bucket();
        Self {
            stars: rating.stars(),
            bucket,
            caption: bucket.caption(),
            reaction_image: bucket.reaction_image(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub resume_text: String,
    /// idle | roasting | results | error
    pub phase: &'static str,
    pub roast_button_label: &'static str,
    pub roast_button_enabled: bool,
    pub feedback: Vec<FeedbackItem>,
    /// 0 when there is nothing to rate.
    pub rating: u8,
    pub verdict: Option<VerdictView>,
    pub roasted_at: Option<DateTime<Utc>>,
}

impl From<&RoastSession> for SessionView {
    fn from(session: &RoastSession) -> Self {
        let roasting = session.is_roasting();
        Self {
            resume_text: session.resume_text().to_string(),
            phase: phase_label(session.phase()),
            roast_button_label: if roasting { ROASTING_LABEL } else { ROAST_LABEL },
            roast_button_enabled: !roasting,
            feedback: session.feedback().to_vec(),
            rating: session.rating().map(Rating::value).unwrap_or(0),
            verdict: verdict_for(session),
            roasted_at: session.roasted_at(),
        }
    }
}

/// Result of a stateless roast.
#[derive(Debug, Clone, Serialize)]
pub struct RoastView {
    pub feedback: Vec<FeedbackItem>,
    pub rating: u8,
    pub verdict: Option<VerdictView>,
}

impl From<&RoastSession> for RoastView {
    fn from(session: &RoastSession) -> Self {
        Self {
            feedback: session.feedback().to_vec(),
            rating: session.rating().map(Rating::value).unwrap_or(0),
            verdict: verdict_for(session),
        }
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Roasting { .. } => "roasting",
        Phase::Results => "results",
        Phase::Failed => "error",
    }
}

// The verdict sits inside the results panel, so it needs feedback to show.
fn verdict_for(session: &RoastSession) -> Option<VerdictView> {
    if session.feedback().is_empty() {
        return None;
    }
    session.rating().map(VerdictView::from)
}
