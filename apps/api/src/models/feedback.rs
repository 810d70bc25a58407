use serde::{Deserialize, Serialize};

/// One titled block of feedback extracted from a completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub section: String,
    pub comment: String,
}

impl FeedbackItem {
    pub fn new(section: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            comment: comment.into(),
        }
    }
}
