//! Roast pipeline: prompt → one completion call → parsed reply.

use tracing::{debug, error, info, warn};

use crate::llm_client::{CompletionClient, LlmError};
use crate::models::feedback::FeedbackItem;
use crate::roast::parser::{parse_reply, render_sections, ParsedReply};
use crate::roast::prompts::build_roast_messages;

pub const ERROR_SECTION: &str = "Error";
pub const QUOTA_EXHAUSTED_MESSAGE: &str = "BLOODY HELL! The kitchen's run out of gas! \
    Our API quota is exhausted. Try again later or use a different API key!";
pub const GENERIC_FAILURE_MESSAGE: &str =
    "BLOODY HELL! The kitchen's on fire! Something went wrong with the analysis.";

/// Sends the résumé to the model exactly once and parses the reply.
pub async fn analyze_resume(
    llm: &dyn CompletionClient,
    resume_text: &str,
) -> Result<ParsedReply, LlmError> {
    let messages = build_roast_messages(resume_text);

    let reply = llm.complete(&messages).await.map_err(|e| {
        error!("Error analyzing resume: {e}");
        e
    })?;

    let parsed = parse_reply(&reply);

    if let Some(raw) = parsed.raw_rating {
        if raw != parsed.rating.value() as u64 {
            warn!(
                "Model returned out-of-range rating {raw}/5, clamped to {}",
                parsed.rating.value()
            );
        }
    } else {
        warn!("No RATING line in completion, defaulting to {}", parsed.rating.value());
    }

    debug!("Parsed roast:\n{}", render_sections(&parsed.sections));
    info!(
        "Resume roasted: {} sections, rating {}/5",
        parsed.sections.len(),
        parsed.rating.value()
    );

    Ok(parsed)
}

/// The single feedback item shown in place of results when a roast fails.
pub fn failure_feedback(err: &LlmError) -> FeedbackItem {
    let message = if err.is_quota_exhausted() {
        QUOTA_EXHAUSTED_MESSAGE
    } else {
        GENERIC_FAILURE_MESSAGE
    };
    FeedbackItem::new(ERROR_SECTION, message)
}
