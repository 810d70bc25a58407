// All LLM prompt constants for the Roast module.

use crate::llm_client::ChatMessage;

/// System prompt for résumé roasting. Fixes persona, tone, and the closing rating line.
pub const ROAST_SYSTEM: &str = "You are Gordon Ramsay reviewing resumes. \
    Be brutally honest but constructive, using cooking metaphors and Gordon's signature style. \
    Analyze the resume for issues with formatting, content, clarity, and impact. \
    Break down your analysis into sections (Experience, Skills, Education, etc.). \
    Use ALL CAPS for emphasis like Gordon does. \
    Keep each section's feedback concise but impactful. \
    At the end, provide a rating from 1-5 stars, where 1 is terrible and 5 is excellent. \
    Format the rating as 'RATING: X/5'.";

/// Static preamble of the user message. The résumé text follows verbatim.
pub const ROAST_PROMPT_PREAMBLE: &str =
    "Please analyze this resume and provide feedback in Gordon Ramsay's style:\n\n";

/// Builds the system + user message pair for one roast.
///
/// The résumé text is passed through unmodified: no escaping, no trimming.
pub fn build_roast_messages(resume_text: &str) -> [ChatMessage; 2] {
    [
        ChatMessage::system(ROAST_SYSTEM),
        ChatMessage::user(format!("{ROAST_PROMPT_PREAMBLE}{resume_text}")),
    ]
}
