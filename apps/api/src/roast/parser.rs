//! Response Parser: turns a free-text roast into a rating and ordered feedback sections.
//!
//! Model output is free text, so nothing here fails: a missing rating falls back to
//! `Rating::DEFAULT` and any text at all yields sections.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::feedback::FeedbackItem;
use crate::roast::rating::Rating;

const RATING_TOKEN: &str = "RATING:";

static RATING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"RATING:\s*([0-9]+)/5").expect("rating pattern is a valid regex")
});

/// Structured form of one completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedReply {
    pub rating: Rating,
    /// The integer exactly as the model wrote it, before clamping.
    pub raw_rating: Option<u64>,
    pub sections: Vec<FeedbackItem>,
}

pub fn parse_reply(reply: &str) -> ParsedReply {
    let raw_rating = extract_raw_rating(reply);
    ParsedReply {
        rating: raw_rating.map(Rating::clamped).unwrap_or(Rating::DEFAULT),
        raw_rating,
        sections: extract_sections(reply),
    }
}

/// First `RATING: N/5` occurrence. Digit runs too long for `u64` saturate.
pub fn extract_raw_rating(reply: &str) -> Option<u64> {
    RATING_PATTERN
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|digits| digits.as_str().parse::<u64>().unwrap_or(u64::MAX))
}

/// Splits the reply into blank-line separated blocks, skipping every line that
/// carries the rating token. First line of a block is the title, the rest the comment.
pub fn extract_sections(reply: &str) -> Vec<FeedbackItem> {
    let mut sections = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in reply.lines().filter(|l| !l.contains(RATING_TOKEN)) {
        if line.trim().is_empty() {
            flush_block(&mut block, &mut sections);
        } else {
            block.push(line);
        }
    }
    flush_block(&mut block, &mut sections);

    sections
}

fn flush_block(block: &mut Vec<&str>, sections: &mut Vec<FeedbackItem>) {
    let Some((title, body)) = block.split_first() else {
        return;
    };
    sections.push(FeedbackItem {
        section: clean_title(title),
        comment: body.join("\n"),
    });
    block.clear();
}

fn clean_title(line: &str) -> String {
    let line = line.trim_end();
    line.strip_suffix(':').unwrap_or(line).to_string()
}

/// Inverse of `extract_sections` for well-formed sections: `title\ncomment` blocks
/// joined by blank lines.
pub fn render_sections(sections: &[FeedbackItem]) -> String {
    sections
        .iter()
        .map(|item| {
            if item.comment.is_empty() {
                item.section.clone()
            } else {
                format!("{}\n{}", item.section, item.comment)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
