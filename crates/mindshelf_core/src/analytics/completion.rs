//! Completion classification.
//!
//! A record is complete when any signal holds: `completed == true`,
//! `status == "done"`, a whole-word `done|completed|finished` in title or
//! content, or a checked `[x]` marker in content.

use crate::model::thought::ThoughtRecord;
use once_cell::sync::Lazy;
use regex::Regex;

const DONE_STATUS: &str = "done";

static COMPLETION_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:done|completed|finished)\b").expect("valid completion word regex")
});
static CHECKED_BOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[xX]\]").expect("valid checkbox regex"));

pub fn is_completed(record: &ThoughtRecord) -> bool {
    record.completed == Some(true)
        || record.status.as_deref() == Some(DONE_STATUS)
        || COMPLETION_WORD_RE.is_match(&record.combined_text())
        || record
            .content_text()
            .is_some_and(|content| CHECKED_BOX_RE.is_match(content))
}
