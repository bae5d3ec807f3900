//! Terminal output for outcomes: a banner line followed by the JSON payload.
//!
//! The TUI and the one-shot commands share `pretty_json` so the payload reads
//! the same in both.

use serde_json::Value;

use crate::bridge::{Level, Outcome};

/// Banner prefix, e.g. `[warning]`.
pub fn banner_tag(level: Level) -> String {
    format!("[{}]", level.label())
}

/// Pretty-print a JSON payload without reordering or rewriting values.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Full text for one outcome.
pub fn format_outcome(outcome: &Outcome) -> String {
    let mut out = format!("{} {}", banner_tag(outcome.level()), outcome.banner());
    if let Some(payload) = outcome.payload() {
        out.push('\n');
        out.push_str(&pretty_json(&payload));
    }
    out
}
