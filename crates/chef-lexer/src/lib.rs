//! # Chef Lexer
//!
//! Normalizes raw Chef recipe text into an ordered list of trimmed,
//! period-delimited statement strings.
//!
//! Design decisions:
//! - Infallible: there is no malformed input at this stage, only sections
//!   and statements the parser may later reject.
//! - Blank sentinel statements (an empty segment between two sections) are
//!   preserved — the section state machine in `chef-parser` consumes them
//!   as the delimiter between Ingredients/Method/Serves.
//! - Title and ingredient lines are kept whole; they are never split on
//!   `.` because valid recipes don't put a period in them.

/// Split `source` into an ordered statement list.
///
/// Splits on any line terminator (`\r\n`, `\r`, `\n`), trims each line,
/// drops empty lines, then splits each non-empty line on `.` surrounded by
/// optional whitespace, re-flattening into one ordered sequence.
///
/// `\r\n` and lone `\r` are normalized to `\n` before splitting, so a CRLF
/// line boundary produces exactly one blank sentinel, not two.
pub fn normalize(source: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");

    for raw_line in normalized.split('\n') {
        let line = raw_line.trim();
        if line.is_empty() {
            // A blank source line is the section delimiter; preserve it as
            // an empty sentinel statement.
            statements.push(String::new());
            continue;
        }
        for segment in split_on_periods(line) {
            statements.push(segment);
        }
    }

    tracing::debug!(statement_count = statements.len(), "normalized recipe source");
    statements
}

/// Split a single non-empty line on `.` characters, trimming whitespace
/// around each resulting segment and dropping segments that end up empty
/// (a trailing `.` at end of line produces no extra empty segment).
fn split_on_periods(line: &str) -> Vec<String> {
    line.split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
