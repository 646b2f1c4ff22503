use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::TextRun;

// Bold spans cannot contain '*', code spans cannot contain '`'; neither may be empty.
static SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*[^*]+\*\*|`[^`]+`").expect("valid span pattern"));

/// Split an already-sanitized line into plain, bold and code runs.
///
/// The result is never empty. Markers without a partner on the same line stay literal.
pub fn tokenize(line: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut last = 0;

    for span in SPAN.find_iter(line) {
        if span.start() > last {
            runs.push(TextRun::plain(&line[last..span.start()]));
        }

        let matched = span.as_str();
        if let Some(inner) = matched.strip_prefix("**").and_then(|s| s.strip_suffix("**")) {
            runs.push(TextRun::bold(inner));
        } else if let Some(inner) = matched.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
            runs.push(TextRun::code(inner));
        }

        last = span.end();
    }

    if last < line.len() || runs.is_empty() {
        runs.push(TextRun::plain(&line[last..]));
    }

    runs
}
