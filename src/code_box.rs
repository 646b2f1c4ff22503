use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{CodeBox, CodeKind, ColorHint, TextRun};
use crate::sanitize;

/// Characters whose presence marks a block as an ASCII-art diagram.
const DIAGRAM_GLYPHS: &[char] = &['┌', '└', '│', '─', '├', '┤', '┬', '╱', '╲'];

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"".*?""#).expect("valid string pattern"));

/// Build a code box from the raw lines of a fenced block.
pub fn build<S: AsRef<str>>(lines: &[S], language: Option<&str>) -> CodeBox {
    let lines: Vec<String> = lines
        .iter()
        .map(|line| sanitize::diagram_safe(line.as_ref()))
        .collect();
    let kind = detect_kind(&lines, language);

    CodeBox {
        lines,
        kind,
        language: language.map(str::to_string),
    }
}

fn detect_kind(lines: &[String], language: Option<&str>) -> CodeKind {
    if lines.iter().any(|line| line.contains(DIAGRAM_GLYPHS)) {
        CodeKind::Diagram
    } else if language == Some("json")
        || lines.iter().any(|line| {
            let trimmed = line.trim();
            trimmed.starts_with('{') || trimmed.starts_with('[')
        })
    {
        CodeKind::Json
    } else {
        CodeKind::Code
    }
}

/// Styled runs for one line of a code box.
///
/// Blank lines become a single-space run so the box keeps the row.
pub fn line_runs(line: &str, kind: CodeKind) -> Vec<TextRun> {
    if line.is_empty() {
        return vec![TextRun::code_segment(" ", ColorHint::CodeText)];
    }
    if kind != CodeKind::Json {
        return vec![TextRun::code_segment(line, ColorHint::CodeText)];
    }

    let mut runs = Vec::new();
    let mut last = 0;
    for quoted in QUOTED.find_iter(line) {
        if quoted.start() > last {
            runs.push(TextRun::code_segment(
                &line[last..quoted.start()],
                ColorHint::CodeText,
            ));
        }
        let is_key = line[quoted.end()..].trim_start().starts_with(':');
        let hint = if is_key {
            ColorHint::JsonKey
        } else {
            ColorHint::JsonValue
        };
        runs.push(TextRun::code_segment(quoted.as_str(), hint));
        last = quoted.end();
    }
    if last < line.len() {
        runs.push(TextRun::code_segment(&line[last..], ColorHint::CodeText));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::plain_text;

    #[test]
    fn blank_lines_are_kept() {
        let code = build(&["", "fn main() {}", "", ""], None);
        assert_eq!(code.lines.len(), 4);
        assert_eq!(code.lines[0], "");
        assert_eq!(code.kind, CodeKind::Code);
    }

    #[test]
    fn indentation_survives() {
        let code = build(&["    indented  ✅"], None);
        assert_eq!(code.lines, ["    indented  "]);
    }

    #[test]
    fn detects_diagram() {
        let code = build(&["┌───┐", "│ A │ ⬇️", "└───┘"], None);
        assert_eq!(code.kind, CodeKind::Diagram);
        assert_eq!(code.lines[1], "│ A │ ↓");
    }

    #[test]
    fn diagram_wins_over_json() {
        let code = build(&["{", "  ├─ x", "}"], Some("json"));
        assert_eq!(code.kind, CodeKind::Diagram);
    }

    #[test]
    fn detects_json_by_content_or_hint() {
        assert_eq!(build(&["  [1, 2]"], None).kind, CodeKind::Json);
        assert_eq!(build(&["\"a\": 1"], Some("json")).kind, CodeKind::Json);
        assert_eq!(build(&["x = 1"], Some("toml")).kind, CodeKind::Code);
    }

    #[test]
    fn json_segments_reconstruct_line() {
        let line = r#"  "id": "abc", "n": 3,"#;
        let runs = line_runs(line, CodeKind::Json);
        assert_eq!(plain_text(&runs), line);

        let hints: Vec<_> = runs.iter().filter_map(|r| r.color).collect();
        assert_eq!(
            hints,
            [
                ColorHint::CodeText,
                ColorHint::JsonKey,
                ColorHint::CodeText,
                ColorHint::JsonValue,
                ColorHint::CodeText,
                ColorHint::JsonKey,
                ColorHint::CodeText,
            ]
        );
    }

    #[test]
    fn blank_line_placeholder() {
        let runs = line_runs("", CodeKind::Json);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, " ");
    }
}
