use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Element, TextRun};
use crate::{code_box, inline, sanitize, table};

const FENCE: &str = "```";
const RULE: &str = "---";

static SEPARATOR_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|[\s\-:|]+\|$").expect("valid separator pattern"));
static BULLET_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-•*]\s+").expect("valid bullet pattern"));

/// Parse markdown text into a list of elements
pub fn parse(markdown: &str) -> Vec<Element> {
    let mut elements = Vec::new();
    let mut state = ParseState::default();

    for (index, line) in markdown.lines().enumerate() {
        process_line(line, index + 1, &mut state, &mut elements);
    }

    finish(state, &mut elements);
    elements
}

/// Accumulation state for one parse call
#[derive(Default)]
struct ParseState {
    // Code fence state
    in_code_block: bool,
    code_language: Option<String>,
    code_lines: Vec<String>,
    fence_line: usize,

    // Table state
    in_table: bool,
    table_rows: Vec<String>,
}

fn process_line(line: &str, line_no: usize, state: &mut ParseState, elements: &mut Vec<Element>) {
    let trimmed = line.trim();

    // Tables are only recognized outside code fences
    if !state.in_code_block {
        if is_table_row(trimmed) {
            if !SEPARATOR_ROW.is_match(trimmed) {
                state.table_rows.push(line.to_string());
            }
            state.in_table = true;
            return;
        }
        // The line that ends a table is still classified below
        if state.in_table && flush_table(state, elements) {
            elements.push(Element::Spacer);
        }
    }

    if let Some(info) = trimmed.strip_prefix(FENCE) {
        if state.in_code_block {
            flush_code(state, elements);
            elements.push(Element::Spacer);
        } else {
            state.in_code_block = true;
            state.fence_line = line_no;
            state.code_language = language_hint(info);
        }
        return;
    }

    if state.in_code_block {
        state.code_lines.push(line.to_string());
        return;
    }

    if let Some(element) = classify(line) {
        elements.push(element);
    }
}

fn finish(mut state: ParseState, elements: &mut Vec<Element>) {
    if state.in_table {
        flush_table(&mut state, elements);
    }
    if state.in_code_block {
        log::warn!(
            "code fence opened at line {} is never closed; keeping {} buffered line(s)",
            state.fence_line,
            state.code_lines.len()
        );
        flush_code(&mut state, elements);
    }
}

/// Emit the buffered table, if it has any rows. Returns whether a table was emitted.
fn flush_table(state: &mut ParseState, elements: &mut Vec<Element>) -> bool {
    state.in_table = false;
    let rows = std::mem::take(&mut state.table_rows);
    if rows.is_empty() {
        return false;
    }
    elements.push(Element::Table(table::build(&rows)));
    true
}

fn flush_code(state: &mut ParseState, elements: &mut Vec<Element>) {
    state.in_code_block = false;
    let lines = std::mem::take(&mut state.code_lines);
    let language = state.code_language.take();
    elements.push(Element::CodeBox(code_box::build(&lines, language.as_deref())));
}

fn is_table_row(trimmed: &str) -> bool {
    trimmed.starts_with('|') && trimmed.ends_with('|')
}

fn language_hint(info: &str) -> Option<String> {
    let info = info.trim();
    if info.is_empty() {
        None
    } else {
        Some(info.to_lowercase())
    }
}

/// A line classification: the first rule whose `matches` accepts a line builds its element.
struct LineRule {
    matches: fn(&str) -> bool,
    build: fn(&str) -> Element,
}

const LINE_RULES: &[LineRule] = &[
    LineRule {
        matches: |line| line.starts_with("#### "),
        build: |line| heading(4, &line["#### ".len()..]),
    },
    LineRule {
        matches: |line| line.starts_with("### "),
        build: |line| heading(3, &line["### ".len()..]),
    },
    LineRule {
        matches: |line| line.starts_with("## "),
        build: |line| heading(2, &line["## ".len()..]),
    },
    LineRule {
        matches: |line| line.starts_with("# "),
        build: |line| heading(1, &line["# ".len()..]),
    },
    LineRule {
        matches: |line| line.starts_with("**") && line.ends_with("**"),
        build: bold_paragraph,
    },
    LineRule {
        matches: |line| ["- ", "• ", "* "].iter().any(|p| line.starts_with(p)),
        build: bullet_item,
    },
    LineRule {
        matches: |line| line.trim() == RULE,
        build: |_| Element::Spacer,
    },
    LineRule {
        matches: |line| !line.trim().is_empty(),
        build: paragraph,
    },
];

/// Classify a line outside of any code fence or table. Blank lines yield nothing.
fn classify(line: &str) -> Option<Element> {
    LINE_RULES
        .iter()
        .find(|rule| (rule.matches)(line))
        .map(|rule| (rule.build)(line))
}

fn heading(level: u8, raw: &str) -> Element {
    let text = sanitize::strict(raw);
    // Level 4 renders as emphasized text rather than a heading style
    let run = if level == 4 {
        TextRun::bold(text.clone())
    } else {
        TextRun::plain(text.clone())
    };
    Element::Heading {
        level,
        text,
        runs: vec![run],
    }
}

fn bold_paragraph(line: &str) -> Element {
    let text = sanitize::strict(&line.replace("**", ""));
    Element::Paragraph {
        runs: vec![TextRun::bold(text)],
    }
}

fn bullet_item(line: &str) -> Element {
    let content = BULLET_PREFIX.replace(line, "");
    Element::BulletItem {
        runs: inline::tokenize(&sanitize::strict(&content)),
    }
}

fn paragraph(line: &str) -> Element {
    Element::Paragraph {
        runs: inline::tokenize(&sanitize::strict(line)),
    }
}
