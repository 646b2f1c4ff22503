use serde::Serialize;

/// Color role attached to a run; the renderer maps each role to a configured color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorHint {
    InlineCode,
    CodeText,
    JsonKey,
    JsonValue,
}

/// One contiguous styled span of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub monospace: bool,
    pub color: Option<ColorHint>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            monospace: false,
            color: None,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    /// Inline code: monospace with the inline-code highlight.
    pub fn code(text: impl Into<String>) -> Self {
        Self {
            monospace: true,
            color: Some(ColorHint::InlineCode),
            ..Self::plain(text)
        }
    }

    /// A run inside a code box, colored by role.
    pub fn code_segment(text: impl Into<String>, color: ColorHint) -> Self {
        Self {
            monospace: true,
            color: Some(color),
            ..Self::plain(text)
        }
    }
}

/// Concatenate the text of a run sequence.
pub fn plain_text(runs: &[TextRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}

/// A table row; whether it is the header is decided by its position in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first()
    }

    /// Width of the widest row. Rows are not required to agree.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
    }
}

/// What a fenced block contains; only affects styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CodeKind {
    Code,
    Diagram,
    Json,
}

/// Bordered box holding the sanitized lines of a fenced block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBox {
    pub lines: Vec<String>,
    pub kind: CodeKind,
    pub language: Option<String>,
}

/// Structural elements of the output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Element {
    Heading {
        level: u8,
        text: String,
        runs: Vec<TextRun>,
    },
    Paragraph {
        runs: Vec<TextRun>,
    },
    BulletItem {
        runs: Vec<TextRun>,
    },
    Spacer,
    Table(Table),
    CodeBox(CodeBox),
    /// Document title, contributed by the caller when composing several documents.
    Title {
        text: String,
    },
    /// Break between composed documents; never produced by the parser.
    PageBreak,
}

impl Element {
    pub fn is_spacer(&self) -> bool {
        matches!(self, Element::Spacer)
    }
}
