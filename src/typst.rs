use crate::block::{CodeBox, CodeKind, ColorHint, Element, Table, TextRun};
use crate::code_box;
use crate::config::{ColorConfig, Config};

const BULLET: &str = "• ";
/// Code boxes longer than this may break across pages.
const UNBREAKABLE_CODE_LINES: usize = 30;

/// Convert elements to Typst markup
pub fn elements_to_typst(elements: &[Element], config: &Config) -> String {
    let mut out = String::new();
    emit_preamble(config, &mut out);

    for element in elements {
        emit_element(element, config, &mut out);
    }

    out
}

fn emit_preamble(config: &Config, out: &mut String) {
    let numbering = if config.page.numbers { "\"1\"" } else { "none" };
    out.push_str(&format!(
        "#set page(margin: {}, numbering: {})\n",
        config.page.margin, numbering
    ));
    out.push_str(&format!(
        "#set text(font: {}, size: {})\n",
        string_literal(&config.font.body),
        config.font.size
    ));
    out.push_str("#set par(linebreaks: \"optimized\")\n\n");
}

fn emit_element(element: &Element, config: &Config, out: &mut String) {
    match element {
        Element::Heading { level: 4, runs, .. } => {
            out.push_str("#block(above: 1.2em, below: 0.6em)[");
            runs_to_typst(runs, config, out);
            out.push_str("]\n\n");
        }
        Element::Heading { level, runs, .. } => {
            out.push_str(&format!("#heading(level: {level})["));
            runs_to_typst(runs, config, out);
            out.push_str("]\n\n");
        }
        Element::Paragraph { runs } => {
            runs_to_typst(runs, config, out);
            out.push_str("\n\n");
        }
        Element::BulletItem { runs } => {
            out.push_str("#pad(left: 1.5em)[");
            out.push('#');
            out.push_str(&string_literal(BULLET));
            runs_to_typst(runs, config, out);
            out.push_str("]\n\n");
        }
        Element::Spacer => {
            out.push_str("#v(0.6em)\n\n");
        }
        Element::Table(table) => {
            table_to_typst(table, config, out);
        }
        Element::CodeBox(code) => {
            code_box_to_typst(code, config, out);
        }
        Element::Title { text } => {
            out.push_str(&format!(
                "#align(center, text(size: 20pt, weight: \"bold\", {}))\n#v(1em)\n\n",
                string_literal(text)
            ));
        }
        Element::PageBreak => {
            out.push_str("#pagebreak(weak: true)\n\n");
        }
    }
}

fn runs_to_typst(runs: &[TextRun], config: &Config, out: &mut String) {
    for run in runs {
        run_to_typst(run, config, out);
    }
}

/// Every run is emitted as an embedded expression, so run text never reaches the markup parser.
fn run_to_typst(run: &TextRun, config: &Config, out: &mut String) {
    if run.text.is_empty() {
        return;
    }
    let text = string_literal(&run.text);

    if run.monospace {
        let font = string_literal(&config.font.mono);
        let size = &config.font.code_size;
        match run.color {
            Some(ColorHint::InlineCode) => out.push_str(&format!(
                "#highlight(fill: {}, text(font: {font}, size: {size}, {text}))",
                rgb(&config.colors.inline_code_fill)
            )),
            hint => out.push_str(&format!(
                "#text(font: {font}, size: {size}, fill: {}, {text})",
                rgb(hint_color(hint, CodeKind::Code, &config.colors))
            )),
        }
    } else if run.bold {
        out.push_str(&format!("#text(weight: \"bold\", {text})"));
    } else {
        out.push('#');
        out.push_str(&text);
    }
}

fn table_to_typst(table: &Table, config: &Config, out: &mut String) {
    let col_count = table.column_count();
    if col_count == 0 {
        return;
    }

    out.push_str("#table(\n");
    out.push_str(&format!("  columns: (1fr,) * {},\n", col_count));
    out.push_str("  align: center + horizon,\n");
    out.push_str(&format!(
        "  fill: (_, y) => if y == 0 {{ {} }},\n",
        rgb(&config.colors.table_header_fill)
    ));

    for (index, row) in table.rows.iter().enumerate() {
        let weight = if index == 0 { "bold" } else { "regular" };
        for cell in &row.cells {
            out.push_str(&format!(
                "  text(weight: \"{}\", size: {}, {}),\n",
                weight,
                config.font.code_size,
                string_literal(cell)
            ));
        }
        // Short rows are padded so later rows stay aligned
        for _ in row.cells.len()..col_count {
            out.push_str("  [],\n");
        }
    }

    out.push_str(")\n\n");
}

fn code_box_to_typst(code: &CodeBox, config: &Config, out: &mut String) {
    let colors = &config.colors;
    let fill = match code.kind {
        CodeKind::Diagram => &colors.diagram_fill,
        CodeKind::Code | CodeKind::Json => &colors.code_fill,
    };
    let border = format!("0.5pt + {}", rgb(&colors.code_border));

    out.push_str("#block(\n");
    out.push_str("  width: 100%,\n");
    out.push_str(&format!(
        "  breakable: {},\n",
        code.lines.len() > UNBREAKABLE_CODE_LINES
    ));
    out.push_str(&format!("  fill: {},\n", rgb(fill)));
    out.push_str("  inset: (x: 12pt, y: 8pt),\n");
    out.push_str(&format!(
        "  stroke: (left: 3pt + {}, top: {border}, right: {border}, bottom: {border}),\n",
        rgb(&colors.code_accent)
    ));
    out.push_str(")[");

    for (index, line) in code.lines.iter().enumerate() {
        if index > 0 {
            out.push_str("#linebreak()");
        }
        for run in code_box::line_runs(line, code.kind) {
            code_run_to_typst(&run, code.kind, config, out);
        }
    }

    out.push_str("]\n\n");
}

fn code_run_to_typst(run: &TextRun, kind: CodeKind, config: &Config, out: &mut String) {
    let color = hint_color(run.color, kind, &config.colors);
    // No-break spaces keep indentation from collapsing
    let text = run.text.replace(' ', "\u{00A0}");

    out.push_str(&format!(
        "#text(font: {}, size: {}, fill: {}, {})",
        string_literal(&config.font.mono),
        config.font.code_size,
        rgb(color),
        string_literal(&text)
    ));
}

fn hint_color(hint: Option<ColorHint>, kind: CodeKind, colors: &ColorConfig) -> &str {
    match (hint, kind) {
        (Some(ColorHint::JsonKey), _) => &colors.json_key,
        (Some(ColorHint::JsonValue), _) => &colors.json_value,
        (_, CodeKind::Json) => &colors.json_text,
        _ => &colors.code_text,
    }
}

fn rgb(hex: &str) -> String {
    format!("rgb(\"#{}\")", hex.trim_start_matches('#'))
}

/// Quote text as a Typst string literal
fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::TableRow;
    use crate::markdown_to_typst;

    const PREAMBLE: &str = "#set page(margin: 2cm, numbering: none)\n\
                            #set text(font: \"Libertinus Serif\", size: 11pt)\n\
                            #set par(linebreaks: \"optimized\")\n\n";

    #[test]
    fn heading() {
        assert_eq!(
            markdown_to_typst("# Hello"),
            format!("{PREAMBLE}#heading(level: 1)[#\"Hello\"]\n\n")
        );
    }

    #[test]
    fn level_four_heading_is_a_block() {
        assert_eq!(
            markdown_to_typst("#### Detail"),
            format!(
                "{PREAMBLE}#block(above: 1.2em, below: 0.6em)[#text(weight: \"bold\", \"Detail\")]\n\n"
            )
        );
    }

    #[test]
    fn paragraph_with_spans() {
        assert_eq!(
            markdown_to_typst("a **b** `c`"),
            format!(
                "{PREAMBLE}#\"a \"#text(weight: \"bold\", \"b\")#\" \"\
                 #highlight(fill: rgb(\"#e8e8e8\"), text(font: \"DejaVu Sans Mono\", size: 10pt, \"c\"))\n\n"
            )
        );
    }

    #[test]
    fn monospace_runs_follow_their_color_hint() {
        let runs = vec![
            TextRun::code("a"),
            TextRun::code_segment("b", ColorHint::JsonKey),
        ];
        let out = elements_to_typst(&[Element::Paragraph { runs }], &Config::default());
        assert!(out.contains(
            "#highlight(fill: rgb(\"#e8e8e8\"), text(font: \"DejaVu Sans Mono\", size: 10pt, \"a\"))"
        ));
        assert!(out.contains(
            "#text(font: \"DejaVu Sans Mono\", size: 10pt, fill: rgb(\"#0066cc\"), \"b\")"
        ));
        assert_eq!(out.matches("#highlight").count(), 1);
    }

    #[test]
    fn bullet_item() {
        assert_eq!(
            markdown_to_typst("- one"),
            format!("{PREAMBLE}#pad(left: 1.5em)[#\"• \"#\"one\"]\n\n")
        );
    }

    #[test]
    fn markup_characters_are_quoted() {
        let out = markdown_to_typst("a * b # c \"q\" \\ [x]");
        assert!(out.contains("#\"a * b # c \\\"q\\\" \\\\ [x]\""));
    }

    #[test]
    fn rule_is_spacer() {
        assert_eq!(markdown_to_typst("---"), format!("{PREAMBLE}#v(0.6em)\n\n"));
    }

    #[test]
    fn table() {
        let md = "| A | B |\n|---|---|\n| 1 | 2 |";
        let expected = format!(
            "{PREAMBLE}#table(\n  columns: (1fr,) * 2,\n  align: center + horizon,\n  \
             fill: (_, y) => if y == 0 {{ rgb(\"#e0e0e0\") }},\n  \
             text(weight: \"bold\", size: 10pt, \"A\"),\n  \
             text(weight: \"bold\", size: 10pt, \"B\"),\n  \
             text(weight: \"regular\", size: 10pt, \"1\"),\n  \
             text(weight: \"regular\", size: 10pt, \"2\"),\n)\n\n"
        );
        assert_eq!(markdown_to_typst(md), expected);
    }

    #[test]
    fn ragged_table_is_padded() {
        let table = Table {
            rows: vec![
                TableRow {
                    cells: vec!["a".into(), "b".into()],
                },
                TableRow {
                    cells: vec!["1".into()],
                },
            ],
        };
        let out = elements_to_typst(&[Element::Table(table)], &Config::default());
        assert_eq!(out.matches("  [],\n").count(), 1);
        assert!(out.contains("columns: (1fr,) * 2"));
    }

    #[test]
    fn code_box_keeps_indentation_and_blank_lines() {
        let out = markdown_to_typst("```\n  x\n\ny\n```");
        assert_eq!(out.matches("#linebreak()").count(), 2);
        assert!(out.contains("\"\u{00A0}\u{00A0}x\""));
        assert!(out.contains("stroke: (left: 3pt + rgb(\"#4a90d9\")"));
        assert!(out.contains("fill: rgb(\"#f6f8fa\")"));
        assert!(out.contains("breakable: false"));
    }

    #[test]
    fn diagram_uses_its_own_fill() {
        let out = markdown_to_typst("```\n┌─┐\n└─┘\n```");
        assert!(out.contains("fill: rgb(\"#f5f7f9\")"));
    }

    #[test]
    fn json_keys_and_values_are_colored() {
        let out = markdown_to_typst("```json\n{\"k\": \"v\"}\n```");
        assert!(out.contains("fill: rgb(\"#0066cc\"), \"\\\"k\\\"\""));
        assert!(out.contains("fill: rgb(\"#008800\"), \"\\\"v\\\"\""));
    }

    #[test]
    fn title_and_page_break() {
        let out = elements_to_typst(
            &[
                Element::Title {
                    text: "Exercises".into(),
                },
                Element::PageBreak,
            ],
            &Config::default(),
        );
        assert!(out.contains("#align(center, text(size: 20pt, weight: \"bold\", \"Exercises\"))"));
        assert!(out.ends_with("#pagebreak(weak: true)\n\n"));
    }

    #[test]
    fn page_numbers() {
        let mut config = Config::default();
        config.page.numbers = true;
        let out = elements_to_typst(&[], &config);
        assert!(out.starts_with("#set page(margin: 2cm, numbering: \"1\")\n"));
    }
}
