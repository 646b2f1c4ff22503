mod block;
mod code_box;
mod config;
mod error;
mod inline;
mod parser;
mod sanitize;
mod source;
mod table;
mod typst;

pub use block::{
    CodeBox, CodeKind, ColorHint, Element, Table, TableRow, TextRun, plain_text,
};
pub use code_box::line_runs;
pub use config::Config;
pub use error::Error;
pub use inline::tokenize;
pub use sanitize::{Mode, remove_decorative};
pub use source::{
    DirSource, SourceProvider, batch_document, question_file_name, question_output_name,
    single_document,
};

use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

/// Parse markdown text into a vector of elements.
pub fn parse(markdown: &str) -> Vec<Element> {
    parser::parse(markdown)
}

/// Build a table element's model from raw pipe rows.
pub fn build_table<S: AsRef<str>>(rows: &[S]) -> Table {
    table::build(rows)
}

/// Build a code box from the raw lines of a fenced block.
pub fn build_code_box<S: AsRef<str>>(lines: &[S], language: Option<&str>) -> CodeBox {
    code_box::build(lines, language)
}

/// Convert markdown to Typst markup using default config.
pub fn markdown_to_typst(markdown: &str) -> String {
    markdown_to_typst_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to Typst markup with custom config.
pub fn markdown_to_typst_with_config(markdown: &str, config: &Config) -> String {
    elements_to_typst(&parse(markdown), config)
}

/// Render already-parsed elements as Typst markup.
pub fn elements_to_typst(elements: &[Element], config: &Config) -> String {
    typst::elements_to_typst(elements, config)
}

/// Convert markdown to PDF bytes using default config.
pub fn markdown_to_pdf(markdown: &str) -> Result<Vec<u8>, Error> {
    markdown_to_pdf_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to PDF bytes with custom config.
pub fn markdown_to_pdf_with_config(markdown: &str, config: &Config) -> Result<Vec<u8>, Error> {
    elements_to_pdf(&parse(markdown), config)
}

/// Compile elements (possibly from several documents) into PDF bytes.
pub fn elements_to_pdf(elements: &[Element], config: &Config) -> Result<Vec<u8>, Error> {
    let typst_content = elements_to_typst(elements, config);

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    let doc: PagedDocument = engine
        .compile()
        .output
        .map_err(|e| Error::Render(format!("Typst compilation failed: {:?}", e)))?;

    typst_pdf::pdf(&doc, &PdfOptions::default())
        .map_err(|e| Error::Render(format!("PDF generation failed: {:?}", e)))
}
