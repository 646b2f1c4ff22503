use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::block::Element;
use crate::error::Error;
use crate::parser;

/// Delivers raw markdown text by logical document name.
pub trait SourceProvider {
    /// Returns [`Error::MissingInput`] when no document has that name.
    fn read(&self, name: &str) -> Result<String, Error>;
}

/// Reads documents from files inside a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceProvider for DirSource {
    fn read(&self, name: &str) -> Result<String, Error> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => Error::MissingInput {
                name: name.to_string(),
            },
            _ => Error::Io { path, source },
        })
    }
}

/// In-memory documents keyed by name.
impl SourceProvider for HashMap<String, String> {
    fn read(&self, name: &str) -> Result<String, Error> {
        self.get(name).cloned().ok_or_else(|| Error::MissingInput {
            name: name.to_string(),
        })
    }
}

/// Markdown file name for a question number.
pub fn question_file_name(number: u32) -> String {
    format!("question-{number}.md")
}

/// Output file name for a question number.
pub fn question_output_name(number: u32) -> String {
    format!("question-{number}.pdf")
}

/// Parse a single document. A missing document is an error.
pub fn single_document<P: SourceProvider + ?Sized>(
    provider: &P,
    name: &str,
) -> Result<Vec<Element>, Error> {
    let markdown = provider.read(name)?;
    let elements = parser::parse(&markdown);
    log::debug!("{name}: {} element(s)", elements.len());
    Ok(elements)
}

/// Compose several documents under one title, separated by page breaks.
///
/// Documents that do not exist are skipped. Each present document is parsed
/// independently, in parallel, and appended in the order given.
pub fn batch_document<P: SourceProvider + Sync + ?Sized>(
    provider: &P,
    names: &[String],
    title: &str,
) -> Result<Vec<Element>, Error> {
    let documents = names
        .par_iter()
        .map(|name| match single_document(provider, name) {
            Ok(elements) => Ok(Some(elements)),
            Err(Error::MissingInput { .. }) => {
                log::debug!("{name}: not found, skipping");
                Ok(None)
            }
            Err(e) => Err(e),
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let mut elements = vec![
        Element::Title {
            text: title.to_string(),
        },
        Element::Spacer,
    ];
    for document in documents.into_iter().flatten() {
        elements.extend(document);
        elements.push(Element::PageBreak);
    }
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(name, text)| (name.to_string(), text.to_string()))
            .collect()
    }

    #[test]
    fn names_from_number() {
        assert_eq!(question_file_name(7), "question-7.md");
        assert_eq!(question_output_name(10), "question-10.pdf");
    }

    #[test]
    fn single_missing_is_error() {
        let provider = sources(&[]);
        let err = single_document(&provider, "question-1.md").unwrap_err();
        assert_eq!(err.to_string(), "File not found: question-1.md");
    }

    #[test]
    fn batch_skips_missing_and_keeps_order() {
        let provider = sources(&[("b.md", "# B"), ("a.md", "# A")]);
        let names: Vec<String> = ["a.md", "missing.md", "b.md"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let elements = batch_document(&provider, &names, "All").unwrap();

        let headings: Vec<&str> = elements
            .iter()
            .filter_map(|e| match e {
                Element::Heading { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(headings, ["A", "B"]);
        assert!(matches!(&elements[0], Element::Title { text } if text == "All"));
        let breaks = elements
            .iter()
            .filter(|e| matches!(e, Element::PageBreak))
            .count();
        assert_eq!(breaks, 2);
    }

    #[test]
    fn dir_source_reports_missing_file() {
        let provider = DirSource::new("no/such/directory");
        assert!(matches!(
            provider.read("question-1.md"),
            Err(Error::MissingInput { name }) if name == "question-1.md"
        ));
    }
}
