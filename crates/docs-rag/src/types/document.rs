//! Document and chunk types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File formats accepted by the ingestion pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Markdown file
    Markdown,
    /// Plain text file
    Text,
    /// HTML document
    Html,
    /// PDF document
    Pdf,
}

impl DocumentKind {
    /// Detect the kind from a file extension. Anything outside the
    /// allow-list yields `None`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" => Some(Self::Markdown),
            "txt" => Some(Self::Text),
            "html" => Some(Self::Html),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Detect the kind from a file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// A source document read from the docs tree. Lives only for the
/// duration of one file's processing.
#[derive(Debug, Clone)]
pub struct Document {
    /// Filesystem path the document was read from
    pub path: PathBuf,
    /// Detected format
    pub kind: DocumentKind,
    /// Extracted plain text
    pub text: String,
}

/// A contiguous word-count window of a document's text, the unit
/// submitted for embedding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Ordinal index within the document
    pub index: u32,
    /// Window text (whitespace-normalized)
    pub text: String,
}

impl Chunk {
    /// Number of words in this chunk
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_allow_list_is_exact() {
        assert_eq!(DocumentKind::from_extension("md"), Some(DocumentKind::Markdown));
        assert_eq!(DocumentKind::from_extension("TXT"), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_extension("html"), Some(DocumentKind::Html));
        assert_eq!(DocumentKind::from_extension("pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension("docx"), None);
        assert_eq!(DocumentKind::from_extension("rs"), None);
        assert_eq!(DocumentKind::from_extension(""), None);
    }

    #[test]
    fn kind_from_path_uses_the_extension() {
        assert_eq!(
            DocumentKind::from_path(Path::new("docs/guide/intro.md")),
            Some(DocumentKind::Markdown)
        );
        assert_eq!(DocumentKind::from_path(Path::new("docs/no_extension")), None);
    }
}
