//! Multi-format text extraction
//!
//! Converts a source file into normalized plain text. Markup formats
//! go through a fixed, ordered sequence of textual substitutions; PDF
//! extraction is delegated to the `pdf-extract` reader.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::DocumentKind;

/// Ordered markdown substitutions. Order matters: images are stripped
/// before links so `![alt](url)` is not reduced to `!alt` by the link
/// rule.
static MARKDOWN_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        // Heading markers
        (Regex::new(r"#{1,6}\s*").unwrap(), ""),
        // Bold
        (Regex::new(r"\*\*(.*?)\*\*").unwrap(), "$1"),
        // Italic
        (Regex::new(r"\*(.*?)\*").unwrap(), "$1"),
        // Images
        (Regex::new(r"!\[.*?\]\(.*?\)").unwrap(), ""),
        // Links, keeping the link text
        (Regex::new(r"\[(.*?)\]\(.*?\)").unwrap(), "$1"),
        // Code spans and fences
        (Regex::new(r"`{1,3}[^`]*`{1,3}").unwrap(), ""),
        // Bullet list markers
        (Regex::new(r"(?m)^\s*[-*+]\s+").unwrap(), ""),
        // Numbered list markers
        (Regex::new(r"(?m)^\s*\d+\.\s+").unwrap(), ""),
    ]
});

static SCRIPT_BLOCKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script>").unwrap());
static STYLE_BLOCKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<style\b.*?</style>").unwrap());
static HTML_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Multi-format text extractor
pub struct TextExtractor;

impl TextExtractor {
    /// Extract plain text from a file based on its extension.
    ///
    /// Unrecognized extensions fail with `UnsupportedFormat`; reader
    /// and parser errors fail with `ExtractionFailed`. No side effects
    /// beyond reading the file.
    pub fn extract(path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let kind = DocumentKind::from_extension(&extension)
            .ok_or(Error::UnsupportedFormat(extension))?;

        match kind {
            DocumentKind::Text => Self::read_utf8(path),
            DocumentKind::Markdown => Ok(Self::strip_markdown(&Self::read_utf8(path)?)),
            DocumentKind::Html => Ok(Self::strip_html(&Self::read_utf8(path)?)),
            DocumentKind::Pdf => Self::extract_pdf(path),
        }
    }

    fn read_utf8(path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| Error::extraction(path.display().to_string(), e))
    }

    /// Strip markdown syntax down to plain text
    pub fn strip_markdown(markdown: &str) -> String {
        let mut text = markdown.to_string();
        for (pattern, replacement) in MARKDOWN_RULES.iter() {
            text = pattern.replace_all(&text, *replacement).into_owned();
        }
        text.trim().to_string()
    }

    /// Strip HTML down to plain text: script and style blocks first
    /// (content included), then remaining tags, the four common
    /// entities, and whitespace runs.
    pub fn strip_html(html: &str) -> String {
        let text = SCRIPT_BLOCKS.replace_all(html, "");
        let text = STYLE_BLOCKS.replace_all(&text, "");
        let text = HTML_TAGS.replace_all(&text, " ");
        let text = text
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">");
        WHITESPACE_RUNS.replace_all(&text, " ").trim().to_string()
    }

    /// Delegate PDF extraction to the reader and return its text
    /// verbatim
    fn extract_pdf(path: &Path) -> Result<String> {
        let data = fs::read(path).map_err(|e| Error::extraction(path.display().to_string(), e))?;
        pdf_extract::extract_text_from_mem(&data)
            .map_err(|e| Error::extraction(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn plain_text_passes_through_unchanged() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "line one\nline two\n").unwrap();
        let text = TextExtractor::extract(file.path()).unwrap();
        assert_eq!(text, "line one\nline two\n");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = TextExtractor::extract(Path::new("notes.docx")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ext) if ext == "docx"));
    }

    #[test]
    fn html_tags_are_stripped_and_whitespace_collapsed() {
        assert_eq!(
            TextExtractor::strip_html("<p>Hello <b>world</b></p>"),
            "Hello world"
        );
    }

    #[test]
    fn script_and_style_content_is_removed() {
        let html = "<html><head><style>p { color: red; }</style>\
                    <script type=\"text/javascript\">alert('hi');</script></head>\
                    <body><p>Visible</p></body></html>";
        assert_eq!(TextExtractor::strip_html(html), "Visible");
    }

    #[test]
    fn common_entities_are_decoded() {
        assert_eq!(
            TextExtractor::strip_html("a&nbsp;&lt;&nbsp;b&nbsp;&amp;&nbsp;c&nbsp;&gt;&nbsp;d"),
            "a < b & c > d"
        );
    }

    #[test]
    fn markdown_markers_are_stripped() {
        let markdown = "# Title\n\nSome **bold** and *italic* text with a [link](https://example.com).\n\n- first item\n- second item\n\n1. numbered\n";
        // The list-marker rules also consume the blank line preceding a
        // list, since `\s*` crosses newlines.
        assert_eq!(
            TextExtractor::strip_markdown(markdown),
            "Title\n\nSome bold and italic text with a link.\nfirst item\nsecond item\nnumbered"
        );
    }

    #[test]
    fn markdown_images_do_not_leave_alt_text_behind() {
        assert_eq!(
            TextExtractor::strip_markdown("before ![diagram](img.png) after"),
            "before  after"
        );
    }

    #[test]
    fn markdown_code_fences_are_removed() {
        let markdown = "intro\n```\nlet x = 1;\n```\nend";
        let text = TextExtractor::strip_markdown(markdown);
        assert!(!text.contains("let x"));
        assert!(text.contains("intro"));
        assert!(text.contains("end"));
    }
}
