//! HTML body detection
//!
//! Instances behind a proxy, in maintenance, or hibernating answer API calls
//! with an HTML page and a success status. Such bodies must be treated as
//! failures, so every response body is screened before decoding.

use regex::Regex;

const TAG_START: &str = r#"<\w+((\s+\w+(\s*=\s*(?:".*?"|'.*?'|[^'">\s]+))?)+\s*|\s*)>"#;
const TAG_END: &str = r"</\w+>";
const TAG_SELF_CLOSING: &str = r#"<\w+((\s+\w+(\s*=\s*(?:".*?"|'.*?'|[^'">\s]+))?)+\s*|\s*)/>"#;
const NAMED_ENTITY: &str = r"&[a-zA-Z][a-zA-Z0-9]+;";

/// Heuristic HTML detector.
///
/// A body is HTML if it contains a start tag followed somewhere by an end
/// tag, a self-closing tag, or a named character entity.
#[derive(Debug, Clone)]
pub struct HtmlDetector {
    pattern: Regex,
}

impl HtmlDetector {
    /// Compiles the detector
    pub fn new() -> Self {
        let source = format!("(?s)({TAG_START}.*{TAG_END})|({TAG_SELF_CLOSING})|({NAMED_ENTITY})");
        Self {
            pattern: Regex::new(&source).expect("HTML detection pattern is valid"),
        }
    }

    /// Whether the text looks like HTML
    pub fn is_html(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl Default for HtmlDetector {
    fn default() -> Self {
        Self::new()
    }
}
