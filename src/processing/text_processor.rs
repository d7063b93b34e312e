//! Resume text normalization

use crate::error::{Result, WorkforceError};

/// Normalized resume text: lowercase ASCII letters, digits and whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

pub struct TextProcessor;

impl TextProcessor {
    /// Lowercase `text` and replace every character outside `[a-z0-9]` and
    /// whitespace with a space.
    ///
    /// Text with nothing left but whitespace is an extraction failure.
    pub fn normalize(text: &str) -> Result<NormalizedText> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        if cleaned.trim().is_empty() {
            return Err(WorkforceError::Extraction(
                "Could not extract text from resume".to_string(),
            ));
        }

        Ok(NormalizedText(cleaned))
    }

    /// Capitalize the first letter of every alphabetic run, lowercase the rest.
    ///
    /// `"machine learning"` → `"Machine Learning"`, `"node.js"` → `"Node.Js"`.
    pub fn title_case(text: &str) -> String {
        let mut previous_alpha = false;
        let mut out = String::with_capacity(text.len());

        for c in text.chars() {
            if c.is_alphabetic() {
                if previous_alpha {
                    out.extend(c.to_lowercase());
                } else {
                    out.extend(c.to_uppercase());
                }
                previous_alpha = true;
            } else {
                out.push(c);
                previous_alpha = false;
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        let text = TextProcessor::normalize("Built ML pipelines (Python/SQL) @ Acme, 2023!").unwrap();
        assert_eq!(text.as_str(), "built ml pipelines  python sql    acme  2023 ");
        assert_eq!(text.word_count(), 7);
    }

    #[test]
    fn test_normalize_keeps_newlines() {
        let text = TextProcessor::normalize("Rust\nGo\tC++").unwrap();
        assert_eq!(text.as_str(), "rust\ngo\tc  ");
    }

    #[test]
    fn test_blank_text_is_extraction_error() {
        for input in ["", "   \n\t", "!!! --- ???"] {
            assert!(matches!(
                TextProcessor::normalize(input),
                Err(WorkforceError::Extraction(_))
            ));
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(TextProcessor::title_case("machine learning"), "Machine Learning");
        assert_eq!(TextProcessor::title_case("node.js"), "Node.Js");
        assert_eq!(TextProcessor::title_case("c++"), "C++");
        assert_eq!(TextProcessor::title_case("AWS"), "Aws");
        assert_eq!(TextProcessor::title_case("power bi 2"), "Power Bi 2");
    }
}
