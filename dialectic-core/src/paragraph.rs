//! Paragraph processing: normalize, tokenize, parse, filter, render.

use crate::error::ParseError;
use crate::filter::Filterable;
use crate::parser::Parser;
use crate::profile::Profile;
use crate::tokenizer::Tokenizer;
use crate::tree::Text;
use std::borrow::Cow;
use std::sync::Arc;

/// Turns raw paragraphs into filtered, normalized text
#[derive(Debug, Clone)]
pub struct ParagraphProcessor {
    profile: Arc<Profile>,
}

impl ParagraphProcessor {
    pub fn new(profile: Arc<Profile>) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Normalize a raw paragraph before tokenizing.
    ///
    /// Strips configured patterns (citation markers), applies character
    /// replacements, turns any whitespace into a plain space, trims, and
    /// appends the default ending mark when the paragraph lacks one.
    pub fn preprocess(&self, paragraph: &str) -> String {
        let mut stripped = Cow::Borrowed(paragraph);
        for pattern in self.profile.strip_patterns() {
            if pattern.is_match(&stripped) {
                stripped = Cow::Owned(pattern.replace_all(&stripped, "").into_owned());
            }
        }

        let normalized: String = stripped
            .chars()
            .map(|ch| self.profile.normalize_char(ch))
            .map(|ch| if ch.is_whitespace() { ' ' } else { ch })
            .collect();

        let mut result = normalized.trim().to_string();
        match result.chars().last() {
            None => {}
            Some(last) if self.profile.is_ending(last) => {}
            Some(_) => result.push(self.profile.default_ending()),
        }
        result
    }

    /// Build the filtered tree for a paragraph
    pub fn parse(&self, paragraph: &str) -> Result<Text, ParseError> {
        let normalized = self.preprocess(paragraph);
        let tokens = Tokenizer::new(&self.profile).tokenize(&normalized);
        let mut text = Parser::new().parse(&tokens)?;
        text.filter_chars(&|ch| self.profile.is_allowed(ch));
        Ok(text)
    }

    /// Process a paragraph, reporting malformed nesting
    pub fn process(&self, paragraph: &str) -> Result<String, ParseError> {
        Ok(self.parse(paragraph)?.to_string())
    }

    /// Process a paragraph, passing it through unchanged when it is malformed
    pub fn process_or_passthrough(&self, paragraph: &str) -> String {
        match self.process(paragraph) {
            Ok(rendered) => rendered,
            Err(e) => {
                log::warn!("Passing paragraph through unparsed: {e}");
                paragraph.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor() -> ParagraphProcessor {
        ParagraphProcessor::new(Profile::russian().unwrap())
    }

    #[test]
    fn test_preprocess_dashes_spaces_and_ending() {
        let p = processor();
        assert_eq!(
            p.preprocess("  Москва\u{00A0}— столица России  "),
            "Москва - столица России."
        );
        assert_eq!(p.preprocess("Правда?"), "Правда?");
        assert_eq!(p.preprocess("   "), "");
    }

    #[test]
    fn test_preprocess_strips_citations_and_newlines() {
        let p = processor();
        assert_eq!(
            p.preprocess("Город основан в 1147 году[1][23].\nОн\tбольшой"),
            "Город основан в 1147 году. Он большой."
        );
    }

    #[test]
    fn test_process_filters_foreign_text() {
        let p = processor();
        assert_eq!(
            p.process("Лондон (англ. London) — столица Великобритании").unwrap(),
            "Лондон (англ.) - столица Великобритании."
        );
    }

    #[test]
    fn test_process_drops_fully_foreign_sentences() {
        let p = processor();
        assert_eq!(p.process("Hello world. Привет, мир!").unwrap(), "Привет, мир!");
        assert_eq!(p.process("Only English here").unwrap(), "");
    }

    #[test]
    fn test_process_reports_malformed_nesting() {
        let p = processor();
        assert!(matches!(
            p.process("Начало (без конца"),
            Err(ParseError::Unterminated { .. })
        ));
    }

    #[test]
    fn test_passthrough_keeps_malformed_paragraph() {
        let p = processor();
        let raw = "Начало (без конца — и всё";
        assert_eq!(p.process_or_passthrough(raw), raw);
        assert_eq!(p.process_or_passthrough("Кот (рыжий) спит"), "Кот (рыжий) спит.");
    }
}
