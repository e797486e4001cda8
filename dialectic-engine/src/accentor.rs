//! Stress placement
//!
//! An [`Accentor`] receives space-joined words restricted to the profile
//! alphabet and returns the same text with the stress mark inserted right
//! after every stressed vowel. [`LexiconAccentor`] is an offline
//! implementation backed by a TOML word list.

use crate::error::{AccentError, EngineError, Result};
use dialectic_core::Profile;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// Places stress marks in plain text
pub trait Accentor: Send + Sync {
    /// Insert the stress mark after each stressed vowel of `text`
    fn accent(&self, text: &str) -> std::result::Result<String, AccentError>;
}

impl<F> Accentor for F
where
    F: Fn(&str) -> std::result::Result<String, AccentError> + Send + Sync,
{
    fn accent(&self, text: &str) -> std::result::Result<String, AccentError> {
        self(text)
    }
}

/// Marks the stressed vowel in a lexicon entry
const STRESS_PREFIX: char = '+';

#[derive(Debug, Deserialize)]
struct LexiconFile {
    metadata: LexiconMetadata,
    #[serde(default)]
    rules: LexiconRules,
    #[serde(default)]
    words: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct LexiconMetadata {
    language: String,
}

#[derive(Debug, Default, Deserialize)]
struct LexiconRules {
    /// Vowels that carry the stress wherever they appear
    #[serde(default)]
    always_stressed: Vec<char>,
}

/// Offline accentor over a word list
///
/// Lookup order for a word: the lexicon, then an always-stressed vowel,
/// then the only vowel of a monosyllable. Words that already carry a
/// combining mark are left alone. Unknown polysyllables pass through
/// unstressed, or fail in strict mode.
#[derive(Debug, Clone)]
pub struct LexiconAccentor {
    profile: Arc<Profile>,
    /// Lowercase word to char index of its stressed vowel
    words: HashMap<String, usize>,
    always_stressed: HashSet<char>,
    strict: bool,
    limit: Option<usize>,
}

impl LexiconAccentor {
    /// The lexicon shipped with the crate
    pub fn russian(profile: Arc<Profile>) -> Result<Self> {
        Self::from_toml_str(profile, include_str!("../configs/lexicons/russian.toml"))
    }

    /// Load a lexicon from TOML text
    pub fn from_toml_str(profile: Arc<Profile>, content: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(content)
            .map_err(|e| EngineError::ConfigError(format!("Failed to parse lexicon: {e}")))?;

        if file.metadata.language != profile.code() {
            return Err(EngineError::ConfigError(format!(
                "Lexicon language '{}' does not match profile '{}'",
                file.metadata.language,
                profile.code()
            )));
        }

        let mut words = HashMap::with_capacity(file.words.len());
        for (word, marked) in &file.words {
            let index = stressed_index(&profile, word, marked)?;
            words.insert(word.to_lowercase(), index);
        }
        log::debug!("Loaded lexicon with {} words", words.len());

        let mut always_stressed: HashSet<char> = HashSet::new();
        for ch in file.rules.always_stressed {
            always_stressed.extend(ch.to_lowercase());
            always_stressed.extend(ch.to_uppercase());
        }

        Ok(Self {
            profile,
            words,
            always_stressed,
            strict: false,
            limit: None,
        })
    }

    /// Load a lexicon from a TOML file
    pub fn from_file(profile: Arc<Profile>, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::IoError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(profile, &content)
    }

    /// Fail on polysyllables missing from the lexicon
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Reject requests longer than `limit` characters
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of lexicon entries
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the lexicon has no entries
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn flush(&self, run: &mut String, out: &mut String) -> std::result::Result<(), AccentError> {
        if run.is_empty() {
            return Ok(());
        }
        out.push_str(&self.stress_word(run)?);
        run.clear();
        Ok(())
    }

    fn stress_word(&self, word: &str) -> std::result::Result<String, AccentError> {
        if word.chars().any(|ch| self.profile.is_combining_mark(ch)) {
            return Ok(word.to_string());
        }
        if !word.chars().any(|ch| self.profile.is_vowel(ch)) {
            return Ok(word.to_string());
        }

        let index = self
            .words
            .get(&word.to_lowercase())
            .copied()
            .or_else(|| self.infer_stress(word));

        match index {
            Some(index) => Ok(insert_after(word, index, self.profile.stress_mark())),
            None if self.strict => Err(AccentError::UnknownWord(word.to_string())),
            None => Ok(word.to_string()),
        }
    }

    fn infer_stress(&self, word: &str) -> Option<usize> {
        if let Some(index) = word.chars().position(|ch| self.always_stressed.contains(&ch)) {
            return Some(index);
        }

        let mut vowels = word
            .chars()
            .enumerate()
            .filter(|&(_, ch)| self.profile.is_vowel(ch));
        match (vowels.next(), vowels.next()) {
            (Some((index, _)), None) => Some(index),
            _ => None,
        }
    }
}

impl Accentor for LexiconAccentor {
    fn accent(&self, text: &str) -> std::result::Result<String, AccentError> {
        if let Some(limit) = self.limit {
            let len = text.chars().count();
            if len > limit {
                return Err(AccentError::TooLong { len, limit });
            }
        }

        let mut out = String::with_capacity(text.len() + text.len() / 4);
        let mut run = String::new();
        for ch in text.chars() {
            if self.profile.is_letter(ch) || (!run.is_empty() && self.profile.is_combining_mark(ch))
            {
                run.push(ch);
            } else {
                self.flush(&mut run, &mut out)?;
                out.push(ch);
            }
        }
        self.flush(&mut run, &mut out)?;
        Ok(out)
    }
}

/// Char index of the vowel following the stress prefix in `marked`
fn stressed_index(profile: &Profile, word: &str, marked: &str) -> Result<usize> {
    let invalid = |reason: &str| {
        EngineError::ConfigError(format!("Invalid lexicon entry '{word}' = '{marked}': {reason}"))
    };

    if marked.matches(STRESS_PREFIX).count() != 1 {
        return Err(invalid("expected exactly one stress prefix"));
    }
    let plain: String = marked.chars().filter(|&ch| ch != STRESS_PREFIX).collect();
    if plain.to_lowercase() != word.to_lowercase() {
        return Err(invalid("spelling differs from the key"));
    }

    let index = marked
        .chars()
        .position(|ch| ch == STRESS_PREFIX)
        .ok_or_else(|| invalid("expected exactly one stress prefix"))?;
    match plain.chars().nth(index) {
        Some(ch) if profile.is_vowel(ch) => Ok(index),
        _ => Err(invalid("stress prefix must precede a vowel")),
    }
}

fn insert_after(word: &str, index: usize, mark: char) -> String {
    let mut out = String::with_capacity(word.len() + mark.len_utf8());
    for (i, ch) in word.chars().enumerate() {
        out.push(ch);
        if i == index {
            out.push(mark);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ACUTE: char = '\u{0301}';

    fn lexicon() -> LexiconAccentor {
        LexiconAccentor::from_toml_str(
            Profile::russian().unwrap(),
            r#"
[metadata]
language = "ru"

[rules]
always_stressed = ["ё"]

[words]
"мама" = "м+ама"
"читала" = "чит+ала"
"#,
        )
        .unwrap()
    }

    fn stressed(word: &str, index: usize) -> String {
        insert_after(word, index, ACUTE)
    }

    #[test]
    fn test_lexicon_lookup_keeps_case() {
        let accentor = lexicon();
        assert_eq!(accentor.accent("мама").unwrap(), stressed("мама", 1));
        assert_eq!(accentor.accent("Мама").unwrap(), stressed("Мама", 1));
        assert_eq!(
            accentor.accent("мама читала").unwrap(),
            format!("{} {}", stressed("мама", 1), stressed("читала", 3))
        );
    }

    #[test]
    fn test_inferred_stress() {
        let accentor = lexicon();
        // Monosyllable
        assert_eq!(accentor.accent("кот").unwrap(), stressed("кот", 1));
        // Always-stressed vowel, either case
        assert_eq!(accentor.accent("ёлка").unwrap(), stressed("ёлка", 0));
        assert_eq!(accentor.accent("Ёлка").unwrap(), stressed("Ёлка", 0));
        // No vowel at all
        assert_eq!(accentor.accent("в").unwrap(), "в");
    }

    #[test]
    fn test_unknown_polysyllable() {
        let accentor = lexicon();
        assert_eq!(accentor.accent("корова").unwrap(), "корова");

        let strict = lexicon().strict(true);
        assert_eq!(
            strict.accent("корова"),
            Err(AccentError::UnknownWord("корова".to_string()))
        );
    }

    #[test]
    fn test_punctuation_and_marks_pass_through() {
        let accentor = lexicon();
        let already = stressed("корова", 3);
        assert_eq!(accentor.accent(&already).unwrap(), already);
        assert_eq!(
            accentor.accent("(мама), кот.").unwrap(),
            format!("({}), {}.", stressed("мама", 1), stressed("кот", 1))
        );
    }

    #[test]
    fn test_request_limit() {
        let accentor = lexicon().with_limit(5);
        assert!(accentor.accent("мама").is_ok());
        assert_eq!(
            accentor.accent("мама кот"),
            Err(AccentError::TooLong { len: 8, limit: 5 })
        );
    }

    #[test]
    fn test_invalid_entries_rejected() {
        let profile = Profile::russian().unwrap();
        for entry in [r#""мама" = "мама""#, r#""мама" = "+м+ама""#, r#""мама" = "+мама""#, r#""мама" = "п+апа""#] {
            let content = format!("[metadata]\nlanguage = \"ru\"\n[words]\n{entry}\n");
            assert!(
                LexiconAccentor::from_toml_str(profile.clone(), &content).is_err(),
                "{entry} should be rejected"
            );
        }
    }

    #[test]
    fn test_language_mismatch() {
        let err = LexiconAccentor::from_toml_str(
            Profile::russian().unwrap(),
            "[metadata]\nlanguage = \"uk\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn test_embedded_and_file_lexicon() {
        let profile = Profile::russian().unwrap();
        let embedded = LexiconAccentor::russian(profile.clone()).unwrap();
        assert!(!embedded.is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(include_str!("../configs/lexicons/russian.toml").as_bytes())
            .unwrap();
        let loaded = LexiconAccentor::from_file(profile, file.path()).unwrap();
        assert_eq!(loaded.len(), embedded.len());
    }

    #[test]
    fn test_closure_accentor() {
        let upper = |text: &str| -> std::result::Result<String, AccentError> { Ok(text.to_uppercase()) };
        assert_eq!(upper.accent("кот").unwrap(), "КОТ");
    }
}
