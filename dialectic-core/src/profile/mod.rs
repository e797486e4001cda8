//! Character profiles
//!
//! A profile fixes the closed alphabet, the punctuation classes the tokenizer
//! recognizes and the phonological classes the formatter rewrites. Profiles
//! are described in TOML and compiled into lookup tables once.

pub mod config;
mod loader;

pub use config::ProfileConfig;
pub use loader::{get_profile, list_available_profiles};

use crate::error::ProfileError;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// Tokenizer class of a non-word character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    OpenParenthetical,
    CloseParenthetical,
    OpenGuillemet,
    CloseGuillemet,
    StraightQuote,
    Ending,
    Punctuation,
    /// Allowed symbol that terminates a word but may start one
    Symbol,
    Separator,
}

/// Compiled character profile
#[derive(Debug, Clone)]
pub struct Profile {
    code: String,
    name: String,

    classes: HashMap<char, CharClass>,
    word_joiners: HashSet<char>,

    letters: HashSet<char>,
    allowed: HashSet<char>,
    output_only: HashSet<char>,

    hard_vowels: HashSet<char>,
    soft_vowels: HashSet<char>,
    paired_consonants: HashSet<char>,
    consonants: HashSet<char>,
    combining_marks: HashSet<char>,
    signs: HashSet<char>,
    acceptance_markers: HashSet<char>,
    iotation: HashMap<char, char>,

    softness_marker: char,
    stress_mark: char,
    iotation_glide: char,
    short_pause: String,
    long_pause: String,

    default_ending: char,
    replacements: HashMap<char, char>,
    strip_patterns: Vec<Regex>,
}

impl Profile {
    /// Look up an embedded profile by language code or name
    pub fn from_code(code: &str) -> Result<Arc<Self>, ProfileError> {
        get_profile(code)
    }

    /// The embedded Russian profile
    pub fn russian() -> Result<Arc<Self>, ProfileError> {
        get_profile("ru")
    }

    /// Load a profile from an external TOML file
    pub fn from_file(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProfileError::ConfigurationError(format!(
                "Failed to read file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: ProfileConfig = toml::from_str(&content).map_err(|e| {
            ProfileError::ConfigurationError(format!(
                "Failed to parse TOML from '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_config(&config)
    }

    /// Compile a profile from configuration
    pub fn from_config(config: &ProfileConfig) -> Result<Self, ProfileError> {
        config.validate()?;

        let alphabet = &config.alphabet;
        let punctuation = &config.punctuation;
        let phonology = &config.phonology;

        let mut classes = HashMap::new();
        for &ch in &alphabet.symbols {
            classes.insert(ch, CharClass::Symbol);
        }
        for &ch in &alphabet.separators {
            classes.insert(ch, CharClass::Separator);
        }
        for &ch in &punctuation.generic {
            classes.insert(ch, CharClass::Punctuation);
        }
        for &ch in &punctuation.ending {
            classes.insert(ch, CharClass::Ending);
        }
        for pair in &punctuation.guillemets {
            classes.insert(pair.open, CharClass::OpenGuillemet);
            classes.insert(pair.close, CharClass::CloseGuillemet);
        }
        for &ch in &punctuation.straight_quotes {
            classes.insert(ch, CharClass::StraightQuote);
        }
        // Parentheticals win over everything else
        for pair in &punctuation.parentheticals {
            classes.insert(pair.open, CharClass::OpenParenthetical);
            classes.insert(pair.close, CharClass::CloseParenthetical);
        }

        let letters: HashSet<char> = alphabet
            .lowercase
            .chars()
            .chain(alphabet.uppercase.chars())
            .collect();

        let mut allowed = letters.clone();
        allowed.extend(alphabet.digits.chars());
        allowed.extend(alphabet.dialectic.iter().copied());
        allowed.extend(classes.keys().copied());

        let mut output_only = HashSet::new();
        output_only.insert(phonology.iotation_glide);
        output_only.insert(phonology.softness_marker);
        output_only.insert(phonology.stress_mark);
        output_only.extend(config.pauses.short.chars());
        output_only.extend(config.pauses.long.chars());
        output_only.retain(|ch| !allowed.contains(ch));

        let hard_vowels: HashSet<char> = phonology.hard_vowels.chars().collect();
        let soft_vowels: HashSet<char> = phonology.soft_vowels.chars().collect();
        let paired_consonants: HashSet<char> = phonology.paired_consonants.chars().collect();
        let consonants: HashSet<char> = phonology
            .paired_consonants
            .chars()
            .chain(phonology.always_soft_consonants.chars())
            .chain(phonology.always_hard_consonants.chars())
            .collect();

        let combining_marks: HashSet<char> = alphabet
            .dialectic
            .iter()
            .copied()
            .chain(std::iter::once(phonology.stress_mark))
            .filter(|&ch| is_combining(ch))
            .collect();

        let mut iotation = HashMap::new();
        for rule in &phonology.iotation {
            iotation.insert(rule.soft, rule.hard);
            // The hard vowel stays lowercase after the glide
            if let Some(soft) = single_upper(rule.soft) {
                iotation.insert(soft, rule.hard);
            }
        }

        let strip_patterns = config
            .normalization
            .strip_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    ProfileError::InvalidProfile(format!("Invalid strip pattern '{pattern}': {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            code: config.metadata.code.clone(),
            name: config.metadata.name.clone(),
            classes,
            word_joiners: punctuation.word_joiners.iter().copied().collect(),
            letters,
            allowed,
            output_only,
            hard_vowels,
            soft_vowels,
            paired_consonants,
            consonants,
            combining_marks,
            signs: phonology.signs.chars().collect(),
            acceptance_markers: phonology.acceptance_markers.iter().copied().collect(),
            iotation,
            softness_marker: phonology.softness_marker,
            stress_mark: phonology.stress_mark,
            iotation_glide: phonology.iotation_glide,
            short_pause: config.pauses.short.clone(),
            long_pause: config.pauses.long.clone(),
            default_ending: config.normalization.default_ending,
            replacements: config
                .normalization
                .replacements
                .iter()
                .map(|r| (r.from, r.to))
                .collect(),
            strip_patterns,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tokenizer class of a character, `None` for word characters
    pub fn char_class(&self, ch: char) -> Option<CharClass> {
        self.classes.get(&ch).copied()
    }

    pub fn is_word_joiner(&self, ch: char) -> bool {
        self.word_joiners.contains(&ch)
    }

    /// Whether `ch` belongs to the closed text alphabet
    pub fn is_allowed(&self, ch: char) -> bool {
        self.allowed.contains(&ch)
    }

    /// Whether `ch` may appear in formatted output
    pub fn is_output_char(&self, ch: char) -> bool {
        self.allowed.contains(&ch) || self.output_only.contains(&ch)
    }

    pub fn is_letter(&self, ch: char) -> bool {
        self.letters.contains(&ch)
    }

    pub fn is_vowel(&self, ch: char) -> bool {
        self.hard_vowels.contains(&ch) || self.soft_vowels.contains(&ch)
    }

    pub fn is_soft_vowel(&self, ch: char) -> bool {
        self.soft_vowels.contains(&ch)
    }

    pub fn is_consonant(&self, ch: char) -> bool {
        self.consonants.contains(&ch)
    }

    pub fn is_paired_consonant(&self, ch: char) -> bool {
        self.paired_consonants.contains(&ch)
    }

    /// Hard or soft sign
    pub fn is_sign(&self, ch: char) -> bool {
        self.signs.contains(&ch)
    }

    /// Combining diacritic that attaches to the preceding character
    pub fn is_combining_mark(&self, ch: char) -> bool {
        self.combining_marks.contains(&ch)
    }

    pub fn is_acceptance_marker(&self, ch: char) -> bool {
        self.acceptance_markers.contains(&ch)
    }

    pub fn is_ending(&self, ch: char) -> bool {
        self.char_class(ch) == Some(CharClass::Ending)
    }

    /// Sentence ending marks in code point order
    pub fn ending_marks(&self) -> Vec<char> {
        let mut marks: Vec<char> = self
            .classes
            .iter()
            .filter(|&(_, &class)| class == CharClass::Ending)
            .map(|(&ch, _)| ch)
            .collect();
        marks.sort_unstable();
        marks
    }

    /// Iotation substitution for a soft vowel as `(glide, hard vowel)`
    pub fn iotation_of(&self, ch: char) -> Option<(char, char)> {
        self.iotation
            .get(&ch)
            .map(|&hard| (self.iotation_glide, hard))
    }

    pub fn softness_marker(&self) -> char {
        self.softness_marker
    }

    pub fn stress_mark(&self) -> char {
        self.stress_mark
    }

    pub fn short_pause(&self) -> &str {
        &self.short_pause
    }

    pub fn long_pause(&self) -> &str {
        &self.long_pause
    }

    pub fn default_ending(&self) -> char {
        self.default_ending
    }

    /// Replacement for a character during normalization
    pub fn normalize_char(&self, ch: char) -> char {
        self.replacements.get(&ch).copied().unwrap_or(ch)
    }

    pub fn strip_patterns(&self) -> &[Regex] {
        &self.strip_patterns
    }
}

/// Combining Diacritical Marks block
fn is_combining(ch: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&ch)
}

fn single_upper(ch: char) -> Option<char> {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if u != ch => Some(u),
        _ => None,
    }
}
