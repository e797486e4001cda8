//! Configuration structures and validation
//!
//! This module defines the TOML schema for character profiles.

use crate::error::ProfileError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root profile configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub metadata: Metadata,
    pub alphabet: Alphabet,
    pub punctuation: Punctuation,
    pub phonology: Phonology,
    pub pauses: Pauses,
    #[serde(default)]
    pub normalization: Normalization,
}

/// Profile metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
}

/// Letters and the other characters that survive filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alphabet {
    pub lowercase: String,
    pub uppercase: String,
    #[serde(default)]
    pub digits: String,
    /// Allowed non-letter characters that terminate words
    #[serde(default)]
    pub symbols: Vec<char>,
    /// Stress and softness diacritics
    #[serde(default)]
    pub dialectic: Vec<char>,
    #[serde(default = "default_separators")]
    pub separators: Vec<char>,
}

/// Punctuation classes recognized by the tokenizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Punctuation {
    pub ending: Vec<char>,
    #[serde(default)]
    pub generic: Vec<char>,
    /// Characters that do not terminate a word once it has started
    #[serde(default)]
    pub word_joiners: Vec<char>,
    #[serde(default)]
    pub straight_quotes: Vec<char>,
    #[serde(default)]
    pub parentheticals: Vec<DelimiterPair>,
    #[serde(default)]
    pub guillemets: Vec<DelimiterPair>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DelimiterPair {
    pub open: char,
    pub close: char,
}

/// Phonological character classes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phonology {
    pub hard_vowels: String,
    pub soft_vowels: String,
    pub paired_consonants: String,
    #[serde(default)]
    pub always_soft_consonants: String,
    #[serde(default)]
    pub always_hard_consonants: String,
    /// Hard and soft signs; a soft vowel right after one is iotated
    #[serde(default)]
    pub signs: String,
    pub softness_marker: char,
    pub stress_mark: char,
    pub iotation_glide: char,
    /// Characters whose presence makes a generated sentence acceptable
    #[serde(default)]
    pub acceptance_markers: Vec<char>,
    #[serde(default)]
    pub iotation: Vec<IotationRule>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IotationRule {
    pub soft: char,
    pub hard: char,
}

/// Pause tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pauses {
    pub short: String,
    pub long: String,
}

/// Paragraph normalization applied before tokenizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Normalization {
    #[serde(default = "default_ending")]
    pub default_ending: char,
    #[serde(default)]
    pub strip_patterns: Vec<String>,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            default_ending: default_ending(),
            strip_patterns: Vec::new(),
            replacements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Replacement {
    pub from: char,
    pub to: char,
}

fn default_separators() -> Vec<char> {
    vec![' ']
}

fn default_ending() -> char {
    '.'
}

/// Tokenizer role of a delimiter character, used to detect overlaps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Parenthetical,
    Guillemet,
    Quote,
    Ending,
    Generic,
}

impl ProfileConfig {
    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<(), ProfileError> {
        if self.alphabet.lowercase.is_empty() {
            return Err(ProfileError::InvalidProfile(
                "No lowercase letters defined".to_string(),
            ));
        }

        if self.punctuation.ending.is_empty() {
            return Err(ProfileError::InvalidProfile(
                "No ending punctuation defined".to_string(),
            ));
        }

        if !self.punctuation.ending.contains(&self.normalization.default_ending) {
            return Err(ProfileError::InvalidProfile(format!(
                "Default ending '{}' is not an ending mark",
                self.normalization.default_ending
            )));
        }

        if self.pauses.short.trim().is_empty() || self.pauses.long.trim().is_empty() {
            return Err(ProfileError::InvalidProfile(
                "Pause tokens must not be blank".to_string(),
            ));
        }

        let mut roles: HashMap<char, Role> = HashMap::new();
        let mut claim = |ch: char, role: Role| -> Result<(), ProfileError> {
            match roles.insert(ch, role) {
                Some(previous) if previous != role => Err(ProfileError::InvalidProfile(format!(
                    "Character '{ch}' is both {previous:?} and {role:?}"
                ))),
                _ => Ok(()),
            }
        };

        for pair in &self.punctuation.parentheticals {
            claim(pair.open, Role::Parenthetical)?;
            claim(pair.close, Role::Parenthetical)?;
        }
        for pair in &self.punctuation.guillemets {
            claim(pair.open, Role::Guillemet)?;
            claim(pair.close, Role::Guillemet)?;
        }
        for &ch in &self.punctuation.straight_quotes {
            claim(ch, Role::Quote)?;
        }
        for &ch in &self.punctuation.ending {
            claim(ch, Role::Ending)?;
        }
        for &ch in &self.punctuation.generic {
            claim(ch, Role::Generic)?;
        }

        let phonology = &self.phonology;
        if let Some(sign) = phonology.signs.chars().find(|&ch| {
            phonology.hard_vowels.contains(ch)
                || phonology.soft_vowels.contains(ch)
                || phonology.paired_consonants.contains(ch)
                || phonology.always_soft_consonants.contains(ch)
                || phonology.always_hard_consonants.contains(ch)
        }) {
            return Err(ProfileError::InvalidProfile(format!(
                "Sign '{sign}' is also a vowel or consonant"
            )));
        }

        for rule in &self.phonology.iotation {
            if !self.phonology.soft_vowels.contains(rule.soft) {
                return Err(ProfileError::InvalidProfile(format!(
                    "Iotation source '{}' is not a soft vowel",
                    rule.soft
                )));
            }
            if !self.phonology.hard_vowels.contains(rule.hard) {
                return Err(ProfileError::InvalidProfile(format!(
                    "Iotation target '{}' is not a hard vowel",
                    rule.hard
                )));
            }
        }

        Ok(())
    }
}
