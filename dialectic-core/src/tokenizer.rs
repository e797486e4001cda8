//! Tokenizer for normalized paragraphs.
//!
//! Scans a paragraph character by character and classifies every
//! character through the profile. Anything the profile does not classify
//! starts a word; words extend greedily until the next classified
//! character, except that word joiners (the hyphen) stay inside a word
//! once it has started. Separators produce no tokens.

use crate::profile::{CharClass, Profile};
use crate::token::{Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

/// Tokenizer bound to a profile.
///
/// Holds no scan state between calls, so a single instance can be shared
/// between threads.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'p> {
    profile: &'p Profile,
}

impl<'p> Tokenizer<'p> {
    pub fn new(profile: &'p Profile) -> Self {
        Self { profile }
    }

    /// Tokenize `text`. The result always ends with a single `Eof` token.
    pub fn tokenize<'t>(&self, text: &'t str) -> Vec<Token<'t>> {
        let mut tokens = Vec::new();
        let mut chars = text.char_indices().peekable();

        while let Some((start, ch)) = chars.next() {
            let kind = match self.profile.char_class(ch) {
                Some(CharClass::Separator) => continue,
                Some(CharClass::OpenParenthetical) => TokenKind::OpenParenthetical,
                Some(CharClass::CloseParenthetical) => TokenKind::CloseParenthetical,
                Some(CharClass::StraightQuote) => TokenKind::Quote,
                Some(CharClass::OpenGuillemet) => TokenKind::OpenGuillemet,
                Some(CharClass::CloseGuillemet) => TokenKind::CloseGuillemet,
                Some(CharClass::Ending) => TokenKind::EndingPunctuation,
                Some(CharClass::Punctuation) => TokenKind::Punctuation,
                Some(CharClass::Symbol) | None => {
                    let end = self.scan_word(&mut chars, start + ch.len_utf8());
                    tokens.push(Token::new(TokenKind::Word, start, &text[start..end]));
                    continue;
                }
            };

            tokens.push(Token::new(kind, start, &text[start..start + ch.len_utf8()]));
        }

        tokens.push(Token::eof(text.len()));
        tokens
    }

    /// Consume word characters and return the end offset of the word
    fn scan_word(&self, chars: &mut Peekable<CharIndices<'_>>, mut end: usize) -> usize {
        while let Some(&(offset, next)) = chars.peek() {
            let continues = self.profile.char_class(next).is_none()
                || self.profile.is_word_joiner(next);
            if !continues {
                break;
            }
            end = offset + next.len_utf8();
            chars.next();
        }
        end
    }
}

/// Tokenize with a profile in one call
pub fn tokenize<'t>(profile: &Profile, text: &'t str) -> Vec<Token<'t>> {
    Tokenizer::new(profile).tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        let profile = Profile::russian().unwrap();
        tokenize(&profile, text).iter().map(|t| t.kind).collect()
    }

    fn literals(text: &str) -> Vec<String> {
        let profile = Profile::russian().unwrap();
        tokenize(&profile, text)
            .iter()
            .map(|t| t.literal.to_string())
            .collect()
    }

    #[test]
    fn test_simple_sentence() {
        use TokenKind::*;
        assert_eq!(
            kinds("Кот сидел, мама читала."),
            vec![Word, Word, Punctuation, Word, Word, EndingPunctuation, Eof]
        );
        assert_eq!(
            literals("Кот сидел, мама читала."),
            vec!["Кот", "сидел", ",", "мама", "читала", ".", ""]
        );
    }

    #[test]
    fn test_delimiters() {
        use TokenKind::*;
        assert_eq!(
            kinds("(а) [б] «в» \"г\" 'д'"),
            vec![
                OpenParenthetical,
                Word,
                CloseParenthetical,
                OpenParenthetical,
                Word,
                CloseParenthetical,
                OpenGuillemet,
                Word,
                CloseGuillemet,
                Quote,
                Word,
                Quote,
                Quote,
                Word,
                Quote,
                Eof
            ]
        );
    }

    #[test]
    fn test_hyphen_inside_word() {
        assert_eq!(literals("северо-запад"), vec!["северо-запад", ""]);
        // Word-initial or isolated hyphen is punctuation
        assert_eq!(literals("- да -нет"), vec!["-", "да", "-", "нет", ""]);
        assert_eq!(kinds("а - б")[1], TokenKind::Punctuation);
    }

    #[test]
    fn test_positions_are_byte_offsets() {
        let profile = Profile::russian().unwrap();
        let text = "Да, нет!";
        let tokens = tokenize(&profile, text);
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, "Да".len());
        assert_eq!(tokens[2].position, "Да, ".len());
        assert_eq!(tokens.last().unwrap().position, text.len());
        for token in &tokens[..tokens.len() - 1] {
            assert_eq!(&text[token.position..token.position + token.literal.len()], token.literal);
        }
    }

    #[test]
    fn test_foreign_characters_stay_in_words() {
        assert_eq!(literals("word café."), vec!["word", "café", ".", ""]);
    }

    #[test]
    fn test_symbol_terminates_word() {
        assert_eq!(literals("50% всех"), vec!["50", "%", "всех", ""]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_tokenizer_is_restartable() {
        let profile = Profile::russian().unwrap();
        let tokenizer = Tokenizer::new(&profile);
        let first = tokenizer.tokenize("Раз. Два.");
        let second = tokenizer.tokenize("Раз. Два.");
        assert_eq!(first, second);
    }
}
