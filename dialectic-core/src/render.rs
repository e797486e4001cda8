//! Rendering the sentence tree back to flat text.
//!
//! A space goes before every word, nested span and hyphen except the first
//! element of a sentence; other punctuation attaches to what precedes it.
//! Ending marks follow the content without spaces, sentences are joined by
//! single spaces and spans reproduce their captured delimiters.

use crate::tree::{Element, Sentence, SubText, Text};
use std::fmt;

const HYPHEN: &str = "-";

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Word(literal) | Element::Punctuation(literal) => f.write_str(literal),
            Element::SubText(sub) => fmt::Display::fmt(sub, f),
        }
    }
}

impl fmt::Display for SubText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.before, self.text, self.after)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.content.iter().enumerate() {
            if i > 0 && spaced(element) {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(element, f)?;
        }
        for mark in &self.ending {
            f.write_str(mark)?;
        }
        Ok(())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sentence) in self.sentences.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(sentence, f)?;
        }
        Ok(())
    }
}

fn spaced(element: &Element) -> bool {
    match element {
        Element::Word(_) | Element::SubText(_) => true,
        Element::Punctuation(literal) => literal == HYPHEN,
    }
}

/// Render a tree to a string
pub fn render(text: &Text) -> String {
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::profile::Profile;
    use crate::tokenizer::tokenize;

    fn round_trip(input: &str) -> String {
        let profile = Profile::russian().unwrap();
        render(&parse(&tokenize(&profile, input)).unwrap())
    }

    #[test]
    fn test_spacing_rules() {
        let text = Text::new(vec![Sentence::new(vec![
            Element::word("Москва"),
            Element::punctuation(","),
            Element::word("столица"),
            Element::punctuation("-"),
            Element::word("город"),
            Element::punctuation(":"),
            Element::SubText(SubText::new(
                "(",
                Text::new(vec![Sentence::new(vec![Element::word("большой")])]),
                ")",
            )),
        ])
        .with_ending(["!", "?"])]);
        assert_eq!(
            render(&text),
            "Москва, столица - город: (большой)!?"
        );
    }

    #[test]
    fn test_round_trip_nested() {
        let input = "Он сказал (тихо): «Привет». Все ушли!";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_round_trip_quotes_and_brackets() {
        let input = "Книга \"Война и мир [том 1]\" издана в 1869 году.";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_round_trip_normalizes_whitespace() {
        assert_eq!(round_trip("Кот  ,  сидел .   Всё"), "Кот, сидел. Всё");
    }

    #[test]
    fn test_empty_text_renders_empty() {
        assert_eq!(render(&Text::default()), "");
    }
}
