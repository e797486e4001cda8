//! Sentence tree produced by the parser.
//!
//! `Text` holds sentences, a `Sentence` holds content elements and its
//! ending marks, and a `SubText` is a nested `Text` together with the
//! delimiters that bounded it. The tree is built per paragraph and owns
//! all of its nodes.

use smallvec::SmallVec;

/// A content element of a sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Word(String),
    Punctuation(String),
    SubText(SubText),
}

impl Element {
    pub fn word(literal: impl Into<String>) -> Self {
        Element::Word(literal.into())
    }

    pub fn punctuation(literal: impl Into<String>) -> Self {
        Element::Punctuation(literal.into())
    }

    pub fn is_punctuation(&self) -> bool {
        matches!(self, Element::Punctuation(_))
    }
}

/// A sentence: content elements followed by ending marks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    pub content: Vec<Element>,
    /// Marks from the ending class only
    pub ending: SmallVec<[String; 1]>,
}

impl Sentence {
    pub fn new(content: Vec<Element>) -> Self {
        Self {
            content,
            ending: SmallVec::new(),
        }
    }

    pub fn with_ending<I, S>(mut self, marks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ending.extend(marks.into_iter().map(Into::into));
        self
    }

    /// A sentence is empty when it has no content, whatever its ending
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// An ordered sequence of sentences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    pub sentences: Vec<Sentence>,
}

impl Text {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Number of words in the tree, nested spans included
    pub fn word_count(&self) -> usize {
        self.sentences
            .iter()
            .flat_map(|s| s.content.iter())
            .map(|element| match element {
                Element::Word(_) => 1,
                Element::Punctuation(_) => 0,
                Element::SubText(sub) => sub.text.word_count(),
            })
            .sum()
    }

    /// Deepest nesting of delimited spans
    pub fn depth(&self) -> usize {
        self.sentences
            .iter()
            .flat_map(|s| s.content.iter())
            .filter_map(|element| match element {
                Element::SubText(sub) => Some(1 + sub.text.depth()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }
}

/// A parenthetical or quoted span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubText {
    /// Opening delimiter literal
    pub before: String,
    pub text: Text,
    /// Closing delimiter literal
    pub after: String,
}

impl SubText {
    pub fn new(before: impl Into<String>, text: Text, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            text,
            after: after.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
