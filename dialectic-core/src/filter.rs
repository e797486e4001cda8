//! Character-predicate filtering of the sentence tree.
//!
//! Leaves keep only the characters accepted by the predicate. Elements
//! left empty are dropped together with the punctuation right before them,
//! trailing punctuation is stripped from every sentence, and sentences
//! without content are removed. Filtering twice with the same predicate
//! changes nothing the second time.

use crate::tree::{Element, Sentence, SubText, Text};

/// Tree nodes that can be filtered in place
pub trait Filterable {
    /// Keep only characters accepted by `predicate`, pruning what empties
    fn filter_chars<P>(&mut self, predicate: &P)
    where
        P: Fn(char) -> bool + ?Sized;

    /// Whether the node has nothing left to render
    fn is_pruned(&self) -> bool;
}

impl Filterable for Element {
    fn filter_chars<P>(&mut self, predicate: &P)
    where
        P: Fn(char) -> bool + ?Sized,
    {
        match self {
            Element::Word(literal) | Element::Punctuation(literal) => {
                literal.retain(|ch| predicate(ch))
            }
            Element::SubText(sub) => sub.filter_chars(predicate),
        }
    }

    fn is_pruned(&self) -> bool {
        match self {
            Element::Word(literal) | Element::Punctuation(literal) => literal.is_empty(),
            Element::SubText(sub) => sub.is_pruned(),
        }
    }
}

impl Filterable for SubText {
    fn filter_chars<P>(&mut self, predicate: &P)
    where
        P: Fn(char) -> bool + ?Sized,
    {
        self.text.filter_chars(predicate);
    }

    fn is_pruned(&self) -> bool {
        self.text.is_empty()
    }
}

impl Filterable for Sentence {
    fn filter_chars<P>(&mut self, predicate: &P)
    where
        P: Fn(char) -> bool + ?Sized,
    {
        for element in &mut self.content {
            element.filter_chars(predicate);
        }

        // Empty elements go, and so does punctuation right before them
        let mut keep = vec![true; self.content.len()];
        for (i, element) in self.content.iter().enumerate() {
            if element.is_pruned() {
                keep[i] = false;
                if i > 0 && self.content[i - 1].is_punctuation() {
                    keep[i - 1] = false;
                }
            }
        }
        let mut flags = keep.into_iter();
        self.content.retain(|_| flags.next().unwrap_or(true));

        while matches!(self.content.last(), Some(Element::Punctuation(_))) {
            self.content.pop();
        }

        for mark in &mut self.ending {
            mark.retain(|ch| predicate(ch));
        }
        self.ending.retain(|mark| !mark.is_empty());
    }

    fn is_pruned(&self) -> bool {
        self.is_empty()
    }
}

impl Filterable for Text {
    fn filter_chars<P>(&mut self, predicate: &P)
    where
        P: Fn(char) -> bool + ?Sized,
    {
        for sentence in &mut self.sentences {
            sentence.filter_chars(predicate);
        }
        self.sentences.retain(|sentence| !sentence.is_pruned());
    }

    fn is_pruned(&self) -> bool {
        self.is_empty()
    }
}

/// Filter a tree in place
pub fn filter<P>(text: &mut Text, predicate: P)
where
    P: Fn(char) -> bool,
{
    text.filter_chars(&predicate);
}
