//! Article sources
//!
//! Articles are heading trees. The engine only ever sees the flat,
//! pre-order list of paragraphs an [`ArticleSource`] hands out.

use crate::error::SourceError;
use std::collections::VecDeque;

/// Section titles dropped, with their subsections, when flattening
pub const DEFAULT_EXCLUDED_SECTIONS: &[&str] = &["Примечания"];

/// Supplies paragraphs of randomly chosen articles
pub trait ArticleSource {
    /// Paragraphs of one article in reading order
    fn fetch_random(&mut self) -> Result<Vec<String>, SourceError>;
}

impl<S: ArticleSource + ?Sized> ArticleSource for &mut S {
    fn fetch_random(&mut self) -> Result<Vec<String>, SourceError> {
        (**self).fetch_random()
    }
}

impl<S: ArticleSource + ?Sized> ArticleSource for Box<S> {
    fn fetch_random(&mut self) -> Result<Vec<String>, SourceError> {
        (**self).fetch_random()
    }
}

/// A titled section holding paragraphs and nested sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text
    pub title: String,
    /// Heading level; the article root is level 0
    pub level: u8,
    /// Paragraphs directly under the heading
    pub paragraphs: Vec<String>,
    /// Nested sections in document order
    pub subsections: Vec<Section>,
}

impl Section {
    /// Create an empty section
    pub fn new(title: impl Into<String>, level: u8) -> Self {
        Self {
            title: title.into(),
            level,
            paragraphs: Vec::new(),
            subsections: Vec::new(),
        }
    }

    fn collect_paragraphs(&self, excluded: &[&str], out: &mut Vec<String>) {
        out.extend(self.paragraphs.iter().cloned());
        for section in &self.subsections {
            if excluded.contains(&section.title.trim()) {
                continue;
            }
            section.collect_paragraphs(excluded, out);
        }
    }
}

/// A whole article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Article title
    pub title: String,
    /// Lead section holding everything before the first heading
    pub root: Section,
}

impl Article {
    /// Start building an article
    pub fn builder(title: impl Into<String>) -> ArticleBuilder {
        ArticleBuilder::new(title)
    }

    /// An article without headings
    pub fn from_paragraphs<I, S>(title: impl Into<String>, paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paragraphs
            .into_iter()
            .fold(Self::builder(title), |builder, p| builder.paragraph(p))
            .build()
    }

    /// Pre-order paragraphs, skipping excluded sections and their subtrees
    pub fn paragraphs(&self, excluded: &[&str]) -> Vec<String> {
        let mut out = Vec::new();
        self.root.collect_paragraphs(excluded, &mut out);
        out
    }
}

/// Assembles the heading tree from a flat stream of headings and paragraphs
#[derive(Debug)]
pub struct ArticleBuilder {
    title: String,
    /// Open sections, root first
    stack: Vec<Section>,
}

impl ArticleBuilder {
    /// Create a builder with an empty lead section
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            stack: vec![Section::new(title.clone(), 0)],
            title,
        }
    }

    /// Open a heading; it closes every open section of the same or deeper level
    pub fn heading(mut self, title: impl Into<String>, level: u8) -> Self {
        let level = level.max(1);
        while self.stack.last().is_some_and(|s| s.level >= level) {
            self.close_top();
        }
        self.stack.push(Section::new(title, level));
        self
    }

    /// Append a paragraph to the innermost open section
    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        if let Some(section) = self.stack.last_mut() {
            section.paragraphs.push(text.into());
        }
        self
    }

    /// Close every open section and return the article
    pub fn build(mut self) -> Article {
        while self.stack.len() > 1 {
            self.close_top();
        }
        let root = self
            .stack
            .pop()
            .unwrap_or_else(|| Section::new(self.title.clone(), 0));
        Article {
            title: self.title,
            root,
        }
    }

    fn close_top(&mut self) {
        // The root is never closed
        if self.stack.len() < 2 {
            return;
        }
        if let Some(section) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.subsections.push(section);
            }
        }
    }
}

/// In-memory source handing out queued articles in order
#[derive(Debug, Clone)]
pub struct MemorySource {
    articles: VecDeque<Article>,
    excluded: Vec<String>,
    cycle: bool,
}

impl MemorySource {
    /// Create a source over `articles`
    pub fn new(articles: impl IntoIterator<Item = Article>) -> Self {
        Self {
            articles: articles.into_iter().collect(),
            excluded: DEFAULT_EXCLUDED_SECTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            cycle: false,
        }
    }

    /// Replace the excluded section titles
    pub fn with_excluded<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded = titles.into_iter().map(Into::into).collect();
        self
    }

    /// Requeue each article after handing it out
    pub fn cycle(mut self, cycle: bool) -> Self {
        self.cycle = cycle;
        self
    }

    /// Queue another article
    pub fn push(&mut self, article: Article) {
        self.articles.push_back(article);
    }

    /// Articles still queued
    pub fn remaining(&self) -> usize {
        self.articles.len()
    }
}

impl ArticleSource for MemorySource {
    fn fetch_random(&mut self) -> Result<Vec<String>, SourceError> {
        let article = self.articles.pop_front().ok_or(SourceError::Exhausted)?;
        let excluded: Vec<&str> = self.excluded.iter().map(String::as_str).collect();
        let paragraphs = article.paragraphs(&excluded);
        log::debug!(
            "Article '{}' yielded {} paragraphs",
            article.title,
            paragraphs.len()
        );
        if self.cycle {
            self.articles.push_back(article);
        }
        Ok(paragraphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article::builder("Волга")
            .paragraph("lead")
            .heading("География", 2)
            .paragraph("geo")
            .heading("Притоки", 3)
            .paragraph("tributaries")
            .heading("История", 2)
            .paragraph("history")
            .heading("Примечания", 2)
            .paragraph("notes")
            .heading("Источники", 3)
            .paragraph("sources")
            .build()
    }

    #[test]
    fn test_builder_nests_by_level() {
        let article = sample();
        assert_eq!(article.root.paragraphs, vec!["lead"]);
        let titles: Vec<&str> = article
            .root
            .subsections
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["География", "История", "Примечания"]);
        assert_eq!(article.root.subsections[0].subsections[0].title, "Притоки");
        assert_eq!(article.root.subsections[2].subsections[0].title, "Источники");
    }

    #[test]
    fn test_preorder_skips_excluded_subtree() {
        assert_eq!(
            sample().paragraphs(DEFAULT_EXCLUDED_SECTIONS),
            vec!["lead", "geo", "tributaries", "history"]
        );
        assert_eq!(
            sample().paragraphs(&[]),
            vec!["lead", "geo", "tributaries", "history", "notes", "sources"]
        );
    }

    #[test]
    fn test_shallower_heading_after_deep_one() {
        let article = Article::builder("t")
            .heading("a", 2)
            .heading("b", 4)
            .paragraph("deep")
            .heading("c", 3)
            .paragraph("mid")
            .build();
        let a = &article.root.subsections[0];
        assert_eq!(a.subsections.len(), 2);
        assert_eq!(a.subsections[1].title, "c");
        assert_eq!(article.paragraphs(&[]), vec!["deep", "mid"]);
    }

    #[test]
    fn test_memory_source_order_and_exhaustion() {
        let mut source = MemorySource::new([
            sample(),
            Article::from_paragraphs("Кама", ["one", "two"]),
        ]);
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.fetch_random().unwrap().len(), 4);
        assert_eq!(source.fetch_random().unwrap(), vec!["one", "two"]);
        assert_eq!(source.fetch_random(), Err(SourceError::Exhausted));
    }

    #[test]
    fn test_memory_source_push_refills() {
        let mut source = MemorySource::new(Vec::<Article>::new());
        assert_eq!(source.fetch_random(), Err(SourceError::Exhausted));

        source.push(Article::from_paragraphs("Ока", ["first"]));
        source.push(Article::from_paragraphs("Дон", ["second"]));
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.fetch_random().unwrap(), vec!["first"]);
        assert_eq!(source.fetch_random().unwrap(), vec!["second"]);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_memory_source_cycle_and_exclusions() {
        let mut source = MemorySource::new([sample()])
            .with_excluded(["География"])
            .cycle(true);
        let expected = vec!["lead", "history", "notes", "sources"];
        assert_eq!(source.fetch_random().unwrap(), expected);
        assert_eq!(source.fetch_random().unwrap(), expected);
    }
}
