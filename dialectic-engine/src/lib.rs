//! Phonologically annotated sentence generation
//!
//! This crate sits on top of `dialectic-core`: it renders article
//! paragraphs, stresses them through an [`Accentor`], annotates softness,
//! iotation and pauses, and cuts the result into short unique sentences.
//!
//! # Example
//!
//! ```rust
//! use dialectic_engine::{
//!     Article, Generator, GeneratorConfig, LexiconAccentor, MemorySource, Profile,
//! };
//! use std::sync::Arc;
//!
//! let config = GeneratorConfig::default();
//! let accentor = LexiconAccentor::russian(Profile::russian().unwrap()).unwrap();
//! let mut generator = Generator::with_seed(config, Arc::new(accentor), 7).unwrap();
//!
//! let mut source = MemorySource::new([Article::from_paragraphs(
//!     "Кот",
//!     ["Кот сидел на окне, мама читала книгу. Было поздно, и город спал."],
//! )])
//! .cycle(true);
//!
//! let sentences = generator.generate(&mut source, 2).unwrap();
//! assert_eq!(sentences.len(), 2);
//! ```

#![warn(missing_docs)]

pub mod accentor;
pub mod batcher;
pub mod chunker;
pub mod config;
pub mod error;
pub mod executor;
pub mod formatter;
pub mod generator;
pub mod source;

// Re-export key types
pub use accentor::{Accentor, LexiconAccentor};
pub use batcher::ParagraphBatcher;
pub use chunker::Chunker;
pub use config::{FormatOptions, GeneratorConfig, GeneratorConfigBuilder};
pub use error::{AccentError, EngineError, Result, SourceError};
pub use executor::{ExecutionMode, Executor};
pub use formatter::PhonologicalFormatter;
pub use generator::Generator;
pub use source::{Article, ArticleBuilder, ArticleSource, MemorySource, Section};

// Re-export from core for convenience
pub use dialectic_core::{ParagraphProcessor, Profile};
