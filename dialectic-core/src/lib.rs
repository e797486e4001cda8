//! Sentence trees for phonologically annotated text
//!
//! This crate turns a raw paragraph of encyclopedic prose into a clean,
//! structurally faithful sentence tree, filters the tree down to a closed
//! alphabet and renders it back to normalized flat text.
//!
//! # Architecture
//!
//! - **profile**: the closed alphabet and character classes, loaded from TOML
//! - **tokenizer**: flat typed tokens over a normalized paragraph
//! - **parser**: recursive descent over nested brackets and quotes
//! - **filter** / **render**: pruning the tree and printing it back
//! - **paragraph**: the whole path for one paragraph, with fallback
//!
//! # Example
//!
//! ```rust
//! use dialectic_core::{ParagraphProcessor, Profile};
//!
//! let processor = ParagraphProcessor::new(Profile::russian().unwrap());
//! let rendered = processor
//!     .process("Лондон (англ. London) — столица Великобритании")
//!     .unwrap();
//! assert_eq!(rendered, "Лондон (англ.) - столица Великобритании.");
//! ```

pub mod error;
pub mod filter;
pub mod paragraph;
pub mod parser;
pub mod profile;
pub mod render;
pub mod token;
pub mod tokenizer;
pub mod tree;

pub use error::{CoreError, ParseError, ProfileError, Result};
pub use filter::{filter, Filterable};
pub use paragraph::ParagraphProcessor;
pub use parser::{parse, Parser, MAX_DEPTH};
pub use profile::{CharClass, Profile, ProfileConfig};
pub use render::render;
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};
pub use tree::{Element, Sentence, SubText, Text};
