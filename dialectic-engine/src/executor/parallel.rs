//! Parallel execution strategy

use crate::executor::{render_one, ExecutionMode, Executor};
use dialectic_core::ParagraphProcessor;
use rayon::prelude::*;

/// Parallel executor on the global rayon pool
///
/// Output order matches input order.
#[derive(Debug, Clone, Copy)]
pub struct ParallelExecutor;

impl Executor for ParallelExecutor {
    fn render(&self, processor: &ParagraphProcessor, paragraphs: &[String]) -> Vec<String> {
        paragraphs
            .par_iter()
            .filter_map(|paragraph| render_one(processor, paragraph))
            .collect()
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}
