//! Sequential execution strategy

use crate::executor::{render_one, ExecutionMode, Executor};
use dialectic_core::ParagraphProcessor;

/// Sequential single-threaded executor
#[derive(Debug, Clone, Copy)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn render(&self, processor: &ParagraphProcessor, paragraphs: &[String]) -> Vec<String> {
        paragraphs
            .iter()
            .filter_map(|paragraph| render_one(processor, paragraph))
            .collect()
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}
