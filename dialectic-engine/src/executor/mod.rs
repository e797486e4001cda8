//! Execution strategies for paragraph rendering
//!
//! Every paragraph is rendered independently, so a round can be spread
//! over threads without shared state.

use dialectic_core::ParagraphProcessor;

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Single-threaded rendering
    Sequential,
    /// Rendering on the rayon thread pool
    Parallel,
    /// Choose by paragraph count
    Adaptive,
}

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Render paragraphs in order, dropping those that render empty
    fn render(&self, processor: &ParagraphProcessor, paragraphs: &[String]) -> Vec<String>;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Automatically select execution mode based on paragraph count
pub fn auto_select(paragraphs: usize, threshold: usize) -> ExecutionMode {
    if paragraphs < threshold {
        ExecutionMode::Sequential
    } else {
        #[cfg(feature = "parallel")]
        return ExecutionMode::Parallel;

        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Sequential
    }
}

/// Render with the given mode, resolving `Adaptive` against `threshold`
pub fn render_paragraphs(
    processor: &ParagraphProcessor,
    paragraphs: &[String],
    mode: ExecutionMode,
    threshold: usize,
) -> Vec<String> {
    let mode = match mode {
        ExecutionMode::Adaptive => auto_select(paragraphs.len(), threshold),
        other => other,
    };

    let executor: &dyn Executor = match mode {
        #[cfg(feature = "parallel")]
        ExecutionMode::Parallel => &ParallelExecutor,
        // Without the parallel feature everything renders sequentially
        _ => &SequentialExecutor,
    };
    log::debug!(
        "Rendering {} paragraphs in {:?} mode",
        paragraphs.len(),
        executor.mode()
    );
    executor.render(processor, paragraphs)
}

/// Render one paragraph, passing malformed ones through
pub(crate) fn render_one(processor: &ParagraphProcessor, paragraph: &str) -> Option<String> {
    let rendered = processor.process_or_passthrough(paragraph);
    (!rendered.trim().is_empty()).then_some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialectic_core::Profile;

    fn paragraphs() -> Vec<String> {
        [
            "Лондон (англ. London) — столица Великобритании",
            "Only English here",
            "Пункт 1) открыть окно",
            "Кот (рыжий) спит",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_auto_select() {
        assert_eq!(auto_select(3, 32), ExecutionMode::Sequential);

        #[cfg(feature = "parallel")]
        assert_eq!(auto_select(32, 32), ExecutionMode::Parallel);
    }

    #[test]
    fn test_executor_modes() {
        assert_eq!(SequentialExecutor.mode(), ExecutionMode::Sequential);

        #[cfg(feature = "parallel")]
        assert_eq!(ParallelExecutor.mode(), ExecutionMode::Parallel);
    }

    #[test]
    fn test_modes_agree() {
        let processor = ParagraphProcessor::new(Profile::russian().unwrap());
        let expected = vec![
            "Лондон (англ.) - столица Великобритании.".to_string(),
            "Пункт 1) открыть окно".to_string(),
            "Кот (рыжий) спит.".to_string(),
        ];

        for mode in [
            ExecutionMode::Sequential,
            ExecutionMode::Parallel,
            ExecutionMode::Adaptive,
        ] {
            assert_eq!(
                render_paragraphs(&processor, &paragraphs(), mode, 2),
                expected,
                "{mode:?}"
            );
        }
    }
}
