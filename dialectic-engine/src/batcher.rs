//! Accentor request batching
//!
//! Rendered paragraphs are packed into space-joined batches that never
//! exceed the accentor's character budget.

/// Packs paragraphs into batches bounded by a character budget
#[derive(Debug, Clone, Copy)]
pub struct ParagraphBatcher {
    budget: usize,
}

impl ParagraphBatcher {
    /// Create a batcher; a zero budget is treated as one character
    pub fn new(budget: usize) -> Self {
        Self {
            budget: budget.max(1),
        }
    }

    /// Largest batch in characters
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Join paragraphs greedily into batches of at most `budget` characters.
    ///
    /// Oversized paragraphs are cut at whitespace, or mid-word when a single
    /// word exceeds the budget.
    pub fn batch<S: AsRef<str>>(&self, paragraphs: &[S]) -> Vec<String> {
        let mut batches = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for paragraph in paragraphs {
            for piece in self.split_oversized(paragraph.as_ref().trim()) {
                let len = piece.chars().count();
                if !current.is_empty() && current_len + 1 + len > self.budget {
                    batches.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if !current.is_empty() {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(piece);
                current_len += len;
            }
        }

        if !current.is_empty() {
            batches.push(current);
        }
        batches
    }

    /// Pieces of at most `budget` characters, in order
    fn split_oversized<'a>(&self, paragraph: &'a str) -> Vec<&'a str> {
        let mut pieces = Vec::new();
        let mut rest = paragraph;

        while rest.chars().count() > self.budget {
            // Byte offset just past the first `budget` characters
            let limit = rest
                .char_indices()
                .nth(self.budget)
                .map_or(rest.len(), |(i, _)| i);

            let cut = if rest[limit..].starts_with(char::is_whitespace) {
                limit
            } else {
                match rest[..limit].rfind(char::is_whitespace) {
                    Some(i) if i > 0 => i,
                    _ => limit,
                }
            };

            let (head, tail) = rest.split_at(cut);
            let head = head.trim_end();
            if !head.is_empty() {
                pieces.push(head);
            }
            rest = tail.trim_start();
        }

        if !rest.is_empty() {
            pieces.push(rest);
        }
        pieces
    }
}
