//! Lexical tokens

/// Kind of a lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input, always the last token
    Eof,
    Word,
    /// Punctuation inside a sentence: `,` `;` `:` `/` `-`
    Punctuation,
    /// Sentence-ending punctuation: `.` `!` `?`
    EndingPunctuation,
    /// `(` or `[`
    OpenParenthetical,
    /// `)` or `]`
    CloseParenthetical,
    /// `«`
    OpenGuillemet,
    /// `»`
    CloseGuillemet,
    /// Straight quote; opens or closes depending on context
    Quote,
}

impl TokenKind {
    /// Whether the token closes a delimited span
    pub fn is_closer(self) -> bool {
        matches!(
            self,
            TokenKind::CloseParenthetical | TokenKind::CloseGuillemet | TokenKind::Quote
        )
    }
}

/// A token borrowing its literal from the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Byte offset of the literal in the scanned text
    pub position: usize,
    pub literal: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, position: usize, literal: &'a str) -> Self {
        Self {
            kind,
            position,
            literal,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(TokenKind::Eof, position, "")
    }
}
