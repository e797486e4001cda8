//! Recursive-descent parser building the sentence tree.
//!
//! Grammar, with one token of lookahead:
//!
//! ```text
//! Text      := Sentence*   (stops at EOF, `)`, `»` or a straight quote)
//! Sentence  := Content EndingPunct*
//! Content   := (Word | Punct | Paren | Guillemet | Quote)*
//! Paren     := '(' Text ')'
//! Guillemet := '«' Text '»'
//! Quote     := '"' Text '"'     (only when not already inside a quote)
//! ```
//!
//! Straight quotes open and close with the same character, so only one
//! level of them is tracked: inside a quoted span a straight quote always
//! closes. Parentheses and guillemets nest freely up to [`MAX_DEPTH`].

use crate::error::ParseError;
use crate::token::{Token, TokenKind};
use crate::tree::{Element, Sentence, SubText, Text};

/// Deepest accepted nesting of delimited spans
pub const MAX_DEPTH: usize = 256;

/// Parser for token sequences produced by the tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a token sequence into a tree.
    ///
    /// Every opened span must be closed by its own closer, and no closer may
    /// appear outside a span. Spans nested deeper than [`MAX_DEPTH`] fail
    /// with [`ParseError::TooDeep`].
    pub fn parse(&self, tokens: &[Token<'_>]) -> Result<Text, ParseError> {
        let mut cursor = Cursor::new(tokens);
        let text = cursor.text()?;

        let current = cursor.current();
        match current.kind {
            TokenKind::Eof => Ok(text),
            _ => Err(ParseError::StrayCloser {
                literal: current.literal.to_string(),
                position: current.position,
            }),
        }
    }
}

/// Per-call scan state
struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    position: usize,
    depth: usize,
    quoted: bool,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
            quoted: false,
        }
    }

    fn current(&self) -> Token<'a> {
        match self.tokens.get(self.position) {
            Some(token) => *token,
            None => Token::eof(self.tokens.last().map_or(0, |t| t.position)),
        }
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn text(&mut self) -> Result<Text, ParseError> {
        let mut text = Text::default();

        loop {
            match self.current().kind {
                TokenKind::Eof | TokenKind::CloseParenthetical | TokenKind::CloseGuillemet => break,
                TokenKind::Quote if self.quoted => break,
                _ => {
                    let sentence = self.sentence()?;
                    text.sentences.push(sentence);
                }
            }
        }

        Ok(text)
    }

    fn sentence(&mut self) -> Result<Sentence, ParseError> {
        let mut sentence = Sentence::new(self.content()?);

        while self.current().kind == TokenKind::EndingPunctuation {
            let mark = self.advance();
            sentence.ending.push(mark.literal.to_string());
        }

        Ok(sentence)
    }

    fn content(&mut self) -> Result<Vec<Element>, ParseError> {
        let mut content = Vec::new();

        loop {
            let token = self.current();
            let element = match token.kind {
                TokenKind::Word => {
                    self.advance();
                    Element::word(token.literal)
                }
                TokenKind::Punctuation => {
                    self.advance();
                    Element::punctuation(token.literal)
                }
                TokenKind::OpenParenthetical => {
                    Element::SubText(self.span(TokenKind::CloseParenthetical)?)
                }
                TokenKind::OpenGuillemet => {
                    Element::SubText(self.span(TokenKind::CloseGuillemet)?)
                }
                TokenKind::Quote if !self.quoted => {
                    self.quoted = true;
                    let span = self.span(TokenKind::Quote);
                    self.quoted = false;
                    Element::SubText(span?)
                }
                _ => break,
            };
            content.push(element);
        }

        Ok(content)
    }

    /// Parse a delimited span starting at the current opener
    fn span(&mut self, closer: TokenKind) -> Result<SubText, ParseError> {
        let opener = self.advance();
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_DEPTH,
                position: opener.position,
            });
        }

        self.depth += 1;
        let inner = self.text();
        self.depth -= 1;
        let inner = inner?;

        let current = self.current();
        if current.kind == closer {
            self.advance();
            return Ok(SubText::new(opener.literal, inner, current.literal));
        }

        Err(match current.kind {
            TokenKind::Eof => ParseError::Unterminated {
                opener: opener.literal.to_string(),
                position: opener.position,
            },
            _ => ParseError::MismatchedCloser {
                opener: opener.literal.to_string(),
                opener_position: opener.position,
                found: current.literal.to_string(),
                position: current.position,
            },
        })
    }
}

/// Parse tokens with a fresh parser
pub fn parse(tokens: &[Token<'_>]) -> Result<Text, ParseError> {
    Parser::new().parse(tokens)
}
