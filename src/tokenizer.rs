//! Typing-driven promotion of words into tag attachments.
//!
//! Tokenization is "promote forward only": a word becomes a tag once
//! visible text follows it, and tags are never split or merged again. A
//! word still being typed at the end of the text stays text.

use crate::attachment::{Attachment, PLACEHOLDER};
use crate::text::{BufferChange, ChangeOrigin};
use crate::widget::{TagWidget, Widget};
use std::fmt;
use std::ops::Range;

/// Builds the widget for a promoted word.
pub type WidgetFactory = Box<dyn Fn(&str) -> Box<dyn Widget>>;

/// A word that qualifies for promotion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    /// Char range of the word in the buffer.
    pub range: Range<usize>,
}

/// Scans text for words to promote and builds their attachments.
pub struct Tokenizer {
    factory: WidgetFactory,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer").finish_non_exhaustive()
    }
}

impl Tokenizer {
    /// Tokenizer producing [`TagWidget`]s.
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(|word| Box::new(TagWidget::new(word)))
    }

    /// Tokenizer producing widgets from `factory`.
    #[must_use]
    pub fn with_factory(factory: impl Fn(&str) -> Box<dyn Widget> + 'static) -> Self {
        Self {
            factory: Box::new(factory),
        }
    }

    /// Whether `change` should trigger a tokenization pass.
    ///
    /// Only character edits from typing, or from an earlier promotion, do.
    #[must_use]
    pub const fn wants(change: &BufferChange) -> bool {
        change.edited_characters()
            && matches!(change.origin, ChangeOrigin::User | ChangeOrigin::Tokenizer)
    }

    /// Words in `text` that are no longer being typed, left to right.
    ///
    /// Whitespace and placeholders both end a word. A word qualifies once
    /// some visible character follows it: a word that ends the visible
    /// text, even with tags after it, is still in progress.
    #[must_use]
    pub fn scan(text: &str) -> Vec<Token> {
        let Some(last_visible) = text
            .chars()
            .enumerate()
            .filter(|&(_, ch)| ch != PLACEHOLDER)
            .map(|(offset, _)| offset)
            .last()
        else {
            return Vec::new();
        };
        if !text.chars().any(char::is_whitespace) {
            return Vec::new();
        }

        let mut tokens = Vec::new();
        let mut word: Option<(usize, usize)> = None;
        for (offset, (byte, ch)) in text.char_indices().enumerate() {
            if ch.is_whitespace() || ch == PLACEHOLDER {
                if let Some((start, start_byte)) = word.take() {
                    if offset <= last_visible {
                        tokens.push(Token {
                            word: text[start_byte..byte].to_string(),
                            range: start..offset,
                        });
                    }
                }
            } else if word.is_none() {
                word = Some((offset, byte));
            }
        }
        tokens
    }

    /// Build the attachment replacing `token`.
    #[must_use]
    pub fn attachment_for(&self, token: &Token) -> Attachment {
        Attachment::from_boxed((self.factory)(&token.word))
    }
}
