//! Classified tokens.

use smol_str::SmolStr;

use super::Category;
use crate::base::{TextRange, TextSize, TextSnapshot};

/// A classified span of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub range: TextRange,
    pub category: Category,
    /// Literal text covered by `range`
    pub text: SmolStr,
}

impl Token {
    pub fn new(range: TextRange, category: Category, text: impl Into<SmolStr>) -> Self {
        Self {
            range,
            category,
            text: text.into(),
        }
    }

    #[inline]
    pub fn start(&self) -> TextSize {
        self.range.start()
    }

    #[inline]
    pub fn end(&self) -> TextSize {
        self.range.end()
    }

    /// Punctuation token whose text starts with `ch`.
    pub fn is_punct_starting(&self, ch: char) -> bool {
        self.category == Category::Punctuation && self.text.starts_with(ch)
    }

    /// Keyword (of any sub-kind) with exactly this text.
    pub fn is_keyword(&self, text: &str) -> bool {
        self.category.is_keyword() && self.text.as_str() == text
    }
}

/// Build tokens from host-supplied `(range, category)` pairs.
///
/// Spans are sorted by start; spans that fall outside the snapshot or
/// overlap an earlier span are skipped.
pub fn tokens_from_spans(
    snapshot: &TextSnapshot,
    spans: impl IntoIterator<Item = (TextRange, Category)>,
) -> Vec<Token> {
    let mut spans: Vec<_> = spans.into_iter().collect();
    spans.sort_by_key(|(range, _)| (range.start(), range.end()));

    let mut tokens: Vec<Token> = Vec::with_capacity(spans.len());
    for (range, category) in spans {
        if range.is_empty() {
            continue;
        }
        if tokens.last().is_some_and(|prev| prev.end() > range.start()) {
            tracing::trace!(?range, "dropping overlapping span");
            continue;
        }
        let Ok(text) = snapshot.slice(range) else {
            tracing::trace!(?range, "dropping span outside the snapshot");
            continue;
        };
        tokens.push(Token::new(range, category, text));
    }
    tokens
}
