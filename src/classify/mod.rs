//! Token classification, the input side of the outliner.
//!
//! The region engine does not lex. It consumes an ordered, non-overlapping
//! stream of [`Token`]s produced by a [`Classifier`]. Hosts with their own
//! classifier map its output with [`Category::from_classification_name`] and
//! [`tokens_from_spans`]; [`CSharpClassifier`] covers C#-family text.

mod category;
mod csharp;
mod token;

pub use category::Category;
pub use csharp::{CSharpClassifier, classify_text};
pub use token::{Token, tokens_from_spans};

use crate::base::TextSnapshot;

/// Turns a whole snapshot into classified tokens.
pub trait Classifier {
    fn classify(&self, snapshot: &TextSnapshot) -> Vec<Token>;
}

impl<F> Classifier for F
where
    F: Fn(&TextSnapshot) -> Vec<Token>,
{
    fn classify(&self, snapshot: &TextSnapshot) -> Vec<Token> {
        self(snapshot)
    }
}
