//! Token categories assigned by a classifier.

/// Category tag of a classified token.
///
/// The region engine only distinguishes punctuation, comments, keywords,
/// preprocessor directives and identifiers; the remaining variants exist so
/// a classifier's output maps over without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Punctuation,
    Operator,
    Comment,
    /// Documentation comment (`///`, `/** */` and their XML pieces)
    DocComment,
    Keyword,
    /// Control-flow keyword (`if`, `switch`, `case`, `return`, ...)
    KeywordControl,
    /// Directive keyword such as `#if` or `#region`
    PreprocessorKeyword,
    /// Argument text following a directive keyword
    PreprocessorText,
    Identifier,
    StringLiteral,
    NumberLiteral,
    Other,
}

impl Category {
    pub fn is_comment(self) -> bool {
        matches!(self, Category::Comment | Category::DocComment)
    }

    pub fn is_keyword(self) -> bool {
        matches!(self, Category::Keyword | Category::KeywordControl)
    }

    /// Directive keywords only; directive argument text does not count.
    pub fn is_preprocessor(self) -> bool {
        matches!(self, Category::PreprocessorKeyword)
    }

    /// Map a host classification name onto a category.
    ///
    /// Accepts the lower-case names used by editor classifiers, e.g.
    /// `"keyword - control"` or `"xml doc comment - text"`. Unknown names
    /// become [`Category::Other`].
    pub fn from_classification_name(name: &str) -> Category {
        let name = name.trim();
        match name {
            "punctuation" => Category::Punctuation,
            "operator" => Category::Operator,
            "comment" => Category::Comment,
            "keyword - control" => Category::KeywordControl,
            "preprocessor keyword" => Category::PreprocessorKeyword,
            "preprocessor text" => Category::PreprocessorText,
            "identifier" => Category::Identifier,
            "number" => Category::NumberLiteral,
            _ if name.starts_with("xml doc comment") => Category::DocComment,
            _ if name.starts_with("keyword") => Category::Keyword,
            _ if name.starts_with("string") => Category::StringLiteral,
            _ => Category::Other,
        }
    }
}
