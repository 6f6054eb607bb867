//! Switches selecting which region grammars the engine runs.

use smol_str::SmolStr;

/// Options for one parse.
///
/// The defaults outline C#: `using` runs, switch-case groups, header-line
/// block starts, and `#region` folding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// Fold `#region` / `#endregion` pairs. Turn off when the host folds
    /// regions itself at declaration level.
    pub honor_region_directives: bool,
    /// Fold the body of each `case`/`default` label.
    pub group_switch_cases: bool,
    /// Move block starts up to the end of the statement header line.
    pub extend_block_starts: bool,
    /// Keep a comment run open across an identifier that sits on the same
    /// line as the last comment and is followed by another comment token.
    pub doc_comment_lookahead: bool,
    /// Keyword that starts an import statement.
    pub import_keyword: SmolStr,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            honor_region_directives: true,
            group_switch_cases: true,
            extend_block_starts: true,
            doc_comment_lookahead: true,
            import_keyword: SmolStr::new_static("using"),
        }
    }
}

impl ParseOptions {
    pub fn with_region_directives(mut self, on: bool) -> Self {
        self.honor_region_directives = on;
        self
    }

    pub fn with_switch_cases(mut self, on: bool) -> Self {
        self.group_switch_cases = on;
        self
    }

    pub fn with_block_start_extension(mut self, on: bool) -> Self {
        self.extend_block_starts = on;
        self
    }

    pub fn with_doc_comment_lookahead(mut self, on: bool) -> Self {
        self.doc_comment_lookahead = on;
        self
    }

    pub fn with_import_keyword(mut self, keyword: impl Into<SmolStr>) -> Self {
        self.import_keyword = keyword.into();
        self
    }
}
