//! Region grammar engine.
//!
//! A recursive-descent walk over the token cursor. Each call to
//! [`RegionParser::parse_children`] scans forward inside one open region
//! ("the parent"): at every position it either opens a child region and
//! recurses into it, or checks whether the parent itself ends here.
//! Nesting therefore follows the call stack; a nested `{ }` pair is consumed
//! entirely by the recursive call before the outer `}` is seen.
//!
//! Closing happens in two flavors. Blocks and directives consume their
//! closing token. Comment runs, import runs and switch-case groups end
//! *before* the token that terminates them, leaving it for the enclosing
//! region to interpret (a `}` ending a case group also closes the switch
//! block; a `case` label ending one group opens the next).
//!
//! Nothing here fails. Unmatched openers stay incomplete and are dropped by
//! the flattening pass; unmatched closers are ignored.

use smol_str::SmolStr;
use tracing::trace;

use super::cursor::TokenCursor;
use super::options::ParseOptions;
use super::tree::{RegionId, RegionKind, RegionTree};
use crate::base::{TextSize, TextSnapshot};
use crate::classify::{Category, Token};

/// Upper bound on tokens inspected when confirming a `case` label.
const CASE_LABEL_LOOKAHEAD: usize = 256;

/// Build the region tree for `tokens` over `snapshot`.
pub fn parse(snapshot: &TextSnapshot, tokens: &[Token], options: &ParseOptions) -> RegionTree {
    let mut parser = RegionParser::new(snapshot, tokens, options);
    parser.parse_root();
    parser.tree
}

/// Outcome of inspecting one cursor position inside a parent region.
enum Step {
    /// Nothing happened; move on by one token.
    Continue,
    /// The cursor was already moved (a directive line was consumed).
    Moved,
    /// A child region was opened; the cursor is past its opening token.
    Opened(RegionId),
    /// The parent ended before the current token, which stays unconsumed.
    Ended,
    /// The parent ended on the current token, which it consumes.
    EndedOnToken,
}

struct RegionParser<'a> {
    cursor: TokenCursor<'a>,
    options: &'a ParseOptions,
    tree: RegionTree,
    /// `#else`/`#elif` that closed its own parent; the enclosing region opens
    /// the sibling arm when it reaches this offset.
    pending_arm: Option<TextSize>,
    /// End of the import run as it stood before its most recent line.
    import_rollback: TextSize,
    /// The last comment token is a `/*` with no closing `*/`.
    comment_unterminated: bool,
}

impl<'a> RegionParser<'a> {
    fn new(snapshot: &'a TextSnapshot, tokens: &'a [Token], options: &'a ParseOptions) -> Self {
        Self {
            cursor: TokenCursor::new(snapshot, tokens),
            options,
            tree: RegionTree::new(),
            pending_arm: None,
            import_rollback: TextSize::from(0),
            comment_unterminated: false,
        }
    }

    /// Parse the whole document into the tree's root.
    fn parse_root(&mut self) {
        while self.parse_children(RegionId::ROOT).is_some() {}
        trace!(regions = self.tree.len(), "region tree built");
    }

    fn snapshot(&self) -> &'a TextSnapshot {
        self.cursor.snapshot()
    }

    /// Scan inside `parent` until it opens a child (returned) or ends.
    fn parse_children(&mut self, parent: RegionId) -> Option<RegionId> {
        while !self.cursor.at_end() {
            // a directive seen deeper down may have closed this region
            if self.tree.is_complete(parent) {
                return None;
            }
            match self.step(parent) {
                Step::Continue => {}
                Step::Moved => continue,
                Step::Opened(child) => {
                    self.descend(child);
                    return Some(child);
                }
                Step::Ended => return None,
                Step::EndedOnToken => {
                    self.cursor.advance();
                    return None;
                }
            }
            self.cursor.advance();
        }
        self.finish_at_end(parent);
        None
    }

    fn descend(&mut self, child: RegionId) {
        if !self.tree.is_complete(child) {
            while self.parse_children(child).is_some() {}
            self.extend_block_start(child);
        }
    }

    /// Runs end with the document, unless the text stops inside a block
    /// comment. Everything else stays unmatched.
    fn finish_at_end(&mut self, parent: RegionId) {
        if self.tree.is_complete(parent) {
            return;
        }
        let ends_here = match self.tree.kind(parent) {
            Some(RegionKind::Comment) => !self.comment_unterminated,
            Some(RegionKind::ImportRun) => true,
            _ => false,
        };
        if ends_here {
            let end = self.tree[parent].end;
            self.close(parent, end);
        }
    }

    fn step(&mut self, parent: RegionId) -> Step {
        let Some(token) = self.cursor.current() else {
            return Step::Continue;
        };
        match self.tree.kind(parent) {
            Some(RegionKind::Comment) => self.continue_comment(parent, token),
            Some(RegionKind::ImportRun) => self.continue_imports(parent, token),
            _ => match self.try_open(parent, token) {
                Some(step) => step,
                None => self.try_end(parent, token),
            },
        }
    }

    fn close(&mut self, id: RegionId, end: TextSize) {
        self.tree.close(id, end);
        let node = &self.tree[id];
        trace!(?id, kind = ?node.kind, start = ?node.start, end = ?node.end, "region closed");
    }

    fn open(&mut self, parent: RegionId, kind: RegionKind, start: TextSize, opener: SmolStr) -> RegionId {
        let id = self.tree.open(parent, kind, start, opener);
        trace!(?id, ?parent, ?kind, ?start, "region opened");
        id
    }

    // ------------------------------------------------------------------
    // Openers
    // ------------------------------------------------------------------

    fn try_open(&mut self, parent: RegionId, token: &'a Token) -> Option<Step> {
        match token.category {
            Category::Punctuation if token.text.starts_with('{') => Some(self.open_block(parent, token)),
            category if category.is_comment() => self.open_comment(parent, token),
            Category::PreprocessorKeyword => self.directive(parent, token),
            category if category.is_keyword() => {
                if token.is_keyword(&self.options.import_keyword) {
                    self.open_imports(parent, token)
                } else if self.options.group_switch_cases
                    && matches!(token.text.as_str(), "case" | "default")
                {
                    self.case_label(parent, token)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn open_block(&mut self, parent: RegionId, brace: &'a Token) -> Step {
        let snapshot = self.snapshot();
        let brace_line = snapshot.line_number(brace.start());
        let after_prior_line = self
            .cursor
            .previous_token()
            .is_some_and(|prev| snapshot.line_number(prev.end()) + 1 == brace_line);

        let id = self.open(parent, RegionKind::Block, brace.start(), brace.text.clone());
        self.tree[id].starts_from_prior_line = after_prior_line;
        self.cursor.advance();
        Step::Opened(id)
    }

    fn open_comment(&mut self, parent: RegionId, token: &'a Token) -> Option<Step> {
        // a trailing end-of-line comment never starts a run
        let snapshot = self.snapshot();
        if let Some(prev) = self.cursor.previous_token() {
            if !prev.category.is_comment()
                && snapshot.line_number(prev.end()) == snapshot.line_number(token.start())
            {
                return None;
            }
        }

        let id = self.open(parent, RegionKind::Comment, token.start(), token.text.clone());
        self.tree[id].end = token.end();
        self.comment_unterminated = is_unterminated_block(token);
        self.cursor.advance();
        Some(Step::Opened(id))
    }

    fn open_imports(&mut self, parent: RegionId, keyword: &'a Token) -> Option<Step> {
        // `using (...)` is a statement, not an import
        if self
            .cursor
            .next_token()
            .is_some_and(|next| next.is_punct_starting('('))
        {
            return None;
        }

        let line_end = self.snapshot().line_at(keyword.start()).end();
        let id = self.open(parent, RegionKind::ImportRun, keyword.start(), keyword.text.clone());
        self.tree[id].end = line_end;
        self.import_rollback = keyword.start();
        self.cursor.advance();
        Some(Step::Opened(id))
    }

    fn case_label(&mut self, parent: RegionId, keyword: &'a Token) -> Option<Step> {
        let colon = self.case_label_colon()?;

        let snapshot = self.snapshot();
        if self.tree.kind(parent) != Some(RegionKind::Block) {
            let group = self.tree.nearest_open(parent, |node| {
                node.kind == Some(RegionKind::SwitchCaseGroup)
            });
            if let Some(group) = group {
                self.close(group, snapshot.end_before(keyword.start()));
                if group == parent {
                    // the enclosing region opens the next group
                    return Some(Step::Ended);
                }
            }
        }

        // the body starts at the end of the label line, or earlier when code
        // follows the label on that line
        let line_end = snapshot.line_at(keyword.start()).end();
        let start = (colon + 1..)
            .map_while(|index| self.cursor.token_at(index))
            .find(|token| !token.category.is_comment())
            .map_or(line_end, |token| token.start().min(line_end));
        let id = self.open(parent, RegionKind::SwitchCaseGroup, start, keyword.text.clone());

        // the label's pattern belongs to no region
        let label_end = self.cursor.token_at(colon).map_or(keyword.end(), Token::end);
        while self.cursor.position() < label_end && self.cursor.advance() {}
        Some(Step::Opened(id))
    }

    /// Stream index of the `:` ending the label when the `case`/`default`
    /// under the cursor is one, i.e. the first punctuation after it
    /// (skipping bracketed pattern parts) is `:`.
    fn case_label_colon(&self) -> Option<usize> {
        let index = self.cursor.current_index()?;
        let mut depth = 0usize;
        for offset in 1..=CASE_LABEL_LOOKAHEAD {
            let token = self.cursor.token_at(index + offset)?;
            if token.category != Category::Punctuation {
                continue;
            }
            match token.text.as_str() {
                "(" | "[" => depth += 1,
                ")" | "]" if depth > 0 => depth -= 1,
                "," | "." => {}
                _ if depth > 0 => {}
                text if text.starts_with(':') => return Some(index + offset),
                _ => return None,
            }
        }
        None
    }

    fn directive(&mut self, parent: RegionId, token: &'a Token) -> Option<Step> {
        let name = directive_name(&token.text);
        let honor_regions = self.options.honor_region_directives;

        match name {
            "if" => Some(self.open_directive(parent, token, name)),
            "region" if honor_regions => Some(self.open_directive(parent, token, name)),
            "else" | "elif" => {
                if self.pending_arm == Some(token.start()) {
                    self.pending_arm = None;
                    return Some(self.open_directive(parent, token, name));
                }
                let arm = self.tree.nearest_open(parent, |node| {
                    is_directive(node.kind) && matches!(node.opener.as_str(), "if" | "elif")
                });
                if let Some(arm) = arm {
                    let end = self.snapshot().end_before(token.start());
                    self.close(arm, end);
                    if arm == parent {
                        self.pending_arm = Some(token.start());
                        return Some(Step::Ended);
                    }
                }
                Some(self.open_directive(parent, token, name))
            }
            "endif" => {
                let arm = self.tree.nearest_open(parent, |node| {
                    is_directive(node.kind)
                        && matches!(node.opener.as_str(), "if" | "elif" | "else")
                });
                self.end_directive(arm, token);
                Some(Step::Moved)
            }
            "endregion" if honor_regions => {
                let region = self.tree.nearest_open(parent, |node| {
                    is_directive(node.kind) && node.opener == "region"
                });
                self.end_directive(region, token);
                Some(Step::Moved)
            }
            _ => None,
        }
    }

    fn open_directive(&mut self, parent: RegionId, token: &'a Token, name: &str) -> Step {
        let id = self.open(
            parent,
            RegionKind::PreprocessorConditional,
            token.start(),
            SmolStr::new(name),
        );
        self.cursor.advance_to_next_line();
        Step::Opened(id)
    }

    /// Close `target` (if any) at the end of the directive line and skip the line.
    fn end_directive(&mut self, target: Option<RegionId>, token: &'a Token) {
        match target {
            Some(target) => {
                let end = self.snapshot().line_at(token.start()).end();
                self.close(target, end);
            }
            None => trace!(directive = %token.text, "closing directive without an open region"),
        }
        self.cursor.advance_to_next_line();
    }

    // ------------------------------------------------------------------
    // Closers
    // ------------------------------------------------------------------

    fn try_end(&mut self, parent: RegionId, token: &'a Token) -> Step {
        if token.category != Category::Punctuation {
            return Step::Continue;
        }
        match self.tree.kind(parent) {
            Some(RegionKind::Block) => match token.text.find('}') {
                Some(at) => {
                    let end = token.start() + TextSize::from(at as u32 + 1);
                    self.close(parent, end);
                    Step::EndedOnToken
                }
                None => Step::Continue,
            },
            // the enclosing block's `}` ends the open case body too
            Some(RegionKind::SwitchCaseGroup) if token.text.contains('}') => {
                let end = self.snapshot().end_before(token.start());
                self.close(parent, end);
                Step::Ended
            }
            _ => Step::Continue,
        }
    }

    fn continue_comment(&mut self, region: RegionId, token: &'a Token) -> Step {
        if token.category.is_comment() {
            self.tree[region].end = token.end();
            self.comment_unterminated = is_unterminated_block(token);
            return Step::Continue;
        }
        if self.comment_continues(region, token) {
            return Step::Continue;
        }
        let end = self.tree[region].end;
        self.close(region, end);
        Step::Ended
    }

    /// A documentation comment interrupted by an identifier on its own line
    /// (e.g. a cross-reference) keeps going if more comment follows.
    fn comment_continues(&self, region: RegionId, token: &'a Token) -> bool {
        if !self.options.doc_comment_lookahead || token.category != Category::Identifier {
            return false;
        }
        let snapshot = self.snapshot();
        let same_line =
            snapshot.line_number(token.start()) == snapshot.line_number(self.tree[region].end);
        same_line
            && self
                .cursor
                .next_token()
                .is_some_and(|next| next.category.is_comment())
    }

    fn continue_imports(&mut self, run: RegionId, token: &'a Token) -> Step {
        // a brace on an import line belongs to the enclosing region; give
        // that line back
        if token.is_punct_starting('{') || token.is_punct_starting('}') {
            let end = self.import_rollback;
            self.close(run, end);
            return Step::Ended;
        }

        let snapshot = self.snapshot();
        let line = snapshot.line_number(token.start());
        let leads_line = self
            .cursor
            .previous_token()
            .is_none_or(|prev| snapshot.line_number(prev.end()) < line);
        if !leads_line {
            return Step::Continue;
        }

        let is_import = token.is_keyword(&self.options.import_keyword)
            && !self
                .cursor
                .next_token()
                .is_some_and(|next| next.is_punct_starting('('));
        if is_import {
            self.import_rollback = self.tree[run].end;
            self.tree[run].end = snapshot.line_at(token.start()).end();
            Step::Continue
        } else {
            let end = self.tree[run].end;
            self.close(run, end);
            Step::Ended
        }
    }

    // ------------------------------------------------------------------
    // Start extension
    // ------------------------------------------------------------------

    /// Move a block's start from its brace up to the end of the statement
    /// header line above it.
    fn extend_block_start(&mut self, id: RegionId) {
        if !self.options.extend_block_starts {
            return;
        }
        let snapshot = self.snapshot();
        let node = &self.tree[id];
        if node.kind != Some(RegionKind::Block) || !node.complete {
            return;
        }
        let start_line = snapshot.line_number(node.start);
        if start_line == snapshot.line_number(node.end) || !snapshot.only_whitespace_before(node.start)
        {
            return;
        }

        let floor = self.extension_floor(id);
        for number in (floor..start_line).rev() {
            let Ok(line) = snapshot.line(number) else {
                break;
            };
            let blank = snapshot
                .slice(line.range)
                .map_or(true, |text| text.trim().is_empty());
            if !blank {
                let node = &mut self.tree[id];
                node.start = line.end();
                node.starts_from_prior_line = true;
                trace!(?id, header_line = number, "block start moved to header");
                return;
            }
        }
    }

    /// First line a block's start may move up to: just below the previous
    /// sibling, or just below the parent's first line.
    fn extension_floor(&self, id: RegionId) -> u32 {
        let snapshot = self.snapshot();
        let Some(parent) = self.tree[id].parent else {
            return 0;
        };
        let siblings = self.tree.children(parent);
        match siblings.iter().position(|&child| child == id) {
            Some(index) if index > 0 => {
                let prev = &self.tree[siblings[index - 1]];
                let start = snapshot.line_number(prev.start);
                let end = snapshot.line_number(prev.end);
                if start == end { end } else { end + 1 }
            }
            _ if self.tree.kind(parent).is_some() => {
                snapshot.line_number(self.tree[parent].start) + 1
            }
            _ => 0,
        }
    }
}

fn is_directive(kind: Option<RegionKind>) -> bool {
    kind == Some(RegionKind::PreprocessorConditional)
}

fn is_unterminated_block(token: &Token) -> bool {
    token.text.starts_with("/*") && (token.text.len() < 4 || !token.text.ends_with("*/"))
}

/// `"#  endif"` → `"endif"`
fn directive_name(text: &str) -> &str {
    text.trim_start_matches('#').trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::SnapshotVersion;
    use crate::classify::classify_text;

    fn tree_for(text: &str, options: &ParseOptions) -> (TextSnapshot, RegionTree) {
        let snapshot = TextSnapshot::new(SnapshotVersion(0), text);
        let tokens = classify_text(text);
        let tree = parse(&snapshot, &tokens, options);
        (snapshot, tree)
    }

    fn kinds_under(tree: &RegionTree, id: RegionId) -> Vec<RegionKind> {
        tree.children(id)
            .iter()
            .filter_map(|&child| tree.kind(child))
            .collect()
    }

    #[test]
    fn test_nested_blocks_form_a_tree() {
        let (_, tree) = tree_for("a {\n  b {\n    c;\n  }\n}\n", &ParseOptions::default());

        let outer = tree.children(RegionId::ROOT)[0];
        assert_eq!(kinds_under(&tree, RegionId::ROOT), [RegionKind::Block]);
        assert_eq!(kinds_under(&tree, outer), [RegionKind::Block]);
        assert!(tree.is_complete(outer));
        assert_eq!(tree[outer].end, TextSize::from(22));
    }

    #[test]
    fn test_unmatched_brace_stays_open() {
        let (_, tree) = tree_for("class A {\n  void f() {\n  }\n", &ParseOptions::default());

        let outer = tree.children(RegionId::ROOT)[0];
        let inner = tree.children(outer)[0];
        assert!(!tree.is_complete(outer));
        assert!(tree.is_complete(inner));
    }

    #[test]
    fn test_else_arm_becomes_sibling() {
        let (_, tree) = tree_for(
            "#if X\ncode1\n#else\ncode2\n#endif\n",
            &ParseOptions::default(),
        );

        let arms = tree.children(RegionId::ROOT);
        assert_eq!(arms.len(), 2);
        assert_eq!(tree[arms[0]].opener, "if");
        assert_eq!(tree[arms[1]].opener, "else");
        assert!(arms.iter().all(|&arm| tree.is_complete(arm)));
    }

    #[test]
    fn test_elif_chain() {
        let (snapshot, tree) = tree_for(
            "#if A\na\n#elif B\nb\n#else\nc\n#endif\n",
            &ParseOptions::default(),
        );

        let arms = tree.children(RegionId::ROOT);
        let openers: Vec<_> = arms.iter().map(|&a| tree[a].opener.as_str()).collect();
        assert_eq!(openers, ["if", "elif", "else"]);
        let last = &tree[arms[2]];
        assert_eq!(snapshot.line_number(last.end), 6);
    }

    #[test]
    fn test_nested_if_inside_else() {
        let (_, tree) = tree_for(
            "#if A\n#if B\nb\n#else\nnb\n#endif\n#else\nna\n#endif\n",
            &ParseOptions::default(),
        );

        let top = tree.children(RegionId::ROOT);
        assert_eq!(top.len(), 2);
        assert_eq!(tree.children(top[0]).len(), 2);
        assert!(top.iter().all(|&arm| tree.is_complete(arm)));
    }

    #[test]
    fn test_stray_endif_is_ignored() {
        let (_, tree) = tree_for("#endif\n{\n}\n", &ParseOptions::default());
        assert_eq!(kinds_under(&tree, RegionId::ROOT), [RegionKind::Block]);
    }

    #[test]
    fn test_region_directives_can_be_disabled() {
        let text = "#region Members\nint a;\n#endregion\n";
        let (_, on) = tree_for(text, &ParseOptions::default());
        let (_, off) = tree_for(text, &ParseOptions::default().with_region_directives(false));

        assert_eq!(kinds_under(&on, RegionId::ROOT), [RegionKind::PreprocessorConditional]);
        assert!(off.is_empty());
    }

    #[test]
    fn test_goto_case_is_not_a_label() {
        let (_, tree) = tree_for(
            "switch (x)\n{\ncase 1:\n  goto case 2;\ncase 2:\n  break;\n}\n",
            &ParseOptions::default(),
        );

        let block = tree.children(RegionId::ROOT)[0];
        assert_eq!(
            kinds_under(&tree, block),
            [RegionKind::SwitchCaseGroup, RegionKind::SwitchCaseGroup]
        );
    }

    #[test]
    fn test_brace_after_label_stays_inside_group() {
        let text = "switch (x)\n{\n    case 1: {\n        a();\n    }\n    case 2:\n        b();\n}\n";
        let (_, tree) = tree_for(text, &ParseOptions::default());

        let switch = tree.children(RegionId::ROOT)[0];
        let groups = tree.children(switch);
        assert_eq!(groups.len(), 2);

        let group = &tree[groups[0]];
        let block = &tree[tree.children(groups[0])[0]];
        assert_eq!(block.kind, Some(RegionKind::Block));
        assert_eq!(group.start, block.start);
        assert_eq!(u32::from(block.start), 25);
        assert!(block.end <= group.end);
    }

    #[test]
    fn test_label_without_code_starts_at_line_end() {
        let text = "switch (x)\n{\ncase 1: // one\n  a();\n}\n";
        let (snapshot, tree) = tree_for(text, &ParseOptions::default());

        let switch = tree.children(RegionId::ROOT)[0];
        let group = &tree[tree.children(switch)[0]];
        assert_eq!(group.start, snapshot.line_at(group.start).end());
        assert_eq!(snapshot.line_number(group.start), 2);
    }

    #[test]
    fn test_switch_cases_can_be_disabled() {
        let (_, tree) = tree_for(
            "switch (x) {\ncase 1:\n  a();\n}\n",
            &ParseOptions::default().with_switch_cases(false),
        );

        let block = tree.children(RegionId::ROOT)[0];
        assert!(tree.children(block).is_empty());
        assert!(tree.is_complete(block));
    }

    #[test]
    fn test_using_statement_is_not_an_import() {
        let (_, tree) = tree_for(
            "void f() {\n  using (var s = open()) {\n    s.Read();\n  }\n}\n",
            &ParseOptions::default(),
        );

        let method = tree.children(RegionId::ROOT)[0];
        assert_eq!(kinds_under(&tree, method), [RegionKind::Block]);
        assert!(tree.is_complete(method));
    }

    #[test]
    fn test_runs_end_with_the_document() {
        let (_, tree) = tree_for("// one\n// two", &ParseOptions::default());
        assert!(tree.is_complete(tree.children(RegionId::ROOT)[0]));

        let (_, tree) = tree_for("using A;\nusing B;\n", &ParseOptions::default());
        assert!(tree.is_complete(tree.children(RegionId::ROOT)[0]));
    }

    #[test]
    fn test_unterminated_block_comment_stays_open() {
        let (_, tree) = tree_for("int a;\n/* open\nstill open\n", &ParseOptions::default());
        let comment = tree.children(RegionId::ROOT)[0];
        assert_eq!(tree.kind(comment), Some(RegionKind::Comment));
        assert!(!tree.is_complete(comment));
    }

    #[test]
    fn test_directive_name() {
        assert_eq!(directive_name("#if"), "if");
        assert_eq!(directive_name("#  endregion"), "endregion");
    }
}
