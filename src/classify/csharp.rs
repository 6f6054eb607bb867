//! Reference classifier for C#-family source text.
//!
//! Produces the categories the region engine cares about with the same
//! granularity an editor classifier would: directive keywords are separate
//! from their argument text, doc comments are distinguished from plain
//! comments, and control-flow keywords get their own category. Whitespace is
//! not classified, and characters the lexer does not recognize are left as
//! gaps in the stream.

use logos::{Lexer, Logos};

use super::{Category, Classifier, Token};
use crate::base::{TextRange, TextSize, TextSnapshot};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Raw {
    #[regex(r"///[^\r\n]*", priority = 10)]
    DocComment,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"#[ \t]*[A-Za-z]+")]
    Directive,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    #[regex(r#"\$"([^"\\\n]|\\.)*""#)]
    #[regex(r#"(\$@|@\$)"([^"]|"")*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    #[regex(r"[0-9][0-9A-Za-z_]*(\.[0-9][0-9A-Za-z_]*)?")]
    Number,

    #[regex(r"@?[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r"[{}()\[\];,.:]")]
    Punct,

    #[regex(r"[+\-*%=<>!&|^~?]+")]
    #[token("/")]
    #[token("/=")]
    Operator,
}

/// Consume a `/* ... */` comment; an unterminated one runs to the end of text.
fn block_comment(lex: &mut Lexer<Raw>) -> bool {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => lex.bump(end + 2),
        None => lex.bump(rest.len()),
    }
    true
}

const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "switch", "case", "default", "while", "do", "for", "foreach", "in", "break",
    "continue", "return", "goto", "throw", "try", "catch", "finally", "yield", "await",
];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "base", "bool", "byte", "char", "checked", "class", "const",
    "decimal", "delegate", "double", "enum", "event", "explicit", "extern", "false", "fixed",
    "float", "get", "init", "int", "interface", "internal", "is", "lock", "long", "namespace",
    "new", "null", "object", "operator", "out", "override", "params", "partial", "private",
    "protected", "public", "readonly", "record", "ref", "sbyte", "sealed", "set", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "this", "true", "typeof", "uint",
    "ulong", "unchecked", "unsafe", "ushort", "using", "var", "virtual", "void", "volatile",
    "when", "where",
];

fn word_category(word: &str) -> Category {
    if CONTROL_KEYWORDS.contains(&word) {
        Category::KeywordControl
    } else if KEYWORDS.contains(&word) {
        Category::Keyword
    } else {
        Category::Identifier
    }
}

/// Classifier for C#, Java, JavaScript and other brace languages with
/// `//`-style comments and `#`-style directives.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpClassifier;

impl Classifier for CSharpClassifier {
    fn classify(&self, snapshot: &TextSnapshot) -> Vec<Token> {
        classify_text(snapshot.text())
    }
}

fn text_range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}

/// Classify `text` into an ordered, non-overlapping token stream.
pub fn classify_text(text: &str) -> Vec<Token> {
    let mut lexer = Raw::lexer(text);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let Ok(raw) = result else {
            continue;
        };
        let span = lexer.span();
        let slice = lexer.slice();
        let range = text_range(span.start, span.end);

        let category = match raw {
            Raw::DocComment => Category::DocComment,
            Raw::LineComment => Category::Comment,
            Raw::BlockComment if slice.starts_with("/**") && !slice.starts_with("/**/") => {
                Category::DocComment
            }
            Raw::BlockComment => Category::Comment,
            Raw::Directive => {
                tokens.push(Token::new(range, Category::PreprocessorKeyword, slice));
                directive_tail(&mut lexer, &mut tokens);
                continue;
            }
            Raw::String => Category::StringLiteral,
            Raw::Number => Category::NumberLiteral,
            Raw::Word if slice.starts_with('@') => Category::Identifier,
            Raw::Word => word_category(slice),
            Raw::Punct => Category::Punctuation,
            Raw::Operator => Category::Operator,
        };
        tokens.push(Token::new(range, category, slice));
    }

    tokens
}

/// Classify the rest of a directive line as argument text plus an optional
/// trailing `//` comment, and move the lexer past it.
fn directive_tail(lexer: &mut Lexer<Raw>, tokens: &mut Vec<Token>) {
    let rest = lexer.remainder();
    let base = lexer.span().end;
    let line_len = rest.find(['\r', '\n']).unwrap_or(rest.len());
    let line = &rest[..line_len];

    let (argument, comment_at) = match line.find("//") {
        Some(at) => (&line[..at], Some(at)),
        None => (line, None),
    };

    let trimmed = argument.trim();
    if !trimmed.is_empty() {
        let lead = argument.len() - argument.trim_start().len();
        let start = base + lead;
        tokens.push(Token::new(
            text_range(start, start + trimmed.len()),
            Category::PreprocessorText,
            trimmed,
        ));
    }

    if let Some(at) = comment_at {
        let comment = line[at..].trim_end();
        let start = base + at;
        tokens.push(Token::new(
            text_range(start, start + comment.len()),
            Category::Comment,
            comment,
        ));
    }

    lexer.bump(line_len);
}
