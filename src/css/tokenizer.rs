//! logos-based CSS tokenizer.
//!
//! The lexer only recognises the structure the parser needs (blocks, strings,
//! comments, at-keywords, `!important`). Everything else comes out as
//! [`Token::Delim`] runs; the parser slices the original source text by span,
//! so no value is ever re-assembled from token kinds.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `!important` beats `!` as a delimiter)
//! 2. For equal length matches, earlier-defined variants win

use std::ops::Range;

use logos::Logos;

/// CSS token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Run of whitespace.
    #[regex(r"[ \t\n\r\f]+")]
    Whitespace,

    /// Block comment `/* ... */`.
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    Comment,

    /// Quoted string, either quote style, with backslash escapes.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    /// `@media`, `@-webkit-keyframes`, ...
    #[regex(r"@-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    AtKeyword,

    /// `!important`, whitespace allowed after the bang, any case.
    #[regex(r"![ \t\n\r\f]*[iI][mM][pP][oO][rR][tT][aA][nN][tT]")]
    Important,

    /// Identifier, including custom property names (`--x`).
    #[regex(r"(--|-?[a-zA-Z_])[a-zA-Z0-9_-]*")]
    Ident,

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,

    /// Any other character (numbers, `.`, `#`, `>`, ...). Non-ASCII runs are
    /// matched here directly so spans never split a UTF-8 sequence.
    #[regex(r"[^\x00-\x7F]+")]
    Delim,

    /// A string with no closing quote on its line.
    BadString,

    /// A comment with no closing `*/`.
    BadComment,
}

/// A token together with its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Range<usize>,
}

impl Lexeme {
    /// The source text this lexeme covers.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }

    /// Whitespace and comments carry no structure.
    pub fn is_trivia(&self) -> bool {
        matches!(self.token, Token::Whitespace | Token::Comment)
    }
}

/// Tokenize a CSS string into spanned lexemes.
///
/// Characters logos cannot match become [`Token::Delim`]; an unmatched opening
/// quote or `/*` becomes [`Token::BadString`] / [`Token::BadComment`] so the
/// parser can report it.
pub fn tokenize(input: &str) -> Vec<Lexeme> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| {
            let token = result.unwrap_or_else(|()| classify_error(&input[span.start..]));
            Lexeme { token, span }
        })
        .collect()
}

fn classify_error(rest: &str) -> Token {
    if rest.starts_with("/*") {
        Token::BadComment
    } else if rest.starts_with('"') || rest.starts_with('\'') {
        Token::BadString
    } else {
        Token::Delim
    }
}
