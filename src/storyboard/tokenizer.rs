//! logos-based tokenizer for the generated storyboard format.
//!
//! Only the structural markers the serializer itself emits need to lex
//! cleanly: tag delimiters, attribute assignments, single-quoted strings,
//! the double-braced style object, and bare integers. Anything else in the
//! file (import punctuation, arbitrary expression text) becomes an error
//! token and is skipped by the parser.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (`</` beats `<`, `{{` beats `{`)
//! 2. For equal length matches, earlier-defined variants win

use logos::Logos;

/// Storyboard markup token.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// `</`
    #[token("</")]
    CloseTagStart,

    /// `/>`
    #[token("/>")]
    SelfCloseEnd,

    /// `{{`
    #[token("{{")]
    DoubleBraceOpen,

    /// `}}`
    #[token("}}")]
    DoubleBraceClose,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteral,

    /// Integer, possibly negative.
    #[regex(r"-?[0-9]+")]
    Number,

    /// Identifier: tag names, attribute names, style properties. Includes
    /// `-` so `data-label` lexes as one token.
    #[regex(r"[A-Za-z_][A-Za-z0-9_-]*")]
    Ident,

    // ── Single-character punctuation ─────────────────────────────────

    /// `<`
    #[token("<")]
    TagStart,

    /// `>`
    #[token(">")]
    TagEnd,

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// `=`
    #[token("=")]
    Equals,

    /// `:`
    #[token(":")]
    Colon,

    /// `,`
    #[token(",")]
    Comma,
}

/// A token plus its text and byte span in the source.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub text: String,
    /// Index in the token stream (for error reporting).
    pub pos: usize,
    /// Byte offset where this token starts in the source.
    pub byte_start: usize,
    /// Byte offset where this token ends in the source.
    pub byte_end: usize,
}

/// Tokenize input with span information preserved; unlexable spans are
/// skipped.
pub fn tokenize(input: &str) -> Vec<SpannedToken> {
    let mut tokens = Vec::new();
    let mut idx = 0;

    for (result, span) in Token::lexer(input).spanned() {
        if let Ok(token) = result {
            tokens.push(SpannedToken {
                text: input[span.clone()].to_string(),
                token,
                pos: idx,
                byte_start: span.start,
                byte_end: span.end,
            });
            idx += 1;
        }
    }

    tokens
}

// ===========================================================================
// Tests
// ===========================================================================
