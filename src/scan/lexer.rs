//! logos-based lexer for exported declarations.
//!
//! This is deliberately not a full ECMAScript lexer: it recognizes just
//! enough structure to find `export <var|const|let|function|class> <Ident>`
//! sequences and the raw parameter text of an `= (…)` or `= function (…)`
//! initializer. Everything else in the file (strings, operators, markup)
//! lexes as error tokens and is skipped, so declarations quoted inside
//! string literals or comments can produce false positives. That is an
//! accepted limitation of heuristic scanning.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `exported` matches [`Token::Ident`], not
//!    `export` + `ed`)
//! 2. For equal length matches, earlier-defined variants win (so `const`
//!    matches [`Token::Const`], not `Ident`)

use logos::Logos;

/// Source token relevant to export scanning.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// `export`
    #[token("export")]
    Export,

    /// `var`
    #[token("var")]
    Var,

    /// `const`
    #[token("const")]
    Const,

    /// `let`
    #[token("let")]
    Let,

    /// `function`
    #[token("function")]
    Function,

    /// `class`
    #[token("class")]
    Class,

    /// Any other identifier, including `$`-prefixed ones.
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    /// `=`
    #[token("=")]
    Equals,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,
}

/// The declaration keyword an export was introduced with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeclKeyword {
    Var,
    Const,
    Let,
    Function,
    Class,
}

impl DeclKeyword {
    fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::Var => Some(DeclKeyword::Var),
            Token::Const => Some(DeclKeyword::Const),
            Token::Let => Some(DeclKeyword::Let),
            Token::Function => Some(DeclKeyword::Function),
            Token::Class => Some(DeclKeyword::Class),
            _ => None,
        }
    }
}

/// An exported declaration found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDecl {
    pub keyword: DeclKeyword,
    pub name: String,
    /// Raw text between the parentheses of an `= (…)` or `= function (…)`
    /// initializer. `export function F(props)` declarations carry no
    /// captured parameters; only initializer forms do.
    pub params: Option<String>,
}

/// A token plus its byte span in the source.
struct Spanned {
    token: Token,
    start: usize,
    end: usize,
}

fn lex(source: &str) -> Vec<Spanned> {
    Token::lexer(source)
        .spanned()
        .filter_map(|(result, span)| {
            result.ok().map(|token| Spanned {
                token,
                start: span.start,
                end: span.end,
            })
        })
        .collect()
}

/// Scan `source` for exported declarations.
pub fn exported_decls(source: &str) -> Vec<ExportedDecl> {
    let tokens = lex(source);
    let mut decls = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if tokens[i].token != Token::Export {
            i += 1;
            continue;
        }

        // `export` must be followed by a declaration keyword and a name.
        let Some(keyword) = tokens.get(i + 1).and_then(|t| DeclKeyword::from_token(&t.token))
        else {
            i += 1;
            continue;
        };
        let Some(name_tok) = tokens.get(i + 2).filter(|t| t.token == Token::Ident) else {
            i += 1;
            continue;
        };
        let name = source[name_tok.start..name_tok.end].to_string();

        let params = initializer_params(source, &tokens, i + 3);
        decls.push(ExportedDecl { keyword, name, params });

        i += 3;
    }

    decls
}

/// Capture the parameter text of an `= (…)` or `= function (…)` initializer
/// starting at token index `at`, if present.
///
/// The capture stops at the first `)` without tracking nesting, mirroring
/// how a non-greedy textual match behaves.
fn initializer_params(source: &str, tokens: &[Spanned], at: usize) -> Option<String> {
    if tokens.get(at)?.token != Token::Equals {
        return None;
    }

    let open = match tokens.get(at + 1)?.token {
        Token::ParenOpen => at + 1,
        Token::Function if tokens.get(at + 2)?.token == Token::ParenOpen => at + 2,
        _ => return None,
    };

    let close = tokens[open + 1..]
        .iter()
        .find(|t| t.token == Token::ParenClose)?;

    Some(source[tokens[open].end..close.start].to_string())
}

// ===========================================================================
// Tests
// ===========================================================================
