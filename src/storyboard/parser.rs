//! Existing-layout parser.
//!
//! Recovers scene geometry from previously generated storyboard text by
//! recursive descent over the token stream from
//! [`crate::storyboard::tokenizer`]. Only the structural markers the
//! serializer emits are recognized — a `<Scene` tag with `id`, `commentId`,
//! an inline `style={{ … }}` object, a `data-label`, and inner content up to
//! the matching `</Scene>`. Everything between scene blocks is skipped.
//!
//! Per-scene problems (an incomplete style object, a missing id) drop just
//! that scene with a warning; structural errors fail the whole parse, which
//! the caller treats as "no previous layout".

use tracing::warn;

use crate::geometry::SceneRect;
use crate::storyboard::tokenizer::{tokenize, SpannedToken, Token};

/// Infrastructure wrapper tags that never name the scene's component. When
/// the first capitalized tag is one of these, the component is recovered
/// from a `component={Name}` reference instead.
const WRAPPER_TAGS: &[&str] = &["Scene", "Storyboard", "SafeComponentWrapper"];

/// Errors from storyboard parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A scene recovered from previously generated output.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedScene {
    pub id: String,
    pub rect: SceneRect,
    pub label: String,
    /// Recovered component name; `None` marks the scene as unidentifiable,
    /// which shields it from pruning.
    pub component_name: Option<String>,
    /// Raw inner markup between the opening and closing tags.
    pub children: String,
}

/// Parse storyboard text into the scenes it contains.
pub fn parse_storyboard(input: &str) -> Result<Vec<ParsedScene>, ParseError> {
    let tokens = tokenize(input);
    let mut parser = Parser {
        input,
        tokens,
        cursor: 0,
    };

    let mut scenes = Vec::new();
    while !parser.is_eof() {
        if parser.at_scene_open() {
            if let Some(scene) = parser.parse_scene()? {
                scenes.push(scene);
            }
        } else {
            parser.cursor += 1;
        }
    }

    Ok(scenes)
}

/// Accumulated fields of one inline style object.
#[derive(Debug, Default)]
struct StyleObject {
    width: Option<i32>,
    height: Option<i32>,
    left: Option<i32>,
    top: Option<i32>,
}

impl StyleObject {
    fn into_rect(self) -> Option<SceneRect> {
        Some(SceneRect {
            left: self.left?,
            top: self.top?,
            width: self.width?,
            height: self.height?,
        })
    }
}

/// Recursive descent parser state.
struct Parser<'a> {
    input: &'a str,
    tokens: Vec<SpannedToken>,
    cursor: usize,
}

impl Parser<'_> {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&SpannedToken> {
        if self.cursor < self.tokens.len() {
            let tok = &self.tokens[self.cursor];
            self.cursor += 1;
            Some(tok)
        } else {
            None
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<SpannedToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    /// Whether the cursor sits on a `<Scene` opening.
    fn at_scene_open(&self) -> bool {
        matches!(self.peek(), Some(t) if t.token == Token::TagStart)
            && matches!(
                self.tokens.get(self.cursor + 1),
                Some(t) if t.token == Token::Ident && t.text == "Scene"
            )
    }

    /// Whether the token at `at` starts a `<Scene` or `</Scene` sequence.
    fn scene_tag_at(&self, at: usize, opener: &Token) -> bool {
        matches!(self.tokens.get(at), Some(t) if &t.token == opener)
            && matches!(
                self.tokens.get(at + 1),
                Some(t) if t.token == Token::Ident && t.text == "Scene"
            )
    }

    /// Parse one `<Scene …>…</Scene>` block.
    ///
    /// Returns `Ok(None)` for a structurally sound scene with missing
    /// required fields, which is logged and skipped.
    fn parse_scene(&mut self) -> Result<Option<ParsedScene>, ParseError> {
        self.expect(&Token::TagStart)?;
        self.expect_ident()?; // "Scene", guaranteed by at_scene_open

        let mut id: Option<String> = None;
        let mut label: Option<String> = None;
        let mut style: Option<StyleObject> = None;
        let mut children = String::new();

        loop {
            match self.peek().map(|t| t.token.clone()) {
                Some(Token::TagEnd) => {
                    let open_end = self.advance().map(|t| t.byte_end).unwrap_or_default();
                    children = self.capture_children(open_end)?;
                    break;
                }
                Some(Token::SelfCloseEnd) => {
                    self.advance();
                    break;
                }
                Some(Token::Ident) => {
                    let attr = self.expect_ident()?;
                    self.expect(&Token::Equals)?;
                    match self.attribute_value()? {
                        AttrValue::Text(value) => match attr.as_str() {
                            "id" => id = Some(value),
                            "data-label" => label = Some(value),
                            // commentId duplicates id; other string
                            // attributes are irrelevant.
                            _ => {}
                        },
                        AttrValue::Style(object) => {
                            if attr == "style" {
                                style = Some(object);
                            }
                        }
                        AttrValue::Skipped => {}
                    }
                }
                Some(other) => {
                    let pos = self.peek().map(|t| t.pos).unwrap_or_default();
                    return Err(ParseError::UnexpectedToken {
                        position: pos,
                        message: format!("unexpected {other:?} in scene attributes"),
                    });
                }
                None => {
                    return Err(ParseError::UnexpectedEof("inside scene tag".into()));
                }
            }
        }

        let Some(id) = id else {
            warn!("scene without id attribute, skipping");
            return Ok(None);
        };
        let Some(label) = label else {
            warn!(scene = %id, "scene without data-label, skipping");
            return Ok(None);
        };
        let Some(rect) = style.and_then(StyleObject::into_rect) else {
            warn!(scene = %id, "scene style block is missing geometry, skipping");
            return Ok(None);
        };

        let component_name = component_name_in(&children);
        if component_name.is_none() {
            warn!(scene = %id, "could not identify component, scene will be preserved");
        }

        Ok(Some(ParsedScene {
            id,
            rect,
            label,
            component_name,
            children,
        }))
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        let tok = self.expect(&Token::Ident)?;
        Ok(tok.text)
    }

    /// Parse one attribute value after `=`.
    fn attribute_value(&mut self) -> Result<AttrValue, ParseError> {
        match self.peek().map(|t| t.token.clone()) {
            Some(Token::StringLiteral) => {
                let tok = self.advance().cloned();
                let text = tok.map(|t| t.text).unwrap_or_default();
                Ok(AttrValue::Text(text.trim_matches('\'').to_string()))
            }
            Some(Token::DoubleBraceOpen) => {
                self.advance();
                Ok(AttrValue::Style(self.parse_style_object()?))
            }
            Some(Token::BraceOpen) => {
                self.skip_braced_expression()?;
                Ok(AttrValue::Skipped)
            }
            Some(other) => {
                let pos = self.peek().map(|t| t.pos).unwrap_or_default();
                Err(ParseError::UnexpectedToken {
                    position: pos,
                    message: format!("unexpected attribute value {other:?}"),
                })
            }
            None => Err(ParseError::UnexpectedEof("expected attribute value".into())),
        }
    }

    /// Parse `width: 700, height: 700, position: 'absolute', …}}` after the
    /// opening `{{` has been consumed. Non-numeric values are tolerated and
    /// ignored.
    fn parse_style_object(&mut self) -> Result<StyleObject, ParseError> {
        let mut style = StyleObject::default();

        loop {
            match self.peek().map(|t| t.token.clone()) {
                Some(Token::DoubleBraceClose) => {
                    self.advance();
                    break;
                }
                Some(Token::Ident) => {
                    let prop = self.expect_ident()?;
                    self.expect(&Token::Colon)?;
                    let value = self.style_value()?;
                    match prop.as_str() {
                        "width" => style.width = value,
                        "height" => style.height = value,
                        "left" => style.left = value,
                        "top" => style.top = value,
                        _ => {}
                    }
                    if self.peek().is_some_and(|t| t.token == Token::Comma) {
                        self.advance();
                    }
                }
                Some(other) => {
                    let pos = self.peek().map(|t| t.pos).unwrap_or_default();
                    return Err(ParseError::UnexpectedToken {
                        position: pos,
                        message: format!("unexpected {other:?} in style object"),
                    });
                }
                None => {
                    return Err(ParseError::UnexpectedEof("inside style object".into()));
                }
            }
        }

        Ok(style)
    }

    /// One style value: a number parses, anything else is `None`.
    fn style_value(&mut self) -> Result<Option<i32>, ParseError> {
        match self.advance() {
            Some(tok) if tok.token == Token::Number => {
                let pos = tok.pos;
                let text = tok.text.clone();
                text.parse::<i32>()
                    .map(Some)
                    .map_err(|_| ParseError::UnexpectedToken {
                        position: pos,
                        message: format!("number out of range: {text}"),
                    })
            }
            Some(tok) if matches!(tok.token, Token::StringLiteral | Token::Ident) => Ok(None),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!("unexpected style value {:?} '{}'", tok.token, tok.text),
            }),
            None => Err(ParseError::UnexpectedEof("expected style value".into())),
        }
    }

    /// Skip a `{…}` attribute expression, tracking brace depth.
    fn skip_braced_expression(&mut self) -> Result<(), ParseError> {
        self.expect(&Token::BraceOpen)?;
        let mut depth = 1i32;
        while depth > 0 {
            match self.advance() {
                Some(tok) => match tok.token {
                    Token::BraceOpen => depth += 1,
                    Token::BraceClose => depth -= 1,
                    Token::DoubleBraceOpen => depth += 2,
                    Token::DoubleBraceClose => depth -= 2,
                    _ => {}
                },
                None => {
                    return Err(ParseError::UnexpectedEof("inside braced expression".into()));
                }
            }
        }
        Ok(())
    }

    /// Capture raw inner text from `open_end` up to the matching `</Scene>`,
    /// leaving the cursor past the closing tag.
    fn capture_children(&mut self, open_end: usize) -> Result<String, ParseError> {
        let mut depth = 0usize;

        while self.cursor < self.tokens.len() {
            if self.scene_tag_at(self.cursor, &Token::TagStart) {
                depth += 1;
                self.cursor += 2;
                continue;
            }
            if self.scene_tag_at(self.cursor, &Token::CloseTagStart) {
                if depth == 0 {
                    let inner_end = self.tokens[self.cursor].byte_start;
                    self.cursor += 2; // `</` and `Scene`
                    self.expect(&Token::TagEnd)?;
                    return Ok(self.input[open_end..inner_end].to_string());
                }
                depth -= 1;
                self.cursor += 2;
                continue;
            }
            self.cursor += 1;
        }

        Err(ParseError::UnexpectedEof("expected </Scene>".into()))
    }
}

enum AttrValue {
    Text(String),
    Style(StyleObject),
    Skipped,
}

/// Recover the component name from a scene's inner markup: the first
/// capitalized tag, or — when that tag is an infrastructure wrapper — the
/// first `component={Name}` reference.
fn component_name_in(children: &str) -> Option<String> {
    let tokens = tokenize(children);

    let mut first_tag: Option<&str> = None;
    for (i, tok) in tokens.iter().enumerate() {
        if tok.token != Token::TagStart {
            continue;
        }
        if let Some(next) = tokens.get(i + 1) {
            if next.token == Token::Ident && starts_uppercase(&next.text) {
                first_tag = Some(&next.text);
                break;
            }
        }
    }

    match first_tag {
        Some(tag) if !WRAPPER_TAGS.contains(&tag) => Some(tag.to_string()),
        Some(_) => component_reference(&tokens),
        None => component_reference(&tokens),
    }
}

/// Find a `component={Name}` reference in a token stream.
fn component_reference(tokens: &[SpannedToken]) -> Option<String> {
    tokens.windows(5).find_map(|w| {
        let is_ref = w[0].token == Token::Ident
            && w[0].text == "component"
            && w[1].token == Token::Equals
            && w[2].token == Token::BraceOpen
            && w[3].token == Token::Ident
            && starts_uppercase(&w[3].text)
            && w[4].token == Token::BraceClose;
        is_ref.then(|| w[3].text.clone())
    })
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

// ===========================================================================
// Tests
// ===========================================================================
