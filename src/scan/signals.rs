//! Heuristic component-detection signals.
//!
//! An exported declaration only counts as a UI component if its identifier
//! starts uppercase and at least one of these file-level signals fires. Each
//! signal is an independent predicate over the file's full text, kept in an
//! ordered table so every rule stays unit-testable on its own. This is
//! textual pattern matching, not parsing; false positives and negatives are
//! accepted.

/// A named predicate over a file's full text.
pub struct Signal {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
}

/// The detection rules, checked in order. The first match wins and its name
/// is reported in the scan log.
pub const SIGNALS: &[Signal] = &[
    Signal { name: "markup", matches: has_markup },
    Signal { name: "ui-import", matches: has_ui_import },
    Signal { name: "base-class", matches: extends_component },
    Signal { name: "hooks", matches: uses_hooks },
    Signal { name: "markup-return", matches: returns_markup },
];

/// Name of the first signal that fires for `text`, if any.
pub fn first_match(text: &str) -> Option<&'static str> {
    SIGNALS
        .iter()
        .find(|signal| (signal.matches)(text))
        .map(|signal| signal.name)
}

/// Angle-bracket markup usage: a self-closing or closing tag somewhere in
/// the file.
fn has_markup(text: &str) -> bool {
    (text.contains('<') && text.contains("/>")) || text.contains("</")
}

/// Import of the recognized UI library.
fn has_ui_import(text: &str) -> bool {
    text.contains("import React") || text.contains("import * as React")
}

/// Extension of the recognized component base class.
fn extends_component(text: &str) -> bool {
    text.contains("extends React.Component") || text.contains("extends Component")
}

/// Usage of recognized state/effect hook names.
fn uses_hooks(text: &str) -> bool {
    ["useState", "useEffect", "useContext"]
        .iter()
        .any(|hook| text.contains(hook))
}

/// A `return (` or `=> (` expression immediately opening markup, allowing
/// whitespace: `return (\n  <div>` and `=> (<span />)` both match.
fn returns_markup(text: &str) -> bool {
    markup_opens_after(text, "return") || markup_opens_after(text, "=>")
}

fn markup_opens_after(text: &str, lead: &str) -> bool {
    let mut rest = text;
    while let Some(idx) = rest.find(lead) {
        let after = &rest[idx + lead.len()..];
        let trimmed = after.trim_start();
        if let Some(inner) = trimmed.strip_prefix('(') {
            if inner.trim_start().starts_with('<') {
                return true;
            }
        }
        rest = after;
    }
    false
}

/// Whether captured parameter text suggests the component accepts injected
/// styles: a `style` token, a `props` object, a spread, or any `{ … }`
/// destructuring pattern.
pub fn params_accept_style(params: &str) -> bool {
    params.contains("style")
        || params.contains("props")
        || params.contains("...")
        || has_destructuring(params)
}

fn has_destructuring(params: &str) -> bool {
    match params.find('{') {
        Some(open) => params[open..].contains('}'),
        None => false,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
