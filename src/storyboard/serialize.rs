//! Storyboard document emission.
//!
//! Renders the reconciled scene list to the generated source text: two fixed
//! import lines, one import per distinct component name, then the storyboard
//! declaration with one scene block per scene. The emitted shape is exactly
//! what [`crate::storyboard::parser`] reads back on the next run.

use std::collections::HashSet;
use std::fmt::Write;

use crate::scan::ComponentRecord;
use crate::storyboard::{SceneConfig, SceneSource};

/// Render the complete storyboard document.
///
/// Imports are emitted in component discovery order and deduplicated by
/// name; scenes are emitted in the order given.
pub fn render_storyboard(components: &[ComponentRecord], scenes: &[SceneConfig]) -> String {
    let mut out = String::new();

    out.push_str("import * as React from 'react'\n");
    out.push_str("import { Scene, Storyboard } from 'utopia-api'\n");

    let mut imported: HashSet<&str> = HashSet::new();
    for component in components {
        if imported.insert(&component.name) {
            let _ = writeln!(
                out,
                "import {{ {} }} from '../src/{}'",
                component.name,
                component.import_path()
            );
        }
    }

    out.push_str("\nexport var storyboard = (\n  <Storyboard>\n");
    for scene in scenes {
        render_scene(&mut out, scene);
    }
    out.push_str("  </Storyboard>\n)\n");

    out
}

fn render_scene(out: &mut String, scene: &SceneConfig) {
    let rect = scene.rect;

    out.push_str("    <Scene\n");
    let _ = writeln!(out, "      id='{}'", scene.id);
    let _ = writeln!(out, "      commentId='{}'", scene.id);
    out.push_str("      style={{\n");
    let _ = writeln!(out, "        width: {},", rect.width);
    let _ = writeln!(out, "        height: {},", rect.height);
    out.push_str("        position: 'absolute',\n");
    let _ = writeln!(out, "        left: {},", rect.left);
    let _ = writeln!(out, "        top: {},", rect.top);
    out.push_str("      }}\n");
    let _ = writeln!(out, "      data-label='{}'", scene.label);
    out.push_str("    >\n");

    match &scene.source {
        SceneSource::Component(component) => {
            if component.has_style_prop {
                let _ = writeln!(out, "      <{} style={{{{}}}} />", component.name);
            } else {
                let _ = writeln!(out, "      <{} />", component.name);
            }
        }
        SceneSource::Preserved(children) => {
            let _ = writeln!(out, "      {children}");
        }
    }

    out.push_str("    </Scene>\n");
}

// ===========================================================================
// Tests
// ===========================================================================
