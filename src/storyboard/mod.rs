//! Storyboard document model and round trip.
//!
//! The storyboard is both output and input: [`serialize`] renders the scene
//! layout to source text, and [`parser`] recovers the layout from that text
//! on the next run so [`reconcile`] can preserve it.

pub mod parser;
pub mod reconcile;
pub mod serialize;
pub mod tokenizer;

use crate::geometry::SceneRect;
use crate::scan::ComponentRecord;

/// Default width of a newly placed scene.
pub const SCENE_WIDTH: i32 = 700;
/// Default height of a newly placed scene.
pub const SCENE_HEIGHT: i32 = 700;
/// Horizontal step between adjacent scene left edges.
pub const SCENE_SPACING: i32 = 816;
/// Shared top coordinate of every scene on the strip.
pub const SCENE_TOP: i32 = 128;
/// Clearance required between a gap slot's right edge and the next scene.
pub const GAP_BUFFER: i32 = 20;

/// First anchor component: reserved leftmost position.
pub const PLAYGROUND: &str = "Playground";
/// Second anchor component: reserved position right of the first.
pub const APP: &str = "App";
/// Label given to the second anchor's scene.
pub const APP_LABEL: &str = "My App";
/// Reserved left offset of the first anchor.
pub const PLAYGROUND_LEFT: i32 = 212;
/// Reserved left offset of the second anchor when both anchors are present.
pub const APP_LEFT: i32 = 992;

/// Default rectangle for the first anchor.
pub const PLAYGROUND_RECT: SceneRect = SceneRect::new(PLAYGROUND_LEFT, SCENE_TOP, 700, 759);
/// Default rectangle for the second anchor.
pub const APP_RECT: SceneRect = SceneRect::new(APP_LEFT, SCENE_TOP, 744, 1133);

/// What a scene renders.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneSource {
    /// A component discovered by the current scan.
    Component(ComponentRecord),
    /// Inner markup carried over from the previous storyboard that could not
    /// be attributed to a scanned component. Re-emitted verbatim and never
    /// pruned, so hand-authored layout the tool cannot understand survives.
    Preserved(String),
}

/// One rectangle on the storyboard strip, assigned to one component.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Scene identifier, normally `lowercase(component) + "-scene"`.
    pub id: String,
    pub rect: SceneRect,
    pub label: String,
    pub source: SceneSource,
}

impl SceneConfig {
    /// The scanned component's name, if this scene has one.
    pub fn component_name(&self) -> Option<&str> {
        match &self.source {
            SceneSource::Component(record) => Some(&record.name),
            SceneSource::Preserved(_) => None,
        }
    }
}
