//! Placement reconciler.
//!
//! Merges the current component scan with the previous storyboard layout:
//! carried-over scenes keep their geometry, scenes for removed components
//! are pruned (unless unidentifiable), anchors get their reserved offsets,
//! and new components are slotted into gaps or appended at the right edge.
//! A final compaction pass then reassigns every non-anchor left position in
//! one strictly increasing run, so the gap/frontier positions only decide
//! relative ordering, never the final coordinates.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};

use crate::config::Config;
use crate::geometry::SceneRect;
use crate::scan::ComponentRecord;
use crate::storyboard::parser::ParsedScene;
use crate::storyboard::{
    SceneConfig, SceneSource, APP, APP_LABEL, APP_LEFT, APP_RECT, GAP_BUFFER, PLAYGROUND,
    PLAYGROUND_LEFT, PLAYGROUND_RECT, SCENE_HEIGHT, SCENE_SPACING, SCENE_TOP, SCENE_WIDTH,
};

/// Compute the new scene list for the current components, reusing the
/// previous layout where possible. Returned scenes are in emission order.
pub fn reconcile(
    components: &[ComponentRecord],
    previous: Option<&[ParsedScene]>,
    config: &Config,
) -> Vec<SceneConfig> {
    let current_names: HashSet<&str> = components.iter().map(|c| c.name.as_str()).collect();

    let surviving = prune(previous.unwrap_or_default(), &current_names, config);

    let mut scenes: Vec<SceneConfig> = Vec::new();
    let mut added: HashSet<String> = HashSet::new();
    let mut used_positions: Vec<i32> = Vec::new();

    // Carry-over: current components whose derived scene id already exists
    // keep that scene's geometry verbatim.
    for component in components {
        let id = component.scene_id();
        if let Some(prev) = surviving.iter().find(|s| s.id == id) {
            if added.insert(component.name.clone()) {
                debug!(scene = %id, "using existing configuration");
                used_positions.push(prev.rect.left);
                scenes.push(SceneConfig {
                    id,
                    rect: prev.rect,
                    label: prev.label.clone(),
                    source: SceneSource::Component(component.clone()),
                });
            }
        }
    }

    // Surviving scenes with no matching component are carried with their
    // inner markup intact: unidentifiable scenes always, named scenes only
    // when pruning left them alive.
    for prev in &surviving {
        if scenes.iter().any(|s| s.id == prev.id) {
            continue;
        }
        if prev
            .component_name
            .as_deref()
            .is_some_and(|name| current_names.contains(name))
        {
            // The component exists but claims a different scene id; it will
            // be placed fresh below and this stale block is dropped.
            continue;
        }
        used_positions.push(prev.rect.left);
        scenes.push(SceneConfig {
            id: prev.id.clone(),
            rect: prev.rect,
            label: prev.label.clone(),
            source: SceneSource::Preserved(prev.children.trim().to_string()),
        });
    }

    // Anchor placement: fixed defaults for the two distinguished components
    // when nothing was carried over for them.
    for component in components {
        if added.contains(&component.name) {
            continue;
        }
        let (rect, label) = match component.name.as_str() {
            PLAYGROUND => (PLAYGROUND_RECT, PLAYGROUND.to_string()),
            APP => (APP_RECT, APP_LABEL.to_string()),
            _ => continue,
        };
        added.insert(component.name.clone());
        used_positions.push(rect.left);
        scenes.push(SceneConfig {
            id: component.scene_id(),
            rect,
            label,
            source: SceneSource::Component(component.clone()),
        });
    }

    // Gap discovery over every known position, then place the remaining
    // components into gaps or past the right edge. These positions are
    // advisory: compaction below overrides them, so they only determine
    // where a new scene sorts relative to the carried ones.
    let mut gaps: VecDeque<i32> = find_gap_slots(&used_positions).into();
    // Parsed positions are untrusted text; saturate instead of overflowing.
    let mut frontier = used_positions
        .iter()
        .copied()
        .max()
        .unwrap_or(0)
        .saturating_add(SCENE_SPACING);

    for component in components {
        if added.contains(&component.name) {
            continue;
        }
        let left = match gaps.pop_front() {
            Some(slot) => {
                info!(component = %component.name, position = slot, "added new scene in a gap");
                slot
            }
            None => {
                let slot = frontier;
                frontier = frontier.saturating_add(SCENE_SPACING);
                info!(component = %component.name, position = slot, "added new scene at the end");
                slot
            }
        };
        added.insert(component.name.clone());
        scenes.push(SceneConfig {
            id: component.scene_id(),
            rect: SceneRect::new(left, SCENE_TOP, SCENE_WIDTH, SCENE_HEIGHT),
            label: component.name.clone(),
            source: SceneSource::Component(component.clone()),
        });
    }

    compact(&mut scenes);
    scenes
}

/// Apply the pruning policy to the previous scenes.
///
/// Scenes whose recovered component no longer exists are dropped when
/// pruning is enabled; unidentifiable scenes are always retained.
fn prune<'a>(
    previous: &'a [ParsedScene],
    current_names: &HashSet<&str>,
    config: &Config,
) -> Vec<&'a ParsedScene> {
    previous
        .iter()
        .filter(|scene| match scene.component_name.as_deref() {
            None => {
                info!(scene = %scene.id, "preserving scene (component unidentified)");
                true
            }
            Some(name) if current_names.contains(name) => {
                debug!(scene = %scene.id, component = name, "keeping scene");
                true
            }
            Some(name) if config.prune_removed => {
                info!(scene = %scene.id, component = name, "pruning scene for removed component");
                false
            }
            Some(name) => {
                info!(scene = %scene.id, component = name, "keeping scene for removed component (pruning disabled)");
                true
            }
        })
        .collect()
}

/// Multiple-of-spacing slots between adjacent known positions with enough
/// clearance for a default scene, in left-to-right gap discovery order.
fn find_gap_slots(positions: &[i32]) -> Vec<i32> {
    if positions.len() < 2 {
        return Vec::new();
    }

    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let mut slots = Vec::new();
    for pair in sorted.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let gap = end.saturating_sub(start);
        if gap < SCENE_SPACING {
            continue;
        }
        let fits = gap / SCENE_SPACING;
        for step in 1..=fits {
            let slot = start.saturating_add(SCENE_SPACING.saturating_mul(step));
            if slot.saturating_add(SCENE_WIDTH + GAP_BUFFER) <= end {
                slots.push(slot);
            }
        }
    }

    info!(count = slots.len(), "found gaps between existing scenes");
    slots
}

/// Final compaction: pin the anchors, then reassign every other scene a
/// strictly increasing left position spaced by [`SCENE_SPACING`], in
/// ascending order of their pre-compaction positions. This closes any gap
/// left by pruning.
fn compact(scenes: &mut [SceneConfig]) {
    scenes.sort_by_key(|s| s.rect.left);

    let has_playground = scenes.iter().any(is_playground);
    let has_app = scenes.iter().any(is_app);

    let mut current = PLAYGROUND_LEFT;
    if has_playground {
        if let Some(scene) = scenes.iter_mut().find(|s| is_playground(s)) {
            scene.rect.left = PLAYGROUND_LEFT;
        }
        current = PLAYGROUND_LEFT + SCENE_SPACING;
    }
    if has_app {
        let app_left = if has_playground { APP_LEFT } else { PLAYGROUND_LEFT };
        if let Some(scene) = scenes.iter_mut().find(|s| is_app(s)) {
            scene.rect.left = app_left;
        }
        current = app_left + SCENE_SPACING;
    }

    let mut shifts = 0usize;
    for scene in scenes.iter_mut() {
        if is_playground(scene) || is_app(scene) {
            continue;
        }
        if scene.rect.left != current {
            debug!(scene = %scene.id, from = scene.rect.left, to = current, "repositioning scene");
            shifts += 1;
        }
        scene.rect.left = current;
        current = current.saturating_add(SCENE_SPACING);
    }

    if shifts > 0 {
        info!(count = shifts, "repositioned scenes to close gaps");
    } else {
        debug!("no scene repositioning needed");
    }
}

fn is_playground(scene: &SceneConfig) -> bool {
    scene.label == PLAYGROUND || scene.component_name() == Some(PLAYGROUND)
}

fn is_app(scene: &SceneConfig) -> bool {
    scene.label == APP_LABEL || scene.label == APP || scene.component_name() == Some(APP)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn component(name: &str) -> ComponentRecord {
        ComponentRecord {
            name: name.into(),
            path: format!("{name}.jsx"),
            has_style_prop: false,
        }
    }

    fn parsed(id: &str, left: i32, name: Option<&str>, label: &str) -> ParsedScene {
        ParsedScene {
            id: id.into(),
            rect: SceneRect::new(left, SCENE_TOP, SCENE_WIDTH, SCENE_HEIGHT),
            label: label.into(),
            component_name: name.map(Into::into),
            children: match name {
                Some(n) => format!("<{n} />"),
                None => "<div className='hand-authored' />".into(),
            },
        }
    }

    fn config() -> Config {
        Config::new("src", "utopia/storyboard.js")
    }

    fn lefts(scenes: &[SceneConfig]) -> Vec<i32> {
        scenes.iter().map(|s| s.rect.left).collect()
    }

    fn ids(scenes: &[SceneConfig]) -> Vec<&str> {
        scenes.iter().map(|s| s.id.as_str()).collect()
    }

    // ── Fresh generation ─────────────────────────────────────────────

    #[test]
    fn fresh_layout_places_anchors_then_spaced_scenes() {
        let components = [
            component("App"),
            component("Badge"),
            component("Card"),
            component("Playground"),
        ];
        let scenes = reconcile(&components, None, &config());

        assert_eq!(
            ids(&scenes),
            vec!["playground-scene", "app-scene", "badge-scene", "card-scene"]
        );
        assert_eq!(lefts(&scenes), vec![212, 992, 1808, 2624]);
        assert_eq!(scenes[0].label, "Playground");
        assert_eq!(scenes[1].label, "My App");
        assert_eq!(scenes[0].rect, PLAYGROUND_RECT);
        assert_eq!(scenes[1].rect, APP_RECT);
    }

    #[test]
    fn fresh_layout_without_anchors_starts_at_first_position() {
        let components = [component("Badge"), component("Card")];
        let scenes = reconcile(&components, None, &config());
        assert_eq!(lefts(&scenes), vec![212, 1028]);
    }

    #[test]
    fn app_alone_takes_the_first_anchor_slot() {
        let components = [component("App"), component("Badge")];
        let scenes = reconcile(&components, None, &config());
        assert_eq!(ids(&scenes), vec!["app-scene", "badge-scene"]);
        assert_eq!(lefts(&scenes), vec![212, 1028]);
    }

    // ── Anchor pinning ───────────────────────────────────────────────

    #[test]
    fn anchors_are_pinned_regardless_of_prior_positions() {
        let previous = [
            parsed("playground-scene", 5000, Some("Playground"), "Playground"),
            parsed("app-scene", 40, Some("App"), "My App"),
        ];
        let components = [component("Playground"), component("App")];
        let scenes = reconcile(&components, Some(&previous), &config());

        let playground = scenes.iter().find(|s| s.id == "playground-scene").unwrap();
        let app = scenes.iter().find(|s| s.id == "app-scene").unwrap();
        assert_eq!(playground.rect.left, 212);
        assert_eq!(app.rect.left, 992);
    }

    // ── Carry-over ───────────────────────────────────────────────────

    #[test]
    fn carried_scene_keeps_its_size_and_label() {
        let previous = [ParsedScene {
            id: "badge-scene".into(),
            rect: SceneRect::new(1808, 64, 500, 400),
            label: "Badge (tuned)".into(),
            component_name: Some("Badge".into()),
            children: "<Badge />".into(),
        }];
        let components = [component("Playground"), component("App"), component("Badge")];
        let scenes = reconcile(&components, Some(&previous), &config());

        let badge = scenes.iter().find(|s| s.id == "badge-scene").unwrap();
        assert_eq!(badge.rect, SceneRect::new(1808, 64, 500, 400));
        assert_eq!(badge.label, "Badge (tuned)");
        assert_eq!(badge.component_name(), Some("Badge"));
    }

    // ── Pruning and gap closure ──────────────────────────────────────

    #[test]
    fn pruning_closes_the_gap_left_by_a_removed_component() {
        let previous = [
            parsed("playground-scene", 212, Some("Playground"), "Playground"),
            parsed("app-scene", 992, Some("App"), "My App"),
            parsed("gone-scene", 1808, Some("Gone"), "Gone"),
            parsed("card-scene", 2624, Some("Card"), "Card"),
        ];
        let components = [component("Playground"), component("App"), component("Card")];
        let scenes = reconcile(&components, Some(&previous), &config());

        assert_eq!(ids(&scenes), vec!["playground-scene", "app-scene", "card-scene"]);
        assert_eq!(lefts(&scenes), vec![212, 992, 1808]);
    }

    #[test]
    fn pruning_disabled_keeps_the_removed_component_scene() {
        let previous = [
            parsed("playground-scene", 212, Some("Playground"), "Playground"),
            parsed("gone-scene", 1028, Some("Gone"), "Gone"),
        ];
        let components = [component("Playground")];
        let scenes = reconcile(&components, Some(&previous), &config().prune_removed(false));

        let gone = scenes.iter().find(|s| s.id == "gone-scene").unwrap();
        assert_eq!(gone.source, SceneSource::Preserved("<Gone />".into()));
        assert_eq!(gone.rect.left, 1028);
    }

    #[test]
    fn unidentifiable_scene_survives_pruning() {
        let previous = [
            parsed("playground-scene", 212, Some("Playground"), "Playground"),
            parsed("app-scene", 992, Some("App"), "My App"),
            parsed("mystery-scene", 1808, None, "Mystery"),
        ];
        let components = [component("Playground"), component("App")];
        let scenes = reconcile(&components, Some(&previous), &config());

        let mystery = scenes.iter().find(|s| s.id == "mystery-scene").unwrap();
        assert_eq!(mystery.rect.left, 1808);
        assert_eq!(
            mystery.source,
            SceneSource::Preserved("<div className='hand-authored' />".into())
        );
    }

    // ── New-component placement ──────────────────────────────────────

    #[test]
    fn new_component_sorts_into_a_gap() {
        // Positions 992..2624 leave room for exactly one spaced slot at 1808.
        let previous = [
            parsed("playground-scene", 212, Some("Playground"), "Playground"),
            parsed("app-scene", 992, Some("App"), "My App"),
            parsed("far-scene", 2624, Some("Far"), "Far"),
        ];
        let components = [
            component("Playground"),
            component("App"),
            component("Far"),
            component("Fresh"),
        ];
        let scenes = reconcile(&components, Some(&previous), &config());

        assert_eq!(
            ids(&scenes),
            vec!["playground-scene", "app-scene", "fresh-scene", "far-scene"]
        );
        assert_eq!(lefts(&scenes), vec![212, 992, 1808, 2624]);
    }

    #[test]
    fn new_components_append_past_the_rightmost_scene() {
        let previous = [
            parsed("playground-scene", 212, Some("Playground"), "Playground"),
            parsed("app-scene", 992, Some("App"), "My App"),
        ];
        let components = [
            component("Playground"),
            component("App"),
            component("Extra"),
        ];
        let scenes = reconcile(&components, Some(&previous), &config());
        assert_eq!(lefts(&scenes), vec![212, 992, 1808]);
    }

    // ── Stability ────────────────────────────────────────────────────

    #[test]
    fn reconcile_is_stable_when_nothing_changed() {
        let components = [
            component("App"),
            component("Badge"),
            component("Playground"),
        ];
        let first = reconcile(&components, None, &config());

        let as_parsed: Vec<ParsedScene> = first
            .iter()
            .map(|s| ParsedScene {
                id: s.id.clone(),
                rect: s.rect,
                label: s.label.clone(),
                component_name: s.component_name().map(Into::into),
                children: String::new(),
            })
            .collect();

        let second = reconcile(&components, Some(&as_parsed), &config());
        assert_eq!(first, second);
    }

    #[test]
    fn extreme_carried_position_does_not_overflow() {
        // A scene dragged (or hand-edited) to the far edge of the canvas must
        // not blow up frontier placement; compaction reels it back in.
        let previous = [parsed("mystery-scene", i32::MAX - 100, None, "Mystery")];
        let components = [component("Fresh")];
        let scenes = reconcile(&components, Some(&previous), &config());

        assert_eq!(ids(&scenes), vec!["mystery-scene", "fresh-scene"]);
        assert_eq!(lefts(&scenes), vec![212, 1028]);
    }

    #[test]
    fn duplicate_component_records_collapse_to_one_scene() {
        let components = [component("Twin"), component("Twin")];
        let scenes = reconcile(&components, None, &config());
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].id, "twin-scene");
    }

    #[test]
    fn reconciled_scenes_never_overlap() {
        let previous = [
            parsed("playground-scene", 212, Some("Playground"), "Playground"),
            parsed("app-scene", 992, Some("App"), "My App"),
            parsed("mystery-scene", 4000, None, "Mystery"),
        ];
        let components = [
            component("Playground"),
            component("App"),
            component("One"),
            component("Two"),
        ];
        let scenes = reconcile(&components, Some(&previous), &config());

        for (i, a) in scenes.iter().enumerate() {
            for b in scenes.iter().skip(i + 1) {
                assert!(
                    !a.rect.overlaps_horizontally(b.rect),
                    "{} overlaps {}",
                    a.id,
                    b.id
                );
            }
        }
    }

    // ── Gap discovery ────────────────────────────────────────────────

    #[test]
    fn gap_slots_between_spaced_positions() {
        // 992 → 2624 fits one slot at 1808 (the next multiple, 2624, has no
        // clearance before the right neighbor).
        assert_eq!(find_gap_slots(&[212, 992, 2624]), vec![1808]);
    }

    #[test]
    fn gap_slots_empty_when_tightly_packed() {
        assert!(find_gap_slots(&[212, 992]).is_empty());
        assert!(find_gap_slots(&[212]).is_empty());
        assert!(find_gap_slots(&[]).is_empty());
    }

    #[test]
    fn wide_gap_yields_multiple_slots() {
        // 212 → 212 + 816*3 = 2660 leaves slots at 1028 and 1844.
        assert_eq!(find_gap_slots(&[212, 2660]), vec![1028, 1844]);
    }
}
