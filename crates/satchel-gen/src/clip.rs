//! Toggle clip synthesis.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use satchel_spec::{AnimationClip, CurveBinding, InventorySlot, ObjectId, Scene};

use crate::path::resolve_anim_path;

/// Prefix of generated clip names.
pub const CLIP_PREFIX: &str = "toggleAnim";

/// Name of the clip generated for slot `index`.
pub fn clip_name(index: usize) -> String {
    format!("{}{}", CLIP_PREFIX, index)
}

/// A design-time change to a live scene object's active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewEdit {
    /// Object to change.
    pub object: ObjectId,
    /// Active state to set.
    pub active: bool,
}

/// Builds a clip holding each live target's active state at `active`.
///
/// Null targets and ids outside the scene are skipped.
pub fn synthesize_clip(
    name: impl Into<String>,
    targets: &[Option<ObjectId>],
    active: bool,
    scene: &Scene,
) -> AnimationClip {
    let mut clip = AnimationClip::new(name);
    for id in targets.iter().flatten() {
        match resolve_anim_path(scene, *id) {
            Some(path) => clip.curves.push(CurveBinding::constant_active(path, active)),
            None => warn!("{}: target {} is not in the scene, skipped", clip.name, id),
        }
    }
    clip
}

/// Builds the triggered-state clip of slot `index` and the resting-state
/// preview edits for its live targets.
///
/// The clip drives targets to the opposite of the slot's resting state.
pub fn slot_clip(
    index: usize,
    slot: &InventorySlot,
    scene: &Scene,
) -> (AnimationClip, Vec<PreviewEdit>) {
    let clip = synthesize_clip(clip_name(index), &slot.targets, !slot.start_enabled, scene);
    debug!(
        "slot {} '{}': clip {} with {} curve(s)",
        index,
        slot.name,
        clip.name,
        clip.curves.len()
    );

    let edits = slot
        .live_targets()
        .filter(|id| scene.contains(*id))
        .map(|object| PreviewEdit {
            object,
            active: slot.start_enabled,
        })
        .collect();

    (clip, edits)
}

/// Applies preview edits to the scene; returns how many objects changed.
pub fn apply_preview(scene: &mut Scene, edits: &[PreviewEdit]) -> usize {
    let mut applied = 0;
    for edit in edits {
        if let Some(object) = scene.get_mut(edit.object) {
            object.active = edit.active;
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scene() -> Scene {
        let mut scene = Scene::new();
        let root = scene.add_object("Avatar", None);
        let body = scene.add_object("Body", Some(root));
        scene.add_object("Hat", Some(body));
        scene.add_object("Scarf", Some(body));
        scene
    }

    #[test]
    fn test_null_target_skipped() {
        let scene = scene();
        let slot = InventorySlot::new("Gear")
            .target(ObjectId(2))
            .missing_target()
            .target(ObjectId(3));
        let (clip, edits) = slot_clip(0, &slot, &scene);

        assert_eq!(clip.name, "toggleAnim0");
        let paths: Vec<&str> = clip.paths().collect();
        assert_eq!(paths, vec!["Body/Hat", "Body/Scarf"]);
        assert_eq!(edits.len(), 2);
    }

    #[test]
    fn test_triggered_value_inverts_resting_state() {
        let scene = scene();
        let off = InventorySlot::new("Hat").target(ObjectId(2));
        let (clip, edits) = slot_clip(1, &off, &scene);
        assert_eq!(clip.curves[0].initial_value(), Some(1.0));
        assert_eq!(edits, vec![PreviewEdit { object: ObjectId(2), active: false }]);

        let on = InventorySlot::new("Hat").target(ObjectId(2)).start_enabled(true);
        let (clip, edits) = slot_clip(1, &on, &scene);
        assert_eq!(clip.curves[0].initial_value(), Some(0.0));
        assert!(edits[0].active);
    }

    #[test]
    fn test_no_live_targets_yields_empty_clip() {
        let scene = scene();
        let slot = InventorySlot::new("Nothing").missing_target();
        let (clip, edits) = slot_clip(2, &slot, &scene);
        assert!(clip.is_empty());
        assert!(edits.is_empty());
    }

    #[test]
    fn test_dangling_id_skipped() {
        let scene = scene();
        let slot = InventorySlot::new("Ghost").target(ObjectId(42));
        let (clip, edits) = slot_clip(0, &slot, &scene);
        assert!(clip.is_empty());
        assert!(edits.is_empty());
    }

    #[test]
    fn test_apply_preview() {
        let mut scene = scene();
        let applied = apply_preview(
            &mut scene,
            &[
                PreviewEdit { object: ObjectId(2), active: false },
                PreviewEdit { object: ObjectId(9), active: false },
            ],
        );
        assert_eq!(applied, 1);
        assert!(!scene.objects[2].active);
        assert!(scene.objects[3].active);
    }
}
