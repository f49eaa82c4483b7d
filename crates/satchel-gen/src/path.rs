//! Animation path resolution.

use satchel_spec::{ObjectId, Scene};

/// Resolves the `/`-joined path from the hierarchy root to `target`.
///
/// The root itself is excluded; a target that is itself a root resolves to
/// its own name. Returns `None` for ids outside the scene or for a parent
/// chain that never ends.
///
/// # Example
/// ```
/// use satchel_spec::Scene;
/// use satchel_gen::resolve_anim_path;
///
/// let mut scene = Scene::new();
/// let root = scene.add_object("Avatar", None);
/// let body = scene.add_object("Body", Some(root));
/// let hat = scene.add_object("Hat", Some(body));
///
/// assert_eq!(resolve_anim_path(&scene, hat).as_deref(), Some("Body/Hat"));
/// ```
pub fn resolve_anim_path(scene: &Scene, target: ObjectId) -> Option<String> {
    let object = scene.get(target)?;
    let mut segments = vec![object.name.as_str()];

    let mut current = object.parent;
    let mut steps = 0;
    while let Some(id) = current {
        let ancestor = scene.get(id)?;
        if ancestor.parent.is_none() {
            break;
        }
        steps += 1;
        if steps > scene.objects.len() {
            return None;
        }
        segments.push(ancestor.name.as_str());
        current = ancestor.parent;
    }

    segments.reverse();
    Some(segments.join("/"))
}
