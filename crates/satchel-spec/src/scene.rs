//! Scene hierarchy the inventory targets live in.
//!
//! Objects are stored flat; `ObjectId` is an index into [`Scene::objects`] and
//! each object names its parent. The object without a parent at the top of a
//! chain is the root that animation paths are resolved against.

use serde::{Deserialize, Serialize};

use crate::avatar::AvatarDescriptor;
use crate::error::SpecError;

/// Reference to a scene object by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Returns the index into the scene's object list.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the scene hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Object name; one segment of an animation path.
    pub name: String,
    /// Parent object, `None` for a root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ObjectId>,
    /// Current active (visible) state.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// The hierarchy plus the host avatar record attached to its root.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    /// All objects, addressed by index.
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    /// Host configuration record; required for generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<AvatarDescriptor>,
}

impl Scene {
    /// Creates an empty scene without a host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a scene from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Serializes the scene to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Attaches a host record.
    pub fn with_avatar(mut self, avatar: AvatarDescriptor) -> Self {
        self.avatar = Some(avatar);
        self
    }

    /// Appends an object and returns its id.
    pub fn add_object(&mut self, name: impl Into<String>, parent: Option<ObjectId>) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(SceneObject {
            name: name.into(),
            parent,
            active: true,
        });
        id
    }

    /// Looks up an object; `None` for dangling ids.
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.index())
    }

    /// Mutable lookup; `None` for dangling ids.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.index())
    }

    /// Returns true if `id` refers to an object of this scene.
    pub fn contains(&self, id: ObjectId) -> bool {
        id.index() < self.objects.len()
    }

    /// Parent of `id`, if both exist.
    pub fn parent_of(&self, id: ObjectId) -> Option<ObjectId> {
        self.get(id).and_then(|o| o.parent)
    }

    /// Checks that every parent exists and no object is its own ancestor.
    pub fn validate(&self) -> Result<(), SpecError> {
        for (index, object) in self.objects.iter().enumerate() {
            if let Some(parent) = object.parent {
                if !self.contains(parent) {
                    return Err(SpecError::InvalidScene(format!(
                        "object {} '{}' has unknown parent {}",
                        ObjectId(index as u32),
                        object.name,
                        parent
                    )));
                }
            }
        }

        // A chain longer than the object count must revisit a node.
        let limit = self.objects.len();
        for index in 0..self.objects.len() {
            let mut steps = 0;
            let mut current = self.objects[index].parent;
            while let Some(id) = current {
                steps += 1;
                if steps > limit {
                    return Err(SpecError::InvalidScene(format!(
                        "object {} '{}' is part of a parent cycle",
                        ObjectId(index as u32),
                        self.objects[index].name
                    )));
                }
                current = self.parent_of(id);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_object_assigns_sequential_ids() {
        let mut scene = Scene::new();
        let root = scene.add_object("Avatar", None);
        let child = scene.add_object("Armature", Some(root));
        assert_eq!(root, ObjectId(0));
        assert_eq!(child, ObjectId(1));
        assert_eq!(scene.parent_of(child), Some(root));
        assert_eq!(scene.parent_of(root), None);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_parent() {
        let json = r#"{ "objects": [ { "name": "A", "parent": 7 } ] }"#;
        let err = Scene::from_json(json).unwrap_err();
        assert!(err.to_string().contains("unknown parent"));
    }

    #[test]
    fn test_validate_rejects_cycle() {
        let json = r#"{ "objects": [
            { "name": "A", "parent": 1 },
            { "name": "B", "parent": 0 }
        ] }"#;
        let err = Scene::from_json(json).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_objects_default_to_active() {
        let scene = Scene::from_json(r#"{ "objects": [ { "name": "A" } ] }"#).unwrap();
        assert!(scene.objects[0].active);
        assert!(scene.avatar.is_none());
    }
}
