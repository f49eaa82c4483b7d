//! Shared scenes, descriptors and basis documents.

use satchel_spec::{
    AvatarDescriptor, DescriptorBuilder, ExpressionParameters, InventoryDescriptor, ObjectId,
    Parameter, Scene,
};

/// Descriptor id used by fixtures.
pub const FIXTURE_ID: &str = "a0b1c2d3e4f5061728394a5b6c7d8e9f";

/// Object ids of the standard rig built by [`avatar_scene`].
#[derive(Debug, Clone, Copy)]
pub struct AvatarRig {
    /// `Avatar` (root, carries the host record)
    pub root: ObjectId,
    /// `Avatar/Armature`
    pub armature: ObjectId,
    /// `Avatar/Armature/Hips`
    pub hips: ObjectId,
    /// `Avatar/Armature/Hips/Spine`
    pub spine: ObjectId,
    /// `Avatar/Armature/Hips/Spine/Hat`
    pub hat: ObjectId,
    /// `Avatar/Body`
    pub body: ObjectId,
    /// `Avatar/Scarf`
    pub scarf: ObjectId,
}

/// A host avatar with the five standard playable layers and a small rig.
pub fn avatar_scene() -> (Scene, AvatarRig) {
    let mut scene = Scene::new().with_avatar(AvatarDescriptor::with_default_layers());
    let root = scene.add_object("Avatar", None);
    let armature = scene.add_object("Armature", Some(root));
    let hips = scene.add_object("Hips", Some(armature));
    let spine = scene.add_object("Spine", Some(hips));
    let hat = scene.add_object("Hat", Some(spine));
    let body = scene.add_object("Body", Some(root));
    let scarf = scene.add_object("Scarf", Some(root));
    (
        scene,
        AvatarRig {
            root,
            armature,
            hips,
            spine,
            hat,
            body,
            scarf,
        },
    )
}

/// A descriptor builder keyed by [`FIXTURE_ID`].
pub fn descriptor() -> DescriptorBuilder {
    InventoryDescriptor::builder(FIXTURE_ID)
}

/// A basis parameter set with `count` named int parameters.
pub fn filler_parameters(count: usize) -> ExpressionParameters {
    ExpressionParameters::new(
        (0..count)
            .map(|i| Parameter::int(format!("Existing{}", i)))
            .collect(),
    )
}
