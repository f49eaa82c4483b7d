//! Humanoid avatar masks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Humanoid body regions a mask can enable or disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Root,
    Body,
    Head,
    LeftLeg,
    RightLeg,
    LeftArm,
    RightArm,
    LeftFingers,
    RightFingers,
    LeftFootIk,
    RightFootIk,
    LeftHandIk,
    RightHandIk,
}

impl BodyPart {
    /// All body regions, in declaration order.
    pub const ALL: [BodyPart; 13] = [
        BodyPart::Root,
        BodyPart::Body,
        BodyPart::Head,
        BodyPart::LeftLeg,
        BodyPart::RightLeg,
        BodyPart::LeftArm,
        BodyPart::RightArm,
        BodyPart::LeftFingers,
        BodyPart::RightFingers,
        BodyPart::LeftFootIk,
        BodyPart::RightFootIk,
        BodyPart::LeftHandIk,
        BodyPart::RightHandIk,
    ];
}

/// A per-layer filter over humanoid body regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarMask {
    /// Mask name, unique within its controller.
    pub name: String,
    /// Enabled flag per body region.
    pub humanoid: BTreeMap<BodyPart, bool>,
}

impl AvatarMask {
    /// A mask with every body region set to `enabled`.
    pub fn uniform(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            humanoid: BodyPart::ALL.iter().map(|p| (*p, enabled)).collect(),
        }
    }

    /// Regions absent from the map count as enabled.
    pub fn is_active(&self, part: BodyPart) -> bool {
        self.humanoid.get(&part).copied().unwrap_or(true)
    }

    /// Returns true if every humanoid region is disabled.
    pub fn excludes_all_body_parts(&self) -> bool {
        BodyPart::ALL.iter().all(|p| !self.is_active(*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_disabled_excludes_everything() {
        let mask = AvatarMask::uniform("m", false);
        assert_eq!(mask.humanoid.len(), 13);
        assert!(mask.excludes_all_body_parts());
    }

    #[test]
    fn test_missing_region_counts_as_enabled() {
        let mut mask = AvatarMask::uniform("m", false);
        mask.humanoid.remove(&BodyPart::Head);
        assert!(mask.is_active(BodyPart::Head));
        assert!(!mask.excludes_all_body_parts());

        mask.humanoid.insert(BodyPart::Head, false);
        assert!(mask.excludes_all_body_parts());
    }
}
