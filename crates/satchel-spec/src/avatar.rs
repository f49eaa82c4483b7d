//! Host avatar record that consumes generated inventory assets.

use serde::{Deserialize, Serialize};

/// Playable layer slots on the host avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimLayerType {
    /// Locomotion base layer.
    Base,
    /// Additive base layer.
    Additive,
    /// Hand gesture layer.
    #[default]
    Gesture,
    /// Full-body action layer.
    Action,
    /// Effects layer (non-transform properties).
    Fx,
    /// Sitting override.
    Sitting,
    /// T-pose calibration.
    TPose,
    /// IK pose calibration.
    IkPose,
}

impl AnimLayerType {
    /// Returns the layer type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimLayerType::Base => "base",
            AnimLayerType::Additive => "additive",
            AnimLayerType::Gesture => "gesture",
            AnimLayerType::Action => "action",
            AnimLayerType::Fx => "fx",
            AnimLayerType::Sitting => "sitting",
            AnimLayerType::TPose => "t_pose",
            AnimLayerType::IkPose => "ik_pose",
        }
    }

    /// Returns all layer types.
    pub fn all() -> &'static [AnimLayerType] {
        &[
            AnimLayerType::Base,
            AnimLayerType::Additive,
            AnimLayerType::Gesture,
            AnimLayerType::Action,
            AnimLayerType::Fx,
            AnimLayerType::Sitting,
            AnimLayerType::TPose,
            AnimLayerType::IkPose,
        ]
    }
}

impl std::fmt::Display for AnimLayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AnimLayerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimLayerType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown layer type: {}", s))
    }
}

/// One entry of the host's playable layer list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomAnimLayer {
    /// Which playable slot this entry fills.
    #[serde(rename = "type")]
    pub layer_type: AnimLayerType,
    /// True when the host falls back to its built-in controller.
    #[serde(default)]
    pub is_default: bool,
    /// Asset path of the controller driving this slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animator_controller: Option<String>,
}

impl CustomAnimLayer {
    /// A layer slot still using the host's built-in controller.
    pub fn default_for(layer_type: AnimLayerType) -> Self {
        Self {
            layer_type,
            is_default: true,
            animator_controller: None,
        }
    }

    /// A layer slot driven by the controller at `controller_path`.
    pub fn custom(layer_type: AnimLayerType, controller_path: impl Into<String>) -> Self {
        Self {
            layer_type,
            is_default: false,
            animator_controller: Some(controller_path.into()),
        }
    }
}

/// The wearer's top-level configuration record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AvatarDescriptor {
    /// Asset path of the expressions menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expressions_menu: Option<String>,
    /// Asset path of the expression parameter set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression_parameters: Option<String>,
    /// Playable layer slots, in host order.
    #[serde(default)]
    pub base_animation_layers: Vec<CustomAnimLayer>,
}

impl AvatarDescriptor {
    /// Creates a host with the standard five playable layers, all default.
    pub fn with_default_layers() -> Self {
        Self {
            expressions_menu: None,
            expression_parameters: None,
            base_animation_layers: [
                AnimLayerType::Base,
                AnimLayerType::Additive,
                AnimLayerType::Gesture,
                AnimLayerType::Action,
                AnimLayerType::Fx,
            ]
            .into_iter()
            .map(CustomAnimLayer::default_for)
            .collect(),
        }
    }

    /// Index of the first layer entry of the given type.
    pub fn layer_index(&self, layer_type: AnimLayerType) -> Option<usize> {
        self.base_animation_layers
            .iter()
            .position(|l| l.layer_type == layer_type)
    }

    /// Returns true if some layer entry has the given type.
    pub fn has_layer(&self, layer_type: AnimLayerType) -> bool {
        self.layer_index(layer_type).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_type_round_trip_str() {
        for t in AnimLayerType::all() {
            let parsed: AnimLayerType = t.as_str().parse().unwrap();
            assert_eq!(*t, parsed);
        }
        assert!("hands".parse::<AnimLayerType>().is_err());
    }

    #[test]
    fn test_default_layer_type_is_gesture() {
        assert_eq!(AnimLayerType::default(), AnimLayerType::Gesture);
    }

    #[test]
    fn test_default_layers() {
        let host = AvatarDescriptor::with_default_layers();
        assert_eq!(host.base_animation_layers.len(), 5);
        assert_eq!(host.layer_index(AnimLayerType::Gesture), Some(2));
        assert!(!host.has_layer(AnimLayerType::Sitting));
    }

    #[test]
    fn test_layer_serializes_type_field() {
        let layer = CustomAnimLayer::custom(AnimLayerType::Fx, "a/b.json");
        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["type"], "fx");
        assert_eq!(json["animator_controller"], "a/b.json");
    }
}
