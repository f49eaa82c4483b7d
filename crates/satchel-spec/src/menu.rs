//! Expressions menu documents.

use serde::{Deserialize, Serialize};

/// Number of controls one host menu page displays.
pub const MENU_CONTROL_LIMIT: usize = 8;

/// Kind of menu control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlType {
    /// Sets the parameter while held.
    Button,
    /// Latches the parameter to `value` until selected again.
    Toggle,
    /// Opens a nested menu.
    SubMenu,
    /// Two-axis joystick.
    TwoAxisPuppet,
    /// Four-axis joystick.
    FourAxisPuppet,
    /// Radial dial.
    RadialPuppet,
}

/// One entry of an expressions menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuControl {
    /// Display name.
    pub name: String,
    /// Opaque icon reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Control kind.
    #[serde(rename = "type")]
    pub control_type: ControlType,
    /// Name of the parameter the control drives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Value written to the parameter when triggered.
    #[serde(default)]
    pub value: f32,
}

impl MenuControl {
    /// Creates a toggle bound to `parameter` that writes 1 when on.
    pub fn toggle(
        name: impl Into<String>,
        icon: Option<String>,
        parameter: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            icon,
            control_type: ControlType::Toggle,
            parameter: Some(parameter.into()),
            value: 1.0,
        }
    }
}

/// An ordered menu document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpressionsMenu {
    /// Controls in display order.
    #[serde(default)]
    pub controls: Vec<MenuControl>,
}

impl ExpressionsMenu {
    /// Creates an empty menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the menu spills past one page.
    pub fn overflows_page(&self) -> bool {
        self.controls.len() > MENU_CONTROL_LIMIT
    }
}
