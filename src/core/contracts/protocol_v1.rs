use serde::{Deserialize, Serialize};

/// Button id of the synthetic proximity marker (pen entering/leaving range).
pub const PROXIMITY_BUTTON: i32 = -1;
/// Button id of the primary contact (pen tip touching the surface).
pub const PRIMARY_BUTTON: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Motion,
    Button,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonTransition {
    pub button_id: i32,
    pub pressed: bool,
}

/// One protocol event as handed to the transport.
///
/// Coordinates span the full `i16` range and may have wrapped (see
/// [`crate::input::normalize::normalize_axis`]); the transport sends the bit
/// pattern as-is. Motion events never carry a button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolEvent {
    pub x: i16,
    pub y: i16,
    pub pressure: i16,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    button: Option<ButtonTransition>,
}

impl ProtocolEvent {
    pub fn motion(x: i16, y: i16, pressure: i16) -> Self {
        Self {
            x,
            y,
            pressure,
            button: None,
        }
    }

    pub fn button(x: i16, y: i16, pressure: i16, button_id: i32, pressed: bool) -> Self {
        Self {
            x,
            y,
            pressure,
            button: Some(ButtonTransition { button_id, pressed }),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self.button {
            Some(_) => EventKind::Button,
            None => EventKind::Motion,
        }
    }

    pub fn transition(&self) -> Option<ButtonTransition> {
        self.button
    }

    pub fn button_id(&self) -> Option<i32> {
        self.button.map(|b| b.button_id)
    }

    pub fn pressed(&self) -> Option<bool> {
        self.button.map(|b| b.pressed)
    }

    /// True for the synthetic enter/leave markers around a contact or hover.
    pub fn is_proximity_marker(&self) -> bool {
        self.button_id() == Some(PROXIMITY_BUTTON)
    }
}
