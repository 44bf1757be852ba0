//! Input module - turns raw pointer samples into protocol events

mod canvas;
mod config;
mod feedback;
pub mod normalize;
mod proximity;
mod queue;
mod surface;


pub use canvas::CanvasInput;
pub use config::{Background, CanvasConfig, CanvasTheme, Preference, StrokeColor};
pub use feedback::{FeedbackPath, PathSegment, StrokeFeedback};
pub use normalize::{normalize_axis, normalize_pressure};
pub use proximity::{ProximityInput, ProximityMachine, ProximityState};
pub use queue::{EventQueue, QueueMetrics};
pub use surface::{SurfaceBounds, SurfaceTracker};

use crate::core::errors::CoreError;
use serde::{Deserialize, Serialize};

/// Kind of tool that produced a pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    Unknown,
    Finger,
    Stylus,
    Mouse,
    Eraser,
}

impl ToolType {
    pub fn is_stylus(self) -> bool {
        self == Self::Stylus
    }
}

impl TryFrom<i32> for ToolType {
    type Error = CoreError;

    /// Decode the platform's raw tool-type code.
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Finger),
            2 => Ok(Self::Stylus),
            3 => Ok(Self::Mouse),
            4 => Ok(Self::Eraser),
            other => Err(CoreError::UnknownToolType(other)),
        }
    }
}

/// Masked action shared by every pointer of one hardware batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAction {
    Down,
    Up,
    Move,
    Cancel,
    Outside,
    PointerDown,
    PointerUp,
    HoverMove,
    Scroll,
    HoverEnter,
    HoverExit,
}

impl TryFrom<i32> for PointerAction {
    type Error = CoreError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Down),
            1 => Ok(Self::Up),
            2 => Ok(Self::Move),
            3 => Ok(Self::Cancel),
            4 => Ok(Self::Outside),
            5 => Ok(Self::PointerDown),
            6 => Ok(Self::PointerUp),
            7 => Ok(Self::HoverMove),
            8 => Ok(Self::Scroll),
            9 => Ok(Self::HoverEnter),
            10 => Ok(Self::HoverExit),
            other => Err(CoreError::UnknownAction(other)),
        }
    }
}

/// Raw sample of one pointer inside a hardware batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    /// Platform pointer id
    pub pointer_id: u32,
    /// Tool that produced the sample
    pub tool: ToolType,
    /// X coordinate in surface pixels
    pub x: f32,
    /// Y coordinate in surface pixels
    pub y: f32,
    /// Raw pressure, nominally 0.0 - 1.0 but may exceed 1.0
    pub pressure: f32,
}

impl PointerSample {
    pub fn new(pointer_id: u32, tool: ToolType, x: f32, y: f32, pressure: f32) -> Self {
        Self {
            pointer_id,
            tool,
            x,
            y,
            pressure,
        }
    }

    pub fn stylus(x: f32, y: f32, pressure: f32) -> Self {
        Self::new(0, ToolType::Stylus, x, y, pressure)
    }
}
