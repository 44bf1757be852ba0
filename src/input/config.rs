//! Canvas preferences - stylus filter and background theme

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::errors::CoreError;

/// User preferences the capture core reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasConfig {
    /// Ignore every pointer whose tool is not a stylus
    pub stylus_only: bool,
    /// Dark canvas background for the feedback renderer
    pub dark_canvas: bool,
}

impl CanvasConfig {
    /// Parse a JSON preference snapshot. Missing keys fall back to `false`.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn set(&mut self, preference: Preference, value: bool) {
        match preference {
            Preference::StylusOnly => self.stylus_only = value,
            Preference::DarkCanvas => self.dark_canvas = value,
        }
    }

    pub fn get(&self, preference: Preference) -> bool {
        match preference {
            Preference::StylusOnly => self.stylus_only,
            Preference::DarkCanvas => self.dark_canvas,
        }
    }

    pub fn theme(&self) -> CanvasTheme {
        if self.dark_canvas {
            CanvasTheme {
                background: Background::Black,
                stroke: StrokeColor::White,
            }
        } else {
            CanvasTheme {
                background: Background::GridPattern,
                stroke: StrokeColor::Black,
            }
        }
    }
}

/// Preference keys carried by change notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preference {
    StylusOnly,
    DarkCanvas,
}

impl Preference {
    pub fn key(self) -> &'static str {
        match self {
            Self::StylusOnly => "stylusOnly",
            Self::DarkCanvas => "darkCanvas",
        }
    }
}

impl FromStr for Preference {
    type Err = CoreError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "stylusOnly" => Ok(Self::StylusOnly),
            "darkCanvas" => Ok(Self::DarkCanvas),
            other => Err(CoreError::UnknownPreference(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    Black,
    GridPattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeColor {
    Black,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasTheme {
    pub background: Background,
    pub stroke: StrokeColor,
}
