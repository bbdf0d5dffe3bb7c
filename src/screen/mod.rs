//! Screen geometry module
//!
//! Handles:
//! - Typed rectangles for the Quartz and AppKit coordinate conventions
//! - The display registry and window-to-display assignment
//! - AppKit → Quartz conversion of screen frames
//! - Edge-touch detection

mod convert;
mod display;
mod edge_detector;
mod rect;

pub use convert::to_native;
pub use display::{Display, DisplayRegistry};
pub use edge_detector::{touches, EdgeTouches};
pub use rect::{Native, Platform, Rect};

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Window-server window number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which screen rectangle a window is checked against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetArea {
    /// Usable area, excluding menu bar and Dock
    #[default]
    Visible,
    /// Full display
    Frame,
}

impl TargetArea {
    /// Name reported in the `using` field of dump records
    pub fn label(&self) -> &'static str {
        match self {
            TargetArea::Visible => "visibleFrame",
            TargetArea::Frame => "frame",
        }
    }
}

/// Per-window geometry failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScreenError {
    #[error("could not find bounds for window {0}")]
    NotFound(WindowId),

    #[error("could not determine screen")]
    NoDisplay,

    #[error("display {display} has no resolvable quartz bounds")]
    Conversion { display: usize },
}

impl ScreenError {
    /// Stable code used in dump records
    pub fn code(&self) -> &'static str {
        match self {
            ScreenError::NotFound(_) => "bounds_not_found",
            ScreenError::NoDisplay => "screen_not_found",
            ScreenError::Conversion { .. } => "screen_rect_convert_failed",
        }
    }
}
