//! Recorded display/window layouts
//!
//! A TOML snapshot of displays and windows that stands in for the live
//! window server. Used by `--layout` and by the tests.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::traits::{EnvError, EnvResult, WindowEnvironment};
use crate::screen::{Display, DisplayRegistry, Native, Platform, Rect, ScreenError, WindowId};

#[derive(Debug, Deserialize)]
struct LayoutFile {
    #[serde(default)]
    primary: usize,
    #[serde(default)]
    displays: Vec<DisplayEntry>,
    #[serde(default)]
    windows: Vec<WindowEntry>,
}

#[derive(Debug, Deserialize)]
struct DisplayEntry {
    id: Option<u32>,
    native: Option<Rect<Native>>,
    frame: Rect<Platform>,
    visible_frame: Option<Rect<Platform>>,
}

#[derive(Debug, Deserialize)]
struct WindowEntry {
    id: WindowId,
    bounds: Rect<Native>,
}

/// Environment backed by a fixed layout
#[derive(Debug, Clone, Default)]
pub struct LayoutEnvironment {
    displays: Vec<Display>,
    primary: Option<usize>,
    windows: HashMap<WindowId, Rect<Native>>,
}

impl LayoutEnvironment {
    /// Load a layout from a TOML file
    pub fn load(path: &Path) -> EnvResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| EnvError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: LayoutFile = toml::from_str(&contents).map_err(|source| EnvError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut builder = LayoutBuilder::new().primary(file.primary);
        for entry in file.displays {
            let visible_frame = entry.visible_frame.unwrap_or(entry.frame);
            builder = match (entry.id, entry.native) {
                (Some(id), Some(native)) => builder.display(id, native, entry.frame, visible_frame),
                _ => builder.unresolved_display(entry.frame, visible_frame),
            };
        }
        for window in file.windows {
            builder = builder.window(window.id, window.bounds);
        }

        let env = builder.build();
        tracing::debug!(
            "loaded layout {}: {} displays, {} windows",
            path.display(),
            env.displays.len(),
            env.windows.len()
        );
        Ok(env)
    }
}

impl WindowEnvironment for LayoutEnvironment {
    fn list_displays(&self) -> DisplayRegistry {
        DisplayRegistry::new(self.displays.clone(), self.primary)
    }

    fn bounds_of(&self, id: WindowId) -> Result<Rect<Native>, ScreenError> {
        self.windows.get(&id).copied().ok_or(ScreenError::NotFound(id))
    }
}

/// Builder for layouts
pub struct LayoutBuilder {
    env: LayoutEnvironment,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self {
            env: LayoutEnvironment {
                primary: Some(0),
                ..Default::default()
            },
        }
    }

    /// Index of the fallback display
    pub fn primary(mut self, index: usize) -> Self {
        self.env.primary = Some(index);
        self
    }

    /// Add a display with a resolvable identifier
    pub fn display(
        mut self,
        id: u32,
        native: Rect<Native>,
        frame: Rect<Platform>,
        visible_frame: Rect<Platform>,
    ) -> Self {
        let index = self.env.displays.len();
        self.env.displays.push(Display {
            index,
            id: Some(id),
            native_bounds: Some(native),
            frame,
            visible_frame,
        });
        self
    }

    /// Add a display that cannot be correlated to native bounds
    pub fn unresolved_display(mut self, frame: Rect<Platform>, visible_frame: Rect<Platform>) -> Self {
        let index = self.env.displays.len();
        self.env.displays.push(Display {
            index,
            id: None,
            native_bounds: None,
            frame,
            visible_frame,
        });
        self
    }

    /// Add an on-screen window
    pub fn window(mut self, id: WindowId, bounds: Rect<Native>) -> Self {
        self.env.windows.insert(id, bounds);
        self
    }

    pub fn build(self) -> LayoutEnvironment {
        self.env
    }
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}
