//! Environment trait definitions
//!
//! Defines the narrow interface the geometry checks need from the window
//! server, so they can run against a live desktop or a recorded layout.

use std::path::PathBuf;

use thiserror::Error;

use crate::screen::{DisplayRegistry, Native, Rect, ScreenError, WindowId};

/// Errors that can occur while setting up an environment
#[derive(Error, Debug)]
pub enum EnvError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid layout file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[cfg(target_os = "macos")]
    #[error("Window server unavailable: {0}")]
    Unavailable(String),

    #[cfg(not(target_os = "macos"))]
    #[error("No live window environment on this platform; pass --layout FILE")]
    NotSupported,
}

pub type EnvResult<T> = Result<T, EnvError>;

/// Source of display and window geometry
pub trait WindowEnvironment {
    /// Enumerate attached displays in their natural order
    fn list_displays(&self) -> DisplayRegistry;

    /// Current on-screen bounds of a window, in Quartz coordinates
    fn bounds_of(&self, id: WindowId) -> Result<Rect<Native>, ScreenError>;
}
