//! Environment module - where display and window geometry comes from
//!
//! This module provides:
//! - The `WindowEnvironment` capability trait
//! - A live macOS implementation (Quartz + AppKit)
//! - A layout-file implementation for recorded snapshots and tests

mod layout_file;
mod traits;

#[cfg(target_os = "macos")]
mod macos;

pub use layout_file::{LayoutBuilder, LayoutEnvironment};
pub use traits::*;

#[cfg(target_os = "macos")]
pub use macos::MacOSEnvironment;

use std::path::Path;

/// Open the environment to check windows against.
///
/// A layout file takes precedence; otherwise the live window server is used
/// where one is supported.
pub fn open(layout: Option<&Path>) -> EnvResult<Box<dyn WindowEnvironment>> {
    if let Some(path) = layout {
        return Ok(Box::new(LayoutEnvironment::load(path)?));
    }

    #[cfg(target_os = "macos")]
    return Ok(Box::new(MacOSEnvironment::new()?));

    #[cfg(not(target_os = "macos"))]
    return Err(EnvError::NotSupported);
}
