//! Dump records
//!
//! With `--dump`, one JSON object per window is written to stdout (JSONL).
//! Struct fields are declared in key order so every object comes out with
//! sorted keys.

use std::io::Write;

use serde::Serialize;

use crate::screen::{EdgeTouches, Native, Platform, Rect, WindowId};

/// Record for a window that was fully checked
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRecord {
    /// Window bounds (Quartz)
    pub bounds_quartz: Rect<Native>,
    /// Physical display rect (Quartz)
    pub display_bounds_quartz: Rect<Native>,
    pub epsilon: f64,
    /// Raw AppKit screen frame
    pub screen_frame_app_kit: Rect<Platform>,
    pub screen_index: usize,
    /// Target area actually compared against, converted to Quartz
    pub screen_used_quartz: Rect<Native>,
    /// Raw AppKit visible frame
    pub screen_visible_frame_app_kit: Rect<Platform>,
    pub touches: EdgeTouches,
    pub using: &'static str,
    pub window_id: WindowId,
}

/// Record for a window that could not be checked
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds_quartz: Option<Rect<Native>>,
    pub error: &'static str,
    pub window_id: WindowId,
}

/// One line of dump output
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Record {
    Check(CheckRecord),
    Error(ErrorRecord),
}

/// Write a record as a single JSON line and flush it
pub fn write_record<W: Write>(out: &mut W, record: &Record) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    out.write_all(b"\n")?;
    out.flush()
}
