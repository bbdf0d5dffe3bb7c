//! AppKit → Quartz rectangle conversion
//!
//! AppKit places the global origin at the bottom-left of the primary screen
//! with Y growing upward; Quartz places it at the top-left with Y growing
//! downward. Rather than flipping around the primary screen's height, the
//! rectangle is made local to its own display and re-anchored on that
//! display's Quartz bounds, which keeps displays stacked above or below the
//! primary correct.

use super::display::Display;
use super::rect::{Native, Platform, Rect};
use super::ScreenError;

/// Convert an AppKit rectangle lying on `display` into Quartz coordinates.
///
/// Fails when the display has no resolvable native bounds.
pub fn to_native(rect: Rect<Platform>, display: &Display) -> Result<Rect<Native>, ScreenError> {
    let bounds = display.native_bounds.ok_or(ScreenError::Conversion {
        display: display.index,
    })?;
    let frame = display.frame;

    // Offset from the display's own AppKit origin (bottom-left)
    let local_x = rect.min_x() - frame.min_x();
    let local_y = rect.min_y() - frame.min_y();

    let x = bounds.min_x() + local_x;
    let y = bounds.min_y() + (frame.height - local_y - rect.height);

    Ok(Rect::new(x, y, rect.width, rect.height))
}
