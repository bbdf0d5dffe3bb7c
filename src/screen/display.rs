//! Display registry
//!
//! An ordered snapshot of the attached displays and the lookup that assigns
//! a window to the display it sits on.

use super::rect::{Native, Platform, Rect};
use super::{ScreenError, TargetArea};

/// One attached display, described in both conventions
#[derive(Debug, Clone, PartialEq)]
pub struct Display {
    /// Position in registry (enumeration) order
    pub index: usize,
    /// Window-server display identifier, if the display exposes one
    pub id: Option<u32>,
    /// Full panel in global Quartz coordinates; `None` when `id` is unresolvable
    pub native_bounds: Option<Rect<Native>>,
    /// Full panel in AppKit coordinates
    pub frame: Rect<Platform>,
    /// Usable area (minus menu bar and Dock) in AppKit coordinates
    pub visible_frame: Rect<Platform>,
}

impl Display {
    /// Pick the AppKit rectangle for the given target area
    pub fn target_rect(&self, area: TargetArea) -> Rect<Platform> {
        match area {
            TargetArea::Visible => self.visible_frame,
            TargetArea::Frame => self.frame,
        }
    }
}

/// A display chosen for a window, with its native bounds resolved
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub display: &'a Display,
    pub native_bounds: Rect<Native>,
}

/// Ordered set of displays as enumerated by the environment
#[derive(Debug, Clone, Default)]
pub struct DisplayRegistry {
    displays: Vec<Display>,
    primary: Option<usize>,
}

impl DisplayRegistry {
    /// Build a registry; indices are reassigned to match `displays` order.
    pub fn new(mut displays: Vec<Display>, primary: Option<usize>) -> Self {
        for (index, display) in displays.iter_mut().enumerate() {
            display.index = index;
        }
        let primary = primary.filter(|&idx| idx < displays.len());
        Self { displays, primary }
    }

    pub fn displays(&self) -> &[Display] {
        &self.displays
    }

    pub fn len(&self) -> usize {
        self.displays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displays.is_empty()
    }

    /// The designated fallback display
    pub fn primary(&self) -> Option<&Display> {
        self.primary.and_then(|idx| self.displays.get(idx))
    }

    /// Find the display owning a window.
    ///
    /// The window's center is tested against each display's native bounds in
    /// registry order; containment is inclusive and the first match wins, so
    /// a center lying exactly on a boundary shared by two displays resolves
    /// to the one enumerated first. Displays without native bounds are
    /// skipped. When nothing contains the center (offscreen, mid-drag) the
    /// primary display is returned instead.
    pub fn locate(&self, window: Rect<Native>) -> Result<Placement<'_>, ScreenError> {
        let center = window.center();

        let hit = self.displays.iter().find_map(|display| {
            display
                .native_bounds
                .filter(|bounds| bounds.contains(center))
                .map(|native_bounds| Placement {
                    display,
                    native_bounds,
                })
        });
        if let Some(placement) = hit {
            return Ok(placement);
        }

        let primary = self.primary().ok_or(ScreenError::NoDisplay)?;
        let native_bounds = primary.native_bounds.ok_or(ScreenError::NoDisplay)?;
        tracing::debug!(
            "window center ({}, {}) is outside every display, using primary display {}",
            center.x,
            center.y,
            primary.index
        );
        Ok(Placement {
            display: primary,
            native_bounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(native: Option<(f64, f64)>, frame: (f64, f64)) -> Display {
        Display {
            index: 0,
            id: native.map(|_| 1),
            native_bounds: native.map(|(x, y)| Rect::new(x, y, 1920.0, 1080.0)),
            frame: Rect::new(frame.0, frame.1, 1920.0, 1080.0),
            visible_frame: Rect::new(frame.0, frame.1, 1920.0, 1055.0),
        }
    }

    fn side_by_side() -> DisplayRegistry {
        DisplayRegistry::new(
            vec![
                display(Some((0.0, 0.0)), (0.0, 0.0)),
                display(Some((1920.0, 0.0)), (1920.0, 0.0)),
            ],
            Some(0),
        )
    }

    #[test]
    fn test_indices_follow_order() {
        let registry = side_by_side();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.displays()[1].index, 1);
    }

    #[test]
    fn test_locate_secondary_display() {
        let registry = side_by_side();
        // Center at x = 2000
        let window = Rect::new(1800.0, 100.0, 400.0, 300.0);

        let placement = registry.locate(window).unwrap();
        assert_eq!(placement.display.index, 1);
        assert_eq!(placement.native_bounds.x, 1920.0);
    }

    #[test]
    fn test_shared_boundary_picks_first_display() {
        let registry = side_by_side();
        // Center exactly on x = 1920
        let window = Rect::new(1820.0, 100.0, 200.0, 200.0);

        let placement = registry.locate(window).unwrap();
        assert_eq!(placement.display.index, 0);
    }

    #[test]
    fn test_offscreen_falls_back_to_primary() {
        let registry = DisplayRegistry::new(
            vec![
                display(Some((-1920.0, 0.0)), (-1920.0, 0.0)),
                display(Some((0.0, 0.0)), (0.0, 0.0)),
            ],
            Some(1),
        );
        let window = Rect::new(10_000.0, 10_000.0, 100.0, 100.0);

        for _ in 0..3 {
            let placement = registry.locate(window).unwrap();
            assert_eq!(placement.display.index, 1);
        }
    }

    #[test]
    fn test_display_without_id_is_skipped() {
        let registry = DisplayRegistry::new(
            vec![
                display(None, (0.0, 0.0)),
                display(Some((0.0, 0.0)), (0.0, 0.0)),
            ],
            Some(0),
        );
        let window = Rect::new(100.0, 100.0, 200.0, 200.0);

        let placement = registry.locate(window).unwrap();
        assert_eq!(placement.display.index, 1);
    }

    #[test]
    fn test_no_display_when_primary_unresolvable() {
        let registry = DisplayRegistry::new(vec![display(None, (0.0, 0.0))], Some(0));
        let window = Rect::new(100.0, 100.0, 200.0, 200.0);
        assert!(matches!(registry.locate(window), Err(ScreenError::NoDisplay)));

        let empty = DisplayRegistry::default();
        assert!(matches!(empty.locate(window), Err(ScreenError::NoDisplay)));
    }
}
