//! Screen edge detection
//!
//! Decides which edges of a target area a window reaches. Both rectangles
//! must be in Quartz coordinates, where the top edge is `min_y`.

use serde::Serialize;

use super::rect::{Native, Rect};

/// Screen edge identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl ScreenEdge {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenEdge::Left => "left",
            ScreenEdge::Right => "right",
            ScreenEdge::Top => "top",
            ScreenEdge::Bottom => "bottom",
        }
    }
}

/// Per-edge touch flags.
///
/// Field order matches the sorted JSON key order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EdgeTouches {
    pub any: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl EdgeTouches {
    /// Touched edges in left, right, top, bottom order
    pub fn edges(&self) -> impl Iterator<Item = ScreenEdge> + '_ {
        [
            (ScreenEdge::Left, self.left),
            (ScreenEdge::Right, self.right),
            (ScreenEdge::Top, self.top),
            (ScreenEdge::Bottom, self.bottom),
        ]
        .into_iter()
        .filter_map(|(edge, hit)| hit.then_some(edge))
    }
}

/// Test a window against a target area.
///
/// An edge counts as touched when the window reaches within `epsilon` of it
/// or extends past it.
pub fn touches(window: Rect<Native>, target: Rect<Native>, epsilon: f64) -> EdgeTouches {
    let left = window.min_x() <= target.min_x() + epsilon;
    let right = window.max_x() >= target.max_x() - epsilon;
    let top = window.min_y() <= target.min_y() + epsilon;
    let bottom = window.max_y() >= target.max_y() - epsilon;

    EdgeTouches {
        any: left || right || top || bottom,
        bottom,
        left,
        right,
        top,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect<Native> {
        Rect::new(0.0, 0.0, 1920.0, 1080.0)
    }

    #[test]
    fn test_window_in_top_left_corner() {
        let result = touches(Rect::new(0.0, 0.0, 800.0, 600.0), screen(), 1.0);
        assert_eq!(
            result,
            EdgeTouches {
                any: true,
                bottom: false,
                left: true,
                right: false,
                top: true,
            }
        );
        let edges: Vec<_> = result.edges().collect();
        assert_eq!(edges, vec![ScreenEdge::Left, ScreenEdge::Top]);
    }

    #[test]
    fn test_window_well_inside() {
        let result = touches(Rect::new(100.0, 100.0, 800.0, 600.0), screen(), 1.0);
        assert_eq!(result, EdgeTouches::default());
        assert_eq!(result.edges().count(), 0);
    }

    #[test]
    fn test_identical_rect_touches_everywhere() {
        for epsilon in [0.0, 0.5, 1.0, 25.0] {
            let result = touches(screen(), screen(), epsilon);
            assert!(result.left && result.right && result.top && result.bottom);
            assert!(result.any);
        }
    }

    #[test]
    fn test_within_tolerance() {
        // One point away from the right edge, half a point from the bottom
        let window = Rect::new(500.0, 500.0, 1419.0, 579.5);

        let strict = touches(window, screen(), 0.0);
        assert!(!strict.right && !strict.bottom);

        let tolerant = touches(window, screen(), 1.0);
        assert!(tolerant.right && tolerant.bottom);
        assert!(!tolerant.left && !tolerant.top);
    }

    #[test]
    fn test_overhang_counts_as_touch() {
        let result = touches(Rect::new(-50.0, 200.0, 400.0, 1000.0), screen(), 0.0);
        assert!(result.left);
        assert!(result.bottom);
        assert!(!result.right);
        assert!(!result.top);
    }

    #[test]
    fn test_monotonic_in_epsilon() {
        let windows = [
            Rect::new(0.5, 3.0, 100.0, 100.0),
            Rect::new(10.0, 10.0, 1905.0, 1068.0),
            Rect::new(2.0, 2.0, 1916.0, 1076.0),
        ];
        let epsilons = [0.0, 0.5, 1.0, 2.0, 5.0, 20.0];

        for window in windows {
            let mut previous = touches(window, screen(), epsilons[0]);
            for &epsilon in &epsilons[1..] {
                let current = touches(window, screen(), epsilon);
                assert!(!previous.left || current.left);
                assert!(!previous.right || current.right);
                assert!(!previous.top || current.top);
                assert!(!previous.bottom || current.bottom);
                previous = current;
            }
        }
    }

    #[test]
    fn test_margin_larger_than_epsilon_never_touches() {
        let epsilon = 4.0;
        let margin = epsilon + 0.25;
        let window = Rect::new(
            margin,
            margin,
            1920.0 - 2.0 * margin,
            1080.0 - 2.0 * margin,
        );
        assert!(!touches(window, screen(), epsilon).any);
    }
}
