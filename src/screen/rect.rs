//! Coordinate-convention-tagged rectangles
//!
//! Window bounds and the multi-display layout come from the window server in
//! a Y-down space ([`Native`], Quartz). Per-screen frames come from the
//! windowing toolkit in a Y-up space ([`Platform`], AppKit). The two are never
//! comparable directly, so every rectangle carries its convention in its type.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

mod sealed {
    pub trait Sealed {}
}

/// Marker trait for a coordinate convention
pub trait Convention: sealed::Sealed + Copy + fmt::Debug + PartialEq {
    /// Short name used in debug output
    const NAME: &'static str;
}

/// Y-down global coordinates (Quartz display space)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Native;

/// Y-up global coordinates (AppKit screen space)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform;

impl sealed::Sealed for Native {}
impl sealed::Sealed for Platform {}

impl Convention for Native {
    const NAME: &'static str = "quartz";
}

impl Convention for Platform {
    const NAME: &'static str = "appkit";
}

/// A point in convention `C`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<C: Convention> {
    pub x: f64,
    pub y: f64,
    _convention: PhantomData<C>,
}

impl<C: Convention> Point<C> {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _convention: PhantomData,
        }
    }
}

/// An axis-aligned rectangle in convention `C`
#[derive(Clone, Copy, PartialEq)]
pub struct Rect<C: Convention> {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    _convention: PhantomData<C>,
}

impl<C: Convention> Rect<C> {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            _convention: PhantomData,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point<C> {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment: points on any edge count as inside
    pub fn contains(&self, point: Point<C>) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }
}

impl<C: Convention> fmt::Debug for Rect<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect<{}>({}, {}, {}x{})",
            C::NAME,
            self.x,
            self.y,
            self.width,
            self.height
        )
    }
}

impl<C: Convention> fmt::Display for Rect<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Wire form shared by the JSON dump and the layout file.
/// Fields are declared in key order so JSON output is sorted.
#[derive(Serialize, Deserialize)]
struct RectRepr {
    h: f64,
    w: f64,
    x: f64,
    y: f64,
}

impl<C: Convention> Serialize for Rect<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RectRepr {
            h: self.height,
            w: self.width,
            x: self.x,
            y: self.y,
        }
        .serialize(serializer)
    }
}

impl<'de, C: Convention> Deserialize<'de> for Rect<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = RectRepr::deserialize(deserializer)?;
        Ok(Rect::new(repr.x, repr.y, repr.w, repr.h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r: Rect<Native> = Rect::new(100.0, 50.0, 800.0, 600.0);
        assert_eq!(r.max_x(), 900.0);
        assert_eq!(r.max_y(), 650.0);

        let c = r.center();
        assert_eq!((c.x, c.y), (500.0, 350.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r: Rect<Native> = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(1920.0, 1080.0)));
        assert!(!r.contains(Point::new(1920.5, 10.0)));
        assert!(!r.contains(Point::new(10.0, -0.5)));
    }

    #[test]
    fn test_json_shape() {
        let r: Rect<Platform> = Rect::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"h":4.0,"w":3.0,"x":1.0,"y":2.0}"#);

        let back: Rect<Platform> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
