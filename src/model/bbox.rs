//! Bounding box type in the dataset's on-disk XYWH format.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in XYWH format (x, y, width, height) where
/// `(x, y)` is the top-left corner in pixel coordinates.
///
/// Serialized as a 4-element JSON array `[x, y, w, h]`, matching the
/// annotation file format.
///
/// Note: This type does NOT enforce positive width/height in the
/// constructor, allowing "malformed" boxes to exist in memory. This is
/// intentional - validation should catch and report these issues rather
/// than preventing them from being represented.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYWH {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BBoxXYWH {
    /// Creates a new bounding box from explicit components.
    #[inline]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the area of the bounding box.
    ///
    /// May be zero or negative if the box is malformed.
    #[inline]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Returns true if all components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }

    /// Returns true if width and height are both strictly positive.
    #[inline]
    pub fn has_positive_size(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }

    /// Converts to XYXY format (xmin, ymin, xmax, ymax).
    ///
    /// Convenience for downstream overlay/visualization consumers.
    #[inline]
    pub fn to_xyxy(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

impl std::fmt::Debug for BBoxXYWH {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYWH")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("w", &self.w)
            .field("h", &self.h)
            .finish()
    }
}

impl Default for BBoxXYWH {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

// Wire format is a bare 4-element array, not an object.
impl Serialize for BBoxXYWH {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y, self.w, self.h].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BBoxXYWH {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x, y, w, h] = <[f64; 4]>::deserialize(deserializer)?;
        Ok(BBoxXYWH::new(x, y, w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_area() {
        let bbox = BBoxXYWH::new(10.0, 20.0, 90.0, 60.0);
        assert_eq!(bbox.area(), 5400.0);
    }

    #[test]
    fn test_bbox_positive_size() {
        assert!(BBoxXYWH::new(0.0, 0.0, 5.0, 5.0).has_positive_size());
        assert!(!BBoxXYWH::new(0.0, 0.0, 0.0, 5.0).has_positive_size());
        assert!(!BBoxXYWH::new(0.0, 0.0, 5.0, -1.0).has_positive_size());
    }

    #[test]
    fn test_bbox_finite() {
        assert!(BBoxXYWH::new(1.0, 2.0, 3.0, 4.0).is_finite());
        assert!(!BBoxXYWH::new(f64::NAN, 2.0, 3.0, 4.0).is_finite());
        assert!(!BBoxXYWH::new(1.0, f64::INFINITY, 3.0, 4.0).is_finite());
    }

    #[test]
    fn test_bbox_to_xyxy() {
        let bbox = BBoxXYWH::new(10.0, 20.0, 90.0, 60.0);
        assert_eq!(bbox.to_xyxy(), (10.0, 20.0, 100.0, 80.0));
    }

    #[test]
    fn test_bbox_serde_array_form() {
        let bbox = BBoxXYWH::new(100.0, 200.0, 50.0, 80.0);
        let json = serde_json::to_string(&bbox).expect("serialize bbox");
        assert_eq!(json, "[100.0,200.0,50.0,80.0]");

        let restored: BBoxXYWH = serde_json::from_str(&json).expect("parse bbox");
        assert_eq!(bbox, restored);
    }

    #[test]
    fn test_bbox_rejects_wrong_arity() {
        assert!(serde_json::from_str::<BBoxXYWH>("[1.0, 2.0, 3.0]").is_err());
        assert!(serde_json::from_str::<BBoxXYWH>("[1.0, 2.0, 3.0, 4.0, 5.0]").is_err());
    }
}
