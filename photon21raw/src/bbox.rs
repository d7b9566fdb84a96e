//!
//! # Rectangular Bounding Boxes and Associated Trait
//!

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::{
    geom::{Path, Point, Polygon, Rect, Shape},
    Int,
};

/// # Rectangular Bounding Box
///
/// Points `p0` and `p1` represent opposite corners of a bounding rectangle.
/// `p0` is always closest to negative-infinity, in both x and y,
/// and `p1` is always closest to positive-infinity.
///
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BoundBox {
    pub p0: Point,
    pub p1: Point,
}
impl BoundBox {
    /// Create an empty, otherwise invalid [BoundBox]
    pub fn empty() -> Self {
        Self {
            p0: Point::new(Int::MAX, Int::MAX),
            p1: Point::new(Int::MIN, Int::MIN),
        }
    }
    /// Boolean indication of whether a box is empty
    pub fn is_empty(&self) -> bool {
        self.p0.x > self.p1.x || self.p0.y > self.p1.y
    }
    /// Boolean indication of whether [Point] `pt` lies inside out box.
    pub fn contains(&self, pt: &Point) -> bool {
        self.p0.x <= pt.x && self.p1.x >= pt.x && self.p0.y <= pt.y && self.p1.y >= pt.y
    }
    /// Get the box's size as an (x,y) tuple
    pub fn size(&self) -> (Int, Int) {
        (self.p1.x - self.p0.x, self.p1.y - self.p0.y)
    }
}

///
/// # Bounding Box Trait
///
/// Methods for interacting with [BoundBox]s.
///
pub trait BoundBoxTrait {
    /// Compute a rectangular bounding box around the implementing type.
    fn bbox(&self) -> BoundBox;
    /// Compute the union with rectangular bounding box `bbox`.
    /// Creates and returns a new [BoundBox].
    fn union(&self, bbox: &BoundBox) -> BoundBox {
        let own = self.bbox();
        if own.is_empty() {
            return bbox.clone();
        }
        if bbox.is_empty() {
            return own;
        }
        BoundBox {
            p0: Point::new(own.p0.x.min(bbox.p0.x), own.p0.y.min(bbox.p0.y)),
            p1: Point::new(own.p1.x.max(bbox.p1.x), own.p1.y.max(bbox.p1.y)),
        }
    }
}
impl BoundBoxTrait for BoundBox {
    fn bbox(&self) -> BoundBox {
        self.clone()
    }
}
impl BoundBoxTrait for Point {
    fn bbox(&self) -> BoundBox {
        BoundBox {
            p0: *self,
            p1: *self,
        }
    }
}
impl BoundBoxTrait for [Point] {
    fn bbox(&self) -> BoundBox {
        let mut bbox = BoundBox::empty();
        for pt in self {
            bbox = pt.union(&bbox);
        }
        bbox
    }
}
impl BoundBoxTrait for Vec<Point> {
    fn bbox(&self) -> BoundBox {
        self.as_slice().bbox()
    }
}
impl BoundBoxTrait for Rect {
    fn bbox(&self) -> BoundBox {
        let (p0, p1) = (self.p0, self.p1);
        BoundBox {
            p0: Point::new(p0.x.min(p1.x), p0.y.min(p1.y)),
            p1: Point::new(p0.x.max(p1.x), p0.y.max(p1.y)),
        }
    }
}
impl BoundBoxTrait for Polygon {
    /// Holes lie inside the outer boundary, and do not contribute.
    fn bbox(&self) -> BoundBox {
        self.points.bbox()
    }
}
impl BoundBoxTrait for Path {
    fn bbox(&self) -> BoundBox {
        let mut bbox = self.points.bbox();
        if !bbox.is_empty() {
            let half = (self.width / 2) as Int;
            bbox.p0 = Point::new(bbox.p0.x - half, bbox.p0.y - half);
            bbox.p1 = Point::new(bbox.p1.x + half, bbox.p1.y + half);
        }
        bbox
    }
}
impl BoundBoxTrait for Shape {
    fn bbox(&self) -> BoundBox {
        match self {
            Shape::Rect(r) => r.bbox(),
            Shape::Polygon(p) => p.bbox(),
            Shape::Path(p) => p.bbox(),
        }
    }
}
