//! Geometry value types
//!
//! Immutable coordinate data shared by the filter model and the feature
//! store. Construction never fails; validity concerns (minimum vertex
//! counts) are handled by the WKT reader and the GeoJSON loader.

use serde::{Deserialize, Serialize};

/// A single planar coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate
    pub fn distance(&self, other: &Coord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box enclosing a set of coordinates
    pub fn of(coords: &[Coord]) -> Self {
        let mut bbox = Self::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for c in coords {
            bbox.expand(c);
        }
        bbox
    }

    fn expand(&mut self, c: &Coord) {
        self.min_x = self.min_x.min(c.x);
        self.min_y = self.min_y.min(c.y);
        self.max_x = self.max_x.max(c.x);
        self.max_y = self.max_y.max(c.y);
    }

    /// Merge with another box
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// True if the boxes share any point (boundary contact counts)
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// True if `other` lies entirely inside this box
    pub fn covers(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }

    /// True if the coordinate lies inside or on the boundary
    pub fn contains_coord(&self, c: &Coord) -> bool {
        c.x >= self.min_x && c.x <= self.max_x && c.y >= self.min_y && c.y <= self.max_y
    }

    /// The box outline as a closed ring (counter-clockwise)
    pub fn ring(&self) -> Vec<Coord> {
        vec![
            Coord::new(self.min_x, self.min_y),
            Coord::new(self.max_x, self.min_y),
            Coord::new(self.max_x, self.max_y),
            Coord::new(self.min_x, self.max_y),
            Coord::new(self.min_x, self.min_y),
        ]
    }
}

/// A planar geometry value
///
/// Polygon rings follow the GeoJSON convention: the exterior ring comes
/// first, holes after, each ring closed (first coordinate repeated last).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Coord),
    MultiPoint(Vec<Coord>),
    LineString(Vec<Coord>),
    Polygon {
        exterior: Vec<Coord>,
        holes: Vec<Vec<Coord>>,
    },
    Envelope(BoundingBox),
}

impl Geometry {
    /// Convenience point constructor
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Coord::new(x, y))
    }

    /// The smallest axis-aligned box enclosing this geometry
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Geometry::Point(c) => BoundingBox::new(c.x, c.y, c.x, c.y),
            Geometry::MultiPoint(cs) | Geometry::LineString(cs) => BoundingBox::of(cs),
            Geometry::Polygon { exterior, .. } => BoundingBox::of(exterior),
            Geometry::Envelope(b) => *b,
        }
    }

    /// All vertices of this geometry
    pub fn vertices(&self) -> Vec<Coord> {
        match self {
            Geometry::Point(c) => vec![*c],
            Geometry::MultiPoint(cs) | Geometry::LineString(cs) => cs.clone(),
            Geometry::Polygon { exterior, holes } => {
                let mut out = exterior.clone();
                for hole in holes {
                    out.extend_from_slice(hole);
                }
                out
            }
            Geometry::Envelope(b) => b.ring(),
        }
    }

    /// All line segments of this geometry (empty for point data)
    pub fn segments(&self) -> Vec<(Coord, Coord)> {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Vec::new(),
            Geometry::LineString(cs) => ring_segments(cs),
            Geometry::Polygon { exterior, holes } => {
                let mut segs = ring_segments(exterior);
                for hole in holes {
                    segs.extend(ring_segments(hole));
                }
                segs
            }
            Geometry::Envelope(b) => ring_segments(&b.ring()),
        }
    }

    /// Polygon interior rings, if this geometry encloses area
    pub fn rings(&self) -> Option<(Vec<Coord>, Vec<Vec<Coord>>)> {
        match self {
            Geometry::Polygon { exterior, holes } => Some((exterior.clone(), holes.clone())),
            Geometry::Envelope(b) => Some((b.ring(), Vec::new())),
            _ => None,
        }
    }

    /// Geometry type name as used in WKT and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "POINT",
            Geometry::MultiPoint(_) => "MULTIPOINT",
            Geometry::LineString(_) => "LINESTRING",
            Geometry::Polygon { .. } => "POLYGON",
            Geometry::Envelope(_) => "ENVELOPE",
        }
    }
}

fn ring_segments(coords: &[Coord]) -> Vec<(Coord, Coord)> {
    coords.windows(2).map(|w| (w[0], w[1])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_of_linestring() {
        let line = Geometry::LineString(vec![Coord::new(108.0, 34.0), Coord::new(108.5, 34.5)]);
        let bbox = line.bounding_box();
        assert_eq!(bbox, BoundingBox::new(108.0, 34.0, 108.5, 34.5));
    }

    #[test]
    fn test_bbox_overlap_and_cover() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        let c = BoundingBox::new(2.0, 2.0, 3.0, 3.0);

        assert!(a.overlaps(&b));
        assert!(!a.covers(&b));
        assert!(a.covers(&c));
        assert!(!c.overlaps(&b));
    }

    #[test]
    fn test_envelope_ring_is_closed() {
        let ring = BoundingBox::new(0.0, 0.0, 1.0, 1.0).ring();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);
    }
}
