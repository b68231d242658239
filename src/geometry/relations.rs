//! Planar spatial relations
//!
//! Implements the relations the spatial predicates need: intersection,
//! containment and minimum distance. A cheap bounding-box check runs
//! before the exact test, the same two-phase shape spatial indexes use.
//! Boundary contact counts as intersection and as containment.

use super::geom::{Coord, Geometry};

impl Geometry {
    /// True if the two geometries share at least one point
    pub fn intersects(&self, other: &Geometry) -> bool {
        if !self.bounding_box().overlaps(&other.bounding_box()) {
            return false;
        }

        // Any crossing edge pair settles it.
        for (a1, a2) in self.segments() {
            for (b1, b2) in other.segments() {
                if segments_intersect(a1, a2, b1, b2) {
                    return true;
                }
            }
        }

        // No edge crossing: one may still lie inside the other, or the
        // geometries may be pure point data.
        if covers_any_vertex(self, other) || covers_any_vertex(other, self) {
            return true;
        }

        // Point-on-segment and point-on-point contact.
        for v in other.vertices() {
            if self.touches_coord(&v) {
                return true;
            }
        }
        for v in self.vertices() {
            if other.touches_coord(&v) {
                return true;
            }
        }

        false
    }

    /// True if this geometry contains `other` entirely
    ///
    /// Only area geometries (polygons, envelopes) can contain anything
    /// other than an identical point.
    pub fn contains(&self, other: &Geometry) -> bool {
        match self {
            Geometry::Envelope(b) => b.covers(&other.bounding_box()),
            Geometry::Polygon { .. } => {
                if !self.bounding_box().covers(&other.bounding_box()) {
                    return false;
                }
                // Every vertex inside, and no boundary crossing.
                if !other.vertices().iter().all(|v| self.encloses_coord(v)) {
                    return false;
                }
                for (a1, a2) in self.segments() {
                    for (b1, b2) in other.segments() {
                        if segments_cross(a1, a2, b1, b2) {
                            return false;
                        }
                    }
                }
                true
            }
            Geometry::Point(c) => matches!(other, Geometry::Point(o) if o == c),
            _ => false,
        }
    }

    /// Minimum planar distance between the two geometries
    pub fn distance(&self, other: &Geometry) -> f64 {
        if self.intersects(other) {
            return 0.0;
        }

        let mut min = f64::INFINITY;

        let self_segs = self.segments();
        let other_segs = other.segments();

        for v in other.vertices() {
            min = min.min(self.coord_distance(&v, &self_segs));
        }
        for v in self.vertices() {
            min = min.min(other.coord_distance(&v, &other_segs));
        }

        min
    }

    /// True if the coordinate lies inside this geometry or on its boundary
    fn encloses_coord(&self, c: &Coord) -> bool {
        if let Some((exterior, holes)) = self.rings() {
            if on_ring(c, &exterior) {
                return true;
            }
            if !point_in_ring(c, &exterior) {
                return false;
            }
            for hole in &holes {
                if point_in_ring(c, hole) && !on_ring(c, hole) {
                    return false;
                }
            }
            true
        } else {
            false
        }
    }

    /// True if the coordinate lies on this geometry (vertex, edge or interior)
    fn touches_coord(&self, c: &Coord) -> bool {
        match self {
            Geometry::Point(p) => p == c,
            Geometry::MultiPoint(ps) => ps.contains(c),
            Geometry::LineString(_) => self
                .segments()
                .iter()
                .any(|(a, b)| point_on_segment(c, a, b)),
            Geometry::Polygon { .. } | Geometry::Envelope(_) => self.encloses_coord(c),
        }
    }

    /// Distance from a coordinate to this geometry's nearest primitive
    fn coord_distance(&self, c: &Coord, segs: &[(Coord, Coord)]) -> f64 {
        if segs.is_empty() {
            return self
                .vertices()
                .iter()
                .map(|v| v.distance(c))
                .fold(f64::INFINITY, f64::min);
        }
        segs.iter()
            .map(|(a, b)| point_segment_distance(c, a, b))
            .fold(f64::INFINITY, f64::min)
    }
}

/// True if `inner` has a vertex strictly enclosed by area geometry `outer`
fn covers_any_vertex(outer: &Geometry, inner: &Geometry) -> bool {
    if outer.rings().is_none() {
        return false;
    }
    inner.vertices().iter().any(|v| outer.encloses_coord(v))
}

const EPS: f64 = 1e-12;

fn orientation(a: &Coord, b: &Coord, c: &Coord) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn point_on_segment(p: &Coord, a: &Coord, b: &Coord) -> bool {
    if orientation(a, b, p).abs() > EPS * (1.0 + a.distance(b)) {
        return false;
    }
    p.x >= a.x.min(b.x) - EPS
        && p.x <= a.x.max(b.x) + EPS
        && p.y >= a.y.min(b.y) - EPS
        && p.y <= a.y.max(b.y) + EPS
}

/// Segment intersection including endpoint and collinear contact
fn segments_intersect(a1: Coord, a2: Coord, b1: Coord, b2: Coord) -> bool {
    let d1 = orientation(&b1, &b2, &a1);
    let d2 = orientation(&b1, &b2, &a2);
    let d3 = orientation(&a1, &a2, &b1);
    let d4 = orientation(&a1, &a2, &b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    point_on_segment(&a1, &b1, &b2)
        || point_on_segment(&a2, &b1, &b2)
        || point_on_segment(&b1, &a1, &a2)
        || point_on_segment(&b2, &a1, &a2)
}

/// Proper crossing only: shared endpoints and collinear touch do not count
fn segments_cross(a1: Coord, a2: Coord, b1: Coord, b2: Coord) -> bool {
    let d1 = orientation(&b1, &b2, &a1);
    let d2 = orientation(&b1, &b2, &a2);
    let d3 = orientation(&a1, &a2, &b1);
    let d4 = orientation(&a1, &a2, &b2);

    ((d1 > EPS && d2 < -EPS) || (d1 < -EPS && d2 > EPS))
        && ((d3 > EPS && d4 < -EPS) || (d3 < -EPS && d4 > EPS))
}

/// Ray casting; points exactly on the ring are resolved by `on_ring`
fn point_in_ring(p: &Coord, ring: &[Coord]) -> bool {
    let mut inside = false;
    for w in ring.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}

fn on_ring(p: &Coord, ring: &[Coord]) -> bool {
    ring.windows(2)
        .any(|w| point_on_segment(p, &w[0], &w[1]))
}

fn point_segment_distance(p: &Coord, a: &Coord, b: &Coord) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    if len2 <= EPS {
        return p.distance(a);
    }
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len2;
    let t = t.clamp(0.0, 1.0);
    p.distance(&Coord::new(a.x + t * dx, a.y + t * dy))
}
