//! Assembled loop and polygon types.

use crate::geodesic;
use crate::types::UnitVec3;
use glam::DVec3;

/// A simple closed loop of vertices on the unit sphere.
///
/// Consecutive vertices (including last back to first) are connected by
/// geodesic edges. The vertex order encodes orientation: a loop whose
/// interior lies to the left of travel is counter-clockwise as seen from
/// outside the sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    vertices: Vec<UnitVec3>,
}

impl Loop {
    /// Create a loop from a vertex cycle. The last vertex connects back to
    /// the first; do not repeat it.
    pub fn new(vertices: Vec<UnitVec3>) -> Self {
        Self { vertices }
    }

    /// Number of vertices (and edges) in the loop.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get a vertex by index.
    #[inline]
    pub fn vertex(&self, i: usize) -> UnitVec3 {
        self.vertices[i]
    }

    /// All vertices in cycle order.
    #[inline]
    pub fn vertices(&self) -> &[UnitVec3] {
        &self.vertices
    }

    #[inline]
    fn dvec(&self, i: usize) -> DVec3 {
        self.vertices[i].to_dvec3()
    }

    /// Sum of the signed turning angles over all vertices.
    ///
    /// Positive for counter-clockwise loops (enclosing less than a
    /// hemisphere), negative for clockwise ones.
    pub fn turning_angle(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let prev = self.dvec((i + n - 1) % n);
            let next = self.dvec((i + 1) % n);
            sum += geodesic::turn_angle(prev, self.dvec(i), next);
        }
        sum
    }

    /// True if the loop winds counter-clockwise as seen from outside.
    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.turning_angle() > 0.0
    }

    /// Reverse the vertex order, flipping the orientation.
    pub fn invert(&mut self) {
        self.vertices.reverse();
    }

    /// Orient the loop counter-clockwise.
    pub fn normalize(&mut self) {
        if !self.is_ccw() {
            self.invert();
        }
    }

    /// True if `p` lies in the loop's interior region (the side containing
    /// the centroid of its vertices).
    ///
    /// Decided by crossing parity along the geodesic from `p` to a reference
    /// point antipodal to the vertex centroid. Points exactly on the
    /// boundary give an arbitrary answer.
    pub fn contains_point(&self, p: UnitVec3) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut centroid = DVec3::ZERO;
        for v in &self.vertices {
            centroid += v.to_dvec3();
        }
        let reference = if centroid.length_squared() > 1e-18 {
            -centroid.normalize()
        } else {
            -self.dvec(0)
        };
        let p = p.to_dvec3();
        let mut crossings = 0usize;
        for i in 0..n {
            let a = self.dvec(i);
            let b = self.dvec((i + 1) % n);
            if geodesic::edges_cross(p, reference, a, b) {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    /// True if `other` lies entirely within this loop's interior.
    ///
    /// Loops whose edges properly cross are never nested. Shared vertices
    /// are tolerated: the probe point skips vertices common to both loops.
    pub fn contains_loop(&self, other: &Loop) -> bool {
        if self.vertices.len() < 3 || other.vertices.len() < 3 {
            return false;
        }
        let n = self.vertices.len();
        let m = other.vertices.len();
        for i in 0..n {
            for j in 0..m {
                if geodesic::edges_cross(
                    self.dvec(i),
                    self.dvec((i + 1) % n),
                    other.dvec(j),
                    other.dvec((j + 1) % m),
                ) {
                    return false;
                }
            }
        }
        let probe = other
            .vertices
            .iter()
            .copied()
            .find(|v| !self.vertices.contains(v))
            .unwrap_or_else(|| {
                UnitVec3::from_dvec3(geodesic::interpolate(0.5, other.dvec(0), other.dvec(1)))
            });
        self.contains_point(probe)
    }
}

/// A set of loops forming a polygon with containment-derived orientation:
/// shells (even nesting depth) wind counter-clockwise, holes (odd depth)
/// wind clockwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    loops: Vec<Loop>,
}

impl Polygon {
    /// Create a polygon from loops whose orientation is already correct.
    pub fn new(loops: Vec<Loop>) -> Self {
        Self { loops }
    }

    /// Build a polygon from freshly assembled loops, fixing the orientation
    /// of each loop according to its containment depth.
    pub(crate) fn from_assembled(mut loops: Vec<Loop>) -> Self {
        let n = loops.len();
        let mut depth = vec![0usize; n];
        for i in 0..n {
            for j in 0..n {
                if i != j && loops[j].contains_loop(&loops[i]) {
                    depth[i] += 1;
                }
            }
        }
        for (lp, &d) in loops.iter_mut().zip(&depth) {
            let want_ccw = d % 2 == 0;
            if lp.is_ccw() != want_ccw {
                lp.invert();
            }
        }
        Self { loops }
    }

    /// Number of loops.
    #[inline]
    pub fn num_loops(&self) -> usize {
        self.loops.len()
    }

    /// Get a loop by index.
    #[inline]
    pub fn loop_at(&self, i: usize) -> &Loop {
        &self.loops[i]
    }

    /// All loops in emission order.
    #[inline]
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latlng(lat: f64, lng: f64) -> UnitVec3 {
        UnitVec3::from_lat_lng_degrees(lat, lng)
    }

    fn square(lo: f64, hi: f64) -> Loop {
        Loop::new(vec![
            latlng(lo, lo),
            latlng(lo, hi),
            latlng(hi, hi),
            latlng(hi, lo),
        ])
    }

    #[test]
    fn test_turning_angle_orientation() {
        let ccw = square(0.0, 10.0);
        assert!(ccw.is_ccw());

        let mut cw = square(0.0, 10.0);
        cw.invert();
        assert!(!cw.is_ccw());
        assert!((ccw.turning_angle() + cw.turning_angle()).abs() < 1e-9);
    }

    #[test]
    fn test_normalize() {
        let mut lp = square(0.0, 10.0);
        lp.invert();
        lp.normalize();
        assert!(lp.is_ccw());
    }

    #[test]
    fn test_contains_point() {
        let lp = square(0.0, 10.0);
        assert!(lp.contains_point(latlng(5.0, 3.0)));
        assert!(lp.contains_point(latlng(3.0, 7.0)));
        assert!(!lp.contains_point(latlng(20.0, 20.0)));
        assert!(!lp.contains_point(latlng(-5.0, 5.0)));
    }

    #[test]
    fn test_contains_loop_nested() {
        let outer = square(0.0, 10.0);
        let inner = square(2.0, 8.0);
        assert!(outer.contains_loop(&inner));
        assert!(!inner.contains_loop(&outer));

        let disjoint = Loop::new(vec![
            latlng(20.0, 20.0),
            latlng(20.0, 30.0),
            latlng(30.0, 25.0),
        ]);
        assert!(!outer.contains_loop(&disjoint));
    }

    #[test]
    fn test_polygon_orients_holes_clockwise() {
        let polygon = Polygon::from_assembled(vec![square(0.0, 10.0), square(2.0, 8.0)]);
        assert_eq!(polygon.num_loops(), 2);
        assert!(polygon.loop_at(0).is_ccw());
        assert!(!polygon.loop_at(1).is_ccw());
    }
}
