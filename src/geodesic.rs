//! Geodesic primitives on the unit sphere.
//!
//! Every edge is the shorter great-circle arc between two unit vectors.
//! Angles are in radians throughout; a geodesic distance between two points
//! equals the angle between their direction vectors.

use glam::DVec3;
use std::f64::consts::PI;

/// Squared cross-product length below which two directions are treated as
/// colinear (equal or antipodal).
pub(crate) const DEGENERATE_CROSS_SQ: f64 = 1e-24;

const CROSSING_EPS: f64 = 1e-12;

/// Angle between two unit vectors, in [0, pi].
///
/// The atan2 formulation stays accurate for nearly-parallel and
/// nearly-antipodal inputs, unlike acos of the dot product.
#[inline]
pub fn angle(a: DVec3, b: DVec3) -> f64 {
    a.cross(b).length().atan2(a.dot(b))
}

/// The point a fraction `t` along the geodesic from `a` to `b`, renormalized
/// to unit length.
pub fn interpolate(t: f64, a: DVec3, b: DVec3) -> DVec3 {
    let theta = angle(a, b);
    if theta < 1e-12 {
        // Short arc: linear interpolation is exact to working precision.
        return (a + t * (b - a)).normalize();
    }
    let sin_theta = theta.sin();
    let pa = ((1.0 - t) * theta).sin() / sin_theta;
    let pb = (t * theta).sin() / sin_theta;
    (pa * a + pb * b).normalize()
}

/// Geodesic distance from `p` to the shorter arc between `a` and `b`.
///
/// When the projection of `p` onto the edge's great circle falls inside the
/// arc, this is the distance to the circle; otherwise it is the distance to
/// the nearer endpoint.
pub fn distance_to_edge(p: DVec3, a: DVec3, b: DVec3) -> f64 {
    let n = a.cross(b);
    if n.length_squared() < DEGENERATE_CROSS_SQ {
        return angle(p, a).min(angle(p, b));
    }
    // (n x a) and (b x n) bound the wedge of directions whose closest point
    // lies in the interior of the arc.
    if p.dot(n.cross(a)) >= 0.0 && p.dot(b.cross(n)) >= 0.0 {
        let sin_dist = (p.dot(n) / n.length()).clamp(-1.0, 1.0);
        sin_dist.abs().asin()
    } else {
        angle(p, a).min(angle(p, b))
    }
}

/// True if `p` lies strictly inside the arc `(a, b)` with great-circle
/// normal `n = a x b`, excluding the endpoints.
#[inline]
fn strictly_on_arc(p: DVec3, a: DVec3, b: DVec3, n: DVec3) -> bool {
    p.dot(n.cross(a).normalize()) > CROSSING_EPS && p.dot(b.cross(n).normalize()) > CROSSING_EPS
}

/// Proper-crossing test for the arcs `(a, b)` and `(c, d)`.
///
/// Returns true only when the arcs cross at an interior point of both.
/// Arcs that merely share an endpoint or touch tangentially do not count.
pub fn edges_cross(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> bool {
    let n1 = a.cross(b);
    let n2 = c.cross(d);
    if n1.length_squared() < DEGENERATE_CROSS_SQ || n2.length_squared() < DEGENERATE_CROSS_SQ {
        return false;
    }
    let dir = n1.cross(n2);
    if dir.length_squared() < DEGENERATE_CROSS_SQ {
        // Arcs on the same great circle; overlap is not a proper crossing.
        return false;
    }
    let dir = dir.normalize();
    // The great circles intersect at +/-dir; the arcs cross iff one of the
    // two candidates is interior to both.
    (strictly_on_arc(dir, a, b, n1) && strictly_on_arc(dir, c, d, n2))
        || (strictly_on_arc(-dir, a, b, n1) && strictly_on_arc(-dir, c, d, n2))
}

/// Signed turning angle at `at` for a path arriving from `prev` and leaving
/// toward `next`, in (-pi, pi].
///
/// Zero means the path continues straight; positive values turn left (CCW as
/// seen from outside the sphere). An exact reversal yields pi.
pub fn turn_angle(prev: DVec3, at: DVec3, next: DVec3) -> f64 {
    // Tangent-plane components at `at`.
    let toward_prev = at.cross(prev).cross(at);
    let toward_next = at.cross(next).cross(at);
    if toward_prev.length_squared() < DEGENERATE_CROSS_SQ
        || toward_next.length_squared() < DEGENERATE_CROSS_SQ
    {
        return 0.0;
    }
    let travel = -toward_prev;
    let angle = travel.cross(toward_next).dot(at).atan2(travel.dot(toward_next));
    if angle <= -PI {
        PI
    } else {
        angle
    }
}
