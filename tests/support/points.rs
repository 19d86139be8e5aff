#![allow(dead_code)]

use glam::DVec3;
use rand::Rng;
use s2_stitch::{geodesic, Loop, PolygonBuilder, UnitVec3};
use std::f64::consts::PI;

pub fn latlng(lat: f64, lng: f64) -> UnitVec3 {
    UnitVec3::from_lat_lng_degrees(lat, lng)
}

/// Parse a "lat:lng, lat:lng, ..." chain in degrees.
pub fn parse_chain(s: &str) -> Vec<UnitVec3> {
    s.split(',')
        .map(|token| {
            let token = token.trim();
            let (lat, lng) = token.split_once(':').expect("vertex must be lat:lng");
            latlng(
                lat.trim().parse().expect("latitude"),
                lng.trim().parse().expect("longitude"),
            )
        })
        .collect()
}

/// A rotation of the sphere, used to exercise different starting edges
/// without changing the input's shape.
pub struct Frame {
    x: DVec3,
    y: DVec3,
    z: DVec3,
}

impl Frame {
    pub fn identity() -> Self {
        Self {
            x: DVec3::X,
            y: DVec3::Y,
            z: DVec3::Z,
        }
    }

    /// A uniformly random right-handed orthonormal frame.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let w: f64 = rng.gen_range(-1.0..1.0);
        let theta: f64 = rng.gen_range(0.0..2.0 * PI);
        let r = (1.0 - w * w).sqrt();
        let z = DVec3::new(r * theta.cos(), r * theta.sin(), w);
        let helper = if z.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
        let x = z.cross(helper).normalize();
        let y = z.cross(x);
        Self { x, y, z }
    }

    pub fn apply(&self, p: UnitVec3) -> UnitVec3 {
        UnitVec3::from_dvec3((self.x * p.x + self.y * p.y + self.z * p.z).normalize())
    }

    pub fn apply_all(&self, points: &[UnitVec3]) -> Vec<UnitVec3> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}

/// Add a chain to the builder as a closed loop or an open polyline.
pub fn add_chain(builder: &mut PolygonBuilder, vertices: &[UnitVec3], closed: bool) {
    if closed {
        builder.add_loop(vertices);
    } else {
        builder.add_polyline(vertices);
    }
}

pub fn angle_between(a: UnitVec3, b: UnitVec3) -> f64 {
    geodesic::angle(a.to_dvec3(), b.to_dvec3())
}

/// True if the loop's boundary matches `expected` up to rotation (and
/// reversal, when permitted) within `tol` radians per vertex.
pub fn boundary_approx_eq(
    lp: &Loop,
    expected: &[UnitVec3],
    tol: f64,
    allow_reversal: bool,
) -> bool {
    let n = lp.num_vertices();
    if n != expected.len() {
        return false;
    }
    let forward: Vec<UnitVec3> = lp.vertices().to_vec();
    let mut reversed = forward.clone();
    reversed.reverse();

    let mut orders: Vec<&[UnitVec3]> = vec![&forward];
    if allow_reversal {
        orders.push(&reversed);
    }
    for order in &orders {
        for offset in 0..n {
            if (0..n).all(|i| angle_between(order[(i + offset) % n], expected[i]) <= tol) {
                return true;
            }
        }
    }
    false
}

/// Match assembled loops against expected boundaries one-to-one.
pub fn loops_match(
    actual: &[Loop],
    expected: &[Vec<UnitVec3>],
    tol: f64,
    allow_reversal: bool,
) -> bool {
    if actual.len() != expected.len() {
        return false;
    }
    let mut used = vec![false; actual.len()];
    for exp in expected {
        let found = actual.iter().enumerate().find(|(i, lp)| {
            !used[*i] && boundary_approx_eq(lp, exp, tol, allow_reversal)
        });
        match found {
            Some((i, _)) => used[i] = true,
            None => return false,
        }
    }
    true
}
