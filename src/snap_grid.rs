//! S2-style hierarchical cube-map cell grid, used for optional vertex
//! snapping.
//!
//! The sphere is projected onto 6 cube faces; each face is subdivided into
//! `2^level x 2^level` cells through the area-equalizing quadratic uv<->st
//! transform. Snapping a point replaces it with the center of the enclosing
//! cell, which bounds its displacement by half the level's maximum cell
//! diagonal.

use glam::DVec3;

/// Deepest cell level in the hierarchy.
pub const MAX_CELL_LEVEL: u8 = 30;

// Maximum cell diagonal at level 0 under the quadratic projection; each
// deeper level halves it.
const MAX_DIAG_DERIV: f64 = 2.438654594434021;

/// Upper bound on the cell diagonal at the given level, in radians.
/// Monotone decreasing in `level`.
#[inline]
pub fn max_diag(level: u8) -> f64 {
    MAX_DIAG_DERIV * (-(level as f64)).exp2()
}

/// Quadratic transform: UV [-1, 1] -> ST [0, 1].
#[inline]
pub(crate) fn uv_to_st(u: f64) -> f64 {
    if u >= 0.0 {
        0.5 * (1.0 + 3.0 * u).sqrt()
    } else {
        1.0 - 0.5 * (1.0 - 3.0 * u).sqrt()
    }
}

/// Inverse transform: ST [0, 1] -> UV [-1, 1].
#[inline]
pub(crate) fn st_to_uv(s: f64) -> f64 {
    if s >= 0.5 {
        (1.0 / 3.0) * (4.0 * s * s - 1.0)
    } else {
        (1.0 / 3.0) * (1.0 - 4.0 * (1.0 - s) * (1.0 - s))
    }
}

/// Map a point on the unit sphere to (face, u, v) with u, v in [-1, 1].
#[inline]
fn point_to_face_uv(p: DVec3) -> (usize, f64, f64) {
    let (x, y, z) = (p.x, p.y, p.z);
    let (ax, ay, az) = (x.abs(), y.abs(), z.abs());

    if ax >= ay && ax >= az {
        // +/-X
        if x >= 0.0 {
            (0, -z / ax, y / ax)
        } else {
            (1, z / ax, y / ax)
        }
    } else if ay >= ax && ay >= az {
        // +/-Y
        if y >= 0.0 {
            (2, x / ay, -z / ay)
        } else {
            (3, x / ay, z / ay)
        }
    } else {
        // +/-Z
        if z >= 0.0 {
            (4, x / az, y / az)
        } else {
            (5, -x / az, y / az)
        }
    }
}

/// Convert (face, u, v) back to a point on the unit sphere.
#[inline]
fn face_uv_to_3d(face: usize, u: f64, v: f64) -> DVec3 {
    let p = match face {
        0 => DVec3::new(1.0, v, -u),
        1 => DVec3::new(-1.0, v, u),
        2 => DVec3::new(u, 1.0, -v),
        3 => DVec3::new(u, -1.0, v),
        4 => DVec3::new(u, v, 1.0),
        5 => DVec3::new(-u, v, -1.0),
        _ => unreachable!(),
    };
    p.normalize()
}

#[inline]
fn discretize(s: f64, cells: u64) -> u64 {
    let i = (s * cells as f64) as i64;
    i.clamp(0, cells as i64 - 1) as u64
}

/// The center of the cell at the given level containing `p`.
pub fn cell_center(p: DVec3, level: u8) -> DVec3 {
    let cells = 1u64 << u32::from(level.min(MAX_CELL_LEVEL));
    let (face, u, v) = point_to_face_uv(p);
    let i = discretize(uv_to_st(u), cells);
    let j = discretize(uv_to_st(v), cells);
    let cu = st_to_uv((i as f64 + 0.5) / cells as f64);
    let cv = st_to_uv((j as f64 + 0.5) / cells as f64);
    face_uv_to_3d(face, cu, cv)
}
