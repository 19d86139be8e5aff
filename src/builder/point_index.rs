//! Fixed-radius point queries via a hash grid over the embedding cube.
//!
//! Points on the unit sphere are binned into axis-aligned cubes whose side
//! equals the chord length of the query radius, so every pair within the
//! radius lands in the same or an adjacent cell. Queries scan the 3x3x3
//! neighborhood and do an exact chord-distance check.

use glam::DVec3;
use rustc_hash::FxHashMap;

// Floor on the cell size so cell coordinates stay well inside i32 range for
// arbitrarily small radii; a cell larger than the radius only adds candidates.
const MIN_CELL_SIZE: f64 = 1e-6;

#[inline]
fn chord(angle: f64) -> f64 {
    2.0 * (angle.min(std::f64::consts::PI) / 2.0).sin()
}

pub(crate) struct PointIndex {
    inv_cell: f64,
    chord_sq: f64,
    cells: FxHashMap<(i32, i32, i32), Vec<(u32, DVec3)>>,
}

impl PointIndex {
    pub fn new(radius: f64) -> Self {
        let chord = chord(radius);
        Self {
            inv_cell: 1.0 / chord.max(MIN_CELL_SIZE),
            chord_sq: chord * chord,
            cells: FxHashMap::default(),
        }
    }

    #[inline]
    fn key(&self, p: DVec3) -> (i32, i32, i32) {
        (
            (p.x * self.inv_cell).floor() as i32,
            (p.y * self.inv_cell).floor() as i32,
            (p.z * self.inv_cell).floor() as i32,
        )
    }

    pub fn insert(&mut self, id: u32, p: DVec3) {
        self.cells.entry(self.key(p)).or_default().push((id, p));
    }

    pub fn remove(&mut self, id: u32, p: DVec3) {
        if let Some(bucket) = self.cells.get_mut(&self.key(p)) {
            if let Some(i) = bucket.iter().position(|&(other, _)| other == id) {
                bucket.swap_remove(i);
            }
        }
    }

    /// Collect the ids of all points within the query radius of `p`
    /// (inclusive), including `p` itself when indexed.
    pub fn within(&self, p: DVec3, out: &mut Vec<u32>) {
        out.clear();
        let (cx, cy, cz) = self.key(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &(id, q) in bucket {
                        if (q - p).length_squared() <= self.chord_sq {
                            out.push(id);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnitVec3;

    fn latlng(lat: f64, lng: f64) -> DVec3 {
        UnitVec3::from_lat_lng_degrees(lat, lng).to_dvec3()
    }

    #[test]
    fn test_within_radius() {
        let radius = 2.0f64.to_radians();
        let mut index = PointIndex::new(radius);
        index.insert(0, latlng(0.0, 0.0));
        index.insert(1, latlng(0.0, 1.5));
        index.insert(2, latlng(0.0, 3.0));
        index.insert(3, latlng(45.0, 90.0));

        let mut out = Vec::new();
        index.within(latlng(0.0, 0.0), &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![0, 1]);

        index.remove(1, latlng(0.0, 1.5));
        index.within(latlng(0.0, 0.0), &mut out);
        assert_eq!(out, vec![0]);
    }
}
