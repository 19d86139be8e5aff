//! Fixed-radius queries over geodesic arcs via per-edge bounding caps.
//!
//! Each arc is summarized by a spherical cap around its midpoint whose
//! radius is half the arc length plus the query radius, stored as a cosine
//! so candidate filtering is a single dot product. Callers still run an
//! exact distance check on the survivors.

use crate::geodesic;
use glam::DVec3;

struct CapEntry {
    mid: DVec3,
    cos_bound: f64,
}

pub(crate) struct EdgeIndex {
    entries: Vec<CapEntry>,
}

impl EdgeIndex {
    /// Build an index over the given arcs for queries at `radius`.
    pub fn build(arcs: &[(DVec3, DVec3)], radius: f64) -> Self {
        let entries = arcs
            .iter()
            .map(|&(a, b)| {
                let sum = a + b;
                if sum.length_squared() < 1e-24 {
                    // Near-antipodal arc; keep it as an always-candidate.
                    return CapEntry {
                        mid: a,
                        cos_bound: -1.0,
                    };
                }
                let half = geodesic::angle(a, b) / 2.0;
                let bound = (half + radius).min(std::f64::consts::PI);
                CapEntry {
                    mid: sum.normalize(),
                    cos_bound: bound.cos(),
                }
            })
            .collect();
        Self { entries }
    }

    /// Collect indices of arcs whose cap contains `p`; a superset of the
    /// arcs within the query radius.
    pub fn candidates(&self, p: DVec3, out: &mut Vec<usize>) {
        out.clear();
        for (i, entry) in self.entries.iter().enumerate() {
            if p.dot(entry.mid) >= entry.cos_bound {
                out.push(i);
            }
        }
    }
}
