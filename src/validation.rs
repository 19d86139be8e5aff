//! Structural validation for assembled loops.
//!
//! Assembly guarantees vertex-distinct cycles by construction; these checks
//! catch the geometric failures that survive the walk, chiefly loops whose
//! edges cross (the builder cannot re-intersect crossing input edges).

use crate::geodesic;
use crate::loops::Loop;
use rustc_hash::FxHashSet;

/// Structural findings for a single loop.
#[derive(Debug, Clone, Default)]
pub struct LoopReport {
    /// Number of vertices in the loop.
    pub num_vertices: usize,
    /// Vertices that appear more than once.
    pub duplicate_vertices: usize,
    /// Consecutive vertex pairs that are equal or antipodal.
    pub degenerate_edges: usize,
    /// Pairs of non-adjacent edges that properly cross.
    pub crossing_pairs: usize,
}

impl LoopReport {
    /// True when the loop is simple, non-degenerate, and non-crossing.
    pub fn is_valid(&self) -> bool {
        self.num_vertices >= 3
            && self.duplicate_vertices == 0
            && self.degenerate_edges == 0
            && self.crossing_pairs == 0
    }
}

fn bits(v: crate::UnitVec3) -> [u64; 3] {
    [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()]
}

/// Check a single loop for simplicity, degeneracy, and self-crossings.
pub fn check_loop(lp: &Loop) -> LoopReport {
    let n = lp.num_vertices();
    let mut report = LoopReport {
        num_vertices: n,
        ..LoopReport::default()
    };

    let mut seen = FxHashSet::default();
    for i in 0..n {
        if !seen.insert(bits(lp.vertex(i))) {
            report.duplicate_vertices += 1;
        }
    }

    for i in 0..n {
        let a = lp.vertex(i).to_dvec3();
        let b = lp.vertex((i + 1) % n).to_dvec3();
        if a.cross(b).length_squared() < geodesic::DEGENERATE_CROSS_SQ {
            report.degenerate_edges += 1;
        }
    }

    // Proper crossings among non-adjacent edge pairs. Adjacent edges share a
    // vertex and cannot properly cross.
    for i in 0..n {
        for j in (i + 1)..n {
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let (a, b) = (lp.vertex(i).to_dvec3(), lp.vertex((i + 1) % n).to_dvec3());
            let (c, d) = (lp.vertex(j).to_dvec3(), lp.vertex((j + 1) % n).to_dvec3());
            if geodesic::edges_cross(a, b, c, d) {
                report.crossing_pairs += 1;
            }
        }
    }

    report
}

/// Indices of loops that properly cross some other loop in the slice.
///
/// Used by polygon assembly: crossing loops cannot be nested consistently,
/// so both members of a crossing pair are rejected.
pub fn crossing_loop_indices(loops: &[Loop]) -> FxHashSet<usize> {
    let mut bad = FxHashSet::default();
    for i in 0..loops.len() {
        for j in (i + 1)..loops.len() {
            if loops_cross(&loops[i], &loops[j]) {
                bad.insert(i);
                bad.insert(j);
            }
        }
    }
    bad
}

fn loops_cross(a: &Loop, b: &Loop) -> bool {
    let n = a.num_vertices();
    let m = b.num_vertices();
    for i in 0..n {
        for j in 0..m {
            if geodesic::edges_cross(
                a.vertex(i).to_dvec3(),
                a.vertex((i + 1) % n).to_dvec3(),
                b.vertex(j).to_dvec3(),
                b.vertex((j + 1) % m).to_dvec3(),
            ) {
                return true;
            }
        }
    }
    false
}
