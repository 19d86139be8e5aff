//! Edge splicing: inserting vertices into edges that pass close by.

use super::edge_index::EdgeIndex;
use super::edge_store::EdgeStore;
use crate::geodesic;
use glam::DVec3;

// Splicing is guaranteed to settle when the splice fraction is within its
// documented bounds; the cap only guards against tolerance combinations that
// violate those guarantees.
const MAX_PASSES: usize = 64;

/// Split every edge that passes within `radius` of a non-incident vertex,
/// running to a fixed point.
///
/// Each pass works against a snapshot of the edge set: sub-edges created by
/// a split are re-examined on the next pass. A sub-arc is never closer to a
/// vertex than the arc it came from, so passes only ever shrink the set of
/// pending splices.
pub(crate) fn splice_edges(store: &mut EdgeStore, radius: f64, xor: bool) {
    let mut total_splits = 0usize;
    for _ in 0..MAX_PASSES {
        let vertices = store.vertex_ids_in_use();
        let snapshot = store.edges();
        let arcs: Vec<(DVec3, DVec3)> = snapshot
            .iter()
            .map(|&(a, b)| (store.dposition(a), store.dposition(b)))
            .collect();
        let index = EdgeIndex::build(&arcs, radius);

        let mut candidates = Vec::new();
        let mut split_any = false;
        for &v in &vertices {
            let p = store.dposition(v);
            index.candidates(p, &mut candidates);
            for &i in &candidates {
                let (a, b) = snapshot[i];
                if a == v || b == v {
                    continue;
                }
                // The snapshot can lag behind splits made earlier this pass.
                if !store.has_edge(a, b) {
                    continue;
                }
                if geodesic::distance_to_edge(p, arcs[i].0, arcs[i].1) <= radius {
                    store.erase(a, b);
                    store.add_directed(a, v, xor);
                    store.add_directed(v, b, xor);
                    split_any = true;
                    total_splits += 1;
                }
            }
        }

        if !split_any {
            if total_splits > 0 {
                log::debug!("spliced {} vertices into nearby edges", total_splits);
            }
            return;
        }
    }
    log::warn!("edge splicing did not reach a fixed point; tolerances may be inconsistent");
}
