//! Iterative fixed-radius vertex clustering.
//!
//! Single-link clustering alone is not enough: representatives sit at the
//! renormalized mean of their member sites, so merging two clusters moves
//! both representatives and can pull a previously-separated vertex inside
//! the merge radius. The loop therefore re-indexes the representatives and
//! repeats until no two of them are within the radius. Each productive pass
//! strictly reduces the number of clusters, so the iteration terminates.

use super::edge_store::{EdgeStore, VertexId};
use super::point_index::PointIndex;
use super::union_find::UnionFind;
use crate::types::UnitVec3;
use glam::DVec3;
use rustc_hash::FxHashMap;

/// Cluster all vertices in use within `radius` and return the map from
/// vertex id to its cluster representative position.
///
/// Singleton clusters keep their original position bit-for-bit; merged
/// clusters take the unit-normalized mean of their member sites.
pub(crate) fn cluster_vertices(
    store: &EdgeStore,
    radius: f64,
) -> FxHashMap<VertexId, UnitVec3> {
    let sites = store.vertex_ids_in_use();
    let n = sites.len();
    let site_pos: Vec<DVec3> = sites.iter().map(|&id| store.dposition(id)).collect();

    let mut uf = UnionFind::new(n);
    let mut rounds = 0usize;

    let (roots, reps) = loop {
        // Gather current clusters: member sums and sizes per root.
        let mut root_slot: FxHashMap<u32, usize> = FxHashMap::default();
        let mut roots: Vec<u32> = Vec::new();
        let mut sums: Vec<DVec3> = Vec::new();
        let mut sizes: Vec<usize> = Vec::new();
        for i in 0..n as u32 {
            let root = uf.find(i);
            let slot = *root_slot.entry(root).or_insert_with(|| {
                roots.push(root);
                sums.push(DVec3::ZERO);
                sizes.push(0);
                roots.len() - 1
            });
            sums[slot] += site_pos[i as usize];
            sizes[slot] += 1;
        }

        let reps: Vec<DVec3> = roots
            .iter()
            .enumerate()
            .map(|(slot, &root)| {
                if sizes[slot] == 1 {
                    site_pos[root as usize]
                } else if sums[slot].length_squared() > 1e-18 {
                    sums[slot].normalize()
                } else {
                    // Members cancel out (antipodal sites); fall back to the
                    // root's own position.
                    site_pos[root as usize]
                }
            })
            .collect();

        let mut index = PointIndex::new(radius);
        for (slot, &rep) in reps.iter().enumerate() {
            index.insert(slot as u32, rep);
        }

        let mut nearby = Vec::new();
        let mut changed = false;
        for slot in 0..reps.len() {
            index.within(reps[slot], &mut nearby);
            for &other in &nearby {
                let other = other as usize;
                if other == slot || !uf.union_min(roots[slot], roots[other]) {
                    continue;
                }
                changed = true;
                // Retire the absorbed representative so later queries in
                // this round do not hand it back.
                let loser = if roots[slot] < roots[other] { other } else { slot };
                index.remove(loser as u32, reps[loser]);
            }
        }

        if !changed {
            break (roots, reps);
        }
        rounds += 1;
    };

    if rounds > 0 {
        log::debug!(
            "vertex clustering converged after {} extra rounds ({} sites -> {} clusters)",
            rounds,
            n,
            roots.len()
        );
    }

    let mut slot_of_root: FxHashMap<u32, usize> = FxHashMap::default();
    for (slot, &root) in roots.iter().enumerate() {
        slot_of_root.insert(root, slot);
    }

    let mut map = FxHashMap::default();
    for (i, &id) in sites.iter().enumerate() {
        let slot = slot_of_root[&uf.find(i as u32)];
        map.insert(id, UnitVec3::from_dvec3(reps[slot]));
    }
    map
}
