//! Directed edge multiset with interned vertices.
//!
//! Vertices are interned to dense ids by exact bit pattern, so identity
//! comparisons after snapping and clustering are integer comparisons.
//! Sources enumerate in first-insertion order, which makes the assembly
//! walk reproducible for a given input order.

use crate::types::UnitVec3;
use glam::DVec3;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

pub(crate) type VertexId = u32;

#[derive(Default)]
pub(crate) struct EdgeStore {
    positions: Vec<UnitVec3>,
    ids: FxHashMap<[u64; 3], VertexId>,
    by_source: FxHashMap<VertexId, Vec<VertexId>>,
    /// Source ids in the order they first appeared as a source.
    sources: Vec<VertexId>,
    num_edges: usize,
}

impl EdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a vertex position, returning its dense id. Positions that are
    /// bit-identical share an id.
    pub fn intern(&mut self, p: UnitVec3) -> VertexId {
        let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
        match self.ids.entry(key) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let id = self.positions.len() as VertexId;
                self.positions.push(p);
                e.insert(id);
                id
            }
        }
    }

    #[inline]
    pub fn position(&self, id: VertexId) -> UnitVec3 {
        self.positions[id as usize]
    }

    #[inline]
    pub fn dposition(&self, id: VertexId) -> DVec3 {
        self.positions[id as usize].to_dvec3()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_edges == 0
    }

    pub fn has_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.by_source
            .get(&a)
            .is_some_and(|dsts| dsts.contains(&b))
    }

    /// Add one directed edge. Under XOR semantics, a matching edge in the
    /// opposite direction is cancelled instead. Edges whose endpoints share
    /// an id (collapsed by snapping or merging) are dropped.
    pub fn add_directed(&mut self, a: VertexId, b: VertexId, xor: bool) {
        if a == b {
            return;
        }
        if xor && self.erase(b, a) {
            return;
        }
        match self.by_source.entry(a) {
            Entry::Occupied(mut e) => e.get_mut().push(b),
            Entry::Vacant(e) => {
                e.insert(vec![b]);
                self.sources.push(a);
            }
        }
        self.num_edges += 1;
    }

    /// Remove one occurrence of the directed edge `(a, b)`.
    /// Returns `true` if an edge was removed.
    pub fn erase(&mut self, a: VertexId, b: VertexId) -> bool {
        let Some(dsts) = self.by_source.get_mut(&a) else {
            return false;
        };
        let Some(i) = dsts.iter().position(|&d| d == b) else {
            return false;
        };
        // Plain remove keeps the remaining destinations in insertion order.
        dsts.remove(i);
        self.num_edges -= 1;
        true
    }

    /// Destinations reachable from `a`, in insertion order.
    pub fn outgoing(&self, a: VertexId) -> &[VertexId] {
        self.by_source.get(&a).map_or(&[], |dsts| dsts.as_slice())
    }

    /// All directed edges in deterministic enumeration order.
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut out = Vec::with_capacity(self.num_edges);
        for &src in &self.sources {
            for &dst in self.outgoing(src) {
                out.push((src, dst));
            }
        }
        out
    }

    /// Ids of vertices incident to at least one edge, ascending.
    pub fn vertex_ids_in_use(&self) -> Vec<VertexId> {
        let mut used = vec![false; self.positions.len()];
        for (&src, dsts) in &self.by_source {
            if !dsts.is_empty() {
                used[src as usize] = true;
                for &dst in dsts {
                    used[dst as usize] = true;
                }
            }
        }
        (0..self.positions.len() as VertexId)
            .filter(|&id| used[id as usize])
            .collect()
    }

    /// The starting edge for an assembly attempt: the first outgoing edge of
    /// the live source at `rotation` (modulo the number of live sources).
    pub fn first_edge(&self, rotation: usize) -> Option<(VertexId, VertexId)> {
        let live: Vec<VertexId> = self
            .sources
            .iter()
            .copied()
            .filter(|&src| !self.outgoing(src).is_empty())
            .collect();
        if live.is_empty() {
            return None;
        }
        let src = live[rotation % live.len()];
        Some((src, self.outgoing(src)[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnitVec3;

    fn store_with(points: &[(f64, f64)]) -> (EdgeStore, Vec<VertexId>) {
        let mut store = EdgeStore::new();
        let ids = points
            .iter()
            .map(|&(lat, lng)| store.intern(UnitVec3::from_lat_lng_degrees(lat, lng)))
            .collect();
        (store, ids)
    }

    #[test]
    fn test_intern_dedups_identical_positions() {
        let (mut store, ids) = store_with(&[(0.0, 0.0), (0.0, 10.0)]);
        let again = store.intern(UnitVec3::from_lat_lng_degrees(0.0, 0.0));
        assert_eq!(again, ids[0]);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_add_and_erase() {
        let (mut store, ids) = store_with(&[(0.0, 0.0), (0.0, 10.0), (10.0, 5.0)]);
        store.add_directed(ids[0], ids[1], false);
        store.add_directed(ids[0], ids[2], false);
        store.add_directed(ids[0], ids[1], false);
        assert_eq!(store.num_edges(), 3);
        assert_eq!(store.outgoing(ids[0]), &[ids[1], ids[2], ids[1]]);

        assert!(store.erase(ids[0], ids[1]));
        assert_eq!(store.outgoing(ids[0]), &[ids[2], ids[1]]);
        assert!(!store.erase(ids[1], ids[0]));
        assert_eq!(store.num_edges(), 2);
    }

    #[test]
    fn test_xor_cancels_reversed_edge() {
        let (mut store, ids) = store_with(&[(0.0, 0.0), (0.0, 10.0)]);
        store.add_directed(ids[0], ids[1], true);
        assert_eq!(store.num_edges(), 1);
        // Adding the reverse cancels rather than inserting.
        store.add_directed(ids[1], ids[0], true);
        assert_eq!(store.num_edges(), 0);
        // A same-direction duplicate does not cancel.
        store.add_directed(ids[0], ids[1], true);
        store.add_directed(ids[0], ids[1], true);
        assert_eq!(store.num_edges(), 2);
    }

    #[test]
    fn test_degenerate_edge_dropped() {
        let (mut store, ids) = store_with(&[(0.0, 0.0)]);
        store.add_directed(ids[0], ids[0], false);
        assert!(store.is_empty());
    }

    #[test]
    fn test_first_edge_rotation() {
        let (mut store, ids) = store_with(&[(0.0, 0.0), (0.0, 10.0), (10.0, 5.0)]);
        store.add_directed(ids[0], ids[1], false);
        store.add_directed(ids[1], ids[2], false);
        assert_eq!(store.first_edge(0), Some((ids[0], ids[1])));
        assert_eq!(store.first_edge(1), Some((ids[1], ids[2])));
        assert_eq!(store.first_edge(2), Some((ids[0], ids[1])));
    }
}
