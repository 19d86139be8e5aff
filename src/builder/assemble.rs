//! Greedy loop extraction with bounded backtracking.

use super::edge_store::{EdgeStore, VertexId};
use crate::geodesic;
use crate::loops::Loop;
use crate::options::BuilderOptions;
use crate::types::UnitVec3;
use crate::validation;
use rustc_hash::{FxHashMap, FxHashSet};
use std::f64::consts::PI;

pub(crate) struct AssemblyOutput {
    pub loops: Vec<Loop>,
    pub unused: Vec<(UnitVec3, UnitVec3)>,
}

/// Extract simple loops from the edge multiset until it is empty.
///
/// Each attempt starts from the store's deterministic first edge and walks
/// forward, at every vertex taking the outgoing edge that turns furthest
/// left; hugging the tightest left wall keeps each face of the embedded
/// graph intact instead of tracing its outer boundary. An immediate
/// reversal ranks below every other candidate. The walk closes as soon as
/// it revisits a vertex on the path; edges before the junction stay in the
/// store for later attempts. A walk that dead-ends retires its starting
/// edge to the unused list, so no starting edge is tried twice.
pub(crate) fn assemble(
    store: &mut EdgeStore,
    options: &BuilderOptions,
    reject_duplicates: bool,
) -> AssemblyOutput {
    let mut loops = Vec::new();
    let mut unused_ids: Vec<(VertexId, VertexId)> = Vec::new();
    let mut emitted: FxHashSet<Vec<VertexId>> = FxHashSet::default();

    while let Some((v0, v1)) = store.first_edge(options.loop_start_rotation) {
        let Some(cycle) = walk_loop(store, v0, v1) else {
            store.erase(v0, v1);
            unused_ids.push((v0, v1));
            continue;
        };

        let valid = cycle.len() >= 3 && (!options.validate || cycle_is_valid(store, &cycle));
        let duplicate = valid && reject_duplicates && !emitted.insert(canonical(&cycle));

        if valid && !duplicate {
            remove_cycle(store, &cycle, options.undirected_edges, None);
            loops.push(make_loop(store, &cycle));
        } else {
            if duplicate {
                log::warn!(
                    "rejecting duplicate copy of an already-assembled {}-vertex loop",
                    cycle.len()
                );
            } else if options.validate && cycle.len() >= 3 {
                log::warn!("rejecting invalid {}-vertex loop", cycle.len());
            }
            remove_cycle(
                store,
                &cycle,
                options.undirected_edges,
                Some(&mut unused_ids),
            );
        }
    }

    debug_assert!(store.is_empty(), "assembly must drain the edge store");
    let unused = report_unused(store, unused_ids, options.undirected_edges);
    AssemblyOutput { loops, unused }
}

/// Walk forward from the directed edge `(v0, v1)` until the path revisits
/// one of its own vertices (returning the closed cycle) or dead-ends
/// (returning `None`). Edges are not consumed; the cycle's edges are all
/// still present in the store when it is returned.
fn walk_loop(store: &EdgeStore, v0: VertexId, v1: VertexId) -> Option<Vec<VertexId>> {
    let mut path = vec![v0, v1];
    let mut index_of: FxHashMap<VertexId, usize> = FxHashMap::default();
    index_of.insert(v0, 0);
    index_of.insert(v1, 1);

    loop {
        let prev = path[path.len() - 2];
        let current = path[path.len() - 1];
        let next = choose_next(store, prev, current)?;
        if let Some(&junction) = index_of.get(&next) {
            return Some(path[junction..].to_vec());
        }
        index_of.insert(next, path.len());
        path.push(next);
    }
}

/// Pick the outgoing edge of `current` that turns furthest left relative to
/// the direction of arrival from `prev`. Ties keep the earliest-inserted
/// edge; stepping straight back to `prev` is the choice of last resort.
fn choose_next(store: &EdgeStore, prev: VertexId, current: VertexId) -> Option<VertexId> {
    let p_prev = store.dposition(prev);
    let p_current = store.dposition(current);

    let mut best: Option<(f64, VertexId)> = None;
    for &candidate in store.outgoing(current) {
        let turn = if candidate == prev {
            -PI
        } else {
            geodesic::turn_angle(p_prev, p_current, store.dposition(candidate))
        };
        if best.map_or(true, |(best_turn, _)| turn > best_turn) {
            best = Some((turn, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

fn cycle_is_valid(store: &EdgeStore, cycle: &[VertexId]) -> bool {
    validation::check_loop(&make_loop(store, cycle)).is_valid()
}

/// Rotate the cycle so its smallest vertex id comes first, giving a stable
/// signature for duplicate detection.
fn canonical(cycle: &[VertexId]) -> Vec<VertexId> {
    let start = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, &id)| id)
        .map_or(0, |(i, _)| i);
    let mut rotated = Vec::with_capacity(cycle.len());
    rotated.extend_from_slice(&cycle[start..]);
    rotated.extend_from_slice(&cycle[..start]);
    rotated
}

/// Remove the cycle's edges from the store, optionally recording them as
/// unused. In undirected mode the reversed partner of every removed edge is
/// retired silently so the opposite traversal cannot re-emit the loop.
fn remove_cycle(
    store: &mut EdgeStore,
    cycle: &[VertexId],
    undirected: bool,
    mut unused: Option<&mut Vec<(VertexId, VertexId)>>,
) {
    let n = cycle.len();
    for i in 0..n {
        let a = cycle[i];
        let b = cycle[(i + 1) % n];
        if store.erase(a, b) {
            if let Some(out) = unused.as_deref_mut() {
                out.push((a, b));
            }
        }
        if undirected {
            store.erase(b, a);
        }
    }
}

fn make_loop(store: &EdgeStore, cycle: &[VertexId]) -> Loop {
    Loop::new(cycle.iter().map(|&id| store.position(id)).collect())
}

/// Convert unused edge ids to positions. In undirected mode each surviving
/// (a, b)/(b, a) pair represents one input edge and is reported once.
fn report_unused(
    store: &EdgeStore,
    unused_ids: Vec<(VertexId, VertexId)>,
    undirected: bool,
) -> Vec<(UnitVec3, UnitVec3)> {
    let pairs: Vec<(VertexId, VertexId)> = if undirected {
        let mut remaining: FxHashMap<(VertexId, VertexId), usize> = FxHashMap::default();
        for &edge in &unused_ids {
            *remaining.entry(edge).or_insert(0) += 1;
        }
        let mut out = Vec::new();
        for &(a, b) in &unused_ids {
            let count = remaining.get_mut(&(a, b)).unwrap();
            if *count == 0 {
                continue;
            }
            *count -= 1;
            if let Some(partner) = remaining.get_mut(&(b, a)) {
                if *partner > 0 {
                    *partner -= 1;
                }
            }
            out.push((a, b));
        }
        out
    } else {
        unused_ids
    };

    pairs
        .into_iter()
        .map(|(a, b)| (store.position(a), store.position(b)))
        .collect()
}
