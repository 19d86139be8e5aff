//! The polygon builder: ingestion, snapping, clustering, splicing, and loop
//! assembly.

mod assemble;
mod edge_index;
mod edge_store;
mod merge;
mod point_index;
mod splice;
mod union_find;

use crate::error::BuilderError;
use crate::geodesic;
use crate::loops::{Loop, Polygon};
use crate::options::BuilderOptions;
use crate::snap_grid;
use crate::types::UnitVec3;
use crate::validation;
use edge_store::EdgeStore;

/// Result of [`PolygonBuilder::assemble_loops`].
#[derive(Debug, Clone)]
pub struct LoopAssembly {
    /// The simple loops extracted from the input edges.
    pub loops: Vec<Loop>,
    /// Input edges that could not be placed into any simple loop.
    pub unused_edges: Vec<(UnitVec3, UnitVec3)>,
}

/// Result of [`PolygonBuilder::assemble_polygon`].
#[derive(Debug, Clone)]
pub struct PolygonAssembly {
    /// The assembled polygon, with loop orientation derived from nesting.
    pub polygon: Polygon,
    /// Input edges that could not be placed into any loop of the polygon.
    pub unused_edges: Vec<(UnitVec3, UnitVec3)>,
}

/// Assembles a multiset of geodesic edges into simple loops.
///
/// The builder tolerates numerically inexact input: endpoints can optionally
/// be snapped to a discrete grid, nearby vertices are merged, vertices are
/// spliced into edges passing close enough, and duplicate edges can cancel.
/// A builder is single-shot: assembling consumes it.
pub struct PolygonBuilder {
    options: BuilderOptions,
    store: EdgeStore,
}

impl PolygonBuilder {
    /// Create a builder, validating the option values.
    pub fn new(options: BuilderOptions) -> Result<Self, BuilderError> {
        options.check()?;
        Ok(Self {
            options,
            store: EdgeStore::new(),
        })
    }

    /// The options this builder was created with.
    #[inline]
    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Number of directed edges currently held.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.store.num_edges()
    }

    /// Add one edge. Degenerate edges (endpoints equal or antipodal, where
    /// the shorter arc is undefined) are silently dropped. In undirected
    /// mode both directions are added.
    pub fn add_edge(&mut self, a: UnitVec3, b: UnitVec3) {
        let cross = a.to_dvec3().cross(b.to_dvec3());
        if cross.length_squared() < geodesic::DEGENERATE_CROSS_SQ {
            log::debug!("dropping degenerate edge");
            return;
        }
        let ia = self.store.intern(a);
        let ib = self.store.intern(b);
        self.store.add_directed(ia, ib, self.options.xor_edges);
        if self.options.undirected_edges {
            self.store.add_directed(ib, ia, self.options.xor_edges);
        }
    }

    /// Add the edges of a closed loop (last vertex connects back to first).
    pub fn add_loop(&mut self, vertices: &[UnitVec3]) {
        if vertices.len() < 2 {
            return;
        }
        for pair in vertices.windows(2) {
            self.add_edge(pair[0], pair[1]);
        }
        self.add_edge(vertices[vertices.len() - 1], vertices[0]);
    }

    /// Add the edges of an open polyline.
    pub fn add_polyline(&mut self, vertices: &[UnitVec3]) {
        for pair in vertices.windows(2) {
            self.add_edge(pair[0], pair[1]);
        }
    }

    /// Add every loop of a polygon.
    pub fn add_polygon(&mut self, polygon: &Polygon) {
        for lp in polygon.loops() {
            self.add_loop(lp.vertices());
        }
    }

    /// Assemble the accumulated edges into simple loops, returning the loops
    /// and whatever edges could not be used.
    pub fn assemble_loops(mut self) -> LoopAssembly {
        self.prepare();
        let out = assemble::assemble(&mut self.store, &self.options, self.options.validate);
        LoopAssembly {
            loops: out.loops,
            unused_edges: out.unused,
        }
    }

    /// Assemble the accumulated edges into a polygon.
    ///
    /// On top of loop assembly this rejects loops that cross another loop
    /// (their edges are reported unused), suppresses duplicate copies of a
    /// loop, and orients each remaining loop by its nesting depth: shells
    /// counter-clockwise, holes clockwise.
    pub fn assemble_polygon(mut self) -> PolygonAssembly {
        self.prepare();
        let out = assemble::assemble(&mut self.store, &self.options, true);
        let mut unused_edges = out.unused;

        let crossing = validation::crossing_loop_indices(&out.loops);
        if !crossing.is_empty() {
            log::warn!(
                "rejecting {} loops that cross another loop",
                crossing.len()
            );
        }
        let mut kept = Vec::with_capacity(out.loops.len());
        for (i, lp) in out.loops.into_iter().enumerate() {
            if crossing.contains(&i) {
                let n = lp.num_vertices();
                for j in 0..n {
                    unused_edges.push((lp.vertex(j), lp.vertex((j + 1) % n)));
                }
            } else {
                kept.push(lp);
            }
        }

        PolygonAssembly {
            polygon: Polygon::from_assembled(kept),
            unused_edges,
        }
    }

    /// Run the tolerance passes in order: snap, cluster, splice.
    fn prepare(&mut self) {
        if let Some(level) = self.options.snap_level() {
            self.snap_to_cell_centers(level);
        }
        if self.options.vertex_merge_radius > 0.0 {
            self.merge_vertices();
            let splice_radius = self.options.splice_radius();
            if splice_radius > 0.0 {
                splice::splice_edges(&mut self.store, splice_radius, self.options.xor_edges);
            }
        }
    }

    fn snap_to_cell_centers(&mut self, level: u8) {
        let mut snapped = EdgeStore::new();
        for (a, b) in self.store.edges() {
            let pa = UnitVec3::from_dvec3(snap_grid::cell_center(self.store.dposition(a), level));
            let pb = UnitVec3::from_dvec3(snap_grid::cell_center(self.store.dposition(b), level));
            let ia = snapped.intern(pa);
            let ib = snapped.intern(pb);
            snapped.add_directed(ia, ib, self.options.xor_edges);
        }
        log::debug!(
            "snapped edge endpoints to level {} cell centers ({} edges remain)",
            level,
            snapped.num_edges()
        );
        self.store = snapped;
    }

    fn merge_vertices(&mut self) {
        let reps = merge::cluster_vertices(&self.store, self.options.vertex_merge_radius);
        let mut merged = EdgeStore::new();
        for (a, b) in self.store.edges() {
            let ia = merged.intern(reps[&a]);
            let ib = merged.intern(reps[&b]);
            // Edges collapsed by merging drop out inside add_directed.
            merged.add_directed(ia, ib, self.options.xor_edges);
        }
        log::debug!(
            "vertex merge rewrote {} edges into {}",
            self.store.num_edges(),
            merged.num_edges()
        );
        self.store = merged;
    }
}
