//! Assembling spherical polygons from noisy geodesic edge soup.
//!
//! This crate takes an unordered multiset of geodesic edges on the unit
//! sphere and stitches them into simple, non-crossing loops, optionally
//! grouped as a polygon whose loop orientations follow their nesting. It is
//! built for inexact input: endpoints can be snapped to a hierarchical cell
//! grid, nearby vertices are merged into cluster representatives, vertices
//! are spliced into edges passing close enough, and duplicate edges can
//! cancel pairwise (symmetric difference).
//!
//! # Example
//!
//! ```
//! use s2_stitch::{BuilderOptions, PolygonBuilder, UnitVec3};
//!
//! let mut builder = PolygonBuilder::new(BuilderOptions::default()).unwrap();
//! builder.add_loop(&[
//!     UnitVec3::from_lat_lng_degrees(0.0, 0.0),
//!     UnitVec3::from_lat_lng_degrees(0.0, 10.0),
//!     UnitVec3::from_lat_lng_degrees(10.0, 5.0),
//! ]);
//!
//! let result = builder.assemble_loops();
//! assert_eq!(result.loops.len(), 1);
//! assert!(result.unused_edges.is_empty());
//! ```
//!
//! Crossing input edges are not re-intersected: edges that cannot take part
//! in any simple loop come back through the unused-edge output instead of
//! failing the build.

mod builder;
mod error;
mod loops;
mod options;
mod types;

pub mod geodesic;
pub mod snap_grid;
pub mod validation;

pub use builder::{LoopAssembly, PolygonAssembly, PolygonBuilder};
pub use error::BuilderError;
pub use loops::{Loop, Polygon};
pub use options::BuilderOptions;
pub use types::{UnitVec3, UnitVec3Like};
