//! # vorotwo
//!
//! `vorotwo` is a Rust library for planar Voronoi diagrams, designed to be used in Rust
//! as well as compiled to WebAssembly (WASM). It computes the diagram with Fortune's
//! sweep-line algorithm, clips it to a rectangle and closes every cell into a polygon.
//!
//! ## Features
//!
//! - **WASM-first**: Built with `wasm-bindgen` for seamless integration with JavaScript and TypeScript.
//! - **Sweep-line**: `O(n log n)` construction on arena-backed red-black trees.
//! - **Clipped polygons**: Every site with visible area gets a closed polygon, with neighbour ids per edge.
//! - **Delaunay duals**: Links and triangles read straight from the diagram.
//! - **Relaxation**: Lloyd iterations over the clipped polygons.
//!
//! ## Example
//!
//! See the `demos/` directory for SVG plotting.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Voronoi`] layout, which holds the coordinate accessors
//! and the clipping extent. [`compute_voronoi`] exposes the raw sweep.

mod beach;
mod bounds;
mod cell;
mod circle;
mod clip;
mod diagram;
mod edge;
mod error;
mod point;
mod polygon;
mod sweep;
mod tree;
mod voronoi;
pub mod wasm;

pub use bounds::BoundingBox;
pub use bounds::BOX_ID_BOTTOM;
pub use bounds::BOX_ID_LEFT;
pub use bounds::BOX_ID_RIGHT;
pub use bounds::BOX_ID_TOP;
pub use bounds::NULL_EXTENT;
pub use bounds::box_side;
pub use cell::Cell;
pub use clip::{clip_line, connect_edge};
pub use diagram::{Diagram, Link};
pub use edge::{Edge, EdgeId, HalfEdge, Orientation};
pub use error::{Result, VoronoiError};
pub use point::{EPSILON, EPSILON2, Point, Site, snap};
pub use polygon::Polygon;
pub use sweep::compute_voronoi;
pub use voronoi::{Coordinates, Voronoi, random_points};
