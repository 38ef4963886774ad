//! Geometry primitives produced by the sampler: points, bounds, the dual
//! polyline network, and derived mesh topology.

pub mod bounds;
pub mod convert;
pub mod mesh;
pub mod point;
pub mod polyline;

pub use bounds::Bounds;
pub use mesh::{Quad, QuadMesh, Triangle, TriangleMesh};
pub use point::Point3;
pub use polyline::{Polyline, PolylineVertex, Wireframe, WireframeBuilder};
