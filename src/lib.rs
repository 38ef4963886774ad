#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Turns a textual mathematical expression (for instance `z=sin(x)+sin(y)`)
//! plus per-variable numeric bounds into a topologically consistent network
//! of sampled 3D points: u/v polylines, quad and triangle mesh topology,
//! ready for any downstream geometry kernel.
//!
//! The pipeline: [`classify::classify`] infers the coordinate system and
//! the independent-variable roles from the raw text, [`sample::sample`]
//! walks the bounds grid through the expression evaluator (with the
//! [`eval::FunctionLibrary`] catalogue registered), and the `geom` types
//! carry the resulting wireframe and derived meshes. [`Equation`] bundles
//! the whole thing behind a classify-once, generate-on-demand object.

pub mod classify;
pub mod equation;
pub mod error;
pub mod eval;
pub mod geom;
pub mod sample;

pub use classify::{Classification, CoordinateSystem, VariablesUsed};
pub use equation::{Equation, Generated};
pub use error::EquationError;
pub use eval::FunctionLibrary;
pub use geom::{
    Bounds, Point3, Polyline, PolylineVertex, Quad, QuadMesh, Triangle, TriangleMesh, Wireframe,
};
pub use sample::SampleConfig;
