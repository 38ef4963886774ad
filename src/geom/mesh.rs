//! Quad/triangle mesh topology derived from a sampled wireframe grid.

use serde::Serialize;

use super::point::Point3;
use super::polyline::Wireframe;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Triangle {
    pub vertices: [Point3; 3],
}

impl Triangle {
    #[must_use]
    pub const fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { vertices: [a, b, c] }
    }
}

/// One cell of the wireframe grid, corners in the fixed order
/// `(row[i-1][j-1], row[i][j-1], row[i][j], row[i-1][j])`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quad {
    pub vertices: [Point3; 4],
}

impl Quad {
    #[must_use]
    pub const fn new(a: Point3, b: Point3, c: Point3, d: Point3) -> Self {
        Self { vertices: [a, b, c, d] }
    }

    /// Split along the `(a, c)` diagonal. The diagonal choice is observable
    /// on saddle-shaped samples and must not change.
    #[must_use]
    pub const fn split(self) -> [Triangle; 2] {
        let [a, b, c, d] = self.vertices;
        [Triangle::new(a, b, c), Triangle::new(a, c, d)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuadMesh {
    pub quads: Vec<Quad>,
}

impl QuadMesh {
    /// One quad per adjacent 2x2 block of the u-curve grid. Blocks touching
    /// a break vertex are skipped (surface sampling never produces breaks,
    /// so a full grid yields `(rows-1) * (cols-1)` quads).
    #[must_use]
    pub fn from_wireframe(wireframe: &Wireframe) -> Self {
        let rows = &wireframe.u_curves;
        let mut quads = Vec::new();
        for i in 1..rows.len() {
            let prev = &rows[i - 1].vertices;
            let curr = &rows[i].vertices;
            let width = prev.len().min(curr.len());
            for j in 1..width {
                let corners = [
                    prev[j - 1].as_point(),
                    curr[j - 1].as_point(),
                    curr[j].as_point(),
                    prev[j].as_point(),
                ];
                if let [Some(a), Some(b), Some(c), Some(d)] = corners {
                    quads.push(Quad::new(a, b, c, d));
                }
            }
        }
        Self { quads }
    }

    #[must_use]
    pub fn triangulate(&self) -> TriangleMesh {
        let mut triangles = Vec::with_capacity(self.quads.len() * 2);
        for quad in &self.quads {
            triangles.extend(quad.split());
        }
        TriangleMesh { triangles }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TriangleMesh {
    pub triangles: Vec<Triangle>,
}

impl TriangleMesh {
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}
