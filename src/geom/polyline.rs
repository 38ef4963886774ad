//! Polylines and the dual u/v curve network sampled from an equation.

use serde::Serialize;

use super::point::Point3;

/// One vertex of a sampled polyline.
///
/// `Break` marks "no curve here": a disjoint branch boundary (asymptote,
/// undefined sample) that must not produce a connecting segment. Using an
/// explicit variant instead of a NaN coordinate keeps structural decisions
/// out of floating-point comparison semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PolylineVertex {
    Point(Point3),
    Break,
}

impl PolylineVertex {
    #[must_use]
    pub const fn as_point(self) -> Option<Point3> {
        match self {
            Self::Point(p) => Some(p),
            Self::Break => None,
        }
    }

    #[must_use]
    pub const fn is_break(self) -> bool {
        matches!(self, Self::Break)
    }
}

/// Ordered vertex sequence forming one sampled curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Polyline {
    pub vertices: Vec<PolylineVertex>,
}

impl Polyline {
    #[must_use]
    pub const fn new() -> Self {
        Self { vertices: Vec::new() }
    }

    pub fn push_point(&mut self, point: Point3) {
        self.vertices.push(PolylineVertex::Point(point));
    }

    pub fn push_break(&mut self) {
        self.vertices.push(PolylineVertex::Break);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn has_breaks(&self) -> bool {
        self.vertices.iter().any(|v| v.is_break())
    }

    /// Point-wrap: close the polyline into a loop by repeating its first
    /// vertex. A leading `Break` is never wrapped.
    pub fn close(&mut self) {
        if let Some(PolylineVertex::Point(first)) = self.vertices.first().copied() {
            self.vertices.push(PolylineVertex::Point(first));
        }
    }
}

/// The dual curve network of a sampled equation.
///
/// `v_curves[j]` is built by taking the j-th vertex of every `u_curves[i]`,
/// so every u-curve must have the same vertex count whenever the dual is
/// derived. Curve equations carry a single u-curve and no dual.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Wireframe {
    pub u_curves: Vec<Polyline>,
    pub v_curves: Vec<Polyline>,
}

/// Accumulates sampled rows into a [`Wireframe`], applying point-wrap per
/// row and curve-wrap across rows.
#[derive(Debug)]
pub struct WireframeBuilder {
    point_wrap: bool,
    curve_wrap: bool,
    rows: Vec<Polyline>,
}

impl WireframeBuilder {
    #[must_use]
    pub const fn new(point_wrap: bool, curve_wrap: bool) -> Self {
        Self {
            point_wrap,
            curve_wrap,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, mut row: Polyline) {
        if self.point_wrap {
            row.close();
        }
        self.rows.push(row);
    }

    /// Finish the network. The transposed dual is derived only when more
    /// than one row was sampled (a curve equation has no dual).
    #[must_use]
    pub fn finish(mut self) -> Wireframe {
        if self.curve_wrap {
            if let Some(first) = self.rows.first().cloned() {
                self.rows.push(first);
            }
        }
        let v_curves = if self.rows.len() > 1 {
            transpose(&self.rows)
        } else {
            Vec::new()
        };
        Wireframe {
            u_curves: self.rows,
            v_curves,
        }
    }
}

fn transpose(rows: &[Polyline]) -> Vec<Polyline> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let width = first.len();
    debug_assert!(
        rows.iter().all(|row| row.len() == width),
        "transposition requires rows of equal length"
    );
    (0..width)
        .map(|j| Polyline {
            vertices: rows.iter().map(|row| row.vertices[j]).collect(),
        })
        .collect()
}
