//! User-facing equation object: classify once at construction, generate
//! geometry on demand.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::{self, Classification};
use crate::error::EquationError;
use crate::eval::FunctionLibrary;
use crate::geom::mesh::{QuadMesh, TriangleMesh};
use crate::geom::{Bounds, Wireframe};
use crate::sample::{self, SampleConfig};

/// Everything one `generate` call produces. Owned exclusively by the
/// caller; nothing is shared across equation instances.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated {
    pub wireframe: Wireframe,
    /// Present for surfaces only.
    pub quads: Option<QuadMesh>,
    /// Present for surfaces only; two triangles per quad.
    pub triangles: Option<TriangleMesh>,
}

/// An equation plus its sampling setup. Classification runs in `new` and
/// its outcome is stored: a failed classification never panics or raises,
/// it just leaves the equation unable to generate.
#[derive(Clone)]
pub struct Equation {
    text: String,
    bounds: Vec<Bounds>,
    config: SampleConfig,
    library: FunctionLibrary,
    sliders: BTreeMap<String, f64>,
    outcome: Result<Classification, EquationError>,
}

impl Equation {
    #[must_use]
    pub fn new(
        text: &str,
        dimension: u32,
        bounds: Vec<Bounds>,
        config: SampleConfig,
        library: FunctionLibrary,
    ) -> Self {
        let outcome = prepare(text, dimension, &bounds, &config, &library);
        if let Err(error) = &outcome {
            log::debug!("equation `{text}` rejected: {error}");
        }
        Self {
            text: text.to_owned(),
            bounds,
            config,
            library,
            sliders: BTreeMap::new(),
            outcome,
        }
    }

    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.outcome.is_ok()
    }

    #[must_use]
    pub fn error(&self) -> Option<&EquationError> {
        self.outcome.as_ref().err()
    }

    #[must_use]
    pub fn classification(&self) -> Option<&Classification> {
        self.outcome.as_ref().ok()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn bounds(&self) -> &[Bounds] {
        &self.bounds
    }

    /// Named parameter sliders. Stored per equation for the host to manage;
    /// changing one does not re-sample (live re-evaluation is out of scope).
    pub fn set_slider(&mut self, name: &str, value: f64) {
        self.sliders.insert(name.to_owned(), value);
    }

    #[must_use]
    pub fn slider(&self, name: &str) -> Option<f64> {
        self.sliders.get(name).copied()
    }

    #[must_use]
    pub fn sliders(&self) -> &BTreeMap<String, f64> {
        &self.sliders
    }

    /// Sample the classified equation and derive mesh topology.
    ///
    /// A no-op failure on an unsuccessfully classified equation: reports
    /// [`EquationError::NotGenerated`] instead of panicking.
    pub fn generate(&self) -> Result<Generated, EquationError> {
        let Ok(classification) = &self.outcome else {
            return Err(EquationError::NotGenerated);
        };

        let wireframe = sample::sample(classification, &self.bounds, &self.config, &self.library)?;
        let (quads, triangles) = if classification.role.is_surface() {
            let quads = QuadMesh::from_wireframe(&wireframe);
            let triangles = quads.triangulate();
            (Some(quads), Some(triangles))
        } else {
            (None, None)
        };

        Ok(Generated {
            wireframe,
            quads,
            triangles,
        })
    }
}

fn prepare(
    text: &str,
    dimension: u32,
    bounds: &[Bounds],
    config: &SampleConfig,
    library: &FunctionLibrary,
) -> Result<Classification, EquationError> {
    config.validate()?;
    let classification = classify::classify(text, dimension, library)?;

    let expected = dimension as usize - 1;
    if bounds.len() != expected {
        return Err(EquationError::Configuration(format!(
            "expected {expected} bounds for dimension {dimension}, got {}",
            bounds.len()
        )));
    }
    for b in bounds {
        if !(b.width() > 0.0 && b.width().is_finite()) {
            return Err(EquationError::Configuration(format!(
                "bounds [{}, {}] must have positive finite width",
                b.min, b.max
            )));
        }
    }

    Ok(classification)
}
