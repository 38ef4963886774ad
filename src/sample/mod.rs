//! Parametric grid sampling: walking the classified equation's bounds at a
//! fixed resolution and mapping every evaluated sample into 3D.

use std::f64::consts::FRAC_PI_2;

use meval::Expr;

use crate::classify::{Classification, CoordinateSystem};
use crate::error::EquationError;
use crate::eval::{Bindings, FunctionLibrary};
use crate::geom::{Bounds, Point3, Polyline, Wireframe, WireframeBuilder, convert};

/// Allowed range for `points_per_curve` and `curves_per_surface`.
pub const RESOLUTION_RANGE: std::ops::RangeInclusive<u32> = 2..=998;

/// Finite stand-in for an infinite surface sample; surfaces must stay
/// connected, so infinities are pushed to a large-but-finite height.
const INFINITY_SENTINEL: f64 = 1.0e10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleConfig {
    /// Samples per u-curve (the curve gets one extra: bounds are inclusive).
    pub points_per_curve: u32,
    /// U-curve count per surface, same inclusive convention.
    pub curves_per_surface: u32,
    /// Close every u-curve into a loop by repeating its first vertex.
    pub point_wrap: bool,
    /// Close the surface in the secondary direction by repeating the first
    /// u-curve as a final row.
    pub curve_wrap: bool,
    /// Maximum magnitude each output axis is clamped to.
    pub clamp_magnitude: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            points_per_curve: 50,
            curves_per_surface: 50,
            point_wrap: false,
            curve_wrap: false,
            clamp_magnitude: f64::MAX,
        }
    }
}

impl SampleConfig {
    pub fn validate(&self) -> Result<(), EquationError> {
        for (name, value) in [
            ("points_per_curve", self.points_per_curve),
            ("curves_per_surface", self.curves_per_surface),
        ] {
            if !RESOLUTION_RANGE.contains(&value) {
                return Err(EquationError::Configuration(format!(
                    "{name} must lie in [{}, {}], got {value}",
                    RESOLUTION_RANGE.start(),
                    RESOLUTION_RANGE.end(),
                )));
            }
        }
        Ok(())
    }
}

/// Sample the classified equation over its bounds grid.
///
/// Curve equations (one bound) get a synthetic secondary bound so a single
/// uniform double loop serves both dimensionalities; surfaces iterate the
/// secondary bound at `curves_per_surface` resolution.
pub fn sample(
    classification: &Classification,
    bounds: &[Bounds],
    config: &SampleConfig,
    library: &FunctionLibrary,
) -> Result<Wireframe, EquationError> {
    config.validate()?;

    let expr: Expr = classification
        .canonical
        .parse()
        .map_err(|error: meval::Error| EquationError::InvalidExpression(error.to_string()))?;
    let context = library.context();

    let surface = classification.role.is_surface();
    let primary = *bounds
        .first()
        .ok_or_else(|| EquationError::Configuration("missing primary bounds".to_owned()))?;
    let (secondary, curve_step) = if surface {
        let second = *bounds.get(1).ok_or_else(|| {
            EquationError::Configuration("missing secondary bounds for surface".to_owned())
        })?;
        (second, second.width() / f64::from(config.curves_per_surface))
    } else {
        (synthetic_secondary(classification.system), 1.0)
    };

    let point_step = primary.width() / f64::from(config.points_per_curve);
    if point_step <= 0.0 || curve_step <= 0.0 || !point_step.is_finite() || !curve_step.is_finite()
    {
        return Err(EquationError::Configuration(
            "bounds must have positive finite width".to_owned(),
        ));
    }

    // Parameters are derived from the loop index, not accumulated, so the
    // inclusive endpoint is always reached even when the step does not
    // terminate in decimal. Rounding keeps drift from jittering the values.
    let point_precision = decimal_places(point_step).max(decimal_places(primary.min));
    let curve_precision = decimal_places(curve_step).max(decimal_places(secondary.min));

    let primary_name = classification.independent[0];
    let secondary_name = classification.independent.get(1).copied();
    let row_count = if surface { config.curves_per_surface } else { 0 };

    let mut builder = WireframeBuilder::new(config.point_wrap, config.curve_wrap && surface);
    for j in 0..=row_count {
        let v = grid_value(secondary.min, curve_step, j, curve_precision);
        let mut row = Polyline::new();
        for k in 0..=config.points_per_curve {
            let u = grid_value(primary.min, point_step, k, point_precision);
            let mut bindings = Bindings::new();
            bindings.set(primary_name, u);
            if let Some(name) = secondary_name {
                bindings.set(name, v);
            }
            let result = expr
                .eval_with_context((&bindings, &context))
                .map_err(|error| EquationError::InvalidExpression(error.to_string()))?;

            if surface {
                let point = locate(classification, u, v, settle_surface_value(result));
                row.push_point(point.clamp_magnitude(config.clamp_magnitude));
            } else if result.is_finite() {
                let point = locate(classification, u, v, result);
                row.push_point(point.clamp_magnitude(config.clamp_magnitude));
            } else {
                // disjoint branch (asymptote, undefined sample): break the
                // polyline instead of drawing a connecting segment
                row.push_break();
            }
        }
        builder.push_row(row);
    }

    log::debug!(
        "sampled `{}` over {:?} bounds into a {} x {} grid",
        classification.canonical,
        classification.system,
        config.curves_per_surface,
        config.points_per_curve,
    );

    Ok(builder.finish())
}

/// Secondary bound substituted for curve equations: the spherical one pins
/// `phi` to `pi/2` so polar curves land on the XY plane; everything else
/// pins the slot-2 coordinate to zero. Curves run the outer loop exactly
/// once, at `secondary.min`.
fn synthetic_secondary(system: CoordinateSystem) -> Bounds {
    match system {
        CoordinateSystem::Spherical => Bounds::new(FRAC_PI_2, 2.0),
        _ => Bounds::new(0.0, 0.0),
    }
}

/// Map the two driving parameters plus the evaluated scalar into 3D. The
/// scalar lands in the dependent (missing) slot, `u`/`v` fill the
/// independent slots in role order, and the filled slot triple feeds the
/// coordinate-system conversion.
fn locate(classification: &Classification, u: f64, v: f64, result: f64) -> Point3 {
    let role = classification.role;
    let mut slots = [0.0f64; 3];
    slots[role.dependent_slot()] = result;
    let indep = role.independent_slots();
    slots[indep[0]] = u;
    if let Some(&second) = indep.get(1) {
        slots[second] = v;
    } else {
        slots[2] = v;
    }

    match classification.system {
        CoordinateSystem::Cartesian => convert::cartesian(slots[0], slots[1], slots[2]),
        CoordinateSystem::Spherical => convert::spherical(slots[0], slots[1], slots[2]),
        CoordinateSystem::Cylindrical | CoordinateSystem::Conical => {
            convert::cylindrical(slots[0], slots[1], slots[2])
        }
    }
}

/// Surfaces cannot represent holes, so non-finite samples are filled rather
/// than broken: infinities become a large finite height, NaN becomes zero.
fn settle_surface_value(value: f64) -> f64 {
    if value == f64::INFINITY {
        INFINITY_SENTINEL
    } else if value == f64::NEG_INFINITY {
        -INFINITY_SENTINEL
    } else if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Digits after the decimal point, trailing zeros trimmed, capped at ten.
fn decimal_places(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let text = format!("{:.10}", value.abs());
    match text.split_once('.') {
        Some((_, fraction)) => fraction.trim_end_matches('0').len() as i32,
        None => 0,
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Grid parameter at `index` steps past `min`. The first sample is `min`
/// itself, untouched by rounding, so bound endpoints like `pi/2` survive
/// at full precision.
fn grid_value(min: f64, step: f64, index: u32, places: i32) -> f64 {
    if index == 0 {
        min
    } else {
        round_to(f64::from(index).mul_add(step, min), places)
    }
}
