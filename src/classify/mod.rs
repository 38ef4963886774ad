//! Equation classification: inferring coordinate system, independent
//! variable roles, and the canonical evaluatable form from raw text.
//!
//! Everything here is heuristic string analysis over the expression text.
//! The detection order is load-bearing: systems and roles are tried in a
//! fixed priority and the first match wins, so tie-breaks stay
//! deterministic across releases.

use std::cmp::Reverse;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::EquationError;
use crate::eval::{self, Bindings, FunctionLibrary};

/// Accepted left-hand-side shapes: `name` or `name(arg)` or `name(arg,arg)`.
static BINDER_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z][a-zA-Z0-9]*)(?:\(([a-zA-Z][a-zA-Z0-9]*)(?:,([a-zA-Z][a-zA-Z0-9]*))?\))?$")
        .expect("binder pattern is valid")
});

// ─────────────────────────────────────────────────────────────────────────────
// Coordinate systems and variable roles
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoordinateSystem {
    Cartesian,
    Spherical,
    Cylindrical,
    /// Reserved; never produced by detection.
    Conical,
}

impl CoordinateSystem {
    /// Detection priority. First system whose variables fit the text wins.
    pub const DETECTION_ORDER: [Self; 3] = [Self::Cartesian, Self::Spherical, Self::Cylindrical];

    /// The system's canonical variable names, in slot order. Positions carry
    /// meaning: slots 0 and 1 are the primary pair for curve equations, and
    /// slot 2 joins them for surfaces. Slot 3 is a documented extension that
    /// is never sampled.
    #[must_use]
    pub const fn variables(self) -> [&'static str; 4] {
        match self {
            Self::Cartesian => ["x", "y", "z", "w"],
            Self::Spherical => ["theta", "r", "phi", "s"],
            Self::Cylindrical | Self::Conical => ["theta", "r", "z", "s"],
        }
    }
}

/// Which of the coordinate system's variable slots are independent
/// (sampled) for a successfully classified equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VariablesUsed {
    /// Curve over slot 0.
    One,
    /// Curve over slot 1.
    Two,
    /// Surface over slots 0 and 1.
    OneTwo,
    /// Surface over slots 0 and 2.
    OneThree,
    /// Surface over slots 1 and 2.
    TwoThree,
}

impl VariablesUsed {
    /// Slots sampled as independent variables, in canonical order.
    #[must_use]
    pub const fn independent_slots(self) -> &'static [usize] {
        match self {
            Self::One => &[0],
            Self::Two => &[1],
            Self::OneTwo => &[0, 1],
            Self::OneThree => &[0, 2],
            Self::TwoThree => &[1, 2],
        }
    }

    /// The slot that receives the evaluated scalar.
    #[must_use]
    pub const fn dependent_slot(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 0,
            Self::OneTwo => 2,
            Self::OneThree => 1,
            Self::TwoThree => 0,
        }
    }

    #[must_use]
    pub const fn is_surface(self) -> bool {
        matches!(self, Self::OneTwo | Self::OneThree | Self::TwoThree)
    }
}

/// Outcome of a successful classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub system: CoordinateSystem,
    pub role: VariablesUsed,
    /// Independent variable names in canonical slot order.
    pub independent: Vec<&'static str>,
    /// Right-hand side with the equals sign stripped and a `+0*v` term per
    /// independent variable appended, ready for direct evaluation.
    pub canonical: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

/// Classify `text` for the given plot dimension (2 = curve, 3 = surface).
///
/// Runs the fixed-priority cascade: coordinate-system detection, variable
/// role detection, canonical rewrite, then an evaluator probe of the
/// rewritten expression.
pub fn classify(
    text: &str,
    dimension: u32,
    library: &FunctionLibrary,
) -> Result<Classification, EquationError> {
    if !(2..=3).contains(&dimension) {
        return Err(EquationError::UnsupportedDimension(dimension));
    }

    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(EquationError::EmptyExpression);
    }

    let (lhs, rhs) = match compact.split_once('=') {
        Some((left, right)) => (Some(left), right),
        None => (None, compact.as_str()),
    };
    let binder = lhs.map(parse_binder).transpose()?;

    let stripped = eval::strip_function_names(rhs);
    let (system, role) = detect(dimension, &stripped, binder.as_ref())?;

    let vars = system.variables();
    let independent: Vec<&'static str> = role
        .independent_slots()
        .iter()
        .map(|&slot| vars[slot])
        .collect();

    let canonical = rewrite(text, &independent);
    probe(&canonical, &independent, library)?;

    log::debug!(
        "classified `{text}` as {system:?} role {role:?}, independent variables {independent:?}"
    );

    Ok(Classification {
        system,
        role,
        independent,
        canonical,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Binder forms
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Binder {
    name: String,
    args: Vec<String>,
}

fn parse_binder(lhs: &str) -> Result<Binder, EquationError> {
    let captures = BINDER_SHAPE
        .captures(lhs)
        .ok_or_else(|| EquationError::InvalidBinderForm(lhs.to_owned()))?;
    let name = captures[1].to_owned();
    let args = [captures.get(2), captures.get(3)]
        .into_iter()
        .flatten()
        .map(|m| m.as_str().to_owned())
        .collect();
    Ok(Binder { name, args })
}

impl Binder {
    /// Whether this binder declares the given dependent/independent split.
    /// Accepted forms: `dep=`, `dep(v1[,v2])=` and `f(v1[,v2])=` where `f`
    /// is any name outside the coordinate system's variables.
    fn declares(&self, vars: &[&'static str; 4], dep: &str, indep: &[&'static str]) -> bool {
        if self.args.is_empty() {
            return self.name == dep;
        }
        if self.args.len() != indep.len()
            || !self.args.iter().all(|arg| indep.contains(&arg.as_str()))
        {
            return false;
        }
        self.name == dep || !vars.contains(&self.name.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Detection cascade
// ─────────────────────────────────────────────────────────────────────────────

/// Walk the system priority order; the first system whose variables fit the
/// text *and* that yields a variable role wins. A system whose variables fit
/// but whose roles all fail (for instance a `z=` binder over an otherwise
/// spherical-looking right-hand side) falls through to the next system.
fn detect(
    dimension: u32,
    stripped_rhs: &str,
    binder: Option<&Binder>,
) -> Result<(CoordinateSystem, VariablesUsed), EquationError> {
    for system in CoordinateSystem::DETECTION_ORDER {
        if !valid_variables(system, stripped_rhs) {
            continue;
        }
        if let Some(role) = detect_role(system, dimension, stripped_rhs, binder) {
            return Ok((system, role));
        }
    }
    Err(EquationError::InvalidVariables)
}

/// A system's variables are "valid" for the text when at least one of them
/// occurs and no stray lowercase letters remain after removing them all
/// (function names were already stripped, constants are removed here).
fn valid_variables(system: CoordinateSystem, stripped_rhs: &str) -> bool {
    let mut vars = system.variables().to_vec();
    if !vars.iter().any(|v| stripped_rhs.contains(v)) {
        return false;
    }

    vars.sort_by_key(|v| Reverse(v.len()));
    let mut residue = stripped_rhs.to_owned();
    for name in vars.iter().chain(eval::CONSTANT_NAMES.iter()) {
        residue = residue.replace(name, "");
    }
    !residue.chars().any(|c| c.is_ascii_lowercase())
}

/// Role priority per dimension. Spherical equations with a radial binder
/// try the radial-dependent roles ahead of `OneTwo`.
fn role_order(
    system: CoordinateSystem,
    dimension: u32,
    binder: Option<&Binder>,
) -> &'static [VariablesUsed] {
    use VariablesUsed::{One, OneThree, OneTwo, Two, TwoThree};
    if dimension == 2 {
        return &[One, Two];
    }
    let radial_binder = system == CoordinateSystem::Spherical
        && binder.is_some_and(|b| b.name == system.variables()[1]);
    if radial_binder {
        &[OneThree, TwoThree, OneTwo]
    } else {
        &[OneTwo, TwoThree, OneThree]
    }
}

fn detect_role(
    system: CoordinateSystem,
    dimension: u32,
    stripped_rhs: &str,
    binder: Option<&Binder>,
) -> Option<VariablesUsed> {
    role_order(system, dimension, binder)
        .iter()
        .copied()
        .find(|&role| role_matches(system, role, stripped_rhs, binder))
}

fn role_matches(
    system: CoordinateSystem,
    role: VariablesUsed,
    stripped_rhs: &str,
    binder: Option<&Binder>,
) -> bool {
    let vars = system.variables();
    let indep: Vec<&'static str> = role
        .independent_slots()
        .iter()
        .map(|&slot| vars[slot])
        .collect();
    let dep = vars[role.dependent_slot()];

    // The right-hand side may reference independent candidates only. An
    // absent candidate is fine; the canonical rewrite pads it back in.
    let rhs_fits = vars
        .iter()
        .filter(|v| stripped_rhs.contains(*v))
        .all(|v| indep.contains(v));
    if !rhs_fits {
        return false;
    }

    match binder {
        None => true,
        Some(binder) => binder.declares(&vars, dep, &indep),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rewrite and probe
// ─────────────────────────────────────────────────────────────────────────────

/// Strip everything up to and including `=`, then append a no-op `+0*v`
/// term per independent variable. The padding forces the evaluator to
/// accept otherwise-unused independent variables, so constant expressions
/// keep the classified dimensionality.
fn rewrite(text: &str, independent: &[&'static str]) -> String {
    let rhs = text.split_once('=').map_or(text, |(_, right)| right).trim();
    let mut canonical = rhs.to_owned();
    canonical.push_str("+0");
    for var in independent {
        canonical.push('*');
        canonical.push_str(var);
    }
    canonical
}

/// Ask the evaluator whether the canonical expression is sound. Every
/// independent variable is bound (value is irrelevant; NaN results are
/// data, not errors), so the only failures left are real syntax or
/// unknown-name problems.
fn probe(
    canonical: &str,
    independent: &[&'static str],
    library: &FunctionLibrary,
) -> Result<(), EquationError> {
    let expr: meval::Expr = canonical
        .parse()
        .map_err(|error: meval::Error| EquationError::InvalidExpression(error.to_string()))?;

    let mut bindings = Bindings::new();
    for var in independent {
        bindings.set(var, 0.0);
    }
    expr.eval_with_context((&bindings, &library.context()))
        .map(|_| ())
        .map_err(|error| EquationError::InvalidExpression(error.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
