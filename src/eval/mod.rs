//! Function and constant catalogue registered into the external expression
//! evaluator, plus per-evaluation variable bindings.

use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::f64::consts::{E, PI, TAU};
use std::rc::Rc;

use meval::{Context, ContextProvider};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Every function name the library registers. The classifier strips these
/// out of an expression before looking for variable occurrences, so `sin(`
/// or `random(` never count as variables.
pub const FUNCTION_NAMES: &[&str] = &[
    "abs",
    "pow",
    "sqrt",
    "round",
    "sign",
    "min",
    "max",
    "ceiling",
    "truncate",
    "exp",
    "floor",
    "remainder",
    "ieeeremainder",
    "ln",
    "log",
    "log10",
    "sin",
    "cos",
    "tan",
    "csc",
    "sec",
    "cot",
    "asin",
    "acos",
    "atan",
    "sinh",
    "cosh",
    "tanh",
    "csch",
    "sech",
    "coth",
    "sinc",
    "random",
    "randint",
    "randdec",
];

/// Constant names registered alongside the functions.
pub const CONSTANT_NAMES: &[&str] = &["pi", "e"];

/// Replace every registered function name in `text` with a `#` marker.
///
/// Longer names go first so `sinh` is consumed before `sin`; the marker
/// keeps the surrounding characters from joining into a false variable name.
#[must_use]
pub fn strip_function_names(text: &str) -> String {
    let mut names: Vec<&str> = FUNCTION_NAMES.to_vec();
    names.sort_by_key(|name| Reverse(name.len()));
    let mut stripped = text.to_owned();
    for name in names {
        stripped = stripped.replace(name, "#");
    }
    stripped
}

/// The fixed catalogue of named scalar functions and constants supplied to
/// the evaluator, together with an injected seedable random source. Cloning
/// shares the random state, so a cloned library stays on the same sequence.
#[derive(Clone)]
pub struct FunctionLibrary {
    rng: Rc<RefCell<StdRng>>,
}

impl FunctionLibrary {
    /// Library with an OS-entropy random seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Rc::new(RefCell::new(StdRng::from_os_rng())),
        }
    }

    /// Library with a fixed seed, for deterministic output.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rc::new(RefCell::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// Build an evaluator context with the full catalogue registered.
    ///
    /// Trig functions reduce their argument modulo 2*pi before evaluating,
    /// `sinc(0) = 1`, and `log` works with one argument (`log10`) or two
    /// (change of base, `log(b, v)` = log of `v` in base `b`).
    #[must_use]
    pub fn context(&self) -> Context<'static> {
        let mut ctx = Context::new();
        ctx.var("pi", PI);
        ctx.var("e", E);

        ctx.func("abs", f64::abs);
        ctx.func2("pow", f64::powf);
        ctx.func("sqrt", f64::sqrt);
        ctx.func("round", f64::round);
        ctx.func("sign", f64::signum);
        ctx.func2("min", f64::min);
        ctx.func2("max", f64::max);
        ctx.func("ceiling", f64::ceil);
        ctx.func("truncate", f64::trunc);
        ctx.func("exp", f64::exp);
        ctx.func("floor", f64::floor);
        ctx.func2("remainder", ieee_remainder);
        ctx.func2("ieeeremainder", ieee_remainder);
        ctx.func("ln", f64::ln);
        ctx.funcn("log", log_any_base, 1..3);
        ctx.func("log10", f64::log10);

        ctx.func("sin", |v| reduce_angle(v).sin());
        ctx.func("cos", |v| reduce_angle(v).cos());
        ctx.func("tan", |v| reduce_angle(v).tan());
        ctx.func("csc", |v| 1.0 / reduce_angle(v).sin());
        ctx.func("sec", |v| 1.0 / reduce_angle(v).cos());
        ctx.func("cot", |v| 1.0 / reduce_angle(v).tan());
        ctx.func("asin", f64::asin);
        ctx.func("acos", f64::acos);
        ctx.func("atan", f64::atan);
        ctx.func("sinh", f64::sinh);
        ctx.func("cosh", f64::cosh);
        ctx.func("tanh", f64::tanh);
        ctx.func("csch", |v| 1.0 / v.sinh());
        ctx.func("sech", |v| 1.0 / v.cosh());
        ctx.func("coth", |v| 1.0 / v.tanh());
        ctx.func("sinc", sinc);

        let rng = Rc::clone(&self.rng);
        ctx.funcn(
            "random",
            move |args: &[f64]| random_value(&mut rng.borrow_mut(), args),
            0..3,
        );
        let rng = Rc::clone(&self.rng);
        ctx.func2("randint", move |a, b| {
            random_integer(&mut rng.borrow_mut(), a, b)
        });
        let rng = Rc::clone(&self.rng);
        ctx.func2("randdec", move |a, b| {
            random_value(&mut rng.borrow_mut(), &[a, b])
        });

        ctx
    }
}

impl Default for FunctionLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable per-evaluation variable bindings. Each sample gets its own map
/// instead of mutating a shared parameter table, so row evaluation contexts
/// stay independent.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<String, f64>,
}

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_owned(), value);
    }
}

impl ContextProvider for Bindings {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

fn reduce_angle(value: f64) -> f64 {
    value % TAU
}

fn sinc(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        reduce_angle(value).sin() / value
    }
}

fn ieee_remainder(dividend: f64, divisor: f64) -> f64 {
    if divisor == 0.0 {
        return f64::NAN;
    }
    dividend - divisor * (dividend / divisor).round()
}

fn log_any_base(args: &[f64]) -> f64 {
    match args {
        [value] => value.log10(),
        [base, value] => value.log10() / base.log10(),
        _ => f64::NAN,
    }
}

fn random_value(rng: &mut StdRng, args: &[f64]) -> f64 {
    match args {
        [] => rng.random::<f64>(),
        [end] => {
            if *end == 0.0 {
                0.0
            } else {
                let (lower, upper) = if *end > 0.0 { (0.0, *end) } else { (*end, 0.0) };
                rng.random_range(lower..upper)
            }
        }
        [a, b, ..] => {
            if a == b {
                *a
            } else {
                let (lower, upper) = if a < b { (*a, *b) } else { (*b, *a) };
                rng.random_range(lower..upper)
            }
        }
    }
}

fn random_integer(rng: &mut StdRng, a: f64, b: f64) -> f64 {
    let lower = a.min(b).ceil() as i64;
    let upper = a.max(b).floor() as i64;
    if upper <= lower {
        return lower as f64;
    }
    rng.random_range(lower..=upper) as f64
}

#[cfg(test)]
mod tests {
    use meval::Expr;

    use super::*;

    fn eval(library: &FunctionLibrary, text: &str) -> f64 {
        let expr: Expr = text.parse().expect("expression parses");
        expr.eval_with_context(&library.context())
            .expect("expression evaluates")
    }

    #[test]
    fn test_sinc_at_zero() {
        let library = FunctionLibrary::with_seed(1);
        assert_eq!(eval(&library, "sinc(0)"), 1.0);
        assert!((eval(&library, "sinc(pi/2)") - 1.0 / (PI / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_trig_reduces_modulo_two_pi() {
        let library = FunctionLibrary::with_seed(1);
        let direct = eval(&library, "sin(0.5)");
        let shifted = eval(&library, "sin(0.5 + 2*pi)");
        assert!((direct - shifted).abs() < 1e-9);
    }

    #[test]
    fn test_log_change_of_base() {
        let library = FunctionLibrary::with_seed(1);
        assert!((eval(&library, "log(2, 8)") - 3.0).abs() < 1e-12);
        assert!((eval(&library, "log(100)") - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_reciprocal_trig() {
        let library = FunctionLibrary::with_seed(1);
        assert!((eval(&library, "sec(0)") - 1.0).abs() < 1e-12);
        assert!((eval(&library, "csch(1)") - 1.0 / 1f64.sinh()).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_random_is_deterministic() {
        let a = FunctionLibrary::with_seed(42);
        let b = FunctionLibrary::with_seed(42);
        for _ in 0..8 {
            assert_eq!(eval(&a, "random()"), eval(&b, "random()"));
            assert_eq!(eval(&a, "randint(0, 100)"), eval(&b, "randint(0, 100)"));
        }
    }

    #[test]
    fn test_randint_stays_integral_and_bounded() {
        let library = FunctionLibrary::with_seed(9);
        for _ in 0..32 {
            let value = eval(&library, "randint(-3, 7)");
            assert_eq!(value, value.trunc());
            assert!((-3.0..=7.0).contains(&value));
        }
    }

    #[test]
    fn test_strip_function_names() {
        let stripped = strip_function_names("sin(x)+random(3)*cosh(y)");
        assert!(!stripped.contains("sin"));
        assert!(!stripped.contains("random"));
        assert!(!stripped.contains("cosh"));
        assert!(stripped.contains('x'));
        assert!(stripped.contains('y'));
    }

    #[test]
    fn test_strip_takes_longest_name_first() {
        // `sinh` must be consumed whole, not as `sin` + stray `h`
        let stripped = strip_function_names("sinh(x)");
        assert!(!stripped.contains('h'));
    }

    #[test]
    fn test_bindings_supply_variables() {
        let library = FunctionLibrary::with_seed(1);
        let expr: Expr = "x*y + 1".parse().expect("expression parses");
        let mut bindings = Bindings::new();
        bindings.set("x", 3.0);
        bindings.set("y", 4.0);
        let value = expr
            .eval_with_context((&bindings, &library.context()))
            .expect("expression evaluates");
        assert_eq!(value, 13.0);
    }
}
