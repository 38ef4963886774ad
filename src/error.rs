use thiserror::Error;

/// Everything that can go wrong while classifying or generating an equation.
///
/// All variants are recoverable at the call boundary: a failed classification
/// leaves the equation unusable rather than panicking, and per-sample
/// evaluation problems (NaN/infinity) are handled as data, never as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquationError {
    #[error("expression is empty")]
    EmptyExpression,

    #[error("expression does not fit the variables of any coordinate system")]
    InvalidVariables,

    #[error("left-hand side `{0}` is not a recognised assignment form")]
    InvalidBinderForm(String),

    #[error("dimension {0} is not supported, expected 2 or 3")]
    UnsupportedDimension(u32),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("expression failed to evaluate: {0}")]
    InvalidExpression(String),

    #[error("equation was not classified successfully")]
    NotGenerated,
}
