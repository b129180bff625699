//! The error type shared by all operations of the crate.

/// An error raised by evaluation, transformation or one of the numerical methods.
///
/// Every error is local to the call that produced it. Nothing is retried internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculusError {
    #[error("domain error: {0}")]
    Domain(String),

    #[error("invalid bracket [{min}, {max}]: the function does not change sign")]
    InvalidBracket { min: f64, max: f64 },

    #[error("no convergence after {steps} steps")]
    NotConverged { steps: usize },

    #[error("division by zero: the derivative vanishes")]
    DivisionByZero,

    #[error("the function has no exact derivative")]
    NotDifferentiable,

    #[error("at least 2 samples are required, but the interval has {0}")]
    InsufficientSamples(usize),

    #[error("degenerate interval: the bounds coincide")]
    DegenerateInterval,

    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    #[error("unsupported Gaussian quadrature order {0}: expected 1 to 5")]
    UnsupportedOrder(usize),

    #[error("invalid range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },

    #[error("parse error at line {line} and column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("corrupt data: {0}")]
    CorruptData(String),
}

impl From<std::io::Error> for CalculusError {
    fn from(e: std::io::Error) -> Self {
        CalculusError::CorruptData(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CalculusError>;
