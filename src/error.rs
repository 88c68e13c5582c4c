use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// A zero-length separation was hit at `index` (0 means target on the head).
    #[error("degenerate input at joint {index}: zero-length direction")]
    DegenerateInput { index: usize },
}

impl ResolveError {
    pub(crate) fn at(index: usize) -> impl Fn(MathError) -> ResolveError {
        move |_| ResolveError::DegenerateInput { index }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineError {
    #[error("at least 2 points are required, got {0}")]
    TooFewPoints(usize),
}
