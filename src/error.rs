use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire optimization module.
pub type Result<T> = std::result::Result<T, OptimErr>;

/// The optimization module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimErr {
    /// A parameter of the layer has no gradient to update it with.
    MissingGradient { name: String },
    /// A gradient names a parameter the layer doesn't have.
    UnknownParameter { name: String },
    /// A parameter and one of its companions (gradient or auxiliary state) disagree in shape.
    ShapeMismatch {
        name: String,
        what: &'static str,
        got: Vec<usize>,
        expected: Vec<usize>,
    },
}

impl Display for OptimErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimErr::MissingGradient { name } => {
                write!(f, "parameter `{name}` has no gradient")
            }
            OptimErr::UnknownParameter { name } => {
                write!(f, "gradient for unknown parameter `{name}`")
            }
            OptimErr::ShapeMismatch {
                name,
                what,
                got,
                expected,
            } => write!(
                f,
                "shape mismatch between parameter `{name}` and its {what}, got {got:?} and expected {expected:?}"
            ),
        }
    }
}

impl Error for OptimErr {}
