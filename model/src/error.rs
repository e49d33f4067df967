use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use rand_distr::{NormalError, uniform::Error as UniformError};

/// The result type used in the entire model module.
pub type Result<T> = std::result::Result<T, ModelErr>;

/// The model module's error type.
#[derive(Debug)]
pub enum ModelErr {
    /// An optional initializer option was read before being set.
    OptionNotSet {
        option: &'static str,
    },
    InvalidConfig(String),
    InvalidRank {
        output_rank: usize,
        filter_rank: usize,
        shape_rank: usize,
    },
    InvalidShape(Vec<usize>),
    InvalidDistribution(String),
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    DuplicateParameter(String),
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for ModelErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelErr::OptionNotSet { option } => {
                write!(f, "the {option} option was not set, check for its presence first")
            }
            ModelErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            ModelErr::InvalidRank {
                output_rank,
                filter_rank,
                shape_rank,
            } => write!(
                f,
                "output rank {output_rank} plus filter rank {filter_rank} exceeds the shape's rank {shape_rank}"
            ),
            ModelErr::InvalidShape(shape) => write!(f, "invalid parameter shape {shape:?}"),
            ModelErr::InvalidDistribution(msg) => write!(f, "invalid distribution: {msg}"),
            ModelErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "size mismatch in {what}: got {got}, expected {expected}"),
            ModelErr::DuplicateParameter(name) => {
                write!(f, "the function already has a parameter named '{name}'")
            }
            ModelErr::Io(e) => write!(f, "io error: {e}"),
            ModelErr::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl Error for ModelErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelErr::Io(e) => Some(e),
            ModelErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ModelErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ModelErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<NormalError> for ModelErr {
    fn from(value: NormalError) -> Self {
        Self::InvalidDistribution(value.to_string())
    }
}

impl From<UniformError> for ModelErr {
    fn from(value: UniformError) -> Self {
        Self::InvalidDistribution(value.to_string())
    }
}
