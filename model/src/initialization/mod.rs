mod constant;
mod random;
mod ranked;
mod ranks;
mod spec;

pub use constant::Constant;
pub use random::{TruncatedNormal, Uniform};
pub use ranked::{GlorotNormal, GlorotUniform, HeNormal, HeUniform, Normal, Xavier};
pub use ranks::{DEFAULT_SCALE, Ranks};
pub use spec::{InitializerSpec, RanksSpec};

use std::fmt::Debug;

use crate::native::InitializerConfig;

/// Defines how the initial values of a model parameter are generated.
pub trait Initializer: Debug {
    /// Renders this initializer into the native backend's initializer configuration.
    fn to_dictionary(&self) -> InitializerConfig;
}
