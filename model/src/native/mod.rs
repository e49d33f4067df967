//! The boundary to the native backend.
//!
//! Model configuration objects render into the types of this module: initializers into an
//! `InitializerConfig` dictionary, optimizers into a `Learner` bound to a compiled `Function`.

mod dictionary;
mod function;
mod generate;
mod learner;
pub mod rules;

pub use dictionary::{
    AUTO_SEED, INFER_RANK, InitializerConfig, InitializerKind, constant_initializer,
    ranked_initializer, ranked_initializer_seeded, ranked_initializer_with_filter_rank,
    ranked_initializer_with_output_rank, truncated_normal_initializer,
    truncated_normal_initializer_seeded, uniform_initializer, uniform_initializer_seeded,
};
pub use function::{Function, Parameter};
pub use learner::{Learner, LearningOptions, NativeLearner};
