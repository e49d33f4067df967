use super::{DEFAULT_SCALE, Initializer, Ranks};
use crate::{
    Result,
    native::{InitializerConfig, InitializerKind},
};

/// Declares an initializer backed by the native ranked overloads.
///
/// Every ranked initializer shares the same four constructors, one per overload, and the same
/// accessors, only the native kind it renders to changes.
macro_rules! ranked_initializer {
    ($(#[$meta:meta])* $name:ident => $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            ranks: Ranks,
        }

        impl $name {
            /// Creates a new initializer with the default scale.
            pub fn new() -> Self {
                Self::with_scale(DEFAULT_SCALE)
            }

            /// # Arguments
            /// * `scale` - The scale value for the generated tensors.
            pub fn with_scale(scale: f64) -> Self {
                Self::from_ranks(Ranks::Scale { scale })
            }

            /// # Arguments
            /// * `scale` - The scale value for the generated tensors.
            /// * `output_rank` - The amount of leading axes that are output axes.
            pub fn with_output_rank(scale: f64, output_rank: i32) -> Self {
                Self::from_ranks(Ranks::OutputRank { scale, output_rank })
            }

            /// # Arguments
            /// * `scale` - The scale value for the generated tensors.
            /// * `output_rank` - The amount of leading axes that are output axes.
            /// * `filter_rank` - The amount of trailing axes that form the receptive field.
            pub fn with_filter_rank(scale: f64, output_rank: i32, filter_rank: i32) -> Self {
                Self::from_ranks(Ranks::FilterRank {
                    scale,
                    output_rank,
                    filter_rank,
                })
            }

            /// # Arguments
            /// * `scale` - The scale value for the generated tensors.
            /// * `output_rank` - The amount of leading axes that are output axes.
            /// * `filter_rank` - The amount of trailing axes that form the receptive field.
            /// * `seed` - Used to seed the random generator.
            pub fn seeded(scale: f64, output_rank: i32, filter_rank: i32, seed: u32) -> Self {
                Self::from_ranks(Ranks::Seeded {
                    scale,
                    output_rank,
                    filter_rank,
                    seed,
                })
            }

            pub fn from_ranks(ranks: Ranks) -> Self {
                Self { ranks }
            }

            pub fn ranks(&self) -> Ranks {
                self.ranks
            }

            pub fn scale(&self) -> f64 {
                self.ranks.scale()
            }

            pub fn output_rank(&self) -> Result<i32> {
                self.ranks.output_rank()
            }

            pub fn filter_rank(&self) -> Result<i32> {
                self.ranks.filter_rank()
            }

            pub fn seed(&self) -> Result<u32> {
                self.ranks.seed()
            }

            pub fn has_output_rank(&self) -> bool {
                self.ranks.has_output_rank()
            }

            pub fn has_filter_rank(&self) -> bool {
                self.ranks.has_filter_rank()
            }

            pub fn has_seed(&self) -> bool {
                self.ranks.has_seed()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Initializer for $name {
            fn to_dictionary(&self) -> InitializerConfig {
                self.ranks.render($kind)
            }
        }
    };
}

ranked_initializer! {
    /// Glorot uniform initializer, also called Xavier uniform initializer.
    ///
    /// Draws samples from a uniform distribution within `[-limit, limit]` where limit is
    /// `scale * sqrt(6 / (fan_in + fan_out))`.
    GlorotUniform => InitializerKind::GlorotUniform
}

ranked_initializer! {
    /// Glorot normal initializer, samples a centered normal distribution with standard deviation
    /// `scale * sqrt(2 / (fan_in + fan_out))`.
    GlorotNormal => InitializerKind::GlorotNormal
}

ranked_initializer! {
    /// He uniform initializer, samples within `scale * sqrt(6 / fan_in)`.
    HeUniform => InitializerKind::HeUniform
}

ranked_initializer! {
    /// He normal initializer, standard deviation `scale * sqrt(2 / fan_in)`.
    HeNormal => InitializerKind::HeNormal
}

ranked_initializer! {
    /// Xavier initializer, samples within `scale * sqrt(3 / fan_in)`.
    Xavier => InitializerKind::Xavier
}

ranked_initializer! {
    /// Centered normal initializer with standard deviation `scale`.
    Normal => InitializerKind::Normal
}
