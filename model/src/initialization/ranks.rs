use crate::{
    ModelErr, Result,
    native::{
        InitializerConfig, InitializerKind, ranked_initializer, ranked_initializer_seeded,
        ranked_initializer_with_filter_rank, ranked_initializer_with_output_rank,
    },
};

/// The scale used by the parameterless constructors.
pub const DEFAULT_SCALE: f64 = 0.01;

/// The options of a ranked initializer.
///
/// Each variant is one of the native overloads, from least to most specific, so a seed can only
/// be given alongside both ranks and a filter rank only alongside an output rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ranks {
    Scale {
        scale: f64,
    },
    OutputRank {
        scale: f64,
        output_rank: i32,
    },
    FilterRank {
        scale: f64,
        output_rank: i32,
        filter_rank: i32,
    },
    Seeded {
        scale: f64,
        output_rank: i32,
        filter_rank: i32,
        seed: u32,
    },
}

impl Ranks {
    /// Picks the most specific variant whose options are all present.
    ///
    /// # Returns
    /// An error if an option is given without the ones it depends on.
    pub fn from_options(
        scale: f64,
        output_rank: Option<i32>,
        filter_rank: Option<i32>,
        seed: Option<u32>,
    ) -> Result<Self> {
        match (output_rank, filter_rank, seed) {
            (None, None, None) => Ok(Self::Scale { scale }),
            (Some(output_rank), None, None) => Ok(Self::OutputRank { scale, output_rank }),
            (Some(output_rank), Some(filter_rank), None) => Ok(Self::FilterRank {
                scale,
                output_rank,
                filter_rank,
            }),
            (Some(output_rank), Some(filter_rank), Some(seed)) => Ok(Self::Seeded {
                scale,
                output_rank,
                filter_rank,
                seed,
            }),
            (None, Some(_), _) => Err(ModelErr::InvalidConfig(
                "a filter rank requires an output rank".into(),
            )),
            (_, None, Some(_)) => Err(ModelErr::InvalidConfig(
                "a seed requires both an output rank and a filter rank".into(),
            )),
        }
    }

    pub fn scale(&self) -> f64 {
        match *self {
            Self::Scale { scale }
            | Self::OutputRank { scale, .. }
            | Self::FilterRank { scale, .. }
            | Self::Seeded { scale, .. } => scale,
        }
    }

    /// # Returns
    /// The output rank or `ModelErr::OptionNotSet` if it was never given.
    pub fn output_rank(&self) -> Result<i32> {
        match *self {
            Self::Scale { .. } => Err(ModelErr::OptionNotSet {
                option: "output rank",
            }),
            Self::OutputRank { output_rank, .. }
            | Self::FilterRank { output_rank, .. }
            | Self::Seeded { output_rank, .. } => Ok(output_rank),
        }
    }

    /// # Returns
    /// The filter rank or `ModelErr::OptionNotSet` if it was never given.
    pub fn filter_rank(&self) -> Result<i32> {
        match *self {
            Self::Scale { .. } | Self::OutputRank { .. } => Err(ModelErr::OptionNotSet {
                option: "filter rank",
            }),
            Self::FilterRank { filter_rank, .. } | Self::Seeded { filter_rank, .. } => {
                Ok(filter_rank)
            }
        }
    }

    /// # Returns
    /// The seed or `ModelErr::OptionNotSet` if it was never given.
    pub fn seed(&self) -> Result<u32> {
        match *self {
            Self::Seeded { seed, .. } => Ok(seed),
            _ => Err(ModelErr::OptionNotSet { option: "seed" }),
        }
    }

    pub fn has_output_rank(&self) -> bool {
        self.output_rank().is_ok()
    }

    pub fn has_filter_rank(&self) -> bool {
        self.filter_rank().is_ok()
    }

    pub fn has_seed(&self) -> bool {
        self.seed().is_ok()
    }

    /// Renders these options with the native overload that matches them.
    pub fn render(&self, kind: InitializerKind) -> InitializerConfig {
        match *self {
            Self::Seeded {
                scale,
                output_rank,
                filter_rank,
                seed,
            } => ranked_initializer_seeded(kind, scale, output_rank, filter_rank, seed as u64),
            Self::FilterRank {
                scale,
                output_rank,
                filter_rank,
            } => ranked_initializer_with_filter_rank(kind, scale, output_rank, filter_rank),
            Self::OutputRank { scale, output_rank } => {
                ranked_initializer_with_output_rank(kind, scale, output_rank)
            }
            Self::Scale { scale } => ranked_initializer(kind, scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{AUTO_SEED, INFER_RANK};

    #[test]
    fn from_options_is_graduated() {
        assert_eq!(
            Ranks::from_options(1., None, None, None).unwrap(),
            Ranks::Scale { scale: 1. }
        );
        assert_eq!(
            Ranks::from_options(1., Some(2), None, None).unwrap(),
            Ranks::OutputRank {
                scale: 1.,
                output_rank: 2
            }
        );
        assert!(matches!(
            Ranks::from_options(1., Some(2), Some(1), None).unwrap(),
            Ranks::FilterRank { .. }
        ));
        assert!(matches!(
            Ranks::from_options(1., Some(2), Some(1), Some(3)).unwrap(),
            Ranks::Seeded { seed: 3, .. }
        ));
    }

    #[test]
    fn from_options_rejects_orphans() {
        assert!(Ranks::from_options(1., None, Some(1), None).is_err());
        assert!(Ranks::from_options(1., Some(1), None, Some(1)).is_err());
        assert!(Ranks::from_options(1., None, None, Some(1)).is_err());
    }

    #[test]
    fn render_output_rank_only() {
        let ranks = Ranks::OutputRank {
            scale: 2.,
            output_rank: 1,
        };
        let config = ranks.render(InitializerKind::GlorotUniform);

        assert_eq!(config.output_rank(), 1);
        assert_eq!(config.filter_rank(), INFER_RANK);
        assert_eq!(config.seed(), AUTO_SEED);
    }
}
