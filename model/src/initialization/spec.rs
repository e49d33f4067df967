use serde::{Deserialize, Serialize};

use super::{
    Constant, DEFAULT_SCALE, GlorotNormal, GlorotUniform, HeNormal, HeUniform, Initializer,
    Normal, Ranks, TruncatedNormal, Uniform, Xavier,
};
use crate::Result;

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

/// The options of a ranked initializer as they are written in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RanksSpec {
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub output_rank: Option<i32>,
    #[serde(default)]
    pub filter_rank: Option<i32>,
    #[serde(default)]
    pub seed: Option<u32>,
}

impl Default for RanksSpec {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            output_rank: None,
            filter_rank: None,
            seed: None,
        }
    }
}

impl RanksSpec {
    pub fn to_ranks(&self) -> Result<Ranks> {
        Ranks::from_options(self.scale, self.output_rank, self.filter_rank, self.seed)
    }
}

/// A serializable description of an initializer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitializerSpec {
    Constant {
        value: f64,
    },
    Zeros,
    Ones,
    Uniform {
        #[serde(default = "default_scale")]
        scale: f64,
        #[serde(default)]
        seed: Option<u32>,
    },
    TruncatedNormal {
        #[serde(default = "default_scale")]
        scale: f64,
        #[serde(default)]
        seed: Option<u32>,
    },
    Normal(RanksSpec),
    GlorotUniform(RanksSpec),
    GlorotNormal(RanksSpec),
    HeUniform(RanksSpec),
    HeNormal(RanksSpec),
    Xavier(RanksSpec),
}

impl InitializerSpec {
    /// Builds the initializer this spec describes.
    ///
    /// # Returns
    /// An error if a ranked initializer is given an option without the ones it depends on.
    pub fn build(&self) -> Result<Box<dyn Initializer>> {
        let init: Box<dyn Initializer> = match *self {
            Self::Constant { value } => Box::new(Constant::new(value)),
            Self::Zeros => Box::new(Constant::zeros()),
            Self::Ones => Box::new(Constant::ones()),
            Self::Uniform { scale, seed } => Box::new(match seed {
                Some(seed) => Uniform::seeded(scale, seed),
                None => Uniform::new(scale),
            }),
            Self::TruncatedNormal { scale, seed } => Box::new(match seed {
                Some(seed) => TruncatedNormal::seeded(scale, seed),
                None => TruncatedNormal::new(scale),
            }),
            Self::Normal(spec) => Box::new(Normal::from_ranks(spec.to_ranks()?)),
            Self::GlorotUniform(spec) => Box::new(GlorotUniform::from_ranks(spec.to_ranks()?)),
            Self::GlorotNormal(spec) => Box::new(GlorotNormal::from_ranks(spec.to_ranks()?)),
            Self::HeUniform(spec) => Box::new(HeUniform::from_ranks(spec.to_ranks()?)),
            Self::HeNormal(spec) => Box::new(HeNormal::from_ranks(spec.to_ranks()?)),
            Self::Xavier(spec) => Box::new(Xavier::from_ranks(spec.to_ranks()?)),
        };

        Ok(init)
    }
}
