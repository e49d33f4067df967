use super::{DEFAULT_SCALE, Initializer};
use crate::{
    ModelErr, Result,
    native::{
        InitializerConfig, truncated_normal_initializer, truncated_normal_initializer_seeded,
        uniform_initializer, uniform_initializer_seeded,
    },
};

fn seed_of(seed: Option<u32>) -> Result<u32> {
    seed.ok_or(ModelErr::OptionNotSet { option: "seed" })
}

/// Samples uniformly within `[-scale, scale]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    scale: f64,
    seed: Option<u32>,
}

impl Uniform {
    pub fn new(scale: f64) -> Self {
        Self { scale, seed: None }
    }

    pub fn seeded(scale: f64, seed: u32) -> Self {
        Self {
            scale,
            seed: Some(seed),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn seed(&self) -> Result<u32> {
        seed_of(self.seed)
    }

    pub fn has_seed(&self) -> bool {
        self.seed.is_some()
    }
}

impl Default for Uniform {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE)
    }
}

impl Initializer for Uniform {
    fn to_dictionary(&self) -> InitializerConfig {
        match self.seed {
            Some(seed) => uniform_initializer_seeded(self.scale, seed as u64),
            None => uniform_initializer(self.scale),
        }
    }
}

/// Samples a centered normal distribution with standard deviation `scale`, redrawing every
/// value that falls further than two standard deviations away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncatedNormal {
    scale: f64,
    seed: Option<u32>,
}

impl TruncatedNormal {
    pub fn new(scale: f64) -> Self {
        Self { scale, seed: None }
    }

    pub fn seeded(scale: f64, seed: u32) -> Self {
        Self {
            scale,
            seed: Some(seed),
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn seed(&self) -> Result<u32> {
        seed_of(self.seed)
    }

    pub fn has_seed(&self) -> bool {
        self.seed.is_some()
    }
}

impl Default for TruncatedNormal {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE)
    }
}

impl Initializer for TruncatedNormal {
    fn to_dictionary(&self) -> InitializerConfig {
        match self.seed {
            Some(seed) => truncated_normal_initializer_seeded(self.scale, seed as u64),
            None => truncated_normal_initializer(self.scale),
        }
    }
}
