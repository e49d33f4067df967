use serde::{Deserialize, Serialize};

use crate::Result;

/// Sentinel the backend uses for a rank it should infer from the parameter's shape.
pub const INFER_RANK: i32 = i32::MAX;

/// Sentinel the backend uses for a seed it should pick on its own.
pub const AUTO_SEED: u64 = u64::MAX;

/// The random (or constant) scheme a native initializer samples with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitializerKind {
    Constant,
    Uniform,
    Normal,
    TruncatedNormal,
    GlorotUniform,
    GlorotNormal,
    HeUniform,
    HeNormal,
    Xavier,
}

/// The backend's configuration dictionary for an initializer.
///
/// Values that were not given to the native constructor hold the backend sentinels
/// (`INFER_RANK`, `AUTO_SEED`), exactly as the backend fills its own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitializerConfig {
    kind: InitializerKind,
    scale: f64,
    output_rank: i32,
    filter_rank: i32,
    seed: u64,
}

impl InitializerConfig {
    fn new(kind: InitializerKind, scale: f64) -> Self {
        Self {
            kind,
            scale,
            output_rank: INFER_RANK,
            filter_rank: INFER_RANK,
            seed: AUTO_SEED,
        }
    }

    pub fn kind(&self) -> InitializerKind {
        self.kind
    }

    /// The scale of the distribution, or the value itself for constant initializers.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn output_rank(&self) -> i32 {
        self.output_rank
    }

    pub fn filter_rank(&self) -> i32 {
        self.filter_rank
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Serializes the dictionary the way it is handed over to the backend.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Native constant initializer.
pub fn constant_initializer(value: f64) -> InitializerConfig {
    InitializerConfig::new(InitializerKind::Constant, value)
}

/// Native uniform initializer, samples within `[-scale, scale]`.
pub fn uniform_initializer(scale: f64) -> InitializerConfig {
    InitializerConfig::new(InitializerKind::Uniform, scale)
}

pub fn uniform_initializer_seeded(scale: f64, seed: u64) -> InitializerConfig {
    InitializerConfig {
        seed,
        ..uniform_initializer(scale)
    }
}

/// Native truncated normal initializer, standard deviation `scale` cut at two deviations.
pub fn truncated_normal_initializer(scale: f64) -> InitializerConfig {
    InitializerConfig::new(InitializerKind::TruncatedNormal, scale)
}

pub fn truncated_normal_initializer_seeded(scale: f64, seed: u64) -> InitializerConfig {
    InitializerConfig {
        seed,
        ..truncated_normal_initializer(scale)
    }
}

/// Scale-only overload of the native ranked initializers.
pub fn ranked_initializer(kind: InitializerKind, scale: f64) -> InitializerConfig {
    InitializerConfig::new(kind, scale)
}

/// Scale and output rank overload of the native ranked initializers.
pub fn ranked_initializer_with_output_rank(
    kind: InitializerKind,
    scale: f64,
    output_rank: i32,
) -> InitializerConfig {
    InitializerConfig {
        output_rank,
        ..ranked_initializer(kind, scale)
    }
}

/// Scale, output rank and filter rank overload of the native ranked initializers.
pub fn ranked_initializer_with_filter_rank(
    kind: InitializerKind,
    scale: f64,
    output_rank: i32,
    filter_rank: i32,
) -> InitializerConfig {
    InitializerConfig {
        filter_rank,
        ..ranked_initializer_with_output_rank(kind, scale, output_rank)
    }
}

/// Full overload of the native ranked initializers.
pub fn ranked_initializer_seeded(
    kind: InitializerKind,
    scale: f64,
    output_rank: i32,
    filter_rank: i32,
    seed: u64,
) -> InitializerConfig {
    InitializerConfig {
        seed,
        ..ranked_initializer_with_filter_rank(kind, scale, output_rank, filter_rank)
    }
}
