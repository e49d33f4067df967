use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal, Uniform};

use super::{AUTO_SEED, INFER_RANK, InitializerConfig, InitializerKind};
use crate::{ModelErr, Result};

/// The fan values of a parameter tensor, already multiplied by its receptive field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fans {
    fan_in: usize,
    fan_out: usize,
}

impl Fans {
    /// Splits `shape` into output axes (the leading `output_rank`), filter axes (the trailing
    /// `filter_rank`) and input axes (whatever remains in between).
    fn of(shape: &[usize], output_rank: usize, filter_rank: usize) -> Result<Self> {
        let rank = shape.len();

        if output_rank + filter_rank > rank {
            return Err(ModelErr::InvalidRank {
                output_rank,
                filter_rank,
                shape_rank: rank,
            });
        }

        let receptive: usize = shape[rank - filter_rank..].iter().product();
        let fan_out: usize = shape[..output_rank].iter().product();
        let fan_in: usize = shape[output_rank..rank - filter_rank].iter().product();

        Ok(Self {
            fan_in: fan_in * receptive,
            fan_out: fan_out * receptive,
        })
    }
}

fn resolve_rank(rank: i32, inferred: usize) -> Result<usize> {
    if rank == INFER_RANK {
        return Ok(inferred);
    }

    usize::try_from(rank).map_err(|_| ModelErr::InvalidConfig(format!("negative rank {rank}")))
}

fn sample<R: Rng, D: Distribution<f32>>(rng: &mut R, distribution: D, n: usize) -> Vec<f32> {
    (0..n).map(|_| distribution.sample(rng)).collect()
}

fn sample_uniform<R: Rng>(rng: &mut R, limit: f32, n: usize) -> Result<Vec<f32>> {
    Ok(sample(rng, Uniform::new_inclusive(-limit, limit)?, n))
}

fn sample_normal<R: Rng>(rng: &mut R, std_dev: f32, n: usize) -> Result<Vec<f32>> {
    Ok(sample(rng, Normal::new(0., std_dev)?, n))
}

/// Samples a normal distribution re-drawing every value outside of two standard deviations.
fn sample_truncated_normal<R: Rng>(rng: &mut R, std_dev: f32, n: usize) -> Result<Vec<f32>> {
    if std_dev == 0. {
        return Ok(vec![0.; n]);
    }

    let normal = Normal::new(0., std_dev)?;
    let bound = 2. * std_dev;

    let sample = (0..n)
        .map(|_| loop {
            let x: f32 = normal.sample(rng);
            if x.abs() <= bound {
                break x;
            }
        })
        .collect();

    Ok(sample)
}

impl InitializerConfig {
    /// Materializes the initial values of a parameter of the given `shape`.
    ///
    /// Inferred ranks default to an output rank of 1 and a filter rank of 0.
    ///
    /// # Arguments
    /// * `shape` - The dimensions of the parameter tensor, output axes first.
    ///
    /// # Returns
    /// The row-major values or an error if the shape and the configured ranks disagree.
    pub fn generate(&self, shape: &[usize]) -> Result<Vec<f32>> {
        if shape.is_empty() || shape.contains(&0) {
            return Err(ModelErr::InvalidShape(shape.to_vec()));
        }

        let n: usize = shape.iter().product();
        let s = self.scale() as f32;

        let mut rng = match self.seed() {
            AUTO_SEED => StdRng::from_os_rng(),
            seed => StdRng::seed_from_u64(seed),
        };

        let fans = || {
            let output_rank = resolve_rank(self.output_rank(), 1)?;
            let filter_rank = resolve_rank(self.filter_rank(), 0)?;
            Fans::of(shape, output_rank, filter_rank)
        };

        debug!(kind:? = self.kind(), params = n; "generating initial values");

        match self.kind() {
            InitializerKind::Constant => Ok(vec![s; n]),
            InitializerKind::Uniform => sample_uniform(&mut rng, s, n),
            InitializerKind::Normal => sample_normal(&mut rng, s, n),
            InitializerKind::TruncatedNormal => sample_truncated_normal(&mut rng, s, n),
            InitializerKind::GlorotUniform => {
                let Fans { fan_in, fan_out } = fans()?;
                let limit = s * (6. / (fan_in + fan_out) as f32).sqrt();
                sample_uniform(&mut rng, limit, n)
            }
            InitializerKind::GlorotNormal => {
                let Fans { fan_in, fan_out } = fans()?;
                let std_dev = s * (2. / (fan_in + fan_out) as f32).sqrt();
                sample_normal(&mut rng, std_dev, n)
            }
            InitializerKind::HeUniform => {
                let Fans { fan_in, .. } = fans()?;
                let limit = s * (6. / fan_in as f32).sqrt();
                sample_uniform(&mut rng, limit, n)
            }
            InitializerKind::HeNormal => {
                let Fans { fan_in, .. } = fans()?;
                let std_dev = s * (2. / fan_in as f32).sqrt();
                sample_normal(&mut rng, std_dev, n)
            }
            InitializerKind::Xavier => {
                let Fans { fan_in, .. } = fans()?;
                let limit = s * (3. / fan_in as f32).sqrt();
                sample_uniform(&mut rng, limit, n)
            }
        }
    }
}
