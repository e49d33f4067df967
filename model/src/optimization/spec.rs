use serde::{Deserialize, Serialize};

use super::{AdaGrad, Adam, MomentumSgd, Optimizer, RmsProp, Sgd};
use crate::{ModelErr, Result, regularization::Regularizer};

fn default_momentum() -> f64 {
    MomentumSgd::DEFAULT_MOMENTUM
}

fn default_beta1() -> f64 {
    Adam::DEFAULT_BETA1
}

fn default_beta2() -> f64 {
    Adam::DEFAULT_BETA2
}

fn default_epsilon() -> f64 {
    Adam::DEFAULT_EPSILON
}

fn default_decay() -> f64 {
    RmsProp::DEFAULT_DECAY
}

/// A serializable description of an optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerSpec {
    Sgd {
        learning_rate: f64,
        #[serde(default)]
        regularizer: Option<Regularizer>,
    },
    MomentumSgd {
        learning_rate: f64,
        #[serde(default = "default_momentum")]
        momentum: f64,
        #[serde(default)]
        regularizer: Option<Regularizer>,
    },
    Adam {
        learning_rate: f64,
        #[serde(default = "default_beta1")]
        beta1: f64,
        #[serde(default = "default_beta2")]
        beta2: f64,
        #[serde(default = "default_epsilon")]
        epsilon: f64,
        #[serde(default)]
        regularizer: Option<Regularizer>,
    },
    #[serde(rename = "adagrad")]
    AdaGrad {
        learning_rate: f64,
        #[serde(default = "default_epsilon")]
        epsilon: f64,
        #[serde(default)]
        regularizer: Option<Regularizer>,
    },
    RmsProp {
        learning_rate: f64,
        #[serde(default = "default_decay")]
        decay: f64,
        #[serde(default = "default_epsilon")]
        epsilon: f64,
        #[serde(default)]
        regularizer: Option<Regularizer>,
    },
}

impl OptimizerSpec {
    pub fn learning_rate(&self) -> f64 {
        match *self {
            Self::Sgd { learning_rate, .. }
            | Self::MomentumSgd { learning_rate, .. }
            | Self::Adam { learning_rate, .. }
            | Self::AdaGrad { learning_rate, .. }
            | Self::RmsProp { learning_rate, .. } => learning_rate,
        }
    }

    pub fn regularizer(&self) -> Option<Regularizer> {
        match *self {
            Self::Sgd { regularizer, .. }
            | Self::MomentumSgd { regularizer, .. }
            | Self::Adam { regularizer, .. }
            | Self::AdaGrad { regularizer, .. }
            | Self::RmsProp { regularizer, .. } => regularizer,
        }
    }

    /// Builds the optimizer this spec describes.
    ///
    /// # Returns
    /// An error if the learning rate isn't a finite positive number.
    pub fn build(&self) -> Result<Box<dyn Optimizer>> {
        let lr = self.learning_rate();
        if !lr.is_finite() || lr <= 0. {
            return Err(ModelErr::InvalidConfig(format!(
                "learning rate must be finite and positive, got {lr}"
            )));
        }

        let optimizer: Box<dyn Optimizer> = match *self {
            Self::Sgd { learning_rate, .. } => Box::new(Self::regularized(
                Sgd::new(learning_rate),
                self.regularizer(),
                Sgd::with_regularizer,
            )),
            Self::MomentumSgd {
                learning_rate,
                momentum,
                ..
            } => Box::new(Self::regularized(
                MomentumSgd::with_momentum(learning_rate, momentum),
                self.regularizer(),
                MomentumSgd::with_regularizer,
            )),
            Self::Adam {
                learning_rate,
                beta1,
                beta2,
                epsilon,
                ..
            } => Box::new(Self::regularized(
                Adam::with_hyperparameters(learning_rate, beta1, beta2, epsilon),
                self.regularizer(),
                Adam::with_regularizer,
            )),
            Self::AdaGrad {
                learning_rate,
                epsilon,
                ..
            } => Box::new(Self::regularized(
                AdaGrad::with_epsilon(learning_rate, epsilon),
                self.regularizer(),
                AdaGrad::with_regularizer,
            )),
            Self::RmsProp {
                learning_rate,
                decay,
                epsilon,
                ..
            } => Box::new(Self::regularized(
                RmsProp::with_decay(learning_rate, decay, epsilon),
                self.regularizer(),
                RmsProp::with_regularizer,
            )),
        };

        Ok(optimizer)
    }

    fn regularized<O, F>(optimizer: O, regularizer: Option<Regularizer>, with: F) -> O
    where
        F: FnOnce(O, Regularizer) -> O,
    {
        match regularizer {
            Some(regularizer) => with(optimizer, regularizer),
            None => optimizer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::LearningOptions;

    #[test]
    fn parse_with_defaults() {
        let json = r#"{ "adam": { "learning_rate": 0.001 } }"#;
        let spec: OptimizerSpec = serde_json::from_str(json).unwrap();

        assert_eq!(
            spec,
            OptimizerSpec::Adam {
                learning_rate: 0.001,
                beta1: 0.9,
                beta2: 0.999,
                epsilon: 1e-8,
                regularizer: None,
            }
        );

        let optimizer = spec.build().unwrap();
        assert_eq!(optimizer.learning_rate(), 0.001);
        assert_eq!(
            optimizer.additional_learning_options(),
            LearningOptions::default()
        );
    }

    #[test]
    fn regularizer_reaches_optimizer() {
        let json = r#"{ "adagrad": { "learning_rate": 0.1, "regularizer": { "l1": { "weight": 0.01 } } } }"#;
        let optimizer = serde_json::from_str::<OptimizerSpec>(json)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(optimizer.regularizer(), Some(&Regularizer::l1(0.01)));
        assert_eq!(
            optimizer
                .additional_learning_options()
                .l1_regularization_weight,
            0.01
        );
    }

    #[test]
    fn invalid_learning_rate() {
        for learning_rate in [0., -1., f64::NAN, f64::INFINITY] {
            let spec = OptimizerSpec::Sgd {
                learning_rate,
                regularizer: None,
            };
            assert!(matches!(spec.build(), Err(ModelErr::InvalidConfig(_))));
        }
    }
}
