use super::{Optimizer, OptimizerOptions};
use crate::{
    Result,
    native::{Function, Learner, NativeLearner, rules},
    regularization::Regularizer,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adam {
    options: OptimizerOptions,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
}

impl Adam {
    pub const DEFAULT_BETA1: f64 = 0.9;
    pub const DEFAULT_BETA2: f64 = 0.999;
    pub const DEFAULT_EPSILON: f64 = 1e-8;

    pub fn new(learning_rate: f64) -> Self {
        Self::with_hyperparameters(
            learning_rate,
            Self::DEFAULT_BETA1,
            Self::DEFAULT_BETA2,
            Self::DEFAULT_EPSILON,
        )
    }

    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `beta1`, `beta2`, `epsilon` - Hyperparameters to the optimization algorithm.
    pub fn with_hyperparameters(learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64) -> Self {
        Self {
            options: OptimizerOptions::new(learning_rate),
            beta1,
            beta2,
            epsilon,
        }
    }

    pub fn with_regularizer(self, regularizer: Regularizer) -> Self {
        Self {
            options: self.options.with_regularizer(regularizer),
            ..self
        }
    }

    pub fn beta1(&self) -> f64 {
        self.beta1
    }

    pub fn beta2(&self) -> f64 {
        self.beta2
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Optimizer for Adam {
    fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    fn to_learner(&self, model: &Function) -> Result<Box<dyn Learner>> {
        let lr = self.learning_rate() as f32;
        let (b1, b2, eps) = (self.beta1 as f32, self.beta2 as f32, self.epsilon as f32);
        let learner = NativeLearner::new(
            model,
            self.learning_rate(),
            self.additional_learning_options(),
            |len| rules::Adam::new(len, lr, b1, b2, eps),
        );

        Ok(Box::new(learner))
    }
}
