use super::{Optimizer, OptimizerOptions};
use crate::{
    Result,
    native::{Function, Learner, NativeLearner, rules},
    regularization::Regularizer,
};

/// Stochastic gradient descent with a velocity term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumSgd {
    options: OptimizerOptions,
    momentum: f64,
}

impl MomentumSgd {
    pub const DEFAULT_MOMENTUM: f64 = 0.9;

    pub fn new(learning_rate: f64) -> Self {
        Self::with_momentum(learning_rate, Self::DEFAULT_MOMENTUM)
    }

    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `momentum` - The fraction of the previous velocity kept on every step.
    pub fn with_momentum(learning_rate: f64, momentum: f64) -> Self {
        Self {
            options: OptimizerOptions::new(learning_rate),
            momentum,
        }
    }

    pub fn with_regularizer(self, regularizer: Regularizer) -> Self {
        Self {
            options: self.options.with_regularizer(regularizer),
            ..self
        }
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }
}

impl Optimizer for MomentumSgd {
    fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    fn to_learner(&self, model: &Function) -> Result<Box<dyn Learner>> {
        let lr = self.learning_rate();
        let momentum = self.momentum as f32;
        let learner = NativeLearner::new(model, lr, self.additional_learning_options(), |len| {
            rules::MomentumSgd::new(len, lr as f32, momentum)
        });

        Ok(Box::new(learner))
    }
}
