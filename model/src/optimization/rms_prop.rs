use super::{Optimizer, OptimizerOptions};
use crate::{
    Result,
    native::{Function, Learner, NativeLearner, rules},
    regularization::Regularizer,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmsProp {
    options: OptimizerOptions,
    decay: f64,
    epsilon: f64,
}

impl RmsProp {
    pub const DEFAULT_DECAY: f64 = 0.9;
    pub const DEFAULT_EPSILON: f64 = 1e-8;

    pub fn new(learning_rate: f64) -> Self {
        Self::with_decay(learning_rate, Self::DEFAULT_DECAY, Self::DEFAULT_EPSILON)
    }

    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `decay` - The decay of the running average of squared gradients.
    /// * `epsilon` - Added to the denominator to avoid dividing by zero.
    pub fn with_decay(learning_rate: f64, decay: f64, epsilon: f64) -> Self {
        Self {
            options: OptimizerOptions::new(learning_rate),
            decay,
            epsilon,
        }
    }

    pub fn with_regularizer(self, regularizer: Regularizer) -> Self {
        Self {
            options: self.options.with_regularizer(regularizer),
            ..self
        }
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Optimizer for RmsProp {
    fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    fn to_learner(&self, model: &Function) -> Result<Box<dyn Learner>> {
        let lr = self.learning_rate();
        let (decay, eps) = (self.decay as f32, self.epsilon as f32);
        let learner = NativeLearner::new(model, lr, self.additional_learning_options(), |len| {
            rules::RmsProp::new(len, lr as f32, decay, eps)
        });

        Ok(Box::new(learner))
    }
}
