use super::{Optimizer, OptimizerOptions};
use crate::{
    Result,
    native::{Function, Learner, NativeLearner, rules},
    regularization::Regularizer,
};

/// Scales every parameter's step by the inverse root of its accumulated squared gradients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaGrad {
    options: OptimizerOptions,
    epsilon: f64,
}

impl AdaGrad {
    pub const DEFAULT_EPSILON: f64 = 1e-8;

    pub fn new(learning_rate: f64) -> Self {
        Self::with_epsilon(learning_rate, Self::DEFAULT_EPSILON)
    }

    pub fn with_epsilon(learning_rate: f64, epsilon: f64) -> Self {
        Self {
            options: OptimizerOptions::new(learning_rate),
            epsilon,
        }
    }

    pub fn with_regularizer(self, regularizer: Regularizer) -> Self {
        Self {
            options: self.options.with_regularizer(regularizer),
            ..self
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Optimizer for AdaGrad {
    fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    fn to_learner(&self, model: &Function) -> Result<Box<dyn Learner>> {
        let lr = self.learning_rate();
        let eps = self.epsilon as f32;
        let learner = NativeLearner::new(model, lr, self.additional_learning_options(), |len| {
            rules::AdaGrad::new(len, lr as f32, eps)
        });

        Ok(Box::new(learner))
    }
}
