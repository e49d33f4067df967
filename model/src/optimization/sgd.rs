use super::{Optimizer, OptimizerOptions};
use crate::{
    Result,
    native::{Function, Learner, NativeLearner, rules},
    regularization::Regularizer,
};

/// Plain stochastic gradient descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    options: OptimizerOptions,
}

impl Sgd {
    /// Creates a new `Sgd` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    pub fn new(learning_rate: f64) -> Self {
        Self {
            options: OptimizerOptions::new(learning_rate),
        }
    }

    pub fn with_regularizer(self, regularizer: Regularizer) -> Self {
        Self {
            options: self.options.with_regularizer(regularizer),
        }
    }
}

impl Optimizer for Sgd {
    fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    fn to_learner(&self, model: &Function) -> Result<Box<dyn Learner>> {
        let lr = self.learning_rate();
        let learner = NativeLearner::new(model, lr, self.additional_learning_options(), |_| {
            rules::Sgd::new(lr as f32)
        });

        Ok(Box::new(learner))
    }
}
