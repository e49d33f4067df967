use crate::{
    Result,
    native::{Function, Learner, LearningOptions},
    regularization::Regularizer,
};

/// The options every optimizer shares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerOptions {
    pub learning_rate: f64,
    pub regularizer: Option<Regularizer>,
}

impl OptimizerOptions {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            regularizer: None,
        }
    }

    pub fn with_regularizer(self, regularizer: Regularizer) -> Self {
        Self {
            regularizer: Some(regularizer),
            ..self
        }
    }

    /// # Returns
    /// The regularizer's learning options, or the empty default when there's no regularizer.
    pub fn additional_learning_options(&self) -> LearningOptions {
        self.regularizer
            .as_ref()
            .map(Regularizer::additional_learning_options)
            .unwrap_or_default()
    }
}

/// Defines the strategy for updating model parameters, rendered into a native learner when the
/// model is compiled.
pub trait Optimizer: std::fmt::Debug {
    fn options(&self) -> &OptimizerOptions;

    fn learning_rate(&self) -> f64 {
        self.options().learning_rate
    }

    fn regularizer(&self) -> Option<&Regularizer> {
        self.options().regularizer.as_ref()
    }

    fn additional_learning_options(&self) -> LearningOptions {
        self.options().additional_learning_options()
    }

    /// Builds a learner bound to the parameters of `model`.
    ///
    /// # Arguments
    /// * `model` - The compiled function to train.
    ///
    /// # Returns
    /// The native learner or an error if it can't be built for `model`.
    fn to_learner(&self, model: &Function) -> Result<Box<dyn Learner>>;
}
