use std::iter;

use super::{UpdateRule, descend};
use crate::Result;

/// Plain stochastic gradient descent.
#[derive(Debug)]
pub struct Sgd {
    learning_rate: f32,
}

impl Sgd {
    /// Creates a new `Sgd` update rule.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl UpdateRule for Sgd {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        let lr = self.learning_rate;
        descend(grad, params, iter::repeat(()), |g, ()| lr * g)
    }
}
