use super::{UpdateRule, check_state, descend};
use crate::Result;

/// Scales every step by the inverse root of the accumulated squared gradients.
#[derive(Debug)]
pub struct AdaGrad {
    learning_rate: f32,
    epsilon: f32,
    acc: Box<[f32]>,
}

impl AdaGrad {
    /// Creates a new `AdaGrad` update rule.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `epsilon` - Keeps the denominator away from zero.
    pub fn new(len: usize, learning_rate: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            epsilon,
            acc: vec![0.; len].into_boxed_slice(),
        }
    }
}

impl UpdateRule for AdaGrad {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        check_state(grad, self.acc.len())?;

        let (lr, eps) = (self.learning_rate, self.epsilon);
        descend(grad, params, self.acc.iter_mut(), |g, acc| {
            *acc += g * g;
            lr * g / (acc.sqrt() + eps)
        })
    }
}
