use super::{UpdateRule, check_state, descend};
use crate::Result;

#[derive(Debug)]
pub struct RmsProp {
    learning_rate: f32,
    decay: f32,
    epsilon: f32,
    mean_square: Box<[f32]>,
}

impl RmsProp {
    /// Creates a new `RmsProp` update rule.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters this instance should hold.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `decay` - The decay of the moving average of squared gradients.
    /// * `epsilon` - Keeps the denominator away from zero.
    pub fn new(len: usize, learning_rate: f32, decay: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            decay,
            epsilon,
            mean_square: vec![0.; len].into_boxed_slice(),
        }
    }
}

impl UpdateRule for RmsProp {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        check_state(grad, self.mean_square.len())?;

        let (lr, rho, eps) = (self.learning_rate, self.decay, self.epsilon);
        descend(grad, params, self.mean_square.iter_mut(), |g, ms| {
            *ms = rho * *ms + (1. - rho) * g * g;
            lr * g / (ms.sqrt() + eps)
        })
    }
}
