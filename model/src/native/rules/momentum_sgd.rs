use super::{UpdateRule, check_state, descend};
use crate::Result;

/// Gradient descent that keeps a decaying velocity per parameter and steps along it.
#[derive(Debug)]
pub struct MomentumSgd {
    learning_rate: f32,
    momentum: f32,
    velocity: Box<[f32]>,
}

impl MomentumSgd {
    /// # Arguments
    /// * `len` - The length of the parameter this rule steps.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `momentum` - The fraction of the velocity carried over to the next step.
    pub fn new(len: usize, learning_rate: f32, momentum: f32) -> Self {
        Self {
            learning_rate,
            momentum,
            velocity: vec![0.; len].into_boxed_slice(),
        }
    }
}

impl UpdateRule for MomentumSgd {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        check_state(grad, self.velocity.len())?;

        let (lr, mu) = (self.learning_rate, self.momentum);
        descend(grad, params, self.velocity.iter_mut(), |g, v| {
            *v = mu * *v + g;
            lr * *v
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_accumulates() {
        let mut rule = MomentumSgd::new(1, 1., 0.5);
        let mut params = [0.];

        rule.update_params(&[1.], &mut params).unwrap();
        assert_eq!(params, [-1.]);

        // v = 0.5 * 1 + 1
        rule.update_params(&[1.], &mut params).unwrap();
        assert_eq!(params, [-2.5]);
    }
}
