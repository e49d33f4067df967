use super::{UpdateRule, check_sizes, check_state, descend};
use crate::Result;

/// The running first and second moment estimates of one gradient element.
#[derive(Debug, Clone, Copy, Default)]
struct Moments {
    mean: f32,
    mean_square: f32,
}

/// Adaptive moment estimation with bias-corrected moments.
#[derive(Debug)]
pub struct Adam {
    learning_rate: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    steps: i32,
    moments: Box<[Moments]>,
}

impl Adam {
    /// # Arguments
    /// * `len` - The length of the parameter this rule steps.
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    /// * `beta1` - The decay of the mean estimate.
    /// * `beta2` - The decay of the mean square estimate.
    /// * `epsilon` - Keeps the denominator away from zero.
    pub fn new(len: usize, learning_rate: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            learning_rate,
            beta1,
            beta2,
            epsilon,
            steps: 0,
            moments: vec![Moments::default(); len].into_boxed_slice(),
        }
    }

    /// The learning rate scaled by the bias correction of the current step.
    fn corrected_rate(&self) -> f32 {
        let mean_correction = 1. - self.beta1.powi(self.steps);
        let square_correction = 1. - self.beta2.powi(self.steps);

        self.learning_rate * square_correction.sqrt() / mean_correction
    }
}

impl UpdateRule for Adam {
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()> {
        check_sizes(grad, params)?;
        check_state(grad, self.moments.len())?;

        self.steps = self.steps.saturating_add(1);
        let rate = self.corrected_rate();
        let (b1, b2, eps) = (self.beta1, self.beta2, self.epsilon);

        descend(grad, params, self.moments.iter_mut(), |g, m| {
            m.mean = b1 * m.mean + (1. - b1) * g;
            m.mean_square = b2 * m.mean_square + (1. - b2) * g * g;
            rate * m.mean / (m.mean_square.sqrt() + eps)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_is_learning_rate() {
        // bias correction makes the first step ~lr whatever the gradient's magnitude
        let mut rule = Adam::new(2, 0.01, 0.9, 0.999, 1e-8);
        let mut params = [1., 1.];

        rule.update_params(&[10., 0.1], &mut params).unwrap();

        assert!((params[0] - 0.99).abs() < 1e-4);
        assert!((params[1] - 0.99).abs() < 1e-4);
    }

    #[test]
    fn rejected_step_keeps_state() {
        let mut rule = Adam::new(2, 0.01, 0.9, 0.999, 1e-8);

        assert!(rule.update_params(&[1.], &mut [0.]).is_err());
        assert!(rule.update_params(&[1., 1.], &mut [0.]).is_err());
        assert_eq!(rule.steps, 0);
    }
}
