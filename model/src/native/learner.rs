use log::debug;
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

use super::{Function, rules::UpdateRule};
use crate::{ModelErr, Result};

/// Additional learning options every native learner understands.
///
/// The `Default` value is the no-op: no regularization, no noise and no clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningOptions {
    pub l1_regularization_weight: f64,
    pub l2_regularization_weight: f64,
    pub gaussian_noise_injection_std_dev: f64,
    pub gradient_clipping_threshold_per_sample: f64,
    pub gradient_clipping_with_truncation: bool,
}

impl Default for LearningOptions {
    fn default() -> Self {
        Self {
            l1_regularization_weight: 0.,
            l2_regularization_weight: 0.,
            gaussian_noise_injection_std_dev: 0.,
            gradient_clipping_threshold_per_sample: f64::INFINITY,
            gradient_clipping_with_truncation: true,
        }
    }
}

/// A runnable training-update object bound to the parameters of a compiled `Function`.
pub trait Learner {
    fn learning_rate(&self) -> f64;

    fn options(&self) -> &LearningOptions;

    /// The amount of parameters of the function this learner was bound to.
    fn parameter_count(&self) -> usize;

    /// Steps every parameter of `model` using its gradient.
    ///
    /// # Arguments
    /// * `model` - The function this learner was bound to.
    /// * `gradients` - One gradient per parameter, in the function's parameter order.
    /// * `sample_count` - The amount of samples the gradients were accumulated over.
    ///
    /// # Returns
    /// An error if the gradients don't match the bound parameters, in which case no parameter
    /// is modified.
    fn update(&mut self, model: &mut Function, gradients: &[&[f32]], sample_count: usize)
    -> Result<()>;
}

/// The backend's learner: applies the learning options and then one update rule per parameter.
pub struct NativeLearner<U: UpdateRule> {
    learning_rate: f64,
    options: LearningOptions,
    lens: Vec<usize>,
    rules: Vec<U>,
    rng: StdRng,
}

impl<U: UpdateRule> NativeLearner<U> {
    /// Binds a new learner to `model`.
    ///
    /// # Arguments
    /// * `model` - The compiled function whose parameters will be trained.
    /// * `learning_rate` - The learning rate the update rules were built with.
    /// * `options` - The additional learning options.
    /// * `rule_factory` - Builds the update rule of a parameter given its length.
    pub fn new<F>(
        model: &Function,
        learning_rate: f64,
        options: LearningOptions,
        rule_factory: F,
    ) -> Self
    where
        F: FnMut(usize) -> U,
    {
        let lens = model.parameter_lens();
        let rules = lens.iter().copied().map(rule_factory).collect();

        Self {
            learning_rate,
            options,
            lens,
            rules,
            rng: StdRng::from_os_rng(),
        }
    }

    fn check(&self, model: &Function, gradients: &[&[f32]]) -> Result<()> {
        let expected = self.lens.len();

        if gradients.len() != expected {
            return Err(ModelErr::SizeMismatch {
                what: "learner gradients",
                got: gradients.len(),
                expected,
            });
        }

        if model.parameters().len() != expected {
            return Err(ModelErr::SizeMismatch {
                what: "learner parameters",
                got: model.parameters().len(),
                expected,
            });
        }

        for ((grad, param), &len) in gradients.iter().zip(model.parameters()).zip(&self.lens) {
            if grad.len() != len || param.len() != len {
                return Err(ModelErr::SizeMismatch {
                    what: "parameter gradient",
                    got: grad.len(),
                    expected: param.len(),
                });
            }
        }

        Ok(())
    }

    /// Applies clipping, noise and weight penalties to `grad`, in that order.
    fn regularize(&mut self, grad: &mut [f32], params: &[f32], sample_count: usize) -> Result<()> {
        let opts = self.options;
        let threshold = opts.gradient_clipping_threshold_per_sample * sample_count.max(1) as f64;

        if threshold.is_finite() {
            let threshold = threshold as f32;

            if opts.gradient_clipping_with_truncation {
                grad.iter_mut()
                    .for_each(|g| *g = g.clamp(-threshold, threshold));
            } else {
                let norm = grad.iter().map(|g| g.powi(2)).sum::<f32>().sqrt();
                if norm > threshold {
                    let factor = threshold / norm;
                    grad.iter_mut().for_each(|g| *g *= factor);
                }
            }
        }

        if opts.gaussian_noise_injection_std_dev > 0. {
            let noise = Normal::new(0., opts.gaussian_noise_injection_std_dev as f32)?;
            grad.iter_mut()
                .for_each(|g| *g += noise.sample(&mut self.rng));
        }

        let l1 = opts.l1_regularization_weight as f32;
        let l2 = opts.l2_regularization_weight as f32;

        if l1 != 0. || l2 != 0. {
            for (g, &w) in grad.iter_mut().zip(params) {
                *g += l2 * w + l1 * sign(w);
            }
        }

        Ok(())
    }
}

fn sign(x: f32) -> f32 {
    if x == 0. { 0. } else { x.signum() }
}

impl<U: UpdateRule> Learner for NativeLearner<U> {
    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn options(&self) -> &LearningOptions {
        &self.options
    }

    fn parameter_count(&self) -> usize {
        self.lens.len()
    }

    fn update(
        &mut self,
        model: &mut Function,
        gradients: &[&[f32]],
        sample_count: usize,
    ) -> Result<()> {
        self.check(model, gradients)?;

        for (i, (param, grad)) in model.parameters_mut().iter_mut().zip(gradients).enumerate() {
            let mut grad = grad.to_vec();
            self.regularize(&mut grad, param.values(), sample_count)?;
            self.rules[i].update_params(&grad, param.values_mut())?;
        }

        debug!(parameters = self.lens.len(), samples = sample_count; "learner step");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{constant_initializer, rules::Sgd};

    fn model() -> Function {
        let mut model = Function::new();
        model.add_parameter("w", &[2], &constant_initializer(1.)).unwrap();
        model.add_parameter("b", &[1], &constant_initializer(0.)).unwrap();
        model
    }

    fn assert_close(got: &[f32], expected: &[f32]) {
        assert_eq!(got.len(), expected.len());
        for (g, e) in got.iter().zip(expected) {
            assert!((g - e).abs() < 1e-6, "got {got:?}, expected {expected:?}");
        }
    }

    fn sgd_learner(model: &Function, options: LearningOptions) -> NativeLearner<Sgd> {
        NativeLearner::new(model, 0.5, options, |_| Sgd::new(0.5))
    }

    #[test]
    fn plain_step() {
        let mut model = model();
        let mut learner = sgd_learner(&model, LearningOptions::default());

        learner.update(&mut model, &[&[1., -1.], &[2.]], 1).unwrap();

        assert_eq!(model.parameter("w").unwrap().values(), [0.5, 1.5]);
        assert_eq!(model.parameter("b").unwrap().values(), [-1.]);
        assert_eq!(learner.parameter_count(), 2);
    }

    #[test]
    fn l2_decays_weights_without_gradient() {
        let mut model = model();
        let options = LearningOptions {
            l2_regularization_weight: 0.2,
            ..Default::default()
        };
        let mut learner = sgd_learner(&model, options);

        learner.update(&mut model, &[&[0., 0.], &[0.]], 1).unwrap();

        // w -= 0.5 * 0.2 * w, the zero bias is untouched
        assert_close(model.parameter("w").unwrap().values(), &[0.9, 0.9]);
        assert_eq!(model.parameter("b").unwrap().values(), [0.]);
    }

    #[test]
    fn truncation_clips_each_element() {
        let mut model = model();
        let options = LearningOptions {
            gradient_clipping_threshold_per_sample: 0.5,
            ..Default::default()
        };
        let mut learner = sgd_learner(&model, options);

        learner.update(&mut model, &[&[4., -0.2], &[-8.]], 2).unwrap();

        assert_close(model.parameter("w").unwrap().values(), &[0.5, 1.1]);
        assert_eq!(model.parameter("b").unwrap().values(), [0.5]);
    }

    #[test]
    fn norm_clipping_rescales() {
        let mut model = model();
        let options = LearningOptions {
            gradient_clipping_threshold_per_sample: 1.,
            gradient_clipping_with_truncation: false,
            ..Default::default()
        };
        let mut learner = sgd_learner(&model, options);

        learner.update(&mut model, &[&[3., 4.], &[0.5]], 1).unwrap();

        // [3, 4] has norm 5 and is scaled to [0.6, 0.8]
        assert_close(model.parameter("w").unwrap().values(), &[0.7, 0.6]);
        assert_eq!(model.parameter("b").unwrap().values(), [-0.25]);
    }

    #[test]
    fn mismatch_leaves_parameters_untouched() {
        let mut model = model();
        let mut learner = sgd_learner(&model, LearningOptions::default());

        let err = learner.update(&mut model, &[&[1., 1.]], 1).unwrap_err();
        assert!(matches!(err, ModelErr::SizeMismatch { got: 1, expected: 2, .. }));

        let err = learner.update(&mut model, &[&[1., 1.], &[1., 1.]], 1).unwrap_err();
        assert!(matches!(err, ModelErr::SizeMismatch { .. }));

        assert_eq!(model.parameter("w").unwrap().values(), [1., 1.]);
    }
}
