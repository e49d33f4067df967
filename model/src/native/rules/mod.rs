mod adagrad;
mod adam;
mod momentum_sgd;
mod rms_prop;
mod sgd;

pub use adagrad::AdaGrad;
pub use adam::Adam;
pub use momentum_sgd::MomentumSgd;
pub use rms_prop::RmsProp;
pub use sgd::Sgd;

use crate::Result;

/// Defines how a single parameter is stepped given its (already regularized) gradient.
pub trait UpdateRule {
    /// Updates the provided slice of parameters using the gradient.
    ///
    /// # Arguments
    /// * `grad` - The gradient of the parameter.
    /// * `params` - The parameter values to update.
    ///
    /// # Returns
    /// An error if there's a mismatch in the sizes of `grad` and `params`.
    fn update_params(&mut self, grad: &[f32], params: &mut [f32]) -> Result<()>;
}

pub(super) fn check_sizes(grad: &[f32], params: &[f32]) -> Result<()> {
    check_len("update rule gradient", grad.len(), params.len())
}

/// Checks that a rule holds one state per gradient element.
pub(super) fn check_state(grad: &[f32], state_len: usize) -> Result<()> {
    check_len("update rule state", state_len, grad.len())
}

fn check_len(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(crate::ModelErr::SizeMismatch {
            what,
            got,
            expected,
        });
    }

    Ok(())
}

/// Subtracts `step(g, state)` from every parameter, pairing each gradient element with the
/// rule's state for it.
pub(super) fn descend<S, I, F>(grad: &[f32], params: &mut [f32], state: I, mut step: F) -> Result<()>
where
    I: IntoIterator<Item = S>,
    F: FnMut(f32, S) -> f32,
{
    check_sizes(grad, params)?;

    for ((p, &g), s) in params.iter_mut().zip(grad).zip(state) {
        *p -= step(g, s);
    }

    Ok(())
}
