use serde::{Deserialize, Serialize};

use crate::native::LearningOptions;

/// A weight penalty added to the gradients by the learner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regularizer {
    L1 { weight: f64 },
    L2 { weight: f64 },
    L1L2 { l1: f64, l2: f64 },
}

impl Regularizer {
    pub fn l1(weight: f64) -> Self {
        Self::L1 { weight }
    }

    pub fn l2(weight: f64) -> Self {
        Self::L2 { weight }
    }

    pub fn l1_l2(l1: f64, l2: f64) -> Self {
        Self::L1L2 { l1, l2 }
    }

    /// The learning options that apply this penalty, every other option is left at its default.
    pub fn additional_learning_options(&self) -> LearningOptions {
        let (l1, l2) = match *self {
            Self::L1 { weight } => (weight, 0.),
            Self::L2 { weight } => (0., weight),
            Self::L1L2 { l1, l2 } => (l1, l2),
        };

        LearningOptions {
            l1_regularization_weight: l1,
            l2_regularization_weight: l2,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_only_weights() {
        let opts = Regularizer::l1_l2(0.1, 0.2).additional_learning_options();

        assert_eq!(opts.l1_regularization_weight, 0.1);
        assert_eq!(opts.l2_regularization_weight, 0.2);
        assert_eq!(
            opts.gradient_clipping_threshold_per_sample,
            LearningOptions::default().gradient_clipping_threshold_per_sample
        );
    }

    #[test]
    fn parse() {
        let reg: Regularizer = serde_json::from_str(r#"{ "l2": { "weight": 0.5 } }"#).unwrap();
        assert_eq!(reg, Regularizer::l2(0.5));
        assert_eq!(reg.additional_learning_options().l1_regularization_weight, 0.);
    }
}
