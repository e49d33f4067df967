mod adagrad;
mod adam;
mod momentum_sgd;
mod optimizer;
mod rms_prop;
mod sgd;
mod spec;

pub use adagrad::AdaGrad;
pub use adam::Adam;
pub use momentum_sgd::MomentumSgd;
pub use optimizer::{Optimizer, OptimizerOptions};
pub use rms_prop::RmsProp;
pub use sgd::Sgd;
pub use spec::OptimizerSpec;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        native::{Function, Learner, constant_initializer},
        regularization::Regularizer,
    };

    fn model() -> Function {
        let mut model = Function::new();
        model.add_parameter("w", &[3], &constant_initializer(1.)).unwrap();
        model
    }

    #[test]
    fn every_optimizer_binds_to_model() {
        let optimizers: Vec<Box<dyn Optimizer>> = vec![
            Box::new(Sgd::new(0.1)),
            Box::new(MomentumSgd::new(0.1)),
            Box::new(Adam::new(0.1)),
            Box::new(AdaGrad::new(0.1)),
            Box::new(RmsProp::new(0.1)),
        ];

        for optimizer in optimizers {
            let mut model = model();
            let mut learner = optimizer.to_learner(&model).unwrap();

            assert_eq!(learner.parameter_count(), 1);
            assert_eq!(learner.learning_rate(), 0.1);

            learner.update(&mut model, &[&[1., 1., 1.]], 1).unwrap();
            let values = model.parameter("w").unwrap().values();
            assert!(values.iter().all(|&v| v < 1.), "{optimizer:?}: {values:?}");
        }
    }

    #[test]
    fn learner_carries_regularizer_options() {
        let optimizer = MomentumSgd::new(0.1).with_regularizer(Regularizer::l2(0.5));
        let learner = optimizer.to_learner(&model()).unwrap();

        assert_eq!(learner.options().l2_regularization_weight, 0.5);
        assert_eq!(optimizer.momentum(), MomentumSgd::DEFAULT_MOMENTUM);
    }
}
