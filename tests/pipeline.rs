use std::fs;

use sianet::{
    ModelConfig, TensorFrame, load_config,
    model::{
        initialization::Initializer,
        native::{Function, Learner},
        optimization::Optimizer,
    },
};

#[test]
fn config_to_learner_on_frame_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let json = serde_json::json!({
        "initializer": { "he_uniform": { "scale": 1.0, "output_rank": 1 } },
        "optimizer": {
            "momentum_sgd": {
                "learning_rate": 0.05,
                "regularizer": { "l1_l2": { "l1": 0.0, "l2": 0.01 } }
            }
        }
    });
    fs::write(&path, json.to_string()).unwrap();

    let ModelConfig {
        initializer,
        optimizer,
    } = load_config(&path).unwrap();

    let mut frame = TensorFrame::new(3, 1);
    frame.push(&[1., 2., 3.], &[1.]).unwrap();

    let mut model = Function::new();
    let init = initializer.build().unwrap().to_dictionary();
    model
        .add_parameter("w", &[1, frame.x_size()], &init)
        .unwrap();

    let optimizer = optimizer.build().unwrap();
    let mut learner = optimizer.to_learner(&model).unwrap();
    assert_eq!(learner.options().l2_regularization_weight, 0.01);

    let grad: Vec<f32> = frame.x().row(0).to_vec();
    learner.update(&mut model, &[grad.as_slice()], frame.rows()).unwrap();
    assert_eq!(model.parameter("w").unwrap().len(), 3);
}
