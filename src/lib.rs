//! Declarative deep-learning model building on top of a native backend, plus the dataset
//! extractors that prepare its training data.

pub use dataset_extractor;
pub use model;

pub use dataset_extractor::{Extractor, TensorFrame};
pub use model::{ModelConfig, ModelErr, load_config};
