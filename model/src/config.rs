use std::{fs, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{Result, initialization::InitializerSpec, optimization::OptimizerSpec};

/// The model-building options read from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub initializer: InitializerSpec,
    pub optimizer: OptimizerSpec,
}

/// Reads a `ModelConfig` from the json file at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ModelConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let config = serde_json::from_str(&content)?;

    info!(path:? = path; "loaded model config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::{ModelErr, initialization::Initializer};

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "initializer": {{ "glorot_uniform": {{ "scale": 1.0, "output_rank": 1, "filter_rank": 0, "seed": 3 }} }},
                "optimizer": {{ "sgd": {{ "learning_rate": 0.01 }} }}
            }}"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        let init = config.initializer.build().unwrap().to_dictionary();

        assert_eq!(init.seed(), 3);
        assert_eq!(config.optimizer.learning_rate(), 0.01);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path().join("model.json")).unwrap_err();

        assert!(matches!(err, ModelErr::Io(_)));
    }

    #[test]
    fn malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"initializer\": 1 }}").unwrap();

        assert!(matches!(load_config(file.path()), Err(ModelErr::Json(_))));
    }
}
