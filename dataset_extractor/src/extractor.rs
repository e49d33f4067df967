use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use crate::{
    Cifar10Extractor, Cifar100Extractor, ExtractErr, MnistExtractor, Result, frame::TensorFrame,
};

/// Prepares a dataset in two steps: `download` fetches its archives into the dataset's `tmp`
/// folder and `extract` turns them into `train.sia` and `test.sia`.
pub trait Extractor {
    fn name(&self) -> &str;

    fn download(&mut self) -> Result<()>;

    fn extract(&mut self) -> Result<()>;
}

/// The folder a dataset is prepared in, `<root>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFolder {
    name: String,
    dir: PathBuf,
}

impl DatasetFolder {
    pub fn new<P: AsRef<Path>>(root: P, name: &str) -> Self {
        Self {
            name: name.to_string(),
            dir: root.as_ref().join(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Holds the downloaded archives until extraction is done.
    pub fn tmp(&self) -> PathBuf {
        self.dir.join("tmp")
    }

    pub fn train(&self) -> PathBuf {
        self.dir.join("train.sia")
    }

    pub fn test(&self) -> PathBuf {
        self.dir.join("test.sia")
    }

    /// Saves both frames and removes the `tmp` folder.
    pub fn finish(&self, train: &TensorFrame, test: &TensorFrame) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        train.save(self.train())?;
        test.save(self.test())?;

        let tmp = self.tmp();
        if tmp.exists() {
            fs::remove_dir_all(&tmp)?;
        }

        info!(dataset = self.name.as_str(), train = train.rows(), test = test.rows(); "extracted");
        Ok(())
    }
}

/// The names `extractor_for` understands.
pub const DATASETS: &[&str] = &["cifar10", "cifar100", "mnist"];

/// Builds the extractor of the dataset called `name`, case insensitive.
pub fn extractor_for<P: AsRef<Path>>(name: &str, root: P) -> Result<Box<dyn Extractor>> {
    let extractor: Box<dyn Extractor> = match name.to_ascii_lowercase().as_str() {
        "cifar10" => Box::new(Cifar10Extractor::new(root)),
        "cifar100" => Box::new(Cifar100Extractor::new(root)),
        "mnist" => Box::new(MnistExtractor::new(root)),
        _ => return Err(ExtractErr::UnknownDataset(name.to_string())),
    };

    Ok(extractor)
}
