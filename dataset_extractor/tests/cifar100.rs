use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use dataset_extractor::{
    Cifar100Extractor, DatasetFolder, ExtractErr, Extractor, Fetcher, RecordLayout, Result,
    TensorFrame,
};
use flate2::{Compression, write::GzEncoder};

/// Serves a prebuilt archive instead of going to the network.
struct LocalFetcher {
    archive: PathBuf,
}

impl Fetcher for LocalFetcher {
    fn fetch(&mut self, _url: &str, dest: &Path) -> Result<()> {
        fs::copy(&self.archive, dest)?;
        Ok(())
    }
}

/// Records of `(coarse, fine)` labels, every pixel set to the fine label.
fn records(labels: &[(u8, u8)]) -> Vec<u8> {
    let layout = RecordLayout::CIFAR100;
    let mut bytes = Vec::new();

    for &(coarse, fine) in labels {
        bytes.extend([coarse, fine]);
        bytes.extend(std::iter::repeat_n(fine, layout.image_bytes));
    }

    bytes
}

fn build_archive(path: &Path, files: &[(&str, Vec<u8>)]) {
    let file = File::create(path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::fast()));

    for (name, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, format!("cifar-100-binary/{name}"), data.as_slice())
            .unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap();
}

fn extractor(work: &Path, files: &[(&str, Vec<u8>)]) -> Cifar100Extractor<LocalFetcher> {
    let archive = work.join("cifar-100-binary.tar.gz");
    build_archive(&archive, files);

    Cifar100Extractor::with_fetcher(work.join("datasets"), LocalFetcher { archive })
}

#[test]
fn download_then_extract() {
    let work = tempfile::tempdir().unwrap();
    let mut extractor = extractor(
        work.path(),
        &[
            ("train.bin", records(&[(1, 10), (2, 20), (3, 30)])),
            ("test.bin", records(&[(19, 99)])),
        ],
    );

    extractor.download().unwrap();
    extractor.extract().unwrap();

    let folder = DatasetFolder::new(work.path().join("datasets"), "Cifar100");
    assert_eq!(extractor.folder(), &folder);
    assert!(!folder.tmp().exists());

    let train = TensorFrame::load(folder.train()).unwrap();
    assert_eq!(train.rows(), 3);
    assert_eq!(train.x_size(), 3072);
    assert_eq!(train.y_size(), 2);
    assert_eq!(train.y().column(0).to_vec(), [1., 2., 3.]);
    assert_eq!(train.y().column(1).to_vec(), [10., 20., 30.]);
    assert!(train.x().row(1).iter().all(|&p| p == 20.));

    let test = TensorFrame::load(folder.test()).unwrap();
    assert_eq!(test.rows(), 1);
    assert_eq!(test.y().row(0).to_vec(), [19., 99.]);
}

#[test]
fn missing_test_batch() {
    let work = tempfile::tempdir().unwrap();
    let mut extractor = extractor(work.path(), &[("train.bin", records(&[(1, 10)]))]);

    extractor.download().unwrap();
    let err = extractor.extract().unwrap_err();

    assert!(matches!(err, ExtractErr::MissingArchive(path) if path.ends_with("test.bin")));
    assert!(!extractor.folder().train().exists());
}
