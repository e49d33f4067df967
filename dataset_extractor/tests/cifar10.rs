use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use dataset_extractor::{
    Cifar10Extractor, DatasetFolder, Extractor, Fetcher, RecordLayout, Result, TensorFrame,
};
use flate2::{Compression, write::GzEncoder};

const RECORDS_PER_BATCH: usize = 2;

/// Serves a prebuilt archive instead of going to the network.
struct LocalFetcher {
    archive: PathBuf,
    calls: usize,
}

impl Fetcher for LocalFetcher {
    fn fetch(&mut self, _url: &str, dest: &Path) -> Result<()> {
        self.calls += 1;
        fs::copy(&self.archive, dest)?;
        Ok(())
    }
}

/// A batch whose records carry `label` in the label byte and `label + i` in every pixel.
fn batch(label: u8) -> Vec<u8> {
    let layout = RecordLayout::CIFAR10;
    let mut bytes = Vec::new();

    for i in 0..RECORDS_PER_BATCH as u8 {
        bytes.push(label);
        bytes.extend(std::iter::repeat_n(label + i, layout.image_bytes));
    }

    bytes
}

fn append(builder: &mut tar::Builder<GzEncoder<File>>, name: &str, data: &[u8]) {
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    builder
        .append_data(&mut header, format!("cifar-10-batches-bin/{name}"), data)
        .unwrap();
}

fn build_archive(path: &Path) {
    let file = File::create(path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::fast()));

    for i in 1..=5u8 {
        append(&mut builder, &format!("data_batch_{i}.bin"), &batch(i));
    }
    append(&mut builder, "test_batch.bin", &batch(9));

    builder.into_inner().unwrap().finish().unwrap();
}

#[test]
fn download_then_extract() {
    let work = tempfile::tempdir().unwrap();
    let archive = work.path().join("cifar-10-binary.tar.gz");
    build_archive(&archive);

    let root = work.path().join("datasets");
    let fetcher = LocalFetcher {
        archive,
        calls: 0,
    };
    let mut extractor = Cifar10Extractor::with_fetcher(&root, fetcher);

    extractor.download().unwrap();
    extractor.download().unwrap();
    extractor.extract().unwrap();

    let folder = DatasetFolder::new(&root, "Cifar10");
    assert_eq!(extractor.folder(), &folder);
    assert!(!folder.tmp().exists());

    let train = TensorFrame::load(folder.train()).unwrap();
    assert_eq!(train.rows(), 5 * RECORDS_PER_BATCH);
    assert_eq!(train.x_size(), 3072);
    assert_eq!(train.y_size(), 1);
    assert_eq!(
        train.y().column(0).to_vec(),
        [1., 1., 2., 2., 3., 3., 4., 4., 5., 5.]
    );
    assert!(train.x().row(1).iter().all(|&p| p == 2.));

    let test = TensorFrame::load(folder.test()).unwrap();
    assert_eq!(test.rows(), RECORDS_PER_BATCH);
    assert_eq!(test.y()[[0, 0]], 9.);
}

#[test]
fn download_fetches_once() {
    let work = tempfile::tempdir().unwrap();
    let archive = work.path().join("cifar-10-binary.tar.gz");
    build_archive(&archive);

    let mut fetcher = LocalFetcher {
        archive,
        calls: 0,
    };
    let root = work.path().join("datasets");

    Cifar10Extractor::with_fetcher(&root, &mut fetcher)
        .download()
        .unwrap();
    Cifar10Extractor::with_fetcher(&root, &mut fetcher)
        .download()
        .unwrap();

    assert_eq!(fetcher.calls, 1);
}
