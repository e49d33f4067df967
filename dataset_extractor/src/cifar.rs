use std::{
    fs::File,
    io::{BufReader, ErrorKind, Read},
    path::Path,
};

use log::{debug, warn};

use crate::{
    ExtractErr, Result,
    archive::unpack_tar_gz,
    download::download_all,
    extractor::{DatasetFolder, Extractor},
    fetch::{Fetcher, HttpFetcher},
    frame::TensorFrame,
};

/// The layout of a single record of a CIFAR binary batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub label_bytes: usize,
    pub image_bytes: usize,
}

impl RecordLayout {
    /// One label byte followed by a 32x32 image, channel planes red, green then blue.
    pub const CIFAR10: Self = Self {
        label_bytes: 1,
        image_bytes: 32 * 32 * 3,
    };

    /// A coarse and a fine label byte followed by the same image layout as CIFAR-10.
    pub const CIFAR100: Self = Self {
        label_bytes: 2,
        image_bytes: 32 * 32 * 3,
    };

    pub fn record_bytes(&self) -> usize {
        self.label_bytes + self.image_bytes
    }

    pub fn frame(&self) -> TensorFrame {
        TensorFrame::new(self.image_bytes, self.label_bytes)
    }
}

/// Fills `buf` as much as possible, stopping early only at end of input.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(filled)
}

/// Appends every record of `reader` to `frame`.
///
/// # Returns
/// The amount of records read, or a format error if the input ends in the middle of a record.
pub fn decode_records<R: Read>(
    reader: &mut R,
    layout: RecordLayout,
    frame: &mut TensorFrame,
) -> Result<usize> {
    let mut record = vec![0; layout.record_bytes()];
    let mut count = 0;

    loop {
        match read_full(reader, &mut record)? {
            0 => break,
            n if n < record.len() => {
                return Err(ExtractErr::Format(format!(
                    "record {count} is truncated: {n} of {} bytes",
                    record.len()
                )));
            }
            _ => {}
        }

        let (label, image) = record.split_at(layout.label_bytes);
        frame.push_bytes(image, label)?;
        count += 1;
    }

    Ok(count)
}

/// Where the batches of a CIFAR variant live once its archive is unpacked.
struct CifarFiles {
    archive: &'static str,
    batch_dir: &'static str,
    train: &'static [&'static str],
    test: &'static [&'static str],
    layout: RecordLayout,
    records_per_train_file: usize,
    records_per_test_file: usize,
}

const CIFAR10_FILES: CifarFiles = CifarFiles {
    archive: "cifar-10-binary.tar.gz",
    batch_dir: "cifar-10-batches-bin",
    train: &[
        "data_batch_1.bin",
        "data_batch_2.bin",
        "data_batch_3.bin",
        "data_batch_4.bin",
        "data_batch_5.bin",
    ],
    test: &["test_batch.bin"],
    layout: RecordLayout::CIFAR10,
    records_per_train_file: 10_000,
    records_per_test_file: 10_000,
};

const CIFAR100_FILES: CifarFiles = CifarFiles {
    archive: "cifar-100-binary.tar.gz",
    batch_dir: "cifar-100-binary",
    train: &["train.bin"],
    test: &["test.bin"],
    layout: RecordLayout::CIFAR100,
    records_per_train_file: 50_000,
    records_per_test_file: 10_000,
};

pub const CIFAR10_URLS: &[&str] = &["https://www.cs.toronto.edu/~kriz/cifar-10-binary.tar.gz"];

pub const CIFAR100_URLS: &[&str] = &["https://www.cs.toronto.edu/~kriz/cifar-100-binary.tar.gz"];

fn decode_batches(
    dir: &Path,
    names: &[&str],
    layout: RecordLayout,
    expected: usize,
) -> Result<TensorFrame> {
    let mut frame = layout.frame();

    for name in names {
        let path = dir.join(name);
        if !path.is_file() {
            return Err(ExtractErr::MissingArchive(path));
        }

        let mut reader = BufReader::new(File::open(&path)?);
        let count = decode_records(&mut reader, layout, &mut frame)?;
        debug!(batch = *name, records = count; "decoded batch");

        if count != expected {
            warn!(batch = *name, records = count, expected = expected; "unexpected record count");
        }
    }

    Ok(frame)
}

fn extract_cifar(folder: &DatasetFolder, files: &CifarFiles) -> Result<()> {
    let tmp = folder.tmp();
    unpack_tar_gz(&tmp.join(files.archive), &tmp)?;

    let batches = tmp.join(files.batch_dir);
    let train = decode_batches(
        &batches,
        files.train,
        files.layout,
        files.records_per_train_file,
    )?;
    let test = decode_batches(
        &batches,
        files.test,
        files.layout,
        files.records_per_test_file,
    )?;

    folder.finish(&train, &test)
}

/// Extracts CIFAR-10 into `<root>/Cifar10/{train,test}.sia`.
///
/// Features are the 3072 raw pixel bytes of each image and the label is its class byte.
pub struct Cifar10Extractor<F: Fetcher = HttpFetcher> {
    folder: DatasetFolder,
    fetcher: F,
}

impl Cifar10Extractor {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_fetcher(root, HttpFetcher::new())
    }
}

impl<F: Fetcher> Cifar10Extractor<F> {
    pub fn with_fetcher<P: AsRef<Path>>(root: P, fetcher: F) -> Self {
        Self {
            folder: DatasetFolder::new(root, "Cifar10"),
            fetcher,
        }
    }

    pub fn folder(&self) -> &DatasetFolder {
        &self.folder
    }
}

impl<F: Fetcher> Extractor for Cifar10Extractor<F> {
    fn name(&self) -> &str {
        self.folder.name()
    }

    fn download(&mut self) -> Result<()> {
        download_all(&mut self.fetcher, &self.folder.tmp(), CIFAR10_URLS)?;
        Ok(())
    }

    fn extract(&mut self) -> Result<()> {
        extract_cifar(&self.folder, &CIFAR10_FILES)
    }
}

/// Extracts CIFAR-100 into `<root>/Cifar100/{train,test}.sia`.
///
/// Each label row holds the coarse and the fine class, in that order.
pub struct Cifar100Extractor<F: Fetcher = HttpFetcher> {
    folder: DatasetFolder,
    fetcher: F,
}

impl Cifar100Extractor {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_fetcher(root, HttpFetcher::new())
    }
}

impl<F: Fetcher> Cifar100Extractor<F> {
    pub fn with_fetcher<P: AsRef<Path>>(root: P, fetcher: F) -> Self {
        Self {
            folder: DatasetFolder::new(root, "Cifar100"),
            fetcher,
        }
    }

    pub fn folder(&self) -> &DatasetFolder {
        &self.folder
    }
}

impl<F: Fetcher> Extractor for Cifar100Extractor<F> {
    fn name(&self) -> &str {
        self.folder.name()
    }

    fn download(&mut self) -> Result<()> {
        download_all(&mut self.fetcher, &self.folder.tmp(), CIFAR100_URLS)?;
        Ok(())
    }

    fn extract(&mut self) -> Result<()> {
        extract_cifar(&self.folder, &CIFAR100_FILES)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const SMALL: RecordLayout = RecordLayout {
        label_bytes: 1,
        image_bytes: 3,
    };

    #[test]
    fn decode_whole_records() {
        let bytes = [4u8, 10, 20, 30, 9, 1, 2, 3];
        let mut frame = SMALL.frame();

        let count = decode_records(&mut Cursor::new(bytes), SMALL, &mut frame).unwrap();

        assert_eq!(count, 2);
        assert_eq!(frame.y().column(0).to_vec(), [4., 9.]);
        assert_eq!(frame.x().row(1).to_vec(), [1., 2., 3.]);
    }

    #[test]
    fn decode_empty_input() {
        let mut frame = SMALL.frame();
        let count = decode_records(&mut std::io::empty(), SMALL, &mut frame).unwrap();

        assert_eq!(count, 0);
        assert!(frame.is_empty());
    }

    #[test]
    fn truncated_record_is_rejected() {
        let bytes = [4u8, 10, 20, 30, 9, 1];
        let mut frame = SMALL.frame();

        let err = decode_records(&mut Cursor::new(bytes), SMALL, &mut frame).unwrap_err();
        assert!(matches!(err, ExtractErr::Format(_)));
    }

    #[test]
    fn cifar100_has_two_labels() {
        let layout = RecordLayout::CIFAR100;
        let mut record = vec![3u8, 42];
        record.extend(std::iter::repeat_n(7, layout.image_bytes));
        let mut frame = layout.frame();

        decode_records(&mut Cursor::new(record), layout, &mut frame).unwrap();

        assert_eq!(frame.y().row(0).to_vec(), [3., 42.]);
        assert_eq!(frame.x_size(), 3072);
    }

    #[test]
    fn extract_without_download() {
        let root = tempfile::tempdir().unwrap();
        let mut extractor = Cifar10Extractor::new(root.path());

        let err = extractor.extract().unwrap_err();
        assert!(matches!(err, ExtractErr::MissingArchive(_)));
    }
}
