use std::{io::Read, path::Path};

use log::debug;

use crate::{
    ExtractErr, Result,
    archive::open_gz,
    download::download_all,
    extractor::{DatasetFolder, Extractor},
    fetch::{Fetcher, HttpFetcher},
    frame::{TensorFrame, read_counted},
};

const IMAGES_MAGIC: u32 = 0x0000_0803;
const LABELS_MAGIC: u32 = 0x0000_0801;

const BASE_URL: &str = "https://storage.googleapis.com/cvdf-datasets/mnist";

const TRAIN_IMAGES: &str = "train-images-idx3-ubyte.gz";
const TRAIN_LABELS: &str = "train-labels-idx1-ubyte.gz";
const TEST_IMAGES: &str = "t10k-images-idx3-ubyte.gz";
const TEST_LABELS: &str = "t10k-labels-idx1-ubyte.gz";

/// The images of an IDX file, every image flattened row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdxImages {
    pub count: usize,
    pub rows: usize,
    pub cols: usize,
    pub pixels: Vec<u8>,
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn read_magic<R: Read>(reader: &mut R, expected: u32) -> Result<()> {
    let magic = read_u32(reader)?;
    if magic != expected {
        return Err(ExtractErr::Format(format!(
            "idx magic {magic:#010x}, expected {expected:#010x}"
        )));
    }

    Ok(())
}

/// Reads an IDX3 image file.
pub fn read_idx_images<R: Read>(reader: &mut R) -> Result<IdxImages> {
    read_magic(reader, IMAGES_MAGIC)?;
    let count = read_u32(reader)? as usize;
    let rows = read_u32(reader)? as usize;
    let cols = read_u32(reader)? as usize;

    let len = count
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(cols))
        .ok_or_else(|| ExtractErr::Format("idx image dimensions overflow".into()))?;

    let pixels = read_counted(reader, len, "idx images")?;
    Ok(IdxImages {
        count,
        rows,
        cols,
        pixels,
    })
}

/// Reads an IDX1 label file.
pub fn read_idx_labels<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
    read_magic(reader, LABELS_MAGIC)?;
    let count = read_u32(reader)? as usize;
    read_counted(reader, count, "idx labels")
}

/// Pairs images with their labels into a frame of `rows * cols` features and one label.
pub fn idx_frame(images: &IdxImages, labels: &[u8]) -> Result<TensorFrame> {
    if images.count != labels.len() {
        return Err(ExtractErr::Format(format!(
            "{} images but {} labels",
            images.count,
            labels.len()
        )));
    }

    let image_bytes = images.rows * images.cols;
    if image_bytes == 0 && images.count > 0 {
        return Err(ExtractErr::Format(format!(
            "{} images of {}x{} pixels",
            images.count, images.rows, images.cols
        )));
    }

    let mut frame = TensorFrame::new(image_bytes, 1);
    if image_bytes > 0 {
        for (image, label) in images.pixels.chunks_exact(image_bytes).zip(labels) {
            frame.push_bytes(image, std::slice::from_ref(label))?;
        }
    }

    Ok(frame)
}

fn load_pair(tmp: &Path, images: &str, labels: &str) -> Result<TensorFrame> {
    let images = read_idx_images(&mut open_gz(&tmp.join(images))?)?;
    let labels = read_idx_labels(&mut open_gz(&tmp.join(labels))?)?;
    debug!(images = images.count, rows = images.rows, cols = images.cols; "decoded idx pair");

    idx_frame(&images, &labels)
}

/// Extracts MNIST into `<root>/MNIST/{train,test}.sia`.
pub struct MnistExtractor<F: Fetcher = HttpFetcher> {
    folder: DatasetFolder,
    fetcher: F,
}

impl MnistExtractor {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_fetcher(root, HttpFetcher::new())
    }
}

impl<F: Fetcher> MnistExtractor<F> {
    pub fn with_fetcher<P: AsRef<Path>>(root: P, fetcher: F) -> Self {
        Self {
            folder: DatasetFolder::new(root, "MNIST"),
            fetcher,
        }
    }

    pub fn folder(&self) -> &DatasetFolder {
        &self.folder
    }
}

impl<F: Fetcher> Extractor for MnistExtractor<F> {
    fn name(&self) -> &str {
        self.folder.name()
    }

    fn download(&mut self) -> Result<()> {
        let urls: Vec<String> = [TRAIN_IMAGES, TRAIN_LABELS, TEST_IMAGES, TEST_LABELS]
            .iter()
            .map(|file| format!("{BASE_URL}/{file}"))
            .collect();
        let urls: Vec<&str> = urls.iter().map(String::as_str).collect();

        download_all(&mut self.fetcher, &self.folder.tmp(), &urls)?;
        Ok(())
    }

    fn extract(&mut self) -> Result<()> {
        let tmp = self.folder.tmp();
        let train = load_pair(&tmp, TRAIN_IMAGES, TRAIN_LABELS)?;
        let test = load_pair(&tmp, TEST_IMAGES, TEST_LABELS)?;

        self.folder.finish(&train, &test)
    }
}
