//! Downloads public image datasets and unpacks them into `.sia` tensor frames.

mod archive;
mod cifar;
pub mod config;
mod download;
mod error;
mod extractor;
mod fetch;
mod frame;
mod mnist;

pub use archive::{open_gz, unpack_tar_gz};
pub use cifar::{
    CIFAR10_URLS, CIFAR100_URLS, Cifar10Extractor, Cifar100Extractor, RecordLayout,
    decode_records,
};
pub use download::{download_all, file_name};
pub use error::{ExtractErr, Result};
pub use extractor::{DATASETS, DatasetFolder, Extractor, extractor_for};
pub use fetch::{Fetcher, HttpFetcher};
pub use frame::{MAGIC, TensorFrame};
pub use mnist::{IdxImages, MnistExtractor, idx_frame, read_idx_images, read_idx_labels};
