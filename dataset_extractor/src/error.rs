use std::{error::Error, fmt, io, path::PathBuf};

/// The result type used in the entire dataset extractor crate.
pub type Result<T> = std::result::Result<T, ExtractErr>;

/// Download and extraction failures.
#[derive(Debug)]
pub enum ExtractErr {
    Io(io::Error),
    Http(Box<ureq::Error>),
    /// A downloaded file doesn't have the expected layout.
    Format(String),
    /// The archive `extract` needs was never downloaded.
    MissingArchive(PathBuf),
    UnknownDataset(String),
}

impl fmt::Display for ExtractErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractErr::Io(e) => write!(f, "io error: {e}"),
            ExtractErr::Http(e) => write!(f, "http error: {e}"),
            ExtractErr::Format(msg) => write!(f, "malformed dataset file: {msg}"),
            ExtractErr::MissingArchive(path) => {
                write!(f, "missing archive {}, download it first", path.display())
            }
            ExtractErr::UnknownDataset(name) => write!(f, "unknown dataset {name}"),
        }
    }
}

impl Error for ExtractErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExtractErr::Io(e) => Some(e),
            ExtractErr::Http(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for ExtractErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ureq::Error> for ExtractErr {
    fn from(value: ureq::Error) -> Self {
        Self::Http(Box::new(value))
    }
}
