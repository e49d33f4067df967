use std::{
    fs::{self, File},
    io::BufReader,
    path::Path,
};

use flate2::read::GzDecoder;
use log::debug;

use crate::{ExtractErr, Result};

fn open(path: &Path) -> Result<File> {
    if !path.is_file() {
        return Err(ExtractErr::MissingArchive(path.to_path_buf()));
    }

    Ok(File::open(path)?)
}

/// Opens a gzip compressed file for decompressed reading.
pub fn open_gz(path: &Path) -> Result<GzDecoder<BufReader<File>>> {
    Ok(GzDecoder::new(BufReader::new(open(path)?)))
}

/// Unpacks the gzip compressed tarball at `archive` into `dest`.
pub fn unpack_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    let decoder = open_gz(archive)?;
    fs::create_dir_all(dest)?;

    tar::Archive::new(decoder).unpack(dest)?;
    debug!(archive:? = archive, dest:? = dest; "unpacked archive");
    Ok(())
}
