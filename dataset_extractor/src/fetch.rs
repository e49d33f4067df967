use std::{
    fs::{self, File},
    io::{self, Read},
    path::{Path, PathBuf},
    time::Duration,
};

use log::info;

use crate::Result;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Retrieves the resource at a url into a local file.
pub trait Fetcher {
    /// # Arguments
    /// * `url` - The resource to retrieve.
    /// * `dest` - The file to write it to, created or truncated.
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<()>;
}

impl<F: Fetcher + ?Sized> Fetcher for &mut F {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<()> {
        (**self).fetch(url, dest)
    }
}

/// Blocking HTTP(S) fetcher, one GET per call.
///
/// The body is streamed into `<dest>.part` and only renamed to `dest` once complete, so an
/// interrupted download never leaves a file that looks finished.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .build();

        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut part = dest.as_os_str().to_owned();
    part.push(".part");
    PathBuf::from(part)
}

/// Streams `reader` into `<dest>.part`, then renames it to `dest`.
///
/// # Returns
/// The amount of bytes written. On error the `.part` file is removed and `dest` is untouched.
fn write_atomically<R: Read>(reader: &mut R, dest: &Path) -> Result<u64> {
    let part = part_path(dest);

    let written = File::create(&part).and_then(|mut file| {
        let n = io::copy(reader, &mut file)?;
        file.sync_all()?;
        Ok(n)
    });

    let bytes = match written {
        Ok(bytes) => bytes,
        Err(e) => {
            let _ = fs::remove_file(&part);
            return Err(e.into());
        }
    };

    fs::rename(&part, dest)?;
    Ok(bytes)
}

impl Fetcher for HttpFetcher {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<()> {
        info!(url = url, dest:? = dest; "downloading");

        let response = self.agent.get(url).call()?;
        let bytes = write_atomically(&mut response.into_reader(), dest)?;

        info!(url = url, bytes = bytes; "downloaded");
        Ok(())
    }
}
