use std::{fs, path::Path};

use log::info;

use crate::{ExtractErr, Result, fetch::Fetcher};

/// The local file name of `url`: its last path segment, without query or fragment.
pub fn file_name(url: &str) -> Result<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);

    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ExtractErr::Format(format!("url {url} has no file name"))),
    }
}

/// Downloads every url into `tmp`, skipping the files that are already there.
///
/// Existing files are trusted as they are, no integrity check is made.
///
/// # Arguments
/// * `fetcher` - Performs the actual downloads.
/// * `tmp` - The folder to download into, created if missing.
/// * `urls` - The resources to download.
///
/// # Returns
/// The amount of fetches issued or the first failed one.
pub fn download_all<F: Fetcher + ?Sized>(fetcher: &mut F, tmp: &Path, urls: &[&str]) -> Result<usize> {
    fs::create_dir_all(tmp)?;
    let mut fetched = 0;

    for &url in urls {
        let dest = tmp.join(file_name(url)?);

        if dest.exists() {
            info!(dest:? = dest; "already downloaded, skipping");
            continue;
        }

        fetcher.fetch(url, &dest)?;
        fetched += 1;
    }

    Ok(fetched)
}
