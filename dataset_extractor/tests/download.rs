use std::{fs, path::Path};

use dataset_extractor::{Fetcher, Result, download_all};

/// Writes the url itself as the file content and counts the calls.
#[derive(Default)]
struct CountingFetcher {
    calls: Vec<String>,
}

impl Fetcher for CountingFetcher {
    fn fetch(&mut self, url: &str, dest: &Path) -> Result<()> {
        self.calls.push(url.to_string());
        fs::write(dest, url)?;
        Ok(())
    }
}

const URLS: &[&str] = &["http://host/a/first.gz", "http://host/b/second.tar.gz"];

#[test]
fn download_creates_tmp_and_fetches_each_url() {
    let root = tempfile::tempdir().unwrap();
    let tmp = root.path().join("Dataset/tmp");
    let mut fetcher = CountingFetcher::default();

    let fetched = download_all(&mut fetcher, &tmp, URLS).unwrap();

    assert_eq!(fetched, 2);
    assert_eq!(fetcher.calls, URLS);
    assert_eq!(
        fs::read_to_string(tmp.join("second.tar.gz")).unwrap(),
        URLS[1]
    );
}

#[test]
fn second_download_fetches_nothing() {
    let root = tempfile::tempdir().unwrap();
    let tmp = root.path().join("tmp");
    let mut fetcher = CountingFetcher::default();

    download_all(&mut fetcher, &tmp, URLS).unwrap();
    let fetched = download_all(&mut fetcher, &tmp, URLS).unwrap();

    assert_eq!(fetched, 0);
    assert_eq!(fetcher.calls.len(), 2);
}

#[test]
fn existing_files_are_trusted() {
    let root = tempfile::tempdir().unwrap();
    let tmp = root.path().join("tmp");
    fs::create_dir_all(&tmp).unwrap();
    fs::write(tmp.join("first.gz"), b"stale").unwrap();

    let mut fetcher = CountingFetcher::default();
    let fetched = download_all(&mut fetcher, &tmp, URLS).unwrap();

    assert_eq!(fetched, 1);
    assert_eq!(fetcher.calls, [URLS[1]]);
    assert_eq!(fs::read(tmp.join("first.gz")).unwrap(), b"stale");
}
