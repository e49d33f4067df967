use std::{
    env, io,
    path::{Path, PathBuf},
};

/// Overrides the datasets root when no explicit one is given.
pub const DATASETS_ENV: &str = "SIANET_DATASETS";

const DEFAULT_SUBDIR: &str = ".sianet/datasets";

/// Resolves the folder every dataset is extracted under.
///
/// # Arguments
/// * `explicit` - The root given on the command line, if any.
///
/// # Returns
/// `explicit`, else the `SIANET_DATASETS` variable, else `$HOME/.sianet/datasets`.
pub fn datasets_root(explicit: Option<&Path>) -> io::Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }

    resolve(env::var_os(DATASETS_ENV), env::var_os("HOME"))
}

fn resolve(
    from_env: Option<std::ffi::OsString>,
    home: Option<std::ffi::OsString>,
) -> io::Result<PathBuf> {
    if let Some(root) = from_env.filter(|root| !root.is_empty()) {
        return Ok(PathBuf::from(root));
    }

    home.map(|home| PathBuf::from(home).join(DEFAULT_SUBDIR))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no datasets root: pass --root, set {DATASETS_ENV} or HOME"),
            )
        })
}
