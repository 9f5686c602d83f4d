use std::path::PathBuf;

use crate::Error;

/// Resolve where transcripts live: an explicit directory wins, otherwise the
/// platform data directory is used.
pub fn resolve_base(explicit: Option<PathBuf>) -> Result<PathBuf, Error> {
    match explicit {
        Some(path) => Ok(path),
        None => compute_default_base().ok_or(Error::DataDirUnavailable),
    }
}

pub fn compute_default_base() -> Option<PathBuf> {
    let data_dir = dirs::data_dir()?;
    Some(data_dir.join(resolve_app_folder()))
}

fn resolve_app_folder() -> &'static str {
    if cfg!(debug_assertions) {
        "caption-edit-dev"
    } else {
        "caption-edit"
    }
}
