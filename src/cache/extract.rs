//! Runtime payload extraction.
//!
//! Release archives are zips containing the runtime executable as a
//! `bootstrap` entry (optionally nested one directory deep). Extraction
//! writes only that entry; everything else in the archive is discarded.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::cache::BINARY_NAME;
use crate::error::{Result, SkiffError};

/// Extract the `bootstrap` entry of `archive` into `dest`.
///
/// `origin` names the archive in error messages (normally its URL).
/// Returns the path of the extracted binary, marked executable on unix.
pub fn extract_binary(archive: &[u8], dest: &Path, origin: &str) -> Result<PathBuf> {
    let mut zip = ZipArchive::new(Cursor::new(archive)).map_err(|e| SkiffError::Fetch {
        url: origin.to_string(),
        message: format!("corrupt archive: {e}"),
    })?;

    let entry_name = zip
        .file_names()
        .find(|name| *name == BINARY_NAME || name.ends_with(&format!("/{BINARY_NAME}")))
        .map(str::to_string)
        .ok_or_else(|| SkiffError::Extraction {
            archive: origin.to_string(),
            message: format!("no `{BINARY_NAME}` entry in archive"),
        })?;

    let mut entry = zip.by_name(&entry_name).map_err(|e| SkiffError::Fetch {
        url: origin.to_string(),
        message: format!("corrupt archive: {e}"),
    })?;

    let out_path = dest.join(BINARY_NAME);
    let mut out = fs::File::create(&out_path)?;
    io::copy(&mut entry, &mut out).map_err(|e| SkiffError::Fetch {
        url: origin.to_string(),
        message: format!("truncated archive: {e}"),
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&out_path, fs::Permissions::from_mode(0o755))?;
    }

    Ok(out_path)
}
