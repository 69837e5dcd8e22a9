//! Zip archive extraction.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use zip::ZipArchive;

use crate::error::{PacksmithError, Result};

/// Extract `archive` into `dest` and return the content root.
///
/// Entries whose names would land outside `dest` are rejected. When every
/// entry lives under one top-level directory (`name-branch/` for hosted
/// archives) that directory is returned, else `dest`.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<PathBuf> {
    let zip_error = |message: String| PacksmithError::Fetch {
        url: archive.display().to_string(),
        message,
    };

    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(file).map_err(|e| zip_error(e.to_string()))?;

    fs::create_dir_all(dest)?;

    let mut top_level = BTreeSet::new();
    let mut nested = false;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(|e| zip_error(e.to_string()))?;

        let Some(relative) = entry.enclosed_name() else {
            return Err(zip_error(format!(
                "entry '{}' escapes the extraction directory",
                entry.name()
            )));
        };

        let mut components = relative.components().filter(|c| matches!(c, Component::Normal(_)));
        if let Some(first) = components.next() {
            top_level.insert(first.as_os_str().to_os_string());
            if components.next().is_some() || entry.is_dir() {
                nested = true;
            }
        }

        let target = dest.join(&relative);
        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        apply_mode(&target, entry.unix_mode())?;
    }

    tracing::debug!("Extracted {} entries into {}", zip.len(), dest.display());

    match top_level.into_iter().collect::<Vec<_>>().as_slice() {
        [single] if nested && dest.join(single).is_dir() => Ok(dest.join(single)),
        _ => Ok(dest.to_path_buf()),
    }
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if let Some(mode) = mode.filter(|m| m & 0o777 != 0) {
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o777))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}
