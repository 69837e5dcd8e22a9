//! Placeholder substitution across a directory tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::template::placeholder::PlaceholderSet;

/// Bytes inspected when deciding whether a file is binary.
const BINARY_SNIFF_LEN: usize = 8000;

/// Summary of a [`fill`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Files and directories whose names were substituted.
    pub renamed: usize,
    /// Files whose contents changed.
    pub rewritten: usize,
    /// Files skipped for content substitution because they look binary.
    pub skipped_binary: usize,
}

impl FillReport {
    /// Check if the run touched nothing.
    pub fn is_noop(&self) -> bool {
        self.renamed == 0 && self.rewritten == 0
    }
}

/// Apply `placeholders` to every entry below `root`.
///
/// For each entry (the root itself excluded), a name containing a token is
/// substituted and the entry renamed; for regular files the contents are
/// then substituted pass by pass. Binary files keep their bytes but are
/// still renamed.
///
/// The walk is collected up front with children before their parent, so
/// renaming an entry never invalidates a path still to be visited.
pub fn fill(root: &Path, placeholders: &PlaceholderSet) -> Result<FillReport> {
    let mut report = FillReport::default();
    if placeholders.is_empty() {
        return Ok(report);
    }

    let entries = WalkDir::new(root)
        .min_depth(1)
        .contents_first(true)
        .sort_by_file_name()
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(std::io::Error::from)?;

    for entry in entries {
        let path = rename_entry(entry.path(), placeholders, &mut report)?;

        if entry.file_type().is_file() {
            substitute_contents(&path, placeholders, &mut report)?;
        }
    }

    tracing::debug!(
        "Filled {}: {} renamed, {} rewritten, {} binary skipped",
        root.display(),
        report.renamed,
        report.rewritten,
        report.skipped_binary
    );
    Ok(report)
}

fn rename_entry(
    path: &Path,
    placeholders: &PlaceholderSet,
    report: &mut FillReport,
) -> Result<PathBuf> {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return Ok(path.to_path_buf());
    };

    if !placeholders.matches(file_name) {
        return Ok(path.to_path_buf());
    }

    let target = path.with_file_name(placeholders.apply(file_name));
    if target != path {
        if fs::symlink_metadata(&target).is_ok() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!(
                    "cannot rename {} to {}: target already exists",
                    path.display(),
                    target.display()
                ),
            )
            .into());
        }
        tracing::debug!("Renaming {} to {}", path.display(), target.display());
        fs::rename(path, &target)?;
        report.renamed += 1;
    }
    Ok(target)
}

fn substitute_contents(
    path: &Path,
    placeholders: &PlaceholderSet,
    report: &mut FillReport,
) -> Result<()> {
    let bytes = fs::read(path)?;

    let Some(text) = as_text(&bytes) else {
        tracing::debug!("Skipping binary file {}", path.display());
        report.skipped_binary += 1;
        return Ok(());
    };

    let replaced = placeholders.apply(text);
    if replaced != text {
        fs::write(path, replaced)?;
        report.rewritten += 1;
    }
    Ok(())
}

/// Interpret `bytes` as text, or `None` if they look binary.
///
/// A NUL byte near the start or invalid UTF-8 marks the file as binary.
fn as_text(bytes: &[u8]) -> Option<&str> {
    let head = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    if head.contains(&0) {
        return None;
    }
    std::str::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn set(tokens: &[&str], values: &[&str]) -> PlaceholderSet {
        let mut builder = PlaceholderSet::builder();
        builder.replace(tokens, values).unwrap();
        builder.build()
    }

    #[test]
    fn renames_file_and_substitutes_contents() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(":lc:vendor-:lc:package.php"),
            "class :uc:packageServiceProvider",
        )
        .unwrap();

        let placeholders = set(
            &[":lc:vendor", ":lc:package", ":uc:package"],
            &["acme", "widget", "Widget"],
        );
        let report = fill(temp.path(), &placeholders).unwrap();

        let target = temp.path().join("acme-widget.php");
        assert!(target.is_file());
        assert!(!temp.path().join(":lc:vendor-:lc:package.php").exists());
        assert_eq!(
            fs::read_to_string(target).unwrap(),
            "class WidgetServiceProvider"
        );
        assert_eq!(report.renamed, 1);
        assert_eq!(report.rewritten, 1);
    }

    #[test]
    fn rename_onto_existing_file_fails_without_overwriting() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("widget.php"), "original").unwrap();
        fs::write(temp.path().join(":lc:package.php"), "templated").unwrap();

        let err = fill(temp.path(), &set(&[":lc:package"], &["widget"])).unwrap_err();

        assert!(matches!(
            err,
            crate::error::PacksmithError::Io(ref e) if e.kind() == io::ErrorKind::AlreadyExists
        ));
        assert_eq!(
            fs::read_to_string(temp.path().join("widget.php")).unwrap(),
            "original"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join(":lc:package.php")).unwrap(),
            "templated"
        );
    }

    #[test]
    fn renames_nested_directories() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join(":lc:vendor").join(":uc:package");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join(":uc:package.txt"), ":uc:package").unwrap();

        let placeholders = set(&[":lc:vendor", ":uc:package"], &["acme", "Widget"]);
        let report = fill(temp.path(), &placeholders).unwrap();

        let file = temp.path().join("acme").join("Widget").join("Widget.txt");
        assert_eq!(fs::read_to_string(file).unwrap(), "Widget");
        assert_eq!(report.renamed, 3);
    }

    #[test]
    fn second_fill_is_a_noop() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(":name.md"), "# :name").unwrap();

        let placeholders = set(&[":name"], &["widget"]);
        fill(temp.path(), &placeholders).unwrap();
        let second = fill(temp.path(), &placeholders).unwrap();

        assert!(second.is_noop());
        assert_eq!(
            fs::read_to_string(temp.path().join("widget.md")).unwrap(),
            "# widget"
        );
    }

    #[test]
    fn binary_files_keep_their_bytes_but_are_renamed() {
        let temp = TempDir::new().unwrap();
        let bytes = b"\x89PNG\r\n\x1a\n\0\0:name\0".to_vec();
        fs::write(temp.path().join(":name.png"), &bytes).unwrap();

        let report = fill(temp.path(), &set(&[":name"], &["logo"])).unwrap();

        assert_eq!(fs::read(temp.path().join("logo.png")).unwrap(), bytes);
        assert_eq!(report.skipped_binary, 1);
        assert_eq!(report.rewritten, 0);
    }

    #[test]
    fn invalid_utf8_is_treated_as_binary() {
        assert!(as_text(b"ok :name").is_some());
        assert!(as_text(&[0xff, 0xfe, b':']).is_none());
        assert!(as_text(b"nul\0inside").is_none());
    }

    #[test]
    fn passes_run_in_order_over_contents() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("composer.json"), "\":author_name\"").unwrap();

        let placeholders = set(
            &[":author_name", ":lc:vendor"],
            &[":lc:vendor team", "acme"],
        );
        fill(temp.path(), &placeholders).unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("composer.json")).unwrap(),
            "\"acme team\""
        );
    }

    #[test]
    fn unchanged_files_are_not_counted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "plain").unwrap();

        let report = fill(temp.path(), &set(&[":name"], &["x"])).unwrap();
        assert!(report.is_noop());
    }

    #[test]
    fn empty_set_touches_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(":name"), ":name").unwrap();

        let report = fill(temp.path(), &PlaceholderSet::default()).unwrap();
        assert!(report.is_noop());
        assert!(temp.path().join(":name").exists());
    }

    #[test]
    fn root_itself_is_not_renamed() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(":name");
        fs::create_dir(&root).unwrap();

        fill(&root, &set(&[":name"], &["x"])).unwrap();
        assert!(root.is_dir());
    }
}
