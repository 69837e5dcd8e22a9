//! Integration tests for placeholder templating.

use packsmith::template::{apply_manifest, fill, PlaceholderSet, MANIFEST_FILE};
use packsmith::PacksmithError;
use std::fs;
use tempfile::TempDir;

#[test]
fn mismatched_lists_leave_the_set_unchanged() {
    let mut builder = PlaceholderSet::builder();
    builder.replace(&[":lc:vendor"], &["acme"]).unwrap();

    let err = builder.replace(&["a", "b"], &["X"]).unwrap_err();

    assert!(matches!(err, PacksmithError::MismatchedArity { .. }));
    assert_eq!(builder.build().pairs().len(), 1);
}

#[test]
fn fill_renames_and_rewrites() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(":lc:vendor-:lc:package.php"),
        "class :uc:packageServiceProvider",
    )
    .unwrap();

    let mut builder = PlaceholderSet::builder();
    builder
        .replace(
            &[":lc:vendor", ":lc:package", ":uc:package"],
            &["acme", "widget", "Widget"],
        )
        .unwrap();
    fill(temp.path(), &builder.build()).unwrap();

    let content = fs::read_to_string(temp.path().join("acme-widget.php")).unwrap();
    assert!(content.contains("class WidgetServiceProvider"));
}

#[test]
fn second_fill_changes_nothing() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src/:uc:package")).unwrap();
    fs::write(temp.path().join("src/:uc:package/:uc:package.php"), ":uc:package").unwrap();

    let mut builder = PlaceholderSet::builder();
    builder.pair(":uc:package", "Widget");
    let set = builder.build();

    let first = fill(temp.path(), &set).unwrap();
    let second = fill(temp.path(), &set).unwrap();

    assert!(!first.is_noop());
    assert!(second.is_noop());
    assert_eq!(
        fs::read_to_string(temp.path().join("src/Widget/Widget.php")).unwrap(),
        "Widget"
    );
}

#[test]
fn manifest_rename_then_fill() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("src")).unwrap();
    fs::write(
        temp.path().join("src/SkeletonClass.php"),
        "class :uc:package {}",
    )
    .unwrap();
    fs::write(
        temp.path().join(MANIFEST_FILE),
        "src/SkeletonClass.php: 'src/:uc:package.php'\n",
    )
    .unwrap();

    apply_manifest(temp.path()).unwrap();
    let mut builder = PlaceholderSet::builder();
    builder.pair(":uc:package", "Widget");
    fill(temp.path(), &builder.build()).unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join("src/Widget.php")).unwrap(),
        "class Widget {}"
    );
    assert!(!temp.path().join(MANIFEST_FILE).exists());
    assert!(!temp.path().join("src/SkeletonClass.php").exists());
}

#[test]
fn binary_content_is_preserved() {
    let temp = TempDir::new().unwrap();
    let bytes = vec![0u8, 1, 2, b':', b'x', 0, 255];
    fs::write(temp.path().join("data.bin"), &bytes).unwrap();

    let mut builder = PlaceholderSet::builder();
    builder.pair(":x", "y");
    let report = fill(temp.path(), &builder.build()).unwrap();

    assert_eq!(fs::read(temp.path().join("data.bin")).unwrap(), bytes);
    assert_eq!(report.skipped_binary, 1);
}
