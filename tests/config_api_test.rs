//! Integration tests for config module public API.

use packsmith::config::{
    load_config, load_from_paths, ConfigPaths, PacksmithConfig, CONFIG_DIR, CONFIG_FILE,
    DEFAULT_SKELETON,
};
use packsmith::PacksmithError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_config(dir: &Path, content: &str) {
    let config_dir = dir.join(CONFIG_DIR);
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join(CONFIG_FILE), content).unwrap();
}

#[test]
fn defaults_without_any_file() {
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    let paths = ConfigPaths::discover_with_home(project.path(), Some(home.path()));
    let config = load_from_paths(&paths).unwrap();

    assert_eq!(config.skeleton.url, DEFAULT_SKELETON);
    assert_eq!(config.skeleton.branch, "master");
    assert_eq!(config.license, "MIT");
    assert_eq!(config.paths.packages, Path::new("packages"));
    assert_eq!(config.paths.manifest, Path::new("composer.json"));
}

#[test]
fn project_config_overrides_user_config() {
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();

    write_config(
        home.path(),
        r#"
author:
  name: Jane Doe
  email: jane@example.com
license: Apache-2.0
repositories:
  git.example.com: "https://git.example.com/:vendor/:name/:branch.zip"
"#,
    );
    write_config(
        project.path(),
        r#"
author:
  email: team@example.com
paths:
  packages: vendor-src
install:
  command: "composer update :vendor/:name"
"#,
    );

    let paths = ConfigPaths::discover_with_home(project.path(), Some(home.path()));
    let config = load_from_paths(&paths).unwrap();

    assert_eq!(config.author.name, "Jane Doe");
    assert_eq!(config.author.email, "team@example.com");
    assert_eq!(config.license, "Apache-2.0");
    assert_eq!(config.paths.packages, Path::new("vendor-src"));
    assert_eq!(
        config.install.command.as_deref(),
        Some("composer update :vendor/:name")
    );
    assert!(config.repositories.contains_key("git.example.com"));
}

#[test]
fn explicit_config_file_is_used() {
    let project = TempDir::new().unwrap();
    let custom = project.path().join("custom.yml");
    fs::write(&custom, "skeleton:\n  branch: main\n").unwrap();

    let config = load_config(project.path(), Some(custom.as_path())).unwrap();
    assert_eq!(config.skeleton.branch, "main");
}

#[test]
fn missing_explicit_config_is_reported() {
    let project = TempDir::new().unwrap();
    let err = load_config(project.path(), Some(project.path().join("nope.yml").as_path())).unwrap_err();
    assert!(matches!(err, PacksmithError::ConfigNotFound { .. }));
}

#[test]
fn malformed_config_is_reported() {
    let project = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_config(project.path(), "author: [not, a, mapping]\n");

    let paths = ConfigPaths::discover_with_home(project.path(), Some(home.path()));
    let err = load_from_paths(&paths).unwrap_err();
    assert!(matches!(err, PacksmithError::ConfigParseError { .. }));
}

#[test]
fn default_config_serializes() {
    let yaml = serde_yaml::to_string(&PacksmithConfig::default()).unwrap();
    assert!(yaml.contains("packager-skeleton"));
}
