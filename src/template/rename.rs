//! Skeleton rename manifests.
//!
//! A skeleton may ship a `rewrite-rules.yml` at its root mapping relative
//! source paths to relative targets:
//!
//! ```yaml
//! src/SkeletonClass.php: src/:uc:package.php
//! config/*.php: config/:lc:package-*.php
//! ```
//!
//! Rules run in file order before placeholder substitution, so targets may
//! contain tokens. A single `*` in the last segment of a source matches any
//! run of characters; a `*` in the target is replaced by what it matched.
//! The manifest file is deleted once applied.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde_yaml::Mapping;

use crate::error::{PacksmithError, Result};

/// File name of the rename manifest at the skeleton root.
pub const MANIFEST_FILE: &str = "rewrite-rules.yml";

/// A single `from -> to` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRule {
    /// Source path relative to the package root, possibly with a `*`.
    pub from: String,
    /// Target path relative to the package root.
    pub to: String,
}

/// An ordered list of rename rules read from a skeleton.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameManifest {
    rules: Vec<RenameRule>,
}

impl RenameManifest {
    /// Create a manifest from rules.
    pub fn new(rules: Vec<RenameRule>) -> Self {
        Self { rules }
    }

    /// Parse manifest YAML. `source` is used in error messages.
    pub fn parse(content: &str, source: &Path) -> Result<Self> {
        let invalid = |message: String| PacksmithError::InvalidManifest {
            path: source.to_path_buf(),
            message,
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let mapping: Mapping =
            serde_yaml::from_str(content).map_err(|e| invalid(e.to_string()))?;

        let mut rules = Vec::with_capacity(mapping.len());
        for (from, to) in mapping {
            let (Some(from), Some(to)) = (from.as_str(), to.as_str()) else {
                return Err(invalid("rules must map strings to strings".to_string()));
            };
            for path in [from, to] {
                if !is_contained(path) {
                    return Err(invalid(format!("path '{}' escapes the package", path)));
                }
            }
            if from.matches('*').count() > 1 || to.matches('*').count() > 1 {
                return Err(invalid(format!("rule '{}' has more than one '*'", from)));
            }
            if from.rsplit_once('/').is_some_and(|(dir, _)| dir.contains('*')) {
                return Err(invalid(format!(
                    "'*' is only allowed in the last segment of '{}'",
                    from
                )));
            }
            rules.push(RenameRule {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        Ok(Self { rules })
    }

    /// Read the manifest at the root of `package_root`, if there is one.
    pub fn load(package_root: &Path) -> Result<Option<Self>> {
        let path = package_root.join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Self::parse(&content, &path).map(Some)
    }

    /// The rules in application order.
    pub fn rules(&self) -> &[RenameRule] {
        &self.rules
    }

    /// Apply every rule under `package_root`.
    ///
    /// Returns the number of paths renamed. Rules whose source does not
    /// exist are skipped.
    pub fn apply(&self, package_root: &Path) -> Result<usize> {
        let mut renamed = 0;

        for rule in &self.rules {
            let moves = expand(package_root, rule)?;
            if moves.is_empty() {
                tracing::warn!("Rename rule '{}' matched nothing", rule.from);
                continue;
            }

            for (from, to) in moves {
                if from == to {
                    continue;
                }
                if fs::symlink_metadata(&to).is_ok() {
                    return Err(PacksmithError::InvalidManifest {
                        path: package_root.join(MANIFEST_FILE),
                        message: format!(
                            "rule '{}' would overwrite existing '{}'",
                            rule.from,
                            to.strip_prefix(package_root).unwrap_or(&to).display()
                        ),
                    });
                }
                if let Some(parent) = to.parent() {
                    fs::create_dir_all(parent)?;
                }
                tracing::debug!("Renaming {} to {}", from.display(), to.display());
                fs::rename(&from, &to)?;
                renamed += 1;
            }
        }

        Ok(renamed)
    }
}

/// Apply the skeleton's manifest (if present) and delete it.
///
/// Returns `Ok(None)` when the skeleton has no manifest.
pub fn apply_manifest(package_root: &Path) -> Result<Option<usize>> {
    let Some(manifest) = RenameManifest::load(package_root)? else {
        return Ok(None);
    };

    let renamed = manifest.apply(package_root)?;

    let manifest_path = package_root.join(MANIFEST_FILE);
    if manifest_path.exists() {
        fs::remove_file(&manifest_path)?;
    }
    Ok(Some(renamed))
}

/// Resolve a rule into concrete `(from, to)` paths.
fn expand(root: &Path, rule: &RenameRule) -> Result<Vec<(PathBuf, PathBuf)>> {
    let (dir, last) = rule
        .from
        .rsplit_once('/')
        .unwrap_or(("", rule.from.as_str()));

    let Some((head, tail)) = last.split_once('*') else {
        let from = root.join(&rule.from);
        return Ok(if from.exists() {
            vec![(from, root.join(&rule.to))]
        } else {
            Vec::new()
        });
    };

    let dir_path = root.join(dir);
    if !dir_path.is_dir() {
        return Ok(Vec::new());
    }

    let mut names: Vec<String> = fs::read_dir(&dir_path)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.len() >= head.len() + tail.len())
        .filter(|name| name.starts_with(head) && name.ends_with(tail))
        .collect();
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| {
            let matched = &name[head.len()..name.len() - tail.len()];
            (dir_path.join(&name), root.join(rule.to.replace('*', matched)))
        })
        .collect())
}

/// Relative, no `..`, no root or drive prefix.
fn is_contained(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    #[test]
    fn parses_rules_in_file_order() {
        let manifest = RenameManifest::parse(
            "b.txt: z.txt\na.txt: y.txt\n",
            Path::new(MANIFEST_FILE),
        )
        .unwrap();
        let froms: Vec<&str> = manifest.rules().iter().map(|r| r.from.as_str()).collect();
        assert_eq!(froms, vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn empty_manifest_has_no_rules() {
        let manifest = RenameManifest::parse("  \n", Path::new(MANIFEST_FILE)).unwrap();
        assert!(manifest.rules().is_empty());
    }

    #[test]
    fn rejects_escaping_paths() {
        for yaml in ["../x: y", "x: ../y", "/etc/passwd: y", "a: /tmp/b"] {
            let err = RenameManifest::parse(yaml, Path::new(MANIFEST_FILE)).unwrap_err();
            assert!(
                matches!(err, PacksmithError::InvalidManifest { .. }),
                "expected rejection for {yaml:?}"
            );
        }
    }

    #[test]
    fn rejects_non_string_rules() {
        let err = RenameManifest::parse("a: [1, 2]", Path::new(MANIFEST_FILE)).unwrap_err();
        assert!(matches!(err, PacksmithError::InvalidManifest { .. }));
    }

    #[test]
    fn rejects_wildcards_outside_last_segment() {
        let err = RenameManifest::parse("src/*/a.php: b.php", Path::new(MANIFEST_FILE))
            .unwrap_err();
        assert!(matches!(err, PacksmithError::InvalidManifest { .. }));
    }

    #[test]
    fn applies_literal_rules_and_creates_parents() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/SkeletonClass.php");

        let manifest = RenameManifest::new(vec![RenameRule {
            from: "src/SkeletonClass.php".into(),
            to: "src/Widget/:uc:package.php".into(),
        }]);
        let renamed = manifest.apply(temp.path()).unwrap();

        assert_eq!(renamed, 1);
        assert!(temp.path().join("src/Widget/:uc:package.php").is_file());
        assert!(!temp.path().join("src/SkeletonClass.php").exists());
    }

    #[test]
    fn applies_wildcard_rules() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "config/app.php");
        touch(temp.path(), "config/routes.php");
        touch(temp.path(), "config/notes.txt");

        let manifest =
            RenameManifest::parse("config/*.php: config/:lc:package-*.php", Path::new("m"))
                .unwrap();
        let renamed = manifest.apply(temp.path()).unwrap();

        assert_eq!(renamed, 2);
        assert!(temp.path().join("config/:lc:package-app.php").is_file());
        assert!(temp.path().join("config/:lc:package-routes.php").is_file());
        assert!(temp.path().join("config/notes.txt").is_file());
    }

    #[test]
    fn wildcard_onto_single_target_fails_without_overwriting() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "config/app.php");
        touch(temp.path(), "config/routes.php");

        let manifest = RenameManifest::parse("config/*.php: config/all.php", Path::new("m")).unwrap();
        let err = manifest.apply(temp.path()).unwrap_err();

        assert!(matches!(err, PacksmithError::InvalidManifest { .. }));
        assert!(err.to_string().contains("config/all.php"));
        let survivors = ["config/app.php", "config/routes.php", "config/all.php"]
            .iter()
            .filter(|rel| temp.path().join(rel).is_file())
            .count();
        assert_eq!(survivors, 2);
    }

    #[test]
    fn literal_rule_onto_existing_file_fails() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/SkeletonClass.php");
        touch(temp.path(), "src/Widget.php");

        let manifest =
            RenameManifest::parse("src/SkeletonClass.php: src/Widget.php", Path::new("m")).unwrap();
        let err = manifest.apply(temp.path()).unwrap_err();

        assert!(matches!(err, PacksmithError::InvalidManifest { .. }));
        assert_eq!(
            fs::read_to_string(temp.path().join("src/Widget.php")).unwrap(),
            "src/Widget.php"
        );
    }

    #[test]
    fn wildcard_in_root_segment() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "skeleton.md");

        let manifest = RenameManifest::parse("skeleton*: ':lc:package*'", Path::new("m")).unwrap();
        manifest.apply(temp.path()).unwrap();

        assert!(temp.path().join(":lc:package.md").is_file());
    }

    #[test]
    fn missing_sources_are_skipped() {
        let temp = TempDir::new().unwrap();
        let manifest = RenameManifest::parse("nope.txt: yes.txt", Path::new("m")).unwrap();
        assert_eq!(manifest.apply(temp.path()).unwrap(), 0);
    }

    #[test]
    fn apply_manifest_deletes_manifest_file() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Skeleton.php");
        fs::write(
            temp.path().join(MANIFEST_FILE),
            "Skeleton.php: ':uc:package.php'\n",
        )
        .unwrap();

        let renamed = apply_manifest(temp.path()).unwrap();

        assert_eq!(renamed, Some(1));
        assert!(temp.path().join(":uc:package.php").is_file());
        assert!(!temp.path().join(MANIFEST_FILE).exists());
    }

    #[test]
    fn apply_manifest_without_manifest_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        assert_eq!(apply_manifest(temp.path()).unwrap(), None);
    }
}
