//! End-to-end tests for the scaffolder over HTTP.

use std::fs;
use std::io::Write;

use httpmock::prelude::*;
use packsmith::config::PacksmithConfig;
use packsmith::scaffold::{CreateRequest, FetchRequest, Scaffolder};
use packsmith::ui::MockUI;
use packsmith::PacksmithError;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn zip_of(files: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (path, content) in files {
        zip.start_file(*path, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Config whose custom host points at the mock server.
fn config_for(server: &MockServer) -> PacksmithConfig {
    let mut config = PacksmithConfig::default();
    config.author.name = "Jane Doe".into();
    config.repositories.insert(
        server.address().to_string(),
        format!("{}/:vendor/:name/:branch.zip", server.base_url()),
    );
    config
}

#[test]
fn create_from_skeleton_served_over_http() {
    let server = MockServer::start();
    let archive = server.mock(|when, then| {
        when.method(GET).path("/acme/skeleton/develop.zip");
        then.status(200).body(zip_of(&[
            ("skeleton-develop/composer.json", r#"{"name": ":lc:vendor/:lc:package"}"#),
            ("skeleton-develop/LICENSE.md", ":license by :author_name"),
        ]));
    });

    let temp = TempDir::new().unwrap();
    let mut scaffolder = Scaffolder::new(temp.path(), config_for(&server)).unwrap();
    let mut ui = MockUI::new();

    let request = CreateRequest {
        vendor: "Acme".into(),
        name: "Widget".into(),
        skeleton: Some(server.url("/acme/skeleton")),
        branch: Some("develop".into()),
        ..Default::default()
    };
    scaffolder.create(&request, &mut ui).unwrap();

    archive.assert();
    let package = temp.path().join("packages/Acme/Widget");
    assert_eq!(
        fs::read_to_string(package.join("composer.json")).unwrap(),
        r#"{"name": "acme/widget"}"#
    );
    assert_eq!(
        fs::read_to_string(package.join("LICENSE.md")).unwrap(),
        "MIT by Jane Doe"
    );
    assert!(ui.has_success("Package created successfully!"));
}

#[test]
fn download_existing_package_over_http() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/acme/widget/master.zip");
        then.status(200)
            .body(zip_of(&[("widget-master/src/Widget.php", "<?php")]));
    });

    let temp = TempDir::new().unwrap();
    let mut scaffolder = Scaffolder::new(temp.path(), config_for(&server)).unwrap();
    let mut ui = MockUI::new();

    let location = scaffolder
        .download(
            &FetchRequest {
                url: server.url("/acme/widget"),
                ..Default::default()
            },
            &mut ui,
        )
        .unwrap();

    assert!(location.package_path().join("src/Widget.php").is_file());
    assert!(ui.has_success("Package downloaded successfully!"));
    let listed = scaffolder.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].registered);
}

#[test]
fn http_error_is_a_fetch_error_and_nothing_is_registered() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/acme/widget/master.zip");
        then.status(404);
    });

    let temp = TempDir::new().unwrap();
    let mut scaffolder = Scaffolder::new(temp.path(), config_for(&server)).unwrap();

    let err = scaffolder
        .download(
            &FetchRequest {
                url: server.url("/acme/widget"),
                ..Default::default()
            },
            &mut MockUI::new(),
        )
        .unwrap_err();

    assert!(matches!(err, PacksmithError::Fetch { .. }));
    assert!(!temp.path().join("packages/acme/widget").exists());
    assert!(scaffolder.list().unwrap().is_empty());
}

#[test]
fn package_index_canonicalizes_shorthand() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/packages/acme/widget.json");
        then.status(200).json_body(serde_json::json!({
            "package": { "repository": server.url("/Acme/Widget") }
        }));
    });
    let archive = server.mock(|when, then| {
        when.method(GET).path("/Acme/Widget/master.zip");
        then.status(200)
            .body(zip_of(&[("Widget-master/README.md", "widget")]));
    });

    let temp = TempDir::new().unwrap();
    let mut config = config_for(&server);
    config.package_index = Some(server.base_url());
    let mut scaffolder = Scaffolder::new(temp.path(), config).unwrap();

    let location = scaffolder
        .download(
            &FetchRequest {
                url: "acme/widget".into(),
                ..Default::default()
            },
            &mut MockUI::new(),
        )
        .unwrap();

    archive.assert();
    assert_eq!(location.relative_to(temp.path()), "packages/Acme/Widget");
}
