use std::fs;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::setup_test_client;
use vmanage_client::{ImportOptions, TemplateImporter, TemplateOutcome, TemplateSet, VManageError};

fn export_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let device_template = json!({
        "templates": [{
            "templateId": "old-device",
            "templateName": "edge",
            "templateDescription": "Edge router",
            "deviceType": "vedge-cloud",
            "configType": "template",
            "factoryDefault": false,
            "policyId": "",
            "generalTemplates": [{"templateId": "3", "templateType": "cisco_logging"}]
        }]
    });
    let features = json!({
        "3": {
            "templateId": "3",
            "templateName": "logging",
            "templateDescription": "Logging",
            "templateType": "cisco_logging",
            "deviceType": ["vedge-cloud"],
            "factoryDefault": false,
            "templateDefinition": {},
            "devicesAttached": 4
        }
    });
    fs::write(dir.path().join("device_template.json"), device_template.to_string()).unwrap();
    fs::write(dir.path().join("edge_features.json"), features.to_string()).unwrap();
    dir
}

#[tokio::test]
async fn test_import_against_http_controller() {
    // What it tests: The whole path from exported files on disk to the device template POST,
    // over a real HTTP session.
    let mock_server = MockServer::start().await;
    let client = setup_test_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/dataservice/template/feature"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dataservice/template/feature"))
        .and(body_partial_json(json!({"templateName": "logging", "templateType": "cisco_logging"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"templateId": "77"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dataservice/template/device/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dataservice/template/device/feature/"))
        .and(body_partial_json(json!({
            "templateName": "edge",
            "generalTemplates": [{"templateId": "77", "templateType": "cisco_logging"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"templateId": "dt-1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = export_dir();
    let set = TemplateSet::from_dir(dir.path()).unwrap();
    let report = TemplateImporter::new(&client).import(&set).await.unwrap();

    assert_eq!(report.outcomes, vec![("edge".to_string(), TemplateOutcome::Created)]);
}

#[tokio::test]
async fn test_import_skips_existing_device_template() {
    let mock_server = MockServer::start().await;
    let client = setup_test_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/dataservice/template/feature"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"templateId": "55", "templateName": "logging"}]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dataservice/template/device/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"templateId": "dt-1", "templateName": "edge"}]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = export_dir();
    let set = TemplateSet::from_dir(dir.path()).unwrap();
    let report = TemplateImporter::new(&client).import(&set).await.unwrap();

    assert_eq!(report.outcome("edge"), Some(&TemplateOutcome::AlreadyExists));
}

#[tokio::test]
async fn test_import_unavailable_listing_aborts_template() {
    let mock_server = MockServer::start().await;
    let client = setup_test_client(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/dataservice/template/feature"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"details": "Database unavailable", "message": "Server error"}
        })))
        .mount(&mock_server)
        .await;

    let dir = export_dir();
    let set = TemplateSet::from_dir(dir.path()).unwrap();

    let report = TemplateImporter::new(&client).import(&set).await.unwrap();
    match report.outcome("edge") {
        Some(TemplateOutcome::Failed(reason)) => assert!(reason.contains("Database unavailable")),
        other => panic!("expected a failed outcome, got {other:?}"),
    }

    let importer = TemplateImporter::with_options(&client, ImportOptions { raise_on_error: true });
    assert!(matches!(
        importer.import(&set).await,
        Err(VManageError::ApiError(_))
    ));
}
