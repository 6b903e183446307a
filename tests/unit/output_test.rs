//! Tests for src/output/mod.rs - output formatting

use crdctl::convert;
use crdctl::output::{format_document, format_json, format_name, format_resource, OutputFormat};
use crdctl::resources::operators::CatalogSource;

fn catalog() -> CatalogSource {
    CatalogSource::grpc("cs-typed-client", "img")
        .with_namespace("default")
        .with_display_name("Typed")
}

#[test]
fn test_format_name() {
    assert_eq!(
        format_name(&catalog()),
        "catalogsource/default/cs-typed-client"
    );
}

#[test]
fn test_format_name_without_namespace() {
    let cs = CatalogSource::grpc("bare", "img");
    assert_eq!(format_name(&cs), "catalogsource/bare");
}

#[test]
fn test_format_resource_yaml() {
    let out = format_resource(&catalog(), OutputFormat::Yaml).unwrap();
    assert!(out.contains("apiVersion: operators.coreos.com/v1alpha1"));
    assert!(out.contains("kind: CatalogSource"));
    assert!(out.contains("displayName: Typed"));
}

#[test]
fn test_format_resource_json() {
    let out = format_resource(&catalog(), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["kind"], "CatalogSource");
    assert_eq!(value["metadata"]["namespace"], "default");
}

#[test]
fn test_format_document_name() {
    let doc = convert::to_untyped(&catalog()).unwrap();
    assert_eq!(
        format_document(&doc, OutputFormat::Name).unwrap(),
        "catalogsource/default/cs-typed-client"
    );
}

#[test]
fn test_format_document_json() {
    let doc = convert::to_untyped(&catalog()).unwrap();
    let out = format_document(&doc, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["apiVersion"], "operators.coreos.com/v1alpha1");
    assert_eq!(value["spec"]["image"], "img");
}

#[test]
fn test_format_json_compact() {
    let out = format_json(&serde_json::json!({"a": 1}), false).unwrap();
    assert_eq!(out, r#"{"a":1}"#);
}
