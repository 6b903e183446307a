//! Tests for src/resources/registry.rs - Scheme

use super::fixtures::{Gadget, LooseCatalog, Widget};
use crdctl::error::ConversionError;
use crdctl::resources::operators::{self, CatalogSource};
use crdctl::resources::{KindInfo, Scheme, TypedResource};
use kube::core::GroupVersionKind;

fn operators_scheme() -> Scheme {
    let mut scheme = Scheme::new();
    operators::add_to_scheme(&mut scheme);
    scheme
}

// ============================================================================
// registration tests
// ============================================================================

#[test]
fn test_new_scheme_is_empty() {
    let scheme = Scheme::new();
    assert!(scheme.is_empty());
    assert_eq!(scheme.len(), 0);
}

#[test]
fn test_add_to_scheme_registers_catalogsource() {
    let scheme = operators_scheme();
    let info = scheme.resolve(&CatalogSource::gvk()).unwrap();
    assert_eq!(info.gvk.kind, "CatalogSource");
    assert_eq!(info.gvk.group, "operators.coreos.com");
    assert_eq!(info.gvk.version, "v1alpha1");
    assert_eq!(info.plural, "catalogsources");
    assert!(info.namespaced);
    assert!(info.is::<CatalogSource>());
}

#[test]
fn test_register_is_idempotent() {
    let mut once = Scheme::new();
    once.register::<CatalogSource>();

    let mut twice = Scheme::new();
    twice.register::<CatalogSource>().register::<CatalogSource>();

    assert_eq!(once.len(), 1);
    assert_eq!(twice.len(), 1);
    assert_eq!(
        once.resolve(&CatalogSource::gvk()).unwrap(),
        twice.resolve(&CatalogSource::gvk()).unwrap()
    );
}

#[test]
fn test_add_to_scheme_twice_is_idempotent() {
    let mut scheme = operators_scheme();
    operators::add_to_scheme(&mut scheme);
    assert_eq!(scheme.len(), 1);
}

#[test]
fn test_reregistering_different_shape_replaces() {
    let mut scheme = operators_scheme();
    scheme.register::<LooseCatalog>();

    assert_eq!(scheme.len(), 1);
    let info = scheme.resolve(&CatalogSource::gvk()).unwrap();
    assert!(info.is::<LooseCatalog>());
    assert!(!info.is::<CatalogSource>());
}

#[test]
fn test_register_kind_descriptor() {
    let mut scheme = Scheme::new();
    scheme.register_kind(KindInfo::of::<Widget>());
    assert!(scheme.contains(&Widget::gvk()));
}

// ============================================================================
// lookup tests
// ============================================================================

#[test]
fn test_resolve_unknown_kind() {
    let scheme = operators_scheme();
    let gvk = GroupVersionKind::gvk("operators.coreos.com", "v1alpha1", "Subscription");
    let err = scheme.resolve(&gvk).unwrap_err();
    assert_eq!(err.0, gvk);
    assert!(err.to_string().contains("Subscription"));
}

#[test]
fn test_resolve_known_kind_wrong_version() {
    let scheme = operators_scheme();
    let gvk = GroupVersionKind::gvk("operators.coreos.com", "v1", "CatalogSource");
    assert!(scheme.resolve(&gvk).is_err());
    assert!(!scheme.contains(&gvk));
}

#[test]
fn test_resolve_type_unregistered() {
    let scheme = operators_scheme();
    let err = scheme.resolve_type::<Widget>().unwrap_err();
    assert!(matches!(err, ConversionError::Unregistered(_)));
}

#[test]
fn test_resolve_type_shape_mismatch() {
    let scheme = operators_scheme();
    let err = scheme.resolve_type::<LooseCatalog>().unwrap_err();
    match err {
        ConversionError::ShapeMismatch {
            found, registered, ..
        } => {
            assert_eq!(found, "CatalogSource");
            assert!(registered.ends_with("CatalogSource"));
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn test_kinds_for_group_version() {
    let mut scheme = operators_scheme();
    scheme.register::<Widget>().register::<Gadget>();

    let kinds: Vec<_> = scheme
        .kinds_for("operators.coreos.com", "v1alpha1")
        .map(|k| k.gvk.kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["CatalogSource"]);

    assert_eq!(scheme.kinds_for("example.com", "v2").count(), 0);
    assert_eq!(scheme.iter().count(), 3);
}

#[test]
fn test_core_group_kind() {
    let mut scheme = Scheme::new();
    scheme.register::<Gadget>();
    let info = scheme
        .resolve(&GroupVersionKind::gvk("", "v1", "Gadget"))
        .unwrap();
    assert!(!info.namespaced);
}
