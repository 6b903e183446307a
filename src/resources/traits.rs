//! Core traits for typed custom resources

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::{GroupVersion, GroupVersionKind};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::{self, Debug};

/// Trait implemented by every fixed-shape resource that can be registered in a
/// [`Scheme`](super::Scheme)
pub trait TypedResource:
    Clone + Debug + DeserializeOwned + Serialize + Send + Sync + 'static
{
    /// The API kind (e.g., "CatalogSource")
    const KIND: &'static str;

    /// The API group (e.g., "operators.coreos.com")
    const GROUP: &'static str;

    /// The API version (e.g., "v1alpha1")
    const VERSION: &'static str;

    /// Plural name for API path (e.g., "catalogsources")
    const PLURAL: &'static str;

    /// Whether this resource is namespaced
    const NAMESPACED: bool = true;

    /// Get object metadata
    fn metadata(&self) -> &ObjectMeta;

    /// Get mutable object metadata
    fn metadata_mut(&mut self) -> &mut ObjectMeta;

    /// The group/version/kind this shape is served under
    fn gvk() -> GroupVersionKind {
        GroupVersionKind::gvk(Self::GROUP, Self::VERSION, Self::KIND)
    }

    /// The group/version used to route requests for this shape
    fn group_version() -> GroupVersion {
        GroupVersion::gv(Self::GROUP, Self::VERSION)
    }

    /// Get the resource name
    fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or("<unknown>")
    }

    /// Get the resource namespace (if namespaced)
    fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }
}

/// The (namespace, name) pair that addresses a single resource instance
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub namespace: String,
    pub name: String,
}

impl ObjectKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Write this key into object metadata, replacing any name/namespace there
    pub fn apply_to(&self, meta: &mut ObjectMeta) {
        meta.name = Some(self.name.clone());
        meta.namespace = Some(self.namespace.clone());
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Split an `apiVersion` string into (group, version)
///
/// Core resources carry a bare version ("v1") and map to the empty group.
pub fn parse_api_version(api_version: &str) -> Option<(&str, &str)> {
    match api_version.split_once('/') {
        Some((group, version)) if !group.is_empty() && !version.is_empty() => {
            Some((group, version))
        }
        Some(_) => None,
        None if !api_version.is_empty() => Some(("", api_version)),
        None => None,
    }
}
