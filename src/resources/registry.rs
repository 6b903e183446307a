//! Type registry mapping group/version/kind to typed shapes

use crate::error::{ConversionError, UnregisteredKind};
use crate::resources::TypedResource;
use kube::core::GroupVersionKind;
use std::any::{type_name, TypeId};
use std::collections::{BTreeMap, HashMap};
use tracing::{trace, warn};

/// Shape descriptor for a registered kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindInfo {
    pub gvk: GroupVersionKind,
    pub plural: String,
    pub namespaced: bool,
    type_id: TypeId,
    type_name: &'static str,
}

impl KindInfo {
    /// Describe the shape of `K`
    pub fn of<K: TypedResource>() -> Self {
        Self {
            gvk: K::gvk(),
            plural: K::PLURAL.to_string(),
            namespaced: K::NAMESPACED,
            type_id: TypeId::of::<K>(),
            type_name: type_name::<K>(),
        }
    }

    /// Rust type bound to this kind
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether `K` is the Rust type bound to this kind
    pub fn is<K: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<K>()
    }
}

type GroupVersionKey = (String, String);

/// Registry of typed shapes, keyed by (group, version) and then kind.
///
/// Built once, then shared read-only (usually behind an `Arc`). Registration
/// takes `&mut self`, so it cannot overlap with lookups.
#[derive(Debug, Default, Clone)]
pub struct Scheme {
    groups: HashMap<GroupVersionKey, BTreeMap<String, KindInfo>>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `K` under its own group/version/kind
    pub fn register<K: TypedResource>(&mut self) -> &mut Self {
        self.register_kind(KindInfo::of::<K>());
        self
    }

    /// Register a shape descriptor.
    ///
    /// Identical registrations are no-ops. A different shape for an existing
    /// kind replaces the old one.
    pub fn register_kind(&mut self, info: KindInfo) {
        let key = (info.gvk.group.clone(), info.gvk.version.clone());
        let kinds = self.groups.entry(key).or_default();

        match kinds.get(&info.gvk.kind) {
            Some(existing) if *existing == info => {
                trace!(kind = %info.gvk.kind, "kind already registered");
                return;
            }
            Some(existing) => {
                warn!(
                    kind = %info.gvk.kind,
                    api_version = %info.gvk.api_version(),
                    previous = existing.type_name,
                    replacement = info.type_name,
                    "replacing registered shape"
                );
            }
            None => {
                trace!(
                    kind = %info.gvk.kind,
                    api_version = %info.gvk.api_version(),
                    "registered kind"
                );
            }
        }

        kinds.insert(info.gvk.kind.clone(), info);
    }

    /// Look up the shape bound to a group/version/kind
    pub fn resolve(&self, gvk: &GroupVersionKind) -> Result<&KindInfo, UnregisteredKind> {
        self.groups
            .get(&(gvk.group.clone(), gvk.version.clone()))
            .and_then(|kinds| kinds.get(&gvk.kind))
            .ok_or_else(|| UnregisteredKind(gvk.clone()))
    }

    /// Look up `K`'s kind and confirm `K` is the type bound to it
    pub fn resolve_type<K: TypedResource>(&self) -> Result<&KindInfo, ConversionError> {
        let info = self.resolve(&K::gvk())?;
        if !info.is::<K>() {
            return Err(ConversionError::ShapeMismatch {
                found: K::KIND.to_string(),
                registered: info.type_name.to_string(),
                requested: type_name::<K>().to_string(),
            });
        }
        Ok(info)
    }

    /// Whether a group/version/kind is registered
    pub fn contains(&self, gvk: &GroupVersionKind) -> bool {
        self.resolve(gvk).is_ok()
    }

    /// All kinds known for a group/version, ordered by kind name
    pub fn kinds_for(&self, group: &str, version: &str) -> impl Iterator<Item = &KindInfo> {
        self.groups
            .get(&(group.to_string(), version.to_string()))
            .into_iter()
            .flat_map(|kinds| kinds.values())
    }

    /// Get all registered kinds
    pub fn iter(&self) -> impl Iterator<Item = &KindInfo> {
        self.groups.values().flat_map(|kinds| kinds.values())
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
