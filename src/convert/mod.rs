//! Conversion between untyped documents and typed resources

pub mod codec;

use crate::error::ConversionError;
use crate::resources::{parse_api_version, Scheme, TypedResource};
use kube::core::{DynamicObject, GroupVersionKind, TypeMeta};
use serde_json::Value;
use std::sync::Arc;

/// Read the group/version/kind a document declares about itself
pub fn gvk_of(doc: &DynamicObject) -> Result<GroupVersionKind, ConversionError> {
    let types = doc.types.as_ref().ok_or(ConversionError::MissingTypeMeta)?;
    if types.kind.is_empty() {
        return Err(ConversionError::MissingTypeMeta);
    }
    let (group, version) = parse_api_version(&types.api_version)
        .ok_or_else(|| ConversionError::InvalidApiVersion(types.api_version.clone()))?;
    Ok(GroupVersionKind::gvk(group, version, &types.kind))
}

/// Flatten a typed resource into an untyped document tagged with its GVK.
///
/// Only fails if `K`'s `Serialize` impl does.
pub fn to_untyped<K: TypedResource>(obj: &K) -> Result<DynamicObject, ConversionError> {
    let mut fields = codec::to_value(obj)?;
    fields.remove("apiVersion");
    fields.remove("kind");
    fields.remove("metadata");

    Ok(DynamicObject {
        types: Some(TypeMeta {
            api_version: K::gvk().api_version(),
            kind: K::KIND.to_string(),
        }),
        metadata: obj.metadata().clone(),
        data: Value::Object(fields),
    })
}

/// Rebuild a typed resource from an untyped document.
///
/// The document's GVK must be registered in `scheme`, bound to `K`, and every
/// field `K` requires must be present with a compatible type.
pub fn to_typed<K: TypedResource>(
    doc: &DynamicObject,
    scheme: &Scheme,
) -> Result<K, ConversionError> {
    let gvk = gvk_of(doc)?;
    let info = scheme.resolve(&gvk)?;

    let expected = K::gvk();
    if gvk != expected {
        return Err(ConversionError::KindMismatch {
            expected: format!("{}/{}", expected.api_version(), expected.kind),
            found: format!("{}/{}", gvk.api_version(), gvk.kind),
        });
    }
    if !info.is::<K>() {
        return Err(ConversionError::ShapeMismatch {
            found: gvk.kind,
            registered: info.type_name().to_string(),
            requested: std::any::type_name::<K>().to_string(),
        });
    }

    let invalid = |source| ConversionError::Invalid {
        kind: K::KIND.to_string(),
        source,
    };

    let mut fields = match &doc.data {
        Value::Object(fields) => fields.clone(),
        Value::Null => serde_json::Map::new(),
        other => {
            return Err(invalid(serde::de::Error::custom(format!(
                "document body must be an object, got {other}"
            ))))
        }
    };
    fields.insert(
        "metadata".to_string(),
        serde_json::to_value(&doc.metadata).map_err(invalid)?,
    );

    serde_json::from_value(Value::Object(fields)).map_err(invalid)
}

/// Converter bound to one shared [`Scheme`]
#[derive(Debug, Clone)]
pub struct Converter {
    scheme: Arc<Scheme>,
}

impl Converter {
    pub fn new(scheme: Arc<Scheme>) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Like [`to_untyped`], but refuses shapes the scheme does not know
    pub fn to_untyped<K: TypedResource>(&self, obj: &K) -> Result<DynamicObject, ConversionError> {
        self.scheme.resolve_type::<K>()?;
        to_untyped(obj)
    }

    pub fn to_typed<K: TypedResource>(&self, doc: &DynamicObject) -> Result<K, ConversionError> {
        to_typed(doc, &self.scheme)
    }
}
