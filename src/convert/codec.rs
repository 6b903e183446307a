//! JSON codec keyed by group/version/kind
//!
//! Used by the raw client: typed instances go straight to bytes and back,
//! with `apiVersion`/`kind` stamped from the shape's own constants.

use crate::error::ConversionError;
use crate::resources::TypedResource;
use serde::ser::Error as _;
use serde_json::{Map, Value};

/// Serialize `obj` into a JSON object carrying its apiVersion and kind
pub fn to_value<K: TypedResource>(obj: &K) -> Result<Map<String, Value>, ConversionError> {
    let encode_err = |source| ConversionError::Encode {
        kind: K::KIND.to_string(),
        source,
    };

    let mut fields = match serde_json::to_value(obj).map_err(encode_err)? {
        Value::Object(fields) => fields,
        other => {
            return Err(encode_err(serde_json::Error::custom(format!(
                "expected an object, got {other}"
            ))))
        }
    };

    fields.insert("apiVersion".to_string(), Value::String(K::gvk().api_version()));
    fields.insert("kind".to_string(), Value::String(K::KIND.to_string()));
    Ok(fields)
}

/// Encode `obj` as a JSON request body
pub fn encode<K: TypedResource>(obj: &K) -> Result<Vec<u8>, ConversionError> {
    let fields = to_value(obj)?;
    serde_json::to_vec(&fields).map_err(|source| ConversionError::Encode {
        kind: K::KIND.to_string(),
        source,
    })
}

/// Decode a response body into `K`.
///
/// When the body declares an apiVersion/kind it must be `K`'s own.
pub fn decode<K: TypedResource>(value: Value) -> Result<K, ConversionError> {
    let declared_api_version = value.get("apiVersion").and_then(Value::as_str);
    let declared_kind = value.get("kind").and_then(Value::as_str);

    if let (Some(api_version), Some(kind)) = (declared_api_version, declared_kind) {
        let expected = K::gvk();
        if api_version != expected.api_version() || kind != expected.kind {
            return Err(ConversionError::KindMismatch {
                expected: format!("{}/{}", expected.api_version(), expected.kind),
                found: format!("{api_version}/{kind}"),
            });
        }
    }

    serde_json::from_value(value).map_err(|source| ConversionError::Invalid {
        kind: K::KIND.to_string(),
        source,
    })
}
