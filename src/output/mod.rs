//! Output formatting for crdctl

use crate::convert::codec;
use crate::error::Result;
use crate::resources::TypedResource;
use kube::core::DynamicObject;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    Name,
}

/// Format a typed resource, with its apiVersion and kind
pub fn format_resource<K: TypedResource>(resource: &K, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Name => Ok(format_name(resource)),
        _ => format_value(&codec::to_value(resource)?, format),
    }
}

/// Format an untyped document
pub fn format_document(doc: &DynamicObject, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Name => {
            let kind = doc
                .types
                .as_ref()
                .map(|t| t.kind.to_lowercase())
                .unwrap_or_default();
            let name = doc.metadata.name.as_deref().unwrap_or("<unknown>");
            Ok(match doc.metadata.namespace.as_deref() {
                Some(ns) => format!("{kind}/{ns}/{name}"),
                None => format!("{kind}/{name}"),
            })
        }
        _ => format_value(doc, format),
    }
}

/// Format any serializable value; `Name` falls back to YAML
pub fn format_value<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => format_json(value, true),
        OutputFormat::Yaml | OutputFormat::Name => format_yaml(value),
    }
}

/// Format as JSON
pub fn format_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

/// Format as YAML
pub fn format_yaml<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}

/// Format as `kind/namespace/name`
pub fn format_name<K: TypedResource>(resource: &K) -> String {
    let kind = K::KIND.to_lowercase();
    match resource.namespace() {
        Some(ns) => format!("{kind}/{ns}/{}", resource.name()),
        None => format!("{kind}/{}", resource.name()),
    }
}
