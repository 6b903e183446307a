//! CatalogSource resource implementation

use crate::resources::TypedResource;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A repository of operator bundles that OLM can query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSource {
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: CatalogSourceSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSourceSpec {
    pub source_type: SourceType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    /// host:port of an already running registry server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

/// How the catalog content is served
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Grpc,
    ConfigMap,
    Internal,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Grpc => "grpc",
            SourceType::ConfigMap => "configmap",
            SourceType::Internal => "internal",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grpc" => Ok(SourceType::Grpc),
            "configmap" => Ok(SourceType::ConfigMap),
            "internal" => Ok(SourceType::Internal),
            other => Err(format!(
                "unknown source type '{other}' (expected grpc, configmap or internal)"
            )),
        }
    }
}

impl TypedResource for CatalogSource {
    const KIND: &'static str = "CatalogSource";
    const GROUP: &'static str = super::GROUP;
    const VERSION: &'static str = super::VERSION;
    const PLURAL: &'static str = "catalogsources";
    const NAMESPACED: bool = true;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl CatalogSource {
    /// A grpc catalog served from `image`
    pub fn grpc(name: &str, image: &str) -> Self {
        Self {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec: CatalogSourceSpec {
                source_type: SourceType::Grpc,
                image: Some(image.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.metadata.namespace = Some(namespace.to_string());
        self
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.spec.display_name = Some(display_name.to_string());
        self
    }
}
