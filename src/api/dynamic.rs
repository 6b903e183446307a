//! Schema-less client working on untyped documents

use super::{decode_document, ResourceClient};
use crate::client::{paths, CallContext, Transport};
use crate::error::{CrdError, Result};
use crate::resources::ObjectKey;
use async_trait::async_trait;
use kube::core::{ApiResource, DynamicObject, GroupVersionKind, TypeMeta};
use tracing::debug;

/// Sends documents straight to the transport.
///
/// No scheme is consulted; the server alone validates the document's shape.
#[derive(Debug, Clone)]
pub struct DynamicClient {
    transport: Transport,
    resource: ApiResource,
}

impl DynamicClient {
    /// Client for `gvk`, with the plural guessed from the kind
    pub fn new(transport: Transport, gvk: &GroupVersionKind) -> Self {
        Self {
            transport,
            resource: ApiResource::from_gvk(gvk),
        }
    }

    /// Override the guessed plural resource name
    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.resource.plural = plural.into();
        self
    }

    pub fn resource(&self) -> &ApiResource {
        &self.resource
    }

    fn collection(&self, namespace: &str) -> String {
        paths::collection_path(
            self.transport.api_path(),
            &self.resource.group,
            &self.resource.version,
            Some(namespace),
            &self.resource.plural,
        )
    }

    fn object(&self, key: &ObjectKey) -> String {
        paths::object_path(
            self.transport.api_path(),
            &self.resource.group,
            &self.resource.version,
            Some(&key.namespace),
            &self.resource.plural,
            &key.name,
        )
    }

    /// Stamp this client's type meta, or reject a document declaring another kind
    fn check_types(&self, doc: &mut DynamicObject) -> Result<()> {
        let types = doc.types.get_or_insert_with(|| TypeMeta {
            api_version: self.resource.api_version.clone(),
            kind: self.resource.kind.clone(),
        });

        if types.api_version != self.resource.api_version || types.kind != self.resource.kind {
            return Err(CrdError::InvalidArgument(format!(
                "document is {}/{} but this client serves {}/{}",
                types.api_version, types.kind, self.resource.api_version, self.resource.kind
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceClient for DynamicClient {
    type Payload = DynamicObject;

    async fn create(
        &self,
        ctx: &CallContext,
        key: &ObjectKey,
        mut doc: DynamicObject,
    ) -> Result<DynamicObject> {
        self.check_types(&mut doc)?;
        key.apply_to(&mut doc.metadata);

        let path = self.collection(&key.namespace);
        debug!(%key, kind = %self.resource.kind, "creating untyped document");
        let body = serde_json::to_vec(&doc)?;
        let stored = self.transport.post(ctx, &path, body).await?;
        Ok(decode_document(stored)?)
    }

    async fn get(&self, ctx: &CallContext, key: &ObjectKey) -> Result<DynamicObject> {
        let path = self.object(key);
        let stored = self.transport.get(ctx, &path).await?;
        Ok(decode_document(stored)?)
    }
}
