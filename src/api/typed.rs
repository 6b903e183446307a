//! Scheme-aware client for typed resources

use super::{decode_document, ResourceClient};
use crate::client::{paths, CallContext, Transport};
use crate::convert::Converter;
use crate::error::Result;
use crate::resources::{KindInfo, ObjectKey, Scheme, TypedResource};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Checks `K` against the scheme before every request and converts responses
/// back through untyped documents.
#[derive(Debug, Clone)]
pub struct TypedClient<K> {
    transport: Transport,
    converter: Converter,
    _marker: PhantomData<fn() -> K>,
}

impl<K: TypedResource> TypedClient<K> {
    pub fn new(transport: Transport, scheme: Arc<Scheme>) -> Self {
        Self {
            transport,
            converter: Converter::new(scheme),
            _marker: PhantomData,
        }
    }

    fn path(&self, info: &KindInfo, namespace: &str, name: Option<&str>) -> String {
        let namespace = info.namespaced.then_some(namespace);
        match name {
            Some(name) => paths::object_path(
                self.transport.api_path(),
                &info.gvk.group,
                &info.gvk.version,
                namespace,
                &info.plural,
                name,
            ),
            None => paths::collection_path(
                self.transport.api_path(),
                &info.gvk.group,
                &info.gvk.version,
                namespace,
                &info.plural,
            ),
        }
    }
}

#[async_trait]
impl<K: TypedResource> ResourceClient for TypedClient<K> {
    type Payload = K;

    async fn create(&self, ctx: &CallContext, key: &ObjectKey, mut obj: K) -> Result<K> {
        let info = self.converter.scheme().resolve_type::<K>()?;
        key.apply_to(obj.metadata_mut());

        let doc = self.converter.to_untyped(&obj)?;
        let body = serde_json::to_vec(&doc)?;

        let path = self.path(info, &key.namespace, None);
        debug!(%key, kind = %info.gvk.kind, "creating typed resource");
        let stored = self.transport.post(ctx, &path, body).await?;

        let doc = decode_document(stored)?;
        Ok(self.converter.to_typed(&doc)?)
    }

    async fn get(&self, ctx: &CallContext, key: &ObjectKey) -> Result<K> {
        let info = self.converter.scheme().resolve_type::<K>()?;
        let path = self.path(info, &key.namespace, Some(&key.name));
        let stored = self.transport.get(ctx, &path).await?;

        let doc = decode_document(stored)?;
        Ok(self.converter.to_typed(&doc)?)
    }
}
