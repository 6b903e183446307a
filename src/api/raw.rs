//! Typed instances sent over manually built requests

use super::ResourceClient;
use crate::client::{paths, CallContext, Transport};
use crate::convert::codec;
use crate::error::{CrdError, Result};
use crate::resources::{ObjectKey, TypedResource};
use async_trait::async_trait;
use kube::core::GroupVersion;
use std::marker::PhantomData;
use tracing::debug;

/// Routes requests through the transport's configured group/version and
/// encodes `K` directly with the GVK codec. No scheme is involved.
#[derive(Debug, Clone)]
pub struct RawClient<K> {
    transport: Transport,
    group_version: GroupVersion,
    resource: String,
    _marker: PhantomData<fn() -> K>,
}

impl<K: TypedResource> RawClient<K> {
    /// Fails when the transport was built without a routing group/version
    pub fn new(transport: Transport) -> Result<Self> {
        let group_version = transport.group_version().cloned().ok_or_else(|| {
            CrdError::Config("raw client needs a group/version on the transport".to_string())
        })?;
        Ok(Self {
            transport,
            group_version,
            resource: K::PLURAL.to_string(),
            _marker: PhantomData,
        })
    }

    /// Use another resource name in request paths
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    fn collection(&self, namespace: &str) -> String {
        paths::collection_path(
            self.transport.api_path(),
            &self.group_version.group,
            &self.group_version.version,
            Some(namespace),
            &self.resource,
        )
    }

    fn object(&self, key: &ObjectKey) -> String {
        paths::object_path(
            self.transport.api_path(),
            &self.group_version.group,
            &self.group_version.version,
            Some(&key.namespace),
            &self.resource,
            &key.name,
        )
    }
}

#[async_trait]
impl<K: TypedResource> ResourceClient for RawClient<K> {
    type Payload = K;

    async fn create(&self, ctx: &CallContext, key: &ObjectKey, mut obj: K) -> Result<K> {
        key.apply_to(obj.metadata_mut());
        let body = codec::encode(&obj)?;

        let path = self.collection(&key.namespace);
        debug!(%key, resource = %self.resource, "posting typed body");
        let stored = self.transport.post(ctx, &path, body).await?;
        Ok(codec::decode(stored)?)
    }

    async fn get(&self, ctx: &CallContext, key: &ObjectKey) -> Result<K> {
        let path = self.object(key);
        let stored = self.transport.get(ctx, &path).await?;
        Ok(codec::decode(stored)?)
    }
}
