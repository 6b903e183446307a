//! Connection state shared by every command

use crate::api::{AnyClient, Strategy};
use crate::cli::Cli;
use crate::client::{
    build_transport, CallContext, ConnectionParams, CredentialsSource, Transport, KUBECONFIG_ENV,
};
use crate::config::AppConfig;
use crate::error::Result;
use crate::resources::{operators, ObjectKey, Scheme, TypedResource};
use kube::core::GroupVersion;
use std::sync::Arc;
use std::time::Duration;

/// Transport, scheme and defaults resolved from flags and config
pub struct Session {
    pub transport: Transport,
    pub scheme: Arc<Scheme>,
    pub namespace: String,
    pub strategy: Strategy,
    pub timeout: Duration,
}

impl Session {
    /// Build the transport and scheme. Flags win over the config file.
    pub async fn connect(cli: &Cli, config: &AppConfig) -> Result<Self> {
        let credentials = match &cli.kubeconfig {
            Some(path) => CredentialsSource::Path(path.clone()),
            None if std::env::var_os(KUBECONFIG_ENV).is_some() => CredentialsSource::Env,
            None => CredentialsSource::Infer,
        };

        let timeout = cli
            .timeout
            .map(Duration::from_secs)
            .unwrap_or_else(|| config.request_timeout());

        let mut params = ConnectionParams::new(credentials)
            .with_api_path(config.api_path.clone())
            .with_group_version(GroupVersion::gv(operators::GROUP, operators::VERSION))
            .with_connect_timeout(timeout)
            .with_read_timeout(timeout);
        if let Some(context) = &cli.context {
            params = params.with_context(context.clone());
        }
        let transport = build_transport(&params).await?;

        let mut scheme = Scheme::new();
        operators::add_to_scheme(&mut scheme);

        let namespace = cli
            .namespace
            .clone()
            .or_else(|| config.default_namespace.clone())
            .unwrap_or_else(|| transport.default_namespace().to_string());

        Ok(Self {
            transport,
            scheme: Arc::new(scheme),
            namespace,
            strategy: cli.strategy.unwrap_or(config.default_strategy),
            timeout,
        })
    }

    /// A fresh deadline for one request
    pub fn call_context(&self) -> CallContext {
        CallContext::with_timeout(self.timeout)
    }

    pub fn key(&self, name: &str) -> ObjectKey {
        ObjectKey::new(&self.namespace, name)
    }

    pub fn client<K: TypedResource>(&self, strategy: Strategy) -> Result<AnyClient<K>> {
        AnyClient::new(strategy, self.transport.clone(), Arc::clone(&self.scheme))
    }
}
