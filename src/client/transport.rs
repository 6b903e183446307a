//! Transport construction and raw request execution

use super::CallContext;
use crate::error::{ApiError, CrdError, Result};
use http::header::{ACCEPT, CONTENT_TYPE};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::core::GroupVersion;
use kube::{Client, Config};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Environment variable listing kubeconfig files
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Default prefix for named API groups
pub const DEFAULT_API_PATH: &str = "/apis";

/// Where connection credentials come from
#[derive(Debug, Clone, Default)]
pub enum CredentialsSource {
    /// In-cluster service account, then `$KUBECONFIG`, then `~/.kube/config`
    #[default]
    Infer,
    /// Kubeconfig files listed in `$KUBECONFIG`, merged in order
    Env,
    /// Kubeconfig file at a path
    Path(PathBuf),
    /// An already parsed kubeconfig
    Inline(Kubeconfig),
}

/// Wire encoding negotiated with the server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ContentType {
    #[default]
    Json,
}

impl ContentType {
    pub fn mime(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
        }
    }
}

/// Everything needed to build a [`Transport`]
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    pub credentials: CredentialsSource,
    /// Kubeconfig context; the current context when unset
    pub context: Option<String>,
    pub api_path: String,
    pub content_type: ContentType,
    /// Group/version used by clients that route requests manually
    pub group_version: Option<GroupVersion>,
    pub connect_timeout: Option<Duration>,
    pub read_timeout: Option<Duration>,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            credentials: CredentialsSource::default(),
            context: None,
            api_path: DEFAULT_API_PATH.to_string(),
            content_type: ContentType::default(),
            group_version: None,
            connect_timeout: None,
            read_timeout: None,
        }
    }
}

impl ConnectionParams {
    pub fn new(credentials: CredentialsSource) -> Self {
        Self {
            credentials,
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = api_path.into();
        self
    }

    pub fn with_group_version(mut self, group_version: GroupVersion) -> Self {
        self.group_version = Some(group_version);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }
}

/// Build a transport from connection parameters.
///
/// Only reads configuration; no request is sent until the transport is used.
pub async fn build_transport(params: &ConnectionParams) -> Result<Transport> {
    let mut config = load_config(params).await?;
    // Timeouts past the clock's range are left unset
    if let Some(timeout) = params.connect_timeout.filter(|t| fits_clock(*t)) {
        config.connect_timeout = Some(timeout);
    }
    if let Some(timeout) = params.read_timeout.filter(|t| fits_clock(*t)) {
        config.read_timeout = Some(timeout);
    }

    debug!(
        server = %config.cluster_url,
        namespace = %config.default_namespace,
        "building transport"
    );

    let client = Client::try_from(config)
        .map_err(|e| CrdError::Config(format!("Failed to create client: {e}")))?;

    Ok(Transport::from_client(client, params))
}

fn fits_clock(timeout: Duration) -> bool {
    tokio::time::Instant::now().checked_add(timeout).is_some()
}

async fn load_config(params: &ConnectionParams) -> Result<Config> {
    let options = KubeConfigOptions {
        context: params.context.clone(),
        ..Default::default()
    };

    match &params.credentials {
        CredentialsSource::Infer if params.context.is_some() => Config::from_kubeconfig(&options)
            .await
            .map_err(|e| CrdError::Config(format!("Failed to load kubeconfig: {e}"))),
        CredentialsSource::Infer => Config::infer()
            .await
            .map_err(|e| CrdError::Config(format!("Failed to infer configuration: {e}"))),
        CredentialsSource::Env => {
            // $KUBECONFIG may list several files; kube merges them in order
            let kubeconfig = Kubeconfig::from_env()
                .map_err(|e| CrdError::Config(format!("Failed to read ${KUBECONFIG_ENV}: {e}")))?
                .ok_or_else(|| CrdError::Config(format!("{KUBECONFIG_ENV} is not set")))?;
            Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .map_err(|e| CrdError::Config(format!("Invalid kubeconfig: {e}")))
        }
        CredentialsSource::Path(path) => from_path(path.clone(), &options).await,
        CredentialsSource::Inline(kubeconfig) => {
            Config::from_custom_kubeconfig(kubeconfig.clone(), &options)
                .await
                .map_err(|e| CrdError::Config(format!("Invalid kubeconfig: {e}")))
        }
    }
}

async fn from_path(path: PathBuf, options: &KubeConfigOptions) -> Result<Config> {
    let kubeconfig = Kubeconfig::read_from(&path).map_err(|e| {
        CrdError::Config(format!("Failed to read kubeconfig {}: {e}", path.display()))
    })?;
    Config::from_custom_kubeconfig(kubeconfig, options)
        .await
        .map_err(|e| CrdError::Config(format!("Invalid kubeconfig {}: {e}", path.display())))
}

/// Configured connection to an API server.
///
/// Sends exactly one request per call: no retries and no caching. Cloning is
/// cheap and clones share the underlying connection pool, which is safe to use
/// from concurrent tasks.
#[derive(Clone)]
pub struct Transport {
    client: Client,
    api_path: String,
    content_type: ContentType,
    group_version: Option<GroupVersion>,
    default_namespace: String,
}

impl Transport {
    /// Wrap an existing kube client
    pub fn from_client(client: Client, params: &ConnectionParams) -> Self {
        let default_namespace = client.default_namespace().to_string();
        Self {
            client,
            api_path: params.api_path.clone(),
            content_type: params.content_type,
            group_version: params.group_version.clone(),
            default_namespace,
        }
    }

    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn group_version(&self) -> Option<&GroupVersion> {
        self.group_version.as_ref()
    }

    /// Namespace of the kubeconfig context in use
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// POST `body` to `path` and return the server's stored representation
    pub async fn post(
        &self,
        ctx: &CallContext,
        path: &str,
        body: Vec<u8>,
    ) -> std::result::Result<Value, ApiError> {
        let request = http::Request::post(path)
            .header(CONTENT_TYPE, self.content_type.mime())
            .header(ACCEPT, self.content_type.mime())
            .body(body)?;
        self.send(ctx, "POST", path, request).await
    }

    /// GET the object at `path`
    pub async fn get(&self, ctx: &CallContext, path: &str) -> std::result::Result<Value, ApiError> {
        let request = http::Request::get(path)
            .header(ACCEPT, self.content_type.mime())
            .body(Vec::new())?;
        self.send(ctx, "GET", path, request).await
    }

    async fn send(
        &self,
        ctx: &CallContext,
        method: &str,
        path: &str,
        request: http::Request<Vec<u8>>,
    ) -> std::result::Result<Value, ApiError> {
        let operation = format!("{method} {path}");
        ctx.run(&operation, async {
            debug!(%method, %path, "sending request");
            self.client
                .request::<Value>(request)
                .await
                .map_err(ApiError::from)
        })
        .await
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("api_path", &self.api_path)
            .field("content_type", &self.content_type)
            .field("group_version", &self.group_version)
            .field("default_namespace", &self.default_namespace)
            .finish_non_exhaustive()
    }
}
