//! Connection to the API server

pub mod context;
pub mod paths;
pub mod transport;

pub use context::CallContext;
pub use transport::{
    build_transport, ConnectionParams, ContentType, CredentialsSource, Transport,
    DEFAULT_API_PATH, KUBECONFIG_ENV,
};
