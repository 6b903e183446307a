//! Request path construction

/// Path prefix for the legacy core group
const CORE_API_PATH: &str = "/api";

/// `{api_path}/{group}/{version}[/namespaces/{ns}]/{plural}`
///
/// The empty (core) group is served under `/api/{version}`.
pub fn collection_path(
    api_path: &str,
    group: &str,
    version: &str,
    namespace: Option<&str>,
    plural: &str,
) -> String {
    let mut path = if group.is_empty() {
        format!("{CORE_API_PATH}/{version}")
    } else {
        format!("{}/{group}/{version}", api_path.trim_end_matches('/'))
    };

    if let Some(ns) = namespace {
        path.push_str("/namespaces/");
        path.push_str(ns);
    }
    path.push('/');
    path.push_str(plural);
    path
}

/// Path of a single named object inside a collection
pub fn object_path(
    api_path: &str,
    group: &str,
    version: &str,
    namespace: Option<&str>,
    plural: &str,
    name: &str,
) -> String {
    format!(
        "{}/{name}",
        collection_path(api_path, group, version, namespace, plural)
    )
}
