//! Endpoint Registry - closed map from a user-facing selection to a base URL

use serde::{Deserialize, Serialize};

/// A known wallet service endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Selection value as it appears in the picker
    pub id: String,
    /// Base URL, always ending in `/`
    pub base_url: String,
}

impl Endpoint {
    pub fn new(id: impl Into<String>, base_url: impl AsRef<str>) -> Self {
        Self { id: id.into(), base_url: normalize_base_url(base_url.as_ref()) }
    }

    /// Join a route onto the base URL
    pub fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route.trim_start_matches('/'))
    }
}

/// Serializable endpoint definition (config files, JS config objects)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl EndpointDef {
    /// Selection value doubles as the URL, as in the stock picker
    pub fn same(id: impl Into<String>) -> Self {
        Self { id: id.into(), url: None }
    }

    pub fn to_endpoint(&self) -> Endpoint {
        Endpoint::new(self.id.clone(), self.url.as_deref().unwrap_or(&self.id))
    }
}

/// Default picker entries: three local nodes
pub fn default_endpoints() -> Vec<EndpointDef> {
    vec![
        EndpointDef::same("http://127.0.0.1:8080"),
        EndpointDef::same("http://127.0.0.1:8081"),
        EndpointDef::same("http://127.0.0.1:8082"),
    ]
}

/// Closed set of endpoints. Unknown selections resolve to `None`.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    entries: Vec<Endpoint>,
}

impl EndpointRegistry {
    pub fn new(defs: &[EndpointDef]) -> Self {
        let mut entries: Vec<Endpoint> = Vec::with_capacity(defs.len());
        for def in defs {
            let endpoint = def.to_endpoint();
            if endpoint.id.trim().is_empty() || entries.iter().any(|e| e.id == endpoint.id) {
                continue;
            }
            entries.push(endpoint);
        }
        Self { entries }
    }

    /// Resolve a selection value. `None` is the no-active-endpoint sentinel.
    pub fn resolve(&self, selection: &str) -> Option<&Endpoint> {
        self.entries.iter().find(|e| e.id == selection)
    }

    pub fn endpoints(&self) -> &[Endpoint] { &self.entries }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with('/') { trimmed.to_string() } else { format!("{}/", trimmed) }
}
