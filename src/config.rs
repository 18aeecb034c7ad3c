//! Client configuration - passed in by the front end

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::endpoint::{default_endpoints, EndpointDef, EndpointRegistry};
use crate::core::probe::DEFAULT_PROBE_TIMEOUT_MS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Picker entries; the registry is closed over exactly these
    pub endpoints: Vec<EndpointDef>,
    pub probe_timeout_ms: u64,
    /// Only wire handlers when the probe says the endpoint is reachable
    pub gate_on_probe: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { endpoints: default_endpoints(), probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS, gate_on_probe: true }
    }
}

impl ClientConfig {
    pub fn new() -> Self { Self::default() }

    /// Start from an empty endpoint list
    pub fn empty() -> Self { Self { endpoints: Vec::new(), ..Default::default() } }

    pub fn with_endpoint(mut self, def: EndpointDef) -> Self { self.endpoints.push(def); self }
    pub fn with_endpoints(mut self, defs: Vec<EndpointDef>) -> Self { self.endpoints = defs; self }
    pub fn with_probe_timeout_ms(mut self, ms: u64) -> Self { self.probe_timeout_ms = ms; self }
    pub fn with_gate_on_probe(mut self, gate: bool) -> Self { self.gate_on_probe = gate; self }

    pub fn probe_timeout(&self) -> Duration { Duration::from_millis(self.probe_timeout_ms) }

    pub fn registry(&self) -> EndpointRegistry { EndpointRegistry::new(&self.endpoints) }
}

#[cfg(feature = "native")]
impl ClientConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("config read {}: {}", path.display(), e))?;
        serde_json::from_str(&raw).map_err(|e| anyhow::anyhow!("config json {}: {}", path.display(), e))
    }

    /// `<config dir>/nodewallet/config.json`
    pub fn default_path() -> std::path::PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("nodewallet")
            .join("config.json")
    }

    /// Overlay `NODEWALLET_*` environment variables
    pub fn with_env(mut self) -> Self {
        if let Ok(list) = std::env::var("NODEWALLET_ENDPOINTS") {
            let defs: Vec<EndpointDef> = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(EndpointDef::same)
                .collect();
            if !defs.is_empty() {
                self.endpoints = defs;
            }
        }
        if let Some(ms) = std::env::var("NODEWALLET_PROBE_TIMEOUT_MS").ok().and_then(|s| s.trim().parse().ok()) {
            self.probe_timeout_ms = ms;
        }
        if let Ok(value) = std::env::var("NODEWALLET_GATE_ON_PROBE") {
            match value.trim().to_ascii_lowercase().as_str() {
                "0" | "false" | "off" | "no" => self.gate_on_probe = false,
                "1" | "true" | "on" | "yes" => self.gate_on_probe = true,
                _ => {}
            }
        }
        self
    }

    /// Defaults, then the default config file if present, then the environment
    pub fn from_env() -> anyhow::Result<Self> {
        let path = Self::default_path();
        let base = if path.exists() { Self::load(&path)? } else { Self::default() };
        Ok(base.with_env())
    }
}
