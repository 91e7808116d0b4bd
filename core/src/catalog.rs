use std::collections::BTreeMap;

/// A synthetic gateway-pod registration for the service catalog. Built by
/// the translator, consumed by the (external) writer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogRegistration {
    pub node: String,
    pub address: String,
    pub node_meta: BTreeMap<String, String>,
    pub service: CatalogService,
    pub check: CatalogCheck,
    pub skip_node_update: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogService {
    pub kind: String,
    pub id: String,
    pub service: String,
    pub address: String,
    pub namespace: String,
    pub proxy: Option<CatalogProxy>,
    pub meta: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogProxy {
    pub envoy_prometheus_bind_addr: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogCheck {
    pub name: String,
    pub type_: String,
    pub status: CheckStatus,
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CheckStatus {
    Passing,
    Critical,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Passing => "passing",
            CheckStatus::Critical => "critical",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CatalogDeregistration {
    pub node: String,
    pub service_id: String,
}

/// The subset of pod status the translator needs to build a
/// [`CatalogRegistration`]. Pods missing `node_name`, `pod_ip`, or
/// `host_ip` are skipped entirely.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GatewayPod {
    pub name: String,
    pub namespace: String,
    pub node_name: Option<String>,
    pub host_ip: Option<String>,
    pub pod_ip: Option<String>,
    pub ready: bool,
    pub deletion_timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

impl GatewayPod {
    pub fn is_deleted(&self) -> bool {
        self.deletion_timestamp.is_some()
    }

    pub fn has_required_fields(&self) -> bool {
        self.node_name.is_some() && self.pod_ip.is_some() && self.host_ip.is_some()
    }
}
