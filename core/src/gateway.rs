use crate::condition::Condition;
use crate::resource_id::ResourceId;
use std::collections::BTreeMap;

/// A Gateway: a named set of listeners plus the bookkeeping the binder needs
/// (finalizers, generation, deletion marker) to decide whether it is
/// currently managed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Gateway {
    pub id: ResourceId,
    pub generation: i64,
    pub deletion_timestamp: Option<chrono::DateTime<chrono::Utc>>,
    pub finalizers: Vec<String>,
    pub gateway_class_name: String,
    pub listeners: Vec<Listener>,
    /// Non-empty iff the gateway declares an address; any address is
    /// unsupported (`UnsupportedAddress`).
    pub addresses: Vec<String>,
    pub status: GatewayStatus,
}

impl Gateway {
    pub fn has_finalizer(&self, finalizer: &str) -> bool {
        self.finalizers.iter().any(|f| f == finalizer)
    }

    pub fn is_deleted(&self) -> bool {
        self.deletion_timestamp.is_some()
    }
}

/// Per-listener `AttachedRoutes` count and condition set.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListenerStatus {
    pub name: String,
    pub attached_routes: i32,
    pub conditions: Vec<Condition>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GatewayStatus {
    pub conditions: Vec<Condition>,
    pub listeners: Vec<ListenerStatus>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Protocol {
    Http,
    Https,
    Tcp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "HTTP",
            Protocol::Https => "HTTPS",
            Protocol::Tcp => "TCP",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RouteKind {
    Http,
    Tcp,
}

impl RouteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Http => "HTTPRoute",
            RouteKind::Tcp => "TCPRoute",
        }
    }
}

/// A listener's `allowedRoutes.namespaces` selector.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum NamespacePolicy {
    Same,
    All,
    Selector(LabelSelector),
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LabelSelector {
    pub match_labels: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AllowedRoutes {
    /// Empty means "no restriction" (the listener's own protocol's
    /// default-supported kind is implied by the binding engine).
    pub kinds: Vec<RouteKind>,
    pub namespaces: NamespacePolicy,
}

impl Default for AllowedRoutes {
    fn default() -> Self {
        Self {
            kinds: Vec::new(),
            namespaces: NamespacePolicy::Same,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TlsMode {
    Terminate,
    Passthrough,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TlsConfig {
    pub mode: TlsMode,
    pub certificate_refs: Vec<ResourceId>,
    pub min_version: Option<String>,
    pub max_version: Option<String>,
    pub cipher_suites: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Listener {
    pub name: String,
    pub protocol: Protocol,
    pub port: u16,
    pub hostname: Option<String>,
    pub tls: Option<TlsConfig>,
    pub allowed_routes: AllowedRoutes,
}

/// Declares which controller a `GatewayClass` is bound to, and whether that
/// controller has a matching `GatewayClassConfig`. The binder only manages
/// gateways whose class points at it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GatewayClass {
    pub name: String,
    pub controller_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GatewayClassConfig {
    pub generation: i64,
    /// Opaque — the binder round-trips this, it never inspects keys other
    /// than `generation`.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

pub const GATEWAY_CLASS_CONFIG_ANNOTATION: &str = "api-gateway.consul.hashicorp.com/config";
pub const GATEWAY_FINALIZER: &str = "gateway-finalizer.consul.hashicorp.com";
