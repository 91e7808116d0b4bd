use ahash::AHashMap as HashMap;
use gateway_binder_core::{
    catalog::GatewayPod,
    gateway::{Gateway, GatewayClass, GatewayClassConfig, LabelSelector},
    mesh::ResourceReference,
    reference_grant::ReferenceGrant,
    resource_id::ResourceId,
    routes::Route,
};

/// JWT provider attachment referenced from a `GatewayPolicy`/`AuthFilter`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JwtProvider {
    pub id: ResourceId,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PolicyTarget {
    Gateway {
        gateway: ResourceId,
        listener: Option<String>,
    },
    Route(ResourceId),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GatewayPolicy {
    pub id: ResourceId,
    pub target: PolicyTarget,
    pub jwt_providers: Vec<ResourceId>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuthFilter {
    pub id: ResourceId,
    pub target_route: ResourceId,
    pub jwt_providers: Vec<ResourceId>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CertificateSecret {
    pub id: ResourceId,
    pub cert_pem: String,
    pub key_pem: String,
}

/// `{"kubernetes.io/metadata.name": ns}` is synthesized by the binding
/// engine when the namespace object lacks it.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NamespaceInfo {
    pub labels: std::collections::BTreeMap<String, String>,
}

impl NamespaceInfo {
    pub fn with_synthesized_name_label(mut self, name: &str) -> Self {
        self.labels
            .entry("kubernetes.io/metadata.name".to_string())
            .or_insert_with(|| name.to_string());
        self
    }
}

pub fn selector_matches(selector: &LabelSelector, ns: &NamespaceInfo) -> bool {
    selector
        .match_labels
        .iter()
        .all(|(k, v)| ns.labels.get(k).map(String::as_str) == Some(v.as_str()))
}

/// Helm-derived toggles that shape translation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HelmConfig {
    pub metrics_port: Option<u16>,
    /// Offset added to listener ports below 1024 so a non-root proxy
    /// process can bind them; `None` disables the rewrite.
    pub privileged_port_mapping_offset: Option<u16>,
    pub transparent_proxy: bool,
}

impl Default for HelmConfig {
    fn default() -> Self {
        Self {
            metrics_port: None,
            privileged_port_mapping_offset: None,
            transparent_proxy: false,
        }
    }
}

/// The existing mesh-side `APIGateway` entry and its catalog registrations,
/// as last observed — needed to compute deregistrations and to avoid
/// re-emitting unchanged entries.
///
/// `known_routes`/`known_certificates` are the `HTTPRoute`/`TCPRoute`/
/// `Certificate` mesh references this gateway's previous reconciles caused
/// to exist. The resource map only ever sees objects this reconcile
/// actually touches, so without these a route or certificate this gateway
/// stopped referencing would never be recognized as GC-eligible.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExistingMeshState {
    pub gateway: Option<gateway_binder_core::mesh::MeshApiGateway>,
    pub registered_service_ids: Vec<String>,
    pub known_routes: Vec<ResourceReference>,
    pub known_certificates: Vec<ResourceReference>,
}

/// The full input snapshot for one reconcile.
#[derive(Clone, Debug, PartialEq)]
pub struct BinderConfig {
    pub controller_name: String,

    pub gateway: Gateway,
    pub gateway_class: Option<GatewayClass>,
    pub gateway_class_config: Option<GatewayClassConfig>,
    /// The gateway-class-config snapshot decoded from the gateway's
    /// annotation, if present and well-formed.
    pub annotated_gateway_class_config: Option<GatewayClassConfig>,

    pub namespaces: HashMap<String, NamespaceInfo>,
    pub pods: Vec<GatewayPod>,
    pub service_account_name: Option<String>,

    pub http_routes: Vec<Route>,
    pub tcp_routes: Vec<Route>,

    pub reference_grants: Vec<ReferenceGrant>,
    pub certificates: HashMap<ResourceId, CertificateSecret>,
    pub jwt_providers: HashMap<ResourceId, JwtProvider>,
    pub gateway_policies: Vec<GatewayPolicy>,
    pub auth_filters: Vec<AuthFilter>,

    pub existing_mesh_state: ExistingMeshState,

    pub helm: HelmConfig,
}
