use gateway_binder_core::{
    catalog::{CatalogDeregistration, CatalogRegistration},
    gateway::{Gateway, GatewayClassConfig},
    mesh::{MeshConfigEntry, ResourceReference},
    routes::Route,
};

/// A platform write: either a spec/metadata patch or a status-subresource
/// patch. The binder never distinguishes create vs. update — the writer
/// (external) does an upsert.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum KubernetesObject {
    Gateway(Gateway),
    Route(Route),
}

/// A mesh-config upsert, carrying the callback the writer must invoke with
/// the mesh-reported status once the write lands, so it can be reconciled
/// back onto the Kubernetes object. Modeled as data (`OnUpdate`) rather than
/// a boxed closure so `Snapshot` stays comparable in tests.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum OnUpdate {
    None,
    ReconcileGatewayStatus,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConsulUpdate {
    pub entry: MeshConfigEntry,
    pub on_update: OnUpdate,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KubernetesChanges {
    pub updates: Vec<KubernetesObject>,
    pub status_updates: Vec<KubernetesObject>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConsulChanges {
    pub updates: Vec<ConsulUpdate>,
    pub deletions: Vec<ResourceReference>,
    pub registrations: Vec<CatalogRegistration>,
    pub deregistrations: Vec<CatalogDeregistration>,
}

/// The pure output of one reconcile — everything the writer must apply.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub kubernetes: KubernetesChanges,
    pub consul: ConsulChanges,
    pub gateway_class_config: Option<GatewayClassConfig>,
    pub upsert_gateway_deployment: bool,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.kubernetes.updates.is_empty()
            && self.kubernetes.status_updates.is_empty()
            && self.consul.updates.is_empty()
            && self.consul.deletions.is_empty()
            && self.consul.registrations.is_empty()
            && self.consul.deregistrations.is_empty()
    }
}
