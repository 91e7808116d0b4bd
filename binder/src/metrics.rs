use prometheus_client::{
    encoding::EncodeLabelSet,
    metrics::{counter::Counter, family::Family},
    registry::Registry,
};

#[derive(Clone, Debug, Hash, Eq, PartialEq, EncodeLabelSet)]
struct GatewayLabels {
    namespace: String,
    name: String,
}

#[derive(Clone, Debug, Hash, Eq, PartialEq, EncodeLabelSet)]
struct RouteBindLabels {
    namespace: String,
    name: String,
    accepted: bool,
}

/// Reconcile-scoped counters, registered once and incremented per
/// `Binder::reconcile` call.
pub struct BinderMetrics {
    reconciles: Family<GatewayLabels, Counter>,
    route_binds: Family<RouteBindLabels, Counter>,
    mesh_gc: Counter,
}

impl BinderMetrics {
    pub fn register(registry: &mut Registry) -> Self {
        let reconciles = Family::default();
        registry.register(
            "gateway_binder_reconciles",
            "Count of Binder::reconcile calls per gateway",
            reconciles.clone(),
        );

        let route_binds = Family::default();
        registry.register(
            "gateway_binder_route_binds",
            "Count of route bind attempts, labeled by whether they were accepted",
            route_binds.clone(),
        );

        let mesh_gc = Counter::default();
        registry.register(
            "gateway_binder_mesh_resources_gced",
            "Count of mesh resources garbage collected across all reconciles",
            mesh_gc.clone(),
        );

        Self {
            reconciles,
            route_binds,
            mesh_gc,
        }
    }

    pub fn record_reconcile(&self, namespace: &str, name: &str) {
        self.reconciles
            .get_or_create(&GatewayLabels {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
            .inc();
    }

    pub fn record_route_bind(&self, namespace: &str, name: &str, accepted: bool) {
        self.route_binds
            .get_or_create(&RouteBindLabels {
                namespace: namespace.to_string(),
                name: name.to_string(),
                accepted,
            })
            .inc();
    }

    pub fn record_mesh_gc(&self, count: usize) {
        self.mesh_gc.inc_by(count as u64);
    }
}
