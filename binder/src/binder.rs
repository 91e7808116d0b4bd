use ahash::{AHashMap as HashMap, AHashSet as HashSet};
use gateway_binder_core::{
    condition::{make_condition, Clock, SystemClock},
    gateway::{GatewayStatus, ListenerStatus, GATEWAY_FINALIZER},
    mesh::{MeshConfigEntry, ResourceReference},
    reference_grant::ReferenceValidator,
    resource_id::ResourceId,
    routes::{ParentRef, Route},
};

use crate::{
    bind::{
        accepted_reason_for_parent, bind_route_to_gateway, other_accepted_gateway_ids,
        recompute_mesh_parents, BindResult,
    },
    config::BinderConfig,
    metrics::BinderMetrics,
    resource_map::ResourceMap,
    snapshot::{ConsulUpdate, KubernetesObject, OnUpdate, Snapshot},
    status::StatusSetter,
    translate,
    validate::{validate_backend, validate_gateway, validate_listeners},
};

/// Builds the `api-gateway`-kind mesh reference for a gateway identity,
/// namespace included — unlike `ResourceReference::new` alone, which would
/// normalize an unset namespace to the writer's default and silently lose a
/// cross-namespace gateway's real namespace.
fn gateway_mesh_ref(id: &ResourceId) -> ResourceReference {
    let mut r = ResourceReference::new("api-gateway", &id.name);
    r.namespace = id.namespace.clone();
    r.normalized()
}

/// The reconciliation engine: given a `BinderConfig` snapshot, computes the
/// `Snapshot` of mutations to apply, with no I/O and no side effects.
pub struct Binder {
    clock: Box<dyn Clock>,
}

impl Default for Binder {
    fn default() -> Self {
        Self {
            clock: Box::new(SystemClock),
        }
    }
}

impl Binder {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Runs one reconcile for the gateway named in `config.gateway`.
    pub fn reconcile(&self, mut config: BinderConfig, metrics: Option<&BinderMetrics>) -> Snapshot {
        if let Some(metrics) = metrics {
            metrics.record_reconcile(&config.gateway.id.namespace, &config.gateway.id.name);
        }

        // Pods with a deletion timestamp are gone from the mesh's point of
        // view even if the API server hasn't finished tearing them down.
        config.pods.retain(|p| !p.is_deleted());

        // Decide whether this gateway is "deleted" from the binder's
        // perspective: either it truly has a deletion timestamp, or its
        // gateway-class no longer names this controller, or the class
        // config this controller needs has gone missing.
        let class_matches = config
            .gateway_class
            .as_ref()
            .map(|gc| gc.controller_name == config.controller_name)
            .unwrap_or(false);
        let is_gateway_deleted =
            config.gateway.is_deleted() || !class_matches || config.gateway_class_config.is_none();

        let mut snapshot = Snapshot::default();

        if !is_gateway_deleted {
            // Pin the gateway-class-config annotation and ensure the
            // finalizer; if either mutated the gateway, stop here and let
            // the next reconcile pick up from the updated object.
            let mut gateway = config.gateway.clone();
            let mut mutated = false;

            let live_config = config
                .gateway_class_config
                .clone()
                .expect("checked above: gateway_class_config is Some when not deleted");
            if config.annotated_gateway_class_config.as_ref() != Some(&live_config) {
                snapshot.gateway_class_config = Some(live_config);
                mutated = true;
            }
            if !gateway.has_finalizer(GATEWAY_FINALIZER) {
                gateway.finalizers.push(GATEWAY_FINALIZER.to_string());
                mutated = true;
            }

            if mutated {
                snapshot
                    .kubernetes
                    .updates
                    .push(KubernetesObject::Gateway(gateway));
                return snapshot;
            }
        }

        // Build the reference validator and resource map for this
        // reconcile.
        let reference_validator = ReferenceValidator::new(config.reference_grants.clone());
        let mut resource_map = ResourceMap::new(reference_validator);
        for secret in config.certificates.values() {
            resource_map.add_certificate(secret.clone());
        }
        if let Some(existing_gw) = &config.existing_mesh_state.gateway {
            resource_map.note_known_mesh_resource(existing_gw.reference.clone());
        }
        for known in &config.existing_mesh_state.known_routes {
            resource_map.note_known_mesh_resource(known.clone());
        }
        for known in &config.existing_mesh_state.known_certificates {
            resource_map.note_known_mesh_resource(known.clone());
        }

        // Validate listeners, then the gateway as a whole.
        let listener_results = validate_listeners(
            &config.gateway,
            &config.certificates,
            &config.jwt_providers,
            |gw, secret| resource_map.gateway_can_reference_secret(gw, secret),
        );
        let any_pod_scheduled = config.pods.iter().any(|p| p.has_required_fields());
        let gateway_validation = validate_gateway(&config.gateway, &listener_results, any_pod_scheduled);

        let mut known_backends: HashSet<ResourceId> = HashSet::default();
        for route in config.http_routes.iter().chain(config.tcp_routes.iter()) {
            let route_ns = route.id().namespace.clone();
            for b in route.backend_refs() {
                let ns = b.namespace.clone().unwrap_or_else(|| route_ns.clone());
                known_backends.insert(ResourceId::new(ns, b.name.clone()));
            }
        }

        // Bind every route against this gateway and compose its status.
        // Skipped entirely once the gateway is deleted: a route still
        // naming it as a parent gets that parent's status entry removed
        // instead of freshly validated.
        let status_setter = StatusSetter::new(config.controller_name.clone(), self.clock.as_ref());
        let mut bound_counts: HashMap<String, u32> = HashMap::default();
        let mut status_updates = Vec::new();

        if !is_gateway_deleted {
            for route in config.http_routes.iter().chain(config.tcp_routes.iter()) {
                let mut route = route.clone();
                let mesh_entry = self.bind_one_route(
                    &mut route,
                    &config,
                    &resource_map,
                    &known_backends,
                    &status_setter,
                    &mut bound_counts,
                    metrics,
                );
                resource_map.push_mutation(mesh_entry);
                status_updates.push(KubernetesObject::Route(route));
            }

            // Translate referenced TLS certificates into mesh entries.
            for listener in &config.gateway.listeners {
                if let Some(tls) = &listener.tls {
                    for cert_ref in &tls.certificate_refs {
                        let resolved = if cert_ref.namespace.is_empty() {
                            ResourceId::new(config.gateway.id.namespace.clone(), cert_ref.name.clone())
                        } else {
                            cert_ref.clone()
                        };
                        // Counted once per listener reference, so a
                        // certificate shared by several listeners on this
                        // gateway carries a count above 1.
                        resource_map.reference_count_certificate(&resolved);
                        resource_map.translate_file_system_certificate(&resolved);
                    }
                }
            }
        } else {
            for route in config.http_routes.iter().chain(config.tcp_routes.iter()) {
                let mut route = route.clone();
                let route_ns = route.id().namespace.clone();
                let route_id = route.id().clone();

                let had_this_gateway_as_parent = route.common().status.parents.iter().any(|p| {
                    p.controller_name == config.controller_name && p.parent_ref.name == config.gateway.id.name
                });

                let before = route.common().status.parents.len();
                route.common_mut().status.parents.retain(|p| {
                    p.controller_name != config.controller_name || p.parent_ref.name != config.gateway.id.name
                });
                if route.common().status.parents.len() != before {
                    status_updates.push(KubernetesObject::Route(route.clone()));
                }

                if !had_this_gateway_as_parent {
                    continue;
                }

                // This gateway was unbinding from the route. Re-count its
                // mesh parents (this gateway plus whatever other gateways
                // still accept it). If nothing else claims it, leave its
                // mesh entry out of `mutations` so `resources_to_gc()`'s
                // reference-count check picks it up on its own; otherwise
                // re-emit it with this gateway's parent dropped.
                let other_gateways =
                    other_accepted_gateway_ids(&route, &route_ns, &config.controller_name, &config.gateway.id);
                for _ in 0..other_gateways.len() + 1 {
                    match &route {
                        Route::Http(_) => resource_map.reference_count_http_route(&route_id),
                        Route::Tcp(_) => resource_map.reference_count_tcp_route(&route_id),
                    }
                }

                if !other_gateways.is_empty() {
                    let remaining_parents: Vec<ResourceReference> =
                        other_gateways.iter().map(gateway_mesh_ref).collect();
                    let mesh_entry = match &route {
                        Route::Http(_) => {
                            MeshConfigEntry::HttpRoute(translate::translate_http_route(&route, remaining_parents))
                        }
                        Route::Tcp(_) => {
                            MeshConfigEntry::TcpRoute(translate::translate_tcp_route(&route, remaining_parents))
                        }
                    };
                    resource_map.push_mutation(mesh_entry);
                }
            }
        }

        // Translate the gateway itself before computing GC, and mark its
        // own reference as mutated so it never also shows up as something
        // to delete — the translated entry is pushed straight onto
        // `snapshot.consul.updates` below rather than through
        // `resource_map.push_mutation`, since it carries a status-reconcile
        // callback the plain mutation list can't express.
        let gateway_entry = if !is_gateway_deleted {
            let entry = translate::translate_gateway(&config.gateway);
            resource_map.note_mutated_reference(entry.reference.clone());
            Some(entry)
        } else {
            None
        };

        // Garbage-collect mesh resources nothing referenced this reconcile.
        snapshot.consul.deletions = resource_map.resources_to_gc();
        if let Some(metrics) = metrics {
            metrics.record_mesh_gc(snapshot.consul.deletions.len());
        }
        snapshot.consul.updates = resource_map
            .mutations()
            .iter()
            .cloned()
            .map(|entry| ConsulUpdate {
                entry,
                on_update: OnUpdate::None,
            })
            .collect();

        let mut gateway = config.gateway.clone();

        if let Some(gateway_entry) = gateway_entry {
            // Register its live pods and compose the status to write back.
            snapshot.consul.updates.push(ConsulUpdate {
                entry: MeshConfigEntry::ApiGateway(gateway_entry),
                on_update: OnUpdate::ReconcileGatewayStatus,
            });

            let mut live_ids = Vec::new();
            for pod in &config.pods {
                if !pod.has_required_fields() {
                    continue;
                }
                snapshot
                    .consul
                    .registrations
                    .push(build_registration(pod, &config));
                live_ids.push(pod.name.clone());
            }
            for existing_id in &config.existing_mesh_state.registered_service_ids {
                if !live_ids.contains(existing_id) {
                    snapshot.consul.deregistrations.push(
                        gateway_binder_core::catalog::CatalogDeregistration {
                            node: format!("{}-node", existing_id),
                            service_id: existing_id.clone(),
                        },
                    );
                }
            }

            let new_status = self.compose_gateway_status(&config, &gateway_validation, &bound_counts);
            if !gateway_binder_core::condition::condition_lists_equal_ignoring_time(
                &gateway.status.conditions,
                &new_status.conditions,
            ) || gateway.status.listeners != new_status.listeners
            {
                gateway.status = new_status;
                status_updates.push(KubernetesObject::Gateway(gateway));
            }

            snapshot.upsert_gateway_deployment = true;
        } else {
            // The gateway is gone: its mesh entry is already in
            // `snapshot.consul.deletions` via `resources_to_gc()` above
            // (its reference was seeded into `known_mesh_resources` and
            // nothing marks it mutated once deleted). Tear down its
            // registrations and drop the finalizer so Kubernetes can finish
            // deleting the object.
            for service_id in &config.existing_mesh_state.registered_service_ids {
                snapshot.consul.deregistrations.push(
                    gateway_binder_core::catalog::CatalogDeregistration {
                        node: format!("{}-node", service_id),
                        service_id: service_id.clone(),
                    },
                );
            }

            gateway.finalizers.retain(|f| f != GATEWAY_FINALIZER);
            snapshot
                .kubernetes
                .updates
                .push(KubernetesObject::Gateway(gateway));
        }

        snapshot.kubernetes.status_updates = status_updates;
        snapshot
    }

    fn compose_gateway_status(
        &self,
        config: &BinderConfig,
        validation: &crate::validate::GatewayValidation,
        bound_counts: &HashMap<String, u32>,
    ) -> GatewayStatus {
        let conditions = vec![
            make_condition(
                self.clock.as_ref(),
                "Accepted",
                validation.accepted(),
                if validation.unsupported_address {
                    "UnsupportedAddress"
                } else if validation.listeners_not_valid {
                    "ListenersNotValid"
                } else {
                    "Accepted"
                },
                "",
                Some(config.gateway.generation),
            ),
            make_condition(
                self.clock.as_ref(),
                "Programmed",
                !validation.pods_unscheduled,
                if validation.pods_unscheduled {
                    "Pending"
                } else {
                    "Programmed"
                },
                "",
                Some(config.gateway.generation),
            ),
        ];

        let listeners = config
            .gateway
            .listeners
            .iter()
            .map(|l| ListenerStatus {
                name: l.name.clone(),
                attached_routes: *bound_counts.get(&l.name).unwrap_or(&0) as i32,
                conditions: vec![make_condition(
                    self.clock.as_ref(),
                    "Programmed",
                    true,
                    "Programmed",
                    "",
                    Some(config.gateway.generation),
                )],
            })
            .collect();

        GatewayStatus {
            conditions,
            listeners,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn bind_one_route(
        &self,
        route: &mut Route,
        config: &BinderConfig,
        resource_map: &ResourceMap,
        known_backends: &HashSet<ResourceId>,
        status_setter: &StatusSetter<'_>,
        bound_counts: &mut HashMap<String, u32>,
        metrics: Option<&BinderMetrics>,
    ) -> MeshConfigEntry {
        let (results, route_bound_counts) =
            bind_route_to_gateway(route, &config.gateway, &config.namespaces);
        for (listener, count) in route_bound_counts {
            *bound_counts.entry(listener).or_insert(0) += count;
        }

        let route_ns = route.id().namespace.clone();

        // Prune only this controller's existing entries that target *this*
        // gateway, then re-add the freshly computed ones below — a route
        // shared across multiple gateways must keep the other gateways'
        // entries untouched.
        let this_gateway_parents: Vec<ParentRef> = route
            .common()
            .status
            .parents
            .iter()
            .filter(|p| p.controller_name == config.controller_name)
            .map(|p| p.parent_ref.clone())
            .filter(|p| {
                let resolved_ns = p.namespace.as_deref().unwrap_or(&route_ns);
                resolved_ns == config.gateway.id.namespace && p.name == config.gateway.id.name
            })
            .collect();
        status_setter.remove_route_references(&mut route.common_mut().status, &this_gateway_parents);

        let resolved_refs_errors: Vec<_> = route
            .backend_refs()
            .iter()
            .filter_map(|b| {
                validate_backend(&route_ns, b, known_backends, resource_map.reference_validator()).err()
            })
            .collect();
        let resolved_refs_ok = resolved_refs_errors.is_empty();

        // `ParentRef` carries only structural `PartialEq` (no `Hash`), so
        // grouping goes through a linear scan rather than a map.
        let mut unique_parents: Vec<ParentRef> = Vec::new();
        for r in &results {
            if !unique_parents.iter().any(|p| p.status_equal(&r.parent_ref)) {
                unique_parents.push(r.parent_ref.clone());
            }
        }

        let mut accepted_listener_refs = Vec::new();
        for parent_ref in &unique_parents {
            let parent_results: Vec<&BindResult> = results
                .iter()
                .filter(|r| r.parent_ref.status_equal(parent_ref))
                .collect();
            let accepted_verdict = accepted_reason_for_parent(&parent_results);
            let accepted = accepted_verdict.is_ok();
            if let Some(metrics) = metrics {
                metrics.record_route_bind(&route.id().namespace, &route.id().name, accepted);
            }
            if accepted {
                accepted_listener_refs.push(config.gateway.id.clone());
            }

            let conditions = vec![
                make_condition(
                    self.clock.as_ref(),
                    "Accepted",
                    accepted,
                    accepted_verdict.err().unwrap_or("Accepted"),
                    "",
                    Some(route.common().generation),
                ),
                make_condition(
                    self.clock.as_ref(),
                    "ResolvedRefs",
                    resolved_refs_ok,
                    resolved_refs_errors
                        .first()
                        .map(|e| e.reason())
                        .unwrap_or("ResolvedRefs"),
                    "",
                    Some(route.common().generation),
                ),
            ];
            status_setter.set_route_condition(&mut route.common_mut().status, parent_ref, conditions);
        }

        let other_gateways =
            other_accepted_gateway_ids(&*route, &route_ns, &config.controller_name, &config.gateway.id);
        let mesh_parents: Vec<ResourceReference> =
            recompute_mesh_parents(&other_gateways, &config.gateway.id, &accepted_listener_refs)
                .into_iter()
                .map(|id| gateway_mesh_ref(&id))
                .collect();

        let mesh_route = match &*route {
            Route::Http(_) => translate::translate_http_route(&*route, mesh_parents),
            Route::Tcp(_) => translate::translate_tcp_route(&*route, mesh_parents),
        };
        match &*route {
            Route::Http(_) => MeshConfigEntry::HttpRoute(mesh_route),
            Route::Tcp(_) => MeshConfigEntry::TcpRoute(mesh_route),
        }
    }
}

fn build_registration(
    pod: &gateway_binder_core::catalog::GatewayPod,
    config: &BinderConfig,
) -> gateway_binder_core::catalog::CatalogRegistration {
    use gateway_binder_core::catalog::{CatalogCheck, CatalogProxy, CatalogRegistration, CatalogService, CheckStatus};
    use std::collections::BTreeMap;

    let mut node_meta = BTreeMap::new();
    node_meta.insert("synthetic-node".to_string(), "true".to_string());

    let mut meta = BTreeMap::new();
    meta.insert("k8s-name".to_string(), pod.name.clone());
    meta.insert("k8s-namespace".to_string(), pod.namespace.clone());
    meta.insert("k8s-service-name".to_string(), config.gateway.id.name.clone());
    meta.insert("external-source".to_string(), "consul-api-gateway".to_string());

    let proxy = config.helm.metrics_port.map(|port| CatalogProxy {
        envoy_prometheus_bind_addr: format!("{}:{}", pod.pod_ip.clone().unwrap_or_default(), port),
    });

    CatalogRegistration {
        node: format!("{}-synthetic", pod.node_name.clone().unwrap_or_default()),
        address: pod.host_ip.clone().unwrap_or_default(),
        node_meta,
        service: CatalogService {
            kind: "api-gateway".to_string(),
            id: pod.name.clone(),
            service: config.gateway.id.name.clone(),
            address: pod.pod_ip.clone().unwrap_or_default(),
            namespace: pod.namespace.clone(),
            proxy,
            meta,
        },
        check: CatalogCheck {
            name: "Kubernetes Readiness Check".to_string(),
            type_: "kubernetes-readiness".to_string(),
            status: if pod.ready {
                CheckStatus::Passing
            } else {
                CheckStatus::Critical
            },
            output: if pod.ready {
                "Kubernetes health checks passing".to_string()
            } else {
                format!("Pod \"{}/{}\" is not ready", pod.namespace, pod.name)
            },
        },
        skip_node_update: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_binder_core::{
        condition::FixedClock,
        gateway::{AllowedRoutes, Gateway, GatewayClass, GatewayClassConfig, Listener, Protocol},
        mesh::{MeshApiGateway, MeshMeta},
        resource_id::ResourceId,
        routes::{HttpRoute, ParentRef as Parent, RouteCommon, RouteStatus},
    };

    fn clock() -> FixedClock {
        FixedClock(chrono::DateTime::from_timestamp(0, 0).unwrap())
    }

    fn base_gateway() -> Gateway {
        Gateway {
            id: ResourceId::new("ns", "gw"),
            generation: 1,
            deletion_timestamp: None,
            finalizers: vec![GATEWAY_FINALIZER.to_string()],
            gateway_class_name: "gw-class".to_string(),
            listeners: vec![Listener {
                name: "http".to_string(),
                protocol: Protocol::Http,
                port: 80,
                hostname: None,
                tls: None,
                allowed_routes: AllowedRoutes::default(),
            }],
            addresses: vec![],
            status: Default::default(),
        }
    }

    fn base_config() -> BinderConfig {
        BinderConfig {
            controller_name: "gateway.consul.hashicorp.com/gateway-controller".to_string(),
            gateway: base_gateway(),
            gateway_class: Some(GatewayClass {
                name: "gw-class".to_string(),
                controller_name: "gateway.consul.hashicorp.com/gateway-controller".to_string(),
            }),
            gateway_class_config: Some(GatewayClassConfig::default()),
            annotated_gateway_class_config: Some(GatewayClassConfig::default()),
            namespaces: HashMap::default(),
            pods: vec![],
            service_account_name: None,
            http_routes: vec![],
            tcp_routes: vec![],
            reference_grants: vec![],
            certificates: HashMap::default(),
            jwt_providers: HashMap::default(),
            gateway_policies: vec![],
            auth_filters: vec![],
            existing_mesh_state: Default::default(),
            helm: Default::default(),
        }
    }

    #[test]
    fn gateway_class_mismatch_is_treated_as_deleted() {
        let mut config = base_config();
        config.gateway_class = Some(GatewayClass {
            name: "gw-class".to_string(),
            controller_name: "someone-else/controller".to_string(),
        });
        let binder = Binder::new(Box::new(clock()));
        let snapshot = binder.reconcile(config, None);
        assert!(snapshot
            .kubernetes
            .updates
            .iter()
            .any(|u| matches!(u, KubernetesObject::Gateway(g) if !g.has_finalizer(GATEWAY_FINALIZER))));
    }

    #[test]
    fn missing_finalizer_is_added_and_reconcile_stops_early() {
        let mut config = base_config();
        config.gateway.finalizers.clear();
        let binder = Binder::new(Box::new(clock()));
        let snapshot = binder.reconcile(config, None);
        assert_eq!(snapshot.kubernetes.updates.len(), 1);
        assert!(snapshot.consul.updates.is_empty());
    }

    #[test]
    fn simple_http_route_binds_and_gets_accepted_status() {
        let mut config = base_config();
        config.http_routes.push(Route::Http(HttpRoute {
            common: RouteCommon {
                id: ResourceId::new("ns", "route"),
                generation: 1,
                parent_refs: vec![Parent {
                    group: None,
                    kind: None,
                    namespace: None,
                    name: "gw".to_string(),
                    section_name: None,
                    port: None,
                }],
                backend_refs: vec![],
                status: RouteStatus::default(),
            },
            hostnames: vec![],
        }));
        let binder = Binder::new(Box::new(clock()));
        let snapshot = binder.reconcile(config, None);

        let route_update = snapshot
            .kubernetes
            .status_updates
            .iter()
            .find_map(|u| match u {
                KubernetesObject::Route(r) => Some(r),
                _ => None,
            })
            .expect("route status update emitted");
        let parent_status = &route_update.common().status.parents[0];
        assert!(parent_status
            .conditions
            .iter()
            .any(|c| c.type_ == "Accepted" && c.status == "True"));

        assert_eq!(snapshot.consul.updates.len(), 2, "gateway entry + route entry");
    }

    #[test]
    fn reconcile_is_idempotent_once_settled() {
        let mut config = base_config();
        let binder = Binder::new(Box::new(clock()));
        let first = binder.reconcile(config.clone(), None);
        if let Some(KubernetesObject::Gateway(g)) = first.kubernetes.status_updates.first() {
            config.gateway.status = g.status.clone();
        }
        let second = binder.reconcile(config, None);
        assert!(
            second.kubernetes.status_updates.is_empty()
                || second.kubernetes.status_updates == first.kubernetes.status_updates,
            "second reconcile over settled state should not thrash status"
        );
    }

    #[test]
    fn steady_state_reconcile_never_gcs_its_own_gateway_entry() {
        let mut config = base_config();
        config.existing_mesh_state.gateway = Some(MeshApiGateway {
            reference: ResourceReference::new("api-gateway", "gw"),
            meta: MeshMeta::for_k8s_object("ns", "gw"),
            listeners: vec!["http".to_string()],
        });
        let binder = Binder::new(Box::new(clock()));
        let snapshot = binder.reconcile(config, None);
        assert!(
            snapshot
                .consul
                .deletions
                .iter()
                .all(|r| !(r.name == "gw" && r.kind == "api-gateway")),
            "the live gateway's own mesh entry must never be scheduled for deletion"
        );
        assert!(snapshot.consul.updates.iter().any(
            |u| matches!(&u.entry, MeshConfigEntry::ApiGateway(g) if g.reference.name == "gw")
        ));
    }

    #[test]
    fn gateway_deletion_removes_finalizer_and_gcs_mesh_entry() {
        let mut config = base_config();
        config.gateway.deletion_timestamp = Some(chrono::DateTime::from_timestamp(0, 0).unwrap());
        config.existing_mesh_state.gateway = Some(MeshApiGateway {
            reference: ResourceReference::new("api-gateway", "gw"),
            meta: MeshMeta::for_k8s_object("ns", "gw"),
            listeners: vec!["http".to_string()],
        });
        let binder = Binder::new(Box::new(clock()));
        let snapshot = binder.reconcile(config, None);
        assert!(snapshot
            .kubernetes
            .updates
            .iter()
            .any(|u| matches!(u, KubernetesObject::Gateway(g) if !g.has_finalizer(GATEWAY_FINALIZER))));
        assert!(snapshot
            .consul
            .deletions
            .iter()
            .any(|r| r.name == "gw" && r.kind == "api-gateway"));
    }
}
