use ahash::AHashMap as HashMap;
use gateway_binder_core::{
    gateway::{Gateway, NamespacePolicy, RouteKind},
    hostname::route_hostnames_match_listener,
    resource_id::ResourceId,
    routes::{ParentRef, Route},
};

use crate::config::{selector_matches, NamespaceInfo};

/// Per `(parent, listener)` outcome of the binding engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BindError {
    NotAllowedByListenersProtocol,
    NotAllowedByListenersNamespace,
    NoMatchingListenerHostname,
    NoMatchingParent,
    RefNotPermitted,
}

impl BindError {
    /// The Accepted-condition reason for this error when it's the single
    /// surviving result for a parent.
    pub fn specific_reason(&self) -> &'static str {
        match self {
            BindError::NotAllowedByListenersProtocol => "NotAllowedByListeners",
            BindError::NotAllowedByListenersNamespace => "NotAllowedByListeners",
            BindError::NoMatchingListenerHostname => "NoMatchingListenerHostname",
            BindError::NoMatchingParent => "NoMatchingParent",
            BindError::RefNotPermitted => "RefNotPermitted",
        }
    }
}

pub const FALLBACK_REASON: &str = "NotAllowedByListeners";

#[derive(Clone, Debug, PartialEq)]
pub struct BindResult {
    pub parent_ref: ParentRef,
    pub listener_name: String,
    pub outcome: Result<(), BindError>,
}

/// Filters a route's parent refs down to those addressing `gateway`: match
/// on group (default the Gateway-API group), kind (default `Gateway`),
/// namespace (default the route's own namespace), and name.
fn parent_targets_gateway(parent: &ParentRef, route_namespace: &str, gateway: &Gateway) -> bool {
    let group_ok = parent
        .group
        .as_deref()
        .map(|g| g == gateway_binder_core::reference_grant::GATEWAY_GROUP || g.is_empty())
        .unwrap_or(true);
    let kind_ok = parent.kind.as_deref().map(|k| k == "Gateway").unwrap_or(true);
    let ns = parent.namespace.as_deref().unwrap_or(route_namespace);
    group_ok && kind_ok && ns == gateway.id.namespace && parent.name == gateway.id.name
}

fn namespace_allowed(
    policy: &NamespacePolicy,
    gateway_namespace: &str,
    route_namespace: &str,
    namespaces: &HashMap<String, NamespaceInfo>,
) -> bool {
    match policy {
        NamespacePolicy::Same => route_namespace == gateway_namespace,
        NamespacePolicy::All => true,
        NamespacePolicy::Selector(selector) => {
            let ns_info = namespaces
                .get(route_namespace)
                .cloned()
                .unwrap_or_default()
                .with_synthesized_name_label(route_namespace);
            selector_matches(selector, &ns_info)
        }
    }
}

/// Binds one route to one gateway, producing a `BindResult` per
/// `(surviving parent, targeted listener)` pair, and the count of
/// successful binds per listener name (for `AttachedRoutes`).
pub fn bind_route_to_gateway(
    route: &Route,
    gateway: &Gateway,
    namespaces: &HashMap<String, NamespaceInfo>,
) -> (Vec<BindResult>, HashMap<String, u32>) {
    let route_ns = route.id().namespace.clone();
    let mut results = Vec::new();
    let mut bound_counts: HashMap<String, u32> = HashMap::default();

    for parent in route.parent_refs() {
        if !parent_targets_gateway(parent, &route_ns, gateway) {
            continue;
        }

        let targeted_listeners: Vec<&gateway_binder_core::gateway::Listener> = match &parent.section_name {
            Some(section) => gateway
                .listeners
                .iter()
                .filter(|l| &l.name == section)
                .collect(),
            None => gateway.listeners.iter().collect(),
        };

        if targeted_listeners.is_empty() {
            results.push(BindResult {
                parent_ref: parent.clone(),
                listener_name: String::new(),
                outcome: Err(BindError::NoMatchingParent),
            });
            continue;
        }

        for listener in targeted_listeners {
            let outcome = bind_to_listener(route, &route_ns, listener, gateway, namespaces);
            if outcome.is_ok() {
                *bound_counts.entry(listener.name.clone()).or_insert(0) += 1;
            }
            results.push(BindResult {
                parent_ref: parent.clone(),
                listener_name: listener.name.clone(),
                outcome,
            });
        }
    }

    (results, bound_counts)
}

fn bind_to_listener(
    route: &Route,
    route_ns: &str,
    listener: &gateway_binder_core::gateway::Listener,
    gateway: &Gateway,
    namespaces: &HashMap<String, NamespaceInfo>,
) -> Result<(), BindError> {
    let route_kind = route.kind();
    let supported = match listener.protocol {
        gateway_binder_core::gateway::Protocol::Http
        | gateway_binder_core::gateway::Protocol::Https => RouteKind::Http,
        gateway_binder_core::gateway::Protocol::Tcp => RouteKind::Tcp,
    };
    if route_kind != supported {
        return Err(BindError::NotAllowedByListenersProtocol);
    }

    if !namespace_allowed(
        &listener.allowed_routes.namespaces,
        &gateway.id.namespace,
        route_ns,
        namespaces,
    ) {
        return Err(BindError::NotAllowedByListenersNamespace);
    }

    if let Some(listener_hostname) = &listener.hostname {
        if !route_hostnames_match_listener(route.hostnames(), listener_hostname) {
            return Err(BindError::NoMatchingListenerHostname);
        }
    }

    Ok(())
}

/// Picks the Accepted-condition reason for a parent's bind results:
/// accepted iff at least one listener accepted; otherwise the single
/// specific reason, or the generic fallback when results disagree.
pub fn accepted_reason_for_parent(results: &[&BindResult]) -> Result<(), &'static str> {
    if results.iter().any(|r| r.outcome.is_ok()) {
        return Ok(());
    }
    let mut reasons = results.iter().filter_map(|r| r.outcome.as_ref().err());
    let first = match reasons.next() {
        Some(e) => e,
        None => return Err(FALLBACK_REASON),
    };
    if reasons.all(|e| e == first) {
        Err(first.specific_reason())
    } else {
        Err(FALLBACK_REASON)
    }
}

/// Gateways other than `this_gateway` that this controller has previously
/// accepted as parents of `route`, read off the route's own status.
///
/// The mesh side never hands back a route's current `parents[]` as input
/// (the core only ever reconciles one gateway at a time), so the route's
/// per-parent status — which every managing gateway's reconcile keeps
/// current — is the only available record of who else still claims it.
pub fn other_accepted_gateway_ids(
    route: &Route,
    route_ns: &str,
    controller_name: &str,
    this_gateway: &ResourceId,
) -> Vec<ResourceId> {
    route
        .common()
        .status
        .parents
        .iter()
        .filter(|p| p.controller_name == controller_name)
        .filter(|p| {
            p.conditions
                .iter()
                .any(|c| c.type_ == "Accepted" && c.status == "True")
        })
        .map(|p| {
            let ns = p
                .parent_ref
                .namespace
                .clone()
                .unwrap_or_else(|| route_ns.to_string());
            ResourceId::new(ns, p.parent_ref.name.clone())
        })
        .filter(|id| id != this_gateway)
        .collect()
}

/// Recomputes a mesh route's parent set: existing parents minus this
/// gateway's, union the listener sections that accepted this reconcile.
pub fn recompute_mesh_parents(
    existing: &[ResourceId],
    gateway_id: &ResourceId,
    accepted_listener_refs: &[ResourceId],
) -> Vec<ResourceId> {
    let mut kept: Vec<ResourceId> = existing
        .iter()
        .filter(|id| *id != gateway_id)
        .cloned()
        .collect();
    for id in accepted_listener_refs {
        if !kept.contains(id) {
            kept.push(id.clone());
        }
    }
    kept
}
