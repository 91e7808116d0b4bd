//! End-to-end reconcile scenarios, exercising `Binder::reconcile` the way a
//! caller would: build a `BinderConfig`, reconcile once or twice, and assert
//! on the resulting `Snapshot`.

mod cross_namespace_tls;

use crate::config::BinderConfig;
use gateway_binder_core::{
    gateway::{AllowedRoutes, Gateway, GatewayClass, GatewayClassConfig, Listener, Protocol},
    resource_id::ResourceId,
};
use ahash::AHashMap as HashMap;

pub(crate) const CONTROLLER_NAME: &str = "gateway.consul.hashicorp.com/gateway-controller";

pub(crate) fn base_gateway(namespace: &str, name: &str) -> Gateway {
    Gateway {
        id: ResourceId::new(namespace, name),
        generation: 1,
        deletion_timestamp: None,
        finalizers: vec![gateway_binder_core::gateway::GATEWAY_FINALIZER.to_string()],
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

pub(crate) fn base_config(gateway: Gateway) -> BinderConfig {
    BinderConfig {
        controller_name: CONTROLLER_NAME.to_string(),
        gateway,
        gateway_class: Some(GatewayClass {
            name: "gw-class".to_string(),
            controller_name: CONTROLLER_NAME.to_string(),
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
