use gateway_binder_core::{
    error::BindError,
    gateway::{Gateway, GatewayClassConfig},
    mesh::{MeshApiGateway, MeshMeta, MeshRoute, ResourceReference},
    resource_id::ResourceId,
    routes::Route,
};

/// Pure, opinionated Kubernetes-object → mesh-config-entry mapping. Every
/// emitted entry carries a `meta` map recording its source identity so
/// reverse lookup stays stable.
pub fn translate_gateway(gateway: &Gateway) -> MeshApiGateway {
    MeshApiGateway {
        reference: ResourceReference::new("api-gateway", &gateway.id.name)
            .with_namespace(&gateway.id.namespace),
        meta: MeshMeta::for_k8s_object(&gateway.id.namespace, &gateway.id.name),
        listeners: gateway.listeners.iter().map(|l| l.name.clone()).collect(),
    }
}

fn translate_route_common(kind: &str, route: &Route, parents: Vec<ResourceReference>) -> MeshRoute {
    let id = route.id();
    MeshRoute {
        reference: ResourceReference::new(kind, &id.name).with_namespace(&id.namespace),
        meta: MeshMeta::for_k8s_object(&id.namespace, &id.name),
        parents,
        statuses: Vec::new(),
    }
}

pub fn translate_http_route(route: &Route, parents: Vec<ResourceReference>) -> MeshRoute {
    translate_route_common("http-route", route, parents)
}

pub fn translate_tcp_route(route: &Route, parents: Vec<ResourceReference>) -> MeshRoute {
    translate_route_common("tcp-route", route, parents)
}

trait WithNamespace {
    fn with_namespace(self, namespace: &str) -> Self;
}

impl WithNamespace for ResourceReference {
    fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self.normalized()
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct AnnotationPayload {
    config: GatewayClassConfig,
    generation: i64,
}

/// Encodes the gateway-class annotation value. Encoding failure
/// (practically unreachable for a value-typed `GatewayClassConfig`, but
/// modeled because the error handling design calls it out explicitly)
/// falls back to the raw JSON of the config.
pub fn encode_gateway_class_annotation(config: &GatewayClassConfig) -> String {
    let payload = AnnotationPayload {
        config: config.clone(),
        generation: config.generation,
    };
    match serde_json::to_string(&payload) {
        Ok(s) => s,
        Err(error) => {
            tracing::warn!(%error, "failed to encode gateway-class-config annotation; falling back to raw spec");
            serde_json::to_string(config).unwrap_or_default()
        }
    }
}

/// Decodes the annotation into an owned `GatewayClassConfig` when its
/// `generation` matches `live`'s. Returns `None` on parse failure or
/// generation mismatch, in which case the caller should use the live config
/// (the raw-spec fallback case is handled by [`encode_gateway_class_annotation`]
/// on the write side).
pub fn decode_gateway_class_annotation(
    annotation_value: &str,
    live: &GatewayClassConfig,
) -> Result<GatewayClassConfig, BindError> {
    let payload: AnnotationPayload = serde_json::from_str(annotation_value)
        .map_err(|e| BindError::AnnotationEncode(e.to_string()))?;
    if payload.generation == live.generation {
        Ok(payload.config)
    } else {
        Err(BindError::AnnotationEncode(
            "annotation generation stale".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_binder_core::gateway::{AllowedRoutes, Listener, Protocol};

    #[test]
    fn translate_gateway_carries_listener_names_and_meta() {
        let gw = Gateway {
            id: ResourceId::new("ns", "gw"),
            generation: 1,
            deletion_timestamp: None,
            finalizers: vec![],
            gateway_class_name: "gw-class".to_string(),
            listeners: vec![Listener {
                name: "l1".to_string(),
                protocol: Protocol::Http,
                port: 80,
                hostname: None,
                tls: None,
                allowed_routes: AllowedRoutes::default(),
            }],
            addresses: vec![],
            status: Default::default(),
        };
        let entry = translate_gateway(&gw);
        assert_eq!(entry.listeners, vec!["l1".to_string()]);
        assert_eq!(entry.meta.fields.get("k8s-name"), Some(&"gw".to_string()));
        assert_eq!(entry.reference.namespace, "ns");
    }

    #[test]
    fn annotation_round_trips_when_generation_matches() {
        let config = GatewayClassConfig {
            generation: 3,
            fields: Default::default(),
        };
        let encoded = encode_gateway_class_annotation(&config);
        let decoded = decode_gateway_class_annotation(&encoded, &config).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn stale_generation_is_rejected() {
        let written = GatewayClassConfig {
            generation: 1,
            fields: Default::default(),
        };
        let encoded = encode_gateway_class_annotation(&written);
        let live = GatewayClassConfig {
            generation: 2,
            fields: Default::default(),
        };
        assert!(decode_gateway_class_annotation(&encoded, &live).is_err());
    }
}
