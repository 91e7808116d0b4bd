use gateway_binder_core::{
    reference_grant::{GroupKind, ReferenceValidator, CORE_GROUP, DEFAULT_BACKEND_KIND, GATEWAY_GROUP},
    routes::BackendRef,
};

/// Per-backend `ResolvedRefs` error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BackendError {
    InvalidKind,
    BackendNotFound,
    RefNotPermitted,
}

impl BackendError {
    pub fn reason(&self) -> &'static str {
        match self {
            BackendError::InvalidKind => "InvalidKind",
            BackendError::BackendNotFound => "BackendNotFound",
            BackendError::RefNotPermitted => "RefNotPermitted",
        }
    }
}

const MESH_GROUP: &str = "mesh.consul.hashicorp.com";

fn backend_group_kind(backend: &BackendRef) -> GroupKind {
    GroupKind::new(
        backend.group.clone().unwrap_or_default(),
        backend.kind.clone().unwrap_or_else(|| DEFAULT_BACKEND_KIND.to_string()),
    )
}

fn is_supported_backend_kind(gk: &GroupKind) -> bool {
    (gk.group == CORE_GROUP && gk.kind == "Service") || (gk.group == MESH_GROUP && gk.kind == "MeshService")
}

/// Validates one backend ref against the supported-kind set, known backend
/// objects, and reference grants.
pub fn validate_backend(
    route_namespace: &str,
    backend: &BackendRef,
    known_backends: &ahash::AHashSet<gateway_binder_core::resource_id::ResourceId>,
    reference_validator: &ReferenceValidator,
) -> Result<(), BackendError> {
    let gk = backend_group_kind(backend);
    if !is_supported_backend_kind(&gk) {
        return Err(BackendError::InvalidKind);
    }

    let backend_ns = backend.namespace.clone().unwrap_or_else(|| route_namespace.to_string());
    let id = gateway_binder_core::resource_id::ResourceId::new(backend_ns.clone(), backend.name.clone());
    if !known_backends.contains(&id) {
        return Err(BackendError::BackendNotFound);
    }

    if backend_ns != route_namespace
        && !reference_validator.is_allowed(
            &GroupKind::new(GATEWAY_GROUP, "HTTPRoute"),
            route_namespace,
            &gk,
            &backend_ns,
            &backend.name,
        )
    {
        return Err(BackendError::RefNotPermitted);
    }

    Ok(())
}
