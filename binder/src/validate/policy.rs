use crate::config::{AuthFilter, GatewayPolicy, PolicyTarget};
use gateway_binder_core::{gateway::Gateway, resource_id::ResourceId};

/// `ResolvedRefs` error for policies/auth filters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RefResolutionError {
    ListenerReferenceDoesNotExist,
    JwtProvidersReferenceDoesNotExist,
}

impl RefResolutionError {
    pub fn reason(&self) -> &'static str {
        match self {
            RefResolutionError::ListenerReferenceDoesNotExist => "ListenerReferenceDoesNotExist",
            RefResolutionError::JwtProvidersReferenceDoesNotExist => {
                "JWTProvidersReferenceDoesNotExist"
            }
        }
    }
}

pub fn validate_gateway_policy(
    policy: &GatewayPolicy,
    gateway: &Gateway,
    known_jwt_providers: &ahash::AHashSet<ResourceId>,
) -> Vec<RefResolutionError> {
    let mut errors = Vec::new();
    if let PolicyTarget::Gateway { listener, .. } = &policy.target {
        if let Some(listener_name) = listener {
            if !gateway.listeners.iter().any(|l| &l.name == listener_name) {
                errors.push(RefResolutionError::ListenerReferenceDoesNotExist);
            }
        }
    }
    if policy
        .jwt_providers
        .iter()
        .any(|p| !known_jwt_providers.contains(p))
    {
        errors.push(RefResolutionError::JwtProvidersReferenceDoesNotExist);
    }
    errors
}

pub fn validate_auth_filter(
    filter: &AuthFilter,
    known_jwt_providers: &ahash::AHashSet<ResourceId>,
) -> Vec<RefResolutionError> {
    if filter
        .jwt_providers
        .iter()
        .any(|p| !known_jwt_providers.contains(p))
    {
        vec![RefResolutionError::JwtProvidersReferenceDoesNotExist]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> Gateway {
        Gateway {
            id: ResourceId::new("ns", "gw"),
            generation: 1,
            deletion_timestamp: None,
            finalizers: vec![],
            gateway_class_name: "gw-class".to_string(),
            listeners: vec![],
            addresses: vec![],
            status: Default::default(),
        }
    }

    #[test]
    fn missing_jwt_provider_is_ref_error() {
        let policy = GatewayPolicy {
            id: ResourceId::new("ns", "policy"),
            target: PolicyTarget::Gateway {
                gateway: ResourceId::new("ns", "gw"),
                listener: None,
            },
            jwt_providers: vec![ResourceId::new("ns", "missing")],
        };
        let known = ahash::AHashSet::default();
        assert_eq!(
            validate_gateway_policy(&policy, &gateway(), &known),
            vec![RefResolutionError::JwtProvidersReferenceDoesNotExist]
        );
    }
}
