use super::listener::ListenerValidation;
use gateway_binder_core::gateway::Gateway;

/// `Accepted`/`Programmed` verdict for a gateway as a whole.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GatewayValidation {
    pub unsupported_address: bool,
    pub listeners_not_valid: bool,
    /// `True` unless gateway pods are unscheduled or mesh config is not yet
    /// acknowledged; this flag captures only the "pods unscheduled" half —
    /// the mesh-ack half is folded in by the status assembler, which is the
    /// only stage that sees the mesh-reported status.
    pub pods_unscheduled: bool,
}

impl GatewayValidation {
    pub fn accepted(&self) -> bool {
        !self.unsupported_address && !self.listeners_not_valid
    }
}

pub fn validate_gateway(gateway: &Gateway, listener_results: &[ListenerValidation], any_pod_scheduled: bool) -> GatewayValidation {
    GatewayValidation {
        unsupported_address: !gateway.addresses.is_empty(),
        listeners_not_valid: listener_results.iter().any(|l| !l.programmed()),
        pods_unscheduled: !gateway.listeners.is_empty() && !any_pod_scheduled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_binder_core::resource_id::ResourceId;

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
    fn address_specified_is_unsupported() {
        let mut gw = gateway();
        gw.addresses.push("10.0.0.1".to_string());
        let v = validate_gateway(&gw, &[], true);
        assert!(v.unsupported_address);
        assert!(!v.accepted());
    }

    #[test]
    fn invalid_listener_marks_listeners_not_valid() {
        let gw = gateway();
        let bad = ListenerValidation {
            name: "l1".to_string(),
            accepted: Err(super::super::listener::AcceptedError::UnsupportedProtocol),
            ..Default::default()
        };
        let v = validate_gateway(&gw, &[bad], true);
        assert!(v.listeners_not_valid);
        assert!(!v.accepted());
    }
}
