use gateway_binder_core::{
    gateway::{Gateway, Listener, Protocol, RouteKind, TlsMode},
    resource_id::ResourceId,
};

/// `Accepted` error reasons for a listener.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AcceptedError {
    UnsupportedProtocol,
    PortUnavailable,
    NoTlsPassthrough,
    TlsCipherSuiteNotConfigurable,
    UnsupportedTlsCipherSuite,
    UnsupportedTlsMaxVersion,
    UnsupportedTlsMinVersion,
}

impl AcceptedError {
    pub fn reason(&self) -> &'static str {
        match self {
            AcceptedError::UnsupportedProtocol => "UnsupportedProtocol",
            AcceptedError::PortUnavailable => "PortUnavailable",
            AcceptedError::NoTlsPassthrough => "NoTLSPassthrough",
            AcceptedError::TlsCipherSuiteNotConfigurable => "TLSCipherSuiteNotConfigurable",
            AcceptedError::UnsupportedTlsCipherSuite => "UnsupportedTLSCipherSuite",
            AcceptedError::UnsupportedTlsMaxVersion => "UnsupportedTLSMaxVersion",
            AcceptedError::UnsupportedTlsMinVersion => "UnsupportedTLSMinVersion",
        }
    }
}

/// `Conflicted` error reasons: two listeners on the same port disagreeing
/// on protocol, or agreeing on protocol but sharing a hostname.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConflictedError {
    ProtocolConflict,
    HostnameConflict,
}

impl ConflictedError {
    pub fn reason(&self) -> &'static str {
        match self {
            ConflictedError::ProtocolConflict => "ProtocolConflict",
            ConflictedError::HostnameConflict => "HostnameConflict",
        }
    }
}

/// One `ResolvedRefs`-affecting error per certificate ref.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RefError {
    NotFound,
    NotSupported,
    InvalidData,
    NonFipsRsaKeyLen,
    FipsRsaKeyLen,
    RefNotPermitted,
    JwtProviderNotFound,
}

impl RefError {
    pub fn reason(&self) -> &'static str {
        match self {
            RefError::NotFound => "NotFound",
            RefError::NotSupported => "NotSupported",
            RefError::InvalidData => "InvalidData",
            RefError::NonFipsRsaKeyLen => "NonFIPSRSAKeyLen",
            RefError::FipsRsaKeyLen => "FIPSRSAKeyLen",
            RefError::RefNotPermitted => "RefNotPermitted",
            RefError::JwtProviderNotFound => "JWTProviderNotFound",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListenerValidation {
    pub name: String,
    pub accepted: Result<(), AcceptedError>,
    pub conflicted: Option<ConflictedError>,
    pub ref_errors: Vec<(ResourceId, RefError)>,
    pub route_kind_error: bool,
}

impl Default for ListenerValidation {
    fn default() -> Self {
        Self {
            name: String::default(),
            accepted: Ok(()),
            conflicted: None,
            ref_errors: Vec::new(),
            route_kind_error: false,
        }
    }
}

impl ListenerValidation {
    /// Programmed is `True` unless any of `Accepted`/`Conflicted`/ref/
    /// route-kind errors is set.
    pub fn programmed(&self) -> bool {
        self.accepted.is_ok() && self.conflicted.is_none() && self.ref_errors.is_empty() && !self.route_kind_error
    }

    pub fn accepted_ok(&self) -> bool {
        self.accepted.is_ok() && self.conflicted.is_none()
    }

    pub fn resolved_refs_ok(&self) -> bool {
        self.ref_errors.is_empty()
    }
}

fn min_cipher_tls13_only(listener: &Listener) -> bool {
    listener
        .tls
        .as_ref()
        .map(|tls| !tls.cipher_suites.is_empty() && tls.min_version.as_deref() == Some("TLSv1_3"))
        .unwrap_or(false)
}

fn validate_route_kinds(listener: &Listener) -> bool {
    let supported = match listener.protocol {
        Protocol::Http | Protocol::Https => vec![RouteKind::Http],
        Protocol::Tcp => vec![RouteKind::Tcp],
    };
    listener
        .allowed_routes
        .kinds
        .iter()
        .all(|k| supported.contains(k))
}

/// Validates one listener in isolation (protocol/TLS/ref checks); port and
/// hostname conflicts require sibling context and are computed by
/// [`validate_listeners`] across the whole gateway.
fn validate_listener_accepted(
    gateway_ns: &str,
    listener: &Listener,
    certificates: &ahash::AHashMap<ResourceId, crate::config::CertificateSecret>,
    jwt_providers: &ahash::AHashMap<ResourceId, crate::config::JwtProvider>,
    can_reference_secret: impl Fn(&ResourceId) -> bool,
) -> ListenerValidation {
    let mut v = ListenerValidation {
        name: listener.name.clone(),
        ..Default::default()
    };

    match listener.protocol {
        Protocol::Http => {}
        Protocol::Https => {
            if listener.tls.is_none() {
                v.accepted = Err(AcceptedError::UnsupportedProtocol);
            }
        }
        Protocol::Tcp => {}
    }

    if let Some(tls) = &listener.tls {
        if tls.mode == TlsMode::Passthrough && listener.protocol != Protocol::Tcp {
            v.accepted = Err(AcceptedError::NoTlsPassthrough);
        }
        if !tls.cipher_suites.is_empty() && tls.max_version.as_deref() == Some("TLSv1_3") {
            v.accepted = Err(AcceptedError::TlsCipherSuiteNotConfigurable);
        } else if min_cipher_tls13_only(listener) {
            v.accepted = Err(AcceptedError::TlsCipherSuiteNotConfigurable);
        }
        if let Some(min) = &tls.min_version {
            if !matches!(min.as_str(), "TLSv1_2" | "TLSv1_3") {
                v.accepted = Err(AcceptedError::UnsupportedTlsMinVersion);
            }
        }
        if let Some(max) = &tls.max_version {
            if !matches!(max.as_str(), "TLSv1_2" | "TLSv1_3") {
                v.accepted = Err(AcceptedError::UnsupportedTlsMaxVersion);
            }
        }

        for cert_ref in &tls.certificate_refs {
            let resolved = if cert_ref.namespace.is_empty() || cert_ref.namespace == gateway_ns {
                certificates.get(&ResourceId::new(gateway_ns, cert_ref.name.clone()))
            } else {
                certificates.get(cert_ref)
            };
            let secret = match resolved {
                Some(secret) => secret,
                None => {
                    v.ref_errors.push((cert_ref.clone(), RefError::NotFound));
                    continue;
                }
            };
            if cert_ref.namespace != gateway_ns
                && !cert_ref.namespace.is_empty()
                && !can_reference_secret(cert_ref)
            {
                v.ref_errors.push((cert_ref.clone(), RefError::RefNotPermitted));
                continue;
            }
            if crate::resource_map::validate_pem(secret).is_err() {
                v.ref_errors.push((cert_ref.clone(), RefError::InvalidData));
            }
        }
    }

    if !validate_route_kinds(listener) {
        v.route_kind_error = true;
    }

    let _ = jwt_providers;
    v
}

/// Validates every listener on a gateway, including the cross-listener
/// port/protocol/hostname conflict checks.
pub fn validate_listeners(
    gateway: &Gateway,
    certificates: &ahash::AHashMap<ResourceId, crate::config::CertificateSecret>,
    jwt_providers: &ahash::AHashMap<ResourceId, crate::config::JwtProvider>,
    can_reference_secret: impl Fn(&Gateway, &ResourceId) -> bool,
) -> Vec<ListenerValidation> {
    let mut results: Vec<ListenerValidation> = gateway
        .listeners
        .iter()
        .map(|l| {
            validate_listener_accepted(&gateway.id.namespace, l, certificates, jwt_providers, |r| {
                can_reference_secret(gateway, r)
            })
        })
        .collect();

    for i in 0..gateway.listeners.len() {
        for j in 0..gateway.listeners.len() {
            if i == j {
                continue;
            }
            let a = &gateway.listeners[i];
            let b = &gateway.listeners[j];
            if a.port != b.port {
                continue;
            }
            if a.protocol != b.protocol {
                results[i].conflicted = Some(ConflictedError::ProtocolConflict);
                continue;
            }
            let same_hostname = match (&a.hostname, &b.hostname) {
                (Some(x), Some(y)) => x.eq_ignore_ascii_case(y),
                (None, None) => true,
                _ => false,
            };
            if same_hostname && results[i].conflicted.is_none() {
                results[i].conflicted = Some(ConflictedError::HostnameConflict);
            }
        }
    }

    // Port mapping collisions: a privileged-port offset rewrite of listener
    // `p` lands on another listener's already-taken port.
    detect_mapped_port_collisions(gateway, &mut results);

    results
}

fn detect_mapped_port_collisions(gateway: &Gateway, results: &mut [ListenerValidation]) {
    let ports: Vec<u16> = gateway.listeners.iter().map(|l| l.port).collect();
    for (i, listener) in gateway.listeners.iter().enumerate() {
        if listener.port >= 1024 {
            continue;
        }
        // A privileged-port offset of 1024 is the common convention; if the
        // mapped port collides with an existing listener's port, the
        // rewritten listener cannot bind.
        let mapped = listener.port + 1024;
        if ports.iter().any(|&p| p == mapped) && results[i].accepted.is_ok() {
            results[i].accepted = Err(AcceptedError::PortUnavailable);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_binder_core::gateway::{AllowedRoutes, Gateway as Gw, TlsConfig};

    fn http_listener(name: &str, port: u16, hostname: Option<&str>) -> Listener {
        Listener {
            name: name.to_string(),
            protocol: Protocol::Http,
            port,
            hostname: hostname.map(str::to_string),
            tls: None,
            allowed_routes: AllowedRoutes::default(),
        }
    }

    fn https_listener(name: &str, port: u16, hostname: Option<&str>) -> Listener {
        Listener {
            tls: Some(TlsConfig {
                mode: gateway_binder_core::gateway::TlsMode::Terminate,
                certificate_refs: vec![],
                min_version: None,
                max_version: None,
                cipher_suites: vec![],
            }),
            protocol: Protocol::Https,
            ..http_listener(name, port, hostname)
        }
    }

    fn gateway_with(listeners: Vec<Listener>) -> Gw {
        Gw {
            id: ResourceId::new("ns", "gw"),
            generation: 1,
            deletion_timestamp: None,
            finalizers: vec![],
            gateway_class_name: "gw-class".to_string(),
            listeners,
            addresses: vec![],
            status: Default::default(),
        }
    }

    #[test]
    fn hostname_conflict_on_same_port() {
        let gw = gateway_with(vec![
            https_listener("l1", 443, Some("a.example")),
            https_listener("l2", 443, Some("a.example")),
        ]);
        let certs = Default::default();
        let jwt = Default::default();
        let results = validate_listeners(&gw, &certs, &jwt, |_, _| true);
        assert_eq!(results[0].conflicted, Some(ConflictedError::HostnameConflict));
        assert_eq!(results[1].conflicted, Some(ConflictedError::HostnameConflict));
    }

    #[test]
    fn protocol_conflict_on_same_port() {
        let gw = gateway_with(vec![http_listener("l1", 80, None), https_listener("l2", 80, None)]);
        let certs = Default::default();
        let jwt = Default::default();
        let results = validate_listeners(&gw, &certs, &jwt, |_, _| true);
        assert_eq!(results[0].conflicted, Some(ConflictedError::ProtocolConflict));
    }

    #[test]
    fn no_conflict_different_ports() {
        let gw = gateway_with(vec![http_listener("l1", 80, None), http_listener("l2", 8080, None)]);
        let certs = Default::default();
        let jwt = Default::default();
        let results = validate_listeners(&gw, &certs, &jwt, |_, _| true);
        assert!(results.iter().all(|r| r.conflicted.is_none()));
    }

    #[test]
    fn tls_cert_with_malformed_pem_is_invalid_data() {
        let mut l = https_listener("l1", 443, None);
        l.tls.as_mut().unwrap().certificate_refs = vec![ResourceId::new("ns", "cert")];
        let gw = gateway_with(vec![l]);
        let mut certs = ahash::AHashMap::default();
        certs.insert(
            ResourceId::new("ns", "cert"),
            crate::config::CertificateSecret {
                id: ResourceId::new("ns", "cert"),
                cert_pem: "not pem".to_string(),
                key_pem: "not pem either".to_string(),
            },
        );
        let jwt = Default::default();
        let results = validate_listeners(&gw, &certs, &jwt, |_, _| true);
        assert_eq!(
            results[0].ref_errors,
            vec![(ResourceId::new("ns", "cert"), RefError::InvalidData)]
        );
    }

    #[test]
    fn tls_cert_cross_namespace_without_grant_is_ref_not_permitted() {
        let mut l = https_listener("l1", 443, None);
        l.tls.as_mut().unwrap().certificate_refs = vec![ResourceId::new("other-ns", "cert")];
        let gw = gateway_with(vec![l]);
        let mut certs = ahash::AHashMap::default();
        certs.insert(
            ResourceId::new("other-ns", "cert"),
            crate::config::CertificateSecret {
                id: ResourceId::new("other-ns", "cert"),
                cert_pem: String::new(),
                key_pem: String::new(),
            },
        );
        let jwt = Default::default();
        let results = validate_listeners(&gw, &certs, &jwt, |_, _| false);
        assert_eq!(
            results[0].ref_errors,
            vec![(ResourceId::new("other-ns", "cert"), RefError::RefNotPermitted)]
        );
    }
}
