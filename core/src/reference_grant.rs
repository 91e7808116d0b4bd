pub use crate::resource_id::GroupKind;

pub const GATEWAY_GROUP: &str = "gateway.networking.k8s.io";
pub const CORE_GROUP: &str = "";
pub const DEFAULT_BACKEND_KIND: &str = "Service";
pub const DEFAULT_TLS_KIND: &str = "Secret";

/// One `from` entry of a `ReferenceGrant`: a `(group, kind, namespace)`
/// triple allowed to hold references.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GrantFrom {
    pub group: String,
    pub kind: String,
    pub namespace: String,
}

/// One `to` entry of a `ReferenceGrant`: a `(group, kind)` pair, optionally
/// narrowed to a single object name.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GrantTo {
    pub group: String,
    pub kind: String,
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReferenceGrant {
    pub namespace: String,
    pub from: Vec<GrantFrom>,
    pub to: Vec<GrantTo>,
}

/// Indexes `ReferenceGrant`s by their `to` namespace and answers whether a
/// cross-namespace reference is permitted.
#[derive(Clone, Debug, Default)]
pub struct ReferenceValidator {
    grants: Vec<ReferenceGrant>,
}

impl ReferenceValidator {
    pub fn new(grants: Vec<ReferenceGrant>) -> Self {
        Self { grants }
    }

    /// Answers whether `fromGK` in `fromNS` may reference `toGK` named
    /// `toName` in `toNS`.
    ///
    /// Same-namespace references are trivially allowed; `toNS` empty is
    /// treated as "same namespace as `fromNS`".
    pub fn is_allowed(
        &self,
        from_gk: &GroupKind,
        from_ns: &str,
        to_gk: &GroupKind,
        to_ns: &str,
        to_name: &str,
    ) -> bool {
        let to_ns = if to_ns.is_empty() { from_ns } else { to_ns };
        if to_ns == from_ns {
            return true;
        }

        self.grants
            .iter()
            .filter(|g| g.namespace == to_ns)
            .any(|grant| {
                let from_ok = grant.from.iter().any(|f| {
                    f.group == from_gk.group && f.kind == from_gk.kind && f.namespace == from_ns
                });
                let to_ok = grant.to.iter().any(|t| {
                    t.group == to_gk.group
                        && t.kind == to_gk.kind
                        && t.name.as_deref().map_or(true, |n| n == to_name)
                });
                from_ok && to_ok
            })
    }
}
