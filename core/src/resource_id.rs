use std::fmt;

/// Identifies a namespaced object by `(namespace, name)`.
///
/// Used as the key for every index the binder builds over a reconcile's
/// input snapshot (routes, gateways, secrets, grants, ...).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct ResourceId {
    pub namespace: String,
    pub name: String,
}

impl ResourceId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// A `(group, kind)` pair, used wherever a reference must be matched
/// independently of the object it points at.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GroupKind {
    pub group: String,
    pub kind: String,
}

impl GroupKind {
    pub fn new(group: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
        }
    }
}
