use std::collections::BTreeMap;

/// Default namespace/partition used by the mesh config writer; referenced
/// here only so [`ResourceReference::normalized`] can replace the empty
/// string with the value equality comparisons must treat it as.
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_PARTITION: &str = "default";

#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct ResourceReference {
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub partition: String,
}

impl ResourceReference {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            namespace: String::new(),
            partition: String::new(),
        }
        .normalized()
    }

    /// Replaces empty namespace/partition with the writer's defaults. Must
    /// be applied at every equality boundary (map keys, set membership,
    /// slice `contains`) or spurious updates slip through.
    pub fn normalized(mut self) -> Self {
        if self.namespace.is_empty() {
            self.namespace = DEFAULT_NAMESPACE.to_string();
        }
        if self.partition.is_empty() {
            self.partition = DEFAULT_PARTITION.to_string();
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshMeta {
    pub fields: BTreeMap<String, String>,
}

impl MeshMeta {
    pub fn for_k8s_object(namespace: &str, name: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("k8s-name".to_string(), name.to_string());
        fields.insert("k8s-namespace".to_string(), namespace.to_string());
        Self { fields }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshRouteParentStatus {
    pub reference: ResourceReference,
    pub conditions: Vec<crate::condition::Condition>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshApiGateway {
    pub reference: ResourceReference,
    pub meta: MeshMeta,
    pub listeners: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshRoute {
    pub reference: ResourceReference,
    pub meta: MeshMeta,
    pub parents: Vec<ResourceReference>,
    pub statuses: Vec<MeshRouteParentStatus>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CertificateEntry {
    Inline {
        reference: ResourceReference,
        meta: MeshMeta,
        cert_pem: String,
        key_pem: String,
    },
    FileSystem {
        reference: ResourceReference,
        meta: MeshMeta,
        cert_path: String,
        key_path: String,
    },
}

impl CertificateEntry {
    pub fn reference(&self) -> &ResourceReference {
        match self {
            CertificateEntry::Inline { reference, .. } => reference,
            CertificateEntry::FileSystem { reference, .. } => reference,
        }
    }
}

/// Polymorphic mesh config entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MeshConfigEntry {
    ApiGateway(MeshApiGateway),
    HttpRoute(MeshRoute),
    TcpRoute(MeshRoute),
    Certificate(CertificateEntry),
}

impl MeshConfigEntry {
    pub fn reference(&self) -> &ResourceReference {
        match self {
            MeshConfigEntry::ApiGateway(g) => &g.reference,
            MeshConfigEntry::HttpRoute(r) => &r.reference,
            MeshConfigEntry::TcpRoute(r) => &r.reference,
            MeshConfigEntry::Certificate(c) => c.reference(),
        }
    }

    /// Field-by-field, namespace/partition-normalized equality, used by the
    /// resource map to decide whether a translation actually changed.
    pub fn config_equal(&self, other: &Self) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_empty_namespace_and_partition() {
        let r = ResourceReference::new("api-gateway", "gw");
        assert_eq!(r.namespace, DEFAULT_NAMESPACE);
        assert_eq!(r.partition, DEFAULT_PARTITION);
    }

    #[test]
    fn normalized_refs_compare_equal_regardless_of_source_blankness() {
        let explicit = ResourceReference {
            kind: "api-gateway".to_string(),
            name: "gw".to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            partition: DEFAULT_PARTITION.to_string(),
        };
        let implicit = ResourceReference::new("api-gateway", "gw");
        assert_eq!(explicit, implicit);
    }
}
