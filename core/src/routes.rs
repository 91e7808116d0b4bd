use crate::condition::Condition;
use crate::resource_id::ResourceId;

/// A route's claim on a specific gateway, optionally narrowed to one of its
/// listener sections.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParentRef {
    pub group: Option<String>,
    pub kind: Option<String>,
    pub namespace: Option<String>,
    pub name: String,
    pub section_name: Option<String>,
    pub port: Option<u16>,
}

impl ParentRef {
    /// Parent-ref equality: `(group, kind, sectionName,
    /// port)` pairwise "both nil or equal" plus `name` equal. Namespace is
    /// deliberately excluded — it is resolved against the route's own
    /// namespace before comparison ever happens.
    pub fn status_equal(&self, other: &Self) -> bool {
        self.name == other.name
            && self.group == other.group
            && self.kind == other.kind
            && self.section_name == other.section_name
            && self.port == other.port
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BackendKind {
    Service,
    MeshService,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackendRef {
    pub group: Option<String>,
    pub kind: Option<String>,
    pub namespace: Option<String>,
    pub name: String,
    pub port: Option<u16>,
    pub weight: Option<i32>,
}

/// One entry of a route's `status.parents`: the per-(parent, controller)
/// condition set the status setter owns.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RouteParentStatus {
    pub parent_ref: ParentRef,
    pub controller_name: String,
    pub conditions: Vec<Condition>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RouteStatus {
    pub parents: Vec<RouteParentStatus>,
}

/// The generation, parent refs, hostnames, backends and status shared by
/// every route kind, modeled as plain fields rather than a trait object so
/// the binder can match on `kind` with an exhaustive `match`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RouteCommon {
    pub id: ResourceId,
    pub generation: i64,
    pub parent_refs: Vec<ParentRef>,
    pub backend_refs: Vec<BackendRef>,
    pub status: RouteStatus,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HttpRoute {
    pub common: RouteCommon,
    pub hostnames: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TcpRoute {
    pub common: RouteCommon,
}

/// Polymorphic route, dispatching on an explicit tag rather than a generic
/// `routeBinder[T,U]` parameterization.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Route {
    Http(HttpRoute),
    Tcp(TcpRoute),
}

impl Route {
    pub fn kind(&self) -> crate::gateway::RouteKind {
        match self {
            Route::Http(_) => crate::gateway::RouteKind::Http,
            Route::Tcp(_) => crate::gateway::RouteKind::Tcp,
        }
    }

    pub fn common(&self) -> &RouteCommon {
        match self {
            Route::Http(r) => &r.common,
            Route::Tcp(r) => &r.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut RouteCommon {
        match self {
            Route::Http(r) => &mut r.common,
            Route::Tcp(r) => &mut r.common,
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.common().id
    }

    pub fn parent_refs(&self) -> &[ParentRef] {
        &self.common().parent_refs
    }

    pub fn backend_refs(&self) -> &[BackendRef] {
        &self.common().backend_refs
    }

    /// Empty for `TCPRoute`, which carries no hostnames.
    pub fn hostnames(&self) -> &[String] {
        match self {
            Route::Http(r) => &r.hostnames,
            Route::Tcp(_) => &[],
        }
    }
}
