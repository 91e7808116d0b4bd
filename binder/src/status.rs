use gateway_binder_core::{
    condition::Clock,
    routes::{ParentRef, RouteParentStatus, RouteStatus},
    Condition,
};

/// Upserts and removes `(ParentRef, ControllerName)`-scoped conditions on a
/// route's `status.parents`. Holds only the controller name and a clock; it
/// never reads or writes a route by itself — the snapshot assembler hands it
/// a `&mut RouteStatus`.
pub struct StatusSetter<'a> {
    pub controller_name: String,
    pub clock: &'a dyn Clock,
}

impl<'a> StatusSetter<'a> {
    pub fn new(controller_name: impl Into<String>, clock: &'a dyn Clock) -> Self {
        Self {
            controller_name: controller_name.into(),
            clock,
        }
    }

    /// Upserts a condition under `(parent, controllerName)`. Returns `true`
    /// iff the effective condition set changed (ignoring
    /// `lastTransitionTime`), so callers only emit a status write when
    /// something observable actually moved.
    pub fn set_route_condition(
        &self,
        status: &mut RouteStatus,
        parent: &ParentRef,
        conditions: Vec<Condition>,
    ) -> bool {
        if let Some(entry) = status.parents.iter_mut().find(|p| {
            p.controller_name == self.controller_name && p.parent_ref.status_equal(parent)
        }) {
            let changed = !gateway_binder_core::condition::condition_lists_equal_ignoring_time(
                &entry.conditions,
                &conditions,
            );
            entry.conditions = conditions;
            changed
        } else {
            status.parents.push(RouteParentStatus {
                parent_ref: parent.clone(),
                controller_name: self.controller_name.clone(),
                conditions,
            });
            true
        }
    }

    /// Keeps exactly one entry per `(parentRef, controllerName)` this
    /// controller owns. Call once per parent this reconcile found for the
    /// route, after clearing stale entries with
    /// [`Self::remove_route_references`].
    pub fn upsert_parent_status(&self, status: &mut RouteStatus, entry: RouteParentStatus) -> bool {
        if let Some(existing) = status.parents.iter_mut().find(|p| {
            p.controller_name == entry.controller_name && p.parent_ref.status_equal(&entry.parent_ref)
        }) {
            let changed = !gateway_binder_core::condition::condition_lists_equal_ignoring_time(
                &existing.conditions,
                &entry.conditions,
            );
            *existing = entry;
            changed
        } else {
            status.parents.push(entry);
            true
        }
    }

    /// Drops any `(p, controllerName)` entry for the given parents — used
    /// when a gateway unbinds.
    pub fn remove_route_references(&self, status: &mut RouteStatus, parents: &[ParentRef]) {
        status.parents.retain(|p| {
            p.controller_name != self.controller_name
                || !parents.iter().any(|rm| rm.status_equal(&p.parent_ref))
        });
    }

    /// Drops every entry this controller owns whose parent is not present
    /// in `current_parents` — the general-purpose form of unbind cleanup,
    /// used at the top of a reconcile to prune parents the route no longer
    /// references before re-adding fresh verdicts.
    pub fn prune_stale_parents(&self, status: &mut RouteStatus, current_parents: &[ParentRef]) {
        status.parents.retain(|p| {
            p.controller_name != self.controller_name
                || current_parents.iter().any(|cur| cur.status_equal(&p.parent_ref))
        });
    }
}
