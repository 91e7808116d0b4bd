#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Pure reconciliation engine for Gateway-API resources bound against a
//! Consul-like service-mesh control plane. [`Binder::reconcile`] takes a
//! [`BinderConfig`] snapshot of everything the platform currently knows and
//! returns a [`Snapshot`] of the platform and mesh writes to apply; nothing
//! in this crate performs I/O, retries, or scheduling.

pub mod bind;
pub mod binder;
pub mod config;
pub mod metrics;
pub mod resource_map;
pub mod snapshot;
pub mod status;
pub mod translate;
pub mod validate;

#[cfg(test)]
mod tests;

pub use binder::Binder;
pub use config::BinderConfig;
pub use metrics::BinderMetrics;
pub use resource_map::ResourceMap;
pub use snapshot::Snapshot;
pub use status::StatusSetter;
