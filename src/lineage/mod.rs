//! Result lineage - domain model and resolution services
//!
//! Walks a check result back through the objects that produced it
//! (scan, suite, binding, profile) to the rule definition it was checked
//! against. Nothing here talks to a cluster directly; every lookup goes
//! through the [`ObjectStore`](crate::ports::outbound::ObjectStore) port.

pub mod domain;
pub mod services;

#[cfg(test)]
pub(crate) mod fixtures;
