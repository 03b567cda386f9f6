//! Builds a typed dashboard layout tree from configuration and resolves
//! widget data bindings against runtime data snapshots.
pub mod application;
pub mod domain;
pub mod infrastructure;
