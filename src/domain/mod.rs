// Domain layer - Configuration and runtime data shapes
pub mod dashboard;
pub mod data_sources;
mod tagged;
pub mod widget;
