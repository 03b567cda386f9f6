// Application layer - Tree construction and value resolution
pub mod binding;
pub mod dashboard_builder;
pub mod error;
pub mod form;
pub mod layout;
pub mod render_service;
pub mod widget_model;
