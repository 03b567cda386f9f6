// Infrastructure layer - Host settings and document loading
pub mod config;
