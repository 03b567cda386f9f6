use crate::domain::dashboard::DashboardConfig;
use crate::domain::data_sources::RuntimeDataSources;
use crate::domain::widget::{WidgetCatalog, WidgetConfig};
use anyhow::Context;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HostSettings {
    pub dashboard_path: String,
    pub widgets_path: String,
    pub snapshot_path: String,
    pub log_filter: String,
}

/// Loads host settings: built-in defaults, then `config/host.*` if present,
/// then `DASHBOARD_*` environment variables.
pub fn load_host_settings() -> anyhow::Result<HostSettings> {
    let settings = config::Config::builder()
        .set_default("dashboard_path", "config/dashboard.json")?
        .set_default("widgets_path", "config/widgets.json")?
        .set_default("snapshot_path", "config/snapshot.json")?
        .set_default("log_filter", "info")?
        .add_source(config::File::with_name("config/host").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboard_config(path: impl AsRef<Path>) -> anyhow::Result<DashboardConfig> {
    read_json(path.as_ref())
}

pub fn load_widget_catalog(path: impl AsRef<Path>) -> anyhow::Result<Vec<WidgetConfig>> {
    let catalog: WidgetCatalog = read_json(path.as_ref())?;
    Ok(catalog.widgets)
}

pub fn load_snapshot(path: impl AsRef<Path>) -> anyhow::Result<RuntimeDataSources> {
    read_json(path.as_ref())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}
