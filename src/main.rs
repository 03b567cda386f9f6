// Host entry point - loads documents, builds the dashboard, runs one render pass
use dashboard_layout::application::dashboard_builder::DashboardBuilder;
use dashboard_layout::application::render_service::resolve_dashboard;
use dashboard_layout::infrastructure::config::{
    load_dashboard_config, load_host_settings, load_snapshot, load_widget_catalog,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = load_host_settings()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let dashboard_config = load_dashboard_config(&settings.dashboard_path)?;
    let catalog = load_widget_catalog(&settings.widgets_path)?;
    let snapshot = load_snapshot(&settings.snapshot_path)?;

    // Build the node tree
    let dashboard = DashboardBuilder::new(dashboard_config, catalog).build()?;
    tracing::info!(
        "Built dashboard {} v{} ({} widgets)",
        dashboard.dashboard_id(),
        dashboard.version(),
        dashboard.root().widget_nodes().len()
    );

    // Resolve every widget against the snapshot
    let resolved = resolve_dashboard(dashboard.root(), &snapshot);
    println!("{}", serde_json::to_string_pretty(&resolved)?);

    Ok(())
}
