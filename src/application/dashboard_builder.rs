// Dashboard builder - turns a layout config plus a widget catalog into a node tree
use crate::application::error::{BuildError, ConfigError, LookupError};
use crate::application::layout::{ContainerNode, Node, WidgetNode};
use crate::application::widget_model::{Widget, WidgetModel};
use crate::domain::dashboard::{ContainerNodeConfig, DashboardConfig, LayoutNode, WidgetNodeConfig};
use crate::domain::widget::WidgetConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// A built dashboard: its config snapshot and the node tree made from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    config: Arc<DashboardConfig>,
    root: Node,
}

impl Dashboard {
    pub fn dashboard_id(&self) -> &str {
        &self.config.dashboard_id
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn version(&self) -> u64 {
        self.config.version
    }

    pub fn layout(&self) -> &LayoutNode {
        &self.config.layout
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Whether a config at `version` should replace this dashboard.
    pub fn is_outdated_by(&self, version: u64) -> bool {
        version > self.config.version
    }
}

pub struct DashboardBuilder {
    config: Arc<DashboardConfig>,
    catalog: HashMap<String, WidgetConfig>,
}

impl DashboardBuilder {
    pub fn new(config: DashboardConfig, widget_catalog: Vec<WidgetConfig>) -> Self {
        let mut catalog = HashMap::with_capacity(widget_catalog.len());
        for widget in widget_catalog {
            let id = widget.id().to_string();
            if catalog.insert(id.clone(), widget).is_some() {
                tracing::warn!("Duplicate widget id {} in catalog, keeping the last entry", id);
            }
        }

        tracing::debug!(
            "Indexed {} catalog widgets for dashboard {}",
            catalog.len(),
            config.dashboard_id
        );

        Self {
            config: Arc::new(config),
            catalog,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Builds the node tree for the configured root layout.
    pub fn build_layout_tree(&self) -> Result<Node, BuildError> {
        self.build_node(&self.config.layout).inspect_err(|e| {
            tracing::warn!("Failed to build dashboard {}: {}", self.config.dashboard_id, e);
        })
    }

    /// Builds the tree and pairs it with the config it came from.
    pub fn build(&self) -> Result<Dashboard, BuildError> {
        let root = self.build_layout_tree()?;
        Ok(Dashboard {
            config: Arc::clone(&self.config),
            root,
        })
    }

    fn build_node(&self, node: &LayoutNode) -> Result<Node, BuildError> {
        let built = match node {
            LayoutNode::Stack(config) => Node::Stack(self.build_container(config)?),
            LayoutNode::Row(config) => Node::Row(self.build_container(config)?),
            LayoutNode::Column(config) => Node::Column(self.build_container(config)?),
            LayoutNode::Widget(config) => Node::Widget(self.build_widget_node(config)?),
            LayoutNode::Unrecognized { id, kind } => {
                return Err(ConfigError::UnknownNodeType {
                    node_id: id.clone(),
                    kind: kind.clone(),
                }
                .into());
            }
        };

        tracing::debug!("Built {} node {}", built.kind(), built.id());
        Ok(built)
    }

    fn build_container(&self, config: &ContainerNodeConfig) -> Result<ContainerNode, BuildError> {
        // children first, so a failure deeper down never leaves a half-built parent
        let children = config
            .children
            .iter()
            .map(|child| self.build_node(child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ContainerNode::new(config.clone(), children))
    }

    fn build_widget_node(&self, config: &WidgetNodeConfig) -> Result<WidgetNode, BuildError> {
        let widget_config = self.catalog.get(&config.widget_id).ok_or_else(|| LookupError {
            node_id: config.id.clone(),
            widget_id: config.widget_id.clone(),
        })?;
        let widget = build_widget(widget_config)?;

        let node = WidgetNode::new(config.clone());
        // the node was created just above, so its slot is still empty
        let attached = node.set_widget(widget).is_ok();
        debug_assert!(attached, "widget node {} already had a widget", config.id);
        Ok(node)
    }
}

fn build_widget(config: &WidgetConfig) -> Result<Widget, ConfigError> {
    let widget = match config {
        WidgetConfig::MetricCard(props) => Widget::MetricCard(WidgetModel::new(props.clone())),
        WidgetConfig::DisplayLabel(props) => Widget::DisplayLabel(WidgetModel::new(props.clone())),
        WidgetConfig::AlertList(props) => Widget::AlertList(WidgetModel::new(props.clone())),
        WidgetConfig::SignalChart(props) => Widget::SignalChart(WidgetModel::new(props.clone())),
        WidgetConfig::StaticBanner(props) => Widget::StaticBanner(WidgetModel::new(props.clone())),
        WidgetConfig::FormCard(props) => Widget::FormCard(WidgetModel::new(props.clone())),
        WidgetConfig::Unrecognized { id, kind, .. } => {
            return Err(ConfigError::UnknownWidgetType {
                widget_id: id.clone(),
                kind: kind.clone(),
            });
        }
    };
    Ok(widget)
}
