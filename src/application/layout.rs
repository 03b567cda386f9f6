// Layout nodes - the built, strongly-typed counterpart of the layout config tree
use crate::application::widget_model::Widget;
use crate::domain::dashboard::{ContainerNodeConfig, LayoutNode, LayoutNodeType, WidgetNodeConfig};
use once_cell::sync::OnceCell;

/// A stack, row or column together with its built children.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerNode {
    config: ContainerNodeConfig,
    children: Vec<Node>,
}

impl ContainerNode {
    pub fn new(config: ContainerNodeConfig, children: Vec<Node>) -> Self {
        Self { config, children }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn gap(&self) -> f64 {
        self.config.gap
    }

    /// The child configuration as it appeared in the layout document.
    pub fn children_props(&self) -> &[LayoutNode] {
        &self.config.children
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// A leaf pointing at one catalog widget.
///
/// The widget model is attached after the node exists and can only be
/// attached once.
#[derive(Debug, Clone)]
pub struct WidgetNode {
    config: WidgetNodeConfig,
    widget: OnceCell<Widget>,
}

impl WidgetNode {
    pub fn new(config: WidgetNodeConfig) -> Self {
        Self {
            config,
            widget: OnceCell::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn widget_id(&self) -> &str {
        &self.config.widget_id
    }

    /// Attaches the widget model. Hands the widget back if one is already attached.
    pub fn set_widget(&self, widget: Widget) -> Result<(), Widget> {
        self.widget.set(widget)
    }

    pub fn widget(&self) -> Option<&Widget> {
        self.widget.get()
    }
}

impl PartialEq for WidgetNode {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.widget.get() == other.widget.get()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Stack(ContainerNode),
    Row(ContainerNode),
    Column(ContainerNode),
    Widget(WidgetNode),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Stack(c) | Node::Row(c) | Node::Column(c) => c.id(),
            Node::Widget(w) => w.id(),
        }
    }

    pub fn kind(&self) -> LayoutNodeType {
        match self {
            Node::Stack(_) => LayoutNodeType::Stack,
            Node::Row(_) => LayoutNodeType::Row,
            Node::Column(_) => LayoutNodeType::Column,
            Node::Widget(_) => LayoutNodeType::Widget,
        }
    }

    pub fn as_container(&self) -> Option<&ContainerNode> {
        match self {
            Node::Stack(c) | Node::Row(c) | Node::Column(c) => Some(c),
            Node::Widget(_) => None,
        }
    }

    pub fn as_widget_node(&self) -> Option<&WidgetNode> {
        match self {
            Node::Widget(w) => Some(w),
            _ => None,
        }
    }

    /// Built children; empty for widget leaves.
    pub fn children(&self) -> &[Node] {
        self.as_container().map(ContainerNode::children).unwrap_or_default()
    }

    /// Depth-first, pre-order search by node id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id() == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    /// All widget leaves in pre-order.
    pub fn widget_nodes(&self) -> Vec<&WidgetNode> {
        let mut leaves = Vec::new();
        self.collect_widget_nodes(&mut leaves);
        leaves
    }

    fn collect_widget_nodes<'a>(&'a self, leaves: &mut Vec<&'a WidgetNode>) {
        match self {
            Node::Widget(w) => leaves.push(w),
            _ => {
                for child in self.children() {
                    child.collect_widget_nodes(leaves);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::widget_model::StaticBannerModel;
    use crate::domain::widget::{BannerVariant, StaticBannerProps};

    fn leaf(id: &str) -> Node {
        Node::Widget(WidgetNode::new(WidgetNodeConfig {
            id: id.to_string(),
            widget_id: format!("{id}-widget"),
        }))
    }

    fn banner() -> Widget {
        Widget::StaticBanner(StaticBannerModel::new(StaticBannerProps {
            id: "banner".to_string(),
            title: "Banner".to_string(),
            text: "Hi".to_string(),
            variant: BannerVariant::Success,
        }))
    }

    fn tree() -> Node {
        let column = ContainerNodeConfig {
            id: "col".to_string(),
            gap: 4.0,
            children: Vec::new(),
        };
        let root = ContainerNodeConfig {
            id: "root".to_string(),
            gap: 8.0,
            children: Vec::new(),
        };
        Node::Row(ContainerNode::new(
            root,
            vec![
                leaf("a"),
                Node::Column(ContainerNode::new(column, vec![leaf("b"), leaf("c")])),
                leaf("d"),
            ],
        ))
    }

    #[test]
    fn test_widget_nodes_in_pre_order() {
        let root = tree();
        let ids: Vec<&str> = root.widget_nodes().iter().map(|w| w.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_find_by_id() {
        let root = tree();
        assert_eq!(root.find("col").map(Node::kind), Some(LayoutNodeType::Column));
        assert_eq!(root.find("c").map(Node::id), Some("c"));
        assert!(root.find("zzz").is_none());
        assert!(root.find("a").map(|n| n.children().is_empty()).unwrap_or(false));
    }

    #[test]
    fn test_widget_attaches_once() {
        let node = WidgetNode::new(WidgetNodeConfig {
            id: "n".to_string(),
            widget_id: "banner".to_string(),
        });
        assert!(node.widget().is_none());
        assert!(node.set_widget(banner()).is_ok());
        assert!(node.set_widget(banner()).is_err());
        assert_eq!(node.widget().map(Widget::id), Some("banner"));
        assert_eq!(node.widget_id(), "banner");
    }
}
