// Dashboard configuration and layout tree
use super::tagged::{string_field, type_tag};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    pub dashboard_id: String,
    pub title: String,
    pub version: u64,
    pub layout: LayoutNode,
}

/// Discriminant of a layout node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutNodeType {
    Stack,
    Row,
    Column,
    Widget,
}

impl LayoutNodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutNodeType::Stack => "stack",
            LayoutNodeType::Row => "row",
            LayoutNodeType::Column => "column",
            LayoutNodeType::Widget => "widget",
        }
    }
}

impl fmt::Display for LayoutNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    Stack(ContainerNodeConfig),
    Row(ContainerNodeConfig),
    Column(ContainerNodeConfig),
    Widget(WidgetNodeConfig),
    /// A node whose `type` is not one of the known kinds. Rejected at build time.
    Unrecognized { id: String, kind: String },
}

/// Shared shape of stack, row and column nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContainerNodeConfig {
    pub id: String,
    pub gap: f64,
    #[serde(default)]
    pub children: Vec<LayoutNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetNodeConfig {
    pub id: String,
    pub widget_id: String,
}

impl LayoutNode {
    pub fn id(&self) -> &str {
        match self {
            LayoutNode::Stack(c) | LayoutNode::Row(c) | LayoutNode::Column(c) => &c.id,
            LayoutNode::Widget(w) => &w.id,
            LayoutNode::Unrecognized { id, .. } => id,
        }
    }

    /// `None` for unrecognized nodes.
    pub fn kind(&self) -> Option<LayoutNodeType> {
        match self {
            LayoutNode::Stack(_) => Some(LayoutNodeType::Stack),
            LayoutNode::Row(_) => Some(LayoutNodeType::Row),
            LayoutNode::Column(_) => Some(LayoutNodeType::Column),
            LayoutNode::Widget(_) => Some(LayoutNodeType::Widget),
            LayoutNode::Unrecognized { .. } => None,
        }
    }

    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let kind = type_tag(&value)?;
        match kind.as_str() {
            "stack" => serde_json::from_value(value).map(LayoutNode::Stack),
            "row" => serde_json::from_value(value).map(LayoutNode::Row),
            "column" => serde_json::from_value(value).map(LayoutNode::Column),
            "widget" => serde_json::from_value(value).map(LayoutNode::Widget),
            _ => Ok(LayoutNode::Unrecognized {
                id: string_field(&value, "id"),
                kind,
            }),
        }
    }
}

impl<'de> Deserialize<'de> for LayoutNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        LayoutNode::from_value(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_nested_layout() {
        let config: DashboardConfig = serde_json::from_value(json!({
            "dashboardId": "ops",
            "title": "Operations",
            "version": 3,
            "layout": {
                "id": "root",
                "type": "stack",
                "gap": 12,
                "children": [
                    {
                        "id": "top",
                        "type": "row",
                        "gap": 8,
                        "children": [
                            { "id": "w1", "type": "widget", "widgetId": "hr" }
                        ]
                    },
                    { "id": "w2", "type": "widget", "widgetId": "banner" }
                ]
            }
        }))
        .unwrap();

        assert_eq!(config.dashboard_id, "ops");
        assert_eq!(config.version, 3);
        let LayoutNode::Stack(root) = &config.layout else {
            panic!("expected stack root, got {:?}", config.layout);
        };
        assert_eq!(root.gap, 12.0);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].kind(), Some(LayoutNodeType::Row));
        assert_eq!(root.children[1].id(), "w2");
    }

    #[test]
    fn test_unknown_node_type_is_kept_for_the_builder() {
        let node: LayoutNode =
            serde_json::from_value(json!({ "id": "x", "type": "grid", "gap": 4 })).unwrap();
        assert_eq!(
            node,
            LayoutNode::Unrecognized {
                id: "x".to_string(),
                kind: "grid".to_string()
            }
        );
        assert_eq!(node.kind(), None);
    }

    fn nested_columns(depth: usize) -> String {
        let mut node = r#"{ "id": "leaf", "type": "widget", "widgetId": "hr" }"#.to_string();
        for level in 0..depth {
            node = format!(r#"{{ "id": "c{level}", "type": "column", "gap": 0, "children": [{node}] }}"#);
        }
        node
    }

    #[test]
    fn test_deep_layout_parses() {
        let node: LayoutNode = serde_json::from_str(&nested_columns(40)).unwrap();
        let mut depth = 0;
        let mut current = &node;
        while let LayoutNode::Column(c) = current {
            depth += 1;
            current = &c.children[0];
        }
        assert_eq!(depth, 40);
        assert_eq!(current.id(), "leaf");
    }

    #[test]
    fn test_layout_past_nesting_limit_is_an_error() {
        let result: Result<LayoutNode, _> = serde_json::from_str(&nested_columns(200));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("recursion limit exceeded"));
    }

    #[test]
    fn test_missing_fields_on_known_type_fail_to_parse() {
        let result: Result<LayoutNode, _> =
            serde_json::from_value(json!({ "id": "w", "type": "widget" }));
        assert!(result.is_err());

        let result: Result<LayoutNode, _> = serde_json::from_value(json!({ "id": "w" }));
        assert!(result.is_err());
    }
}
