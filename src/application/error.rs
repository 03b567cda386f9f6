// Build-time failures. Resolution mismatches are never errors.

/// The configuration document is structurally invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown node type `{kind}` on layout node `{node_id}`")]
    UnknownNodeType { node_id: String, kind: String },

    #[error("Unknown widget type `{kind}` on widget `{widget_id}`")]
    UnknownWidgetType { widget_id: String, kind: String },
}

/// A layout leaf references a widget the catalog does not have.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Widget not found in catalog: {widget_id} (referenced by node `{node_id}`)")]
pub struct LookupError {
    pub node_id: String,
    pub widget_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl BuildError {
    pub fn is_config(&self) -> bool {
        matches!(self, BuildError::Config(_))
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, BuildError::Lookup(_))
    }
}
