// Widget catalog configuration
use super::tagged::{string_field, type_tag};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Sentinel binding path selecting the whole source bucket.
pub const WHOLE_BUCKET: &str = "$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetType {
    MetricCard,
    DisplayLabel,
    AlertList,
    SignalChart,
    StaticBanner,
    FormCard,
}

impl WidgetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetType::MetricCard => "MetricCard",
            WidgetType::DisplayLabel => "DisplayLabel",
            WidgetType::AlertList => "AlertList",
            WidgetType::SignalChart => "SignalChart",
            WidgetType::StaticBanner => "StaticBanner",
            WidgetType::FormCard => "FormCard",
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for WidgetType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Top-level bucket of the runtime data a binding points into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKey {
    Telemetry,
    Session,
    Alerts,
    /// Any other source name. Always resolves to nothing.
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataBinding {
    pub source: DataSourceKey,
    pub path: String,
}

impl DataBinding {
    pub fn new(source: DataSourceKey, path: impl Into<String>) -> Self {
        Self {
            source,
            path: path.into(),
        }
    }

    pub fn is_whole_bucket(&self) -> bool {
        self.path == WHOLE_BUCKET
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormatConfig {
    pub unit: String,
    pub decimals: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ThresholdOp {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
}

impl ThresholdOp {
    pub fn holds(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            ThresholdOp::Gt => lhs > rhs,
            ThresholdOp::Lt => lhs < rhs,
            ThresholdOp::Ge => lhs >= rhs,
            ThresholdOp::Le => lhs <= rhs,
            ThresholdOp::Eq => lhs == rhs,
            ThresholdOp::Ne => lhs != rhs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThresholdConfig {
    pub op: ThresholdOp,
    pub value: f64,
    pub severity: Severity,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerVariant {
    Info,
    Warning,
    Danger,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FieldKind {
    TextInput,
    Select,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub min_len: Option<usize>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitActionType {
    Toast,
    Noop,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubmitAction {
    #[serde(rename = "type")]
    pub kind: SubmitActionType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownsampleConfig {
    pub enabled: bool,
    pub target_points: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartConfig {
    pub downsample: DownsampleConfig,
}

// ---------- data-bound widgets ----------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCardProps {
    pub id: String,
    pub title: String,
    pub data_binding: DataBinding,
    pub format: FormatConfig,
    #[serde(default)]
    pub thresholds: Vec<ThresholdConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayLabelProps {
    pub id: String,
    pub title: String,
    pub data_binding: DataBinding,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertListProps {
    pub id: String,
    pub title: String,
    pub data_binding: DataBinding,
    pub max_items: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalChartProps {
    pub id: String,
    pub title: String,
    pub data_binding: DataBinding,
    pub chart: ChartConfig,
}

// ---------- static widgets ----------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StaticBannerProps {
    pub id: String,
    pub title: String,
    pub text: String,
    pub variant: BannerVariant,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCardProps {
    pub id: String,
    pub title: String,
    pub schema: FormSchema,
    pub submit_action: SubmitAction,
}

/// Common accessors over every widget props record.
pub trait WidgetProps: Clone {
    const KIND: WidgetType;

    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn set_title(&mut self, title: String);
}

/// Props of widgets that read from the runtime data sources.
pub trait DisplayWidgetProps: WidgetProps {
    fn data_binding(&self) -> &DataBinding;
}

macro_rules! widget_props {
    ($props:ty, $kind:expr, bound) => {
        widget_props!($props, $kind);

        impl DisplayWidgetProps for $props {
            fn data_binding(&self) -> &DataBinding {
                &self.data_binding
            }
        }
    };
    ($props:ty, $kind:expr) => {
        impl WidgetProps for $props {
            const KIND: WidgetType = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn title(&self) -> &str {
                &self.title
            }

            fn set_title(&mut self, title: String) {
                self.title = title;
            }
        }
    };
}

widget_props!(MetricCardProps, WidgetType::MetricCard, bound);
widget_props!(DisplayLabelProps, WidgetType::DisplayLabel, bound);
widget_props!(AlertListProps, WidgetType::AlertList, bound);
widget_props!(SignalChartProps, WidgetType::SignalChart, bound);
widget_props!(StaticBannerProps, WidgetType::StaticBanner);
widget_props!(FormCardProps, WidgetType::FormCard);

/// One entry of the widget catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetConfig {
    MetricCard(MetricCardProps),
    DisplayLabel(DisplayLabelProps),
    AlertList(AlertListProps),
    SignalChart(SignalChartProps),
    StaticBanner(StaticBannerProps),
    FormCard(FormCardProps),
    /// A widget whose `type` is not one of the known kinds. Rejected at build time.
    Unrecognized {
        id: String,
        kind: String,
        title: String,
    },
}

impl WidgetConfig {
    pub fn id(&self) -> &str {
        match self {
            WidgetConfig::MetricCard(p) => &p.id,
            WidgetConfig::DisplayLabel(p) => &p.id,
            WidgetConfig::AlertList(p) => &p.id,
            WidgetConfig::SignalChart(p) => &p.id,
            WidgetConfig::StaticBanner(p) => &p.id,
            WidgetConfig::FormCard(p) => &p.id,
            WidgetConfig::Unrecognized { id, .. } => id,
        }
    }

    /// `None` for unrecognized widgets.
    pub fn kind(&self) -> Option<WidgetType> {
        match self {
            WidgetConfig::MetricCard(_) => Some(WidgetType::MetricCard),
            WidgetConfig::DisplayLabel(_) => Some(WidgetType::DisplayLabel),
            WidgetConfig::AlertList(_) => Some(WidgetType::AlertList),
            WidgetConfig::SignalChart(_) => Some(WidgetType::SignalChart),
            WidgetConfig::StaticBanner(_) => Some(WidgetType::StaticBanner),
            WidgetConfig::FormCard(_) => Some(WidgetType::FormCard),
            WidgetConfig::Unrecognized { .. } => None,
        }
    }

    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let kind = type_tag(&value)?;
        match kind.as_str() {
            "MetricCard" => serde_json::from_value(value).map(WidgetConfig::MetricCard),
            "DisplayLabel" => serde_json::from_value(value).map(WidgetConfig::DisplayLabel),
            "AlertList" => serde_json::from_value(value).map(WidgetConfig::AlertList),
            "SignalChart" => serde_json::from_value(value).map(WidgetConfig::SignalChart),
            "StaticBanner" => serde_json::from_value(value).map(WidgetConfig::StaticBanner),
            "FormCard" => serde_json::from_value(value).map(WidgetConfig::FormCard),
            _ => Ok(WidgetConfig::Unrecognized {
                id: string_field(&value, "id"),
                title: string_field(&value, "title"),
                kind,
            }),
        }
    }
}

impl<'de> Deserialize<'de> for WidgetConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        WidgetConfig::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// The catalog document: `{ "widgets": [...] }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WidgetCatalog {
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}
