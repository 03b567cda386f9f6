// Widget models - static config wrappers, plus value resolution for data-bound kinds
use crate::application::binding::resolve_binding;
use crate::domain::data_sources::{Alert, RuntimeDataSources, SignalPoint};
use crate::domain::widget::{
    AlertListProps, DataBinding, DataSourceKey, DisplayLabelProps, DisplayWidgetProps,
    FormCardProps, MetricCardProps, SignalChartProps, StaticBannerProps, ThresholdConfig,
    WidgetProps, WidgetType,
};
use std::borrow::Cow;
use std::sync::Arc;

const SIGNAL_SERIES_PATH: &str = "signalSeries";

/// Upper bound on rendered decimals; f64 carries no more than this.
pub const MAX_DECIMALS: usize = 20;

/// Wraps one widget's configuration.
///
/// The configuration is an immutable snapshot. Changing the title swaps in a
/// new snapshot, so anyone still holding the old one from [`WidgetModel::props`]
/// keeps seeing the old title.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetModel<P> {
    config: Arc<P>,
}

pub type MetricCardModel = WidgetModel<MetricCardProps>;
pub type DisplayLabelModel = WidgetModel<DisplayLabelProps>;
pub type AlertListModel = WidgetModel<AlertListProps>;
pub type SignalChartModel = WidgetModel<SignalChartProps>;
pub type StaticBannerModel = WidgetModel<StaticBannerProps>;
pub type FormCardModel = WidgetModel<FormCardProps>;

impl<P: WidgetProps> WidgetModel<P> {
    pub fn new(config: P) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn id(&self) -> &str {
        self.config.id()
    }

    pub fn kind(&self) -> WidgetType {
        P::KIND
    }

    pub fn title(&self) -> &str {
        self.config.title()
    }

    pub fn set_title(&mut self, next: impl Into<String>) {
        *self = self.with_title(next);
    }

    /// A copy of this model carrying a new title; `self` is left untouched.
    pub fn with_title(&self, next: impl Into<String>) -> Self {
        let mut config = P::clone(&self.config);
        config.set_title(next.into());
        Self::new(config)
    }

    pub fn props(&self) -> Arc<P> {
        Arc::clone(&self.config)
    }
}

impl<P: DisplayWidgetProps> WidgetModel<P> {
    pub fn data_binding(&self) -> &DataBinding {
        self.config.data_binding()
    }
}

/// Implemented only by widgets that render live data.
///
/// Resolution never fails: a binding that does not fit the widget kind, or a
/// path missing from the snapshot, comes back as `None` or an empty slice.
pub trait DataBound {
    type Value<'a>;

    fn resolve_value<'a>(&self, data: &'a RuntimeDataSources) -> Self::Value<'a>;
}

impl DataBound for MetricCardModel {
    type Value<'a> = Option<f64>;

    fn resolve_value<'a>(&self, data: &'a RuntimeDataSources) -> Option<f64> {
        let binding = self.data_binding();
        if binding.source != DataSourceKey::Telemetry {
            tracing::debug!("Metric card {} is not bound to telemetry", self.id());
            return None;
        }
        resolve_binding(binding, data).and_then(|value| value.as_number())
    }
}

impl MetricCardModel {
    /// Renders `value` with the configured precision (capped at
    /// [`MAX_DECIMALS`]) and unit.
    pub fn format_value(&self, value: f64) -> String {
        let format = &self.config.format;
        let number = format!("{:.*}", format.decimals.min(MAX_DECIMALS), value);
        if format.unit.is_empty() {
            number
        } else {
            format!("{} {}", number, format.unit)
        }
    }

    /// First threshold rule, in configured order, that `value` satisfies.
    pub fn evaluate_thresholds(&self, value: f64) -> Option<&ThresholdConfig> {
        self.config
            .thresholds
            .iter()
            .find(|rule| rule.op.holds(value, rule.value))
    }
}

impl DataBound for DisplayLabelModel {
    type Value<'a> = Option<&'a str>;

    fn resolve_value<'a>(&self, data: &'a RuntimeDataSources) -> Option<&'a str> {
        let binding = self.data_binding();
        if binding.source != DataSourceKey::Session {
            tracing::debug!("Display label {} is not bound to session", self.id());
            return None;
        }
        resolve_binding(binding, data).and_then(|value| value.as_text())
    }
}

impl DataBound for AlertListModel {
    type Value<'a> = &'a [Alert];

    fn resolve_value<'a>(&self, data: &'a RuntimeDataSources) -> &'a [Alert] {
        let binding = self.data_binding();
        if binding.source != DataSourceKey::Alerts || !binding.is_whole_bucket() {
            tracing::debug!("Alert list {} is not bound to the whole alerts bucket", self.id());
            return &[];
        }
        resolve_binding(binding, data)
            .and_then(|value| value.as_alerts())
            .unwrap_or_default()
    }
}

impl AlertListModel {
    /// The resolved alerts, capped at `maxItems`.
    pub fn visible_alerts<'a>(&self, data: &'a RuntimeDataSources) -> &'a [Alert] {
        let alerts = self.resolve_value(data);
        &alerts[..alerts.len().min(self.config.max_items)]
    }
}

impl DataBound for SignalChartModel {
    type Value<'a> = &'a [SignalPoint];

    fn resolve_value<'a>(&self, data: &'a RuntimeDataSources) -> &'a [SignalPoint] {
        let binding = self.data_binding();
        if binding.source != DataSourceKey::Telemetry || binding.path != SIGNAL_SERIES_PATH {
            tracing::debug!("Signal chart {} is not bound to the signal series", self.id());
            return &[];
        }
        resolve_binding(binding, data)
            .and_then(|value| value.as_series())
            .unwrap_or_default()
    }
}

impl SignalChartModel {
    /// The resolved series, down-sampled when the chart asks for it.
    pub fn plot_points<'a>(&self, data: &'a RuntimeDataSources) -> Cow<'a, [SignalPoint]> {
        let points = self.resolve_value(data);
        let downsample = self.config.chart.downsample;
        if downsample.enabled && downsample.target_points > 0 {
            Cow::Owned(downsample_points(points, downsample.target_points))
        } else {
            Cow::Borrowed(points)
        }
    }
}

/// Downsample a series using bucket averaging
pub fn downsample_points(points: &[SignalPoint], max_points: usize) -> Vec<SignalPoint> {
    if max_points == 0 || points.len() <= max_points {
        return points.to_vec();
    }

    let bucket_size = points.len().div_ceil(max_points);
    points
        .chunks(bucket_size)
        .map(|chunk| {
            // middle point's time, average value
            let mid = chunk[chunk.len() / 2].t;
            let avg = chunk.iter().map(|p| p.y).sum::<f64>() / chunk.len() as f64;
            SignalPoint::new(mid, avg)
        })
        .collect()
}

/// Any widget model the builder can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    MetricCard(MetricCardModel),
    DisplayLabel(DisplayLabelModel),
    AlertList(AlertListModel),
    SignalChart(SignalChartModel),
    StaticBanner(StaticBannerModel),
    FormCard(FormCardModel),
}

impl Widget {
    pub fn id(&self) -> &str {
        match self {
            Widget::MetricCard(m) => m.id(),
            Widget::DisplayLabel(m) => m.id(),
            Widget::AlertList(m) => m.id(),
            Widget::SignalChart(m) => m.id(),
            Widget::StaticBanner(m) => m.id(),
            Widget::FormCard(m) => m.id(),
        }
    }

    pub fn kind(&self) -> WidgetType {
        match self {
            Widget::MetricCard(m) => m.kind(),
            Widget::DisplayLabel(m) => m.kind(),
            Widget::AlertList(m) => m.kind(),
            Widget::SignalChart(m) => m.kind(),
            Widget::StaticBanner(m) => m.kind(),
            Widget::FormCard(m) => m.kind(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Widget::MetricCard(m) => m.title(),
            Widget::DisplayLabel(m) => m.title(),
            Widget::AlertList(m) => m.title(),
            Widget::SignalChart(m) => m.title(),
            Widget::StaticBanner(m) => m.title(),
            Widget::FormCard(m) => m.title(),
        }
    }

    /// `None` for static widgets.
    pub fn data_binding(&self) -> Option<&DataBinding> {
        match self {
            Widget::MetricCard(m) => Some(m.data_binding()),
            Widget::DisplayLabel(m) => Some(m.data_binding()),
            Widget::AlertList(m) => Some(m.data_binding()),
            Widget::SignalChart(m) => Some(m.data_binding()),
            Widget::StaticBanner(_) | Widget::FormCard(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::binding::tests::snapshot;
    use crate::domain::widget::{
        ChartConfig, DownsampleConfig, FormatConfig, Severity, ThresholdOp,
    };

    fn metric_card(source: DataSourceKey, path: &str) -> MetricCardModel {
        MetricCardModel::new(MetricCardProps {
            id: "hr".to_string(),
            title: "Heart rate".to_string(),
            data_binding: DataBinding::new(source, path),
            format: FormatConfig {
                unit: "bpm".to_string(),
                decimals: 1,
            },
            thresholds: vec![
                ThresholdConfig {
                    op: ThresholdOp::Ge,
                    value: 120.0,
                    severity: Severity::Danger,
                    label: "Critical".to_string(),
                },
                ThresholdConfig {
                    op: ThresholdOp::Ge,
                    value: 100.0,
                    severity: Severity::Warning,
                    label: "Elevated".to_string(),
                },
            ],
        })
    }

    fn label(source: DataSourceKey, path: &str) -> DisplayLabelModel {
        DisplayLabelModel::new(DisplayLabelProps {
            id: "note".to_string(),
            title: "Note".to_string(),
            data_binding: DataBinding::new(source, path),
        })
    }

    fn alert_list(source: DataSourceKey, path: &str, max_items: usize) -> AlertListModel {
        AlertListModel::new(AlertListProps {
            id: "alerts".to_string(),
            title: "Alerts".to_string(),
            data_binding: DataBinding::new(source, path),
            max_items,
        })
    }

    fn chart(source: DataSourceKey, path: &str, downsample: DownsampleConfig) -> SignalChartModel {
        SignalChartModel::new(SignalChartProps {
            id: "signal".to_string(),
            title: "Signal".to_string(),
            data_binding: DataBinding::new(source, path),
            chart: ChartConfig { downsample },
        })
    }

    const NO_DOWNSAMPLE: DownsampleConfig = DownsampleConfig {
        enabled: false,
        target_points: 0,
    };

    #[test]
    fn test_metric_card_resolution() {
        let data = snapshot();
        assert_eq!(metric_card(DataSourceKey::Telemetry, "heartRate").resolve_value(&data), Some(72.0));
        assert_eq!(metric_card(DataSourceKey::Telemetry, "moodIndex").resolve_value(&data), Some(0.6));
        // a series is not a number
        assert_eq!(metric_card(DataSourceKey::Telemetry, "signalSeries").resolve_value(&data), None);
        assert_eq!(metric_card(DataSourceKey::Telemetry, "$").resolve_value(&data), None);
        assert_eq!(metric_card(DataSourceKey::Session, "operatorNote").resolve_value(&data), None);
    }

    #[test]
    fn test_display_label_resolution() {
        let data = snapshot();
        assert_eq!(label(DataSourceKey::Session, "operatorNote").resolve_value(&data), Some("calm shift"));
        assert_eq!(label(DataSourceKey::Telemetry, "heartRate").resolve_value(&data), None);
        assert_eq!(label(DataSourceKey::Session, "missing").resolve_value(&data), None);
    }

    #[test]
    fn test_alert_list_resolution() {
        let data = snapshot();
        assert_eq!(alert_list(DataSourceKey::Alerts, "$", 10).resolve_value(&data), data.alerts.as_slice());
        assert!(alert_list(DataSourceKey::Alerts, "0", 10).resolve_value(&data).is_empty());
        assert!(alert_list(DataSourceKey::Telemetry, "$", 10).resolve_value(&data).is_empty());
    }

    #[test]
    fn test_alert_list_caps_visible_alerts() {
        let data = snapshot();
        let model = alert_list(DataSourceKey::Alerts, "$", 1);
        assert_eq!(model.visible_alerts(&data), &data.alerts[..1]);
        assert_eq!(model.resolve_value(&data).len(), 2);
    }

    #[test]
    fn test_signal_chart_resolution() {
        let data = snapshot();
        let model = chart(DataSourceKey::Telemetry, "signalSeries", NO_DOWNSAMPLE);
        assert_eq!(model.resolve_value(&data), data.telemetry.signal_series.as_slice());
        assert!(chart(DataSourceKey::Telemetry, "heartRate", NO_DOWNSAMPLE).resolve_value(&data).is_empty());
        assert!(chart(DataSourceKey::Session, "signalSeries", NO_DOWNSAMPLE).resolve_value(&data).is_empty());
    }

    #[test]
    fn test_signal_chart_plot_points_downsamples() {
        let mut data = snapshot();
        data.telemetry.signal_series = (0..10).map(|i| SignalPoint::new(i as f64, i as f64)).collect();
        let enabled = DownsampleConfig {
            enabled: true,
            target_points: 4,
        };

        let points = chart(DataSourceKey::Telemetry, "signalSeries", enabled).plot_points(&data);
        // bucket size ceil(10 / 4) = 3 -> buckets [0..3], [3..6], [6..9], [9]
        assert_eq!(
            &*points,
            &[
                SignalPoint::new(1.0, 1.0),
                SignalPoint::new(4.0, 4.0),
                SignalPoint::new(7.0, 7.0),
                SignalPoint::new(9.0, 9.0),
            ]
        );

        let points = chart(DataSourceKey::Telemetry, "signalSeries", NO_DOWNSAMPLE).plot_points(&data);
        assert_eq!(points.len(), 10);
    }

    #[test]
    fn test_downsample_short_series_is_unchanged() {
        let points = vec![SignalPoint::new(0.0, 1.0), SignalPoint::new(1.0, 2.0)];
        assert_eq!(downsample_points(&points, 5), points);
        assert_eq!(downsample_points(&points, 0), points);
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let data = snapshot();
        let model = metric_card(DataSourceKey::Telemetry, "heartRate");
        assert_eq!(model.resolve_value(&data), model.resolve_value(&data));
    }

    #[test]
    fn test_metric_card_format_and_thresholds() {
        let model = metric_card(DataSourceKey::Telemetry, "heartRate");
        assert_eq!(model.format_value(72.0), "72.0 bpm");
        assert_eq!(model.evaluate_thresholds(72.0), None);
        assert_eq!(model.evaluate_thresholds(105.0).map(|t| t.label.as_str()), Some("Elevated"));
        // the first matching rule wins
        assert_eq!(model.evaluate_thresholds(130.0).map(|t| t.severity), Some(Severity::Danger));
    }

    #[test]
    fn test_metric_card_format_caps_decimals() {
        let mut props = MetricCardProps::clone(&metric_card(DataSourceKey::Telemetry, "heartRate").props());
        props.format.decimals = 70_000;
        let model = MetricCardModel::new(props);

        assert_eq!(model.format_value(72.0), format!("{:.20} bpm", 72.0));
    }

    #[test]
    fn test_title_change_produces_new_snapshot() {
        let mut model = metric_card(DataSourceKey::Telemetry, "heartRate");
        let before = model.props();

        let renamed = model.with_title("Pulse");
        assert_eq!(renamed.title(), "Pulse");
        assert_eq!(model.title(), "Heart rate");

        model.set_title("BPM");
        assert_eq!(model.title(), "BPM");
        assert_eq!(before.title, "Heart rate");
        assert_eq!(model.kind(), WidgetType::MetricCard);
    }

    #[test]
    fn test_static_widget_has_no_binding() {
        let banner = Widget::StaticBanner(StaticBannerModel::new(StaticBannerProps {
            id: "welcome".to_string(),
            title: "Welcome".to_string(),
            text: "Hello".to_string(),
            variant: crate::domain::widget::BannerVariant::Info,
        }));
        assert_eq!(banner.kind(), WidgetType::StaticBanner);
        assert!(banner.data_binding().is_none());
    }
}
