// Render pass - resolves every widget leaf of a built tree against one snapshot
use crate::application::layout::Node;
use crate::application::widget_model::{DataBound, Widget};
use crate::domain::data_sources::{Alert, RuntimeDataSources, SignalPoint};
use crate::domain::widget::{Severity, WidgetType};
use serde::Serialize;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedWidget<'a> {
    pub node_id: &'a str,
    pub widget_id: &'a str,
    pub kind: WidgetType,
    pub title: &'a str,
    pub value: ResolvedValue<'a>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdHit<'a> {
    pub severity: Severity,
    pub label: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum ResolvedValue<'a> {
    Metric {
        value: Option<f64>,
        text: Option<String>,
        threshold: Option<ThresholdHit<'a>>,
    },
    Label(Option<&'a str>),
    Alerts(&'a [Alert]),
    Series(Cow<'a, [SignalPoint]>),
    /// Static widgets carry everything in their props.
    Static,
}

/// Resolves every widget leaf under `root`, in pre-order.
///
/// Leaves without an attached widget are skipped. Nothing here fails: a
/// misconfigured binding shows up as an empty value for that widget only.
pub fn resolve_dashboard<'a>(root: &'a Node, data: &'a RuntimeDataSources) -> Vec<ResolvedWidget<'a>> {
    let resolved: Vec<ResolvedWidget<'a>> = root
        .widget_nodes()
        .into_iter()
        .filter_map(|node| {
            let Some(widget) = node.widget() else {
                tracing::warn!("Widget node {} has no widget attached", node.id());
                return None;
            };
            Some(ResolvedWidget {
                node_id: node.id(),
                widget_id: widget.id(),
                kind: widget.kind(),
                title: widget.title(),
                value: resolve_widget(widget, data),
            })
        })
        .collect();

    let empty = resolved.iter().filter(|w| w.value.is_empty()).count();
    tracing::info!(
        "Resolved {} widgets for {} ({} without data)",
        resolved.len(),
        root.id(),
        empty
    );

    resolved
}

pub fn resolve_widget<'a>(widget: &'a Widget, data: &'a RuntimeDataSources) -> ResolvedValue<'a> {
    match widget {
        Widget::MetricCard(card) => {
            let value = card.resolve_value(data);
            ResolvedValue::Metric {
                value,
                text: value.map(|v| card.format_value(v)),
                threshold: value
                    .and_then(|v| card.evaluate_thresholds(v))
                    .map(|rule| ThresholdHit {
                        severity: rule.severity,
                        label: &rule.label,
                    }),
            }
        }
        Widget::DisplayLabel(label) => ResolvedValue::Label(label.resolve_value(data)),
        Widget::AlertList(list) => ResolvedValue::Alerts(list.visible_alerts(data)),
        Widget::SignalChart(chart) => ResolvedValue::Series(chart.plot_points(data)),
        Widget::StaticBanner(_) | Widget::FormCard(_) => ResolvedValue::Static,
    }
}

impl ResolvedValue<'_> {
    /// True when a data-bound widget ended up with nothing to show.
    pub fn is_empty(&self) -> bool {
        match self {
            ResolvedValue::Metric { value, .. } => value.is_none(),
            ResolvedValue::Label(text) => text.is_none(),
            ResolvedValue::Alerts(alerts) => alerts.is_empty(),
            ResolvedValue::Series(points) => points.is_empty(),
            ResolvedValue::Static => false,
        }
    }
}
