// Binding resolver - maps a (source, path) descriptor onto the runtime snapshot
use crate::domain::data_sources::{Alert, RuntimeDataSources, Session, SignalPoint, Telemetry};
use crate::domain::widget::{DataBinding, DataSourceKey};

/// A raw value read out of the runtime data, before any widget narrowing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundValue<'a> {
    Number(f64),
    Text(&'a str),
    Series(&'a [SignalPoint]),
    Alerts(&'a [Alert]),
    Alert(&'a Alert),
    Telemetry(&'a Telemetry),
    Session(&'a Session),
}

impl<'a> BoundValue<'a> {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            BoundValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            BoundValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_series(&self) -> Option<&'a [SignalPoint]> {
        match self {
            BoundValue::Series(points) => Some(points),
            _ => None,
        }
    }

    pub fn as_alerts(&self) -> Option<&'a [Alert]> {
        match self {
            BoundValue::Alerts(alerts) => Some(alerts),
            _ => None,
        }
    }
}

/// Resolves `binding` against `data`.
///
/// The `$` path returns the whole bucket. A field the bucket does not have,
/// or a source outside the known set, yields `None`; callers decide what an
/// absent value means for them.
pub fn resolve_binding<'a>(binding: &DataBinding, data: &'a RuntimeDataSources) -> Option<BoundValue<'a>> {
    let whole = binding.is_whole_bucket();
    match &binding.source {
        DataSourceKey::Telemetry if whole => Some(BoundValue::Telemetry(&data.telemetry)),
        DataSourceKey::Telemetry => telemetry_field(&data.telemetry, &binding.path),
        DataSourceKey::Session if whole => Some(BoundValue::Session(&data.session)),
        DataSourceKey::Session => session_field(&data.session, &binding.path),
        DataSourceKey::Alerts if whole => Some(BoundValue::Alerts(&data.alerts)),
        // the alerts bucket is a list, so a path can only be an index into it
        DataSourceKey::Alerts => binding
            .path
            .parse::<usize>()
            .ok()
            .and_then(|idx| data.alerts.get(idx))
            .map(BoundValue::Alert),
        DataSourceKey::Other(source) => {
            tracing::debug!("Binding references unknown source {}", source);
            None
        }
    }
}

fn telemetry_field<'a>(telemetry: &'a Telemetry, path: &str) -> Option<BoundValue<'a>> {
    match path {
        "heartRate" => Some(BoundValue::Number(telemetry.heart_rate)),
        "moodIndex" => Some(BoundValue::Number(telemetry.mood_index)),
        "signalSeries" => Some(BoundValue::Series(&telemetry.signal_series)),
        _ => None,
    }
}

fn session_field<'a>(session: &'a Session, path: &str) -> Option<BoundValue<'a>> {
    match path {
        "operatorNote" => Some(BoundValue::Text(&session.operator_note)),
        _ => None,
    }
}
