use colored::*;
use geotrace_core::tracer::TraceState;
use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub fn style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

pub fn state_message(state: TraceState) -> Option<&'static str> {
    match state {
        TraceState::Idle => Some("Waiting for a target..."),
        TraceState::Resolving => Some("Resolving target..."),
        TraceState::Resolved => Some("Target resolved"),
        TraceState::Geolocating => Some("Triangulating signal..."),
        TraceState::ResolutionFailed
        | TraceState::Located
        | TraceState::GeolocationFailed => None,
    }
}

/// Builds a tracer observer that mirrors state changes on the span's spinner.
pub fn observer(span: Span) -> impl Fn(TraceState) + Send + Sync {
    move |state: TraceState| {
        if let Some(msg) = state_message(state) {
            span.pb_set_message(&format!("{}", msg.color(colors::TEXT_DEFAULT)));
        }
    }
}
