use std::error::Error;
use std::process::ExitCode;

use colored::*;
use geotrace_common::config::Config;
use geotrace_common::{error, success, warn};
use geotrace_core::error::TraceError;
use geotrace_core::tracer::{Located, Tracer};
use tracing::{Instrument, Span, debug, info_span};

use crate::terminal::{colors, format, print, spinner};

pub async fn locate(tracer: &Tracer, input: &str, cfg: &Config) -> anyhow::Result<ExitCode> {
    match run_trace(tracer, input, cfg).await {
        Ok(located) => {
            render(&located, cfg)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report_failure(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Runs one trace with the spinner following its state. `--json` runs silently.
pub async fn run_trace(tracer: &Tracer, input: &str, cfg: &Config) -> Result<Located, TraceError> {
    let span: Span = if cfg.json {
        Span::none()
    } else {
        info_span!("trace", indicatif.pb_show = true)
    };
    let observer = spinner::observer(span.clone());

    tracer.trace(input, Some(&observer)).instrument(span).await
}

pub fn render(located: &Located, cfg: &Config) -> anyhow::Result<()> {
    let Located {
        label,
        address,
        record,
    } = located;

    if cfg.json {
        print::print(&serde_json::to_string_pretty(record.raw())?);
        return Ok(());
    }

    success!(
        "Target located: {} -> {}",
        label.color(colors::PRIMARY).bold(),
        format::address(address)
    );

    print::header("Quick data", cfg.quiet);
    print::tree_head(label, &format!("({address})"));
    print::as_tree_one_level(format::metrics(record));

    print::header("Exact location", cfg.quiet);
    match record.coordinates() {
        Some((lat, lon)) => {
            print::align_keys(&["Region", "Coordinates", "Marker", "Popup", "Map"]);
            print::aligned_line("Region", format::or_missing(record.region_name.as_deref()));
            print::aligned_line(
                "Coordinates",
                format::coordinates(lat, lon).color(colors::COORDINATES),
            );
            print::aligned_line("Marker", format::tooltip(label, address));
            print::aligned_line("Popup", format::popup(record));
            print::aligned_line(
                "Map",
                format::map_link(lat, lon).color(colors::LINK).underline(),
            );
        }
        None => warn!("Provider sent no coordinates, no map pin for {label}"),
    }

    if cfg.raw {
        print::header("Raw technical data (JSON)", cfg.quiet);
        print::print(&serde_json::to_string_pretty(record.raw())?);
    }

    Ok(())
}

/// One user-facing line per failure kind. The underlying cause only shows with `-v`.
pub fn report_failure(err: &TraceError) {
    let message: String = failure_message(err);
    match err {
        TraceError::EmptyTarget => warn!("{message}"),
        _ => error!("{message}"),
    }

    if let Some(cause) = err.source() {
        debug!("cause: {cause}");
    }
}

pub fn failure_message(err: &TraceError) -> String {
    match err {
        TraceError::EmptyTarget => "Enter a target first.".to_string(),
        TraceError::Resolution { label } => {
            format!("Invalid domain or host is down: {}", label.bold())
        }
        TraceError::Geolocation { address, .. } => {
            format!(
                "Could not obtain geolocation for {}",
                format::address(address)
            )
        }
        TraceError::Timeout { stage, after } => {
            format!(
                "{stage} timed out after {}s",
                after.as_secs_f64().to_string().bold()
            )
        }
    }
}
