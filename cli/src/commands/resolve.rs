use std::process::ExitCode;

use colored::*;
use geotrace_common::config::Config;
use geotrace_common::success;
use geotrace_core::tracer::Tracer;
use serde_json::json;
use tracing::{Instrument, Span, info_span};

use crate::commands::locate;
use crate::terminal::{colors, format, print, spinner};

pub async fn resolve(tracer: &Tracer, input: &str, cfg: &Config) -> anyhow::Result<ExitCode> {
    let span: Span = if cfg.json {
        Span::none()
    } else {
        info_span!("resolve", indicatif.pb_show = true)
    };
    let observer = spinner::observer(span.clone());

    let result = tracer
        .resolve_only(input, Some(&observer))
        .instrument(span)
        .await;

    match result {
        Ok(resolution) if cfg.json => {
            let doc = json!({
                "label": resolution.label,
                "address": resolution.address.to_string(),
            });
            print::print(&serde_json::to_string_pretty(&doc)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(resolution) => {
            success!(
                "Target resolved: {} -> {}",
                resolution.label.color(colors::PRIMARY).bold(),
                format::address(&resolution.address)
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            locate::report_failure(&err);
            Ok(ExitCode::FAILURE)
        }
    }
}
