use std::process::ExitCode;

use colored::*;
use console::Term;
use geotrace_common::config::Config;
use geotrace_core::tracer::Tracer;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::locate;
use crate::gprint;
use crate::terminal::{colors, print};

const EXIT_WORDS: [&str; 2] = ["quit", "exit"];

/// Prompts for one target per line, the terminal stand-in for an input box and a
/// "track" button. Each line is an independent trace.
pub async fn interactive(tracer: &Tracer, cfg: &Config) -> anyhow::Result<ExitCode> {
    let term = Term::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if cfg.quiet == 0 {
        print::print_status("Type a domain (e.g. google.com) or an IP to trace where its server lives.");
        print::print_status(format!("{} or end of input to leave.", "quit".bold()));
        gprint!();
    }

    loop {
        term.write_str(&format!(
            "{} ",
            "target (e.g. 8.8.8.8 or openai.com) ›".color(colors::PRIMARY)
        ))?;
        term.flush()?;

        let Some(line) = lines.next_line().await? else {
            gprint!();
            break;
        };
        let input: &str = line.trim();

        if EXIT_WORDS.contains(&input) {
            break;
        }

        match locate::run_trace(tracer, input, cfg).await {
            Ok(located) => locate::render(&located, cfg)?,
            Err(err) => locate::report_failure(&err),
        }
        gprint!();
    }

    print::end_of_program();
    Ok(ExitCode::SUCCESS)
}
