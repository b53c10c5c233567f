//! # Trace Target Model
//!
//! Defines what a user may hand to the tracer:
//! * A bare IP literal (e.g. `8.8.8.8`, `2001:4860:4860::8888`).
//! * A hostname (e.g. `openai.com`).
//! * A URL-like string carrying a scheme prefix (e.g. `https://tiktok.com/`).
//!
//! Leading `https://` / `http://` prefixes (however many) and trailing slashes are removed.
//! This is a literal match, not a URL parser: paths, ports and credentials are kept
//! and will simply fail to resolve.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use thiserror::Error;

const SCHEME_PREFIXES: [&str; 2] = ["https://", "http://"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("no target given")]
    Empty,
}

/// A single target, reduced to its cleaned label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    label: String,
}

impl FromStr for Target {
    type Err = TargetError;

    /// Fails only for input that is blank. A non-blank input may still clean
    /// down to an empty label (`"https://"`), which then never resolves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(TargetError::Empty);
        }

        Ok(Self {
            label: clean_label(s),
        })
    }
}

impl Target {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the label as an address if it already is one.
    pub fn as_literal(&self) -> Option<IpAddr> {
        self.label.parse::<IpAddr>().ok()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Strips whitespace, every leading scheme prefix (case-sensitive) and every trailing `/`.
pub fn clean_label(input: &str) -> String {
    let mut label: &str = input.trim();

    loop {
        let stripped: Option<&str> = SCHEME_PREFIXES
            .iter()
            .find_map(|prefix| label.strip_prefix(prefix));
        match stripped {
            Some(rest) => label = rest,
            None => break,
        }
    }

    label.trim_end_matches('/').to_string()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
