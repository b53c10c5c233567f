pub mod interactive;
pub mod locate;
pub mod resolve;

use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use geotrace_common::config::{Config, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

#[derive(Parser)]
#[command(name = "geotrace", version)]
#[command(about = "Find where the server behind a domain or IP address lives.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Geolocation endpoint, `{address}` is replaced with the resolved address
    #[arg(long, global = true, value_name = "TEMPLATE", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Language for place names (en, de, es, pt-BR, fr, ja, zh-CN, ru)
    #[arg(long, global = true, value_name = "CODE")]
    pub lang: Option<String>,

    /// Seconds to wait for each network call, 0 waits forever
    #[arg(long, global = true, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Never fall back to IPv6 when a name has no IPv4 address
    #[arg(long, global = true)]
    pub ipv4_only: bool,

    /// Also print the raw provider payload
    #[arg(long, global = true)]
    pub raw: bool,

    /// Print only the raw provider payload as JSON
    #[arg(long, global = true, conflicts_with = "raw")]
    pub json: bool,

    /// Less output, repeat for even less
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Skip the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Show debug events, including why a lookup failed
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a target and show where it is
    #[command(alias = "l")]
    Locate { target: String },
    /// Resolve a target to its address only
    #[command(alias = "r")]
    Resolve { target: String },
    /// Prompt for targets until end of input
    #[command(alias = "i")]
    Interactive,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        let timeout: Option<Duration> = match self.timeout {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Config {
            endpoint: self.endpoint.clone(),
            lang: self.lang.clone(),
            timeout,
            ipv4_only: self.ipv4_only,
            raw: self.raw,
            json: self.json,
            quiet: if self.json { self.quiet.max(1) } else { self.quiet },
            no_banner: self.no_banner || self.json,
        }
    }
}
