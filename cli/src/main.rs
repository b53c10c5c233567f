mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, interactive, locate, resolve};
use geotrace_core::tracer::Tracer;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.json);

    let cfg = commands.to_config();
    let tracer = Tracer::from_config(&cfg)?;

    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command.unwrap_or(Commands::Interactive) {
        Commands::Locate { target } => {
            print::header("tracking target", cfg.quiet);
            locate::locate(&tracer, &target, &cfg).await
        }
        Commands::Resolve { target } => {
            print::header("resolving target", cfg.quiet);
            resolve::resolve(&tracer, &target, &cfg).await
        }
        Commands::Interactive => {
            print::header("control panel", cfg.quiet);
            interactive::interactive(&tracer, &cfg).await
        }
    }
}
