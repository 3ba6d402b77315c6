use clap::{Parser, Subcommand};
use showcase::{
    logging::init_logging,
    modal::reachable_states,
    output,
    portfolio::Portfolio,
    Result,
};
use std::{path::PathBuf, process::ExitCode, time::Instant};
use tracing::{error, info};

/// Static portfolio website generator.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Site configuration. Project and static paths are relative to its directory.
    #[arg(long, default_value = "showcase.toml")]
    config: PathBuf,

    /// Only log errors.
    #[arg(long, short)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the site to disk.
    Build {
        /// Overrides `output` from the configuration.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render the site on demand over HTTP.
    Serve {
        /// Overrides `addr` from the configuration.
        #[arg(long)]
        addr: Option<String>,
    },
    /// Load and validate the portfolio without writing anything.
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(event = "showcase.failed", error = %e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let start = Instant::now();

    let portfolio = Portfolio::load(&cli.config)?;
    let slides = portfolio
        .catalog
        .iter()
        .map(|project| project.slides.len())
        .sum::<usize>();
    info!(
        event = "portfolio.loaded",
        elapsed = %format!("{:.1}s", start.elapsed().as_secs_f32()),
        projects = portfolio.catalog.len(),
        slides,
        static_files = portfolio.static_files.len(),
    );

    match cli.command {
        Command::Check => {
            info!(
                event = "portfolio.checked",
                pages = reachable_states(&portfolio.catalog).len(),
            );
            Ok(())
        }
        Command::Build { output: dir } => {
            let output = portfolio.output()?;
            info!(
                event = "output.planned",
                elapsed = %format!("{:.1}s", start.elapsed().as_secs_f32()),
                files = output.len(),
            );
            let dir = dir.unwrap_or_else(|| portfolio.output_dir());
            output::build(start, &dir, &portfolio.root, &output)?;
            Ok(())
        }
        Command::Serve { addr } => {
            let output = portfolio.output()?;
            info!(
                event = "output.planned",
                elapsed = %format!("{:.1}s", start.elapsed().as_secs_f32()),
                files = output.len(),
            );
            let addr = addr.unwrap_or_else(|| portfolio.config.addr.clone());
            output::serve(start, &addr, &portfolio.catalog, &output)
        }
    }
}
