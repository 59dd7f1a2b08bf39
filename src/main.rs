use clap::Parser;
use phyloclust::batch::run_batch;
use phyloclust::{Config, PhyloError};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Builds phylogenetic trees from aligned FASTA files.
#[derive(Parser, Debug)]
#[command(name = "phyloclust", version, about, long_about = None)]
struct Cli {
    /// File listing the FASTA alignments to process, separated by whitespace
    fasta_list: PathBuf,

    /// Directory receiving the .tree and .distances files
    output_dir: PathBuf,

    /// TOML file with output settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Indentation of the deepest vertex in the visual tree (overrides config)
    #[arg(short, long)]
    printing_depth: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Runs the batch; returns whether every input succeeded.
fn run(cli: &Cli) -> Result<bool, PhyloError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(depth) = cli.printing_depth {
        config.printing_depth = depth;
    }
    tracing::debug!("Using {config:?}");

    let stdout = io::stdout();
    let mut console = stdout.lock();
    let summary = run_batch(&cli.fasta_list, &cli.output_dir, &config, &mut console)?;

    for (input, e) in &summary.failed {
        eprintln!("Failed {}: {e}", input.display());
    }
    Ok(!summary.has_failures())
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG takes precedence over -v
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer().with_writer(io::stderr).with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_verbosity_and_overrides() {
        let cli = Cli::parse_from(["phyloclust", "list.txt", "out", "-vv", "-p", "40"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.printing_depth, Some(40));
        assert_eq!(cli.config, None);
        assert_eq!(cli.fasta_list, PathBuf::from("list.txt"));
    }
}
