//! Batch processing of alignment files.
//!
//! For every FASTA file named in a list file, the tree is built and
//! - `<output_dir>/<file name>.tree` receives the Newick string,
//! - `<output_dir>/<file name>.distances` receives the evolutionary distance of
//!   every ordered pair of species, one `EvDistance(a,b) = d` line each,
//! - the console receives a `Loading tree N: <path>` header, the visual tree
//!   and some statistics.
//!
//! A failing input is reported and skipped; the remaining inputs are still processed.

use crate::config::Config;
use crate::error::PhyloError;
use crate::model::PhyloTree;
use crate::parser::fasta;
use crate::build_tree;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// File extension of the Newick output
pub const TREE_EXTENSION: &str = "tree";
/// File extension of the distance table output
pub const DISTANCES_EXTENSION: &str = "distances";

/// Stand-in path of the console in I/O errors
const CONSOLE: &str = "<console>";

/// Statistics of one successfully processed input.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeReport {
    /// The FASTA file the tree was built from
    pub input: PathBuf,
    /// Number of species (leaves)
    pub num_species: usize,
    /// Number of edges on a longest root-to-leaf path
    pub height: usize,
    /// Largest sum of branch lengths on a root-to-leaf path
    pub weighted_height: f64,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Reports of all inputs processed successfully, in list order
    pub processed: Vec<TreeReport>,
    /// All inputs that failed, with their error, in list order
    pub failed: Vec<(PathBuf, PhyloError)>,
}

impl BatchSummary {
    /// Returns `true` if any input failed.
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Reads the whitespace-separated FASTA paths from the list file at `path`.
///
/// # Errors
/// Returns [PhyloError::Io] if the list file cannot be read.
pub fn read_input_list<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>, PhyloError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| PhyloError::io(path, e))?;
    Ok(content.split_whitespace().map(PathBuf::from).collect())
}

/// Processes every FASTA file named in `list_file`, writing results to `output_dir`
/// and console output to `console`.
///
/// # Errors
/// Only fails if the list file cannot be read or the output directory cannot
/// be created; failures of single inputs are collected in the [BatchSummary].
pub fn run_batch<W: Write>(
    list_file: &Path,
    output_dir: &Path,
    config: &Config,
    console: &mut W,
) -> Result<BatchSummary, PhyloError> {
    let inputs = read_input_list(list_file)?;
    if inputs.is_empty() {
        warn!("No input files listed in {}", list_file.display());
    }
    fs::create_dir_all(output_dir).map_err(|e| PhyloError::io(output_dir, e))?;

    let mut summary = BatchSummary::default();
    for (number, input) in inputs.into_iter().enumerate() {
        info!("Loading tree {}: {}", number + 1, input.display());

        let outcome = writeln!(console, "Loading tree {}: {}", number + 1, input.display())
            .map_err(|e| PhyloError::io(CONSOLE, e))
            .and_then(|()| process_input(&input, output_dir, config, console));
        match outcome {
            Ok(report) => summary.processed.push(report),
            Err(e) => {
                error!("Skipping {}: {}", input.display(), e);
                summary.failed.push((input, e));
            }
        }
    }

    info!(
        "Processed {} inputs, {} failed",
        summary.processed.len() + summary.failed.len(),
        summary.failed.len()
    );
    Ok(summary)
}

/// Builds the tree of a single FASTA file and writes its outputs.
///
/// # Errors
/// Returns a [PhyloError] if the file cannot be parsed, its sequences are not
/// aligned, or an output cannot be written.
pub fn process_input<W: Write>(
    input: &Path,
    output_dir: &Path,
    config: &Config,
    console: &mut W,
) -> Result<TreeReport, PhyloError> {
    let sequences = fasta::parse_file(input)?;
    let tree = build_tree(sequences)?;

    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let newick = format!("{}\n", tree.to_newick(&config.newick_style()));
    let distances = distance_table(&tree, config.distance_decimals);

    let tree_path = output_dir.join(format!("{file_name}.{TREE_EXTENSION}"));
    fs::write(&tree_path, newick).map_err(|e| PhyloError::io(&tree_path, e))?;

    // Outputs of an input are written completely or not at all
    let distances_path = output_dir.join(format!("{file_name}.{DISTANCES_EXTENSION}"));
    if let Err(e) = fs::write(&distances_path, distances) {
        if let Err(remove_error) = fs::remove_file(&tree_path) {
            warn!("Could not remove {}: {}", tree_path.display(), remove_error);
        }
        return Err(PhyloError::io(&distances_path, e));
    }

    let report = TreeReport {
        input: input.to_path_buf(),
        num_species: tree.count_all_species(),
        height: tree.height(),
        weighted_height: tree.weighted_height(),
    };

    write!(
        console,
        "{}{}",
        tree.to_visual_string(&config.visual_layout()),
        format_statistics(&report, config.distance_decimals)
    )
    .map_err(|e| PhyloError::io(CONSOLE, e))?;

    Ok(report)
}

/// Returns the distance table of a tree: one `EvDistance(a,b) = d` line for
/// every ordered pair of species, with `decimals` decimals.
pub fn distance_table(tree: &PhyloTree, decimals: usize) -> String {
    let mut table = String::new();
    for (first, second, distance) in tree.evolutionary_distances() {
        table.push_str(&format!(
            "EvDistance({first},{second}) = {distance:.decimals$}\n"
        ));
    }
    table
}

fn format_statistics(report: &TreeReport, decimals: usize) -> String {
    format!(
        "# species is {}\nTree height is {}\nWeighted height is {:.*}\n",
        report.num_species, report.height, decimals, report.weighted_height
    )
}
