//! Error type for building and writing phylogenetic trees.

use crate::config::ConfigError;
use crate::model::sequence::AlignmentMismatchError;
use crate::parser::ParsingError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that fail the build of a single tree or the processing of one input.
///
/// Queries on a built tree never fail; unknown labels are answered with
/// sentinels (`None`, [f64::INFINITY]) instead.
#[derive(Error, Debug)]
pub enum PhyloError {
    #[error(transparent)]
    AlignmentMismatch(#[from] AlignmentMismatchError),

    #[error("cannot build a tree from zero sequences")]
    EmptyInput,

    #[error("label '{0}' is not unique")]
    DuplicateLabel(String),

    #[error("distance matrix is inconsistent: {0}")]
    InconsistentDistances(String),

    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PhyloError {
    /// Wraps an I/O error together with the path it occurred on.
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        PhyloError::Io {
            path: path.into(),
            source,
        }
    }
}
