//! Output configuration, optionally read from a TOML file.
//!
//! ```toml
//! printing_depth = 100     # fill characters in front of the deepest vertex
//! newick_decimals = 5      # decimals of branch lengths in .tree files
//! distance_decimals = 2    # decimals in .distances files
//! ```
//! Missing keys fall back to their defaults.

use crate::model::VisualLayout;
use crate::newick::{DEFAULT_DECIMALS, NewickStyle};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Settings for rendering and writing trees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Indentation of the deepest vertex in the visual tree
    pub printing_depth: usize,
    /// Decimals of branch lengths in the Newick output
    pub newick_decimals: usize,
    /// Decimals of evolutionary distances in the distance table
    pub distance_decimals: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            printing_depth: VisualLayout::default().printing_depth,
            newick_decimals: DEFAULT_DECIMALS,
            distance_decimals: 2,
        }
    }
}

impl Config {
    /// Reads a config from the TOML file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Layout for [PhyloTree::to_visual_string](crate::model::PhyloTree::to_visual_string).
    pub fn visual_layout(&self) -> VisualLayout {
        VisualLayout::with_depth(self.printing_depth)
    }

    /// Style for the Newick output.
    pub fn newick_style(&self) -> NewickStyle {
        NewickStyle::Fixed(self.newick_decimals)
    }
}
