//! Parser for aligned sequence files.
//!
//! This module provides the FASTA parser that turns an alignment into
//! [Sequence](crate::model::Sequence) records, along with supporting
//! infrastructure for low-level byte parsing and error handling.

pub mod byte_parser;
pub mod byte_source;
pub mod fasta;
pub mod parsing_error;

pub use byte_parser::ByteParser;
pub use byte_source::{ByteSource, InMemoryByteSource};
pub use fasta::FastaParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
