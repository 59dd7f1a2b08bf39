//! Error types for the FASTA parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while reading alignment files.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur during FASTA parsing.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    #[error("IO error - {0}")]
    IoError(String),
    #[error("Input contains no FASTA record")]
    EmptyInput,
    #[error("Expected '>' at start of record header")]
    MissingHeader,
    #[error("Record header without name")]
    EmptyName,
    #[error("Record '{0}' has no sequence data")]
    EmptySequence(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position and following bytes).
#[derive(Error, Debug)]
#[error("{kind} at position {position}{}", format_context(.context))]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

fn format_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (next {} bytes): {}", context.len(), context)
    }
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for EmptyInput
    pub fn empty_input<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::EmptyInput, parser)
    }

    /// Convenience constructor for MissingHeader
    pub fn missing_header<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::MissingHeader, parser)
    }

    /// Convenience constructor for EmptyName
    pub fn empty_name<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::EmptyName, parser)
    }

    /// Convenience constructor for EmptySequence
    pub fn empty_sequence<S: ByteSource>(parser: &ByteParser<S>, name: String) -> Self {
        Self::from_parser(ParsingErrorType::EmptySequence(name), parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError {
            kind: ParsingErrorType::IoError(err.to_string()),
            position: 0,
            context: String::new(),
        }
    }
}
