//! FASTA parser for aligned sequences.
//!
//! # Format
//! * A record starts with a header line `>...`; the sequence name is the last
//!   non-empty `|`-separated field of the header, e.g. `>gi|1234|Kiwi` names `Kiwi`.
//! * All lines up to the next header form the sequence; whitespace is dropped.
//! * Blank lines are allowed anywhere.

use crate::model::Sequence;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

/// Start of a FASTA header line
const HEADER_START: u8 = b'>';
/// Separator of fields in a FASTA header
const HEADER_FIELD_SEPARATOR: char = '|';

// =#========================================================================#=
// FASTA PARSER
// =#========================================================================#=
/// Parser reading [Sequence] records from a [ByteParser].
///
/// # Example
/// ```
/// use phyloclust::parser::{ByteParser, FastaParser};
///
/// let mut parser = FastaParser::new(ByteParser::for_str(">a|Kea\nAC\nGT\n>Kaka\nACGA\n"));
/// let sequences = parser.parse_all().unwrap();
///
/// assert_eq!(sequences[0].name(), "Kea");
/// assert_eq!(sequences[0].symbols(), b"ACGT");
/// assert_eq!(sequences[1].name(), "Kaka");
/// ```
pub struct FastaParser<S: ByteSource> {
    parser: ByteParser<S>,
}

impl<S: ByteSource> FastaParser<S> {
    /// Creates a new FASTA parser reading from the given byte parser.
    pub fn new(parser: ByteParser<S>) -> Self {
        Self { parser }
    }

    /// Parses all remaining records, in input order.
    ///
    /// # Errors
    /// Returns a [ParsingError] if the input holds no record or a record is malformed.
    pub fn parse_all(&mut self) -> Result<Vec<Sequence>, ParsingError> {
        let mut sequences = Vec::new();
        while let Some(sequence) = self.next_record()? {
            sequences.push(sequence);
        }

        if sequences.is_empty() {
            return Err(ParsingError::empty_input(&self.parser));
        }

        Ok(sequences)
    }

    /// Parses the next record, or returns `None` once the input is exhausted.
    ///
    /// # Errors
    /// Returns a [ParsingError] if
    /// * there is content that does not start with a `>` header,
    /// * the header holds no name, or
    /// * the record holds no sequence data.
    pub fn next_record(&mut self) -> Result<Option<Sequence>, ParsingError> {
        self.parser.skip_whitespace();
        if self.parser.is_eof() {
            return Ok(None);
        }

        if !self.parser.consume_if(HEADER_START) {
            return Err(ParsingError::missing_header(&self.parser));
        }

        let header = String::from_utf8_lossy(&self.parser.read_line()).into_owned();
        let name = header
            .split(HEADER_FIELD_SEPARATOR)
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .next_back()
            .ok_or_else(|| ParsingError::empty_name(&self.parser))?
            .to_string();

        let mut symbols = Vec::new();
        loop {
            self.parser.skip_whitespace();
            if self.parser.is_eof() || self.parser.peek() == Some(HEADER_START) {
                break;
            }
            symbols.extend(
                self.parser
                    .read_line()
                    .into_iter()
                    .filter(|b| !b.is_ascii_whitespace()),
            );
        }

        if symbols.is_empty() {
            return Err(ParsingError::empty_sequence(&self.parser, name));
        }

        Ok(Some(Sequence::new(name, symbols)))
    }
}

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses all records of the FASTA file at `path`.
///
/// # Errors
/// Returns a [ParsingError] if the file cannot be read or is not valid FASTA.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>, ParsingError> {
    let source = InMemoryByteSource::from_file(path)?;
    FastaParser::new(ByteParser::new(source)).parse_all()
}

/// Parses all records of the given FASTA text.
///
/// # Errors
/// Returns a [ParsingError] if the text is not valid FASTA.
pub fn parse_str<S: AsRef<str>>(fasta: S) -> Result<Vec<Sequence>, ParsingError> {
    FastaParser::new(ByteParser::for_str(fasta.as_ref())).parse_all()
}
