//! Low-level byte-by-byte parser for line-based ASCII text.
//!
//! This module provides [ByteParser] with support for peeking, consuming,
//! whitespace skipping and line reading. Used as the foundation of the
//! FASTA parser.

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text with support for peeking and consuming.
///
/// # Example
/// ```
/// use phyloclust::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str(">seq1\nACGT\n");
/// assert!(parser.consume_if(b'>'));
/// assert_eq!(parser.read_line(), b"seq1");
/// assert_eq!(parser.read_line(), b"ACGT");
/// assert!(parser.is_eof());
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new `ByteParser` from a byte slice by copying it into a Vec.
    pub fn for_bytes(input: &[u8]) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.to_vec()))
    }

    /// Creates a new `ByteParser` from a string by copying it into a Vec.
    pub fn for_str(input: &str) -> Self {
        Self::for_bytes(input.as_bytes())
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips (consumes) all consecutive ASCII whitespace, including newlines.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Consumes the current byte if it equals `ch`.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consumes the rest of the current line including its line break and
    /// returns it without the line break (`\n` or `\r\n`).
    ///
    /// At EOF, returns whatever was left, possibly empty.
    pub fn read_line(&mut self) -> Vec<u8> {
        let mut line = Vec::new();
        while let Some(b) = self.next() {
            if b == b'\n' {
                break;
            }
            line.push(b);
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        line
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current parser position in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(&self.source.get_context(k)).into_owned()
    }
}
