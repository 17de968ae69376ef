//! Aligned FASTA reader and writer.
//!
//! Used as the second endpoint of the converter: every record of an aligned
//! FASTA file carries its gapped row, and all rows share one length.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! AC-GT
//! >another_sequence
//! ACTG-
//! ```

use std::io::Write;

use thiserror::Error;

use crate::model::{Alignment, AlignmentError};

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),

    #[error("Not an alignment: {0}")]
    NotAligned(#[from] AlignmentError),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses aligned FASTA content from a string.
pub fn parse_fasta_str(content: &str) -> FastaResult<Alignment> {
    let mut ids: Vec<&str> = Vec::new();
    let mut rows: Vec<String> = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            // Take everything before first space as ID
            let id = header.split_whitespace().next().unwrap_or("");
            if id.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    index + 1
                )));
            }
            ids.push(id);
            rows.push(String::new());
        } else {
            let row = rows
                .last_mut()
                .ok_or(FastaError::SequenceWithoutHeader(index + 1))?;
            row.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    if ids.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    Ok(Alignment::from_gapped(ids, &rows)?)
}

/// Writes an alignment as gapped FASTA, one line per record.
pub fn write_fasta<W: Write>(writer: &mut W, alignment: &Alignment) -> FastaResult<()> {
    for (index, row) in alignment.gapped_rows().iter().enumerate() {
        match alignment.get(index).and_then(|seq| seq.id.as_deref()) {
            Some(id) => writeln!(writer, ">{}", id)?,
            None => writeln!(writer, ">sequence_{}", index)?,
        }
        writeln!(writer, "{}", row)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aligned_fasta() {
        let content = ">seq1 first\nAC-G\nT\n\n>seq2\nACTG-\n";
        let alignment = parse_fasta_str(content).unwrap();

        assert_eq!(alignment.shape(), (2, 5));
        assert_eq!(alignment.get(0).unwrap().id.as_deref(), Some("seq1"));
        assert_eq!(alignment.get(0).unwrap().data, "ACGT");
        assert_eq!(alignment.gapped(1).as_deref(), Some("ACTG-"));
    }

    #[test]
    fn test_unaligned_rejected() {
        let content = ">seq1\nACGT\n>seq2\nTG\n";
        assert!(matches!(parse_fasta_str(content), Err(FastaError::NotAligned(_))));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse_fasta_str(""), Err(FastaError::EmptyFile)));
    }

    #[test]
    fn test_sequence_without_header() {
        let content = "ACGT\n>seq1\nTGCA\n";
        assert!(matches!(
            parse_fasta_str(content),
            Err(FastaError::SequenceWithoutHeader(1))
        ));
    }

    #[test]
    fn test_write_fasta() {
        let alignment = Alignment::from_gapped(["a", "b"], &["AC-", "-CG"]).unwrap();
        let mut out = Vec::new();
        write_fasta(&mut out, &alignment).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">a\nAC-\n>b\n-CG\n");
    }
}
