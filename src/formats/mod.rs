//! Alignment file formats.
//!
//! Supports:
//! - CLUSTAL (.aln, .clustal, .clw) - reading and writing
//! - aligned FASTA (.fasta, .fa, .fas, ...) - reading and writing
//!
//! Format detection priority when reading:
//! 1. Explicit format specification (-f option)
//! 2. File extension
//! 3. Content-based detection

pub mod clustal;
pub mod clustal_writer;
pub mod fasta;

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::model::Alignment;
use clustal::{is_header_line, parse_clustal, ClustalError};
use clustal_writer::ClustalWriter;

/// Alignment file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Clustal,
    Fasta,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Clustal => write!(f, "CLUSTAL"),
            FileFormat::Fasta => write!(f, "FASTA"),
        }
    }
}

/// Errors that can occur while reading or writing alignment files.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty file")]
    EmptyFile,

    #[error("Could not determine file format.\n\
             Hint: Use -f/--format to specify the format explicitly:\n  \
             clustalio -f clustal <file>   # CLUSTAL format\n  \
             clustalio -f fasta <file>     # aligned FASTA")]
    UnknownFormat,

    #[error("CLUSTAL error: {0}")]
    ClustalError(#[from] ClustalError),

    #[error("FASTA error: {0}")]
    FastaError(#[from] fasta::FastaError),
}

/// Result type for file operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Detects format from file extension.
pub fn detect_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FileFormat> {
    let ext = path.as_ref().extension().and_then(OsStr::to_str)?;
    match ext.to_lowercase().as_str() {
        "aln" | "clustal" | "clw" => Some(FileFormat::Clustal),
        "fa" | "fas" | "fasta" | "fna" | "faa" | "afa" => Some(FileFormat::Fasta),
        _ => None,
    }
}

/// Detects the file format by examining the first non-empty line.
pub fn detect_format_from_content(content: &str) -> Option<FileFormat> {
    let first = content.lines().find(|line| !line.trim().is_empty())?;
    if first.trim_start().starts_with('>') {
        Some(FileFormat::Fasta)
    } else if is_header_line(first) {
        Some(FileFormat::Clustal)
    } else {
        None
    }
}

/// Parses content with a specific format.
fn parse_content(content: &str, format: FileFormat) -> ParseResult<Vec<Alignment>> {
    match format {
        FileFormat::Clustal => Ok(parse_clustal(content.as_bytes())?),
        FileFormat::Fasta => Ok(vec![fasta::parse_fasta_str(content)?]),
    }
}

/// Reads every alignment of a file with optional format specification.
pub fn read_file_with_options<P: AsRef<Path>>(
    path: P,
    forced_format: Option<FileFormat>,
) -> ParseResult<Vec<Alignment>> {
    let file = File::open(&path)?;
    let file_size = file.metadata()?.len() as usize;
    if file_size == 0 {
        return Err(ParseError::EmptyFile);
    }

    let mut reader = BufReader::new(file);
    let mut content = String::with_capacity(file_size);
    reader.read_to_string(&mut content)?;

    let format = forced_format
        .or_else(|| detect_format_from_extension(&path))
        .or_else(|| detect_format_from_content(&content))
        .ok_or(ParseError::UnknownFormat)?;
    log::debug!("Reading {} as {}", path.as_ref().display(), format);
    parse_content(&content, format)
}

/// Reads a file, detecting its format.
pub fn read_file<P: AsRef<Path>>(path: P) -> ParseResult<Vec<Alignment>> {
    read_file_with_options(path, None)
}

/// Writes alignments in the requested format.
pub fn write_alignments<W: Write>(
    writer: &mut W,
    format: FileFormat,
    alignments: &[Alignment],
) -> ParseResult<()> {
    match format {
        FileFormat::Clustal => {
            let mut clustal = ClustalWriter::new(writer);
            clustal.write_alignments(alignments)?;
            clustal.flush()?;
        }
        FileFormat::Fasta => {
            for alignment in alignments {
                fasta::write_fasta(writer, alignment)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_clustal() {
        let content = "CLUSTAL W (1.83) multiple sequence alignment\n\n\nseq1 ACGT\n";
        assert_eq!(detect_format_from_content(content), Some(FileFormat::Clustal));
        let content = "\n\nMUSCLE (3.8) multiple sequence alignment\n";
        assert_eq!(detect_format_from_content(content), Some(FileFormat::Clustal));
    }

    #[test]
    fn test_detect_fasta() {
        let content = ">seq1\nACGT\n";
        assert_eq!(detect_format_from_content(content), Some(FileFormat::Fasta));
    }

    #[test]
    fn test_detect_unknown() {
        let content = "This is not a valid alignment file\n";
        assert_eq!(detect_format_from_content(content), None);
    }

    #[test]
    fn test_detect_from_extension() {
        assert_eq!(detect_format_from_extension("test.aln"), Some(FileFormat::Clustal));
        assert_eq!(detect_format_from_extension("test.ALN"), Some(FileFormat::Clustal));
        assert_eq!(detect_format_from_extension("test.clustal"), Some(FileFormat::Clustal));
        assert_eq!(detect_format_from_extension("test.fasta"), Some(FileFormat::Fasta));
        assert_eq!(detect_format_from_extension("test.fa"), Some(FileFormat::Fasta));
        assert_eq!(detect_format_from_extension("test.txt"), None);
        assert_eq!(detect_format_from_extension("test"), None);
    }

    #[test]
    fn test_write_fasta_format() {
        let alignment = Alignment::from_gapped(["a"], &["A-C"]).unwrap();
        let mut out = Vec::new();
        write_alignments(&mut out, FileFormat::Fasta, &[alignment]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">a\nA-C\n");
    }
}
