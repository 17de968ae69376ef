//! CLUSTAL format writer.
//!
//! Output layout:
//! - a `<program> <version> multiple sequence alignment` header and two blank lines
//! - blocks of at most 50 columns, one line per record
//! - record labels truncated to 30 characters, spaces replaced by `_`,
//!   padded to a 36 character field
//! - an optional consensus line per block, indented by 36 spaces
//!
//! # Example
//!
//! ```
//! use clustalio::formats::clustal_writer::ClustalWriter;
//! use clustalio::model::Alignment;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let alignment = Alignment::from_gapped(["seq1", "seq2"], &["AC-GT", "ACTG-"])?;
//!
//! let mut writer = ClustalWriter::new(Vec::new());
//! writer.write_header(Some("MUSCLE"), Some("3.8"))?;
//! writer.write_alignment(&alignment)?;
//!
//! let text = String::from_utf8(writer.into_inner())?;
//! assert!(text.starts_with("MUSCLE 3.8 multiple sequence alignment\n\n\n"));
//! # Ok(())
//! # }
//! ```

use std::io::Write;

use crate::formats::clustal::{ClustalError, ClustalResult, DEFAULT_PROGRAM, DEFAULT_VERSION};
use crate::model::{Alignment, AlignmentError};

/// Width of the label field preceding sequence data.
pub const LABEL_WIDTH: usize = 36;

/// Maximum number of alignment columns per block.
pub const BLOCK_WIDTH: usize = 50;

/// Identifiers are truncated to this many characters.
pub const MAX_ID_LENGTH: usize = 30;

/// CLUSTAL writer over any byte sink.
pub struct ClustalWriter<W: Write> {
    writer: W,
}

impl<W: Write> ClustalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes the header line and the two padding lines.
    ///
    /// Without a program the fallback identity of this crate is written; a
    /// program without a version leaves the version slot empty.
    pub fn write_header(&mut self, program: Option<&str>, version: Option<&str>) -> ClustalResult<()> {
        let (program, version) = match program {
            Some(program) => (program, version.unwrap_or("")),
            None => (DEFAULT_PROGRAM, DEFAULT_VERSION),
        };
        writeln!(self.writer, "{} {} multiple sequence alignment", program, version)?;
        writeln!(self.writer)?;
        writeln!(self.writer)?;
        Ok(())
    }

    /// Writes the blocks of one alignment.
    ///
    /// Nothing is written if the alignment is empty, has no columns, or
    /// carries a consensus of the wrong length.
    pub fn write_alignment(&mut self, alignment: &Alignment) -> ClustalResult<()> {
        let (nseqs, length) = alignment.shape();
        if nseqs == 0 {
            return Err(ClustalError::NoSequences);
        }
        if length == 0 {
            return Err(ClustalError::EmptySequences);
        }

        let consensus = alignment.consensus().map(str::as_bytes);
        if let Some(consensus) = consensus {
            if consensus.len() != length {
                return Err(ClustalError::InvalidConsensus {
                    columns: length,
                    found: consensus.len(),
                });
            }
        }

        let labels: Vec<String> = alignment
            .sequences
            .iter()
            .enumerate()
            .map(|(index, seq)| display_label(seq.id.as_deref(), index))
            .collect();
        let rows = gapped_rows(alignment)?;

        let mut start = 0;
        while start < length {
            let stop = (start + BLOCK_WIDTH).min(length);

            for (label, row) in labels.iter().zip(&rows) {
                self.writer.write_all(label.as_bytes())?;
                self.writer.write_all(&row.as_bytes()[start..stop])?;
                self.writer.write_all(b"\n")?;
            }

            if let Some(consensus) = consensus {
                write!(self.writer, "{:width$}", "", width = LABEL_WIDTH)?;
                self.writer.write_all(&consensus[start..stop])?;
                self.writer.write_all(b"\n")?;
            }

            writeln!(self.writer)?;
            start = stop;
        }
        Ok(())
    }

    /// Writes several alignments, each as its own document with a header.
    pub fn write_alignments(&mut self, alignments: &[Alignment]) -> ClustalResult<()> {
        for alignment in alignments {
            self.write_header(alignment.program.as_deref(), alignment.version.as_deref())?;
            self.write_alignment(alignment)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> ClustalResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Builds the padded label of a record.
fn display_label(id: Option<&str>, index: usize) -> String {
    let name = match id {
        Some(id) => id.chars().take(MAX_ID_LENGTH).collect::<String>().replace(' ', "_"),
        None => format!("sequence_{}", index),
    };
    format!("{:<width$}", name, width = LABEL_WIDTH)
}

fn gapped_rows(alignment: &Alignment) -> ClustalResult<Vec<String>> {
    (0..alignment.sequence_count())
        .map(|index| {
            alignment.gapped(index).ok_or_else(|| {
                ClustalError::from(AlignmentError::SequenceLengthMismatch {
                    index,
                    expected: alignment.coordinates.ungapped_len(index).unwrap_or(0),
                    found: alignment.sequences[index].len(),
                })
            })
        })
        .collect()
}

/// Serializes one alignment, header included, to a string.
pub fn write_clustal_string(alignment: &Alignment) -> ClustalResult<String> {
    let mut writer = ClustalWriter::new(Vec::new());
    writer.write_header(alignment.program.as_deref(), alignment.version.as_deref())?;
    writer.write_alignment(alignment)?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}
