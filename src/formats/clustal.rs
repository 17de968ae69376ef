//! CLUSTAL format reader.
//!
//! Reads the blocked alignment output of CLUSTAL W and the other tools that
//! copied its layout (PROBCONS, MUSCLE, MSAPROBS, Kalign).
//!
//! ## CLUSTAL Format
//!
//! ```text
//! CLUSTAL W (1.83) multiple sequence alignment
//!
//!
//! alpha     ACGTACGTAC 10
//! beta      ACGT--GTAC 8
//!           ****  ****
//!
//! alpha     GGCC 14
//! beta      GG-C 11
//!           ** *
//! ```
//!
//! The first token of the header names the program; the first token starting
//! with a digit (parentheses stripped) is its version. Each block holds one
//! line per record: identifier, aligned segment and an optional running
//! residue count. A line starting with a space is the consensus line of the
//! block. The first block fixes the record order and the column where
//! sequence data starts; later blocks must repeat the same order.
//!
//! ## Concatenated Documents
//!
//! A header line found at a block boundary ends the current alignment and
//! starts the next one, so a single stream can hold several documents.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::coordinates::{infer_coordinates, GAP};
use crate::model::{Alignment, AlignmentError, Sequence};

/// Program name written when an alignment carries no provenance.
pub const DEFAULT_PROGRAM: &str = "clustalio";

/// Version written alongside [`DEFAULT_PROGRAM`].
pub const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header tokens accepted as the producing program.
pub const KNOWN_PROGRAMS: [&str; 6] = [
    "CLUSTAL",
    "PROBCONS",
    "MUSCLE",
    "MSAPROBS",
    "Kalign",
    DEFAULT_PROGRAM,
];

/// Broad classification of a [`ClustalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The underlying stream failed
    Io,
    /// The text does not follow the CLUSTAL layout
    Structural,
    /// A trailing residue count is malformed or wrong
    Checksum,
    /// The writer was handed an alignment it cannot serialize
    Precondition,
}

/// Errors that can occur while reading or writing CLUSTAL alignments.
#[derive(Error, Debug)]
pub enum ClustalError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty file")]
    EmptyFile,

    #[error("Invalid header line: '{0}'")]
    InvalidHeader(String),

    #[error("{program} is not known to generate CLUSTAL files: {known}", known = KNOWN_PROGRAMS.join(", "))]
    UnknownProgram { program: String },

    #[error("Could not parse line, expected 2 or 3 fields:\n{0}")]
    FieldCount(String),

    #[error("Could not parse line, bad sequence number:\n{0}")]
    BadSequenceNumber(String),

    #[error("Could not parse line, invalid sequence number ({found} letters read so far):\n{line}")]
    InvalidSequenceNumber { line: String, found: usize },

    #[error("Expected sequence identifier '{expected}':\n{line}")]
    IdentifierMismatch { expected: String, line: String },

    #[error("Consensus line before any sequence line:\n{0}")]
    ConsensusBeforeSequences(String),

    #[error("Sequence '{id}' has {found} aligned columns, expected {expected}")]
    InconsistentLength {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("Alignment has {columns} columns, consensus length is {found}, '{consensus}'")]
    ConsensusLength {
        columns: usize,
        found: usize,
        consensus: String,
    },

    #[error("No alignment found after the header")]
    NoAlignment,

    #[error("Must have at least one sequence")]
    NoSequences,

    #[error("Non-empty sequences are required")]
    EmptySequences,

    #[error("Consensus annotation has length {found}, alignment has {columns} columns")]
    InvalidConsensus { columns: usize, found: usize },

    #[error(transparent)]
    Alignment(#[from] AlignmentError),
}

impl ClustalError {
    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClustalError::IoError(_) => ErrorKind::Io,
            ClustalError::BadSequenceNumber(_) | ClustalError::InvalidSequenceNumber { .. } => {
                ErrorKind::Checksum
            }
            ClustalError::NoSequences
            | ClustalError::EmptySequences
            | ClustalError::InvalidConsensus { .. } => ErrorKind::Precondition,
            _ => ErrorKind::Structural,
        }
    }
}

/// Result type for CLUSTAL operations.
pub type ClustalResult<T> = Result<T, ClustalError>;

/// One record line of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataLine<'a> {
    Pair {
        id: &'a str,
        segment: &'a str,
    },
    Counted {
        id: &'a str,
        segment: &'a str,
        letters: usize,
    },
}

impl<'a> DataLine<'a> {
    fn parse(line: &'a str) -> ClustalResult<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match *fields.as_slice() {
            [id, segment] => Ok(DataLine::Pair { id, segment }),
            [id, segment, letters] => {
                let letters = letters
                    .parse::<usize>()
                    .map_err(|_| ClustalError::BadSequenceNumber(line.to_string()))?;
                Ok(DataLine::Counted {
                    id,
                    segment,
                    letters,
                })
            }
            _ => Err(ClustalError::FieldCount(line.to_string())),
        }
    }

    fn id(&self) -> &'a str {
        match *self {
            DataLine::Pair { id, .. } | DataLine::Counted { id, .. } => id,
        }
    }

    fn segment(&self) -> &'a str {
        match *self {
            DataLine::Pair { segment, .. } | DataLine::Counted { segment, .. } => segment,
        }
    }

    fn letters(&self) -> Option<usize> {
        match *self {
            DataLine::Pair { .. } => None,
            DataLine::Counted { letters, .. } => Some(letters),
        }
    }
}

/// How the first block ended.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BlockEnd {
    /// A consensus line; holds its segment
    Consensus(String),
    /// A blank line with no consensus line before it
    Blank,
    /// The stream ran out
    EndOfStream,
}

/// Bookkeeping shared by all blocks of one alignment.
#[derive(Debug, Default)]
struct BlockState {
    ids: Vec<String>,
    ungapped: Vec<String>,
    gapped: Vec<String>,
    consensus: String,
    /// Column where sequence data starts, fixed by the first record line
    data_offset: Option<usize>,
    /// Length of the most recent aligned segment
    segment_len: usize,
}

impl BlockState {
    fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Adds a record from the first block.
    fn push_record(&mut self, data: DataLine<'_>, line: &str) -> ClustalResult<()> {
        let id = data.id();
        let segment = data.segment();
        if self.data_offset.is_none() {
            let offset = line
                .get(id.len()..)
                .and_then(|rest| rest.find(segment))
                .map_or(id.len(), |pos| pos + id.len());
            self.data_offset = Some(offset);
        }

        self.ids.push(id.to_string());
        self.gapped.push(segment.to_string());
        self.ungapped.push(strip_gaps(segment));
        self.segment_len = segment.len();
        self.check_letters(self.ids.len() - 1, data, line)
    }

    /// Appends a later-block segment to the record at `index`.
    fn extend_record(&mut self, index: usize, data: DataLine<'_>, line: &str) -> ClustalResult<()> {
        let expected = &self.ids[index];
        if data.id() != expected.as_str() {
            return Err(ClustalError::IdentifierMismatch {
                expected: expected.clone(),
                line: line.to_string(),
            });
        }

        let segment = data.segment();
        self.gapped[index].push_str(segment);
        self.ungapped[index].push_str(&strip_gaps(segment));
        self.segment_len = segment.len();
        self.check_letters(index, data, line)
    }

    fn check_letters(&self, index: usize, data: DataLine<'_>, line: &str) -> ClustalResult<()> {
        let Some(letters) = data.letters() else {
            return Ok(());
        };
        let found = self.ungapped[index].len();
        if found != letters {
            return Err(ClustalError::InvalidSequenceNumber {
                line: line.to_string(),
                found,
            });
        }
        Ok(())
    }

    /// Cuts the consensus segment out of a space-leading line.
    fn consensus_segment(&self, line: &str) -> ClustalResult<String> {
        let offset = self
            .data_offset
            .ok_or_else(|| ClustalError::ConsensusBeforeSequences(line.to_string()))?;
        let mut segment: String = line
            .get(offset..)
            .unwrap_or("")
            .chars()
            .take(self.segment_len)
            .collect();
        // editors tend to trim trailing blanks
        while segment.len() < self.segment_len {
            segment.push(' ');
        }
        Ok(segment)
    }

    fn into_alignment(self, program: Option<String>, version: Option<String>) -> ClustalResult<Alignment> {
        let width = self.gapped.first().map_or(0, String::len);
        for (id, row) in self.ids.iter().zip(&self.gapped) {
            if row.len() != width {
                return Err(ClustalError::InconsistentLength {
                    id: id.clone(),
                    expected: width,
                    found: row.len(),
                });
            }
        }
        if !self.consensus.is_empty() && self.consensus.len() != width {
            return Err(ClustalError::ConsensusLength {
                columns: width,
                found: self.consensus.len(),
                consensus: self.consensus,
            });
        }

        let coordinates = infer_coordinates(&self.gapped).map_err(AlignmentError::from)?;
        let sequences = self
            .ids
            .into_iter()
            .zip(self.ungapped)
            .map(|(id, data)| Sequence::new(id, data))
            .collect();

        let mut alignment = Alignment::new(sequences, coordinates)?;
        if !self.consensus.is_empty() {
            alignment.set_consensus(self.consensus);
        }
        alignment.program = program;
        alignment.version = version;
        Ok(alignment)
    }
}

fn strip_gaps(segment: &str) -> String {
    segment.chars().filter(|&c| c != GAP as char).collect()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns true if the first token of `line` is a known program name.
pub fn is_header_line(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|word| KNOWN_PROGRAMS.contains(&word))
}

fn log_layout(state: &BlockState) {
    debug!(
        "CLUSTAL block layout: {} sequences, data at column {}, {} columns per block",
        state.ids.len(),
        state.data_offset.unwrap_or(0),
        state.segment_len
    );
}

/// Parses a header line into `(program, version)`.
fn parse_header(line: &str) -> ClustalResult<(String, Option<String>)> {
    let program = line
        .split_whitespace()
        .next()
        .ok_or_else(|| ClustalError::InvalidHeader(line.to_string()))?;
    if !KNOWN_PROGRAMS.contains(&program) {
        return Err(ClustalError::UnknownProgram {
            program: program.to_string(),
        });
    }

    let version = line
        .split_whitespace()
        .map(|word| {
            word.strip_prefix('(')
                .and_then(|w| w.strip_suffix(')'))
                .unwrap_or(word)
        })
        .find(|word| word.starts_with(|c: char| c.is_ascii_digit()))
        .map(str::to_string);

    Ok((program.to_string(), version))
}

/// Streaming reader yielding one alignment per CLUSTAL document.
pub struct ClustalReader<R: BufRead> {
    reader: R,
    /// Whether the first line of the stream has been consumed
    started: bool,
    /// Header of the next document, met while draining the previous one
    pending_header: Option<String>,
    program: Option<String>,
    version: Option<String>,
}

impl ClustalReader<BufReader<File>> {
    /// Opens a CLUSTAL file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> ClustalResult<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ClustalReader<R> {
    /// Creates a reader over a line-oriented source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            started: false,
            pending_header: None,
            program: None,
            version: None,
        }
    }

    /// Program named by the most recently read header.
    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    /// Version named by the most recently read header.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Reads one line into `buf` without its terminator.
    /// Returns `false` at end of stream.
    fn read_line(&mut self, buf: &mut String) -> ClustalResult<bool> {
        buf.clear();
        if self.reader.read_line(buf)? == 0 {
            return Ok(false);
        }
        let len = buf.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
        buf.truncate(len);
        Ok(true)
    }

    /// Reads the next alignment.
    ///
    /// Returns `Ok(None)` once the stream holds no further document.
    pub fn read_alignment(&mut self) -> ClustalResult<Option<Alignment>> {
        let header = match self.pending_header.take() {
            Some(line) => line,
            None if !self.started => {
                self.started = true;
                let mut line = String::new();
                if !self.read_line(&mut line)? {
                    return Err(ClustalError::EmptyFile);
                }
                line
            }
            None => return Ok(None),
        };

        let (program, version) = parse_header(&header)?;
        self.program = Some(program.clone());
        self.version = version.clone();

        let mut state = BlockState::default();
        let mut line = String::new();
        match self.read_first_block(&mut state, &mut line)? {
            BlockEnd::EndOfStream if state.is_empty() => return Ok(None),
            BlockEnd::EndOfStream => {}
            BlockEnd::Consensus(segment) => {
                state.consensus.push_str(&segment);
                self.read_later_blocks(&mut state, &mut line)?;
            }
            BlockEnd::Blank => self.read_later_blocks(&mut state, &mut line)?,
        }

        let alignment = state.into_alignment(Some(program), version)?;
        debug!(
            "Read CLUSTAL alignment: {} sequences, {} columns",
            alignment.sequence_count(),
            alignment.alignment_length()
        );
        Ok(Some(alignment))
    }

    /// Reads the first block, which fixes identifiers and layout.
    fn read_first_block(&mut self, state: &mut BlockState, line: &mut String) -> ClustalResult<BlockEnd> {
        while self.read_line(line)? {
            if state.is_empty() && is_blank(line) {
                // header padding
                continue;
            }

            if line.starts_with(' ') {
                let segment = state.consensus_segment(line)?;
                log_layout(state);
                return Ok(BlockEnd::Consensus(segment));
            }
            if is_blank(line) {
                log_layout(state);
                return Ok(BlockEnd::Blank);
            }

            let data = DataLine::parse(line)?;
            state.push_record(data, line)?;
        }
        Ok(BlockEnd::EndOfStream)
    }

    /// Reads the remaining blocks, replaying the first block's record order.
    fn read_later_blocks(&mut self, state: &mut BlockState, line: &mut String) -> ClustalResult<()> {
        let n = state.ids.len();
        let mut index = 0;

        while self.read_line(line)? {
            if line.starts_with(' ') {
                let segment = state.consensus_segment(line)?;
                state.consensus.push_str(&segment);
                continue;
            }
            if is_blank(line) {
                continue;
            }

            if index == 0
                && is_header_line(line)
                && line.split_whitespace().next() != Some(state.ids[0].as_str())
            {
                self.pending_header = Some(line.clone());
                break;
            }

            let data = DataLine::parse(line)?;
            state.extend_record(index, data, line)?;
            index = (index + 1) % n;
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for ClustalReader<R> {
    type Item = ClustalResult<Alignment>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_alignment().transpose()
    }
}

/// Parses every alignment of a CLUSTAL stream.
pub fn parse_clustal<R: BufRead>(reader: R) -> ClustalResult<Vec<Alignment>> {
    let alignments = ClustalReader::new(reader).collect::<ClustalResult<Vec<_>>>()?;
    if alignments.is_empty() {
        return Err(ClustalError::NoAlignment);
    }
    Ok(alignments)
}

/// Parses a single CLUSTAL alignment from a string.
///
/// Useful for testing or processing in-memory data.
pub fn parse_clustal_str(content: &str) -> ClustalResult<Alignment> {
    ClustalReader::new(content.as_bytes())
        .read_alignment()?
        .ok_or(ClustalError::NoAlignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BLOCKS: &str = "CLUSTAL W (1.83) multiple sequence alignment


alpha     ACGTACGTAC 10
beta      ACGT--GTAC 8
          ****  ****

alpha     GGCC 14
beta      GG-C 11
          ** *
";

    #[test]
    fn test_parse_single_block() {
        let content = "CLUSTAL W (1.83) multiple sequence alignment


seq1      AC-GT 4
seq2      ACTG- 4
          **  .
";
        let alignment = parse_clustal_str(content).unwrap();
        assert_eq!(alignment.shape(), (2, 5));
        assert_eq!(alignment.get(0).unwrap().id.as_deref(), Some("seq1"));
        assert_eq!(alignment.get(0).unwrap().data, "ACGT");
        assert_eq!(alignment.get(1).unwrap().data, "ACTG");
        assert_eq!(alignment.gapped(0).as_deref(), Some("AC-GT"));
        assert_eq!(alignment.gapped(1).as_deref(), Some("ACTG-"));
        assert_eq!(alignment.consensus(), Some("**  ."));
        assert_eq!(alignment.program.as_deref(), Some("CLUSTAL"));
        assert_eq!(alignment.version.as_deref(), Some("1.83"));
    }

    #[test]
    fn test_parse_two_blocks() {
        let alignment = parse_clustal_str(TWO_BLOCKS).unwrap();
        assert_eq!(alignment.shape(), (2, 14));
        assert_eq!(alignment.get(0).unwrap().data, "ACGTACGTACGGCC");
        assert_eq!(alignment.get(1).unwrap().data, "ACGTGTACGGC");
        assert_eq!(alignment.gapped(1).as_deref(), Some("ACGT--GTACGG-C"));
        assert_eq!(alignment.consensus(), Some("****  ****** *"));
    }

    #[test]
    fn test_parse_without_consensus() {
        let content = "CLUSTAL W (1.83) multiple sequence alignment

seq1 ACGT
seq2 AC-T

seq1 GG
seq2 -G
";
        let alignment = parse_clustal_str(content).unwrap();
        assert_eq!(alignment.shape(), (2, 6));
        assert_eq!(alignment.gapped(1).as_deref(), Some("AC-T-G"));
        assert_eq!(alignment.get(1).unwrap().data, "ACTG");
        assert!(alignment.consensus().is_none());
    }

    #[test]
    fn test_single_block_without_trailing_newline() {
        let content = "MUSCLE (3.8) multiple sequence alignment\n\n\nseq1 ACGT\nseq2 ACGA";
        let alignment = parse_clustal_str(content).unwrap();
        assert_eq!(alignment.shape(), (2, 4));
        assert_eq!(alignment.program.as_deref(), Some("MUSCLE"));
        assert_eq!(alignment.version.as_deref(), Some("3.8"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "CLUSTAL W (1.83) multiple sequence alignment\r\n\r\n\r\nseq1 AC-GT\r\nseq2 ACTG-\r\n     ***  \r\n";
        let alignment = parse_clustal_str(content).unwrap();
        assert_eq!(alignment.shape(), (2, 5));
        assert_eq!(alignment.consensus(), Some("***  "));
    }

    #[test]
    fn test_trimmed_consensus_is_padded() {
        let content = "CLUSTAL\n\nseq1 ACGTA\nseq2 ACGTC\n     ****\n";
        let alignment = parse_clustal_str(content).unwrap();
        assert_eq!(alignment.consensus(), Some("**** "));
        assert!(alignment.version.is_none());
    }

    #[test]
    fn test_header_versions() {
        assert_eq!(
            parse_header("CLUSTAL W (1.83) multiple sequence alignment").unwrap(),
            ("CLUSTAL".to_string(), Some("1.83".to_string()))
        );
        assert_eq!(
            parse_header("Kalign (2.0) alignment in ClustalW format").unwrap(),
            ("Kalign".to_string(), Some("2.0".to_string()))
        );
        assert_eq!(
            parse_header("PROBCONS version 1.12 multiple sequence alignment").unwrap(),
            ("PROBCONS".to_string(), Some("1.12".to_string()))
        );
        assert_eq!(
            parse_header("CLUSTAL O(1.2.4) multiple sequence alignment").unwrap(),
            ("CLUSTAL".to_string(), None)
        );
    }

    #[test]
    fn test_unknown_program() {
        let content = "FOOALIGN 1.0 multiple sequence alignment\n\n\nseq1 ACGT\n";
        let result = parse_clustal_str(content);
        assert!(matches!(
            result,
            Err(ClustalError::UnknownProgram { ref program }) if program == "FOOALIGN"
        ));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_program_names_are_case_sensitive() {
        assert!(matches!(
            parse_header("clustal W (1.83)"),
            Err(ClustalError::UnknownProgram { .. })
        ));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse_clustal_str(""), Err(ClustalError::EmptyFile)));
        assert!(matches!(parse_clustal_str("\n\n"), Err(ClustalError::InvalidHeader(_))));
    }

    #[test]
    fn test_header_only() {
        let content = "CLUSTAL W (1.83) multiple sequence alignment\n\n\n";
        let mut reader = ClustalReader::new(content.as_bytes());
        assert!(reader.read_alignment().unwrap().is_none());
        assert_eq!(reader.program(), Some("CLUSTAL"));
        assert!(matches!(parse_clustal_str(content), Err(ClustalError::NoAlignment)));
    }

    #[test]
    fn test_four_fields_rejected() {
        let content = "CLUSTAL\n\nseq1 ACGT 4 extra\nseq2 ACGT 4\n";
        let result = parse_clustal_str(content);
        assert!(matches!(result, Err(ClustalError::FieldCount(ref line)) if line == "seq1 ACGT 4 extra"));
    }

    #[test]
    fn test_single_field_rejected() {
        let content = "CLUSTAL\n\nseq1 ACGT\nseq2\n";
        assert!(matches!(parse_clustal_str(content), Err(ClustalError::FieldCount(_))));
    }

    #[test]
    fn test_bad_sequence_number() {
        let content = "CLUSTAL\n\nseq1 ACGT four\n";
        let result = parse_clustal_str(content);
        assert!(matches!(result, Err(ClustalError::BadSequenceNumber(_))));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Checksum);
    }

    #[test]
    fn test_invalid_sequence_number() {
        let content = "CLUSTAL\n\nseq1 AC-GT 5\n";
        assert!(matches!(
            parse_clustal_str(content),
            Err(ClustalError::InvalidSequenceNumber { found: 4, .. })
        ));
    }

    #[test]
    fn test_sequence_number_is_cumulative() {
        let content = "CLUSTAL\n\nseq1 ACGT 4\nseq2 AC-T 3\n\nseq1 GG 6\nseq2 G- 3\n";
        assert!(matches!(
            parse_clustal_str(content),
            Err(ClustalError::InvalidSequenceNumber { found: 4, .. })
        ));
    }

    #[test]
    fn test_identifier_mismatch_in_later_block() {
        let content = "CLUSTAL W\n\nseq1 ACGT\nseq2 ACGT\n\nseq2 AAAA\nseq1 CCCC\n";
        let result = parse_clustal_str(content);
        assert!(matches!(
            result,
            Err(ClustalError::IdentifierMismatch { ref expected, ref line })
                if expected == "seq1" && line == "seq2 AAAA"
        ));
    }

    #[test]
    fn test_inconsistent_lengths() {
        let content = "CLUSTAL\n\nseq1 ACGT\nseq2 ACG\n";
        assert!(matches!(
            parse_clustal_str(content),
            Err(ClustalError::InconsistentLength { ref id, expected: 4, found: 3 }) if id == "seq2"
        ));
    }

    #[test]
    fn test_consensus_length_mismatch() {
        let content = "CLUSTAL\n\nseq1 ACGT\nseq2 ACGT\n     ****\n\nseq1 AA\nseq2 AA\n";
        assert!(matches!(
            parse_clustal_str(content),
            Err(ClustalError::ConsensusLength { columns: 6, found: 4, .. })
        ));
    }

    #[test]
    fn test_consensus_before_sequences() {
        let content = "CLUSTAL\n\n     ****\nseq1 ACGT\n";
        assert!(matches!(
            parse_clustal_str(content),
            Err(ClustalError::ConsensusBeforeSequences(_))
        ));
    }

    #[test]
    fn test_duplicate_identifiers_kept_apart() {
        let content = "CLUSTAL\n\na AC\na GT\nb TT\n\na CC\na AA\nb GG\n";
        let alignment = parse_clustal_str(content).unwrap();
        assert_eq!(alignment.sequence_count(), 3);
        assert_eq!(alignment.get(0).unwrap().data, "ACCC");
        assert_eq!(alignment.get(1).unwrap().data, "GTAA");
        assert_eq!(alignment.get(2).unwrap().data, "TTGG");
    }

    #[test]
    fn test_data_offset_skips_identifier() {
        // the segment text also occurs inside the identifier
        let content = "CLUSTAL\n\nACGT   ACGT\nxx     ACGA\n       *** \n";
        let alignment = parse_clustal_str(content).unwrap();
        assert_eq!(alignment.consensus(), Some("*** "));
    }

    #[test]
    fn test_concatenated_documents() {
        let content = "CLUSTAL W (1.83) multiple sequence alignment

a ACGT
b AC-T

CLUSTAL W (2.1) multiple sequence alignment

x GGGG
y GG-G
";
        let mut reader = ClustalReader::new(content.as_bytes());
        let first = reader.read_alignment().unwrap().unwrap();
        assert_eq!(first.get(0).unwrap().id.as_deref(), Some("a"));
        assert_eq!(first.version.as_deref(), Some("1.83"));

        let second = reader.read_alignment().unwrap().unwrap();
        assert_eq!(second.get(1).unwrap().data, "GGG");
        assert_eq!(second.version.as_deref(), Some("2.1"));
        assert_eq!(reader.version(), Some("2.1"));

        assert!(reader.read_alignment().unwrap().is_none());
        assert!(reader.read_alignment().unwrap().is_none());
    }

    #[test]
    fn test_iterator_and_parse_clustal() {
        let alignments: Vec<Alignment> = ClustalReader::new(TWO_BLOCKS.as_bytes())
            .collect::<ClustalResult<_>>()
            .unwrap();
        assert_eq!(alignments.len(), 1);

        let alignments = parse_clustal(TWO_BLOCKS.as_bytes()).unwrap();
        assert_eq!(alignments[0].sequence_count(), 2);
    }
}
