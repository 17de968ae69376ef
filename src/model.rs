//! Data model for multiple sequence alignments.
//!
//! An [`Alignment`] keeps its records ungapped and describes the gap layout
//! with a [`CoordinateTable`]. Gapped rows are rebuilt on demand, which keeps
//! readers and writers of different formats independent of each other.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::coordinates::{infer_coordinates, CoordinateError, CoordinateTable, GAP};

/// Column annotation key holding the CLUSTAL consensus line.
pub const CONSENSUS_KEY: &str = "clustal_consensus";

/// Errors raised when assembling an alignment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("Coordinate table describes {rows} records, but {records} were given")]
    RecordCountMismatch { rows: usize, records: usize },

    #[error("Record {index} has {found} residues, coordinates expect {expected}")]
    SequenceLengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Coordinates(#[from] CoordinateError),
}

/// Represents a single ungapped sequence with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier, if the record has one
    pub id: Option<String>,
    /// The residues, gap characters removed
    pub data: String,
}

impl Sequence {
    /// Creates a new named sequence.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            data: data.into(),
        }
    }

    /// Creates a sequence without an identifier.
    pub fn anonymous(data: impl Into<String>) -> Self {
        Self {
            id: None,
            data: data.into(),
        }
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the identifier or an empty string.
    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }
}

/// Represents an alignment of multiple sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// All records, ungapped, in file order
    pub sequences: Vec<Sequence>,
    /// Gap layout of the records
    pub coordinates: CoordinateTable,
    /// Per-column annotations, each as long as the alignment is wide
    pub column_annotations: BTreeMap<String, String>,
    /// Program that produced the alignment
    pub program: Option<String>,
    /// Version of that program
    pub version: Option<String>,
}

impl Alignment {
    /// Creates an alignment from ungapped records and their coordinates.
    pub fn new(sequences: Vec<Sequence>, coordinates: CoordinateTable) -> Result<Self, AlignmentError> {
        if coordinates.record_count() != sequences.len() {
            return Err(AlignmentError::RecordCountMismatch {
                rows: coordinates.record_count(),
                records: sequences.len(),
            });
        }
        for (index, seq) in sequences.iter().enumerate() {
            let expected = coordinates.ungapped_len(index).unwrap_or(0);
            if seq.len() != expected {
                return Err(AlignmentError::SequenceLengthMismatch {
                    index,
                    expected,
                    found: seq.len(),
                });
            }
        }

        Ok(Self {
            sequences,
            coordinates,
            column_annotations: BTreeMap::new(),
            program: None,
            version: None,
        })
    }

    /// Creates an alignment from identifiers and gapped rows of equal length.
    pub fn from_gapped<I, S>(ids: I, gapped: &[S]) -> Result<Self, AlignmentError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
        S: AsRef<str>,
    {
        let coordinates = infer_coordinates(
            &gapped.iter().map(|row| row.as_ref().as_bytes()).collect::<Vec<_>>(),
        )?;
        let sequences = ids
            .into_iter()
            .zip(gapped)
            .map(|(id, row)| Sequence::new(id, row.as_ref().replace(GAP as char, "")))
            .collect();
        Self::new(sequences, coordinates)
    }

    /// Sets the provenance strings.
    pub fn with_provenance(mut self, program: impl Into<String>, version: Option<String>) -> Self {
        self.program = Some(program.into());
        self.version = version;
        self
    }

    /// Returns `(record_count, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.sequence_count(), self.alignment_length())
    }

    /// Returns the number of sequences.
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Returns the number of alignment columns.
    pub fn alignment_length(&self) -> usize {
        self.coordinates.width()
    }

    /// Gets a sequence by index.
    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.sequences.get(index)
    }

    /// Returns true if the alignment has no records.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Rebuilds the gapped row of one record.
    pub fn gapped(&self, index: usize) -> Option<String> {
        let seq = self.sequences.get(index)?;
        let row = self.coordinates.gapped_row(index, seq.as_bytes())?;
        Some(String::from_utf8_lossy(&row).into_owned())
    }

    /// Rebuilds every gapped row, in record order.
    pub fn gapped_rows(&self) -> Vec<String> {
        (0..self.sequence_count())
            .filter_map(|index| self.gapped(index))
            .collect()
    }

    /// Returns the CLUSTAL consensus annotation, if any.
    pub fn consensus(&self) -> Option<&str> {
        self.column_annotations.get(CONSENSUS_KEY).map(String::as_str)
    }

    /// Stores the CLUSTAL consensus annotation.
    pub fn set_consensus(&mut self, consensus: impl Into<String>) {
        self.column_annotations
            .insert(CONSENSUS_KEY.to_string(), consensus.into());
    }
}
