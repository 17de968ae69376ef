//! Alignment coordinate inference.
//!
//! A gapped alignment is stored as ungapped sequences plus a compact
//! coordinate table. The table splits the alignment columns into steps; inside
//! a step every record is either all residues or all gaps, so a step can be
//! described by one ungapped offset range per record.
//!
//! ```text
//! columns   0 1 2 3 4
//! seq1      A C - G T      steps: [0,2) [2,3) [3,4) [4,5)
//! seq2      A C T G -      seq1:  0..2  gap@2 2..3  3..4
//!                          seq2:  0..2  2..3  3..4  gap@4
//! ```

use std::ops::Range;

use thiserror::Error;

/// The gap symbol used in gapped sequences.
pub const GAP: u8 = b'-';

/// Errors that can occur while inferring coordinates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("Gapped sequence {index} has length {found}, expected {expected}")]
    UnequalLength {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type for coordinate operations.
pub type CoordinateResult<T> = Result<T, CoordinateError>;

/// What one record contributes to a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Residues covering this ungapped range.
    Residues(Range<usize>),
    /// Gap columns only; the record sits at this ungapped offset.
    Gap(usize),
}

impl Span {
    /// Number of residues covered.
    pub fn len(&self) -> usize {
        match self {
            Span::Residues(range) => range.len(),
            Span::Gap(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A run of columns with a constant gap/residue pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Column range `[start, end)` in the gapped alignment.
    pub columns: Range<usize>,
    /// One span per record, in record order.
    pub spans: Vec<Span>,
}

/// Run-length encoded mapping from alignment columns to ungapped offsets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoordinateTable {
    /// Step boundaries: `columns[s]..columns[s + 1]` is step `s`.
    /// Empty when the alignment has no columns.
    columns: Vec<usize>,
    /// Per record, the ungapped offset at every boundary.
    offsets: Vec<Vec<usize>>,
}

impl CoordinateTable {
    /// Returns the number of alignment columns covered.
    pub fn width(&self) -> usize {
        self.columns.last().copied().unwrap_or(0)
    }

    /// Returns the number of records described by the table.
    pub fn record_count(&self) -> usize {
        self.offsets.len()
    }

    /// Returns the number of steps.
    pub fn step_count(&self) -> usize {
        self.columns.len().saturating_sub(1)
    }

    /// Returns the step boundaries as column indices.
    pub fn boundaries(&self) -> &[usize] {
        &self.columns
    }

    /// Returns the ungapped offsets of one record at every step boundary.
    pub fn offsets(&self, record: usize) -> Option<&[usize]> {
        self.offsets.get(record).map(Vec::as_slice)
    }

    /// Returns the number of residues a record contributes to the alignment.
    pub fn ungapped_len(&self, record: usize) -> Option<usize> {
        self.offsets
            .get(record)
            .map(|row| row.last().copied().unwrap_or(0))
    }

    /// Gets a single step by index.
    pub fn step(&self, index: usize) -> Option<Step> {
        if index >= self.step_count() {
            return None;
        }
        let columns = self.columns[index]..self.columns[index + 1];
        let spans = self
            .offsets
            .iter()
            .map(|row| {
                let (start, end) = (row[index], row[index + 1]);
                if start == end {
                    Span::Gap(start)
                } else {
                    Span::Residues(start..end)
                }
            })
            .collect();
        Some(Step { columns, spans })
    }

    /// Iterates over all steps in column order.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        (0..self.step_count()).filter_map(move |index| self.step(index))
    }

    /// Rebuilds the gapped row of a record from its ungapped residues.
    ///
    /// Returns `None` if the record does not exist or `ungapped` is shorter
    /// than the table expects.
    pub fn gapped_row(&self, record: usize, ungapped: &[u8]) -> Option<Vec<u8>> {
        let row = self.offsets.get(record)?;
        if row.last().copied().unwrap_or(0) > ungapped.len() {
            return None;
        }

        let mut gapped = Vec::with_capacity(self.width());
        for step in 0..self.step_count() {
            let (start, end) = (row[step], row[step + 1]);
            if start == end {
                let width = self.columns[step + 1] - self.columns[step];
                gapped.extend(std::iter::repeat(GAP).take(width));
            } else {
                gapped.extend_from_slice(&ungapped[start..end]);
            }
        }
        Some(gapped)
    }
}

/// Infers the coordinate table of a set of gapped rows.
///
/// A new step starts at every column whose gap/residue pattern (taken over
/// all records) differs from the previous column. Runs where the pattern
/// stays constant collapse into one step, mixed or not.
pub fn infer_coordinates<S: AsRef<[u8]>>(rows: &[S]) -> CoordinateResult<CoordinateTable> {
    let width = rows.first().map_or(0, |row| row.as_ref().len());
    for (index, row) in rows.iter().enumerate() {
        let found = row.as_ref().len();
        if found != width {
            return Err(CoordinateError::UnequalLength {
                index,
                expected: width,
                found,
            });
        }
    }

    let n = rows.len();
    let mut columns = Vec::new();
    let mut offsets: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut counters = vec![0usize; n];
    let mut previous = vec![false; n];
    let mut current = vec![false; n];

    for col in 0..width {
        for (state, row) in current.iter_mut().zip(rows) {
            *state = row.as_ref()[col] != GAP;
        }

        if col == 0 || current != previous {
            columns.push(col);
            for (row, &count) in offsets.iter_mut().zip(&counters) {
                row.push(count);
            }
            std::mem::swap(&mut previous, &mut current);
        }

        for (count, &residue) in counters.iter_mut().zip(&previous) {
            if residue {
                *count += 1;
            }
        }
    }

    if width > 0 {
        columns.push(width);
        for (row, &count) in offsets.iter_mut().zip(&counters) {
            row.push(count);
        }
    }

    Ok(CoordinateTable { columns, offsets })
}
