//! # clustalio - CLUSTAL Alignment I/O
//!
//! Reads and writes the blocked multiple sequence alignment format produced
//! by CLUSTAL W and compatible tools.
//!
//! ## Architecture
//!
//! Reading and writing are independent and only share the alignment model:
//! - `model`: Sequences and alignments (ungapped records plus coordinates)
//! - `coordinates`: Inference of the run-length coordinate table from gapped rows
//! - `formats::clustal`: Multi-block CLUSTAL reader
//! - `formats::clustal_writer`: CLUSTAL writer (36 column labels, 50 column blocks)
//! - `formats::fasta`: Aligned FASTA, the other end of the converter
//!
//! ## Example
//!
//! ```
//! use clustalio::formats::clustal::parse_clustal_str;
//!
//! let content = "CLUSTAL W (1.83) multiple sequence alignment\n\n\n\
//!                seq1      AC-GT\n\
//!                seq2      ACTG-\n";
//! let alignment = parse_clustal_str(content).unwrap();
//! assert_eq!(alignment.shape(), (2, 5));
//! assert_eq!(alignment.get(0).unwrap().data, "ACGT");
//! ```

pub mod coordinates;
pub mod formats;
pub mod model;
