//! clustalio - CLUSTAL alignment converter
//!
//! ## Usage
//!
//! ```bash
//! clustalio <alignment_file>                 # re-wrap as CLUSTAL on stdout
//! clustalio -t fasta -o out.fasta in.aln     # CLUSTAL to aligned FASTA
//! clustalio -f fasta --program MUSCLE in.txt # force input format
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use clustalio::formats::{read_file_with_options, write_alignments, FileFormat};

/// Input format specification for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// CLUSTAL format
    Clustal,
    /// Aligned FASTA format
    Fasta,
    /// Auto-detect from extension and content
    Auto,
}

impl From<FormatArg> for Option<FileFormat> {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Clustal => Some(FileFormat::Clustal),
            FormatArg::Fasta => Some(FileFormat::Fasta),
            FormatArg::Auto => None,
        }
    }
}

/// Output format specification for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputArg {
    /// CLUSTAL format
    Clustal,
    /// Aligned FASTA format
    Fasta,
}

impl From<OutputArg> for FileFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Clustal => FileFormat::Clustal,
            OutputArg::Fasta => FileFormat::Fasta,
        }
    }
}

/// clustalio - read, re-wrap and convert CLUSTAL alignments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Alignment file (CLUSTAL or aligned FASTA)
    file: PathBuf,

    /// Force a specific input format (overrides auto-detection)
    #[arg(short = 'f', long = "format", value_enum, default_value = "auto")]
    format: FormatArg,

    /// Output file. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output: String,

    /// Output format
    #[arg(short = 't', long = "to", value_enum, default_value = "clustal")]
    to: OutputArg,

    /// Program name written in the CLUSTAL header
    #[arg(long = "program")]
    program: Option<String>,

    /// Program version written in the CLUSTAL header
    #[arg(long = "program-version", requires = "program")]
    program_version: Option<String>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Some(program) = &args.program {
        if program.chars().any(char::is_whitespace) {
            anyhow::bail!("Program name must be a single word (got '{}')", program);
        }
    }

    let mut alignments = read_file_with_options(&args.file, args.format.into())
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    log::info!(
        "Read {} alignment(s) from {}",
        alignments.len(),
        args.file.display()
    );

    if let Some(program) = &args.program {
        for alignment in &mut alignments {
            alignment.program = Some(program.clone());
            alignment.version = args.program_version.clone();
        }
    }

    let format: FileFormat = args.to.into();
    if args.output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_alignments(&mut handle, format, &alignments)?;
        handle.flush()?;
    } else {
        let mut file = io::BufWriter::new(std::fs::File::create(&args.output)?);
        write_alignments(&mut file, format, &alignments)?;
        log::info!(
            "Wrote {} alignment(s) to {} as {}",
            alignments.len(),
            args.output,
            format
        );
    }

    Ok(())
}
