//! Shared plumbing for the `encode` and `decode` binaries: argument checking,
//! file handling and exit codes.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::codec::{self, DecodeSummary, EncodeSummary};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("wrong number of args\nUsage: {program} <input_file> <output_file>")]
    Usage { program: String },

    #[error("couldn't open {} for reading: {source}", .path.display())]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("couldn't open {} for writing: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not a valid compressed file: {source}", .path.display())]
    Format {
        path: PathBuf,
        source: crate::Error,
    },
}

impl CliError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage { .. } => 1,
            CliError::Input { .. } => 2,
            CliError::Output { .. } => 3,
            CliError::Format { .. } => 4,
        }
    }
}

/// Input and output paths given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Args {
    /// Accepts exactly two positional arguments after the program name.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| "huffpack".to_string());
        let rest: Vec<String> = args.collect();
        match <[String; 2]>::try_from(rest) {
            Ok([input, output]) => Ok(Self {
                input: input.into(),
                output: output.into(),
            }),
            Err(_) => Err(CliError::Usage { program }),
        }
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    info!("Reading input file: {}", path.display());
    let data = fs::read(path).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Total file size: {} bytes", data.len());
    Ok(data)
}

fn create_output(path: &Path) -> Result<BufWriter<File>, CliError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| CliError::Output {
            path: path.to_path_buf(),
            source,
        })
}

/// Compresses `args.input` into `args.output`.
pub fn run_encode(args: &Args) -> Result<EncodeSummary, CliError> {
    let data = read_input(&args.input)?;
    let output = create_output(&args.output)?;
    info!("Writing encoded output to file: {}", args.output.display());
    codec::encode(&data, output).map_err(|e| write_error(&args.output, e))
}

/// Expands `args.input` into `args.output`.
pub fn run_decode(args: &Args) -> Result<DecodeSummary, CliError> {
    let data = read_input(&args.input)?;
    let output = create_output(&args.output)?;
    info!("Writing decoded output to file: {}", args.output.display());
    codec::decode(&data[..], output).map_err(|e| {
        if e.is_format_error() {
            CliError::Format {
                path: args.input.clone(),
                source: e,
            }
        } else {
            write_error(&args.output, e)
        }
    })
}

/// The input is already in memory, so the only I/O left to fail is the output.
fn write_error(path: &Path, e: crate::Error) -> CliError {
    let source = match e {
        crate::Error::Io(source) => source,
        other => std::io::Error::other(other),
    };
    CliError::Output {
        path: path.to_path_buf(),
        source,
    }
}

/// Space saved relative to `original`, in percent.
pub fn ratio(original: u64, compressed: u64) -> f64 {
    if original > 0 {
        100.0 * (1.0 - (compressed as f64) / (original as f64))
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn two_paths_are_accepted() {
        let parsed = Args::parse(args(&["encode", "in.txt", "out.huf"])).unwrap();
        assert_eq!(parsed.input, PathBuf::from("in.txt"));
        assert_eq!(parsed.output, PathBuf::from("out.huf"));
    }

    #[test_case(&["encode"]; "no paths")]
    #[test_case(&["encode", "in.txt"]; "one path")]
    #[test_case(&["encode", "a", "b", "c"]; "three paths")]
    #[test_case(&[]; "no program name")]
    fn wrong_argument_count_is_a_usage_error(list: &[&str]) {
        let err = Args::parse(args(list)).unwrap_err();
        assert!(matches!(err, CliError::Usage { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_input_exits_with_two() {
        let args = Args {
            input: PathBuf::from("/nonexistent/huffpack/input"),
            output: std::env::temp_dir().join("huffpack-cli-unused.out"),
        };
        let err = run_encode(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("/nonexistent/huffpack/input"));
    }

    #[test]
    fn format_errors_exit_with_four() {
        let err = CliError::Format {
            path: PathBuf::from("x.huf"),
            source: crate::Error::TruncatedHeader,
        };
        assert_eq!(err.exit_code(), 4);
    }

    #[test_case(100, 25 => 75.0)]
    #[test_case(0, 10 => 0.0)]
    #[test_case(10, 20 => -100.0)]
    fn ratio_is_percent_saved(original: u64, compressed: u64) -> f64 {
        ratio(original, compressed)
    }
}
