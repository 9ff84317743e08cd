//! cli component of the huffpack project.
//!
//! lines starting with `> ` denote valid invocations. `$exename` stands for the executable name,
//! `<description>` denotes a required argument, while `[description]` denotes an optional one.
//!
//! # Code tables
//!
//! > `$exename make-code <input> [--output <path>] [--format text|json]`
//!
//! counts the bytes of the input, builds the huffman code for them and stores its code table.
//! the table defaults to `{input stem}.code` (or `{input stem}.code.json` for json) next to the input.
//! the text format is two lines per symbol: the decimal byte value, then its code word as `0`/`1`s.
//!
//! > `$exename show <code table>`
//!
//! prints a table in a readable form. files ending in `.json` are read as json tables.
//!
//! # Compression
//!
//! > `$exename encode <input> <output> [--code <code table>]`
//!
//! encodes the input with the given table. without `--code`, a table is built from the input itself
//! and stored as `{output stem}.code` next to the output, since decoding is impossible without it.
//! an output that would land on its own code table (e.g. `encode x.txt x.code`) is refused before
//! anything is written.
//! the output is the number of code bits as a little-endian u64 followed by the packed bits.
//!
//! # Decompression
//!
//! > `$exename decode <input> <output> [--code <code table>]`
//!
//! rebuilds the code from the table (default `{input stem}.code`) and decodes the input.
//! the default matches what `encode` writes, and `encode` refuses outputs that would overwrite it.
//! a table that does not match the data fails loudly instead of producing truncated output.
//!
//! # Testing
//!
//! > `$exename test <input>`
//!
//! compresses the input in memory with the table embedded, decompresses it again and compares.
use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::huffman::{Code, CodeTable};

pub mod decode;
pub mod encode;
pub mod make_code;
pub mod show;
pub mod test;

/// Error types for CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("round trip of {0} did not reproduce the input")]
    RoundTripMismatch(PathBuf),

    #[error("cannot derive a code table path from {0}")]
    NoCodePath(PathBuf),

    #[error("output {0} would overwrite its own code table; pick another output name or pass --code")]
    CodePathCollision(PathBuf),
}

/// CLI arguments for the huffpack application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands for huffpack
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a code table from the byte frequencies of a file
    #[command(alias = "code")]
    MakeCode(MakeCodeArgs),

    /// Encode (compress) a file with a code table
    #[command(alias = "enc")]
    Encode(EncodeArgs),

    /// Decode (decompress) a file with a code table
    #[command(alias = "dec")]
    Decode(DecodeArgs),

    /// Test compression/decompression roundtrip
    Test(TestArgs),

    /// Print a code table
    Show(ShowArgs),
}

/// Arguments specific to the make-code command
#[derive(Args, Debug)]
pub struct MakeCodeArgs {
    /// Path to the file whose bytes are counted
    pub input: PathBuf,

    /// Where to store the code table
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Code table format
    #[arg(long, value_enum, default_value_t = TableFormat::Text)]
    pub format: TableFormat,
}

/// Arguments specific to the encode command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the input file
    pub input: PathBuf,

    /// Path for the encoded output
    pub output: PathBuf,

    /// Existing code table to encode with
    #[arg(long)]
    pub code: Option<PathBuf>,
}

/// Arguments specific to the decode command
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Path to the encoded file
    pub input: PathBuf,

    /// Path for the decoded output
    pub output: PathBuf,

    /// Code table the input was encoded with
    #[arg(long)]
    pub code: Option<PathBuf>,
}

/// Arguments specific to the test command
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Path to the file to roundtrip
    pub input: PathBuf,
}

/// Arguments specific to the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Path to the code table
    pub code: PathBuf,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    /// Two lines per symbol: byte value, code word
    #[default]
    Text,
    /// `{"entries": [{"symbol": 97, "bits": "01"}, ...]}`
    Json,
}

impl TableFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }

    const fn extension(self) -> &'static str {
        match self {
            Self::Text => "code",
            Self::Json => "code.json",
        }
    }
}

/// `{stem}.code` (or `{stem}.code.json`) next to `path`.
pub fn default_code_path(path: &Path, format: TableFormat) -> Result<PathBuf, CliError> {
    if path.file_stem().is_none() {
        return Err(CliError::NoCodePath(path.to_path_buf()));
    }
    Ok(path.with_extension(format.extension()))
}

pub fn read_code(path: &Path) -> Result<Code> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read code table {}", path.display()))?;
    let table = match TableFormat::for_path(path) {
        TableFormat::Text => CodeTable::parse(&text),
        TableFormat::Json => CodeTable::from_json(&text),
    }
    .with_context(|| format!("failed to parse code table {}", path.display()))?;
    Code::from_table(&table).with_context(|| format!("invalid code table {}", path.display()))
}

pub fn write_code(code: &Code, path: &Path, format: TableFormat) -> Result<()> {
    let table = code.to_table();
    let contents = match format {
        TableFormat::Text => table.to_string(),
        TableFormat::Json => table.to_json()?,
    };
    fs::write(path, contents).with_context(|| format!("failed to write code table {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("huffpack-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["huffpack", "make-code", "in.txt", "--format", "json"]).unwrap();
        assert!(matches!(cli.command, Command::MakeCode(MakeCodeArgs { format: TableFormat::Json, .. })));

        let cli = Cli::try_parse_from(["huffpack", "dec", "in.short", "out.txt", "--code", "in.code"]).unwrap();
        match cli.command {
            Command::Decode(args) => assert_eq!(args.code, Some(PathBuf::from("in.code"))),
            other => panic!("unexpected command {:?}", other),
        }

        assert!(Cli::try_parse_from(["huffpack", "encode", "only-input"]).is_err());
    }

    #[test]
    fn code_paths() {
        assert_eq!(default_code_path(Path::new("dir/notes.txt"), TableFormat::Text).unwrap(), PathBuf::from("dir/notes.code"));
        assert_eq!(default_code_path(Path::new("notes"), TableFormat::Json).unwrap(), PathBuf::from("notes.code.json"));
        assert!(default_code_path(Path::new(".."), TableFormat::Text).is_err());
        assert_eq!(TableFormat::for_path(Path::new("a.code.JSON")), TableFormat::Json);
        assert_eq!(TableFormat::for_path(Path::new("a.code")), TableFormat::Text);
    }

    #[test]
    fn code_files_roundtrip_in_both_formats() {
        let dir = scratch_dir("code-files");
        let code = Code::from_frequencies([(b'x', 3), (b'y', 1), (b'z', 1)]);
        for format in [TableFormat::Text, TableFormat::Json] {
            let path = default_code_path(&dir.join("sample.txt"), format).unwrap();
            write_code(&code, &path, format).unwrap();
            assert_eq!(read_code(&path).unwrap().to_table(), code.to_table());
        }
    }

    #[test]
    fn unreadable_tables_report_the_path() {
        let dir = scratch_dir("bad-table");
        let path = dir.join("bad.code");
        fs::write(&path, "97\n2\n").unwrap();
        let err = read_code(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("bad.code"), "{:#}", err);
    }
}
