use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::{
    cli::{CliError, TestArgs},
    compressor::{Compressor, RoundTripTestResult},
    huffman::HuffmanCoding,
};

pub fn test(args: TestArgs) -> Result<()> {
    let input = fs::read(&args.input).with_context(|| format!("failed to read input file {}", args.input.display()))?;
    let mut compressor = HuffmanCoding;
    let result = compressor
        .test_roundtrip(&input)
        .with_context(|| format!("roundtrip of {} failed", args.input.display()))?;

    print_results(&compressor.compressor_name(), &args.input, &result);
    if !result.is_successful() {
        return Err(CliError::RoundTripMismatch(args.input).into());
    }
    Ok(())
}

fn print_results(name: &str, path: &Path, result: &RoundTripTestResult<'_>) {
    let original_size = result.get_original().len();
    let compressed_size = result.get_compressed().len();
    let bytes_saved = original_size as isize - compressed_size as isize;
    let percent_saved = if original_size == 0 {
        0.0
    } else {
        (bytes_saved as f64) / (original_size as f64) * 100.0
    };

    eprintln!(
        "======== {} {} ({}) ========\n\toriginal: {} bytes\n\tcompressed: {} bytes (table included)\n\tdecompressed: {} bytes\n\tratio: {:.1}% (compressed/original)\n\tsaved: {:+} bytes ({:+.1}%)",
        if result.is_successful() { "PASSED" } else { "FAILED" },
        path.display(),
        name,
        original_size,
        compressed_size,
        result.get_decompressed().len(),
        result.ratio() * 100.0,
        bytes_saved,
        percent_saved,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::scratch_dir;

    #[test]
    fn passes_for_text_and_empty_files() {
        let dir = scratch_dir("test-cmd");
        fs::write(dir.join("text.txt"), "so much depends upon a red wheel barrow").unwrap();
        fs::write(dir.join("empty.txt"), "").unwrap();

        test(TestArgs { input: dir.join("text.txt") }).unwrap();
        test(TestArgs { input: dir.join("empty.txt") }).unwrap();
        assert!(test(TestArgs { input: dir.join("missing.txt") }).is_err());
    }
}
