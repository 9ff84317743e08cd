use std::fs;

use anyhow::{Context, Result};

use crate::{
    bits::BitReader,
    cli::{DecodeArgs, TableFormat, default_code_path, read_code},
};

pub fn decode(args: DecodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;
    let code_path = match args.code {
        Some(path) => path,
        None => default_code_path(input_path, TableFormat::Text)?,
    };
    let code = read_code(&code_path)?;

    let compressed_data = fs::read(input_path).with_context(|| format!("failed to read input file {}", input_path.display()))?;
    let bits = BitReader::from_container(&compressed_data).with_context(|| format!("failed to read {}", input_path.display()))?;
    let decompressed_data = code
        .decode(bits)
        .with_context(|| format!("failed to decode {} with {}", input_path.display(), code_path.display()))?;

    if_tracing! {{
        tracing::info!(event = "decode_complete", input = %input_path.display(), output = %output_path.display(), decompressed_len = decompressed_data.len(), "decode finished");
    }}
    fs::write(output_path, decompressed_data).with_context(|| format!("failed to write output file {}", output_path.display()))?;
    Ok(())
}
