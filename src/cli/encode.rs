use std::fs;

use anyhow::{Context, Result};

use crate::{
    cli::{CliError, EncodeArgs, TableFormat, default_code_path, read_code, write_code},
    huffman::{Code, FrequencyTable},
};

pub fn encode(args: EncodeArgs) -> Result<()> {
    let input_path = &args.input;
    let output_path = &args.output;

    let code_path = match &args.code {
        Some(path) => path.clone(),
        None => default_code_path(output_path, TableFormat::Text)?,
    };
    // the output must never replace the only copy of its code table
    if code_path == *output_path {
        return Err(CliError::CodePathCollision(code_path).into());
    }

    let input_data = fs::read(input_path).with_context(|| format!("failed to read input file {}", input_path.display()))?;
    let code = match &args.code {
        Some(path) => read_code(path)?,
        None => {
            let code = Code::from_frequency_table(&FrequencyTable::from_bytes(&input_data));
            write_code(&code, &code_path, TableFormat::Text)?;
            eprintln!("wrote code table to {}", code_path.display());
            code
        }
    };

    let bits = code
        .encode(&input_data)
        .with_context(|| format!("failed to encode {}", input_path.display()))?;
    let compressed_data = bits.to_container();

    if_tracing! {{
        tracing::info!(event = "encode_complete", input = %input_path.display(), output = %output_path.display(), bits = bits.bit_count(), compressed_len = compressed_data.len(), "encode finished");
    }}
    fs::write(output_path, &compressed_data).with_context(|| format!("failed to write output file {}", output_path.display()))?;
    eprintln!(
        "encoded {} bytes into {} bits ({} bytes written)",
        input_data.len(),
        bits.bit_count(),
        compressed_data.len()
    );
    Ok(())
}
