use std::fs;

use anyhow::{Context, Result};

use crate::{
    cli::{MakeCodeArgs, default_code_path, write_code},
    huffman::{Code, FrequencyTable, Node},
};

pub fn make_code(args: MakeCodeArgs) -> Result<()> {
    let data = fs::read(&args.input).with_context(|| format!("failed to read input file {}", args.input.display()))?;
    let frequencies = FrequencyTable::from_bytes(&data);
    let code = Code::from_frequency_table(&frequencies);

    let output = match args.output {
        Some(path) => path,
        None => default_code_path(&args.input, args.format)?,
    };
    write_code(&code, &output, args.format)?;

    if_tracing! {{
        tracing::info!(event = "make_code_complete", input = %args.input.display(), output = %output.display(), symbols = frequencies.distinct(), "code table written");
    }}
    eprintln!(
        "wrote code for {} distinct bytes to {}: {} bytes encode to {} bits",
        frequencies.distinct(),
        output.display(),
        frequencies.total(),
        code.root().and_then(Node::weighted_path_length).unwrap_or(0)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{TableFormat, read_code, tests::scratch_dir};

    #[test]
    fn writes_the_table_next_to_the_input() {
        let dir = scratch_dir("make-code");
        let input = dir.join("letters.txt");
        fs::write(&input, "aaaabbc").unwrap();

        make_code(MakeCodeArgs {
            input: input.clone(),
            output: None,
            format: TableFormat::Text,
        })
        .unwrap();

        let text = fs::read_to_string(dir.join("letters.code")).unwrap();
        assert_eq!(text, "99\n00\n98\n01\n97\n1\n");
        assert_eq!(read_code(&dir.join("letters.code")).unwrap().symbol_count(), 3);
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = scratch_dir("make-code-missing");
        let result = make_code(MakeCodeArgs {
            input: dir.join("does-not-exist"),
            output: None,
            format: TableFormat::Json,
        });
        assert!(result.is_err());
    }
}
