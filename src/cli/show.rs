use anyhow::Result;

use crate::{
    cli::{ShowArgs, read_code},
    huffman::Node,
};

pub fn show(args: ShowArgs) -> Result<()> {
    let code = read_code(&args.code)?;
    let table = code.to_table();

    for entry in &table.entries {
        println!("{:>3}  {:<6} {}", entry.symbol, printable(entry.symbol), entry.bits);
    }
    println!(
        "{} symbols, longest code word {} bits",
        code.symbol_count(),
        code.root().map_or(0, Node::height)
    );
    Ok(())
}

fn printable(symbol: u8) -> String {
    format!("'{}'", symbol.escape_ascii())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_symbols() {
        assert_eq!(printable(b'a'), "'a'");
        assert_eq!(printable(b'\n'), "'\\n'");
        assert_eq!(printable(0xff), "'\\xff'");
    }
}
