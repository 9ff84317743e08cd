extern crate anyhow;
extern crate clap;
extern crate serde;
extern crate serde_json;
extern crate thiserror;

#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

if_tracing! {
    use tracing_subscriber::{EnvFilter, fmt};
}

use std::process::ExitCode;

use crate::cli::{Cli, Command};
use clap::Parser;

mod bits;
mod cli;
mod compressor;
mod huffman;

fn main() -> ExitCode {
    if_tracing! {
        let subscriber = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let cli = Cli::parse();
    let result = match cli.command {
        Command::MakeCode(args) => cli::make_code::make_code(args),
        Command::Encode(args) => cli::encode::encode(args),
        Command::Decode(args) => cli::decode::decode(args),
        Command::Test(args) => cli::test::test(args),
        Command::Show(args) => cli::show::show(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if_tracing! {{
                tracing::error!(error = %err, "command failed");
            }}
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
