//! SuspensionLab CLI
//!
//! # Usage
//!
//! ```bash
//! suspensionlab validate --setup bike.yaml
//! suspensionlab encode --setup bike.yaml --output bike.bin
//! suspensionlab decode --input bike.bin --format yaml
//! suspensionlab diary record --diary diary.json --setup bike.yaml
//! suspensionlab diary log --diary diary.json
//! ```
//!
//! Log output goes to stderr. `RUST_LOG` refines the filter; `-v` raises the
//! floor to info, `-vv` to debug and `-vvv` to trace.

use clap::Parser;
use suspensionlab_cli::{run_cli, Cli};
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
