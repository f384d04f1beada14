mod args;

use anyhow::Context;
use args::Args;
use ascii_tty::{PixelBuffer, present};
use clap::Parser;
use std::process::ExitCode;

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.render_config();
    log::debug!("render config: {:?}", config);

    let image = PixelBuffer::open(&args.image)?;
    present(&image, &config).context("rendering failed")?;
    Ok(())
}

fn main() -> ExitCode {
    // Configure logging; stderr only, so frames on stdout stay clean
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
