mod app;
mod cli;
mod config;
mod discovery;
mod ffmpeg;
mod job;
mod naming;
mod tagging;
#[cfg(test)]
mod testutil;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    app::run(args)
}
