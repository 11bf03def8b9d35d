use anyhow::{Context, Result};
use log::info;
use std::env;
use std::path::PathBuf;

pub mod classify;
pub mod cli;
pub mod config;
pub mod filter;
pub mod walker;
pub mod writer;

use cli::Args;
use config::FilterConfig;
use walker::Walker;
use writer::OutputSink;

/// The core logic of the application: build the filter configuration, walk
/// the requested directories, and concatenate every admitted text file into
/// the output file.
pub fn run(args: Args) -> Result<()> {
    let base_dir = env::current_dir().context("error getting current working directory")?;
    run_in(args, base_dir)
}

/// Same as [`run`], with the invocation root passed explicitly instead of
/// read from process state. Tests use this to avoid touching the
/// process-wide working directory.
pub fn run_in(args: Args, base_dir: PathBuf) -> Result<()> {
    let exe_path = env::current_exe().context("error getting executable path")?;
    let defaults = config::load_defaults(&base_dir)?;

    let output_path = config::absolutize(&base_dir, &args.output);
    let config = FilterConfig::new(&args, defaults, base_dir, output_path.clone(), exe_path)?;
    let output_display = config.relative_display(&output_path);

    let mut sink = OutputSink::new(output_path);
    let walk_result = Walker::new(&config, &mut sink).walk(&args.directories);
    // Flush before inspecting the walk outcome so the handle is released on
    // the error path too.
    sink.finish().context("error closing output file")?;

    if walk_result? {
        info!("Files concatenated successfully into {output_display}");
    } else {
        info!("No text files found in any of the directories.");
    }

    Ok(())
}
