use clap::Parser;
use log::LevelFilter;
use textcat::{cli::Args, run};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Progress and summaries at info; skip reasons appear with -v.
    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    run(args)
}
