use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// A CLI application that walks a set of directories and concatenates every
/// text file it finds into a single output file, each file preceded by a
/// header naming its source path.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None, color = ColorChoice::Always)]
pub struct Args {
    /// Directories to scan. Defaults to the current directory when omitted.
    #[arg(value_name = "DIR", default_value = ".")]
    pub directories: Vec<PathBuf>,

    /// The output file where the concatenated content will be written.
    /// It is appended to, and only created once a first file matches.
    #[arg(short, long, default_value = "concatenated.txt")]
    pub output: PathBuf,

    /// File extensions to include (e.g., .go,.md). If not provided, all
    /// extensions are considered. The leading dot is optional and matching
    /// is case-insensitive.
    #[arg(long, value_delimiter = ',', value_name = "EXT")]
    pub include_ext: Vec<String>,

    /// File extensions to exclude (e.g., .test,.bak). Same normalization
    /// as --include-ext.
    #[arg(long, value_delimiter = ',', value_name = "EXT")]
    pub exclude_ext: Vec<String>,

    /// Directories to exclude, as paths relative to the invocation root
    /// (e.g., vendor,target/debug). Excluded directories are not descended
    /// into at all.
    #[arg(long, value_delimiter = ',', value_name = "DIR")]
    pub exclude_dir: Vec<String>,

    /// Regular expressions matched against file names; a matching file is
    /// excluded. Example: --exclude-file-pattern '.*_test\.go$'
    #[arg(long, value_delimiter = ',', value_name = "REGEX")]
    pub exclude_file_pattern: Vec<String>,

    /// Regular expressions matched against file names; when given, a file
    /// must match at least one of them (in addition to satisfying
    /// --include-ext, when that is also given).
    #[arg(long, value_delimiter = ',', value_name = "REGEX")]
    pub include_file_pattern: Vec<String>,

    /// Enable verbose output. Use -v to see skip reasons, -vv for everything.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
