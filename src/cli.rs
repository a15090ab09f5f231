use std::path::PathBuf;
use std::thread;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "IPA Indexer",
    version = "0.1.0",
    about = "Extract metadata from a directory of IPA files into a timestamped JSON file, optionally filling missing fields from the iTunes Search API."
)]
pub struct Args {
    #[arg(short = 'd', long, help = "Directory containing IPA files")]
    pub directory: PathBuf,
    #[arg(
        short = 'f',
        long,
        help = "Use the iTunes Search API to fetch app store data missing from the IPA"
    )]
    pub appstore: bool,
}

/// Resolved run settings, threaded explicitly through the pipeline.
/// `icon_dir` and `output_dir` are the working directory for normal runs;
/// tests point them at a tempdir.
#[derive(Debug, Clone)]
pub struct Config {
    pub directory: PathBuf,
    pub fetch_appstore: bool,
    pub jobs: usize,
    pub icon_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        Config {
            directory: args.directory,
            fetch_appstore: args.appstore,
            jobs: thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            icon_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
        }
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}
