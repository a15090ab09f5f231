mod appstore;
mod cli;
mod extractor;
mod model;
mod output;
mod utils;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use cli::Config;
use model::IpaMetadata;

fn main() -> Result<()> {
    let args = cli::parse_args();
    let config = Config::from_args(args);
    run(&config)?;
    Ok(())
}

/// Process every IPA file in the configured directory and write the JSON
/// artifact. Per-file failures are logged and skipped; they never abort the
/// batch. Returns the number of discovered files.
fn run(config: &Config) -> Result<usize> {
    let start = Instant::now();
    let paths = discover_ipa_files(&config.directory)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()?;
    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap(),
    );

    // Successes are accumulated by the parallel iterator itself, so no shared
    // mutable collection is needed; result order is completion order.
    let results: Vec<IpaMetadata> = pool.install(|| {
        paths
            .par_iter()
            .filter_map(|path| {
                let outcome = extractor::extract_ipa(path, config);
                pb.inc(1);
                match outcome {
                    Ok(meta) => {
                        pb.println(format!("{}: Done", path.display()));
                        Some(meta)
                    }
                    Err(e) => {
                        pb.println(format!("{}: Error: {e}", path.display()));
                        None
                    }
                }
            })
            .collect()
    });
    pb.finish_and_clear();

    output::write_results(&results, &config.output_dir)?;
    println!(
        "Processed {} files in {:.2} second(s)",
        paths.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(paths.len())
}

/// Non-recursive scan for `*.ipa` files, sorted for a stable dispatch order.
fn discover_ipa_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "ipa"))
        .collect();
    paths.sort();
    Ok(paths)
}
