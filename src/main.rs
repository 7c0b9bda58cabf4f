// Command-line wrapper around the `silhouette_vision` library: resolves input
// paths and configuration, runs the pipeline, and prints the results.

use anyhow::{Context, Result, bail};
use clap::Parser;
use silhouette_vision::config::load_config;
use silhouette_vision::core_modules::utils::image_helper::image_helper;
use silhouette_vision::output;
use silhouette_vision::parallel_pipeline::ParallelPipeline;
use silhouette_vision::{PipelineConfig, SilhouettePipeline, SilhouetteReport};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{Level, error, info};

const DEFAULT_INPUT: &str = "test.jpg";

#[derive(Parser, Debug)]
#[command(name = "silhouette_vision")]
#[command(about = "Count foreground silhouettes on a uniform background")]
struct Cli {
    /// Images to analyze. Several paths are processed concurrently.
    #[arg(default_value = DEFAULT_INPUT)]
    paths: Vec<PathBuf>,
    /// JSON file with pipeline settings; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Color similarity threshold in [0, 1).
    #[arg(long)]
    threshold: Option<f64>,
    /// Minimum silhouette size as a share of all grid cells.
    #[arg(long)]
    min_fraction: Option<f64>,
    /// Border rows/columns inspected to infer the background color.
    #[arg(long)]
    border: Option<u32>,
    /// Worker count for batch mode (defaults to the number of CPUs).
    #[arg(long)]
    workers: Option<usize>,
    /// Print reports as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Write a PNG mask of the retained silhouettes (single image only).
    #[arg(long)]
    mask: Option<PathBuf>,
    /// Log pipeline stages at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.color_similarity_threshold = threshold;
    }
    if let Some(fraction) = cli.min_fraction {
        config.minimum_silhouette_fraction = fraction;
    }
    if let Some(border) = cli.border {
        config.border_inspection_thickness = border;
    }
    config.validate()?;
    Ok(config)
}

fn print_report(
    path: &Path,
    report: &SilhouetteReport,
    json: bool,
    with_header: bool,
) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if json {
        output::write_json(&mut stdout, path, report)?;
    } else {
        output::write_text(&mut stdout, report, with_header.then_some(path))?;
    }
    stdout.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = resolve_config(&cli)?;

    if cli.mask.is_some() && cli.paths.len() != 1 {
        bail!("--mask needs exactly one input image");
    }

    if let [path] = cli.paths.as_slice() {
        let pipeline = SilhouettePipeline::new(config)?;
        let report = pipeline
            .analyze_path(path)
            .with_context(|| format!("failed to analyze {}", path.display()))?;

        if let Some(mask_path) = &cli.mask {
            let mask = image_helper::render_mask(
                report.image_width,
                report.image_height,
                &report.silhouettes,
            );
            image_helper::save(mask_path, &mask)?;
            info!(path = %mask_path.display(), "wrote silhouette mask");
        }

        print_report(path, &report, cli.json, false)?;
        return Ok(());
    }

    let pipeline = ParallelPipeline::new(config, cli.workers)?;
    let results = pipeline.analyze_paths(&cli.paths).await;
    pipeline.shutdown().await;

    let mut failures = 0usize;
    for (path, result) in cli.paths.iter().zip(results) {
        match result {
            Ok(report) => print_report(path, &report, cli.json, true)?,
            Err(err) => {
                error!(path = %path.display(), "{err}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} images could not be analyzed", cli.paths.len());
    }
    Ok(())
}
