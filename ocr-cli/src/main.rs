use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ocr::{ImageConfig, OcrConfig, TextExtractor};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for a single extraction run.
#[derive(Parser, Debug)]
#[command(
    name = "ocr-cli",
    version,
    about = "Detect text regions in an image and recognize them with Tesseract"
)]
struct Args {
    /// Input image to process
    #[arg(long)]
    input: PathBuf,

    /// Where to write the serialized coordinate/text blocks
    #[arg(long, default_value = "results.txt")]
    results: PathBuf,

    /// Optional path for an annotated copy of the input image
    #[arg(long)]
    annotated: Option<PathBuf>,

    /// Also persist the intermediate binarized buffer for troubleshooting
    #[arg(long, default_value_t = false)]
    debug_binary: bool,

    /// Tesseract binary to invoke
    #[arg(long, default_value = "tesseract")]
    tesseract_cmd: PathBuf,

    /// Languages passed to the engine (repeat the flag for several)
    #[arg(long, default_value = "eng")]
    lang: Vec<String>,

    /// OCR engine mode
    #[arg(long, default_value_t = 3)]
    oem: u32,

    /// Page segmentation mode
    #[arg(long, default_value_t = 6)]
    psm: u32,

    /// Recognition worker threads (defaults to host parallelism)
    #[arg(long)]
    jobs: Option<usize>,

    /// Text encoding for the results file (a WHATWG label, e.g. utf-8,
    /// windows-1252)
    #[arg(long, default_value = "utf-8")]
    encoding: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    run(Args::parse())
}

fn run(args: Args) -> Result<()> {
    let encoding = encoding_rs::Encoding::for_label(args.encoding.as_bytes())
        .with_context(|| format!("unknown text encoding {:?}", args.encoding))?;

    let config = OcrConfig {
        tesseract_cmd: args.tesseract_cmd.clone(),
        languages: args.lang.clone(),
        oem: args.oem,
        psm: args.psm,
        worker_threads: args.jobs,
        ..OcrConfig::default()
    };
    let extractor = TextExtractor::with_image_config(config, ImageConfig::default())?;

    let image = extractor.load_image(&args.input)?;
    let binary = extractor.preprocess(&image)?;
    let regions = extractor.detect_regions(&binary)?;
    info!(regions = regions.len(), "detected candidate text regions");

    let results = extractor.recognize_regions(&image, &regions)?;
    info!(results = results.len(), "recognition finished");

    if let Some(annotated_path) = &args.annotated {
        let annotated = ocr::annotate(&image, &results)?;
        ocr::save_image(&annotated, annotated_path)
            .with_context(|| format!("failed to persist {}", annotated_path.display()))?;
    }

    if args.debug_binary {
        // The debug buffer lands next to whichever output was requested.
        let anchor = args.annotated.as_deref().unwrap_or(&args.results);
        let dir = anchor
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let debug_path = ocr::save_debug_binary(&binary, dir)?;
        info!(path = %debug_path.display(), "wrote binarized debug image");
    }

    ocr::write_results(&results, &args.results, encoding)?;

    println!(
        "Recognized {} of {} regions, results written to {}",
        results.len(),
        regions.len(),
        args.results.display()
    );

    Ok(())
}
