use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use ocrbatch::common::init_logger;
use ocrbatch::engine::{process_batch, InputType, OcrConfig, OcrInput, TesseractEngine};
use ocrbatch::preprocess::Filter;
use ocrbatch::report::{write_results, write_results_json};
use ocrbatch::resources::{self, ResolvedResource};

const DEFAULT_RESOURCE: &str = "OCR/photo_1.jpg";

#[derive(Parser)]
#[command(version, about = "Recognize text in a batch of images with tesseract", long_about = None)]
struct Cli {
    #[arg(
        long,
        help = "OCR an image file from disk instead of the bundled asset (repeatable)"
    )]
    image: Vec<PathBuf>,
    #[arg(
        long,
        default_value = DEFAULT_RESOURCE,
        help = "Bundled asset to recognize"
    )]
    resource: String,
    #[arg(long, help = "Recognition language passed to tesseract")]
    lang: Option<String>,
    #[arg(long, help = "Image resolution hint in dots per inch")]
    dpi: Option<u32>,
    #[arg(long, help = "Tesseract page segmentation mode")]
    psm: Option<u32>,
    #[arg(long, help = "Tesseract OCR engine mode")]
    oem: Option<u32>,
    #[arg(
        long,
        default_value_t = false,
        help = "Skip the auto-skew correction filter"
    )]
    no_deskew: bool,
    #[arg(
        long,
        default_value_t = false,
        help = "Prefix recognized text with normalized coordinates"
    )]
    bounding_boxes: bool,
    #[arg(long, default_value_t = false, help = "Report results as JSON")]
    json: bool,
}

#[tokio::main]
async fn main() {
    init_logger(env!("CARGO_PKG_NAME"));

    let cli = Cli::parse();

    // A missing input is a packaging defect, not a recognition failure:
    // report it and return before the engine is ever built.
    let resolved = match resolve_inputs(&cli) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };

    if let Err(e) = run(&cli, &resolved).await {
        log::error!("OCR processing failed: {:?}", e);
    }
}

fn resolve_inputs(cli: &Cli) -> Result<Vec<ResolvedResource>> {
    if cli.image.is_empty() {
        return Ok(vec![resources::resolve(&cli.resource)?]);
    }
    cli.image
        .iter()
        .map(|path| resources::resolve_external(path))
        .collect()
}

async fn run(cli: &Cli, resolved: &[ResolvedResource]) -> Result<()> {
    let filters = if cli.no_deskew {
        vec![]
    } else {
        vec![Filter::AutoSkew]
    };

    let input_type = if resolved.len() > 1 {
        InputType::MultiImage
    } else {
        InputType::SingleImage
    };

    let mut input = OcrInput::new(input_type, filters);
    for resource in resolved {
        println!("Processing file: {}", resource.path.display());
        input.add(&resource.path);
    }

    let config = OcrConfig {
        lang: cli.lang.clone(),
        bounding_boxes: Some(cli.bounding_boxes),
        dpi: cli.dpi,
        psm: cli.psm,
        oem: cli.oem,
    };

    let engine = TesseractEngine::new(config);
    let results = process_batch(&engine, &input).await?;

    let mut stdout = std::io::stdout();
    if cli.json {
        write_results_json(&mut stdout, &results)?;
    } else {
        write_results(&mut stdout, &results)?;
    }
    Ok(())
}
