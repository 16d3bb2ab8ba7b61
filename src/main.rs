// src/main.rs
//
// Command-line entry point: dress a person photo in one or more garments.
//
//   tryon-studio <person> <garment>... [--background TEXT | --preset NAME]
//                [--expand] [--out DIR]
//
// Reads GEMINI_API_KEY (or API_KEY) from the environment. TRYON_LOG sets the
// log level (default: info).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{info, warn, LevelFilter};

use tryon_studio::application::commands::*;
use tryon_studio::application::dto::UploadDto;
use tryon_studio::application::{AppState, ErrorResponse};
use tryon_studio::events::{EventBus, TryOnStageStarted};
use tryon_studio::infrastructure::read_upload;
use tryon_studio::integrations::{GeminiClient, GenerationConfig};
use tryon_studio::services::GenerationService;
use tryon_studio::Image;

// ============================================================================
// LOGGING
// ============================================================================

fn init_logging() {
    let level = std::env::var("TRYON_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Err(e) = dispatch.apply() {
        eprintln!("Failed to apply logger configuration: {}", e);
    }
}

// ============================================================================
// ARGUMENTS
// ============================================================================

/// Dress a person photo in one or more garments
#[derive(Parser, Debug)]
#[command(name = "tryon-studio", version, about, long_about = None)]
struct Args {
    /// Full-body photo of the person
    person: PathBuf,

    /// Garment images, dressed in the order given
    #[arg(required = true)]
    garments: Vec<PathBuf>,

    /// Free-text background for the final images
    #[arg(long, conflicts_with = "preset")]
    background: Option<String>,

    /// Named background preset (Default, No BG, Runway, Beach, City)
    #[arg(long)]
    preset: Option<String>,

    /// Expand the background idea into a detailed description first
    #[arg(long)]
    expand: bool,

    /// Directory the results are written to
    #[arg(long = "out", default_value = "tryon-output")]
    out_dir: PathBuf,
}

// ============================================================================
// MAIN
// ============================================================================

/// ErrorResponse is a UI payload, not an Error
fn command<T>(result: std::result::Result<T, ErrorResponse>) -> Result<T> {
    result.map_err(|e| match e.details {
        Some(details) => anyhow!("{} ({})", e.message, details),
        None => anyhow!(e.message),
    })
}

fn load(path: &Path) -> Result<UploadDto> {
    let upload = read_upload(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(UploadDto {
        data_url: Image::new(upload.media_type, upload.data).to_data_url(),
        file_name: upload.file_name,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    // 1. INFRASTRUCTURE
    let config = GenerationConfig::from_env()?;
    info!("Using image model {}", config.image_model);
    let allowed_finish_reasons = config.allowed_finish_reasons.clone();
    let client = Arc::new(GeminiClient::new(config)?);
    let generation = Arc::new(GenerationService::with_allowed_finish_reasons(
        client,
        allowed_finish_reasons,
    ));
    let event_bus = Arc::new(EventBus::new());

    event_bus.subscribe::<TryOnStageStarted, _>(|event| {
        println!("{}", event.label);
    });

    // 2. STATE & INPUTS
    let state = AppState::with_generation_service(generation, event_bus);

    command(set_person_photo(load(&args.person)?, &state).await)?;

    let uploads = args
        .garments
        .iter()
        .map(|path| load(path))
        .collect::<Result<Vec<_>>>()?;
    let report = command(upload_garments(uploads, &state).await)?;
    if let Some(message) = &report.message {
        warn!("{}", message);
    }
    if report.accepted == 0 {
        bail!("no usable garment images");
    }

    // Select every garment directly on the store. The CLI never shows a
    // palette, so the palette tickets handed back are not run.
    {
        let mut store = state.store();
        for garment in store.catalog().to_vec() {
            if !store.is_selected(&garment) {
                let _palette_request = store.toggle_select(&garment);
            }
        }
    }

    if let Some(text) = args.background {
        command(set_background(text, &state).await)?;
    } else if let Some(name) = args.preset {
        command(set_background_preset(name, &state).await)?;
    }
    if args.expand {
        let expanded = command(expand_background(&state).await)?;
        println!("Background: {}", expanded);
    }

    // 3. RUN
    let results = command(generate_try_on(&state).await)?;

    for index in 0..results.len() {
        let path = command(export_result(index, &args.out_dir, &state).await)?;
        println!("Saved {}", path);
    }

    Ok(())
}
