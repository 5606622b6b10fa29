//! vision_sense - upload an image, fetch detections from the backend and render the overlay.
//!
//! Drives the application shell the way the page does: select a file, request
//! detection, load the hosted image at its display size, optionally hover an
//! entry or resize the container, then print the panel and save the composite.

use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossbeam_channel::Sender;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use vision_sense::app::AppEvent;
use vision_sense::clients::HttpDetectionApi;
use vision_sense::common::{DisplayedImage, SelectedFile};
use vision_sense::data::{
    AppConfig, EventChannels, DEFAULT_DISPLAY_MAX_HEIGHT, DEFAULT_DISPLAY_MAX_WIDTH,
    DEFAULT_UPLOAD_PRESET, DEFAULT_UPLOAD_URL,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Detect objects in an image through a remote backend and render the overlay"
)]
struct Args {
    /// Image file to upload.
    #[arg(long, short)]
    image: Option<PathBuf>,

    /// Base URL of the detection backend.
    #[arg(long, env = "VISION_SENSE_BACKEND_URL")]
    backend_url: String,

    /// Media host upload endpoint.
    #[arg(long, env = "VISION_SENSE_UPLOAD_URL", default_value = DEFAULT_UPLOAD_URL)]
    upload_url: String,

    /// Unsigned upload preset sent with every image.
    #[arg(long, env = "VISION_SENSE_UPLOAD_PRESET", default_value = DEFAULT_UPLOAD_PRESET)]
    upload_preset: String,

    /// TTF/OTF font for overlay labels.
    #[arg(long, env = "VISION_SENSE_FONT")]
    font: Option<PathBuf>,

    /// Container width the image is fitted into.
    #[arg(long, default_value_t = DEFAULT_DISPLAY_MAX_WIDTH)]
    display_width: u32,

    /// Container height the image is fitted into.
    #[arg(long, default_value_t = DEFAULT_DISPLAY_MAX_HEIGHT)]
    display_height: u32,

    /// Resize the container to this width after the image is shown.
    #[arg(long)]
    resize_width: Option<u32>,

    /// Hover the detection list entry at this index.
    #[arg(long)]
    highlight: Option<usize>,

    /// Write the image with its overlay to this PNG.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Query the backend health route and exit.
    #[arg(long)]
    check_backend: bool,
}

fn send(tx: &Sender<AppEvent>, event: AppEvent) -> Result<()> {
    tx.send(event).map_err(|_| anyhow!("event channel closed"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = AppConfig::new()
        .with_backend_url(&args.backend_url)
        .with_upload_url(&args.upload_url)
        .with_upload_preset(&args.upload_preset)
        .with_font_path(args.font.clone())
        .with_display_bounds(args.display_width, args.display_height)
        .validate()?;

    if args.check_backend {
        let health = HttpDetectionApi::new(&config).health()?;
        println!(
            "Backend {}: {} (model loaded: {})",
            health.status, health.message, health.model_loaded
        );
        return Ok(());
    }

    let image_path = args
        .image
        .clone()
        .ok_or_else(|| anyhow!("--image is required unless --check-backend is given"))?;
    let file = SelectedFile::from_path(&image_path)?;
    // The hosted copy is this same file, so its natural size is known locally.
    let local = image::open(&image_path)
        .with_context(|| format!("failed to decode {}", image_path.display()))?;
    let (natural_width, natural_height) = local.dimensions();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;

    let mut app = vision_sense::init_app(&config)?;
    let channels = EventChannels::new();
    let tx = channels.sender();

    send(&tx, AppEvent::FileSelected(Some(file)))?;
    send(&tx, AppEvent::DetectRequested)?;

    loop {
        let event = if app.is_busy() {
            channels.event_rx.recv().context("event channel closed")?
        } else {
            match channels.event_rx.try_recv() {
                Ok(event) => event,
                Err(_) => break,
            }
        };

        let finished = matches!(event, AppEvent::UploadFinished(_));
        if let Some(job) = app.handle(event) {
            let tx = tx.clone();
            runtime.spawn(async move {
                let outcome = job.run().await;
                let _ = tx.send(AppEvent::UploadFinished(outcome));
            });
        }

        if finished && app.state().result.is_some() {
            let displayed = DisplayedImage::fit(
                natural_width,
                natural_height,
                config.display_max_width,
                config.display_max_height,
            );
            send(&tx, AppEvent::ImageLoaded {
                natural_width,
                natural_height,
                client_width: displayed.client_width,
                client_height: displayed.client_height,
            })?;
            if let Some(width) = args.resize_width {
                let resized = DisplayedImage::fit(
                    natural_width,
                    natural_height,
                    width,
                    config.display_max_height,
                );
                send(&tx, AppEvent::Resized {
                    client_width: resized.client_width,
                    client_height: resized.client_height,
                })?;
            }
            if let Some(index) = args.highlight {
                send(&tx, AppEvent::PointerEntered(index))?;
            }
        }
    }

    println!("{}", app.view());

    if app.state().result.is_none() {
        return Err(anyhow!("no detection result"));
    }

    if let Some(out) = &args.out {
        match app.state().displayed {
            Some(displayed) => {
                let base = display_copy(&local, displayed.client_width, displayed.client_height);
                save_composite(&app.surface().composite_over(&base.to_rgba8()), out)?;
            }
            None => log::warn!("Nothing was displayed; skipping {}", out.display()),
        }
    }

    Ok(())
}

/// Scales the local image to its displayed size.
fn display_copy(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let mut resizer = fast_image_resize::Resizer::new();
    let options = fast_image_resize::ResizeOptions {
        algorithm: fast_image_resize::ResizeAlg::Convolution(
            fast_image_resize::FilterType::Bilinear,
        ),
        ..Default::default()
    };

    let mut resized = DynamicImage::new(width, height, image.color());
    if let Err(err) = resizer.resize(image, &mut resized, &options) {
        log::warn!("Failed to use `fast_image_resize` ({}). Falling back.", err);
        resized = image::imageops::resize(image, width, height, FilterType::Triangle).into();
    }
    resized
}

fn save_composite(image: &image::RgbaImage, out: &Path) -> Result<()> {
    image
        .save(out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    log::info!("Overlay written to {}", out.display());
    Ok(())
}
