use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixel_pipeline::{EnhanceConfig, Interpolation, PixelArtConfig};
use pixelsmith::codec::{OutputOptions, DEFAULT_JPEG_QUALITY};
use pixelsmith::models::BatchConfig;
use pixelsmith::services::{BatchRunner, ConversionReport, ImageConverter};

#[derive(Parser)]
#[command(name = "pixelsmith")]
#[command(about = "Pixelsmith - pixel-art conversion and image quality enhancement")]
struct Cli {
    /// Verbose logging (same as RUST_LOG=pixelsmith=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image to pixel art
    Pixelate {
        /// Source image
        input: PathBuf,

        /// Output file (format from extension)
        output: PathBuf,

        /// Width of the pixel grid in cells
        #[arg(short, long, default_value_t = 64)]
        pixel_size: usize,

        /// Output size relative to the source (default: source size)
        #[arg(short, long)]
        scale: Option<f32>,

        /// Palette size (2-256)
        #[arg(short, long, default_value_t = 128, conflicts_with = "no_quantize")]
        colors: usize,

        /// Keep all grid colors
        #[arg(long)]
        no_quantize: bool,

        /// Square grid instead of following the source aspect ratio
        #[arg(long)]
        stretch: bool,

        /// Skip smoothing, sharpening and cleanup passes
        #[arg(long)]
        no_enhance: bool,

        /// nearest, bilinear, bicubic or lanczos
        #[arg(short, long, default_value = "bicubic")]
        interpolation: Interpolation,

        #[command(flatten)]
        output_args: OutputArgs,
    },
    /// Denoise, sharpen, adjust tone and optionally upscale an image
    Enhance {
        /// Source image
        input: PathBuf,

        /// Output file (format from extension)
        output: PathBuf,

        /// >= 1 sharpens, < 1 blurs
        #[arg(long, default_value_t = 1.5)]
        sharpness: f32,

        /// Contrast factor (capped at 1.3)
        #[arg(long, default_value_t = 1.1)]
        contrast: f32,

        /// Saturation factor (capped at 1.3)
        #[arg(long, default_value_t = 1.05)]
        saturation: f32,

        /// Skip the median denoise pass
        #[arg(long)]
        no_denoise: bool,

        /// Lanczos upscale factor (ignored if <= 1)
        #[arg(short, long)]
        upscale: Option<f32>,

        #[command(flatten)]
        output_args: OutputArgs,
    },
    /// Run the jobs listed in a YAML batch file
    Batch {
        /// Batch configuration file
        config: PathBuf,

        /// Concurrent conversions (overrides the file)
        #[arg(short, long)]
        workers: Option<usize>,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Re-compress PNG output with oxipng
    #[arg(long)]
    optimize: bool,
}

impl From<&OutputArgs> for OutputOptions {
    fn from(args: &OutputArgs) -> Self {
        OutputOptions {
            jpeg_quality: args.quality,
            optimize_png: args.optimize,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Pixelate {
            input,
            output,
            pixel_size,
            scale,
            colors,
            no_quantize,
            stretch,
            no_enhance,
            interpolation,
            output_args,
        }) => {
            init_logging(cli.verbose);
            let config = PixelArtConfig::new()
                .target_pixel_width(pixel_size)
                .scale_factor(scale)
                .color_count((!no_quantize).then_some(colors))
                .preserve_aspect(!stretch)
                .enhance_mode(!no_enhance)
                .interpolation(interpolation);
            let converter = ImageConverter::new((&output_args).into());
            let report = converter
                .pixelate_file(&input, &output, &config)
                .with_context(|| format!("Pixel art conversion of {} failed", input.display()))?;
            print_report(&output, &report);
            Ok(())
        }
        Some(Commands::Enhance {
            input,
            output,
            sharpness,
            contrast,
            saturation,
            no_denoise,
            upscale,
            output_args,
        }) => {
            init_logging(cli.verbose);
            let config = EnhanceConfig::new()
                .sharpness(sharpness)
                .contrast(contrast)
                .saturation(saturation)
                .denoise(!no_denoise)
                .upscale_factor(upscale);
            let converter = ImageConverter::new((&output_args).into());
            let report = converter
                .enhance_file(&input, &output, &config)
                .with_context(|| format!("Enhancement of {} failed", input.display()))?;
            print_report(&output, &report);
            Ok(())
        }
        Some(Commands::Batch { config, workers }) => {
            init_logging(cli.verbose);
            run_batch_command(&config, workers).await
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "pixelsmith=debug"
    } else {
        "pixelsmith=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn print_report(output: &Path, report: &ConversionReport) {
    let (w, h) = report.output_size;
    match report.distinct_colors {
        Some(colors) => println!(
            "Saved {} ({w}x{h}, {colors} colors, {} bytes)",
            output.display(),
            report.bytes_written
        ),
        None => println!(
            "Saved {} ({w}x{h}, {} bytes)",
            output.display(),
            report.bytes_written
        ),
    }
}

/// Run every job in a batch file and report per-job outcomes
async fn run_batch_command(path: &Path, workers: Option<usize>) -> anyhow::Result<()> {
    let config = BatchConfig::load(path)
        .with_context(|| format!("Failed to load batch file {}", path.display()))?;

    let workers = workers
        .or(config.workers)
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |n| n.get()));
    let runner = BatchRunner::new(ImageConverter::new(config.output), workers);
    let summary = runner.run(config.resolve_jobs()).await;

    for job in &summary.results {
        match &job.result {
            Ok(report) => println!(
                "  ok   #{} {} -> {} ({}x{})",
                job.index,
                job.input.display(),
                job.output.display(),
                report.output_size.0,
                report.output_size.1
            ),
            Err(e) => println!("  FAIL #{} {}: {e}", job.index, job.input.display()),
        }
    }
    println!(
        "\n{} succeeded, {} failed",
        summary.succeeded(),
        summary.failed()
    );

    if summary.is_success() {
        Ok(())
    } else {
        anyhow::bail!("{} of {} jobs failed", summary.failed(), summary.results.len())
    }
}

/// Display version, defaults and available commands
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let pixel = PixelArtConfig::default();
    let enhance = EnhanceConfig::default();
    let output = OutputOptions::default();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("Pixelsmith v{VERSION}");
    println!("Pixel-art conversion and image quality enhancement\n");

    println!("Environment Variables:");
    println!(
        "  RUST_LOG = {}",
        rust_log.as_deref().unwrap_or("pixelsmith=info (default)")
    );

    println!("\nPixel Art Defaults:");
    println!("  pixel size     {}", pixel.target_pixel_width);
    println!(
        "  colors         {}",
        pixel
            .color_count
            .map_or_else(|| "unlimited".to_string(), |c| c.to_string())
    );
    println!("  preserve ratio {}", pixel.preserve_aspect);
    println!("  enhance        {}", pixel.enhance_mode);
    println!("  interpolation  {}", pixel.interpolation);

    println!("\nEnhance Defaults:");
    println!("  sharpness      {}", enhance.sharpness);
    println!("  contrast       {}", enhance.contrast);
    println!("  saturation     {}", enhance.saturation);
    println!("  denoise        {}", enhance.denoise);

    println!("\nOutput Defaults:");
    println!("  jpeg quality   {}", output.jpeg_quality);
    println!("  optimize png   {}", output.optimize_png);

    let methods: Vec<&str> = Interpolation::ALL.iter().map(|m| m.as_str()).collect();
    println!("\nInterpolation methods: {}", methods.join(", "));

    println!("\nCommands:");
    println!("  pixelsmith pixelate   Convert an image to pixel art");
    println!("  pixelsmith enhance    Enhance image quality");
    println!("  pixelsmith batch      Run jobs from a YAML batch file");
    println!("\nRun 'pixelsmith --help' for more details.");
}
