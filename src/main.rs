use anyhow::Context;
use clap::Parser;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::UtcOffset;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::EnvFilter;

use tagprice::conversion::format_won;
use tagprice::{
    Config, Currency, CurrencyApiClient, DetectionSource, OcrsRecognizer, PriceDetector, Session,
};

#[derive(Parser)]
#[command(name = "tagprice")]
#[command(about = "Read the price off a photographed price tag and convert it to Korean won")]
struct Cli {
    /// Path to a PNG or JPEG photo of the price tag
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Currency the price is written in
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = Currency::Usd)]
    currency: Currency,

    /// Use this price instead of the detected one
    #[arg(short, long, value_name = "AMOUNT", value_parser = parse_manual_price)]
    price: Option<f64>,

    /// currencyapi.com key (overrides CURRENCY_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Rate service base URL (overrides CURRENCY_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Directory holding text-detection.rten and text-recognition.rten
    #[arg(long, value_name = "DIR")]
    models_dir: Option<PathBuf>,

    /// Rate request timeout in seconds (overrides RATE_TIMEOUT_SECS)
    #[arg(long, value_name = "SECS", value_parser = tagprice::config::parse_timeout_secs)]
    timeout_secs: Option<u64>,

    /// Save debug images to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Stop after price detection
    #[arg(long)]
    skip_conversion: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Manual prices must be non-negative numbers
fn parse_manual_price(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("price must be 0 or more, got {}", s));
    }
    Ok(value)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "tagprice=debug,info" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_image(path: &Path) -> anyhow::Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()?;

    match reader.format() {
        Some(ImageFormat::Png | ImageFormat::Jpeg) => {}
        other => anyhow::bail!("Unsupported image format {:?}: expected PNG or JPEG", other),
    }

    reader
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let mut config = Config::from_env()?;
    if let Some(key) = args.api_key {
        config.api_key = Some(key);
    }
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(dir) = args.models_dir {
        config.models_dir = Some(dir);
    }
    if let Some(secs) = args.timeout_secs {
        config.rate_timeout = Duration::from_secs(secs);
    }

    let img = load_image(&args.image_path)?;
    tracing::debug!(width = img.width(), height = img.height(), "image loaded");

    let recognizer = OcrsRecognizer::from_dir(config.models_dir()?)
        .context("Failed to initialize OCR engine (run `ocrs-cli` once to download models)")?;
    let mut detector = PriceDetector::new(recognizer);
    if let Some(debug_dir) = args.debug_out {
        detector = detector.with_debug(debug_dir)?;
    }

    let mut session = Session::new();
    let detection = session
        .analyze(&detector, &img)
        .context("Could not find a price in the image")?;

    println!("\n=== Price Detection ===");
    match detection.source {
        DetectionSource::PriceTag(region) => println!(
            "Found on a white price tag at ({}, {}) {}x{}",
            region.x, region.y, region.width, region.height
        ),
        DetectionSource::FullImage => {
            println!("No price tag found; using the largest number in the whole image")
        }
    }
    println!("Recognized text: {}", detection.selection.source_text);
    println!("Detected price:  {}", detection.price());

    if let (Some(price), Some(analysis)) = (args.price, session.analysis_mut()) {
        analysis.override_price(price);
        println!("Using entered price: {}", price);
    }

    if args.skip_conversion {
        return Ok(());
    }

    let client = CurrencyApiClient::new(config.api_key()?, config.api_url.as_str(), config.rate_timeout)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let conversion = runtime
        .block_on(session.convert(&client, args.currency))
        .context("Exchange rate lookup failed")?;

    println!("\n=== Conversion ===");
    println!("Current rate: 1 {} = {} KRW", conversion.base, conversion.rate);
    if let Some(updated) = conversion.last_updated {
        let local = updated.to_offset(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));
        if let Ok(stamp) = local.format(&Rfc3339) {
            println!("Rate updated: {}", stamp);
        }
    }
    println!("In Korean won: {:.2} KRW", conversion.converted);
    println!("               ₩{}", format_won(conversion.whole_won()));

    Ok(())
}
