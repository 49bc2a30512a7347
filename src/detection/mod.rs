pub mod preprocessing;
pub mod contours;
pub mod regions;
pub mod price;
pub mod selection;
pub mod ocr;

use std::path::PathBuf;
use anyhow::Context;
use image::{DynamicImage, RgbImage};
use tracing::{debug, info};
use crate::error::PriceError;
use crate::models::{Detection, DetectionSource, Region};
use self::ocr::TextRecognizer;
use self::regions::RegionFilter;

/// Price detection orchestrator: price-tag regions first, then the full image
pub struct PriceDetector<R> {
    recognizer: R,
    pub filter: RegionFilter,
    debug_dir: Option<PathBuf>,
}

impl<R: TextRecognizer> PriceDetector<R> {
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            filter: RegionFilter::default(),
            debug_dir: None,
        }
    }

    pub fn with_filter(mut self, filter: RegionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Save intermediate images to `output_dir`, which must be empty or missing
    pub fn with_debug(mut self, output_dir: PathBuf) -> anyhow::Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                anyhow::bail!("Debug directory is not empty: {}", output_dir.display());
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug_dir = Some(output_dir);
        Ok(self)
    }

    /// Detect the single most likely price in `img`
    pub fn detect(&self, img: &DynamicImage) -> Result<Detection, PriceError> {
        let rgb = img.to_rgb8();
        self.detect_rgb(&rgb)
    }

    pub fn detect_rgb(&self, img: &RgbImage) -> Result<Detection, PriceError> {
        let found = regions::find_regions(img, &self.filter);
        debug!(regions = found.len(), "located price-tag regions");

        if let Some(dir) = &self.debug_dir {
            if let Err(e) = self.save_debug_output(dir, img, &found) {
                tracing::warn!(error = %e, "failed to write debug output");
            }
        }

        if let Some((region, selection)) = selection::select_within(&self.recognizer, img, &found) {
            info!(price = selection.price, text = %selection.source_text, ?region, "price found on price tag");
            return Ok(Detection {
                selection,
                source: DetectionSource::PriceTag(region),
            });
        }

        debug!("no price inside price-tag regions, searching full image");
        match selection::select_best_price(&self.recognizer, img) {
            Some(selection) => {
                info!(price = selection.price, text = %selection.source_text, "price found in full image");
                Ok(Detection {
                    selection,
                    source: DetectionSource::FullImage,
                })
            }
            None => Err(PriceError::NoPriceFound),
        }
    }

    fn save_debug_output(&self, dir: &std::path::Path, img: &RgbImage, found: &[Region]) -> anyhow::Result<()> {
        img.save(dir.join("00_input.png"))
            .context("Failed to save debug input")?;

        let mask = preprocessing::hsv_mask(img, self.filter.color);
        mask.save(dir.join("01_white_mask.png"))
            .context("Failed to save debug mask")?;

        let regions_dir = dir.join("02_regions");
        std::fs::create_dir_all(&regions_dir)?;
        for (idx, region) in found.iter().enumerate() {
            if let Some(roi) = region.crop(img) {
                roi.save(regions_dir.join(format!("{:02}.png", idx + 1)))
                    .context("Failed to save debug region")?;
            }
        }

        debug!(dir = %dir.display(), regions = found.len(), "saved debug images");
        Ok(())
    }
}
