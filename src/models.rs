use image::RgbImage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One piece of text reported by a text recognizer
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedFragment {
    pub quad: [Point; 4],
    pub text: String,
    pub confidence: f32,
}

impl RecognizedFragment {
    pub fn new(quad: [Point; 4], text: impl Into<String>, confidence: f32) -> Self {
        Self {
            quad,
            text: text.into(),
            confidence,
        }
    }

    /// Build a fragment from an axis-aligned box
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32, text: impl Into<String>) -> Self {
        let quad = [
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ];
        Self::new(quad, text, 1.0)
    }

    /// Pixel height of the quad: max y minus min y over the four corners
    pub fn glyph_height(&self) -> f32 {
        let (min_y, max_y) = self
            .quad
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            });
        max_y - min_y
    }
}

/// A price parsed out of one fragment, ready for ranking
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCandidate {
    pub value: f64,
    pub has_decimal_point: bool,
    pub glyph_height: f32,
    pub source_text: String,
}

/// Axis-aligned rectangle in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Crop this region out of `img`, clamped to the image bounds
    pub fn crop(&self, img: &RgbImage) -> Option<RgbImage> {
        if self.x >= img.width() || self.y >= img.height() {
            return None;
        }
        let width = self.width.min(img.width() - self.x);
        let height = self.height.min(img.height() - self.y);

        if width == 0 || height == 0 {
            return None;
        }

        Some(image::imageops::crop_imm(img, self.x, self.y, width, height).to_image())
    }
}

/// The winning candidate of one selection pass
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult {
    pub price: f64,
    pub source_text: String,
    pub glyph_height: f32,
}

impl From<PriceCandidate> for SelectionResult {
    fn from(candidate: PriceCandidate) -> Self {
        Self {
            price: candidate.value,
            source_text: candidate.source_text,
            glyph_height: candidate.glyph_height,
        }
    }
}

/// Where the detected price came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectionSource {
    /// Found inside a near-white price-tag region
    PriceTag(Region),
    /// Region pass found nothing; the whole image was searched
    FullImage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub selection: SelectionResult,
    pub source: DetectionSource,
}

impl Detection {
    pub fn price(&self) -> f64 {
        self.selection.price
    }

    pub fn from_price_tag(&self) -> bool {
        matches!(self.source, DetectionSource::PriceTag(_))
    }
}
