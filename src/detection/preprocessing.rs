use image::{GrayImage, Luma, Rgb, RgbImage};

/// Inclusive HSV bounds on the 8-bit scale (H in 0..=180, S and V in 0..=255)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    /// Low saturation, high brightness: plausible price-tag paper
    pub const NEAR_WHITE: HsvRange = HsvRange {
        lower: [0, 0, 180],
        upper: [180, 50, 255],
    };

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| hsv[i] >= self.lower[i] && hsv[i] <= self.upper[i])
    }
}

/// Convert one RGB pixel to 8-bit HSV (hue halved to fit 0..180)
pub fn rgb_to_hsv(pixel: &Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0.map(f32::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max == 0.0 { 0.0 } else { 255.0 * delta / max };

    let mut h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if h < 0.0 {
        h += 360.0;
    }

    [
        (h / 2.0).round().min(180.0) as u8,
        s.round() as u8,
        max as u8,
    ]
}

/// Binary mask: 255 where the pixel's HSV falls inside `range`, 0 elsewhere
pub fn hsv_mask(img: &RgbImage, range: HsvRange) -> GrayImage {
    let (width, height) = img.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if range.contains(rgb_to_hsv(img.get_pixel(x, y))) {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}
