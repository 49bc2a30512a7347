use image::RgbImage;
use crate::detection::{contours, preprocessing};
use crate::detection::preprocessing::HsvRange;
use crate::models::Region;

/// Size and shape limits for a price-tag region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionFilter {
    pub color: HsvRange,
    pub min_width: u32,
    pub min_height: u32,
    /// Minimum width / height; rejects tall or narrow shapes
    pub min_aspect_ratio: f32,
}

impl Default for RegionFilter {
    fn default() -> Self {
        Self {
            color: HsvRange::NEAR_WHITE,
            min_width: 80,
            min_height: 30,
            min_aspect_ratio: 1.2,
        }
    }
}

impl RegionFilter {
    pub fn accepts(&self, region: &Region) -> bool {
        region.width >= self.min_width
            && region.height >= self.min_height
            && region.aspect_ratio() >= self.min_aspect_ratio
    }
}

/// Find every near-white, landscape rectangle that may hold a price tag
pub fn find_regions(img: &RgbImage, filter: &RegionFilter) -> Vec<Region> {
    let mask = preprocessing::hsv_mask(img, filter.color);
    filter_regions(&contours::external_bounding_boxes(&mask), filter)
}

/// Keep only the boxes `filter` accepts, preserving order
pub fn filter_regions(boxes: &[Region], filter: &RegionFilter) -> Vec<Region> {
    boxes
        .iter()
        .filter(|r| filter.accepts(r))
        .copied()
        .collect()
}
