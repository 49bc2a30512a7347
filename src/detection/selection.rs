use std::cmp::Ordering;
use image::RgbImage;
use tracing::{debug, warn};
use crate::detection::ocr::TextRecognizer;
use crate::detection::regions::{self, RegionFilter};
use crate::models::{PriceCandidate, RecognizedFragment, Region, SelectionResult};

/// Ranking key for a price candidate.
///
/// Ordered by decimal point first, then glyph height: any candidate with a
/// decimal point outranks every candidate without one, and within the same
/// group the taller text wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityKey {
    pub has_decimal_point: bool,
    pub glyph_height: f32,
}

impl PriorityKey {
    pub fn of(candidate: &PriceCandidate) -> Self {
        Self {
            has_decimal_point: candidate.has_decimal_point,
            glyph_height: candidate.glyph_height,
        }
    }
}

impl Eq for PriorityKey {}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.has_decimal_point
            .cmp(&other.has_decimal_point)
            .then_with(|| self.glyph_height.total_cmp(&other.glyph_height))
    }
}

/// Highest-ranked element by `key`; the earliest one wins ties
fn first_max_by<T, K: Ord>(items: impl IntoIterator<Item = T>, key: impl Fn(&T) -> K) -> Option<T> {
    items
        .into_iter()
        .reduce(|best, item| if key(&item) > key(&best) { item } else { best })
}

/// Pick the most likely price among already recognized fragments
pub fn rank_candidates(fragments: &[RecognizedFragment]) -> Option<SelectionResult> {
    let candidates = fragments.iter().filter_map(PriceCandidate::from_fragment);
    first_max_by(candidates, PriorityKey::of).map(SelectionResult::from)
}

/// Recognize `img` and pick its best price.
///
/// A recognizer failure counts as an empty pass.
pub fn select_best_price<R>(recognizer: &R, img: &RgbImage) -> Option<SelectionResult>
where
    R: TextRecognizer + ?Sized,
{
    let fragments = match recognizer.recognize(img) {
        Ok(fragments) => fragments,
        Err(e) => {
            warn!(error = %e, width = img.width(), height = img.height(), "text recognition failed");
            return None;
        }
    };

    debug!(fragments = fragments.len(), "recognized text");
    rank_candidates(&fragments)
}

/// Run selection inside each price-tag region and keep the tallest winner.
///
/// Winners from different regions are compared by glyph height alone; the
/// decimal-point preference only applies within a region.
pub fn select_from_regions<R>(
    recognizer: &R,
    img: &RgbImage,
    filter: &RegionFilter,
) -> Option<(Region, SelectionResult)>
where
    R: TextRecognizer + ?Sized,
{
    let found = regions::find_regions(img, filter);
    debug!(regions = found.len(), "located price-tag regions");
    select_within(recognizer, img, &found)
}

/// Region pass over an already located set of regions
pub fn select_within<R>(
    recognizer: &R,
    img: &RgbImage,
    regions: &[Region],
) -> Option<(Region, SelectionResult)>
where
    R: TextRecognizer + ?Sized,
{
    let winners = regions.iter().enumerate().filter_map(|(i, region)| {
        let roi = region.crop(img)?;
        let winner = select_best_price(recognizer, &roi);
        match &winner {
            Some(w) => debug!(region = i + 1, price = w.price, text = %w.source_text, "region candidate"),
            None => debug!(region = i + 1, "no price in region"),
        }
        winner.map(|w| (*region, w))
    });

    first_max_by(winners, |(_, w)| HeightKey(w.glyph_height))
}

#[derive(PartialEq)]
struct HeightKey(f32);

impl Eq for HeightKey {}

impl PartialOrd for HeightKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeightKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
