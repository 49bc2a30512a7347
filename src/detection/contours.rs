use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use crate::models::Region;

/// Copy of `mask` with a one-pixel background frame.
///
/// `find_contours` reports components starting in column 0 as holes, so
/// every component must be kept off the image edge.
fn with_background_frame(mask: &GrayImage) -> GrayImage {
    let mut framed = GrayImage::new(mask.width() + 2, mask.height() + 2);
    image::imageops::replace(&mut framed, mask, 1, 1);
    framed
}

/// Bounding rectangles of the outermost foreground borders in a binary mask.
///
/// Only outer borders without a parent are kept, so shapes nested inside the
/// holes of another component are skipped. Order follows the raster scan in
/// which each border was first met.
pub fn external_bounding_boxes(mask: &GrayImage) -> Vec<Region> {
    find_contours::<i32>(&with_background_frame(mask))
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .filter_map(|contour| {
            let mut points = contour.points.iter();
            let first = points.next()?;
            let (min_x, min_y, max_x, max_y) = points.fold(
                (first.x, first.y, first.x, first.y),
                |(min_x, min_y, max_x, max_y), p| {
                    (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
                },
            );

            // Undo the frame offset
            Some(Region {
                x: (min_x - 1) as u32,
                y: (min_y - 1) as u32,
                width: (max_x - min_x + 1) as u32,
                height: (max_y - min_y + 1) as u32,
            })
        })
        .collect()
}
