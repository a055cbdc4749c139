use image::DynamicImage;

use crate::drawing::{draw_partition_overlay, OverlayConfig};
use crate::partition::Partition;

/// Saves the image with the partition's boundary lines drawn on it.
///
/// Handy while tuning parameters: the output is exactly what an overlay
/// collaborator would render.
///
/// # Errors
/// Returns [`image::ImageError`] if saving fails.
pub fn save_image_with_partition(
    image: &DynamicImage,
    partition: &Partition,
    output_path: &str,
    config: &OverlayConfig,
) -> Result<(), image::ImageError> {
    let mut rgba_img = image.to_rgba8();
    draw_partition_overlay(&mut rgba_img, partition, config);
    rgba_img.save(output_path)
}
