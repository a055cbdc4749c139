//! Drawing of boundary lines onto an image, for previewing a partition
//! without a UI shell. Feature-gated under `drawing`.
//!
//! # Examples
//!
//! ```rust
//! use gridcut::{drawing::*, Partition, PartitionMode};
//! use image::RgbaImage;
//!
//! let mode = PartitionMode::Grid { block_width: 100.0, block_height: 100.0 };
//! let partition = Partition::derive(mode, 250, 250).unwrap();
//!
//! let mut canvas = RgbaImage::new(250, 250);
//! draw_partition_overlay(&mut canvas, &partition, &OverlayConfig::default());
//! ```

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::partition::Partition;

/// Colors and line weight for the boundary overlay.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Color for horizontal boundary lines (row edges).
    pub row_color: Rgba<u8>,
    /// Color for vertical boundary lines (column edges).
    pub column_color: Rgba<u8>,
    /// Thickness of boundary lines in pixels.
    pub line_thickness: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            row_color: Rgba([255, 0, 0, 255]),    // Red
            column_color: Rgba([0, 0, 255, 255]), // Blue
            line_thickness: 2,
        }
    }
}

/// Draws the interior boundary lines of `partition` onto `image`.
///
/// Endpoints are skipped; they coincide with the image edges.
pub fn draw_partition_overlay(image: &mut RgbaImage, partition: &Partition, config: &OverlayConfig) {
    let (width, height) = image.dimensions();

    for &y in partition.y.interior() {
        for offset in 0..config.line_thickness {
            let line_y = y as f32 + offset as f32;
            draw_line_segment_mut(
                image,
                (0.0, line_y),
                (width as f32, line_y),
                config.row_color,
            );
        }
    }

    for &x in partition.x.interior() {
        for offset in 0..config.line_thickness {
            let line_x = x as f32 + offset as f32;
            draw_line_segment_mut(
                image,
                (line_x, 0.0),
                (line_x, height as f32),
                config.column_color,
            );
        }
    }
}
