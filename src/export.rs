//! Cropping and encoding of exported regions.
//!
//! The rectangle list already fixes position, size, and order; this module
//! copies the pixels out of the source image and encodes each region as PNG.
//! Packaging the results (individual downloads, archives, clipboard) is the
//! consumer's job.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, trace};

use crate::partition::Rectangle;

#[derive(Error, Debug)]
pub enum ExportError {
    /// Export was triggered without an image or while the current parameters
    /// are invalid.
    #[error("nothing to export: no image or no valid partition")]
    Disabled,

    #[error("failed to encode region {index}")]
    Encoding {
        index: usize,
        source: image::ImageError,
    },
}

/// A pixel-exact copy of the source image at one rectangle.
#[derive(Debug, Clone)]
pub struct RegionCrop {
    pub rectangle: Rectangle,
    pub pixels: RgbaImage,
}

/// A finished region: PNG bytes plus the name a download collaborator would
/// give the file.
#[derive(Debug, Clone)]
pub struct EncodedRegion {
    pub rectangle: Rectangle,
    pub file_name: String,
    pub png: Vec<u8>,
}

/// One-based file name for a region, following the download naming scheme.
pub fn region_file_name(index: usize) -> String {
    format!("region_{}.png", index + 1)
}

/// Crops every rectangle out of `image`, in rectangle-index order.
///
/// A direct copy, no resampling. Rectangles are intersected with the image
/// bounds before sampling; rounding never puts them more than a pixel past
/// the edge.
pub fn crop_regions(image: &DynamicImage, rectangles: &[Rectangle]) -> Vec<RegionCrop> {
    let (image_width, image_height) = image.dimensions();
    rectangles
        .iter()
        .map(|&rectangle| {
            let x = rectangle.x.min(image_width);
            let y = rectangle.y.min(image_height);
            let width = rectangle.width.min(image_width - x);
            let height = rectangle.height.min(image_height - y);
            trace!(index = rectangle.index, x, y, width, height, "cropping region");
            let pixels = image.crop_imm(x, y, width, height).to_rgba8();
            RegionCrop { rectangle, pixels }
        })
        .collect()
}

/// Crops and PNG-encodes every rectangle, in rectangle-index order.
///
/// With `parallel` the regions are encoded across the rayon pool; the output
/// order is unaffected either way.
pub fn encode_regions(
    image: &DynamicImage,
    rectangles: &[Rectangle],
    parallel: bool,
) -> Result<Vec<EncodedRegion>, ExportError> {
    debug!(regions = rectangles.len(), parallel, "encoding regions");
    let crops = crop_regions(image, rectangles);
    if parallel {
        crops.into_par_iter().map(encode_region).collect()
    } else {
        crops.into_iter().map(encode_region).collect()
    }
}

fn encode_region(crop: RegionCrop) -> Result<EncodedRegion, ExportError> {
    let mut png = Vec::new();
    crop.pixels
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|source| ExportError::Encoding {
            index: crop.rectangle.index,
            source,
        })?;
    Ok(EncodedRegion {
        rectangle: crop.rectangle,
        file_name: region_file_name(crop.rectangle.index),
        png,
    })
}
