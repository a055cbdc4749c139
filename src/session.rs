//! A single editing session: the current image, boundary pair, drag state,
//! and partition parameters behind one explicit context object.
//!
//! Nothing here is ambient or global; independent sessions can coexist and a
//! test drives one exactly the way a UI shell would.

use image::DynamicImage;
use tracing::{info, warn};

use crate::drag::{CursorHint, DisplayScale, DragController};
use crate::export::{encode_regions, EncodedRegion, ExportError};
use crate::partition::{Partition, PartitionMode, PartitionSummary, Rectangle};
use crate::{ParameterError, SmallVecLine};

/// Owns all mutable state for one image-splitting session.
///
/// The image is replaced wholesale on load and discarded on reset. The
/// boundary pair is replaced by value on every parameter change, which also
/// ends any drag in flight, so a stale drag can never touch the new pair.
///
/// # Example
/// ```
/// use gridcut::{PartitionMode, Session};
/// use image::{DynamicImage, RgbaImage};
///
/// let mut session = Session::new();
/// let image = DynamicImage::ImageRgba8(RgbaImage::new(250, 250));
/// session.load_image(image).unwrap();
///
/// let mode = PartitionMode::Grid { block_width: 100.0, block_height: 100.0 };
/// session.set_mode(mode).unwrap();
/// assert_eq!(session.rectangles().len(), 9);
/// ```
#[derive(Debug, Default)]
pub struct Session {
    image: Option<DynamicImage>,
    partition: Option<Partition>,
    drag: DragController,
    mode: PartitionMode,
    scale: DisplayScale,
    parameter_error: Option<ParameterError>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a new source image, replacing any previous one, and re-derives
    /// the boundary pair under the current mode.
    pub fn load_image(&mut self, image: DynamicImage) -> Result<(), ParameterError> {
        info!(
            width = image.width(),
            height = image.height(),
            "loading image"
        );
        self.drag.pointer_up();
        self.image = Some(image);
        self.rederive()
    }

    /// Applies a new partition mode and re-derives.
    ///
    /// On a parameter error the previous valid boundary pair is kept, the
    /// error is recorded (see [`Session::parameter_error`]), and export stays
    /// disabled until a valid parameter set arrives.
    pub fn set_mode(&mut self, mode: PartitionMode) -> Result<(), ParameterError> {
        // A parameter change implicitly ends any drag.
        self.drag.pointer_up();
        self.mode = mode;
        self.rederive()
    }

    fn rederive(&mut self) -> Result<(), ParameterError> {
        let Some(image) = &self.image else {
            return Ok(());
        };
        match Partition::derive(self.mode, image.width(), image.height()) {
            Ok(partition) => {
                self.partition = Some(partition);
                self.parameter_error = None;
                Ok(())
            }
            Err(error) => {
                warn!(%error, "rejecting parameters, keeping current boundaries");
                self.parameter_error = Some(error.clone());
                Err(error)
            }
        }
    }

    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    pub fn mode(&self) -> PartitionMode {
        self.mode
    }

    pub fn partition(&self) -> Option<&Partition> {
        self.partition.as_ref()
    }

    /// The error that blocked the most recent re-derivation, if any.
    pub fn parameter_error(&self) -> Option<&ParameterError> {
        self.parameter_error.as_ref()
    }

    /// Updates the display-to-image scale used for pointer translation.
    pub fn set_display_scale(&mut self, scale: DisplayScale) {
        self.scale = scale;
    }

    /// Pointer pressed on the interactive surface, display coordinates.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        match &self.partition {
            Some(partition) => self.drag.pointer_down(partition, x, y, self.scale),
            None => false,
        }
    }

    /// Pointer moved; drives the active drag, if any.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<f64> {
        let partition = self.partition.as_mut()?;
        self.drag.pointer_move(partition, x, y, self.scale)
    }

    /// Pointer released or left the surface.
    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    /// Cursor affordance for the current pointer position.
    pub fn cursor_hint(&self, x: f64, y: f64) -> CursorHint {
        match &self.partition {
            Some(partition) => self.drag.cursor_hint(partition, x, y, self.scale),
            None => CursorHint::Neutral,
        }
    }

    /// Current rectangles in row-major order; empty without an image.
    pub fn rectangles(&self) -> SmallVecLine<Rectangle> {
        self.partition
            .as_ref()
            .map(Partition::rectangles)
            .unwrap_or_default()
    }

    pub fn summary(&self) -> Option<PartitionSummary> {
        self.partition.as_ref().map(Partition::summary)
    }

    /// Whether the export trigger should be enabled.
    pub fn export_enabled(&self) -> bool {
        self.image.is_some() && self.partition.is_some() && self.parameter_error.is_none()
    }

    /// Crops and encodes every region of the current partition.
    pub fn export(&self) -> Result<Vec<EncodedRegion>, ExportError> {
        let (Some(image), Some(partition)) = (&self.image, &self.partition) else {
            return Err(ExportError::Disabled);
        };
        if self.parameter_error.is_some() {
            return Err(ExportError::Disabled);
        }
        encode_regions(image, &partition.rectangles(), true)
    }

    /// Discards the image, boundaries, and drag state and restores the
    /// default parameters.
    pub fn reset(&mut self) {
        info!("resetting session");
        *self = Self::default();
    }
}
