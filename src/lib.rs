//! Interactive partitioning of a single raster image into axis-aligned regions.
//!
//! The crate is built around a pair of boundary arrays, one per axis: ordered
//! coordinate sequences `[0, b1, .., bn, L]` that mark where the image is cut.
//! [`Partition::derive`] produces the pair from a [`PartitionMode`] (row count,
//! column count, or fixed-size grid tiling), [`DragController`] mutates single
//! boundaries in response to pointer events while keeping the arrays valid,
//! and [`export::encode_regions`] turns the final rectangles into encoded
//! crops of the source image.
//!
//! File loading, overlay rendering, and download plumbing are collaborators:
//! the crate only consumes an [`image::DynamicImage`] and pointer coordinates,
//! and hands back boundary positions, rectangles, and encoded bytes.
//!
//! # Example
//! ```
//! use gridcut::{Partition, PartitionMode};
//!
//! let mode = PartitionMode::Grid {
//!     block_width: 100.0,
//!     block_height: 100.0,
//! };
//! let partition = Partition::derive(mode, 250, 250).unwrap();
//!
//! assert_eq!(partition.x.positions(), &[0.0, 100.0, 200.0, 250.0]);
//! assert_eq!(partition.rectangles().len(), 9);
//! ```
pub mod boundary;
pub mod drag;
pub mod export;
pub mod partition;
pub mod session;

/// Debug helper for writing the partition overlay to disk, feature-gated
/// together with [`drawing`].
#[cfg(feature = "drawing")]
pub mod debug;
/// Overlay rendering of boundary lines onto an image, feature-gated under the
/// `drawing` feature and backed by the `image` and `imageproc` crates.
#[cfg(feature = "drawing")]
pub mod drawing;

use smallvec::SmallVec;
use thiserror::Error;

/// Minimum permitted slice size in image pixels, enforced on every boundary
/// mutation, not just at creation.
pub const MIN_SLICE: f64 = 5.0;

const DEFAULT_SMALLVEC_SIZE: usize = 32;

/// A type alias for SmallVec with an optimized stack-allocated buffer size.
pub type SmallVecLine<T> = SmallVec<[T; DEFAULT_SMALLVEC_SIZE]>;

/// An externally supplied boundary list violates the boundary-array
/// invariants.
///
/// Not reachable through [`Partition::derive`] or dragging, which produce or
/// preserve valid arrays by construction; this guards direct construction
/// from untrusted coordinates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundaryError {
    #[error("axis length must be positive and finite, got {length}")]
    InvalidLength { length: f64 },

    #[error("boundary {index} is not a finite coordinate")]
    NonFinite { index: usize },

    #[error("boundary {index} at {value} lies outside the open interval (0, {length})")]
    OutOfRange {
        index: usize,
        value: f64,
        length: f64,
    },

    #[error("boundary {index} at {value} does not increase past {previous}")]
    NotIncreasing {
        index: usize,
        value: f64,
        previous: f64,
    },

    #[error("slice before boundary {index} is {gap}px, below the minimum slice size")]
    GapBelowMinimum { index: usize, gap: f64 },
}

/// A user-supplied partition parameter set cannot produce a valid boundary
/// pair for the current image.
///
/// Always recoverable: the caller keeps its previous boundaries, surfaces the
/// message, and disables export until a valid set arrives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("invalid image dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("{name} is not a finite number")]
    NonFinite { name: &'static str },

    #[error("{name} is {value}px, below the minimum slice size")]
    BelowMinimum { name: &'static str, value: f64 },

    #[error("count must be at least 1")]
    ZeroCount,

    #[error("{count} slices of {size}px do not fit in {axis_length}px")]
    Overflow {
        count: u32,
        size: f64,
        axis_length: f64,
    },
}

pub use boundary::BoundarySet;
pub use drag::{Axis, CursorHint, DisplayScale, DragController, HIT_TOLERANCE};
pub use export::{crop_regions, encode_regions, EncodedRegion, ExportError, RegionCrop};
pub use partition::{Partition, PartitionMode, PartitionSummary, Rectangle, ScanOrder};
pub use session::Session;
