//! Synthetic raw YUV sample buffers, for feeding video pipelines with frames
//! of a known layout.
//!
//! A [`Config`] describes the frame: dimensions, chroma subsampling, bit
//! depth, signedness, byte order, interleaving and where sample values come
//! from. [`generate`] turns it into a [`PixelBuffer`] holding the serialized
//! bytes, ready to be written out with [`output::write_to_file`].
//!
//! # Example
//!
//! ```
//! # use yuvgen::{ConfigBuilder, Plane, SampleSource, SubsamplingFormat};
//! # fn main() -> Result<(), yuvgen::Error> {
//! let config = ConfigBuilder::default()
//!     .dimensions(64, 64)
//!     .subsampling(SubsamplingFormat::Yuv420)
//!     .source(SampleSource::Fixed)
//!     .build()?;
//!
//! let buffer = yuvgen::generate(&config)?;
//! assert_eq!(buffer.len(), 64 * 64 + 2 * 32 * 32);
//!
//! // Fixed 8-bit unsigned samples carry the plane tag.
//! assert!(buffer.plane(Plane::Cb).unwrap().iter().all(|&b| b == b'B'));
//! # Ok(())
//! # }
//! ```

#![warn(
    anonymous_parameters,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    single_use_lifetimes,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_qualifications
)]

mod buffer;
pub use buffer::{generate, generate_with, generate_with_rng, Layout, PixelBuffer};

pub mod config;
pub use config::{parse_options, Config, ConfigBuilder};

mod error;
pub use error::Error;

pub mod output;
pub mod sample;
pub mod selfcheck;

/// The chroma subsampling format of a YUV picture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubsamplingFormat {
    /// 4:2:0 chroma subsampling.
    ///
    /// Each chroma plane is half the width and half the height of the luma plane.
    Yuv420,
    /// 4:2:2 chroma subsampling.
    ///
    /// Each chroma plane is half the width of the luma plane, but the same height.
    Yuv422,
    /// 4:4:4 chroma subsampling.
    ///
    /// The chroma planes are the same size as the luma plane.
    Yuv444,
}

impl SubsamplingFormat {
    /// Whether chroma is subsampled horizontally.
    pub fn downsample_x(self) -> bool {
        matches!(self, SubsamplingFormat::Yuv420 | SubsamplingFormat::Yuv422)
    }

    /// Whether chroma is subsampled vertically.
    pub fn downsample_y(self) -> bool {
        matches!(self, SubsamplingFormat::Yuv420)
    }

    /// The number of luma samples covered by a single chroma sample.
    pub fn chroma_divisor(self) -> usize {
        match self {
            SubsamplingFormat::Yuv420 => 4,
            SubsamplingFormat::Yuv422 => 2,
            SubsamplingFormat::Yuv444 => 1,
        }
    }

    /// The notation used on the command line, e.g. `4:2:0`.
    pub fn notation(self) -> &'static str {
        match self {
            SubsamplingFormat::Yuv420 => "4:2:0",
            SubsamplingFormat::Yuv422 => "4:2:2",
            SubsamplingFormat::Yuv444 => "4:4:4",
        }
    }

    /// Parses the command line notation. Returns `None` for anything but
    /// `4:4:4`, `4:2:2` and `4:2:0`.
    pub fn from_notation(s: &str) -> Option<Self> {
        match s {
            "4:2:0" => Some(SubsamplingFormat::Yuv420),
            "4:2:2" => Some(SubsamplingFormat::Yuv422),
            "4:4:4" => Some(SubsamplingFormat::Yuv444),
            _ => None,
        }
    }
}

/// A plane of a YUV picture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(usize)]
pub enum Plane {
    /// The luma plane.
    Y = 0,
    /// The blue-difference chroma plane.
    Cb = 1,
    /// The red-difference chroma plane.
    Cr = 2,
}

impl Plane {
    /// All planes, in storage order.
    pub const ALL: [Plane; 3] = [Plane::Y, Plane::Cb, Plane::Cr];

    /// The single character tag identifying the plane: `Y`, `B` or `R`.
    pub fn tag(self) -> u8 {
        match self {
            Plane::Y => b'Y',
            Plane::Cb => b'B',
            Plane::Cr => b'R',
        }
    }
}

/// Byte order of two-byte samples.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Endianness {
    /// Least significant byte first.
    Little,
    /// Most significant byte first. Only meaningful above 8 bits per sample.
    Big,
}

/// Where sample values come from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SampleSource {
    /// Uniformly distributed values over the full sample range.
    Random,
    /// A constant per plane, derived from the plane tag.
    Fixed,
}
