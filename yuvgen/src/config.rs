//! Frame configuration.
//!
//! A [`Config`] is always fully resolved: every field has a value, and the
//! combination is internally consistent. It is built either from command line
//! tokens with [`parse_options`], or programmatically with a
//! [`ConfigBuilder`].

use crate::{Endianness, Error, SampleSource, SubsamplingFormat};

mod options;
pub use options::{parse_options, ConfigOption, USAGE};

/// Smallest accepted width or height.
pub const MIN_DIMENSION: u32 = 64;
/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 4096;
/// Smallest accepted bit depth.
pub const MIN_BIT_DEPTH: u32 = 8;
/// Largest accepted bit depth.
pub const MAX_BIT_DEPTH: u32 = 15;

const DEFAULT_DIMENSION: u32 = 512;

/// A resolved frame configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    width: u32,
    height: u32,
    subsampling: SubsamplingFormat,
    bit_depth: u32,
    signed: bool,
    endianness: Endianness,
    interleaved: bool,
    source: SampleSource,
}

impl Config {
    /// The width of the frame in samples.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The height of the frame in samples.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The chroma subsampling format.
    pub fn subsampling(&self) -> SubsamplingFormat {
        self.subsampling
    }

    /// Whether chroma is subsampled horizontally.
    pub fn downsample_x(&self) -> bool {
        self.subsampling.downsample_x()
    }

    /// Whether chroma is subsampled vertically.
    pub fn downsample_y(&self) -> bool {
        self.subsampling.downsample_y()
    }

    /// Bits per sample, 8-15.
    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    /// Whether samples are two's complement signed values.
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Byte order of two-byte samples.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Shorthand for `endianness() == Endianness::Little`.
    pub fn is_little_endian(&self) -> bool {
        self.endianness == Endianness::Little
    }

    /// Whether samples are stored as Y, Cb, Cr triples per pixel rather than
    /// as three consecutive planes.
    pub fn is_interleaved(&self) -> bool {
        self.interleaved
    }

    /// Where sample values come from.
    pub fn source(&self) -> SampleSource {
        self.source
    }

    /// Shorthand for `source() == SampleSource::Random`.
    pub fn is_random(&self) -> bool {
        self.source == SampleSource::Random
    }

    /// Whether samples need two bytes of storage.
    pub fn is_16bit(&self) -> bool {
        self.bit_depth > 8
    }

    /// Storage size of a single sample.
    pub fn bytes_per_sample(&self) -> usize {
        if self.is_16bit() {
            2
        } else {
            1
        }
    }

    /// The smallest value a sample can take.
    pub fn min_sample_value(&self) -> i32 {
        if self.signed {
            -(1 << (self.bit_depth - 1))
        } else {
            0
        }
    }

    /// The largest value a sample can take.
    pub fn max_sample_value(&self) -> i32 {
        if self.signed {
            (1 << (self.bit_depth - 1)) - 1
        } else {
            (1 << self.bit_depth) - 1
        }
    }

    /// The file name encoding every layout parameter, for example
    /// `sample_512_512_420_unsigned_8bit_LE.yuv`.
    pub fn output_file(&self) -> String {
        let chroma = match self.subsampling {
            SubsamplingFormat::Yuv420 => "20",
            SubsamplingFormat::Yuv422 => "22",
            SubsamplingFormat::Yuv444 => "44",
        };

        format!(
            "sample_{}_{}_4{}_{}_{}bit_{}.yuv",
            self.width,
            self.height,
            chroma,
            if self.signed { "signed" } else { "unsigned" },
            self.bit_depth,
            if self.is_little_endian() { "LE" } else { "BE" },
        )
    }
}

/// A helper for building a [`Config`]. Unset fields take their defaults in
/// [`ConfigBuilder::build`]:
///
/// | field | default |
/// |---|---|
/// | dimensions | 512x512 |
/// | subsampling | 4:4:4 |
/// | bit depth | 8 |
/// | signed | false |
/// | endianness | little |
/// | interleaved | false |
/// | source | random |
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ConfigBuilder {
    width: Option<u32>,
    height: Option<u32>,
    subsampling: Option<SubsamplingFormat>,
    bit_depth: Option<u32>,
    signed: Option<bool>,
    endianness: Option<Endianness>,
    interleaved: Option<bool>,
    source: Option<SampleSource>,
}

impl ConfigBuilder {
    /// Sets the frame size, each in the range 64-4096.
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the chroma subsampling format. 4:2:2 needs an even width, and
    /// 4:2:0 an even width and height.
    pub fn subsampling(mut self, subsampling: SubsamplingFormat) -> Self {
        self.subsampling = Some(subsampling);
        self
    }

    /// Sets the number of bits per sample, 8-15.
    pub fn bit_depth(mut self, bit_depth: u32) -> Self {
        self.bit_depth = Some(bit_depth);
        self
    }

    /// Sets whether samples are signed.
    pub fn signed(mut self, signed: bool) -> Self {
        self.signed = Some(signed);
        self
    }

    /// Sets the byte order. Big endian requires a bit depth above 8.
    pub fn endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = Some(endianness);
        self
    }

    /// Sets whether samples are interleaved per pixel. Only valid with 4:4:4.
    pub fn interleaved(mut self, interleaved: bool) -> Self {
        self.interleaved = Some(interleaved);
        self
    }

    /// Sets the sample source.
    pub fn source(mut self, source: SampleSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Fills in defaults and checks that the combination is consistent.
    pub fn build(self) -> Result<Config, Error> {
        let config = Config {
            width: self.width.unwrap_or(DEFAULT_DIMENSION),
            height: self.height.unwrap_or(DEFAULT_DIMENSION),
            subsampling: self.subsampling.unwrap_or(SubsamplingFormat::Yuv444),
            bit_depth: self.bit_depth.unwrap_or(MIN_BIT_DEPTH),
            signed: self.signed.unwrap_or(false),
            endianness: self.endianness.unwrap_or(Endianness::Little),
            interleaved: self.interleaved.unwrap_or(false),
            source: self.source.unwrap_or(SampleSource::Random),
        };

        let dimension_range = MIN_DIMENSION..=MAX_DIMENSION;
        if !dimension_range.contains(&config.width) || !dimension_range.contains(&config.height) {
            return Err(Error::InvalidConfig(
                "width and height must be in the range [64, 4096]",
            ));
        }

        if !(MIN_BIT_DEPTH..=MAX_BIT_DEPTH).contains(&config.bit_depth) {
            return Err(Error::InvalidConfig(
                "bitdepth must be an integer in the range [8, 15]",
            ));
        }

        if config.downsample_x() && config.width % 2 != 0 {
            return Err(Error::InvalidConfig(
                "width must be even with 4:2:2 and 4:2:0",
            ));
        }

        if config.downsample_y() && config.height % 2 != 0 {
            return Err(Error::InvalidConfig("height must be even with 4:2:0"));
        }

        if config.endianness == Endianness::Big && !config.is_16bit() {
            return Err(Error::InvalidConfig("endian must be little for bitdepth <= 8"));
        }

        if config.interleaved && config.subsampling != SubsamplingFormat::Yuv444 {
            return Err(Error::InvalidConfig(
                "interleaved must be false when downsample is either 4:2:2 or 4:2:0",
            ));
        }

        Ok(config)
    }
}
