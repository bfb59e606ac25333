use log::debug;
use rand::Rng;

use crate::sample::{
    mask_to_bit_depth, to_storage_order, FixedSamples, RandomSamples, SampleGenerator,
};
use crate::{Config, Error, Plane, SampleSource};

/// Byte sizes of the planes of a frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Layout {
    bytes_per_sample: usize,
    luma_bytes: usize,
    chroma_bytes: usize,
}

impl Layout {
    /// Computes the plane sizes for a configuration.
    pub fn new(config: &Config) -> Self {
        let bytes_per_sample = config.bytes_per_sample();
        let luma_bytes = config.width() as usize * config.height() as usize * bytes_per_sample;

        Layout {
            bytes_per_sample,
            luma_bytes,
            chroma_bytes: luma_bytes / config.subsampling().chroma_divisor(),
        }
    }

    /// Storage size of a single sample, 1 or 2.
    pub fn bytes_per_sample(&self) -> usize {
        self.bytes_per_sample
    }

    /// Size of the luma plane in bytes.
    pub fn luma_bytes(&self) -> usize {
        self.luma_bytes
    }

    /// Size of each chroma plane in bytes.
    pub fn chroma_bytes(&self) -> usize {
        self.chroma_bytes
    }

    /// Size of a plane in bytes.
    pub fn plane_bytes(&self, plane: Plane) -> usize {
        match plane {
            Plane::Y => self.luma_bytes,
            Plane::Cb | Plane::Cr => self.chroma_bytes,
        }
    }

    /// Number of samples in a plane.
    pub fn plane_samples(&self, plane: Plane) -> usize {
        self.plane_bytes(plane) / self.bytes_per_sample
    }

    /// Size of the whole frame in bytes.
    pub fn total_bytes(&self) -> usize {
        self.luma_bytes + 2 * self.chroma_bytes
    }
}

/// A generated frame: serialized samples in either planar or interleaved
/// order.
pub struct PixelBuffer {
    data: Vec<u8>,
    layout: Layout,
    interleaved: bool,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("layout", &self.layout)
            .field("interleaved", &self.interleaved)
            .field("len", &self.data.len())
            .finish()
    }
}

impl PixelBuffer {
    /// The plane sizes the buffer was generated with.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Whether samples are stored per pixel rather than per plane.
    pub fn is_interleaved(&self) -> bool {
        self.interleaved
    }

    /// Total size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw bytes of the whole frame.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The raw bytes of a single plane. Interleaved buffers have no
    /// contiguous planes, and return `None`.
    pub fn plane(&self, plane: Plane) -> Option<&[u8]> {
        if self.interleaved {
            return None;
        }

        let start: usize = Plane::ALL
            .iter()
            .take_while(|&&p| p != plane)
            .map(|&p| self.layout.plane_bytes(p))
            .sum();

        Some(&self.data[start..start + self.layout.plane_bytes(plane)])
    }

    /// Consumes the buffer, returning the raw bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl AsRef<[u8]> for PixelBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Generates a frame for `config`, drawing random samples from the thread
/// local generator if the configuration asks for them.
pub fn generate(config: &Config) -> Result<PixelBuffer, Error> {
    generate_with_rng(config, rand::thread_rng())
}

/// Like [`generate`], but draws random samples from `rng`.
pub fn generate_with_rng<R: Rng>(config: &Config, rng: R) -> Result<PixelBuffer, Error> {
    match config.source() {
        SampleSource::Random => generate_with(config, &mut RandomSamples::new(config, rng)),
        SampleSource::Fixed => generate_with(config, &mut FixedSamples::new(config)),
    }
}

/// Generates a frame for `config` with samples from `samples`.
///
/// Fails without returning a partial buffer if a sample is out of range for
/// the bit depth, or a write would land outside the buffer.
pub fn generate_with(
    config: &Config,
    samples: &mut impl SampleGenerator,
) -> Result<PixelBuffer, Error> {
    let layout = Layout::new(config);
    debug!(
        "generating {} bytes: luma {} bytes, chroma 2x{} bytes, {} byte(s) per sample",
        layout.total_bytes(),
        layout.luma_bytes(),
        layout.chroma_bytes(),
        layout.bytes_per_sample(),
    );

    let mut writer = SampleWriter::new(config, layout.total_bytes());

    if config.is_interleaved() {
        for _ in 0..layout.plane_samples(Plane::Y) {
            for plane in Plane::ALL {
                writer.put(samples.next_sample(plane)?)?;
            }
        }
    } else {
        for plane in Plane::ALL {
            for _ in 0..layout.plane_samples(plane) {
                writer.put(samples.next_sample(plane)?)?;
            }
        }
    }

    let data = writer.finish();
    debug_assert_eq!(layout.total_bytes(), data.len());

    Ok(PixelBuffer {
        data,
        layout,
        interleaved: config.is_interleaved(),
    })
}

/// Serializes samples into a preallocated buffer, masking each one to the bit
/// depth and storing it in the configured byte order.
struct SampleWriter<'a> {
    config: &'a Config,
    data: Vec<u8>,
    index: usize,
}

impl<'a> SampleWriter<'a> {
    fn new(config: &'a Config, len: usize) -> Self {
        SampleWriter {
            config,
            data: vec![0; len],
            index: 0,
        }
    }

    fn put(&mut self, sample: i32) -> Result<(), Error> {
        let width = self.config.bytes_per_sample();
        let end = self.index + width;
        if end > self.data.len() {
            return Err(Error::WriteOutOfBounds {
                index: self.index,
                len: self.data.len(),
            });
        }

        let raw = to_storage_order(mask_to_bit_depth(sample, self.config.bit_depth()), self.config);
        if width == 2 {
            self.data[self.index..end].copy_from_slice(&raw.to_le_bytes());
        } else {
            self.data[self.index] = raw as u8;
        }

        self.index = end;
        Ok(())
    }

    fn finish(self) -> Vec<u8> {
        let mut data = self.data;
        data.truncate(self.index);
        data
    }
}
