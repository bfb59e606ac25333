//! Sample value sources, and the per-sample transforms applied before a value
//! is stored.

use rand::distributions::Open01;
use rand::Rng;

use crate::{Config, Error, Plane};

/// Produces the logical value of the next sample for a plane.
///
/// Implementations return values in `[min_sample_value, max_sample_value]`
/// of the configuration they were created for.
pub trait SampleGenerator {
    /// The next sample for `plane`.
    fn next_sample(&mut self, plane: Plane) -> Result<i32, Error>;
}

/// Uniformly distributed samples over the full range of the bit depth.
#[derive(Debug)]
pub struct RandomSamples<R> {
    rng: R,
    bit_depth: u32,
    signed: bool,
    min: i32,
    max: i32,
}

impl<R: Rng> RandomSamples<R> {
    /// Creates a generator drawing from `rng`.
    pub fn new(config: &Config, rng: R) -> Self {
        Self {
            rng,
            bit_depth: config.bit_depth(),
            signed: config.is_signed(),
            min: config.min_sample_value(),
            max: config.max_sample_value(),
        }
    }
}

impl<R: Rng> SampleGenerator for RandomSamples<R> {
    fn next_sample(&mut self, _plane: Plane) -> Result<i32, Error> {
        let unit: f64 = self.rng.sample(Open01);

        let mut value = unit * f64::from(1u32 << self.bit_depth);
        if self.signed {
            value -= f64::from(1u32 << (self.bit_depth - 1));
        }

        let sample = value.floor() as i32;
        if sample < self.min || sample > self.max {
            return Err(Error::SampleOutOfRange {
                sample,
                min: self.min,
                max: self.max,
            });
        }

        Ok(sample)
    }
}

/// A constant per plane, derived from the plane's tag character.
///
/// Unsigned 8-bit samples are the tag's ASCII code, unsigned samples above 8
/// bits are `0x0100` plus the code, and signed samples are the negated code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedSamples {
    signed: bool,
    is_16bit: bool,
}

impl FixedSamples {
    /// Creates a generator for the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            signed: config.is_signed(),
            is_16bit: config.is_16bit(),
        }
    }

    /// The constant for `plane`.
    pub fn value(&self, plane: Plane) -> i32 {
        let code = i32::from(plane.tag());
        if self.signed {
            -code
        } else if self.is_16bit {
            0x0100 + code
        } else {
            code
        }
    }
}

impl SampleGenerator for FixedSamples {
    fn next_sample(&mut self, plane: Plane) -> Result<i32, Error> {
        Ok(self.value(plane))
    }
}

/// Truncates a sample to its low `bit_depth` bits. Negative values wrap as
/// two's complement.
pub fn mask_to_bit_depth(sample: i32, bit_depth: u32) -> u16 {
    (sample & ((1 << bit_depth) - 1)) as u16
}

/// Reorders a masked sample so that storing it little-endian yields the
/// configured byte order. Only two-byte big-endian samples change.
pub fn to_storage_order(sample: u16, config: &Config) -> u16 {
    if config.is_16bit() && !config.is_little_endian() {
        sample.swap_bytes()
    } else {
        sample
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{ConfigBuilder, Endianness};

    fn config(bit_depth: u32, signed: bool) -> Config {
        ConfigBuilder::default()
            .bit_depth(bit_depth)
            .signed(signed)
            .build()
            .unwrap()
    }

    #[test]
    fn random_samples_stay_in_range() {
        for bit_depth in 8..=15 {
            for signed in [false, true] {
                let config = config(bit_depth, signed);
                let mut samples = RandomSamples::new(&config, ChaCha8Rng::seed_from_u64(7));

                for _ in 0..10_000 {
                    let sample = samples.next_sample(Plane::Y).expect("sample in range");
                    assert!(sample >= config.min_sample_value());
                    assert!(sample <= config.max_sample_value());
                }
            }
        }
    }

    #[test]
    fn random_samples_cover_both_signs() {
        let config = config(8, true);
        let mut samples = RandomSamples::new(&config, ChaCha8Rng::seed_from_u64(1));

        let drawn: Vec<i32> = (0..1_000)
            .map(|_| samples.next_sample(Plane::Cr).unwrap())
            .collect();

        assert!(drawn.iter().any(|&s| s < 0));
        assert!(drawn.iter().any(|&s| s > 0));
    }

    #[test]
    fn random_samples_are_reproducible_with_a_seed() {
        let config = config(10, false);
        let mut a = RandomSamples::new(&config, ChaCha8Rng::seed_from_u64(42));
        let mut b = RandomSamples::new(&config, ChaCha8Rng::seed_from_u64(42));

        for _ in 0..100 {
            assert_eq!(
                a.next_sample(Plane::Y).unwrap(),
                b.next_sample(Plane::Y).unwrap()
            );
        }
    }

    #[test]
    fn fixed_values() {
        let unsigned8 = FixedSamples::new(&config(8, false));
        assert_eq!(89, unsigned8.value(Plane::Y));
        assert_eq!(66, unsigned8.value(Plane::Cb));
        assert_eq!(82, unsigned8.value(Plane::Cr));

        let unsigned12 = FixedSamples::new(&config(12, false));
        assert_eq!(0x0159, unsigned12.value(Plane::Y));
        assert_eq!(0x0142, unsigned12.value(Plane::Cb));
        assert_eq!(0x0152, unsigned12.value(Plane::Cr));

        for bit_depth in [8, 12] {
            let signed = FixedSamples::new(&config(bit_depth, true));
            assert_eq!(-89, signed.value(Plane::Y));
            assert_eq!(-66, signed.value(Plane::Cb));
            assert_eq!(-82, signed.value(Plane::Cr));
        }
    }

    #[test]
    fn masking() {
        assert_eq!(0xA7, mask_to_bit_depth(-89, 8));
        assert_eq!(0x0FA7, mask_to_bit_depth(-89, 12));
        assert_eq!(0x7FFF, mask_to_bit_depth(-1, 15));
        assert_eq!(0x0059, mask_to_bit_depth(0x0159, 8));
        assert_eq!(0x0159, mask_to_bit_depth(0x0159, 9));
        assert_eq!(0, mask_to_bit_depth(-2048, 11));
    }

    #[test]
    fn masked_samples_fit_bit_depth() {
        for bit_depth in 8..=15 {
            let max = (1u16 << bit_depth) - 1;
            for sample in [i32::MIN, -32768, -89, -1, 0, 1, 255, 4095, 32767, i32::MAX] {
                assert!(mask_to_bit_depth(sample, bit_depth) <= max);
            }
        }
    }

    #[test]
    fn storage_order() {
        let little = config(12, false);
        let big = ConfigBuilder::default()
            .bit_depth(12)
            .endianness(Endianness::Big)
            .build()
            .unwrap();

        assert_eq!(0x0FA7, to_storage_order(0x0FA7, &little));
        assert_eq!(0xA70F, to_storage_order(0x0FA7, &big));

        // Swapping is its own inverse.
        let swapped = to_storage_order(0x0FA7, &big);
        assert_eq!(0x0FA7, to_storage_order(swapped, &big));

        // Single bytes are never reordered.
        assert_eq!(0x00A7, to_storage_order(0x00A7, &config(8, true)));
    }
}
