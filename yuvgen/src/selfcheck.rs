//! A built-in suite of fixed-sample scenarios, run by `yuvgen -runtests`.
//!
//! Each case resolves a configuration from command line tokens, generates a
//! 64x64 frame, and compares every byte against the expected pattern.

use log::info;

use crate::{generate, parse_options, Error};

/// A run of identical sample groups.
#[derive(Debug, Copy, Clone)]
pub struct Segment {
    /// The bytes of one group: a single sample, or a Y/Cb/Cr triple when
    /// interleaved.
    pub pattern: &'static [u8],
    /// How many times the group repeats.
    pub repeat: usize,
}

/// A self-check scenario.
#[derive(Debug, Copy, Clone)]
pub struct Case {
    /// Name reported on success or failure.
    pub name: &'static str,
    /// Command line tokens.
    pub options: &'static [&'static str],
    /// Expected buffer size in bytes.
    pub expected_len: usize,
    /// Expected contents, in order.
    pub segments: &'static [Segment],
}

// Negated tags masked to 8 bits: -'Y', -'B' and -'R'.
const NEG_Y: u8 = 0xA7;
const NEG_B: u8 = 0xBE;
const NEG_R: u8 = 0xAE;

const fn seg(pattern: &'static [u8], repeat: usize) -> Segment {
    Segment { pattern, repeat }
}

const CASES: &[Case] = &[
    Case {
        name: "signed_8bit_LE_sequential_fixed_downsampleX",
        options: &[
            "-dimension", "64x64", "-downsample", "4:2:2", "-signed", "true", "-bitdepth", "8",
            "-endian", "little", "-interleaved", "false", "-random", "false",
        ],
        expected_len: 8192,
        segments: &[seg(&[NEG_Y], 4096), seg(&[NEG_B], 2048), seg(&[NEG_R], 2048)],
    },
    Case {
        name: "signed_16bit_LE_sequential_fixed_downsampleX",
        options: &[
            "-dimension", "64x64", "-downsample", "4:2:2", "-signed", "true", "-bitdepth", "12",
            "-endian", "little", "-interleaved", "false", "-random", "false",
        ],
        expected_len: 16384,
        segments: &[
            seg(&[NEG_Y, 0x0F], 4096),
            seg(&[NEG_B, 0x0F], 2048),
            seg(&[NEG_R, 0x0F], 2048),
        ],
    },
    Case {
        name: "signed_16bit_BE_sequential_fixed_downsampleX",
        options: &[
            "-dimension", "64x64", "-downsample", "4:2:2", "-signed", "true", "-bitdepth", "12",
            "-endian", "big", "-interleaved", "false", "-random", "false",
        ],
        expected_len: 16384,
        segments: &[
            seg(&[0x0F, NEG_Y], 4096),
            seg(&[0x0F, NEG_B], 2048),
            seg(&[0x0F, NEG_R], 2048),
        ],
    },
    Case {
        name: "unsigned_8bit_LE_sequential_fixed_downsampleX",
        options: &[
            "-dimension", "64x64", "-downsample", "4:2:2", "-signed", "false", "-bitdepth", "8",
            "-endian", "little", "-interleaved", "false", "-random", "false",
        ],
        expected_len: 8192,
        segments: &[seg(b"Y", 4096), seg(b"B", 2048), seg(b"R", 2048)],
    },
    Case {
        name: "unsigned_16bit_LE_sequential_fixed_downsampleX",
        options: &[
            "-dimension", "64x64", "-downsample", "4:2:2", "-signed", "false", "-bitdepth", "12",
            "-endian", "little", "-interleaved", "false", "-random", "false",
        ],
        expected_len: 16384,
        segments: &[
            seg(&[b'Y', 0x01], 4096),
            seg(&[b'B', 0x01], 2048),
            seg(&[b'R', 0x01], 2048),
        ],
    },
    Case {
        name: "unsigned_16bit_BE_sequential_fixed_downsampleX",
        options: &[
            "-dimension", "64x64", "-downsample", "4:2:2", "-signed", "false", "-bitdepth", "12",
            "-endian", "big", "-interleaved", "false", "-random", "false",
        ],
        expected_len: 16384,
        segments: &[
            seg(&[0x01, b'Y'], 4096),
            seg(&[0x01, b'B'], 2048),
            seg(&[0x01, b'R'], 2048),
        ],
    },
    Case {
        name: "unsigned_8bit_LE_sequential_fixed_downsampleXY",
        options: &[
            "-dimension", "64x64", "-downsample", "4:2:0", "-signed", "false", "-bitdepth", "8",
            "-endian", "little", "-interleaved", "false", "-random", "false",
        ],
        expected_len: 6144,
        segments: &[seg(b"Y", 4096), seg(b"B", 1024), seg(b"R", 1024)],
    },
    Case {
        name: "unsigned_16bit_LE_sequential_fixed_downsampleXY",
        options: &[
            "-dimension", "64x64", "-downsample", "4:2:0", "-signed", "false", "-bitdepth", "12",
            "-endian", "little", "-interleaved", "false", "-random", "false",
        ],
        expected_len: 12288,
        segments: &[
            seg(&[b'Y', 0x01], 4096),
            seg(&[b'B', 0x01], 1024),
            seg(&[b'R', 0x01], 1024),
        ],
    },
    Case {
        name: "unsigned_16bit_BE_sequential_fixed_downsampleXY",
        options: &[
            "-dimension", "64x64", "-downsample", "4:2:0", "-signed", "false", "-bitdepth", "12",
            "-endian", "big", "-interleaved", "false", "-random", "false",
        ],
        expected_len: 12288,
        segments: &[
            seg(&[0x01, b'Y'], 4096),
            seg(&[0x01, b'B'], 1024),
            seg(&[0x01, b'R'], 1024),
        ],
    },
    Case {
        name: "signed_16bit_LE_interleave_fixed",
        options: &[
            "-dimension", "64x64", "-downsample", "4:4:4", "-signed", "true", "-bitdepth", "12",
            "-endian", "little", "-interleaved", "true", "-random", "false",
        ],
        expected_len: 24576,
        segments: &[seg(&[NEG_Y, 0x0F, NEG_B, 0x0F, NEG_R, 0x0F], 4096)],
    },
    Case {
        name: "signed_16bit_BE_interleave_fixed",
        options: &[
            "-dimension", "64x64", "-downsample", "4:4:4", "-signed", "true", "-bitdepth", "12",
            "-endian", "big", "-interleaved", "true", "-random", "false",
        ],
        expected_len: 24576,
        segments: &[seg(&[0x0F, NEG_Y, 0x0F, NEG_B, 0x0F, NEG_R], 4096)],
    },
    Case {
        name: "unsigned_8bit_LE_interleave_fixed",
        options: &[
            "-dimension", "64x64", "-downsample", "4:4:4", "-signed", "false", "-bitdepth", "8",
            "-endian", "little", "-interleaved", "true", "-random", "false",
        ],
        expected_len: 12288,
        segments: &[seg(b"YBR", 4096)],
    },
    Case {
        name: "unsigned_16bit_LE_interleave_fixed",
        options: &[
            "-dimension", "64x64", "-downsample", "4:4:4", "-signed", "false", "-bitdepth", "12",
            "-endian", "little", "-interleaved", "true", "-random", "false",
        ],
        expected_len: 24576,
        segments: &[seg(&[b'Y', 0x01, b'B', 0x01, b'R', 0x01], 4096)],
    },
    Case {
        name: "unsigned_16bit_BE_interleave_fixed",
        options: &[
            "-dimension", "64x64", "-downsample", "4:4:4", "-signed", "false", "-bitdepth", "12",
            "-endian", "big", "-interleaved", "true", "-random", "false",
        ],
        expected_len: 24576,
        segments: &[seg(&[0x01, b'Y', 0x01, b'B', 0x01, b'R'], 4096)],
    },
];

/// The scenarios run by [`run`].
pub fn cases() -> &'static [Case] {
    CASES
}

/// Checks a single scenario.
pub fn check(case: &Case) -> Result<(), Error> {
    let fail = |cause| Error::SelfCheck {
        name: case.name,
        cause,
    };

    let config = parse_options(case.options)?;
    let buffer = generate(&config)?;
    let bytes = buffer.as_bytes();

    if bytes.len() != case.expected_len {
        return Err(fail("wrong pixel data size"));
    }

    let mut index = 0;
    for segment in case.segments {
        for _ in 0..segment.repeat {
            let end = index + segment.pattern.len();
            if bytes.get(index..end) != Some(segment.pattern) {
                return Err(fail("wrong pixel value"));
            }
            index = end;
        }
    }

    if index != bytes.len() {
        return Err(fail("wrong index"));
    }

    Ok(())
}

/// Runs every scenario, stopping at the first failure. Returns the number of
/// cases that passed.
pub fn run() -> Result<usize, Error> {
    for case in CASES {
        check(case)?;
        info!("passed: {}", case.name);
    }

    Ok(CASES.len())
}
