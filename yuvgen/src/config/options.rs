use log::debug;

use crate::{Endianness, Error, SampleSource, SubsamplingFormat};

use super::{Config, ConfigBuilder, MAX_BIT_DEPTH, MAX_DIMENSION, MIN_BIT_DEPTH, MIN_DIMENSION};

/// Usage synopsis shown alongside configuration errors.
pub const USAGE: &str = "
Usage:

  yuvgen -dimension {width}x{height} -downsample {4:4:4 | 4:2:2 | 4:2:0} -bitdepth {depth} -endian {little | big} -signed {true | false} -interleaved {true | false} -random {true | false}
  yuvgen -runtests

  width and height must be in the range [64, 4096]
  width must be even with 4:2:2 and 4:2:0
  height must be even with 4:2:0
  bitdepth must be an integer in the range [8, 15]
  endian must be little for bitdepth <= 8
  interleaved must be false when downsample is either 4:2:2 or 4:2:0
  if random is true, the samples are generated using a random number generator; if false, sample values are fixed
";

/// A recognized command line option.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigOption {
    /// `-dimension {width}x{height}`
    Dimension,
    /// `-downsample {4:4:4 | 4:2:2 | 4:2:0}`, after `-dimension` for the
    /// subsampled formats.
    Downsample,
    /// `-bitdepth {8-15}`
    BitDepth,
    /// `-endian {little | big}`, after `-bitdepth`.
    Endian,
    /// `-signed {true | false}`
    Signed,
    /// `-interleaved {true | false}`, after `-downsample`.
    Interleaved,
    /// `-random {true | false}`
    Random,
}

impl ConfigOption {
    /// Looks up an option by its flag, including the leading dash.
    pub fn from_flag(flag: &str) -> Option<Self> {
        Some(match flag {
            "-dimension" => ConfigOption::Dimension,
            "-downsample" => ConfigOption::Downsample,
            "-bitdepth" => ConfigOption::BitDepth,
            "-endian" => ConfigOption::Endian,
            "-signed" => ConfigOption::Signed,
            "-interleaved" => ConfigOption::Interleaved,
            "-random" => ConfigOption::Random,
            _ => return None,
        })
    }

    /// The option name, without the dash.
    pub fn name(self) -> &'static str {
        match self {
            ConfigOption::Dimension => "dimension",
            ConfigOption::Downsample => "downsample",
            ConfigOption::BitDepth => "bitdepth",
            ConfigOption::Endian => "endian",
            ConfigOption::Signed => "signed",
            ConfigOption::Interleaved => "interleaved",
            ConfigOption::Random => "random",
        }
    }

    /// Validates `value` against the option's format and the options already
    /// applied to `builder`, and returns the updated builder.
    pub fn apply(self, value: &str, builder: ConfigBuilder) -> Result<ConfigBuilder, Error> {
        let invalid = || Error::InvalidValue {
            option: self.name(),
            value: value.to_owned(),
        };

        match self {
            ConfigOption::Dimension => {
                let (width, height) = value
                    .split_once('x')
                    .filter(|(w, h)| is_decimal(w) && is_decimal(h))
                    .ok_or_else(invalid)?;
                Ok(builder.dimensions(
                    parse_dimension("width", width)?,
                    parse_dimension("height", height)?,
                ))
            }
            ConfigOption::Downsample => {
                let format = SubsamplingFormat::from_notation(value).ok_or_else(invalid)?;
                if format.downsample_x() {
                    let width = builder.width.ok_or_else(|| self.requires(ConfigOption::Dimension))?;
                    if width % 2 != 0 {
                        return Err(invalid());
                    }
                }

                if format.downsample_y() {
                    let height = builder.height.ok_or_else(|| self.requires(ConfigOption::Dimension))?;
                    if height % 2 != 0 {
                        return Err(invalid());
                    }
                }

                Ok(builder.subsampling(format))
            }
            ConfigOption::BitDepth => {
                let bit_depth = (MIN_BIT_DEPTH..=MAX_BIT_DEPTH)
                    .find(|depth| depth.to_string() == value)
                    .ok_or_else(invalid)?;
                Ok(builder.bit_depth(bit_depth))
            }
            ConfigOption::Endian => {
                let endianness = match value {
                    "little" => Endianness::Little,
                    "big" => Endianness::Big,
                    _ => return Err(invalid()),
                };

                let bit_depth = builder
                    .bit_depth
                    .ok_or_else(|| self.requires(ConfigOption::BitDepth))?;
                if endianness == Endianness::Big && bit_depth <= 8 {
                    return Err(invalid());
                }

                Ok(builder.endianness(endianness))
            }
            ConfigOption::Signed => {
                let signed = parse_bool(value).ok_or_else(invalid)?;
                Ok(builder.signed(signed))
            }
            ConfigOption::Interleaved => {
                let interleaved = parse_bool(value).ok_or_else(invalid)?;
                let format = builder
                    .subsampling
                    .ok_or_else(|| self.requires(ConfigOption::Downsample))?;
                if interleaved && format != SubsamplingFormat::Yuv444 {
                    return Err(invalid());
                }

                Ok(builder.interleaved(interleaved))
            }
            ConfigOption::Random => {
                let random = parse_bool(value).ok_or_else(invalid)?;
                Ok(builder.source(if random {
                    SampleSource::Random
                } else {
                    SampleSource::Fixed
                }))
            }
        }
    }

    fn requires(self, other: ConfigOption) -> Error {
        Error::OutOfOrder {
            option: self.name(),
            requires: other.name(),
        }
    }
}

/// Resolves a configuration from `-option value` token pairs, stopping at the
/// first invalid option. Options may repeat; the last value wins.
pub fn parse_options<S: AsRef<str>>(tokens: &[S]) -> Result<Config, Error> {
    let mut builder = ConfigBuilder::default();

    let mut tokens = tokens.iter().map(AsRef::as_ref);
    while let Some(flag) = tokens.next() {
        let option =
            ConfigOption::from_flag(flag).ok_or_else(|| Error::UnknownOption(flag.to_owned()))?;
        let value = tokens
            .next()
            .ok_or_else(|| Error::MissingValue(flag.to_owned()))?;

        builder = option.apply(value, builder)?;
    }

    let config = builder.build()?;
    debug!("resolved configuration: {:?}", config);

    Ok(config)
}

// Only plain decimal digits; `str::parse` would also accept a leading sign.
fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_dimension(option: &'static str, value: &str) -> Result<u32, Error> {
    value
        .parse()
        .ok()
        .filter(|v| (MIN_DIMENSION..=MAX_DIMENSION).contains(v))
        .ok_or_else(|| Error::InvalidValue {
            option,
            value: value.to_owned(),
        })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: &[&str]) -> Result<Config, Error> {
        parse_options(tokens)
    }

    #[test]
    fn empty_uses_defaults() {
        let config = parse(&[]).expect("no options is valid");
        assert_eq!(ConfigBuilder::default().build().unwrap(), config);
    }

    #[test]
    fn full_option_set() {
        let config = parse(&[
            "-dimension",
            "64x128",
            "-downsample",
            "4:2:0",
            "-signed",
            "true",
            "-bitdepth",
            "12",
            "-endian",
            "big",
            "-interleaved",
            "false",
            "-random",
            "false",
        ])
        .expect("valid options");

        assert_eq!(64, config.width());
        assert_eq!(128, config.height());
        assert_eq!(SubsamplingFormat::Yuv420, config.subsampling());
        assert!(config.is_signed());
        assert_eq!(12, config.bit_depth());
        assert_eq!(Endianness::Big, config.endianness());
        assert!(!config.is_interleaved());
        assert_eq!(SampleSource::Fixed, config.source());
        assert!(config.is_16bit());
        assert_eq!("sample_64_128_420_signed_12bit_BE.yuv", config.output_file());
    }

    #[test]
    fn unknown_option() {
        let err = parse(&["-depth", "8"]).unwrap_err();
        assert!(matches!(err, Error::UnknownOption(ref o) if o == "-depth"));

        // Flags need the dash.
        assert!(matches!(
            parse(&["bitdepth", "8"]),
            Err(Error::UnknownOption(_))
        ));
    }

    #[test]
    fn missing_value() {
        let err = parse(&["-bitdepth", "10", "-signed"]).unwrap_err();
        assert!(matches!(err, Error::MissingValue(ref o) if o == "-signed"));
    }

    #[test]
    fn stops_at_first_error() {
        let err = parse(&["-bitdepth", "16", "-bogus", "1"]).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { option: "bitdepth", .. }));
    }

    #[test]
    fn dimension_format() {
        for bad in ["64", "64x", "x64", "64X64", "64x64x64", "+64x64", "64 x64", "-64x64", ""] {
            let err = parse(&["-dimension", bad]).unwrap_err();
            assert!(
                matches!(err, Error::InvalidValue { option: "dimension", .. }),
                "{bad:?} was accepted"
            );
        }
    }

    #[test]
    fn dimension_range() {
        assert!(parse(&["-dimension", "64x4096"]).is_ok());

        let err = parse(&["-dimension", "63x64"]).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { option: "width", ref value } if value == "63"));

        let err = parse(&["-dimension", "64x4097"]).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { option: "height", .. }));

        assert!(parse(&["-dimension", "99999999999999x64"]).is_err());
    }

    #[test]
    fn bit_depth() {
        for depth in 8..=15 {
            let depth_arg = depth.to_string();
            let config = parse(&["-bitdepth", depth_arg.as_str()]).unwrap();
            assert_eq!(depth, config.bit_depth());
        }

        for bad in ["7", "16", "08", "1", "eight", "", " 8"] {
            assert!(parse(&["-bitdepth", bad]).is_err(), "{bad:?} was accepted");
        }
    }

    #[test]
    fn downsample() {
        let config = parse(&["-dimension", "64x64", "-downsample", "4:2:2"]).unwrap();
        assert_eq!(SubsamplingFormat::Yuv422, config.subsampling());

        let config = parse(&["-downsample", "4:4:4"]).unwrap();
        assert_eq!(SubsamplingFormat::Yuv444, config.subsampling());

        let err = parse(&["-dimension", "64x64", "-downsample", "4:1:1"]).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { option: "downsample", .. }));
    }

    #[test]
    fn downsample_requires_dimension() {
        for format in ["4:2:2", "4:2:0"] {
            let err = parse(&["-downsample", format]).unwrap_err();
            assert!(matches!(
                err,
                Error::OutOfOrder {
                    option: "downsample",
                    requires: "dimension"
                }
            ));
        }
    }

    #[test]
    fn downsample_requires_even_dimensions() {
        assert!(parse(&["-dimension", "65x64", "-downsample", "4:2:2"]).is_err());
        assert!(parse(&["-dimension", "64x65", "-downsample", "4:2:2"]).is_ok());
        assert!(parse(&["-dimension", "64x65", "-downsample", "4:2:0"]).is_err());
        assert!(parse(&["-dimension", "65x65", "-downsample", "4:4:4"]).is_ok());
    }

    #[test]
    fn endian() {
        let config = parse(&["-bitdepth", "10", "-endian", "big"]).unwrap();
        assert!(!config.is_little_endian());

        let config = parse(&["-bitdepth", "8", "-endian", "little"]).unwrap();
        assert!(config.is_little_endian());

        assert!(parse(&["-bitdepth", "10", "-endian", "BIG"]).is_err());
    }

    #[test]
    fn big_endian_rejected_for_8bit() {
        let err = parse(&["-bitdepth", "8", "-endian", "big"]).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { option: "endian", .. }));
    }

    #[test]
    fn endian_requires_bit_depth() {
        for endian in ["big", "little"] {
            let err = parse(&["-endian", endian]).unwrap_err();
            assert!(matches!(
                err,
                Error::OutOfOrder {
                    option: "endian",
                    requires: "bitdepth"
                }
            ));
        }
    }

    #[test]
    fn interleaved() {
        let config = parse(&["-downsample", "4:4:4", "-interleaved", "true"]).unwrap();
        assert!(config.is_interleaved());

        let config = parse(&[
            "-dimension",
            "64x64",
            "-downsample",
            "4:2:0",
            "-interleaved",
            "false",
        ])
        .unwrap();
        assert!(!config.is_interleaved());
    }

    #[test]
    fn interleaved_rejected_with_subsampling() {
        let err = parse(&[
            "-dimension",
            "64x64",
            "-downsample",
            "4:2:0",
            "-interleaved",
            "true",
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { option: "interleaved", .. }));
    }

    #[test]
    fn interleaved_requires_downsample() {
        let err = parse(&["-interleaved", "false"]).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfOrder {
                option: "interleaved",
                requires: "downsample"
            }
        ));
    }

    #[test]
    fn booleans() {
        assert!(parse(&["-signed", "true"]).unwrap().is_signed());
        assert!(!parse(&["-random", "false"]).unwrap().is_random());

        for option in ["-signed", "-random"] {
            for bad in ["1", "yes", "True", ""] {
                assert!(parse(&[option, bad]).is_err(), "{option} {bad:?} was accepted");
            }
        }
    }

    #[test]
    fn later_dimension_is_checked_against_subsampling() {
        let err = parse(&[
            "-dimension",
            "64x64",
            "-downsample",
            "4:2:0",
            "-dimension",
            "65x64",
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn option_lookup() {
        for option in [
            ConfigOption::Dimension,
            ConfigOption::Downsample,
            ConfigOption::BitDepth,
            ConfigOption::Endian,
            ConfigOption::Signed,
            ConfigOption::Interleaved,
            ConfigOption::Random,
        ] {
            let flag = format!("-{}", option.name());
            assert_eq!(Some(option), ConfigOption::from_flag(&flag));
        }
    }
}
