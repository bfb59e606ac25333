/// Errors produced while resolving a configuration, generating a buffer, or
/// writing it out.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An option name that the validator does not know.
    #[error("unknown option {0}")]
    UnknownOption(String),
    /// An option given as the last token, with nothing following it.
    #[error("value not specified for option {0}")]
    MissingValue(String),
    /// A value that is malformed or out of range for its option.
    #[error("invalid {option} {value}")]
    InvalidValue {
        /// The option or field the value was given for.
        option: &'static str,
        /// The offending value.
        value: String,
    },
    /// An option that depends on another one appearing first.
    #[error("{requires} must be specified before {option}")]
    OutOfOrder {
        /// The dependent option.
        option: &'static str,
        /// The option that has to come first.
        requires: &'static str,
    },
    /// A resolved configuration that violates one of its invariants.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// A generated sample outside the range representable by the bit depth.
    #[error("invalid sample {sample}, expected a value in [{min}, {max}]")]
    SampleOutOfRange {
        /// The generated value.
        sample: i32,
        /// Smallest valid sample.
        min: i32,
        /// Largest valid sample.
        max: i32,
    },
    /// A sample write past the end of the allocated buffer.
    #[error("array index out of bound: index={index}, pixel data size={len}")]
    WriteOutOfBounds {
        /// The byte offset of the write.
        index: usize,
        /// The size of the buffer.
        len: usize,
    },
    /// A self-check case whose output did not match.
    #[error("failed: {name}   cause: {cause}")]
    SelfCheck {
        /// The name of the case.
        name: &'static str,
        /// What was wrong.
        cause: &'static str,
    },
    /// Persisting a buffer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error stems from user input, in which case the usage text
    /// should be shown alongside it.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownOption(_)
                | Error::MissingValue(_)
                | Error::InvalidValue { .. }
                | Error::OutOfOrder { .. }
                | Error::InvalidConfig(_)
        )
    }
}
