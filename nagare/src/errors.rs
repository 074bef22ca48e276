//! Definition of errors.

use std::error::Error;
use std::fmt;

/// A specialized Result type for Nagare.
pub type Result<T, E = NagareError> = std::result::Result<T, E>;

/// The error type for Nagare.
#[derive(Debug)]
pub enum NagareError {
    /// The error variant for [`InvalidArgumentError`].
    InvalidArgument(InvalidArgumentError),

    /// The error variant for [`std::io::Error`].
    StdIo(std::io::Error),

    /// The error variant for [`VibratoError`](vibrato::errors::VibratoError).
    Vibrato(vibrato::errors::VibratoError),

    /// The error variant for [`regex::Error`].
    Regex(regex::Error),
}

impl NagareError {
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }
}

impl fmt::Display for NagareError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidArgument(e) => e.fmt(f),
            Self::StdIo(e) => e.fmt(f),
            Self::Vibrato(e) => e.fmt(f),
            Self::Regex(e) => e.fmt(f),
        }
    }
}

impl Error for NagareError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(e) => Some(e),
            Self::StdIo(e) => Some(e),
            Self::Vibrato(e) => Some(e),
            Self::Regex(e) => Some(e),
        }
    }
}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl InvalidArgumentError {
    /// Gets the name of the rejected argument.
    pub fn arg(&self) -> &'static str {
        self.arg
    }
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

impl From<std::io::Error> for NagareError {
    fn from(error: std::io::Error) -> Self {
        Self::StdIo(error)
    }
}

impl From<vibrato::errors::VibratoError> for NagareError {
    fn from(error: vibrato::errors::VibratoError) -> Self {
        Self::Vibrato(error)
    }
}

impl From<regex::Error> for NagareError {
    fn from(error: regex::Error) -> Self {
        Self::Regex(error)
    }
}
