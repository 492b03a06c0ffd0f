use bytes::TryGetError;
use hex::FromHexError;
use std::fmt::Formatter;

/// Standard Result used in the library
pub type Result<T> = std::result::Result<T, Error>;

/// Standard error type used in the library
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Field elements with different moduli were combined.
    DomainMismatch,
    /// Points on different curves were combined.
    CurveMismatch,
    /// The coordinates do not satisfy the curve equation.
    PointNotOnCurve,
    /// A SEC point encoding could not be decoded.
    InvalidEncoding(String),
    /// A scalar is out of range, or signing produced a zero r or s.
    InvalidScalar,
    /// Attempted to divide by (or invert) the zero element.
    DivisionByZero,
    /// The buffer ended before the structure being decoded.
    TruncatedInput,
    /// The buffer is shorter than the transaction it claims to contain.
    IncompleteTransaction,
    /// The value can not be encoded as a varint.
    IntegerTooLarge(u128),
    /// An argument provided is invalid
    BadArgument(String),
    /// The data provided is invalid
    BadData(String),
    /// Hex string could not be decoded
    FromHexError(FromHexError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Error::DomainMismatch => f.write_str("field elements belong to different fields"),
            Error::CurveMismatch => f.write_str("points belong to different curves"),
            Error::PointNotOnCurve => f.write_str("point is not on the curve"),
            Error::InvalidEncoding(s) => f.write_str(&format!("Invalid SEC encoding: {}", s)),
            Error::InvalidScalar => f.write_str("scalar out of range"),
            Error::DivisionByZero => f.write_str("division by zero"),
            Error::TruncatedInput => f.write_str("input truncated"),
            Error::IncompleteTransaction => f.write_str("incomplete transaction"),
            Error::IntegerTooLarge(v) => f.write_str(&format!("integer too large: {}", v)),
            Error::BadArgument(s) => f.write_str(&format!("Bad argument: {}", s)),
            Error::BadData(s) => f.write_str(&format!("Bad data: {}", s)),
            Error::FromHexError(e) => f.write_str(&format!("Hex decoding error: {}", e)),
        }
    }
}

impl std::error::Error for Error {}

impl From<FromHexError> for Error {
    fn from(e: FromHexError) -> Self {
        Error::FromHexError(e)
    }
}

impl From<TryGetError> for Error {
    fn from(_: TryGetError) -> Self {
        Error::TruncatedInput
    }
}
