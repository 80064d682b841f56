use nom::error::{ErrorKind, ParseError};
use thiserror::Error;

/// The error type which is returned when reading a pcap-ng capture
///
/// A capture cut in the middle of a block is reported as `nom::Err::Incomplete`.
#[derive(Debug, Error, PartialEq)]
pub enum PcapError<I: Sized> {
    /// Capture does not start with a Section Header Block, or its byte-order magic is invalid
    #[error("Header not recognized as PCAPNG")]
    HeaderNotRecognized,

    /// An error encountered during parsing
    #[error("Internal parser error {1:?}")]
    NomError(I, ErrorKind),
    /// An error encountered during parsing (owned version)
    #[error("Internal parser error {1:?}")]
    OwnedNomError(Vec<u8>, ErrorKind),
}

impl<I> PcapError<I> {
    /// Creates a `PcapError` from input and error kind.
    pub fn from_data(input: I, errorkind: ErrorKind) -> Self {
        Self::NomError(input, errorkind)
    }
}

impl<I> PcapError<I>
where
    I: AsRef<[u8]> + Sized,
{
    /// Creates an owned `PcapError` object from borrowed data, cloning object.
    /// Owned object has `'static` lifetime.
    pub fn to_owned_vec(&self) -> PcapError<Vec<u8>> {
        match self {
            PcapError::HeaderNotRecognized => PcapError::HeaderNotRecognized,
            PcapError::NomError(i, e) => PcapError::OwnedNomError(i.as_ref().to_vec(), *e),
            PcapError::OwnedNomError(v, e) => PcapError::OwnedNomError(v.clone(), *e),
        }
    }
}

impl<I> ParseError<I> for PcapError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        PcapError::NomError(input, kind)
    }
    fn append(input: I, kind: ErrorKind, _other: Self) -> Self {
        PcapError::NomError(input, kind)
    }
}

/// Error raised when reading the typed value of a pcap-ng option
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PcapNGOptionError {
    /// Declared option length is inconsistent with the stored value or the expected type
    #[error("Invalid length")]
    InvalidLength,
    /// String option does not contain valid UTF-8
    #[error("Invalid UTF-8 string")]
    Utf8Error,
}

/// Domain violation of the fixed-point coordinate codec
///
/// Values are never clamped: a coordinate outside the representable range is rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GeoError {
    /// Degree value outside `(-180.0000001, 180.0000001)`, or not a number
    #[error("{0} is an invalid degree value")]
    DegreesOutOfRange(f64),
    /// Raw fixed-point value greater than the largest encodable value
    #[error("{0} is an invalid fixed-point value")]
    FixedOutOfRange(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcap_error_to_owned() {
        let data = [1u8, 2, 3];
        let e = PcapError::from_data(&data[..], ErrorKind::Verify);
        assert_eq!(
            e.to_owned_vec(),
            PcapError::OwnedNomError(vec![1, 2, 3], ErrorKind::Verify)
        );
        let e: PcapError<&[u8]> = PcapError::HeaderNotRecognized;
        assert_eq!(e.to_owned_vec(), PcapError::HeaderNotRecognized);
    }

    #[test]
    fn geo_error_display() {
        let e = GeoError::FixedOutOfRange(3_600_000_001);
        assert_eq!(e.to_string(), "3600000001 is an invalid fixed-point value");
    }
}
