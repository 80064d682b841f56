use std::borrow::Cow;
use std::convert::TryFrom;

use nom::bytes::complete::take;
use nom::combinator::complete;
use nom::error::ParseError;
use nom::multi::many0;
use nom::number::complete as num;
use nom::number::Endianness;
use nom::IResult;
use rusticata_macros::align32;

use crate::PcapNGOptionError;

use super::OptionCode;

/// A pcap-ng option
///
/// `value` holds the raw bytes read from the block, including the padding to 32 bits.
/// Use [`PcapNGOption::as_bytes`] to get the value limited to the declared length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcapNGOption<'a> {
    pub code: OptionCode,
    pub len: u16,
    pub value: Cow<'a, [u8]>,
}

impl<'a> PcapNGOption<'a> {
    /// Build an option borrowing `value`
    pub fn new(code: OptionCode, len: u16, value: &'a [u8]) -> Self {
        PcapNGOption {
            code,
            len,
            value: Cow::Borrowed(value),
        }
    }

    /// Raw option value, including padding (not related to the `len` field)
    #[inline]
    pub fn value(&self) -> &[u8] {
        self.value.as_ref()
    }

    /// Option value, limited to the declared length
    pub fn as_bytes(&self) -> Result<&[u8], PcapNGOptionError> {
        self.value
            .get(..usize::from(self.len))
            .ok_or(PcapNGOptionError::InvalidLength)
    }

    /// Option value interpreted as string
    ///
    /// Trailing NUL bytes are not part of the string.
    pub fn as_str(&self) -> Result<&str, PcapNGOptionError> {
        let b = self.as_bytes()?;
        let end = b.iter().position(|&c| c == 0).unwrap_or(b.len());
        std::str::from_utf8(&b[..end]).or(Err(PcapNGOptionError::Utf8Error))
    }

    /// Option value interpreted as u8 (declared length must be 1)
    pub fn as_u8(&self) -> Result<u8, PcapNGOptionError> {
        match self.as_bytes()? {
            [b] => Ok(*b),
            _ => Err(PcapNGOptionError::InvalidLength),
        }
    }

    /// Option value interpreted as i64, in the byte order of the section (declared length must be 8)
    pub fn as_i64(&self, endianness: Endianness) -> Result<i64, PcapNGOptionError> {
        let b = <[u8; 8]>::try_from(self.as_bytes()?).or(Err(PcapNGOptionError::InvalidLength))?;
        match endianness {
            Endianness::Big => Ok(i64::from_be_bytes(b)),
            _ => Ok(i64::from_le_bytes(b)),
        }
    }
}

/// Parse a pcap-ng option, in the given byte order
pub fn parse_option<'i, E: ParseError<&'i [u8]>>(
    i: &'i [u8],
    endianness: Endianness,
) -> IResult<&'i [u8], PcapNGOption<'i>, E> {
    let (i, code) = num::u16(endianness)(i)?;
    let (i, len) = num::u16(endianness)(i)?;
    let (i, value) = take(align32!(u32::from(len)))(i)?;
    let option = PcapNGOption {
        code: OptionCode(code),
        len,
        value: Cow::Borrowed(value),
    };
    Ok((i, option))
}

/// Parse the options ending a block body
///
/// Trailing bytes too short to hold an option are ignored.
pub(crate) fn parse_options<'i, E: ParseError<&'i [u8]>>(
    i: &'i [u8],
    endianness: Endianness,
) -> IResult<&'i [u8], Vec<PcapNGOption<'i>>, E> {
    many0(complete(move |i| parse_option(i, endianness)))(i)
}

/// Return the first option with the given code, if present
#[inline]
pub fn options_find<'o, 'a>(
    options: &'o [PcapNGOption<'a>],
    code: OptionCode,
) -> Option<&'o PcapNGOption<'a>> {
    options.iter().find(|opt| opt.code == code)
}

/// Return the value of the first option with the given code, as string
///
/// Returns `None` if option is not present, `Some(Ok(value))` if the value is present and valid,
/// or `Some(Err(_))` if value is present but invalid
pub fn options_get_as_str<'o>(
    options: &'o [PcapNGOption],
    code: OptionCode,
) -> Option<Result<&'o str, PcapNGOptionError>> {
    options_find(options, code).map(|opt| opt.as_str())
}

/// Return the value of the first option with the given code, as u8
pub fn options_get_as_u8(
    options: &[PcapNGOption],
    code: OptionCode,
) -> Option<Result<u8, PcapNGOptionError>> {
    options_find(options, code).map(|opt| opt.as_u8())
}

/// Return the value of the first option with the given code, as i64 in the section byte order
pub fn options_get_as_i64(
    options: &[PcapNGOption],
    code: OptionCode,
    endianness: Endianness,
) -> Option<Result<i64, PcapNGOptionError>> {
    options_find(options, code).map(|opt| opt.as_i64(endianness))
}
