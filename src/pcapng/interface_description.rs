use nom::error::ParseError;
use nom::number::complete as num;
use nom::number::Endianness;
use nom::IResult;

use crate::{Linktype, PcapNGOption};

use super::*;

/// An Interface Description Block (IDB) is the container for information
/// describing an interface on which packet data is captured.
///
/// `if_tsresol` and `if_tsoffset` are read from the options when the block is parsed, using the
/// byte order of the section. Absent or invalid values are replaced by the defaults
/// ([`DEFAULT_TSRESOL`] and `0`).
#[derive(Debug)]
pub struct InterfaceDescriptionBlock<'a> {
    pub linktype: Linktype,
    pub snaplen: u32,
    pub options: Vec<PcapNGOption<'a>>,
    pub if_tsresol: u8,
    /// Offset added to packet timestamps, in seconds
    pub if_tsoffset: i64,
    pub big_endian: bool,
}

impl<'a> InterfaceDescriptionBlock<'a> {
    /// Decode the interface time resolution, in units per second
    ///
    /// Return the resolution, or `None` if the resolution is invalid (for ex. greater than `2^64`)
    #[inline]
    pub fn ts_resolution(&self) -> Option<u64> {
        build_ts_resolution(self.if_tsresol)
    }
}

impl<'a> PcapNGOptions for InterfaceDescriptionBlock<'a> {
    fn options(&self) -> &[PcapNGOption] {
        &self.options
    }
}

pub(crate) fn parse_interfacedescription_body<'a, E: ParseError<&'a [u8]>>(
    i: &'a [u8],
    endianness: Endianness,
) -> IResult<&'a [u8], InterfaceDescriptionBlock<'a>, E> {
    let (i, linktype) = num::u16(endianness)(i)?;
    let (i, _reserved) = num::u16(endianness)(i)?;
    let (i, snaplen) = num::u32(endianness)(i)?;
    let (i, options) = parse_options::<E>(i, endianness)?;
    let if_tsresol = match options_get_as_u8(&options, OptionCode::IfTsresol) {
        Some(Ok(v)) => v,
        _ => DEFAULT_TSRESOL,
    };
    let if_tsoffset = match options_get_as_i64(&options, OptionCode::IfTsoffset, endianness) {
        Some(Ok(v)) => v,
        _ => 0,
    };
    let block = InterfaceDescriptionBlock {
        linktype: Linktype(i32::from(linktype)),
        snaplen,
        options,
        if_tsresol,
        if_tsoffset,
        big_endian: endianness == Endianness::Big,
    };
    Ok((i, block))
}
