use nom::bytes::complete::take;
use nom::error::{ErrorKind, ParseError};
use nom::number::complete as num;
use nom::number::Endianness;
use nom::{Err, IResult};
use rusticata_macros::align32;

use crate::PcapNGOption;

use super::*;

/// An Enhanced Packet Block (EPB) is the standard container for storing
/// the packets coming from the network.
///
/// The packet options (comment, custom options) are kept in `options`, and can be
/// queried through the [`PcapNGOptions`] trait.
#[derive(Debug)]
pub struct EnhancedPacketBlock<'a> {
    pub if_id: u32,
    /// Raw timestamp, in units of the interface resolution
    pub timestamp: u64,
    /// Captured packet length
    pub caplen: u32,
    /// Original packet length
    pub origlen: u32,
    /// Packet data, without padding
    pub data: &'a [u8],
    pub options: Vec<PcapNGOption<'a>>,
    pub big_endian: bool,
}

impl<'a> PcapNGOptions for EnhancedPacketBlock<'a> {
    fn options(&self) -> &[PcapNGOption] {
        &self.options
    }
}

pub(crate) fn parse_enhancedpacket_body<'a, E: ParseError<&'a [u8]>>(
    i: &'a [u8],
    endianness: Endianness,
) -> IResult<&'a [u8], EnhancedPacketBlock<'a>, E> {
    let (i, if_id) = num::u32(endianness)(i)?;
    let (i, ts_high) = num::u32(endianness)(i)?;
    let (i, ts_low) = num::u32(endianness)(i)?;
    let (i, caplen) = num::u32(endianness)(i)?;
    let (i, origlen) = num::u32(endianness)(i)?;
    // align32 can overflow
    if caplen >= u32::MAX - 4 {
        return Err(Err::Error(E::from_error_kind(i, ErrorKind::Verify)));
    }
    let padded_length = align32!(caplen);
    let (i, data) = take(caplen)(i)?;
    let (i, _padding) = take(padded_length - caplen)(i)?;
    let (i, options) = parse_options::<E>(i, endianness)?;
    let block = EnhancedPacketBlock {
        if_id,
        timestamp: (u64::from(ts_high) << 32) | u64::from(ts_low),
        caplen,
        origlen,
        data,
        options,
        big_endian: endianness == Endianness::Big,
    };
    Ok((i, block))
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::PcapError;

    #[test]
    fn packet_data_without_padding() {
        // interface 1, ts 0x1_00000002, 3 bytes of data, comment "a"
        let body = hex!(
            "
00 00 00 01 00 00 00 01 00 00 00 02 00 00 00 03
00 00 00 40 aa bb cc 00
00 01 00 01 61 00 00 00 00 00 00 00"
        );
        let (_, epb) = parse_enhancedpacket_body::<PcapError<&[u8]>>(&body, Endianness::Big)
            .expect("enhanced packet");
        assert!(epb.big_endian);
        assert_eq!(epb.if_id, 1);
        assert_eq!(epb.timestamp, 0x1_0000_0002);
        assert_eq!(epb.origlen, 64);
        assert_eq!(epb.data, &[0xaa, 0xbb, 0xcc]);
        assert_eq!(epb.options.len(), 2);
        assert_eq!(epb.options[0].as_str(), Ok("a"));
    }

    #[test]
    fn caplen_larger_than_block() {
        let body = hex!("00 00 00 00 00 00 00 00 00 00 00 00 10 00 00 00 10 00 00 00 aa bb");
        assert!(parse_enhancedpacket_body::<PcapError<&[u8]>>(&body, Endianness::Little).is_err());
        let body = hex!("00 00 00 00 00 00 00 00 00 00 00 00 ff ff ff ff 10 00 00 00");
        assert!(matches!(
            parse_enhancedpacket_body::<PcapError<&[u8]>>(&body, Endianness::Little),
            Err(Err::Error(PcapError::NomError(_, ErrorKind::Verify)))
        ));
    }
}
