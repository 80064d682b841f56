use nom::bytes::streaming::take;
use nom::error::{ErrorKind, ParseError};
use nom::number::streaming as num;
use nom::number::Endianness;
use nom::{Err, IResult};

use crate::PcapError;

use super::*;

/// A block from a PcapNG file
#[derive(Debug)]
pub enum Block<'a> {
    SectionHeader(SectionHeaderBlock<'a>),
    InterfaceDescription(InterfaceDescriptionBlock<'a>),
    EnhancedPacket(EnhancedPacketBlock<'a>),
    SimplePacket(SimplePacketBlock<'a>),
    Unknown(UnknownBlock<'a>),
}

impl<'a> Block<'a> {
    /// Returns true if blocks contains a network packet
    pub fn is_data_block(&self) -> bool {
        matches!(self, &Block::EnhancedPacket(_) | &Block::SimplePacket(_))
    }

    /// Return the normalized magic number of the block
    pub fn magic(&self) -> u32 {
        match self {
            Block::SectionHeader(_) => SHB_MAGIC,
            Block::InterfaceDescription(_) => IDB_MAGIC,
            Block::EnhancedPacket(_) => EPB_MAGIC,
            Block::SimplePacket(_) => SPB_MAGIC,
            Block::Unknown(ub) => ub.block_type,
        }
    }
}

/// Blocks without options (SPB, unknown blocks) expose an empty list
impl<'a> PcapNGOptions for Block<'a> {
    fn options(&self) -> &[PcapNGOption] {
        match self {
            Block::SectionHeader(b) => b.options.as_slice(),
            Block::InterfaceDescription(b) => b.options.as_slice(),
            Block::EnhancedPacket(b) => b.options.as_slice(),
            Block::SimplePacket(_) | Block::Unknown(_) => &[],
        }
    }
}

/// A block of a type this crate does not interpret
///
/// The body is kept as-is, so the block can be skipped or inspected by the caller.
#[derive(Debug)]
pub struct UnknownBlock<'a> {
    pub block_type: u32,
    /// Block body, between the length fields
    pub body: &'a [u8],
}

/// Generic block layout: type, total length, body, total length
pub(crate) struct RawBlock<'a> {
    pub(crate) block_type: u32,
    pub(crate) body: &'a [u8],
}

/// Read the generic block layout, checking that both length fields match
///
/// Truncated input is reported as `Incomplete`.
pub(crate) fn parse_frame<'a, E: ParseError<&'a [u8]>>(
    i: &'a [u8],
    endianness: Endianness,
) -> IResult<&'a [u8], RawBlock<'a>, E> {
    let (i, block_type) = num::u32(endianness)(i)?;
    let (i, block_len1) = num::u32(endianness)(i)?;
    // 12 is block_type (4) + block_len1 (4) + block_len2 (4)
    if block_len1 < 12 {
        return Err(Err::Error(E::from_error_kind(i, ErrorKind::Verify)));
    }
    let (i, body) = take(block_len1 - 12)(i)?;
    let (i, block_len2) = num::u32(endianness)(i)?;
    if block_len2 != block_len1 {
        return Err(Err::Error(E::from_error_kind(i, ErrorKind::Verify)));
    }
    Ok((i, RawBlock { block_type, body }))
}

/// Parse any block of a section
///
/// `big_endian` is the byte order of the current section. A Section Header Block is always
/// recognized, and carries the byte order of the blocks following it
/// (see [`SectionHeaderBlock::big_endian`]).
pub fn parse_block(i: &[u8], big_endian: bool) -> IResult<&[u8], Block, PcapError<&[u8]>> {
    let (_, magic) = num::le_u32(i)?;
    if magic == SHB_MAGIC {
        let (rem, shb) = parse_sectionheaderblock(i)?;
        return Ok((rem, Block::SectionHeader(shb)));
    }
    let endianness = if big_endian {
        Endianness::Big
    } else {
        Endianness::Little
    };
    let (rem, raw) = parse_frame(i, endianness)?;
    let block = match raw.block_type {
        IDB_MAGIC => {
            let (_, idb) = parse_interfacedescription_body(raw.body, endianness)?;
            Block::InterfaceDescription(idb)
        }
        EPB_MAGIC => {
            let (_, epb) = parse_enhancedpacket_body(raw.body, endianness)?;
            Block::EnhancedPacket(epb)
        }
        SPB_MAGIC => {
            let (_, spb) = parse_simplepacket_body(raw.body, endianness)?;
            Block::SimplePacket(spb)
        }
        block_type => Block::Unknown(UnknownBlock {
            block_type,
            body: raw.body,
        }),
    };
    Ok((rem, block))
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn frame_lengths_must_match() {
        let data = hex!("05 00 00 00 10 00 00 00 aa bb cc dd 10 00 00 00");
        let (rem, b) = parse_block(&data, false).expect("unknown block");
        assert!(rem.is_empty());
        assert_eq!(b.magic(), 5);
        assert!(!b.is_data_block());
        match b {
            Block::Unknown(u) => assert_eq!(u.body, &[0xaa, 0xbb, 0xcc, 0xdd]),
            _ => panic!("unexpected block"),
        }

        let bad_trailer = hex!("05 00 00 00 10 00 00 00 aa bb cc dd 14 00 00 00");
        assert!(matches!(parse_block(&bad_trailer, false), Err(Err::Error(_))));
        let too_short = hex!("05 00 00 00 08 00 00 00");
        assert!(matches!(parse_block(&too_short, false), Err(Err::Error(_))));
        assert!(matches!(
            parse_block(&data[..10], false),
            Err(Err::Incomplete(_))
        ));
    }

    #[test]
    fn frame_big_endian() {
        let data = hex!("00 00 00 03 00 00 00 14 00 00 00 02 ca fe 00 00 00 00 00 14");
        let (_, b) = parse_block(&data, true).expect("simple packet");
        match b {
            Block::SimplePacket(spb) => {
                assert!(spb.big_endian);
                assert_eq!(spb.origlen, 2);
                assert_eq!(spb.data, &[0xca, 0xfe]);
            }
            _ => panic!("unexpected block"),
        }
        // same bytes, read as little-endian: length fields are invalid
        assert!(parse_block(&data, false).is_err());
    }
}
