use nom::error::ParseError;
use nom::number::complete as num;
use nom::number::Endianness;
use nom::IResult;

/// The Simple Packet Block (SPB) is a lightweight container for storing
/// the packets coming from the network.
///
/// A SPB carries no options: the packet metadata built from it has no comment nor
/// custom field, and is always attached to the first interface of the section.
#[derive(Debug)]
pub struct SimplePacketBlock<'a> {
    /// Original packet length
    pub origlen: u32,
    /// Packet data, without padding (truncated to the block size)
    pub data: &'a [u8],
    pub big_endian: bool,
}

pub(crate) fn parse_simplepacket_body<'a, E: ParseError<&'a [u8]>>(
    i: &'a [u8],
    endianness: Endianness,
) -> IResult<&'a [u8], SimplePacketBlock<'a>, E> {
    let (i, origlen) = num::u32(endianness)(i)?;
    let caplen = i.len().min(origlen as usize);
    let (data, rem) = i.split_at(caplen);
    let block = SimplePacketBlock {
        origlen,
        data,
        big_endian: endianness == Endianness::Big,
    };
    Ok((rem, block))
}
