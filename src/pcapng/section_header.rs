use nom::error::ParseError;
use nom::number::complete as num;
use nom::number::streaming::le_u32;
use nom::number::Endianness;
use nom::{Err, IResult};

use crate::{PcapError, PcapNGOption, PcapNGOptionError, SHB_MAGIC};

use super::*;

/// The Section Header Block (SHB) starts a section of the capture, and sets the byte order
/// of the blocks following it.
///
/// Its options describe the capture environment (hardware, OS, capturing application).
#[derive(Debug)]
pub struct SectionHeaderBlock<'a> {
    /// True if the blocks of this section are encoded as big-endian
    pub big_endian: bool,
    pub major_version: u16,
    pub minor_version: u16,
    /// Length of the section in bytes, or `-1` if not specified
    pub section_len: i64,
    pub options: Vec<PcapNGOption<'a>>,
}

impl<'a> SectionHeaderBlock<'a> {
    #[inline]
    pub fn big_endian(&self) -> bool {
        self.big_endian
    }

    /// Return the `opt_comment` option value, if present
    ///
    /// If the option is present multiple times, the first value is returned.
    ///
    /// Returns `None` if option is not present, `Some(Ok(value))` if the value is present and valid,
    /// or `Some(Err(_))` if value is present but invalid
    pub fn comment(&self) -> Option<Result<&str, PcapNGOptionError>> {
        options_get_as_str(&self.options, OptionCode::Comment)
    }

    /// Return the `shb_hardware` option value, if present
    pub fn shb_hardware(&self) -> Option<Result<&str, PcapNGOptionError>> {
        options_get_as_str(&self.options, OptionCode::ShbHardware)
    }

    /// Return the `shb_os` option value, if present
    pub fn shb_os(&self) -> Option<Result<&str, PcapNGOptionError>> {
        options_get_as_str(&self.options, OptionCode::ShbOs)
    }

    /// Return the `shb_userappl` option value, if present
    pub fn shb_userappl(&self) -> Option<Result<&str, PcapNGOptionError>> {
        options_get_as_str(&self.options, OptionCode::ShbUserAppl)
    }
}

impl<'a> PcapNGOptions for SectionHeaderBlock<'a> {
    fn options(&self) -> &[PcapNGOption] {
        &self.options
    }
}

fn parse_sectionheader_body<'a, E: ParseError<&'a [u8]>>(
    i: &'a [u8],
    endianness: Endianness,
) -> IResult<&'a [u8], SectionHeaderBlock<'a>, E> {
    // byte-order magic, already checked
    let (i, _bom) = num::u32(endianness)(i)?;
    let (i, major_version) = num::u16(endianness)(i)?;
    let (i, minor_version) = num::u16(endianness)(i)?;
    let (i, section_len) = num::i64(endianness)(i)?;
    let (i, options) = parse_options::<E>(i, endianness)?;
    let block = SectionHeaderBlock {
        big_endian: endianness == Endianness::Big,
        major_version,
        minor_version,
        section_len,
        options,
    };
    Ok((i, block))
}

/// Parse a Section Header Block (little or big endian)
///
/// The byte order is read from the byte-order magic. Input which does not start with a Section
/// Header Block, or with an invalid byte-order magic, is rejected with
/// [`PcapError::HeaderNotRecognized`].
pub fn parse_sectionheaderblock(i: &[u8]) -> IResult<&[u8], SectionHeaderBlock, PcapError<&[u8]>> {
    if i.len() < 12 {
        return Err(Err::Incomplete(nom::Needed::new(12 - i.len())));
    }
    let (_, block_type) = le_u32(i)?;
    if block_type != SHB_MAGIC {
        return Err(Err::Error(PcapError::HeaderNotRecognized));
    }
    let (_, bom) = le_u32(&i[8..])?;
    let endianness = if bom == BOM_MAGIC {
        Endianness::Little
    } else if bom.swap_bytes() == BOM_MAGIC {
        Endianness::Big
    } else {
        return Err(Err::Error(PcapError::HeaderNotRecognized));
    };
    let (rem, raw) = parse_frame(i, endianness)?;
    let (_, shb) = parse_sectionheader_body(raw.body, endianness)?;
    Ok((rem, shb))
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    // SHB v1.0, big-endian, shb_os "BSD"
    const SHB_BE: &[u8] = &hex!(
        "
0a 0d 0d 0a 00 00 00 28 1a 2b 3c 4d 00 01 00 00
ff ff ff ff ff ff ff ff 00 03 00 03 42 53 44 00
00 00 00 00 00 00 00 28"
    );

    #[test]
    fn section_header_big_endian() {
        let (rem, shb) = parse_sectionheaderblock(SHB_BE).expect("section header");
        assert!(rem.is_empty());
        assert!(shb.big_endian());
        assert_eq!((shb.major_version, shb.minor_version), (1, 0));
        assert_eq!(shb.section_len, -1);
        assert_eq!(shb.shb_os(), Some(Ok("BSD")));
        assert_eq!(shb.comment(), None);
    }

    #[test]
    fn section_header_not_recognized() {
        let mut bad_bom = SHB_BE.to_vec();
        bad_bom[8] = 0x2b;
        assert_eq!(
            parse_sectionheaderblock(&bad_bom).map(|_| ()),
            Err(Err::Error(PcapError::HeaderNotRecognized))
        );
        let idb = hex!("01 00 00 00 14 00 00 00 01 00 00 00 00 00 00 00 14 00 00 00");
        assert_eq!(
            parse_sectionheaderblock(&idb).map(|_| ()),
            Err(Err::Error(PcapError::HeaderNotRecognized))
        );
        assert!(matches!(
            parse_sectionheaderblock(&SHB_BE[..8]),
            Err(Err::Incomplete(_))
        ));
    }
}
