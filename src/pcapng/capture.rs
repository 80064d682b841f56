use crate::error::PcapError;
use crate::pcapng::*;

/// Parsing iterator over pcap-ng data (requires data to be loaded into memory)
///
/// The byte order is switched at each Section Header Block.
///
/// ```rust
/// use pcapng_gps::*;
///
/// # fn count(buffer: &[u8]) {
/// let mut num_blocks = 0;
/// let capture = PcapNGSlice::from_slice(buffer).expect("parse file");
/// for _block in capture {
///     num_blocks += 1;
/// }
/// # }
/// ```
pub struct PcapNGSlice<'a> {
    big_endian: bool,
    // remaining (unparsed) data
    rem: &'a [u8],
}

impl<'a> PcapNGSlice<'a> {
    /// Check that the data starts with a valid Section Header Block, and build the iterator
    pub fn from_slice(i: &[u8]) -> Result<PcapNGSlice, nom::Err<PcapError<&[u8]>>> {
        let (_rem, shb) = parse_sectionheaderblock(i)?;
        Ok(PcapNGSlice {
            big_endian: shb.big_endian(),
            rem: i,
        })
    }

    /// True if the blocks of the current section are encoded as big-endian
    #[inline]
    pub fn big_endian(&self) -> bool {
        self.big_endian
    }
}

/// Iterator for PcapNGSlice. Returns a result so parsing errors are not
/// silently ignored
impl<'a> Iterator for PcapNGSlice<'a> {
    type Item = Result<Block<'a>, nom::Err<PcapError<&'a [u8]>>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rem.is_empty() {
            return None;
        }
        let r = parse_block(self.rem, self.big_endian).map(|(rem, b)| {
            self.rem = rem;
            if let Block::SectionHeader(ref shb) = b {
                self.big_endian = shb.big_endian();
            }
            b
        });
        if r.is_err() {
            // do not loop on the same error
            self.rem = &[];
        }
        Some(r)
    }
}
