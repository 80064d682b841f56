use std::borrow::Cow;
use std::convert::TryFrom;

use log::{debug, warn};

use crate::data::KismetGpsV1;
use crate::error::PcapError;
use crate::{GeoError, Linktype};

use super::*;

/// A packet-scoped custom field, read from a custom option of the packet block
///
/// The value starts with the Private Enterprise Number of the entity which defined it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomField<'a> {
    /// Option code of the field (2988, 2989, 19372 or 19373)
    pub field_type: OptionCode,
    /// Declared length of the value, in bytes
    pub length: u16,
    /// Raw value, possibly including padding
    pub value: Cow<'a, [u8]>,
    /// True if the section containing the field is encoded as big-endian
    pub big_endian: bool,
}

impl<'a> CustomField<'a> {
    /// Value of the field, limited to the declared length
    ///
    /// A field with a declared length of 0 has an empty payload.
    pub fn payload(&self) -> &[u8] {
        let len = usize::from(self.length).min(self.value.len());
        &self.value[..len]
    }

    /// Private Enterprise Number, if the payload is large enough to contain one
    pub fn pen(&self) -> Option<u32> {
        let b = <[u8; 4]>::try_from(self.payload().get(..4)?).ok()?;
        if self.big_endian {
            Some(u32::from_be_bytes(b))
        } else {
            Some(u32::from_le_bytes(b))
        }
    }

    /// Try to decode this field as a Kismet GPS v1 record
    ///
    /// See [`KismetGpsV1::extract`].
    pub fn kismet_gps(&self) -> Result<Option<KismetGpsV1>, GeoError> {
        KismetGpsV1::extract(
            self.field_type,
            self.length,
            self.payload(),
            self.big_endian,
        )
    }
}

/// Metadata of a packet, resolved against the interface which captured it
#[derive(Clone, Debug, PartialEq)]
pub struct PacketHeader<'a> {
    /// Interface index, in the current section
    pub interface_id: u32,
    /// Timestamp, seconds part (interface offset applied)
    pub ts_sec: u64,
    /// Timestamp, fractional part (in `ts_resolution` units)
    pub ts_frac: u64,
    /// Timestamp resolution, in units per second
    pub ts_resolution: u64,
    pub captured_length: u32,
    pub original_length: u32,
    pub linktype: Linktype,
    /// First `opt_comment` of the packet, if any
    pub comment: Option<Cow<'a, str>>,
    /// Custom options of the packet, in encounter order
    pub custom_fields: Vec<CustomField<'a>>,
    /// True if the section containing the packet is encoded as big-endian
    pub big_endian: bool,
}

impl<'a> PacketHeader<'a> {
    /// Number of custom fields
    #[inline]
    pub fn num_custom_fields(&self) -> usize {
        self.custom_fields.len()
    }

    /// Fractional part of the timestamp, converted to microseconds
    pub fn ts_usec(&self) -> u32 {
        let usec = u128::from(self.ts_frac) * 1_000_000 / u128::from(self.ts_resolution.max(1));
        u32::try_from(usec).unwrap_or(999_999)
    }

    /// Iterate over the Kismet GPS records of this packet
    ///
    /// Fields which are not Kismet GPS records are skipped.
    pub fn iter_kismet_gps(&self) -> impl Iterator<Item = Result<KismetGpsV1, GeoError>> + '_ {
        self.custom_fields
            .iter()
            .filter_map(|field| field.kismet_gps().transpose())
    }
}

/// A packet and its metadata
#[derive(Debug)]
pub struct Packet<'a> {
    pub header: PacketHeader<'a>,
    /// Packet data, without padding
    pub data: &'a [u8],
}

/// Description of a section, read from its Section Header Block
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionInfo {
    pub major_version: u16,
    pub minor_version: u16,
    pub big_endian: bool,
    pub comment: Option<String>,
    pub hardware_desc: Option<String>,
    pub os_desc: Option<String>,
    pub user_app_desc: Option<String>,
}

impl<'a> From<&SectionHeaderBlock<'a>> for SectionInfo {
    fn from(shb: &SectionHeaderBlock<'a>) -> Self {
        let get = |v: Option<Result<&str, _>>| v.and_then(Result::ok).map(String::from);
        SectionInfo {
            major_version: shb.major_version,
            minor_version: shb.minor_version,
            big_endian: shb.big_endian,
            comment: get(shb.comment()),
            hardware_desc: get(shb.shb_hardware()),
            os_desc: get(shb.shb_os()),
            user_app_desc: get(shb.shb_userappl()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct InterfaceInfo {
    linktype: Linktype,
    ts_resolution: u64,
    ts_offset: i64,
}

impl<'a> From<&InterfaceDescriptionBlock<'a>> for InterfaceInfo {
    fn from(idb: &InterfaceDescriptionBlock<'a>) -> Self {
        let ts_resolution = idb.ts_resolution().unwrap_or_else(|| {
            warn!("invalid if_tsresol {}, using default", idb.if_tsresol);
            10u64.pow(u32::from(DEFAULT_TSRESOL))
        });
        InterfaceInfo {
            linktype: idb.linktype,
            ts_resolution,
            ts_offset: idb.if_tsoffset,
        }
    }
}

impl Default for InterfaceInfo {
    fn default() -> Self {
        InterfaceInfo {
            linktype: Linktype::NULL,
            ts_resolution: 10u64.pow(u32::from(DEFAULT_TSRESOL)),
            ts_offset: 0,
        }
    }
}

/// Iterator over the packets of a pcap-ng capture loaded in memory
///
/// Section headers and interface descriptions are consumed internally, and used to resolve the
/// link type and timestamp of each packet. Other blocks are skipped.
///
/// ```rust
/// use pcapng_gps::*;
///
/// # fn print(buffer: &[u8]) {
/// let mut packets = PacketIterator::from_slice(buffer).expect("pcap-ng capture");
/// while let Some(Ok(packet)) = packets.next() {
///     println!("packet: cap_len={}", packet.header.captured_length);
///     for gps in packet.header.iter_kismet_gps().flatten() {
///         println!("  Lat {}, Lon {}", gps.latitude, gps.longitude);
///     }
/// }
/// println!("interfaces: {}", packets.interface_block_count());
/// # }
/// ```
pub struct PacketIterator<'a> {
    blocks: PcapNGSlice<'a>,
    section: Option<SectionInfo>,
    interfaces: Vec<InterfaceInfo>,
    interface_block_count: usize,
}

impl<'a> PacketIterator<'a> {
    pub fn from_slice(i: &'a [u8]) -> Result<PacketIterator<'a>, nom::Err<PcapError<&'a [u8]>>> {
        let blocks = PcapNGSlice::from_slice(i)?;
        Ok(PacketIterator {
            blocks,
            section: None,
            interfaces: Vec::new(),
            interface_block_count: 0,
        })
    }

    /// Information on the current section, once its header has been read
    pub fn section_info(&self) -> Option<&SectionInfo> {
        self.section.as_ref()
    }

    /// Number of Interface Description Blocks read so far, in all sections
    pub fn interface_block_count(&self) -> usize {
        self.interface_block_count
    }

    fn interface(&self, if_id: u32) -> InterfaceInfo {
        match self.interfaces.get(if_id as usize) {
            Some(info) => *info,
            None => {
                warn!("packet references unknown interface {}", if_id);
                InterfaceInfo::default()
            }
        }
    }

    fn packet_from_epb(&self, epb: EnhancedPacketBlock<'a>) -> Packet<'a> {
        let info = self.interface(epb.if_id);
        let (ts_sec, ts_frac) = split_ts(epb.timestamp, info.ts_offset, info.ts_resolution);
        let (comment, custom_fields) = split_options(epb.options, epb.big_endian);
        let header = PacketHeader {
            interface_id: epb.if_id,
            ts_sec,
            ts_frac,
            ts_resolution: info.ts_resolution,
            captured_length: epb.caplen,
            original_length: epb.origlen,
            linktype: info.linktype,
            comment,
            custom_fields,
            big_endian: epb.big_endian,
        };
        Packet {
            header,
            data: epb.data,
        }
    }

    fn packet_from_spb(&self, spb: SimplePacketBlock<'a>) -> Packet<'a> {
        let info = self.interface(0);
        let header = PacketHeader {
            interface_id: 0,
            ts_sec: 0,
            ts_frac: 0,
            ts_resolution: info.ts_resolution,
            captured_length: spb.data.len() as u32,
            original_length: spb.origlen,
            linktype: info.linktype,
            comment: None,
            custom_fields: Vec::new(),
            big_endian: spb.big_endian,
        };
        Packet {
            header,
            data: spb.data,
        }
    }
}

/// Split the options of a packet block into its first comment and its custom fields
fn split_options<'a>(
    options: Vec<PcapNGOption<'a>>,
    big_endian: bool,
) -> (Option<Cow<'a, str>>, Vec<CustomField<'a>>) {
    let mut comment = None;
    let mut custom_fields = Vec::new();
    for opt in options {
        if opt.code == OptionCode::Comment && comment.is_none() {
            let len = usize::from(opt.len).min(opt.value.len());
            comment = Some(match opt.value {
                Cow::Borrowed(b) => String::from_utf8_lossy(&b[..len]),
                Cow::Owned(v) => Cow::Owned(String::from_utf8_lossy(&v[..len]).into_owned()),
            });
        } else if opt.code.is_custom() {
            custom_fields.push(CustomField {
                field_type: opt.code,
                length: opt.len,
                value: opt.value,
                big_endian,
            });
        }
    }
    (comment, custom_fields)
}

impl<'a> Iterator for PacketIterator<'a> {
    type Item = Result<Packet<'a>, nom::Err<PcapError<&'a [u8]>>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let block = match self.blocks.next()? {
                Ok(block) => block,
                Err(e) => return Some(Err(e)),
            };
            match block {
                Block::SectionHeader(ref shb) => {
                    debug!(
                        "new section: version {}.{}, big-endian: {}",
                        shb.major_version,
                        shb.minor_version,
                        shb.big_endian
                    );
                    self.section = Some(SectionInfo::from(shb));
                    self.interfaces.clear();
                }
                Block::InterfaceDescription(ref idb) => {
                    debug!(
                        "new interface {}: linktype {}",
                        self.interfaces.len(),
                        idb.linktype
                    );
                    self.interfaces.push(InterfaceInfo::from(idb));
                    self.interface_block_count += 1;
                }
                Block::EnhancedPacket(epb) => return Some(Ok(self.packet_from_epb(epb))),
                Block::SimplePacket(spb) => return Some(Ok(self.packet_from_spb(spb))),
                Block::Unknown(_) => (),
            }
        }
    }
}
