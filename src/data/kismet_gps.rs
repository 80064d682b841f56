//! Kismet GPS record, stored in pcap-ng custom options
//!
//! Kismet attaches the GPS fix of each packet as a binary custom option
//! (`opt_custom` code 2989) whose value starts with the Kismet Private Enterprise Number.
//! The v1 record has a fixed layout, without padding:
//!
//! ```text
//! pen: u32 | magic: u8 | version: u8 | length: u16 | mask: u32
//! longitude: u32 (3.7) | latitude: u32 (3.7) | altitude: u32 (6.4)
//! ```
//!
//! Multi-byte fields use the byte order of the section.

use log::{debug, trace};
use nom::error::ParseError;
use nom::number::complete as num;
use nom::number::Endianness;
use nom::IResult;

use crate::data::fixed_point::{fixed3_7_to_float, fixed6_4_to_float};
use crate::{GeoError, OptionCode};

/// Kismet Private Enterprise Number
pub const KISMET_PEN: u32 = 55922;
/// Magic number of Kismet GPS records (`'G'`)
pub const KISMET_GPS_MAGIC: u8 = 0x47;
/// Supported version of Kismet GPS records
pub const KISMET_GPS_VERSION: u8 = 1;
/// Size of a Kismet GPS v1 record, in bytes
pub const KISMET_GPS_V1_LEN: usize = 24;

/// Kismet GPS v1 record, as stored (coordinates in fixed-point)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KismetGpsV1Fixed {
    pub pen: u32,
    pub magic: u8,
    pub version: u8,
    pub length: u16,
    /// Field presence bitmask
    pub mask: u32,
    pub longitude: u32,
    pub latitude: u32,
    pub altitude: u32,
}

impl KismetGpsV1Fixed {
    /// Returns true if vendor, magic and version identify a Kismet GPS v1 record
    pub fn is_kismet_gps_v1(&self) -> bool {
        self.pen == KISMET_PEN
            && self.magic == KISMET_GPS_MAGIC
            && self.version == KISMET_GPS_VERSION
    }

    /// Decode the fixed-point coordinates
    ///
    /// This does not check the record identification, see [`Self::is_kismet_gps_v1`].
    pub fn decode(&self) -> Result<KismetGpsV1, GeoError> {
        Ok(KismetGpsV1 {
            pen: self.pen,
            magic: self.magic,
            version: self.version,
            length: self.length,
            mask: self.mask,
            longitude: fixed3_7_to_float(self.longitude)?,
            latitude: fixed3_7_to_float(self.latitude)?,
            altitude: fixed6_4_to_float(self.altitude)?,
        })
    }
}

/// Kismet GPS v1 record, with decoded coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KismetGpsV1 {
    pub pen: u32,
    pub magic: u8,
    pub version: u8,
    pub length: u16,
    /// Field presence bitmask
    pub mask: u32,
    /// Longitude, in degrees
    pub longitude: f64,
    /// Latitude, in degrees
    pub latitude: f64,
    /// Altitude, in meters
    pub altitude: f64,
}

impl KismetGpsV1 {
    /// Try to read a Kismet GPS v1 record from a custom field
    ///
    /// `field_type` and `length` are the option code and declared length of the field, and
    /// `payload` its value (starting with the PEN). The record is recognized only if the field
    /// is a binary custom option, the PEN, magic and version fields match, and the declared
    /// length is exactly [`KISMET_GPS_V1_LEN`]. Otherwise, `Ok(None)` is returned.
    ///
    /// An error is returned only if the record is recognized but a coordinate is out of range.
    pub fn extract(
        field_type: OptionCode,
        length: u16,
        payload: &[u8],
        big_endian: bool,
    ) -> Result<Option<KismetGpsV1>, GeoError> {
        if !field_type.is_custom_binary() {
            trace!("custom field {:?}: not a binary custom option", field_type);
            return Ok(None);
        }
        let endianness = if big_endian {
            Endianness::Big
        } else {
            Endianness::Little
        };
        let (pen, magic, version) = match parse_record_id::<()>(payload, endianness) {
            Ok((_, id)) => id,
            Err(_) => {
                trace!(
                    "custom field {:?}: {} bytes, too short for a record header",
                    field_type,
                    payload.len()
                );
                return Ok(None);
            }
        };
        if pen != KISMET_PEN || magic != KISMET_GPS_MAGIC {
            trace!(
                "custom field {:?}: pen {} magic {:#x} is not a Kismet GPS record",
                field_type,
                pen,
                magic
            );
            return Ok(None);
        }
        if version != KISMET_GPS_VERSION {
            trace!(
                "custom field {:?}: Kismet GPS version {} is not supported",
                field_type,
                version
            );
            return Ok(None);
        }
        if usize::from(length) != KISMET_GPS_V1_LEN || payload.len() < KISMET_GPS_V1_LEN {
            trace!(
                "custom field {:?}: length {} (payload {}), expected {}",
                field_type,
                length,
                payload.len(),
                KISMET_GPS_V1_LEN
            );
            return Ok(None);
        }
        let fixed = match parse_kismet_gps_v1::<()>(payload, endianness) {
            Ok((_, fixed)) => fixed,
            Err(_) => return Ok(None),
        };
        let gps = fixed.decode()?;
        debug!(
            "Kismet GPS v1: lat {} lon {} alt {}",
            gps.latitude, gps.longitude, gps.altitude
        );
        Ok(Some(gps))
    }
}

/// Read the identification of a record: PEN, magic and version
fn parse_record_id<'i, E: ParseError<&'i [u8]>>(
    i: &'i [u8],
    endianness: Endianness,
) -> IResult<&'i [u8], (u32, u8, u8), E> {
    let (i, pen) = num::u32(endianness)(i)?;
    let (i, magic) = num::u8(i)?;
    let (i, version) = num::u8(i)?;
    Ok((i, (pen, magic, version)))
}

/// Parse a Kismet GPS v1 record, in the byte order of the section
///
/// The record is not validated, see [`KismetGpsV1::extract`].
pub fn parse_kismet_gps_v1<'i, E: ParseError<&'i [u8]>>(
    i: &'i [u8],
    endianness: Endianness,
) -> IResult<&'i [u8], KismetGpsV1Fixed, E> {
    let (i, (pen, magic, version)) = parse_record_id::<E>(i, endianness)?;
    let (i, length) = num::u16(endianness)(i)?;
    let (i, mask) = num::u32(endianness)(i)?;
    let (i, longitude) = num::u32(endianness)(i)?;
    let (i, latitude) = num::u32(endianness)(i)?;
    let (i, altitude) = num::u32(endianness)(i)?;
    let record = KismetGpsV1Fixed {
        pen,
        magic,
        version,
        length,
        mask,
        longitude,
        latitude,
        altitude,
    };
    Ok((i, record))
}
