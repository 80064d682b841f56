//! Fixed-point encoding of geographic values
//!
//! Two scale-and-offset schemes map a signed decimal value to an unsigned 32-bit integer,
//! so that no negative value ever appears on the wire:
//!
//! - `3.7`: 7 fractional digits (scale `10^7`), offset `180 * 10^7`. Used for longitude
//!   and latitude.
//! - `6.4`: 4 fractional digits (scale `10^4`), offset `180_000 * 10^4`. Used for altitude.
//!
//! Encoding truncates toward zero. Values outside the accepted range are rejected with a
//! [`GeoError`], never clamped.

use crate::GeoError;

/// Scale of the `3.7` scheme
pub const FIXED3_7_SCALE: i64 = 10_000_000;
/// Offset added by the `3.7` scheme
pub const FIXED3_7_OFFSET: i64 = 180 * FIXED3_7_SCALE;

/// Scale of the `6.4` scheme
pub const FIXED6_4_SCALE: i64 = 10_000;
/// Offset added by the `6.4` scheme
pub const FIXED6_4_OFFSET: i64 = 180_000 * FIXED6_4_SCALE;

/// Largest raw value accepted by the decoders
pub const FIXED_MAX: u32 = 3_600_000_000;

/// Bound (exclusive) of the values accepted by the encoders
pub const DEGREES_LIMIT: f64 = 180.000_000_1;

#[inline]
fn check_degrees(flt: f64) -> Result<(), GeoError> {
    // also rejects NaN
    if flt > -DEGREES_LIMIT && flt < DEGREES_LIMIT {
        Ok(())
    } else {
        Err(GeoError::DegreesOutOfRange(flt))
    }
}

#[inline]
fn check_fixed(fixed: u32) -> Result<(), GeoError> {
    if fixed > FIXED_MAX {
        Err(GeoError::FixedOutOfRange(fixed))
    } else {
        Ok(())
    }
}

#[inline]
fn encode(flt: f64, scale: i64, offset: i64) -> Result<u32, GeoError> {
    check_degrees(flt)?;
    // truncation toward zero; |flt * scale| < 2^31 for accepted values
    let scaled = (flt * scale as f64) as i32;
    Ok((i64::from(scaled) + offset) as u32)
}

#[inline]
fn decode(fixed: u32, scale: i64, offset: i64) -> Result<f64, GeoError> {
    check_fixed(fixed)?;
    let remapped = i64::from(fixed) - offset;
    Ok(remapped as f64 / scale as f64)
}

/// Encode degrees using the `3.7` scheme
pub fn float_to_fixed3_7(flt: f64) -> Result<u32, GeoError> {
    encode(flt, FIXED3_7_SCALE, FIXED3_7_OFFSET)
}

/// Decode a `3.7` fixed-point value to degrees
pub fn fixed3_7_to_float(fixed: u32) -> Result<f64, GeoError> {
    decode(fixed, FIXED3_7_SCALE, FIXED3_7_OFFSET)
}

/// Encode a value using the `6.4` scheme
///
/// The accepted input range is the same as for [`float_to_fixed3_7`].
pub fn float_to_fixed6_4(flt: f64) -> Result<u32, GeoError> {
    encode(flt, FIXED6_4_SCALE, FIXED6_4_OFFSET)
}

/// Decode a `6.4` fixed-point value
pub fn fixed6_4_to_float(fixed: u32) -> Result<f64, GeoError> {
    decode(fixed, FIXED6_4_SCALE, FIXED6_4_OFFSET)
}

#[cfg(test)]
mod tests {
    use super::*;

    // truncation error, plus the rounding of the f64 product
    const EPS_3_7: f64 = 1e-7 * 1.000_001;
    const EPS_6_4: f64 = 1e-4 * 1.000_001;

    #[test]
    fn zero_maps_to_offset() {
        assert_eq!(float_to_fixed3_7(0.0), Ok(1_800_000_000));
        assert_eq!(float_to_fixed6_4(0.0), Ok(1_800_000_000));
        assert_eq!(fixed3_7_to_float(1_800_000_000), Ok(0.0));
        assert_eq!(fixed6_4_to_float(1_800_000_000), Ok(0.0));
    }

    #[test]
    fn encode_truncates_toward_zero() {
        assert_eq!(float_to_fixed6_4(1.23456), Ok(1_800_012_345));
        assert_eq!(float_to_fixed6_4(-1.23456), Ok(1_799_987_655));
        assert_eq!(float_to_fixed3_7(-180.0), Ok(0));
        assert_eq!(float_to_fixed3_7(180.0), Ok(3_600_000_000));
    }

    #[test]
    fn round_trip_3_7() {
        let mut d = -179.999_999_9;
        while d < 180.0 {
            let fixed = float_to_fixed3_7(d).expect("encode");
            let back = fixed3_7_to_float(fixed).expect("decode");
            assert!((back - d).abs() <= EPS_3_7, "{} -> {} -> {}", d, fixed, back);
            d += 0.123_456_7;
        }
    }

    #[test]
    fn round_trip_6_4() {
        let mut d = -179.9999;
        while d < 180.0 {
            let fixed = float_to_fixed6_4(d).expect("encode");
            let back = fixed6_4_to_float(fixed).expect("decode");
            assert!((back - d).abs() <= EPS_6_4, "{} -> {} -> {}", d, fixed, back);
            d += 0.731_3;
        }
    }

    #[test]
    fn encode_bounds() {
        for encode in &[float_to_fixed3_7, float_to_fixed6_4] {
            assert_eq!(
                encode(180.000_000_1),
                Err(GeoError::DegreesOutOfRange(180.000_000_1))
            );
            assert_eq!(
                encode(-180.000_000_1),
                Err(GeoError::DegreesOutOfRange(-180.000_000_1))
            );
            assert!(encode(f64::NAN).is_err());
            assert!(encode(f64::INFINITY).is_err());
            assert!(encode(179.999_999_9).is_ok());
            assert!(encode(-179.999_999_9).is_ok());
        }
    }

    #[test]
    fn decode_bounds() {
        for decode in &[fixed3_7_to_float, fixed6_4_to_float] {
            assert_eq!(
                decode(3_600_000_001),
                Err(GeoError::FixedOutOfRange(3_600_000_001))
            );
            assert!(decode(u32::MAX).is_err());
            assert!(decode(FIXED_MAX).is_ok());
            assert!(decode(0).is_ok());
        }
        assert_eq!(fixed3_7_to_float(0), Ok(-180.0));
        assert_eq!(fixed3_7_to_float(FIXED_MAX), Ok(180.0));
        assert_eq!(fixed6_4_to_float(FIXED_MAX), Ok(180_000.0));
    }
}
