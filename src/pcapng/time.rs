/// Default interface time resolution (10^-6 s)
pub const DEFAULT_TSRESOL: u8 = 6;

/// Compute the timestamp resolution, in units per second
///
/// Return the resolution, or `None` if the resolution is invalid (for ex. greater than `2^64`)
pub fn build_ts_resolution(ts_resol: u8) -> Option<u64> {
    if ts_resol & 0x80 == 0 {
        // 10^19 is the largest power of 10 to fit in a u64
        if ts_resol > 19 {
            return None;
        }
        Some(10u64.pow(u32::from(ts_resol)))
    } else {
        let exp = ts_resol & 0x7f;
        if exp > 63 {
            return None;
        }
        Some(1u64 << exp)
    }
}

/// Split a raw 64-bit timestamp into seconds and fractional part (in resolution units)
///
/// `ts_offset` (in seconds) is added to the seconds, saturating at `0` and `u64::MAX`.
/// A null resolution is treated as 1 unit per second.
pub fn split_ts(ts: u64, ts_offset: i64, resolution: u64) -> (u64, u64) {
    let resolution = resolution.max(1);
    let secs = ts / resolution;
    let frac = ts % resolution;
    let secs = if ts_offset >= 0 {
        secs.saturating_add(ts_offset.unsigned_abs())
    } else {
        secs.saturating_sub(ts_offset.unsigned_abs())
    };
    (secs, frac)
}
