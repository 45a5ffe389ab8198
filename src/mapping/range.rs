//! Range mappers for loudness and distance
//!
//! Both mappers normalize their input with a clamped inverse-lerp and
//! interpolate into an output range. A degenerate input range normalizes
//! to 0, so the output falls back to the lower bound instead of NaN.

use super::Mapper;

/// Loudest level considered, in dB
pub const DECIBEL_CEILING: f32 = 0.0;

/// Quietest level considered, in dB
pub const DECIBEL_FLOOR: f32 = -80.0;

/// Normalize `value` into `[0, 1]` relative to `a..b`
///
/// Returns 0 when `a == b` or when the result is NaN.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    let range = b - a;
    if range == 0.0 {
        return 0.0;
    }
    let t = (value - a) / range;
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Interpolate between `a` and `b` with `t` clamped to `[0, 1]`
///
/// Both endpoints are returned exactly.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t >= 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

/// Maps a decibel level in `-80..0` onto an output range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecibelRangeMapper {
    out_min: f32,
    out_max: f32,
}

impl DecibelRangeMapper {
    pub fn new(out_min: f32, out_max: f32) -> Self {
        Self { out_min, out_max }
    }
}

impl Mapper for DecibelRangeMapper {
    fn name(&self) -> &str {
        "decibels"
    }

    fn map(&self, decibels: f32) -> f32 {
        let t = inverse_lerp(DECIBEL_FLOOR, DECIBEL_CEILING, decibels);
        lerp(self.out_min, self.out_max, t)
    }
}

/// Maps a distance in `0..max_distance` onto an output range
///
/// Closer is always larger. The non-inverted form interpolates
/// `lo -> hi` by proximity; the inverted form interpolates `hi -> lo` by
/// `1 - proximity`. Opacity uses the former and size the latter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRangeMapper {
    max_distance: f32,
    out_min: f32,
    out_max: f32,
    invert: bool,
}

impl DistanceRangeMapper {
    pub fn new(max_distance: f32, out_min: f32, out_max: f32) -> Self {
        Self {
            max_distance,
            out_min,
            out_max,
            invert: false,
        }
    }

    /// Use the swapped-endpoint form
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }
}

impl Mapper for DistanceRangeMapper {
    fn name(&self) -> &str {
        "distance"
    }

    fn map(&self, distance: f32) -> f32 {
        let proximity = inverse_lerp(self.max_distance, 0.0, distance);
        if self.invert {
            lerp(self.out_max, self.out_min, 1.0 - proximity)
        } else {
            lerp(self.out_min, self.out_max, proximity)
        }
    }
}

/// Map a decibel level onto `lo..hi`
pub fn map_decibels_to_range(decibels: f32, lo: f32, hi: f32) -> f32 {
    DecibelRangeMapper::new(lo, hi).map(decibels)
}

/// Map a distance onto `lo..hi`, nearer meaning closer to `hi`
pub fn map_distance_to_range(distance: f32, max_distance: f32, lo: f32, hi: f32, invert: bool) -> f32 {
    DistanceRangeMapper::new(max_distance, lo, hi)
        .with_invert(invert)
        .map(distance)
}
