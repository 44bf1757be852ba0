//! Mapping of raw surface coordinates and pressure onto the protocol's
//! signed 16-bit range.

/// Upper bound of the raw pressure range accepted from the hardware.
pub const MAX_RAW_PRESSURE: f32 = 2.0;

const AXIS_SPAN: f64 = 2.0 * i16::MAX as f64;

/// Map a raw coordinate onto the full `i16` range.
///
/// `raw` is clamped to `[0, bound]` and scaled by `2 * i16::MAX / bound`.
/// The truncated result is reinterpreted modulo 2^16, so the upper half of
/// the surface encodes as negative values and `raw == bound` yields `-2`.
/// Receivers on the host depend on this exact bit pattern.
///
/// `bound` must be non-zero; [`super::SurfaceTracker`] gates callers.
pub fn normalize_axis(raw: f32, bound: u32) -> i16 {
    debug_assert!(bound > 0, "normalize_axis called with zero bound");
    let bound = f64::from(bound);
    let clamped = f64::from(raw).max(0.0).min(bound);
    let scaled = clamped * AXIS_SPAN / bound;
    (scaled as i32) as i16
}

/// Map raw pressure in `[0.0, 2.0]` onto `[0, i16::MAX]`, truncating.
pub fn normalize_pressure(raw: f32) -> i16 {
    let clamped = f64::from(raw).max(0.0).min(f64::from(MAX_RAW_PRESSURE));
    (clamped * f64::from(i16::MAX) / f64::from(MAX_RAW_PRESSURE)) as i16
}
