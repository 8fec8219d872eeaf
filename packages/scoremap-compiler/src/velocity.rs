//! Dynamics to MIDI velocity

/// Lowest velocity the affine map produces for a silent (0%) marking.
const VELOCITY_FLOOR: f64 = 37.0;

/// Velocity gained per dynamics percentage point.
const VELOCITY_SLOPE: f64 = 0.9;

/// Convert a 0-100 dynamics percentage into a MIDI velocity.
///
/// `round(37 + percentage * 0.9)`, clamped to `0..=127`. Out-of-range input
/// is clamped, never rejected.
///
/// # Example
/// ```
/// use scoremap::velocity;
///
/// assert_eq!(velocity(0.0), 37);
/// assert_eq!(velocity(100.0), 127);
/// assert_eq!(velocity(-1000.0), 0);
/// ```
pub fn velocity(dynamics_percentage: f64) -> u8 {
    let raw = (VELOCITY_FLOOR + dynamics_percentage * VELOCITY_SLOPE).round();
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 127.0) as u8
}
