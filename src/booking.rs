//! Fare and routing figures for a new booking.
//!
//! `calculate_price` is pure and deterministic; `calculate_distance` is a
//! simulated routing estimate and takes the rng explicitly so tests can
//! seed it and assert range and precision.

use rand::Rng;

use crate::util;

/// Flat fare charged on every booking, in whole currency units.
pub const BASE_FARE: i64 = 40;

/// Per-kilometer rate, in whole currency units.
pub const PER_KM_RATE: i64 = 12;

/// Total fare for a distance: `round(BASE_FARE + distance * PER_KM_RATE)`.
pub fn calculate_price(distance: f64) -> i64 {
    (BASE_FARE as f64 + distance * PER_KM_RATE as f64).round() as i64
}

/// Simulated routing estimate in km: one fractional digit, in [2.0, 17.0).
///
/// Generated as integer tenths so the range bound and the single
/// fractional digit hold exactly.
pub fn calculate_distance<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(20..170) as f64 / 10.0
}

/// New order ID: `LDPS` + uppercase base36 of the current epoch millis.
///
/// Two calls within the same millisecond collide; at booking cadence the
/// millisecond clock is enough.
pub fn generate_order_id() -> String {
    format!("LDPS{}", util::to_base36(util::now_millis() as u64))
}
