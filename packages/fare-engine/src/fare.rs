//! The fare-adjustment heuristic.
//!
//! One fixed multiplier chain, applied in order to a running value:
//! amenities, then departure-time window, then seat position, then seat
//! type. The ordering is part of the contract - each multiplier compounds
//! on the result of the previous one, not on the original base price.

use chrono::NaiveTime;
use thiserror::Error;

use crate::records::{SeatPosition, SeatType};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FareError {
    #[error("Unparsable departure time {time:?} (expected \"09:30 PM\" or \"21:30\")")]
    UnparsableTime { time: String },
}

/// Parse a listing's clock time. The 12-hour form with meridiem marker is
/// tried first, falling back to the 24-hour form.
pub fn parse_departure_time(raw: &str) -> Result<NaiveTime, FareError> {
    NaiveTime::parse_from_str(raw, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| FareError::UnparsableTime {
            time: raw.to_string(),
        })
}

/// Suggest a fare for one seat.
///
/// Amenity matches are literal substring checks against the amenities text,
/// with no case folding ("wifi" does not trigger the "WiFi" multiplier).
/// A NaN base price (empty listing table) is treated as 0.
///
/// The result is rounded to two decimals with `f64::round` semantics
/// (half away from zero, which for these non-negative fares is round-half-up).
///
/// Errors only when `departure_time` matches neither accepted clock format;
/// the caller is expected to reject the request rather than default the time.
pub fn adjust_fare(
    base_price: f64,
    amenities: &str,
    departure_time: &str,
    position: SeatPosition,
    seat_type: SeatType,
) -> Result<f64, FareError> {
    let mut fare = if base_price.is_nan() { 0.0 } else { base_price };

    if amenities.contains("WiFi") {
        fare *= 1.02;
    }
    if amenities.contains("Washroom") {
        fare *= 1.05;
    }
    if amenities.contains("Multi-axle") {
        fare *= 1.02;
    }
    if amenities.contains("9600") {
        fare *= 1.015;
    }

    let departure = parse_departure_time(departure_time)?;
    let six_pm = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
    let eight_pm = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
    let eleven_pm = NaiveTime::from_hms_opt(23, 0, 0).unwrap();

    // Both 18:00 and 20:00 belong to the early-evening bracket; 23:00
    // belongs to the late-evening one.
    if departure >= six_pm && departure <= eight_pm {
        fare *= 1.05;
    } else if departure > eight_pm && departure <= eleven_pm {
        fare *= 1.06;
    } else if departure > eleven_pm {
        fare *= 0.98;
    }

    if position == SeatPosition::Upper {
        fare *= 0.995;
    }

    match seat_type {
        SeatType::Single => fare *= 1.07,
        SeatType::DoubleOneFilled => fare *= 0.99,
        SeatType::DoubleVacant => {}
    }

    Ok(round2(fare))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
