use serde::{Deserialize, Serialize};

/// A single scraped bus-ticket listing.
///
/// Field renames match the listing table's column headers, which are the
/// semi-stable contract with anything else reading the persisted CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(rename = "Travel Name")]
    pub travel_name: String,

    #[serde(rename = "Bus Type")]
    pub bus_type: String,

    /// The seat-type filter the search was run with, not a per-bus attribute.
    #[serde(rename = "Seat Type")]
    pub seat_type_label: String,

    /// Clock time as displayed on the listing, 12h ("09:30 PM") or 24h ("21:30").
    #[serde(rename = "Departure Time")]
    pub departure_time: String,

    #[serde(rename = "Duration")]
    pub duration: String,

    #[serde(rename = "Date")]
    pub date: String,

    /// Ticket price in whole currency units, truncated.
    #[serde(rename = "Fare")]
    pub fare: i64,

    /// Comma-joined amenity tags, e.g. "WiFi, Washroom".
    #[serde(rename = "Amenities")]
    pub amenities: String,

    #[serde(rename = "Seats Remaining")]
    pub seats_remaining: String,
}

/// Upper/lower berth designation in a sleeper-style layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatPosition {
    Upper,
    Lower,
}

impl std::fmt::Display for SeatPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeatPosition::Upper => write!(f, "upper"),
            SeatPosition::Lower => write!(f, "lower"),
        }
    }
}

/// Occupancy category affecting shared-seat pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatType {
    Single,
    DoubleVacant,
    DoubleOneFilled,
}

impl std::fmt::Display for SeatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeatType::Single => write!(f, "single"),
            SeatType::DoubleVacant => write!(f, "double_vacant"),
            SeatType::DoubleOneFilled => write!(f, "double_one_filled"),
        }
    }
}

/// Layout family selected on the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatingType {
    Sleeper,
    SeaterSleeper,
    Seater,
}

impl SeatingType {
    /// Parse the form's free-text seating type. Anything that is not one of
    /// the two sleeper variants is treated as a generic seater layout.
    pub fn from_form(value: &str) -> Self {
        match value {
            "Sleeper" => SeatingType::Sleeper,
            "Seater + Sleeper" => SeatingType::SeaterSleeper,
            _ => SeatingType::Seater,
        }
    }
}

impl std::fmt::Display for SeatingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeatingType::Sleeper => write!(f, "Sleeper"),
            SeatingType::SeaterSleeper => write!(f, "Seater + Sleeper"),
            SeatingType::Seater => write!(f, "Seater"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_labels() {
        // These labels are what the CLI grid printout shows per row.
        assert_eq!(SeatPosition::Upper.to_string(), "upper");
        assert_eq!(SeatPosition::Lower.to_string(), "lower");
        assert_eq!(SeatType::Single.to_string(), "single");
        assert_eq!(SeatType::DoubleVacant.to_string(), "double_vacant");
        assert_eq!(SeatType::DoubleOneFilled.to_string(), "double_one_filled");
    }

    #[test]
    fn test_seating_type_from_form() {
        assert_eq!(SeatingType::from_form("Sleeper"), SeatingType::Sleeper);
        assert_eq!(
            SeatingType::from_form("Seater + Sleeper"),
            SeatingType::SeaterSleeper
        );
        assert_eq!(SeatingType::from_form("Seater"), SeatingType::Seater);
        assert_eq!(SeatingType::from_form("AC Luxury"), SeatingType::Seater);
        assert_eq!(SeatingType::from_form(""), SeatingType::Seater);
    }

    #[test]
    fn test_seating_type_display_round_trips_through_form() {
        for st in [
            SeatingType::Sleeper,
            SeatingType::SeaterSleeper,
            SeatingType::Seater,
        ] {
            assert_eq!(SeatingType::from_form(&st.to_string()), st);
        }
    }
}
