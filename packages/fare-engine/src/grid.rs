//! Seat-grid enumeration.
//!
//! Walks a rows x columns layout, assigns each cell a berth position and
//! occupancy type from the seating-type policy, and quotes every cell
//! through the fare adjuster. Column index never influences the
//! assignment, so all cells in a row carry the same fare.

use crate::fare::{adjust_fare, FareError};
use crate::records::{SeatPosition, SeatType, SeatingType};

/// Row-major grid of suggested fares, one entry per seat.
pub type FareMatrix = Vec<Vec<f64>>;

/// Berth position and occupancy type for one cell of the layout.
///
/// - `Sleeper`: the upper deck is the first half of the rows (floor
///   division), every seat a single berth.
/// - `SeaterSleeper`: the first `num_seats` rows are lower-deck double
///   seats, the rest upper-deck single berths.
/// - `Seater`: everything is a lower double seat.
pub fn seat_assignment(
    seating_type: SeatingType,
    row: usize,
    rows: usize,
    num_seats: usize,
) -> (SeatPosition, SeatType) {
    match seating_type {
        SeatingType::Sleeper => {
            let position = if row < rows / 2 {
                SeatPosition::Upper
            } else {
                SeatPosition::Lower
            };
            (position, SeatType::Single)
        }
        SeatingType::SeaterSleeper => {
            if row < num_seats {
                (SeatPosition::Lower, SeatType::DoubleVacant)
            } else {
                (SeatPosition::Upper, SeatType::Single)
            }
        }
        SeatingType::Seater => (SeatPosition::Lower, SeatType::DoubleVacant),
    }
}

/// Build the suggested-fare grid for a layout.
///
/// The shape of the result always equals the requested dimensions: exactly
/// `rows` rows of `columns` entries each, so either dimension being zero
/// yields an empty (or all-empty-rows) matrix rather than an error.
///
/// Shape inputs are deliberately unvalidated: `num_seats > rows` is
/// accepted and simply makes every row a seater row, matching the
/// permissive behavior of the heuristic this implements.
pub fn plan_grid(
    seating_type: SeatingType,
    rows: usize,
    columns: usize,
    num_seats: usize,
    amenities: &str,
    departure_time: &str,
    base_price: f64,
) -> Result<FareMatrix, FareError> {
    let mut matrix = Vec::with_capacity(rows);

    for row in 0..rows {
        let (position, seat_type) = seat_assignment(seating_type, row, rows, num_seats);
        let mut row_fares = Vec::with_capacity(columns);
        for _col in 0..columns {
            let fare = adjust_fare(base_price, amenities, departure_time, position, seat_type)?;
            row_fares.push(fare);
        }
        matrix.push(row_fares);
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_assignment_per_policy() {
        assert_eq!(
            seat_assignment(SeatingType::Sleeper, 0, 4, 0),
            (SeatPosition::Upper, SeatType::Single)
        );
        assert_eq!(
            seat_assignment(SeatingType::Sleeper, 2, 4, 0),
            (SeatPosition::Lower, SeatType::Single)
        );
        assert_eq!(
            seat_assignment(SeatingType::SeaterSleeper, 0, 4, 2),
            (SeatPosition::Lower, SeatType::DoubleVacant)
        );
        assert_eq!(
            seat_assignment(SeatingType::SeaterSleeper, 2, 4, 2),
            (SeatPosition::Upper, SeatType::Single)
        );
        assert_eq!(
            seat_assignment(SeatingType::Seater, 3, 4, 0),
            (SeatPosition::Lower, SeatType::DoubleVacant)
        );
    }

    #[test]
    fn test_sleeper_splits_upper_and_lower() {
        let matrix = plan_grid(SeatingType::Sleeper, 4, 2, 0, "", "10:00", 100.0).unwrap();

        assert_eq!(matrix.len(), 4);
        for row in &matrix {
            assert_eq!(row.len(), 2);
            assert_eq!(row[0], row[1]);
        }

        // Upper singles: 100 * 0.995 * 1.07; lower singles: 100 * 1.07.
        assert_eq!(matrix[0][0], 106.47);
        assert_eq!(matrix[1][0], 106.47);
        assert_eq!(matrix[2][0], 107.0);
        assert_eq!(matrix[3][0], 107.0);
    }

    #[test]
    fn test_sleeper_odd_row_count_floors_the_split() {
        let matrix = plan_grid(SeatingType::Sleeper, 5, 1, 0, "", "10:00", 100.0).unwrap();

        // rows/2 == 2, so two upper rows and three lower.
        assert_eq!(matrix[0][0], 106.47);
        assert_eq!(matrix[1][0], 106.47);
        assert_eq!(matrix[2][0], 107.0);
        assert_eq!(matrix[4][0], 107.0);
    }

    #[test]
    fn test_seater_sleeper_split_at_num_seats() {
        let matrix = plan_grid(SeatingType::SeaterSleeper, 4, 3, 2, "", "10:00", 100.0).unwrap();

        // First two rows are lower doubles (identity), rest upper singles.
        assert_eq!(matrix[0][0], 100.0);
        assert_eq!(matrix[1][0], 100.0);
        assert_eq!(matrix[2][0], 106.47);
        assert_eq!(matrix[3][0], 106.47);
    }

    #[test]
    fn test_generic_seater_is_flat() {
        let matrix = plan_grid(SeatingType::Seater, 3, 2, 0, "", "10:00", 100.0).unwrap();
        for row in &matrix {
            for fare in row {
                assert_eq!(*fare, 100.0);
            }
        }
    }

    #[test]
    fn test_num_seats_larger_than_rows_is_accepted() {
        // Permissive shapes: every row falls in the seater region.
        let matrix = plan_grid(SeatingType::SeaterSleeper, 2, 2, 10, "", "10:00", 100.0).unwrap();
        for row in &matrix {
            for fare in row {
                assert_eq!(*fare, 100.0);
            }
        }
    }

    #[test]
    fn test_zero_dimensions_yield_empty_matrix() {
        let matrix = plan_grid(SeatingType::Sleeper, 0, 5, 0, "", "10:00", 100.0).unwrap();
        assert!(matrix.is_empty());

        let matrix = plan_grid(SeatingType::Sleeper, 3, 0, 0, "", "10:00", 100.0).unwrap();
        assert_eq!(matrix.len(), 3);
        assert!(matrix.iter().all(|row| row.is_empty()));
    }

    #[test]
    fn test_zero_columns_never_invokes_the_adjuster() {
        // With no cells there is nothing to quote, so a malformed time is
        // not observed.
        let matrix = plan_grid(SeatingType::Sleeper, 3, 0, 0, "", "not a time", 100.0).unwrap();
        assert_eq!(matrix.len(), 3);
    }

    #[test]
    fn test_unparsable_time_propagates() {
        let err = plan_grid(SeatingType::Sleeper, 2, 2, 0, "", "soonish", 100.0).unwrap_err();
        assert!(matches!(err, FareError::UnparsableTime { .. }));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let a = plan_grid(
            SeatingType::SeaterSleeper,
            6,
            4,
            3,
            "WiFi, Washroom",
            "09:30 PM",
            742.5,
        )
        .unwrap();
        let b = plan_grid(
            SeatingType::SeaterSleeper,
            6,
            4,
            3,
            "WiFi, Washroom",
            "09:30 PM",
            742.5,
        )
        .unwrap();
        assert_eq!(a, b);
    }
}
