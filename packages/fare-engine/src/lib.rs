// Busfare - Fare Suggestion Engine
//
// This crate derives a per-seat suggested fare grid for a bus layout from
// scraped ticket listings: mean observed fare as the base, multiplicative
// adjustments for amenities / departure window / seat position / seat type,
// enumerated over a rows x columns layout.
//
// Scraping and the HTTP front end live in sibling packages; this crate is
// synchronous and touches nothing but the listing table on disk.

pub mod fare;
pub mod grid;
pub mod records;
pub mod store;

pub use fare::{adjust_fare, FareError};
pub use grid::{plan_grid, seat_assignment, FareMatrix};
pub use records::{ListingRecord, SeatPosition, SeatType, SeatingType};
pub use store::{mean_fare, ListingStore, StoreError};
