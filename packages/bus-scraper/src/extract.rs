//! Listing extraction from a search-results page.
//!
//! Selectors target the aggregator's listing cards (`div.bus-item`). A
//! card that is missing a field or carries an unparsable fare is skipped,
//! but skips are counted and reported instead of silently dropped so a
//! thin result can be told apart from a thin page.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use fare_engine::ListingRecord;

use crate::query::SearchQuery;

/// Bus-type keywords that mark a premium coach. When any of these appear
/// in the card's bus-type text (case-insensitively), the bus type is
/// appended to the amenities text so the fare heuristic can see tags like
/// "9600" and "Multi-axle".
const PREMIUM_KEYWORDS: [&str; 5] = ["b11r", "9600", "volvo", "scania", "multi axle"];

/// Result of one page extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub listings: Vec<ListingRecord>,
    /// Cards that could not be parsed into a listing.
    pub skipped: usize,
}

fn select_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// Strip currency decorations and truncate to whole units. An empty fare
/// cell reads as 0; anything else unparsable rejects the card.
fn parse_fare(raw: &str) -> Option<i64> {
    let cleaned = raw.replace('₹', "").replace(',', "").replace("INR ", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Some(0);
    }
    cleaned.parse::<f64>().ok().map(|fare| fare.trunc() as i64)
}

struct CardSelectors {
    travels: Selector,
    bus_type: Selector,
    departure: Selector,
    duration: Selector,
    fare: Selector,
    amenity: Selector,
    seats_left: Selector,
}

impl CardSelectors {
    fn new() -> Self {
        // Static selectors; parse cannot fail.
        Self {
            travels: Selector::parse("div.travels").unwrap(),
            bus_type: Selector::parse("div.bus-type").unwrap(),
            departure: Selector::parse("div.dp-time").unwrap(),
            duration: Selector::parse("div.dur").unwrap(),
            fare: Selector::parse("div.fare.d-block").unwrap(),
            amenity: Selector::parse("div.amenities-item").unwrap(),
            seats_left: Selector::parse("div.seat-left").unwrap(),
        }
    }
}

fn listing_from_card(
    card: ElementRef<'_>,
    selectors: &CardSelectors,
    query: &SearchQuery,
) -> Option<ListingRecord> {
    let travel_name = select_text(card, &selectors.travels)?;
    let bus_type = select_text(card, &selectors.bus_type)?;
    let departure_time = select_text(card, &selectors.departure)?;
    let duration = select_text(card, &selectors.duration)?;
    let fare = parse_fare(&select_text(card, &selectors.fare)?)?;

    let mut amenities = card
        .select(&selectors.amenity)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let bus_type_lower = bus_type.to_lowercase();
    if PREMIUM_KEYWORDS.iter().any(|kw| bus_type_lower.contains(kw)) {
        amenities.push_str(&format!(", {}", bus_type));
    }

    let seats_remaining = select_text(card, &selectors.seats_left)?.replace(" Seats Left", "");

    Some(ListingRecord {
        travel_name,
        bus_type,
        seat_type_label: query.bus_type.clone(),
        departure_time,
        duration,
        date: query.date.clone(),
        fare,
        amenities,
        seats_remaining,
    })
}

/// Extract all listing cards from a search-results page.
pub fn extract_listings(html: &str, query: &SearchQuery) -> Extraction {
    let document = Html::parse_document(html);
    let card_selector = Selector::parse("div.bus-item").unwrap();
    let selectors = CardSelectors::new();

    let mut listings = Vec::new();
    let mut skipped = 0;

    for card in document.select(&card_selector) {
        match listing_from_card(card, &selectors, query) {
            Some(listing) => listings.push(listing),
            None => {
                skipped += 1;
                debug!("Skipping listing card with missing or malformed fields");
            }
        }
    }

    if skipped > 0 {
        warn!(
            extracted = listings.len(),
            skipped = skipped,
            "Some listing cards could not be parsed"
        );
    }

    Extraction { listings, skipped }
}
