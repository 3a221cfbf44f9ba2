// Busfare - Aggregator Scraper
//
// Fetches a travel aggregator's search-results page and extracts ticket
// listings for the fare engine. The HTTP fetch and the HTML extraction
// are separate so the extraction can be tested against fixtures without
// a network.

mod extract;
mod query;
mod redbus;
mod source;

pub use extract::{extract_listings, Extraction};
pub use query::SearchQuery;
pub use redbus::RedbusScraper;
pub use source::BusSource;
