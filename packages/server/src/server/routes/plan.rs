//! The plan endpoint: scrape, persist, recompute the base fare, and
//! enumerate the seat grid.

use axum::{
    body::to_bytes,
    extract::{Extension, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use bus_scraper::SearchQuery;
use fare_engine::{mean_fare, plan_grid, FareError, FareMatrix, SeatingType};

use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub source: String,
    pub destination: String,
    pub bus_type: String,
    pub seating_type: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub departure_date: String,
    pub departure_time: String,
    #[serde(default)]
    pub rows: usize,
    #[serde(default)]
    pub columns: usize,
    #[serde(default)]
    pub num_seats: usize,
    /// Accepted for forward compatibility; the fare heuristic does not
    /// read it.
    #[serde(default)]
    pub num_berths: usize,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub base_fare: f64,
    pub listings_scraped: usize,
    pub listings_skipped: usize,
    /// True when the grid was computed from an empty listing table. The
    /// fares are all zero in that case and must not be read as a quote.
    pub degraded: bool,
    pub rows: usize,
    pub columns: usize,
    pub fares: FareMatrix,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// More than enough for a search form; rejects runaway bodies.
const BODY_LIMIT: usize = 64 * 1024;

/// Decode the request body as JSON or as a urlencoded form, keyed off the
/// Content-Type header. The form path is what the plain HTML-form contract
/// needs; the JSON path is what the embedded page actually sends.
async fn decode_request(
    request: Request,
) -> Result<PlanRequest, (StatusCode, Json<ErrorResponse>)> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    let bytes = to_bytes(request.into_body(), BODY_LIMIT)
        .await
        .map_err(|e| {
            error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to read request body: {}", e),
            )
        })?;

    if content_type.starts_with("application/json") {
        serde_json::from_slice(&bytes).map_err(|e| {
            error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e))
        })
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        plan_request_from_form(&bytes)
            .map_err(|message| error_response(StatusCode::BAD_REQUEST, message))
    } else {
        Err(error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Expected application/json or application/x-www-form-urlencoded",
        ))
    }
}

/// Decode a urlencoded form body. `amenities` is multi-valued (one pair
/// per selected option), which is why this does not go through a serde
/// Form extractor.
fn plan_request_from_form(bytes: &[u8]) -> Result<PlanRequest, String> {
    fn required(field: &str, value: Option<String>) -> Result<String, String> {
        value.ok_or_else(|| format!("Missing form field: {}", field))
    }

    fn count(field: &str, value: &str) -> Result<usize, String> {
        value
            .trim()
            .parse()
            .map_err(|_| format!("Form field {} must be a non-negative integer", field))
    }

    let mut source = None;
    let mut destination = None;
    let mut bus_type = None;
    let mut seating_type = None;
    let mut amenities = Vec::new();
    let mut departure_date = None;
    let mut departure_time = None;
    let mut rows = 0;
    let mut columns = 0;
    let mut num_seats = 0;
    let mut num_berths = 0;

    for (key, value) in url::form_urlencoded::parse(bytes) {
        let value = value.into_owned();
        match key.as_ref() {
            "source" => source = Some(value),
            "destination" => destination = Some(value),
            "bus_type" => bus_type = Some(value),
            "seating_type" => seating_type = Some(value),
            "amenities" => amenities.push(value),
            "departure_date" => departure_date = Some(value),
            "departure_time" => departure_time = Some(value),
            "rows" => rows = count("rows", &value)?,
            "columns" => columns = count("columns", &value)?,
            "num_seats" => num_seats = count("num_seats", &value)?,
            "num_berths" => num_berths = count("num_berths", &value)?,
            _ => {}
        }
    }

    Ok(PlanRequest {
        source: required("source", source)?,
        destination: required("destination", destination)?,
        bus_type: required("bus_type", bus_type)?,
        seating_type: required("seating_type", seating_type)?,
        amenities,
        departure_date: required("departure_date", departure_date)?,
        departure_time: required("departure_time", departure_time)?,
        rows,
        columns,
        num_seats,
        num_berths,
    })
}

/// Run one scrape-and-plan cycle.
///
/// Upstream scrape failures map to 502, an unparsable departure time to
/// 422 (the request is rejected instead of defaulting the time), and an
/// empty result degrades to a zero-fare grid flagged `degraded`.
pub async fn plan_handler(
    Extension(state): Extension<AppState>,
    request: Request,
) -> Result<Json<PlanResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request = decode_request(request).await?;
    let query = SearchQuery {
        source: request.source.clone(),
        destination: request.destination.clone(),
        date: request.departure_date.clone(),
        bus_type: request.bus_type.clone(),
    };

    let extraction = state.source.fetch_listings(&query).await.map_err(|e| {
        error!(error = %e, "Scrape failed");
        error_response(StatusCode::BAD_GATEWAY, format!("Scrape failed: {}", e))
    })?;

    state.store.save(&extraction.listings).map_err(|e| {
        error!(error = %e, "Failed to persist listing table");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    // Base fare comes from the persisted table, not the in-flight scrape
    // result, so it always reflects what a reload would see.
    let records = state.store.load().map_err(|e| {
        error!(error = %e, "Failed to reload listing table");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    let base_fare = mean_fare(&records);
    let degraded = records.is_empty();
    if degraded {
        warn!(
            source = %request.source,
            destination = %request.destination,
            "No listings scraped; returning a degraded zero-fare grid"
        );
    }

    let seating_type = SeatingType::from_form(&request.seating_type);
    let amenities = request.amenities.join(", ");

    let fares = plan_grid(
        seating_type,
        request.rows,
        request.columns,
        request.num_seats,
        &amenities,
        &request.departure_time,
        base_fare,
    )
    .map_err(|e| match e {
        FareError::UnparsableTime { .. } => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
    })?;

    Ok(Json(PlanResponse {
        base_fare,
        listings_scraped: extraction.listings.len(),
        listings_skipped: extraction.skipped,
        degraded,
        rows: request.rows,
        columns: request.columns,
        fares,
    }))
}
