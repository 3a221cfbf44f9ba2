use anyhow::{Context, Result};
use url::Url;

/// One search against the aggregator: a route, a travel date, and the
/// bus-type filter the user picked on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub source: String,
    pub destination: String,
    /// Travel date as entered on the form (the aggregator accepts it verbatim).
    pub date: String,
    pub bus_type: String,
}

impl SearchQuery {
    /// Build the search-results URL. The path segment is the lower-cased,
    /// hyphenated route slug; the original city names ride along as query
    /// parameters, percent-encoded by the URL builder.
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let slug = |city: &str| city.replace(' ', "-").to_lowercase();

        let mut url = Url::parse(base_url).context("Invalid aggregator base URL")?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Aggregator base URL cannot be a base"))?
            .push(&format!(
                "{}-to-{}",
                slug(&self.source),
                slug(&self.destination)
            ));
        url.query_pairs_mut()
            .append_pair("fromCityName", &self.source)
            .append_pair("toCityName", &self.destination)
            .append_pair("onward", &self.date)
            .append_pair("busType", &self.bus_type);

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> SearchQuery {
        SearchQuery {
            source: "New Delhi".to_string(),
            destination: "Manali".to_string(),
            date: "2025-11-03".to_string(),
            bus_type: "Sleeper".to_string(),
        }
    }

    #[test]
    fn test_url_slugs_and_query_params() {
        let url = query().url("https://www.redbus.in/bus-tickets").unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.redbus.in/bus-tickets/new-delhi-to-manali\
             ?fromCityName=New+Delhi&toCityName=Manali&onward=2025-11-03&busType=Sleeper"
        );
    }

    #[test]
    fn test_url_encodes_reserved_characters() {
        let mut q = query();
        q.source = "Delhi & NCR".to_string();

        let url = q.url("https://www.redbus.in/bus-tickets").unwrap();
        assert_eq!(url.path(), "/bus-tickets/delhi-&-ncr-to-manali");
        assert!(url.query().unwrap().contains("fromCityName=Delhi+%26+NCR"));
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        assert!(query().url("not a url").is_err());
    }
}
