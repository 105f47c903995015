use crate::rates::MetalType;
use regex::Regex;
use scraper::Html;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateFetchError {
    #[error("Failed to Build Client")]
    ClientError,

    #[error("Failed to get response:{0}")]
    GetUrlError(String),

    #[error("No rates found in page")]
    NoRatesFound,
}

/// Rates the scrape managed to find, keyed by metal. Usually partial.
#[derive(Debug, Default, Clone)]
pub struct FetchedRates {
    rates: HashMap<MetalType, f64>,
}

impl FetchedRates {
    pub fn get(&self, metal: MetalType) -> Option<f64> {
        self.rates.get(&metal).copied()
    }

    pub fn insert(&mut self, metal: MetalType, rate: f64) {
        self.rates.insert(metal, rate);
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }
}

// Pattern per metal, matched against the flattened page text. The number is
// expected within a short window after the metal marker.
const RATE_PATTERNS: [(MetalType, &str); 4] = [
    (MetalType::Gold22K916, r"(?i)(?:22\s*k(?:\s*/\s*916)?|916)"),
    (MetalType::Gold20K833, r"(?i)(?:20\s*k(?:\s*/\s*833)?|833)"),
    (MetalType::Gold18K750, r"(?i)(?:18\s*k(?:\s*/\s*750)?|750)"),
    (MetalType::Silver, r"(?i)silver"),
];

const RATE_NUMBER: &str = r"[^0-9]{0,40}?([0-9][0-9,]*(?:\.[0-9]+)?)";

pub struct RateFetcher {
    url: String,
    client: reqwest::Client,
}

impl RateFetcher {
    pub fn new(url: &str) -> Result<Self, RateFetchError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|_| RateFetchError::ClientError)?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    /// Best effort. Any failure degrades to `None`; the caller keeps its
    /// existing rate table.
    pub async fn fetch_rates(&self) -> Option<FetchedRates> {
        match self.try_fetch().await {
            Ok(rates) => Some(rates),
            Err(e) => {
                tracing::warn!("Rate fetch failed:{}", e);
                None
            }
        }
    }

    async fn try_fetch(&self) -> Result<FetchedRates, RateFetchError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "text/html")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| RateFetchError::GetUrlError(e.to_string()))?
            .text()
            .await
            .map_err(|e| RateFetchError::GetUrlError(e.to_string()))?;

        let rates = parse_rates(&response);
        if rates.is_empty() {
            return Err(RateFetchError::NoRatesFound);
        }
        Ok(rates)
    }
}

/// Heuristic scrape of per-gram rates out of unstructured page text. Finds
/// whatever subset of metals the page happens to mention.
pub fn parse_rates(html: &str) -> FetchedRates {
    let document = Html::parse_document(html);
    let text = document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");

    let mut fetched = FetchedRates::default();
    for (metal, marker) in RATE_PATTERNS {
        let pattern = format!("{}{}", marker, RATE_NUMBER);
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        let Some(captures) = re.captures(&text) else {
            continue;
        };
        let raw = captures[1].replace(',', "");
        if let Ok(rate) = raw.parse::<f64>() {
            if rate > 0.0 {
                fetched.insert(metal, rate);
            }
        }
    }
    fetched
}

#[cfg(test)]
mod fetcher_tests {
    use super::*;

    #[test]
    fn test_parse_rates_from_page_text() {
        let html = r#"<html><body>
            <div class="rate">Gold 22K/916: ₹ 5,725 per gram</div>
            <div class="rate">Gold 18K/750 today at ₹ 4,750.50</div>
            <div class="rate">Silver ₹ 412.5 / gm</div>
        </body></html>"#;

        let fetched = parse_rates(html);

        assert_eq!(fetched.get(MetalType::Gold22K916), Some(5725.0));
        assert_eq!(fetched.get(MetalType::Gold18K750), Some(4750.5));
        assert_eq!(fetched.get(MetalType::Silver), Some(412.5));
        assert_eq!(fetched.get(MetalType::Gold20K833), None);
    }

    #[test]
    fn test_parse_rates_ignores_unrelated_text() {
        let html = "<html><body><p>Welcome to our store</p></body></html>";
        assert!(parse_rates(html).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_rates_from_mock_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rates")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body>22K gold rate ₹ 5,800 and Silver ₹ 420</body></html>")
            .create_async()
            .await;

        let fetcher = RateFetcher::new(&format!("{}/rates", server.url()))
            .expect("Failed to build fetcher");
        let fetched = fetcher.fetch_rates().await.expect("Expected rates");

        mock.assert_async().await;
        assert_eq!(fetched.get(MetalType::Gold22K916), Some(5800.0));
        assert_eq!(fetched.get(MetalType::Silver), Some(420.0));
        assert_eq!(fetched.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_rates_degrades_to_none_on_unusable_page() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rates")
            .with_status(200)
            .with_body("<html><body>maintenance</body></html>")
            .create_async()
            .await;

        let fetcher = RateFetcher::new(&format!("{}/rates", server.url()))
            .expect("Failed to build fetcher");

        assert!(fetcher.fetch_rates().await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_rates_degrades_to_none_on_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/rates")
            .with_status(500)
            .with_body("")
            .create_async()
            .await;

        let fetcher = RateFetcher::new(&format!("{}/rates", server.url()))
            .expect("Failed to build fetcher");

        assert!(fetcher.fetch_rates().await.is_none());
    }
}
