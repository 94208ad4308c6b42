//! HTTP client for the CoinMarketCap API

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::CredentialConfig;
use crate::types::{QuoteQuery, UpstreamError, UpstreamResult};

pub const LISTINGS_PATH: &str = "/v1/cryptocurrency/listings/latest";
pub const QUOTES_PATH: &str = "/v1/cryptocurrency/quotes/latest";

/// First rank returned by the listings endpoint
pub const LISTINGS_START: u32 = 1;
/// Maximum number of listings requested
pub const LISTINGS_LIMIT: u32 = 5;
/// Fiat unit for all conversions
pub const CONVERT_CURRENCY: &str = "USD";

const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Read-only client for the two upstream endpoints
///
/// Each operation performs exactly one GET. Non-2xx responses and transport
/// faults both come back as [`UpstreamError`].
#[derive(Debug, Clone)]
pub struct CoinMarketClient {
    http: Client,
    config: CredentialConfig,
}

impl CoinMarketClient {
    pub fn new(config: CredentialConfig) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// Latest listings, ranks 1 through 5, priced in USD
    pub async fn fetch_listings(&self) -> Result<UpstreamResult, UpstreamError> {
        let start = LISTINGS_START.to_string();
        let limit = LISTINGS_LIMIT.to_string();
        let params = [
            ("start", start.as_str()),
            ("limit", limit.as_str()),
            ("convert", CONVERT_CURRENCY),
        ];
        self.get(LISTINGS_PATH, &params).await
    }

    /// Latest quotes for the given slug and/or symbol, priced in USD
    pub async fn fetch_quotes(&self, query: &QuoteQuery) -> Result<UpstreamResult, UpstreamError> {
        let mut params = vec![("convert", CONVERT_CURRENCY)];
        params.extend(query.params());
        self.get(QUOTES_PATH, &params).await
    }

    async fn get(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<UpstreamResult, UpstreamError> {
        let url = format!("{}{}", self.config.base_url(), path);
        debug!(url = %url, ?params, "Requesting upstream");

        let response = self
            .http
            .get(&url)
            .header("Accepts", "application/json")
            .header(API_KEY_HEADER, self.config.api_key())
            .query(params)
            .send()
            .await
            .inspect_err(|e| warn!(url = %url, error = %e, "Upstream request failed"))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream returned error status");
            // The status is the cause; an unreadable body leaves it empty
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
