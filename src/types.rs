//! Core types for the CoinMarketCap adapter

use serde::Deserialize;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, CoinMarketError>;

/// Arbitrary JSON document returned by the upstream API, passed through as-is
pub type UpstreamResult = serde_json::Value;

/// An addressable, read-only resource advertised to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// URI the client reads the resource by
    pub uri: &'static str,
    /// Display name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Content type of the resource body
    pub mime_type: &'static str,
}

/// An invocable tool advertised to clients
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    /// Tool name used in call requests
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// JSON Schema for the tool arguments
    pub input_schema: serde_json::Value,
}

/// Optional identifiers for a quotes lookup
///
/// Neither field is required; the upstream API decides what an empty query means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuoteQuery {
    /// Upstream slug, e.g. `bitcoin`
    #[serde(default)]
    pub slug: Option<String>,
    /// Ticker symbol, e.g. `BTC`
    #[serde(default)]
    pub symbol: Option<String>,
}

impl QuoteQuery {
    /// Create a query from optional slug and symbol
    pub fn new(slug: Option<String>, symbol: Option<String>) -> Self {
        Self { slug, symbol }
    }

    /// Builder: set the slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Builder: set the symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Query parameters to forward, skipping absent and empty values
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        [("slug", self.slug.as_deref()), ("symbol", self.symbol.as_deref())]
            .into_iter()
            .filter_map(|(key, value)| match value {
                Some(v) if !v.is_empty() => Some((key, v)),
                _ => None,
            })
            .collect()
    }
}

/// A single text content item produced by a tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextContent {
    pub text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Failures talking to the upstream API
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    /// HTTP status code, when the upstream answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(status.as_u16()),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

/// Errors surfaced by the adapter
#[derive(Debug, Error)]
pub enum CoinMarketError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Invalid resource URI: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Unsupported path: {0}")]
    UnsupportedPath(String),

    #[error("Unsupported tool: {0}")]
    UnsupportedTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Failed to fetch {resource} data: {source}")]
    ResourceRead {
        resource: &'static str,
        #[source]
        source: UpstreamError,
    },

    #[error("Failed to fetch data: {0}")]
    ToolExecution(#[source] UpstreamError),
}

impl CoinMarketError {
    /// Whether the caller asked for something this server does not recognize
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUri(_)
                | Self::UnsupportedScheme(_)
                | Self::UnsupportedPath(_)
                | Self::UnsupportedTool(_)
                | Self::InvalidArguments { .. }
        )
    }

    /// The upstream failure behind this error, if any
    pub fn upstream(&self) -> Option<&UpstreamError> {
        match self {
            Self::Upstream(e) | Self::ToolExecution(e) => Some(e),
            Self::ResourceRead { source, .. } => Some(source),
            _ => None,
        }
    }
}
