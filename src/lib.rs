//! CoinMarketCap MCP adapter
//!
//! Exposes two CoinMarketCap endpoints (latest listings and latest quotes) to
//! MCP clients, both as URI-addressed resources and as callable tools.
//!
//! ## Resources
//!
//! - `coinmarket://cryptocurrency/listings` - top 5 listings priced in USD
//! - `coinmarket://cryptocurrency/quotes?slug=..&symbol=..` - quotes priced in USD
//!
//! ## Tools
//!
//! - `get_currency_listings` - no arguments
//! - `get_quotes` - optional string arguments `slug` and `symbol`
//!
//! ## Example
//!
//! ```ignore
//! use coinmarket_mcp::{CredentialConfig, CoinMarketClient, Dispatcher};
//!
//! let config = CredentialConfig::from_env()?;
//! let dispatcher = Dispatcher::new(CoinMarketClient::new(config)?);
//!
//! let body = dispatcher
//!     .read_resource("coinmarket://cryptocurrency/quotes?symbol=BTC")
//!     .await?;
//! println!("{body}");
//! ```

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod mcp;
pub mod types;
pub mod upstream;

pub use config::CredentialConfig;
pub use dispatch::{Dispatcher, ResourceRoute, ToolRoute};
pub use types::{
    CoinMarketError, QuoteQuery, ResourceDescriptor, Result, TextContent, ToolDescriptor,
    UpstreamError, UpstreamResult,
};
pub use upstream::CoinMarketClient;
