//! Static resource and tool catalogs

use serde_json::json;

use crate::types::{ResourceDescriptor, ToolDescriptor};

/// Custom URI scheme for every resource served here
pub const URI_SCHEME: &str = "coinmarket";

pub const LISTINGS_URI: &str = "coinmarket://cryptocurrency/listings";
pub const QUOTES_URI: &str = "coinmarket://cryptocurrency/quotes";

pub const LISTINGS_TOOL: &str = "get_currency_listings";
pub const QUOTES_TOOL: &str = "get_quotes";

pub const JSON_MIME_TYPE: &str = "application/json";

/// The two resources, in advertised order
pub fn resources() -> Vec<ResourceDescriptor> {
    vec![
        ResourceDescriptor {
            uri: LISTINGS_URI,
            name: "Latest cryptocurrency listings from coinmarket",
            description: "Cryptocurrency listings",
            mime_type: JSON_MIME_TYPE,
        },
        ResourceDescriptor {
            uri: QUOTES_URI,
            name: "Cryptocurrency quotes",
            description: "Cryptocurrency quotes",
            mime_type: JSON_MIME_TYPE,
        },
    ]
}

/// The two tools, in advertised order
pub fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: LISTINGS_TOOL,
            description: "Get latest cryptocurrency listings",
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": [],
            }),
        },
        ToolDescriptor {
            name: QUOTES_TOOL,
            description: "Get cryptocurrency quotes",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "slug": {"type": "string"},
                    "symbol": {"type": "string"},
                },
                "required": [],
            }),
        },
    ]
}
