//! Request routing from protocol identifiers to upstream operations

use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::catalog::{self, URI_SCHEME};
use crate::types::{
    CoinMarketError, QuoteQuery, ResourceDescriptor, Result, TextContent, ToolDescriptor,
    UpstreamResult,
};
use crate::upstream::CoinMarketClient;

/// Known resource paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRoute {
    Listings,
    Quotes(QuoteQuery),
}

impl ResourceRoute {
    /// Resolve a resource URI into a route
    ///
    /// The host is ignored, so `coinmarket:///quotes` and
    /// `coinmarket://cryptocurrency/quotes` are the same resource.
    pub fn parse(uri: &str) -> Result<Self> {
        let url = Url::parse(uri)?;
        if url.scheme() != URI_SCHEME {
            return Err(CoinMarketError::UnsupportedScheme(url.scheme().to_string()));
        }

        match url.path() {
            "/listings" => Ok(Self::Listings),
            "/quotes" => Ok(Self::Quotes(quote_query_from_url(&url))),
            other => Err(CoinMarketError::UnsupportedPath(other.to_string())),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Listings => "listings",
            Self::Quotes(_) => "quotes",
        }
    }
}

/// Known tool names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolRoute {
    Listings,
    Quotes,
}

impl ToolRoute {
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            catalog::LISTINGS_TOOL => Ok(Self::Listings),
            catalog::QUOTES_TOOL => Ok(Self::Quotes),
            other => Err(CoinMarketError::UnsupportedTool(other.to_string())),
        }
    }
}

/// Last value wins when a key repeats; empty values are absent
fn quote_query_from_url(url: &Url) -> QuoteQuery {
    url.query_pairs()
        .fold(QuoteQuery::default(), |mut query, (key, value)| {
            let value = (!value.is_empty()).then(|| value.into_owned());
            match key.as_ref() {
                "slug" => query.slug = value,
                "symbol" => query.symbol = value,
                _ => {}
            }
            query
        })
}

fn quote_query_from_args(arguments: Option<Map<String, Value>>) -> Result<QuoteQuery> {
    match arguments {
        Some(args) if !args.is_empty() => serde_json::from_value(Value::Object(args)).map_err(
            |e| CoinMarketError::InvalidArguments {
                tool: catalog::QUOTES_TOOL.to_string(),
                reason: e.to_string(),
            },
        ),
        _ => Ok(QuoteQuery::default()),
    }
}

/// Pretty-print with two-space indentation
fn render(value: &UpstreamResult) -> String {
    // Serializing a `Value` cannot fail
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Routes list/read/call requests to the upstream client
///
/// Holds no mutable state; safe to share across concurrent requests.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: CoinMarketClient,
}

impl Dispatcher {
    pub fn new(client: CoinMarketClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CoinMarketClient {
        &self.client
    }

    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        catalog::resources()
    }

    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        catalog::tools()
    }

    /// Read a resource by URI, returning the pretty-printed JSON body
    pub async fn read_resource(&self, uri: &str) -> Result<String> {
        let route = ResourceRoute::parse(uri)?;
        debug!(uri, ?route, "Reading resource");

        let result = match &route {
            ResourceRoute::Listings => self.client.fetch_listings().await,
            ResourceRoute::Quotes(query) => self.client.fetch_quotes(query).await,
        };

        result
            .map(|data| render(&data))
            .map_err(|source| CoinMarketError::ResourceRead {
                resource: route.label(),
                source,
            })
    }

    /// Invoke a tool by name
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<Vec<TextContent>> {
        let route = ToolRoute::parse(name)?;
        debug!(tool = name, "Calling tool");

        let result = match route {
            ToolRoute::Listings => self.client.fetch_listings().await,
            ToolRoute::Quotes => {
                let query = quote_query_from_args(arguments)?;
                self.client.fetch_quotes(&query).await
            }
        };

        let data = result.map_err(CoinMarketError::ToolExecution)?;
        Ok(vec![TextContent::new(render(&data))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_listings_route() {
        assert_eq!(
            ResourceRoute::parse(catalog::LISTINGS_URI).unwrap(),
            ResourceRoute::Listings
        );
    }

    #[test]
    fn test_parse_quotes_route_without_host() {
        let route = ResourceRoute::parse("coinmarket:///quotes?slug=bitcoin").unwrap();
        assert_eq!(
            route,
            ResourceRoute::Quotes(QuoteQuery::default().with_slug("bitcoin"))
        );
    }

    #[test]
    fn test_repeated_query_key_last_wins() {
        let route =
            ResourceRoute::parse("coinmarket://cryptocurrency/quotes?slug=a&symbol=X&slug=b")
                .unwrap();
        assert_eq!(
            route,
            ResourceRoute::Quotes(QuoteQuery::new(Some("b".into()), Some("X".into())))
        );
    }

    #[test]
    fn test_unsupported_scheme_regardless_of_path() {
        for uri in [
            "https://cryptocurrency/listings",
            "file:///quotes",
            "other://cryptocurrency/nothing",
        ] {
            let err = ResourceRoute::parse(uri).unwrap_err();
            assert!(
                matches!(err, CoinMarketError::UnsupportedScheme(_)),
                "{uri}: {err}"
            );
        }
    }

    #[test]
    fn test_unsupported_path() {
        let err = ResourceRoute::parse("coinmarket://cryptocurrency/prices").unwrap_err();
        assert!(matches!(err, CoinMarketError::UnsupportedPath(p) if p == "/prices"));
    }

    #[test]
    fn test_invalid_uri() {
        let err = ResourceRoute::parse("not a uri").unwrap_err();
        assert!(matches!(err, CoinMarketError::InvalidUri(_)));
    }

    #[test]
    fn test_tool_route() {
        assert_eq!(ToolRoute::parse("get_quotes").unwrap(), ToolRoute::Quotes);
        let err = ToolRoute::parse("nonexistent_tool").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported tool: nonexistent_tool");
    }

    #[test]
    fn test_empty_and_missing_args_are_equivalent() {
        let empty = quote_query_from_args(Some(Map::new())).unwrap();
        let missing = quote_query_from_args(None).unwrap();
        assert_eq!(empty, missing);
        assert_eq!(missing, QuoteQuery::default());
    }

    #[test]
    fn test_non_string_arg_rejected() {
        let args = json!({"slug": 42}).as_object().cloned();
        let err = quote_query_from_args(args).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_render_two_space_indent() {
        assert_eq!(render(&json!({"a": 1})), "{\n  \"a\": 1\n}");
    }
}
