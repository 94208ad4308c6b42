//! MCP Server implementation using the official rmcp SDK
//!
//! Exposes CoinMarketCap listings and quotes as resources and tools.

use std::sync::Arc;

use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext};
use tracing::{debug, warn};

use crate::catalog::JSON_MIME_TYPE;
use crate::config::CredentialConfig;
use crate::dispatch::Dispatcher;
use crate::types::{CoinMarketError, ResourceDescriptor, ToolDescriptor};
use crate::upstream::CoinMarketClient;

/// Server name reported during initialization
pub const SERVER_NAME: &str = "coinmarket_service";

// ============================================================================
// Protocol conversions
// ============================================================================

impl From<CoinMarketError> for McpError {
    fn from(err: CoinMarketError) -> Self {
        let message = err.to_string();
        match err {
            CoinMarketError::UnsupportedScheme(_) | CoinMarketError::UnsupportedPath(_) => {
                McpError::resource_not_found(message, None)
            }
            CoinMarketError::InvalidUri(_)
            | CoinMarketError::UnsupportedTool(_)
            | CoinMarketError::InvalidArguments { .. } => McpError::invalid_params(message, None),
            _ => McpError::internal_error(message, None),
        }
    }
}

fn log_failure(err: &CoinMarketError) {
    if err.is_client_error() {
        debug!(error = %err, "Rejected request");
    } else {
        warn!(error = %err, "Request failed");
    }
}

fn to_resource(descriptor: ResourceDescriptor) -> Resource {
    let mut raw = RawResource::new(descriptor.uri, descriptor.name);
    raw.description = Some(descriptor.description.to_string());
    raw.mime_type = Some(descriptor.mime_type.to_string());
    raw.no_annotation()
}

fn to_tool(descriptor: ToolDescriptor) -> Tool {
    let schema = match descriptor.input_schema {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    Tool::new(descriptor.name, descriptor.description, Arc::new(schema))
}

// ============================================================================
// MCP Service
// ============================================================================

/// CoinMarketCap MCP Service
///
/// Stateless apart from the immutable upstream client; clones share the
/// underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct CoinMarketService {
    dispatcher: Dispatcher,
}

impl CoinMarketService {
    pub fn new(config: CredentialConfig) -> Result<Self, CoinMarketError> {
        let client = CoinMarketClient::new(config)?;
        Ok(Self::with_dispatcher(Dispatcher::new(client)))
    }

    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

impl ServerHandler for CoinMarketService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                title: Some("CoinMarketCap".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "CoinMarketCap MCP Server - latest cryptocurrency listings and quotes in USD"
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = self
            .dispatcher
            .list_resources()
            .into_iter()
            .map(to_resource)
            .collect();
        Ok(ListResourcesResult::with_all_items(resources))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let body = self
            .dispatcher
            .read_resource(&request.uri)
            .await
            .inspect_err(log_failure)?;

        let mut contents = ResourceContents::text(body, request.uri);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = Some(JSON_MIME_TYPE.to_string());
        }
        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self
            .dispatcher
            .list_tools()
            .into_iter()
            .map(to_tool)
            .collect();
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let items = self
            .dispatcher
            .call_tool(&request.name, request.arguments)
            .await
            .inspect_err(log_failure)?;

        Ok(CallToolResult::success(
            items.into_iter().map(|item| Content::text(item.text)).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::types::UpstreamError;

    fn service() -> CoinMarketService {
        CoinMarketService::new(CredentialConfig::new("test-key").unwrap()).unwrap()
    }

    #[test]
    fn test_server_info() {
        let info = service().get_info();
        assert_eq!(info.server_info.name, SERVER_NAME);
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
    }

    #[test]
    fn test_resources_convert() {
        let resources: Vec<Resource> = catalog::resources().into_iter().map(to_resource).collect();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].raw.uri, catalog::LISTINGS_URI);
        assert_eq!(resources[1].raw.uri, catalog::QUOTES_URI);
        assert_eq!(resources[1].raw.mime_type.as_deref(), Some(JSON_MIME_TYPE));
    }

    #[test]
    fn test_tools_convert() {
        let tools: Vec<Tool> = catalog::tools().into_iter().map(to_tool).collect();
        assert_eq!(tools[0].name, catalog::LISTINGS_TOOL);
        assert_eq!(tools[1].name, catalog::QUOTES_TOOL);
        assert_eq!(tools[1].input_schema["type"], "object");
        assert!(tools[1].input_schema["properties"].get("slug").is_some());
    }

    #[test]
    fn test_error_mapping() {
        let err: McpError = CoinMarketError::UnsupportedTool("nope".to_string()).into();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "Unsupported tool: nope");

        let err: McpError = CoinMarketError::UnsupportedScheme("https".to_string()).into();
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);

        let err: McpError = CoinMarketError::ToolExecution(UpstreamError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("500"));
        assert!(err.message.contains("boom"));
    }
}
