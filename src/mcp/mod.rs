//! MCP (Model Context Protocol) server implementation
//!
//! This module provides a stdio-based MCP server using the official `rmcp` SDK.
//! It exposes the listings and quotes endpoints as resources and as tools.

mod server;

pub use server::{CoinMarketService, SERVER_NAME};
