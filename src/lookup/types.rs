//! Wire types for the Alchemy NFT and JSON-RPC endpoints.

use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 request structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: u64,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request for alchemy_getTokenMetadata
    ///
    /// # Arguments
    /// * `contract` - Contract address (with 0x prefix)
    /// * `id` - Request ID (for response correlation)
    pub fn token_metadata(contract: &str, id: u64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: "alchemy_getTokenMetadata".to_string(),
            params: serde_json::json!([contract]),
            id,
        }
    }
}

/// JSON-RPC 2.0 response structure
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// One page of `getOwnersForContract`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnersPage {
    #[serde(default)]
    pub owners: Vec<String>,

    /// Present when more owners follow
    #[serde(default)]
    pub page_key: Option<String>,
}

/// Descriptive contract metadata as returned by the lookup service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}
